use actix_files::Files;
use actix_web::{App, HttpServer, middleware};
use tracing_subscriber::EnvFilter;

use productos::app_config;
use productos::args;
use productos::controller::db_prefill;
use productos::storage::SqlStorage;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = match args::args_checks() {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    let storage = SqlStorage::open(&args.db_name)?;
    storage.create_tables().await?;

    if args.db_startup_script.is_some() {
        storage.execute_batch(args.combined_sql_script.clone()).await?;
        tracing::info!("startup script applied");
    }

    if let Some(json) = &args.db_populate_json {
        db_prefill::db_prefill(json, &storage).await?;
    }

    let static_dir = args.static_dir.clone();
    let prefix = args.url_prefix.clone();
    tracing::info!(host = %args.host, port = args.port, prefix = %prefix, db = %args.db_name, "listening");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .service(Files::new("/static", &static_dir))
            .configure(app_config(storage.clone(), prefix.clone()))
    })
    .bind((args.host.as_str(), args.port))?
    .run()
    .await?;
    Ok(())
}
