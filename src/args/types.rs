use clap::Parser;
use serde_json::Value;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The sqlite database filename. `:memory:` keeps everything in memory.
    #[arg(
        short = 'n',
        long,
        value_name = "DATABASE_NAME",
        default_value = "productos.db"
    )]
    pub db_name: String,
    #[arg(long, value_name = "HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(short = 'p', long, value_name = "PORT", default_value = "8081")]
    pub port: u16,
    /// Mount the product and shipment pages under this path, e.g. `/tienda`.
    #[arg(
        long,
        value_name = "URL_PREFIX",
        default_value = "",
        value_parser = crate::args::validation::check_url_prefix
    )]
    pub url_prefix: String,
    /// Directory served under `/static`.
    #[arg(long, value_name = "STATIC_DIR", default_value = "./static")]
    pub static_dir: String,
    /// If specified, this sql is run on program startup. Separate several files with `;`.
    #[arg(long, value_name = "DATABASE_STARTUP_SCRIPT", value_parser = crate::args::validation::check_readable_file)]
    pub db_startup_script: Option<String>,
    /// Seed products and shipments from this json file when the database is empty.
    #[arg(
        long,
        value_name = "DATABASE_POPULATE_JSON",
        value_parser = crate::args::validation::check_readable_file_and_json
    )]
    pub db_populate_json: Option<Value>,
}

#[derive(Debug, Clone)]
pub struct CleanArgs {
    pub db_name: String,
    pub host: String,
    pub port: u16,
    pub url_prefix: String,
    pub static_dir: String,
    pub db_startup_script: Option<String>,
    pub db_populate_json: Option<Value>,
    pub combined_sql_script: String,
}
