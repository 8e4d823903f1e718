use clap::Parser;

mod database;
pub mod types;
pub mod validation;

pub use types::{Args, CleanArgs};

/// Parses and validates the command line.
///
/// # Errors
///
/// Will return `Err` if the arguments are inconsistent or a startup script is unreadable
pub fn args_checks() -> Result<CleanArgs, String> {
    let args = Args::parse();
    args.validate()?;
    let combined_sql_script = args.combined_sql_script()?;

    Ok(CleanArgs {
        db_name: args.db_name,
        host: args.host,
        port: args.port,
        url_prefix: args.url_prefix,
        static_dir: args.static_dir,
        db_startup_script: args.db_startup_script,
        db_populate_json: args.db_populate_json,
        combined_sql_script,
    })
}
