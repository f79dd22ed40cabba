//! Console front end for the Tech Spot repair ledger.
//!
//! # Responsibility
//! - Resolve paths from the working directory and start file logging.
//! - Open the repair store once, run one interactive session, then close.
//!
//! # Invariants
//! - Failing to open the store ends the process with a non-zero status.

mod app;

use log::{error, info};
use repairshop_core::db::open_db;
use repairshop_core::{init_logging, AppConfig, RepairService, SqliteRepairRepository};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match AppConfig::from_current_dir() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("cannot resolve working directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let conn = match open_db(&config.db_path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=app_start module=cli status=error db_path={} error={}",
                config.db_path.display(),
                err
            );
            eprintln!("Storage Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let repo = match SqliteRepairRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            error!("event=app_start module=cli status=error error={err}");
            eprintln!("Storage Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let service = RepairService::new(repo);

    let session = app::Session::new(&service, &config);
    let result = session.run(io::stdin().lock(), io::stdout().lock());
    info!("event=app_exit module=cli status={}", if result.is_ok() { "ok" } else { "error" });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("console error: {err}");
            ExitCode::FAILURE
        }
    }
}
