//! # CellParts ERP Entry Point
//!
//! Boots logging and the configured backend, then logs what the back-office
//! pages would show.
//!
//! ```text
//! cellparts-erp [path/to/erp.toml]
//! ```
//! Backend selection comes from the file and `CELLPARTS_*` variables; with
//! neither present the in-memory store is used and filled with demo data.

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    cellparts_erp::init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    match cellparts_erp::run(config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "CellParts ERP failed to start");
            ExitCode::FAILURE
        }
    }
}
