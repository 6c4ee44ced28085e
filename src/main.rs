//! gitflow-gate entry point.
//!
//! The only place that decides the process exit code: 0 when the aggregate
//! verdict passed and no fatal error occurred, 1 otherwise.

use std::process::ExitCode;

use gitflow_gate::cli;
use gitflow_gate::ui::output;

#[tokio::main]
async fn main() -> ExitCode {
    match cli::run().await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
