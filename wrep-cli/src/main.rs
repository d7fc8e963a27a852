//! Binary crate for the `wrep` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Human-friendly output formatting
//!
//! Exit status is non-zero whenever the weather could not be fetched or a command failed.

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod logging;
mod render;

#[tokio::main]
async fn main() -> ExitCode {
    let cmd = cli::Cli::parse();

    if let Err(e) = logging::init_logging(cmd.verbose()) {
        eprintln!("{e}");
    }

    match cmd.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if cli::is_failure(&err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Warning: {err:#}");
            ExitCode::SUCCESS
        }
    }
}
