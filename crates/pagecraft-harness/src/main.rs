#![forbid(unsafe_code)]

//! `pagecraft` binary entry point.

use std::process::ExitCode;

use pagecraft_harness::cli::{self, Command};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "PAGECRAFT_LOG";

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = Command::parse(std::env::args().skip(1)).and_then(|command| cli::run(&command));
    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "render failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
