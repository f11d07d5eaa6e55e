//! Vellum - single-transaction command-line interface for an embedded key-value store

use clap::Parser;
use std::process::ExitCode;
use vellum_cli::{execute, logging, usage_error, Cli};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match usage_error(e, &mut std::io::stdout().lock()) {
            Ok(status) => return status.into(),
            Err(e) => e.exit(),
        },
    };

    logging::init(cli.verbose);

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr();
    match execute(&cli, &mut stdout, &mut stderr) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
