//! Vellum CLI: one transaction per invocation against an LMDB namespace

use anyhow::Result;
use std::io::Write;
use vellum_core::{Command, Outcome};
use vellum_lmdb::LmdbEngine;

pub mod cli;
pub mod logging;
pub mod report;

pub use cli::Cli;
pub use report::{usage_error, Status};

/// Run the invocation described by `cli`, writing results to `out` and
/// failures to `err`.
///
/// Without a database path only usage is printed; argument errors are
/// reported before the namespace is opened.
pub fn execute<O, E>(cli: &Cli, out: &mut O, err: &mut E) -> Result<Status>
where
    O: Write,
    E: Write,
{
    let result = match &cli.db_path {
        None => Ok(Outcome::Help),
        Some(db_path) => Command::parse(cli.operation.as_slice()).and_then(|command| {
            tracing::debug!(?command, path = %db_path.display(), "executing");
            vellum_core::run(&LmdbEngine::new(), &cli.namespace_config(db_path), &command)
        }),
    };

    report::report(result, out, err)
}
