//! Maps the terminal result of an invocation to output and an exit status

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::CommandFactory;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use vellum_core::{Outcome, VellumError};

use crate::cli::Cli;

/// Process exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Failure => ExitCode::FAILURE,
        }
    }
}

/// Name the program was invoked as, for hints that tell the user what to type
pub(crate) fn program_name() -> String {
    std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| Cli::command().get_name().to_string())
}

/// Print the result of one invocation.
///
/// Results, usage and not-found go to `out`; engine failures go to `err`
/// and are the only outcomes that yield [`Status::Failure`].
pub fn report<O, E>(
    result: vellum_core::Result<Outcome>,
    out: &mut O,
    err: &mut E,
) -> Result<Status>
where
    O: Write,
    E: Write,
{
    match result {
        Ok(Outcome::Found(value)) => {
            out.write_all(&value).context("Failed to write value")?;
            writeln!(out)?;
        }
        Ok(Outcome::Capacity(report)) => writeln!(out, "{}", report)?,
        Ok(Outcome::Help) => writeln!(out, "{}", Cli::command().render_help())?,
        Ok(Outcome::Stored | Outcome::Erased) => {}
        Err(e @ VellumError::UnknownOperation(_)) => {
            writeln!(out, "{}. Type {} --help for help.", e, program_name())?;
        }
        Err(e) if e.is_failure() => {
            tracing::debug!(error = ?e, "invocation failed");
            writeln!(err, "{}", e).context("Failed to write error")?;
            return Ok(Status::Failure);
        }
        Err(e) => writeln!(out, "{}", e)?,
    }
    out.flush().context("Failed to flush output")?;
    Ok(Status::Success)
}

/// Report a command line that clap rejected.
///
/// An option-looking first argument (`vellum --put k v`) means the database
/// path is missing: that is a usage error, printed to `out` with
/// [`Status::Success`]. Any other parse error is handed back for clap to
/// print and exit with.
pub fn usage_error<O: Write>(error: clap::Error, out: &mut O) -> Result<Status, clap::Error> {
    if error.kind() != ErrorKind::UnknownArgument {
        return Err(error);
    }
    let written = write!(out, "{}", error.render()).and_then(|()| out.flush());
    Ok(match written {
        Ok(()) => Status::Success,
        Err(_) => Status::Failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::EngineOp;

    fn capture(result: vellum_core::Result<Outcome>) -> (Status, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = report(result, &mut out, &mut err).unwrap();
        (
            status,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_found_prints_value() {
        let (status, out, err) = capture(Ok(Outcome::Found(b"100".to_vec())));
        assert_eq!(status, Status::Success);
        assert_eq!(out, "100\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_writes_are_silent() {
        assert_eq!(capture(Ok(Outcome::Stored)), (Status::Success, String::new(), String::new()));
        assert_eq!(capture(Ok(Outcome::Erased)), (Status::Success, String::new(), String::new()));
    }

    #[test]
    fn test_not_found_is_success_on_stdout() {
        let (status, out, err) = capture(Err(VellumError::NotFound {
            key: "alpha".into(),
        }));
        assert_eq!(status, Status::Success);
        assert_eq!(out, "Key 'alpha' not found\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_engine_failure_goes_to_stderr() {
        let (status, out, err) = capture(Err(VellumError::Engine {
            op: EngineOp::OpenNamespace,
            code: 2,
            message: "No such file or directory".into(),
        }));
        assert_eq!(status, Status::Failure);
        assert!(out.is_empty());
        assert_eq!(err, "env_open: (2) No such file or directory\n");
    }

    #[test]
    fn test_unknown_operation_hint() {
        let (status, out, _) = capture(Err(VellumError::UnknownOperation("--frob".into())));
        assert_eq!(status, Status::Success);
        assert_eq!(
            out,
            format!(
                "Unknown parameter: '--frob'. Type {} --help for help.\n",
                program_name()
            )
        );
        assert!(!program_name().is_empty());
    }

    #[test]
    fn test_help_lists_operations() {
        let (status, out, _) = capture(Ok(Outcome::Help));
        assert_eq!(status, Status::Success);
        assert!(out.contains("--put <KEY> <VALUE>"));
        assert!(out.contains("--info"));
    }
}
