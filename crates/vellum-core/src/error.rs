use std::fmt;
use std::io;
use thiserror::Error;

use crate::traits::EngineError;

/// Engine call that produced a failure.
///
/// Displayed with the engine's own call names so operators can match the
/// message against the engine documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineOp {
    OpenNamespace,
    BeginTxn,
    OpenTable,
    Get,
    Put,
    Del,
    Commit,
}

impl EngineOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineOp::OpenNamespace => "env_open",
            EngineOp::BeginTxn => "txn_begin",
            EngineOp::OpenTable => "dbi_open",
            EngineOp::Get => "get",
            EngineOp::Put => "put",
            EngineOp::Del => "del",
            EngineOp::Commit => "txn_commit",
        }
    }
}

impl fmt::Display for EngineOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum VellumError {
    #[error("{0}")]
    Usage(String),

    #[error("Unknown parameter: '{0}'")]
    UnknownOperation(String),

    #[error("Key '{key}' not found")]
    NotFound { key: String },

    #[error("{op}: ({code}) {message}")]
    Engine {
        op: EngineOp,
        code: i32,
        message: String,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl VellumError {
    /// Attach the failing engine call to an engine error.
    pub fn engine(op: EngineOp, err: EngineError) -> Self {
        VellumError::Engine {
            op,
            code: err.code,
            message: err.message,
        }
    }

    /// Whether the invocation should exit with a failure status.
    ///
    /// Usage problems and absent keys are reported to the user but are not
    /// runtime failures.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            VellumError::Engine { .. } | VellumError::InvalidState(_) | VellumError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, VellumError>;
