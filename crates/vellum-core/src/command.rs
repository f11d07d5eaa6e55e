//! Operation parsing.
//!
//! Arity and shape are checked here, before any engine resource is touched,
//! so a malformed invocation never creates or locks a database file.

use crate::error::{Result, VellumError};

/// The single operation requested by one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { key: String, value: String },
    Get { key: String },
    Del { key: String },
    Info,
    Help,
    Unknown(String),
}

impl Command {
    /// Parse the operation and its arguments (everything after the database path).
    ///
    /// An empty argument list is a request for help.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let Some((op, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        let rest: Vec<&str> = rest.iter().map(|arg| arg.as_ref()).collect();

        match op.as_ref() {
            "--put" => match rest.as_slice() {
                [key, value] => Ok(Command::Put {
                    key: non_empty_key(key)?,
                    value: (*value).to_string(),
                }),
                _ => Err(VellumError::Usage(
                    "'--put' operation requires two parameters: key and value.".into(),
                )),
            },
            "--get" => match rest.as_slice() {
                [key] => Ok(Command::Get {
                    key: non_empty_key(key)?,
                }),
                _ => Err(VellumError::Usage("'--get' operation requires key.".into())),
            },
            "--del" => match rest.as_slice() {
                [key] => Ok(Command::Del {
                    key: non_empty_key(key)?,
                }),
                _ => Err(VellumError::Usage("'--del' operation requires key.".into())),
            },
            "--info" => {
                if rest.is_empty() {
                    Ok(Command::Info)
                } else {
                    Err(VellumError::Usage(
                        "'--info' operation takes no parameters.".into(),
                    ))
                }
            }
            "--help" | "-h" => Ok(Command::Help),
            other => Ok(Command::Unknown(other.to_string())),
        }
    }

    /// Whether this command runs inside a transaction
    pub fn needs_namespace(&self) -> bool {
        matches!(
            self,
            Command::Put { .. } | Command::Get { .. } | Command::Del { .. } | Command::Info
        )
    }

    /// Whether a successful run must commit the transaction
    pub fn is_write(&self) -> bool {
        matches!(self, Command::Put { .. } | Command::Del { .. })
    }
}

fn non_empty_key(key: &str) -> Result<String> {
    if key.is_empty() {
        return Err(VellumError::Usage("key must not be empty.".into()));
    }
    Ok(key.to_string())
}
