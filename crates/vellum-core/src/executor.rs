use tracing::debug;

use crate::capacity::{CapacityReport, Geometry, Scale};
use crate::command::Command;
use crate::error::{Result, VellumError};
use crate::session::Session;
use crate::traits::Namespace;

/// Result of one executed command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Stored,
    Found(Vec<u8>),
    Erased,
    Capacity(CapacityReport),
    Help,
}

impl Outcome {
    /// Whether the transaction must be committed to make this outcome durable
    pub fn requires_commit(&self) -> bool {
        matches!(self, Outcome::Stored | Outcome::Erased)
    }
}

/// Perform exactly one operation inside an open session.
///
/// An absent key on fetch or erase is returned as [`VellumError::NotFound`],
/// separate from every engine failure.
pub fn execute<N: Namespace>(
    session: &mut Session<'_, N>,
    command: &Command,
    geometry: &Geometry,
) -> Result<Outcome> {
    match command {
        Command::Put { key, value } => {
            session.put(key.as_bytes(), value.as_bytes())?;
            debug!(key = %key, bytes = value.len(), "stored");
            Ok(Outcome::Stored)
        }
        Command::Get { key } => match session.get(key.as_bytes())? {
            Some(value) => Ok(Outcome::Found(value)),
            None => Err(VellumError::NotFound { key: key.clone() }),
        },
        Command::Del { key } => {
            if session.del(key.as_bytes())? {
                debug!(key = %key, "erased");
                Ok(Outcome::Erased)
            } else {
                Err(VellumError::NotFound { key: key.clone() })
            }
        }
        Command::Info => Ok(Outcome::Capacity(CapacityReport::compute(
            geometry,
            Scale::native(),
        ))),
        Command::Help => Ok(Outcome::Help),
        Command::Unknown(name) => Err(VellumError::UnknownOperation(name.clone())),
    }
}
