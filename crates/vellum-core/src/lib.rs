//! Vellum Core: command model and transaction lifecycle
//!
//! This crate defines everything the `vellum` CLI does above the storage
//! engine:
//! - Command parsing: arity is validated before any resource is opened
//! - Transaction lifecycle: namespace, transaction and table guards that
//!   release exactly what was acquired, in reverse order
//! - Command execution: one store, fetch, erase or capacity report per run
//! - Capacity limits: page-size dependent transaction and database ceilings
//!
//! The engine itself is reached through the traits in [`traits`].

pub mod capacity;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod session;
pub mod traits;

#[cfg(test)]
mod testing;

pub use capacity::{CapacityReport, Geometry, PageLimits, PageSize, Scale};
pub use command::Command;
pub use config::{NamespaceConfig, NamespaceFlags};
pub use error::{EngineOp, Result, VellumError};
pub use executor::{execute, Outcome};
pub use session::{run, NamespaceGuard, Session};
pub use traits::{Engine, EngineError, EngineResult, Namespace, Txn};
