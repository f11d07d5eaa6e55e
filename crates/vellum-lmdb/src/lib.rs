//! LMDB-backed storage engine
//!
//! Implements the vellum engine traits on top of an LMDB environment.
//!
//! Key features:
//! - Single-file namespaces (`NO_SUB_DIR`), lock file next to the data file
//! - One read-write transaction per invocation on the default table
//! - Engine errors carry LMDB's numeric code and `mdb_strerror` text

pub mod store;
pub mod txn;

pub use store::{LmdbEngine, LmdbNamespace};
pub use txn::LmdbTxn;
