use std::fmt;

use crate::capacity::Geometry;
use crate::config::NamespaceConfig;

/// Error reported by the storage engine: its numeric code and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineError {
    pub code: i32,
    pub message: String,
}

impl EngineError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}", self.code, self.message)
    }
}

impl std::error::Error for EngineError {}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Storage engine entry point
pub trait Engine {
    type Namespace: Namespace;

    /// Open (creating if needed) the namespace described by `config`
    fn open_namespace(&self, config: &NamespaceConfig) -> EngineResult<Self::Namespace>;
}

/// An opened storage environment bound to one file path
///
/// Dropping the namespace closes it. Transactions borrow the namespace, so it
/// always outlives every transaction begun on it.
pub trait Namespace {
    /// Handle identifying a table inside the namespace
    type Table: Copy + fmt::Debug;

    type Txn<'ns>: Txn<Table = Self::Table>
    where
        Self: 'ns;

    /// Begin a read-write transaction
    fn begin_rw_txn(&self) -> EngineResult<Self::Txn<'_>>;

    /// Release a table handle
    fn close_table(&self, table: Self::Table);

    /// Page geometry of the opened environment, used for capacity reporting
    fn geometry(&self) -> Geometry {
        Geometry::native()
    }
}

/// A single read-write transaction
pub trait Txn {
    type Table: Copy + fmt::Debug;

    /// Resolve a table; `None` names the default unnamed table
    fn open_table(&self, name: Option<&str>) -> EngineResult<Self::Table>;

    /// Look up a key; `Ok(None)` when the key is absent
    fn get(&self, table: Self::Table, key: &[u8]) -> EngineResult<Option<Vec<u8>>>;

    /// Insert or overwrite a key
    fn put(&mut self, table: Self::Table, key: &[u8], value: &[u8]) -> EngineResult<()>;

    /// Remove a key; `Ok(false)` when the key is absent
    fn del(&mut self, table: Self::Table, key: &[u8]) -> EngineResult<bool>;

    fn commit(self) -> EngineResult<()>;

    /// Discard every change made in the transaction
    fn abort(self);
}
