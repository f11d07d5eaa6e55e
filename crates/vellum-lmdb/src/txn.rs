use lmdb::{Database, RwTransaction, Transaction, WriteFlags};
use vellum_core::{EngineResult, Txn};

use crate::store::engine_error;

/// Read-write transaction for an LMDB namespace
///
/// Dropping an uncommitted transaction aborts it.
pub struct LmdbTxn<'env> {
    txn: RwTransaction<'env>,
}

impl<'env> LmdbTxn<'env> {
    pub fn new(txn: RwTransaction<'env>) -> Self {
        Self { txn }
    }
}

impl<'env> Txn for LmdbTxn<'env> {
    type Table = Database;

    fn open_table(&self, name: Option<&str>) -> EngineResult<Database> {
        // SAFETY: the handle must not outlive the environment. `LmdbTxn`
        // borrows the environment for 'env and the handle is only used
        // through this transaction's namespace, which closes it before the
        // environment drops.
        unsafe { self.txn.open_db(name) }.map_err(engine_error)
    }

    fn get(&self, table: Database, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
        match self.txn.get(table, &key) {
            Ok(bytes) => Ok(Some(bytes.to_vec())),
            Err(lmdb::Error::NotFound) => Ok(None),
            Err(e) => Err(engine_error(e)),
        }
    }

    fn put(&mut self, table: Database, key: &[u8], value: &[u8]) -> EngineResult<()> {
        self.txn
            .put(table, &key, &value, WriteFlags::empty())
            .map_err(engine_error)
    }

    fn del(&mut self, table: Database, key: &[u8]) -> EngineResult<bool> {
        match self.txn.del(table, &key, None) {
            Ok(()) => Ok(true),
            Err(lmdb::Error::NotFound) => Ok(false),
            // Argument rejection counts as absent. LMDB only returns EINVAL
            // here for an invalid handle, never for a non-empty key.
            Err(lmdb::Error::Other(code)) if code == libc::EINVAL => Ok(false),
            Err(e) => Err(engine_error(e)),
        }
    }

    fn commit(self) -> EngineResult<()> {
        self.txn.commit().map_err(engine_error)
    }

    fn abort(self) {
        self.txn.abort();
    }
}
