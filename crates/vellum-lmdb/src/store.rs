use lmdb::{Database, Environment, EnvironmentFlags};
use std::path::PathBuf;
use tracing::debug;
use vellum_core::{Engine, EngineError, EngineResult, Geometry, Namespace, NamespaceConfig};

use crate::txn::LmdbTxn;

/// Convert an LMDB error into the engine's code + description pair
pub(crate) fn engine_error(err: lmdb::Error) -> EngineError {
    EngineError::new(err.to_err_code(), err.to_string())
}

/// LMDB storage engine
#[derive(Debug, Clone, Copy, Default)]
pub struct LmdbEngine;

impl LmdbEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for LmdbEngine {
    type Namespace = LmdbNamespace;

    fn open_namespace(&self, config: &NamespaceConfig) -> EngineResult<LmdbNamespace> {
        let mut env_builder = Environment::new();

        let mut flags = EnvironmentFlags::empty();
        if config.flags.no_sub_dir {
            flags.insert(EnvironmentFlags::NO_SUB_DIR);
        }
        if config.flags.coalesce || config.flags.lifo_reclaim {
            // LMDB has no switch for either; its free list order is fixed.
            debug!(
                coalesce = config.flags.coalesce,
                lifo_reclaim = config.flags.lifo_reclaim,
                "page reclamation flags not supported by LMDB, ignoring"
            );
        }
        env_builder.set_flags(flags);

        if let Some(map_size) = config.map_size {
            env_builder.set_map_size(map_size);
        }
        if let Some(max_readers) = config.max_readers {
            env_builder.set_max_readers(max_readers);
        }

        let env = env_builder
            .open_with_permissions(&config.path, config.mode as _)
            .map_err(engine_error)?;

        // The page size is the OS page size, fixed when the file is created.
        let page_size = env.stat().map_err(engine_error)?.page_size() as usize;
        debug!(page_size, "LMDB environment opened");

        Ok(LmdbNamespace {
            env,
            path: config.path.clone(),
            geometry: Geometry::fixed_page_size(page_size),
        })
    }
}

/// An open LMDB environment
///
/// The environment is closed when this value drops.
pub struct LmdbNamespace {
    env: Environment,
    path: PathBuf,
    geometry: Geometry,
}

impl LmdbNamespace {
    pub fn env(&self) -> &Environment {
        &self.env
    }
}

impl Namespace for LmdbNamespace {
    type Table = Database;
    type Txn<'ns> = LmdbTxn<'ns>
    where
        Self: 'ns;

    fn begin_rw_txn(&self) -> EngineResult<LmdbTxn<'_>> {
        let txn = self.env.begin_rw_txn().map_err(engine_error)?;
        Ok(LmdbTxn::new(txn))
    }

    fn close_table(&self, table: Database) {
        // Closing the main database handle is a no-op in LMDB, and only the
        // default table is ever opened.
        debug!(?table, "table handle released");
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }
}

impl Drop for LmdbNamespace {
    fn drop(&mut self) {
        debug!(path = %self.path.display(), "closing LMDB environment");
    }
}
