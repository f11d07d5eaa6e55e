//! Transaction-scoped command lifecycle.
//!
//! Each acquired resource is held by an owning guard:
//! namespace → transaction → table. A failing acquisition returns early and
//! the guards already created are dropped, so exactly the acquired subset is
//! released. Release order is transaction, table, namespace.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::capacity::Geometry;
use crate::command::Command;
use crate::config::NamespaceConfig;
use crate::error::{EngineOp, Result, VellumError};
use crate::executor::{self, Outcome};
use crate::traits::{Engine, Namespace, Txn};

/// Owns an opened namespace; dropping it closes the namespace
pub struct NamespaceGuard<N: Namespace> {
    namespace: N,
    path: PathBuf,
}

impl<N: Namespace> NamespaceGuard<N> {
    pub fn open<E>(engine: &E, config: &NamespaceConfig) -> Result<Self>
    where
        E: Engine<Namespace = N>,
    {
        let namespace = engine
            .open_namespace(config)
            .map_err(|e| VellumError::engine(EngineOp::OpenNamespace, e))?;
        debug!(path = %config.path.display(), "namespace opened");

        Ok(Self {
            namespace,
            path: config.path.clone(),
        })
    }

    pub fn geometry(&self) -> Geometry {
        self.namespace.geometry()
    }

    /// Begin a read-write transaction and resolve the default table
    pub fn begin(&self) -> Result<Session<'_, N>> {
        let txn = TxnGuard::begin(&self.namespace)?;
        let table = TableGuard::open(&self.namespace, &txn)?;
        Ok(Session { txn, table })
    }
}

impl<N: Namespace> Drop for NamespaceGuard<N> {
    fn drop(&mut self) {
        // The namespace itself closes when the field drops after this.
        debug!(path = %self.path.display(), "closing namespace");
    }
}

/// Owns a read-write transaction; dropping it without commit aborts
pub struct TxnGuard<'ns, N>
where
    N: Namespace + 'ns,
{
    txn: Option<N::Txn<'ns>>,
}

impl<'ns, N> TxnGuard<'ns, N>
where
    N: Namespace + 'ns,
{
    fn begin(namespace: &'ns N) -> Result<Self> {
        let txn = namespace
            .begin_rw_txn()
            .map_err(|e| VellumError::engine(EngineOp::BeginTxn, e))?;
        debug!("transaction started");
        Ok(Self { txn: Some(txn) })
    }

    fn txn(&self) -> Result<&N::Txn<'ns>> {
        self.txn
            .as_ref()
            .ok_or_else(|| VellumError::InvalidState("Transaction already finished".into()))
    }

    fn txn_mut(&mut self) -> Result<&mut N::Txn<'ns>> {
        self.txn
            .as_mut()
            .ok_or_else(|| VellumError::InvalidState("Transaction already finished".into()))
    }

    fn commit(mut self) -> Result<()> {
        let txn = self
            .txn
            .take()
            .ok_or_else(|| VellumError::InvalidState("Transaction already finished".into()))?;
        txn.commit()
            .map_err(|e| VellumError::engine(EngineOp::Commit, e))?;
        info!("transaction committed");
        Ok(())
    }
}

impl<'ns, N> Drop for TxnGuard<'ns, N>
where
    N: Namespace + 'ns,
{
    fn drop(&mut self) {
        if let Some(txn) = self.txn.take() {
            debug!("aborting transaction");
            txn.abort();
        }
    }
}

/// Owns a table handle; dropping it closes the handle
pub struct TableGuard<'ns, N>
where
    N: Namespace + 'ns,
{
    namespace: &'ns N,
    table: N::Table,
}

impl<'ns, N> TableGuard<'ns, N>
where
    N: Namespace + 'ns,
{
    fn open(namespace: &'ns N, txn: &TxnGuard<'ns, N>) -> Result<Self> {
        let table = txn
            .txn()?
            .open_table(None)
            .map_err(|e| VellumError::engine(EngineOp::OpenTable, e))?;
        debug!(?table, "default table opened");
        Ok(Self { namespace, table })
    }
}

impl<'ns, N> Drop for TableGuard<'ns, N>
where
    N: Namespace + 'ns,
{
    fn drop(&mut self) {
        debug!(table = ?self.table, "closing table");
        self.namespace.close_table(self.table);
    }
}

/// An open transaction on the default table
///
/// Field order is release order: the transaction ends before the table
/// handle is closed.
pub struct Session<'ns, N>
where
    N: Namespace + 'ns,
{
    txn: TxnGuard<'ns, N>,
    table: TableGuard<'ns, N>,
}

impl<'ns, N> Session<'ns, N>
where
    N: Namespace + 'ns,
{
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.txn
            .txn()?
            .get(self.table.table, key)
            .map_err(|e| VellumError::engine(EngineOp::Get, e))
    }

    pub fn put(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let table = self.table.table;
        self.txn
            .txn_mut()?
            .put(table, key, value)
            .map_err(|e| VellumError::engine(EngineOp::Put, e))
    }

    /// Returns `false` when the key was absent
    pub fn del(&mut self, key: &[u8]) -> Result<bool> {
        let table = self.table.table;
        self.txn
            .txn_mut()?
            .del(table, key)
            .map_err(|e| VellumError::engine(EngineOp::Del, e))
    }

    /// Commit the transaction, then release the table handle
    pub fn commit(self) -> Result<()> {
        let Session { txn, table } = self;
        let committed = txn.commit();
        drop(table);
        committed
    }
}

/// Run one command against the namespace described by `config`.
///
/// Commands that need no transaction return without opening anything.
/// Otherwise the namespace, transaction and default table are acquired, the
/// command executes, and the transaction commits only if the outcome asks
/// for it. Every path out of this function releases what was acquired.
pub fn run<E: Engine>(engine: &E, config: &NamespaceConfig, command: &Command) -> Result<Outcome> {
    match command {
        Command::Help => return Ok(Outcome::Help),
        Command::Unknown(name) => return Err(VellumError::UnknownOperation(name.clone())),
        _ => {}
    }

    let namespace = NamespaceGuard::open(engine, config)?;
    let mut session = namespace.begin()?;

    let outcome = executor::execute(&mut session, command, &namespace.geometry())?;
    if outcome.requires_commit() {
        session.commit()?;
    }

    Ok(outcome)
}
