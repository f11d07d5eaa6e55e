//! In-memory engine that records every acquire and release.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::config::NamespaceConfig;
use crate::traits::{Engine, EngineError, EngineResult, Namespace, Txn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    OpenNamespace,
    BeginTxn,
    OpenTable,
    Commit,
    Abort,
    CloseTable,
    CloseNamespace,
}

/// Engine call that the fake should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Open,
    Begin,
    OpenTable,
    Get,
    Put,
    Del,
    Commit,
}

type Store = Rc<RefCell<BTreeMap<Vec<u8>, Vec<u8>>>>;
type Log = Rc<RefCell<Vec<Event>>>;

#[derive(Default)]
pub struct FakeEngine {
    log: Log,
    data: Store,
    fail_at: Option<FailAt>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(fail_at: FailAt) -> Self {
        Self {
            fail_at: Some(fail_at),
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub fn clear_events(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn value(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.data.borrow().get(key).cloned()
    }
}

fn injected(code: i32) -> EngineError {
    EngineError::new(code, "injected failure")
}

impl Engine for FakeEngine {
    type Namespace = FakeNamespace;

    fn open_namespace(&self, _config: &NamespaceConfig) -> EngineResult<FakeNamespace> {
        if self.fail_at == Some(FailAt::Open) {
            return Err(injected(13));
        }
        self.log.borrow_mut().push(Event::OpenNamespace);
        Ok(FakeNamespace {
            log: self.log.clone(),
            data: self.data.clone(),
            fail_at: self.fail_at,
        })
    }
}

pub struct FakeNamespace {
    log: Log,
    data: Store,
    fail_at: Option<FailAt>,
}

impl FakeNamespace {
    fn record(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }

    fn fails(&self, at: FailAt) -> bool {
        self.fail_at == Some(at)
    }
}

impl Drop for FakeNamespace {
    fn drop(&mut self) {
        self.record(Event::CloseNamespace);
    }
}

impl Namespace for FakeNamespace {
    type Table = u32;
    type Txn<'ns> = FakeTxn<'ns>
    where
        Self: 'ns;

    fn begin_rw_txn(&self) -> EngineResult<FakeTxn<'_>> {
        if self.fails(FailAt::Begin) {
            return Err(injected(11));
        }
        self.record(Event::BeginTxn);
        Ok(FakeTxn {
            namespace: self,
            pending: BTreeMap::new(),
        })
    }

    fn close_table(&self, _table: u32) {
        self.record(Event::CloseTable);
    }
}

pub struct FakeTxn<'ns> {
    namespace: &'ns FakeNamespace,
    pending: BTreeMap<Vec<u8>, Option<Vec<u8>>>,
}

impl<'ns> Txn for FakeTxn<'ns> {
    type Table = u32;

    fn open_table(&self, _name: Option<&str>) -> EngineResult<u32> {
        if self.namespace.fails(FailAt::OpenTable) {
            return Err(injected(22));
        }
        self.namespace.record(Event::OpenTable);
        Ok(1)
    }

    fn get(&self, _table: u32, key: &[u8]) -> EngineResult<Option<Vec<u8>>> {
        if self.namespace.fails(FailAt::Get) {
            return Err(injected(5));
        }
        match self.pending.get(key) {
            Some(value) => Ok(value.clone()),
            None => Ok(self.namespace.data.borrow().get(key).cloned()),
        }
    }

    fn put(&mut self, _table: u32, key: &[u8], value: &[u8]) -> EngineResult<()> {
        if self.namespace.fails(FailAt::Put) {
            return Err(injected(28));
        }
        self.pending.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn del(&mut self, table: u32, key: &[u8]) -> EngineResult<bool> {
        if self.namespace.fails(FailAt::Del) {
            return Err(injected(5));
        }
        if self.get(table, key)?.is_none() {
            return Ok(false);
        }
        self.pending.insert(key.to_vec(), None);
        Ok(true)
    }

    fn commit(self) -> EngineResult<()> {
        if self.namespace.fails(FailAt::Commit) {
            return Err(injected(28));
        }
        let mut data = self.namespace.data.borrow_mut();
        for (key, value) in self.pending {
            match value {
                Some(value) => data.insert(key, value),
                None => data.remove(&key),
            };
        }
        drop(data);
        self.namespace.record(Event::Commit);
        Ok(())
    }

    fn abort(self) {
        self.namespace.record(Event::Abort);
    }
}
