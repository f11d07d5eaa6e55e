pub mod engine;

pub use engine::{Engine, EngineError, EngineResult, Namespace, Txn};
