pub mod namespace;

pub use namespace::{NamespaceConfig, NamespaceFlags};
