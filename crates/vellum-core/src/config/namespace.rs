use std::path::PathBuf;

/// Environment flags applied when the namespace is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamespaceFlags {
    /// The path names the data file itself rather than a directory (default: true)
    pub no_sub_dir: bool,

    /// Merge adjacent free pages when reclaiming (default: true)
    ///
    /// Engines without a coalescing switch ignore this flag.
    pub coalesce: bool,

    /// Reclaim free pages in LIFO order (default: true)
    ///
    /// Engines without a reclamation policy switch ignore this flag.
    pub lifo_reclaim: bool,
}

impl Default for NamespaceFlags {
    fn default() -> Self {
        Self {
            no_sub_dir: true,
            coalesce: true,
            lifo_reclaim: true,
        }
    }
}

/// Configuration for opening a namespace
#[derive(Debug, Clone)]
pub struct NamespaceConfig {
    /// Path to the namespace data file
    pub path: PathBuf,

    /// Environment flags
    pub flags: NamespaceFlags,

    /// Permission bits for newly created files
    /// Default: 0o664
    pub mode: u32,

    /// Maximum map size in bytes
    /// Default: engine default
    pub map_size: Option<usize>,

    /// Maximum number of concurrent readers
    /// Default: engine default
    pub max_readers: Option<u32>,
}

fn default_mode() -> u32 {
    0o664
}

impl NamespaceConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            flags: NamespaceFlags::default(),
            mode: default_mode(),
            map_size: None,
            max_readers: None,
        }
    }

    pub fn with_flags(mut self, flags: NamespaceFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = Some(map_size);
        self
    }

    pub fn with_max_readers(mut self, max_readers: u32) -> Self {
        self.max_readers = Some(max_readers);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = NamespaceConfig::new("db.dat");
        assert_eq!(cfg.path, PathBuf::from("db.dat"));
        assert_eq!(cfg.mode, 0o664);
        assert!(cfg.flags.no_sub_dir);
        assert!(cfg.flags.coalesce);
        assert!(cfg.flags.lifo_reclaim);
        assert_eq!(cfg.map_size, None);
        assert_eq!(cfg.max_readers, None);
    }

    #[test]
    fn test_builders() {
        let cfg = NamespaceConfig::new("db.dat")
            .with_map_size(1 << 20)
            .with_max_readers(8)
            .with_mode(0o600);
        assert_eq!(cfg.map_size, Some(1 << 20));
        assert_eq!(cfg.max_readers, Some(8));
        assert_eq!(cfg.mode, 0o600);
    }
}
