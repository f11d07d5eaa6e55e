//! Page-size dependent size limits of the storage engine.
//!
//! Everything here is pure arithmetic over the engine geometry: no namespace
//! or transaction is needed to answer "how large can a write transaction or
//! a database grow at page size P".

use std::fmt;

const MIN_PAGE_SIZE: usize = 256;
const MAX_PAGE_SIZE: usize = 65536;
const DEFAULT_PAGE_SIZE: usize = 4096;

/// Largest addressable page number
const MAX_PAGENO: u64 = 0x7FFF_FFFF;

#[cfg(target_pointer_width = "64")]
const MAX_MAP_SIZE: u64 = (MAX_PAGENO + 1) * MAX_PAGE_SIZE as u64;
#[cfg(not(target_pointer_width = "64"))]
const MAX_MAP_SIZE: u64 = 0x7F00_0000;

/// Dirty page list headroom divisor
const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// A page size accepted by the engine: a power of two within the geometry bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageSize(usize);

impl PageSize {
    pub fn bytes(&self) -> usize {
        self.0
    }

    pub fn kib(&self) -> usize {
        self.0 / 1024
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size limits at one page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    pub page_size: PageSize,
    pub max_txn_bytes: u64,
    pub max_db_bytes: u64,
}

impl PageLimits {
    pub fn max_txn_pages(&self) -> u64 {
        self.max_txn_bytes / self.page_size.bytes() as u64
    }

    pub fn max_db_pages(&self) -> u64 {
        self.max_db_bytes / self.page_size.bytes() as u64
    }
}

/// Page geometry of the storage engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    min_page_size: usize,
    max_page_size: usize,
    default_page_size: usize,
    max_pageno: u64,
    max_map_size: u64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::native()
    }
}

impl Geometry {
    /// Geometry for the host's address width
    pub const fn native() -> Self {
        Self {
            min_page_size: MIN_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_pageno: MAX_PAGENO,
            max_map_size: MAX_MAP_SIZE,
        }
    }

    /// Geometry of an engine whose page size is fixed when the environment
    /// is created
    pub const fn fixed_page_size(bytes: usize) -> Self {
        Self {
            min_page_size: bytes,
            max_page_size: bytes,
            default_page_size: bytes,
            ..Self::native()
        }
    }

    /// Validate a page size against this geometry
    pub fn page_size(&self, bytes: usize) -> Option<PageSize> {
        if bytes.is_power_of_two() && (self.min_page_size..=self.max_page_size).contains(&bytes) {
            Some(PageSize(bytes))
        } else {
            None
        }
    }

    pub fn min_page_size(&self) -> PageSize {
        PageSize(self.min_page_size)
    }

    pub fn max_page_size(&self) -> PageSize {
        PageSize(self.max_page_size)
    }

    pub fn default_page_size(&self) -> PageSize {
        PageSize(self.default_page_size)
    }

    fn resolve(&self, page_size: Option<PageSize>) -> PageSize {
        page_size.unwrap_or_else(|| self.default_page_size())
    }

    /// Largest write transaction in bytes; `None` selects the default page size
    pub fn max_txn_size(&self, page_size: Option<PageSize>) -> u64 {
        let page_size = self.resolve(page_size).bytes() as u64;
        let page_list_limit = page_size * (self.max_pageno as f64 / GOLDEN_RATIO) as u64;
        let map_limit = (self.max_map_size as f64 / GOLDEN_RATIO) as u64;
        page_list_limit.min(map_limit)
    }

    /// Largest database in bytes; `None` selects the default page size
    pub fn max_db_size(&self, page_size: Option<PageSize>) -> u64 {
        let page_size = self.resolve(page_size).bytes() as u64;
        ((self.max_pageno + 1) * page_size).min(self.max_map_size)
    }

    pub fn limits(&self, page_size: Option<PageSize>) -> PageLimits {
        PageLimits {
            page_size: self.resolve(page_size),
            max_txn_bytes: self.max_txn_size(page_size),
            max_db_bytes: self.max_db_size(page_size),
        }
    }
}

/// Unit used to present byte counts to operators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    pub factor: f64,
    pub unit: &'static str,
}

impl Scale {
    pub const TEBIBYTES: Scale = Scale {
        factor: 1_099_511_627_776.0,
        unit: "TiB",
    };

    pub const GIBIBYTES: Scale = Scale {
        factor: 1_073_741_824.0,
        unit: "GiB",
    };

    /// TiB when addresses exceed 32 bits, GiB otherwise
    pub const fn native() -> Self {
        NATIVE_SCALE
    }

    pub fn apply(&self, bytes: u64) -> f64 {
        bytes as f64 / self.factor
    }
}

#[cfg(target_pointer_width = "64")]
const NATIVE_SCALE: Scale = Scale::TEBIBYTES;
#[cfg(not(target_pointer_width = "64"))]
const NATIVE_SCALE: Scale = Scale::GIBIBYTES;

/// One row of the capacity report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityLine {
    /// Ceiling in pages at the minimum page size
    pub pages: u64,
    /// Ceiling at the default page size, scaled
    pub at_default: f64,
    /// Ceiling at the maximum page size, scaled
    pub at_max: f64,
}

/// Transaction and database size ceilings for operator-facing sizing guidance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityReport {
    pub txn: CapacityLine,
    pub db: CapacityLine,
    pub default_page_size: PageSize,
    pub max_page_size: PageSize,
    pub scale: Scale,
}

impl CapacityReport {
    pub fn compute(geometry: &Geometry, scale: Scale) -> Self {
        let min = geometry.limits(Some(geometry.min_page_size()));
        let default = geometry.limits(None);
        let max = geometry.limits(Some(geometry.max_page_size()));

        Self {
            txn: CapacityLine {
                pages: min.max_txn_pages(),
                at_default: scale.apply(default.max_txn_bytes),
                at_max: scale.apply(max.max_txn_bytes),
            },
            db: CapacityLine {
                pages: min.max_db_pages(),
                at_default: scale.apply(default.max_db_bytes),
                at_max: scale.apply(max.max_db_bytes),
            },
            default_page_size: default.page_size,
            max_page_size: max.page_size,
            scale,
        }
    }
}

impl fmt::Display for CapacityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.scale.unit;
        writeln!(
            f,
            "\tWrite transaction size: up to {} (0x{:X}) pages ({:.6} {} for default {}K pagesize, {:.6} {} for {}K pagesize).",
            self.txn.pages,
            self.txn.pages,
            self.txn.at_default,
            unit,
            self.default_page_size.kib(),
            self.txn.at_max,
            unit,
            self.max_page_size.kib(),
        )?;
        write!(
            f,
            "\tDatabase size: up to {} pages ({:.6} {} for default {}K pagesize, {:.6} {} for {}K pagesize).",
            self.db.pages,
            self.db.at_default,
            unit,
            self.default_page_size.kib(),
            self.db.at_max,
            unit,
            self.max_page_size.kib(),
        )
    }
}
