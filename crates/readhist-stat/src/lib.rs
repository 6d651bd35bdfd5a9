//! ReadHist Stat - virtual statistics files for pool history
//!
//! This crate implements the diagnostic export side of ReadHist:
//! - The raw stat source protocol (header/rows/reset/sizing)
//! - A process-wide registry of named stat tables
//! - The read-history table adapter with its fixed-width row format
//! - Per-pool install/remove lifecycle
//!
//! The history core itself lives in `readhist-core` and stays free of any
//! transport concern.

pub mod pool;
pub mod raw;
pub mod reads;
pub mod registry;

// Re-exports
pub use pool::PoolStats;
pub use raw::RawStatSource;
pub use reads::{ReadHistoryStat, header_row, render_row, stat_path};
pub use registry::{Result, StatError, StatRegistry};
