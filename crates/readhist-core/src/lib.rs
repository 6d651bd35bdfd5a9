//! ReadHist Core - bounded per-pool read-history recording
//!
//! This crate implements the history core for ReadHist:
//! - Immutable read records with fixed-width text fields
//! - Bounded history buffer with oldest-entry eviction and uid assignment
//! - Per-pool recorder applying the live sampling policy
//! - Lock-holding read sessions for sequential export
//!
//! The diagnostic export transport (stat registry, row rendering) lives in
//! `readhist-stat`; this crate knows nothing about it.

pub mod buffer;
pub mod error;
pub mod policy;
pub mod pool;
pub mod record;
pub mod recorder;
pub mod snapshot;
pub mod task;

// Re-exports
pub use buffer::HistoryBuffer;
pub use error::{Error, Result};
pub use policy::{HistoryConfig, HistoryPolicy};
pub use pool::{PoolId, PoolIdent};
pub use record::{ORIGIN_WIDTH, ReadFlags, ReadRecord, TASK_WIDTH, TagStr};
pub use recorder::{ReadEvent, Recorder};
pub use snapshot::Snapshot;
