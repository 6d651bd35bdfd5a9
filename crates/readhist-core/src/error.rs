//! Error types for the history core
//!
//! Recording is best-effort: the only failure mode is a failed record-slot
//! allocation, and it drops the event rather than propagating into the read
//! path being observed. Read-session exhaustion is expressed as iterator
//! termination, not an error.

use thiserror::Error;

/// Common result type for history operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of the history core
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("failed to allocate a history record slot")]
    AllocationFailed,
}
