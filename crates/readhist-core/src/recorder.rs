//! Per-pool read recording
//!
//! One [`Recorder`] is owned by each storage pool. The read path hands it
//! an event per read; the recorder applies the sampling policy, stamps the
//! event with capture time and task identity, and inserts it into the
//! pool's history buffer under the buffer lock. Recording never fails from
//! the caller's point of view: a dropped event is logged at debug level
//! and forgotten.

use crate::buffer::HistoryBuffer;
use crate::policy::HistoryPolicy;
use crate::pool::PoolIdent;
use crate::record::{ReadFlags, ReadRecord, TagStr};
use crate::snapshot::Snapshot;
use crate::task;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Caller-supplied description of one read
#[derive(Clone, Copy, Debug)]
pub struct ReadEvent<'a> {
    /// Objset the read targeted
    pub objset: u64,
    /// Object number within the objset
    pub object: u64,
    /// Indirection level of the block
    pub level: u64,
    /// Block id within the object
    pub blkid: u64,
    /// Code path the read originated from
    pub origin: &'a str,
    /// Read characteristics
    pub flags: ReadFlags,
}

/// Records recent reads for one pool
///
/// A single exclusive lock guards the buffer for insertion, eviction,
/// read sessions, and clearing. The policy checks in [`record`] run before
/// the lock is touched, so a fully disabled history costs two relaxed
/// atomic loads per read.
///
/// [`record`]: Recorder::record
#[derive(Debug)]
pub struct Recorder {
    pool: PoolIdent,
    policy: Arc<HistoryPolicy>,
    buffer: Mutex<HistoryBuffer>,
    /// Unlocked mirror of the buffer length, maintained under the lock.
    /// Read relaxed by the disabled-and-empty fast path; staleness under a
    /// racing policy update is acceptable.
    len_hint: AtomicUsize,
}

impl Recorder {
    /// Create the recorder for a pool with an empty buffer
    ///
    /// Capacity starts at the policy's current value; later policy changes
    /// are picked up per event. Registration of the diagnostic endpoint is
    /// the embedding layer's job.
    pub fn init(pool: PoolIdent, policy: Arc<HistoryPolicy>) -> Arc<Self> {
        let capacity = policy.capacity();
        debug!(pool = %pool, capacity, "read history initialized");
        Arc::new(Self {
            pool,
            policy,
            buffer: Mutex::new(HistoryBuffer::new(capacity)),
            len_hint: AtomicUsize::new(0),
        })
    }

    /// Record one read event, subject to the sampling policy
    ///
    /// Skips without taking the lock when history is disabled and there is
    /// nothing left to drain, and when the event is a cache hit while
    /// cache hits are excluded. Otherwise the event is inserted and the
    /// buffer trimmed to the capacity in effect right now.
    pub fn record(&self, event: &ReadEvent<'_>) {
        if self.policy.capacity() == 0 && self.len_hint.load(Ordering::Relaxed) == 0 {
            return;
        }

        if !self.policy.include_cache_hits() && event.flags.contains(ReadFlags::CACHED) {
            return;
        }

        let record = ReadRecord {
            uid: 0,
            start_ns: task::now_ns(),
            objset: event.objset,
            object: event.object,
            level: event.level,
            blkid: event.blkid,
            origin: TagStr::new(event.origin),
            flags: event.flags,
            pid: task::current_pid(),
            task: TagStr::new(&task::current_task_name()),
        };

        let mut buffer = self.buffer.lock();
        buffer.set_capacity(self.policy.capacity());
        if buffer.insert(record).is_err() {
            debug!(pool = %self.pool, "read history record dropped: allocation failed");
        }
        self.len_hint.store(buffer.len(), Ordering::Relaxed);
    }

    /// Start a read session over the current records, newest first
    ///
    /// The returned snapshot holds the buffer lock until dropped; no
    /// structural mutation can interleave with the session.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::new(self.buffer.lock())
    }

    /// Discard every record now; the uid counter is preserved
    pub fn clear(&self) {
        let mut buffer = self.buffer.lock();
        buffer.clear_all();
        self.len_hint.store(0, Ordering::Relaxed);
    }

    /// Drain the buffer at pool teardown
    ///
    /// Safe to call with an already empty buffer. Callers unregister the
    /// diagnostic endpoint first so no new read session can start; the
    /// lock itself is released when the last owner drops.
    pub fn destroy(&self) {
        let drained = {
            let mut buffer = self.buffer.lock();
            let drained = buffer.len();
            buffer.clear_all();
            drained
        };
        self.len_hint.store(0, Ordering::Relaxed);
        debug!(pool = %self.pool, drained, "read history destroyed");
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identity of the owning pool
    pub fn pool(&self) -> &PoolIdent {
        &self.pool
    }

    /// The policy this recorder samples under
    pub fn policy(&self) -> &HistoryPolicy {
        &self.policy
    }
}
