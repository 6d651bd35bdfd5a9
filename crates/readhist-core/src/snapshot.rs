//! Read sessions
//!
//! A [`Snapshot`] is the sequential read-out protocol used by the
//! diagnostic export: position at the newest record, step toward the
//! oldest, then report exhaustion. The snapshot holds the buffer's
//! exclusive lock for its whole lifetime, so a session observes a frozen
//! buffer and its duration is bounded by the buffer size.

use crate::buffer::HistoryBuffer;
use crate::record::ReadRecord;
use parking_lot::MutexGuard;

/// One sequential read session over a history buffer
///
/// Created by [`Recorder::snapshot`]; dropping it releases the lock.
///
/// [`Recorder::snapshot`]: crate::recorder::Recorder::snapshot
#[derive(Debug)]
pub struct Snapshot<'a> {
    guard: MutexGuard<'a, HistoryBuffer>,
    /// Next position to yield, counted from the newest record
    pos: usize,
}

impl<'a> Snapshot<'a> {
    pub(crate) fn new(guard: MutexGuard<'a, HistoryBuffer>) -> Self {
        Self { guard, pos: 0 }
    }

    /// Yield the record at the cursor and advance toward the oldest
    ///
    /// Returns `None` once the session has passed the oldest record, and
    /// keeps returning `None` from then on.
    pub fn next_record(&mut self) -> Option<&ReadRecord> {
        let pos = self.pos;
        if pos >= self.guard.len() {
            return None;
        }
        self.pos += 1;
        self.guard.get(pos)
    }

    /// Records in the buffer under this session's lock
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.guard.len()
    }

    /// Records the session has not yielded yet
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.guard.len().saturating_sub(self.pos)
    }

    /// True once every record has been yielded
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
