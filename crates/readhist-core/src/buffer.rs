//! Bounded history buffer
//!
//! Ordered collection of [`ReadRecord`], newest first, with uid assignment
//! and oldest-entry eviction. The buffer itself is plain data; its owner
//! holds it behind a single exclusive lock that covers insertion, eviction,
//! iteration, and clearing.

use crate::error::{Error, Result};
use crate::record::ReadRecord;
use std::collections::VecDeque;

/// Bounded, ordered sequence of read records
///
/// Capacity is a live knob: lowering it does not evict retroactively, the
/// buffer trims down on the next insertion (or an explicit [`clear_all`]).
/// Uids are assigned from a monotonic counter that survives eviction and
/// clearing, so a record's uid is unique for the buffer's whole lifetime.
///
/// [`clear_all`]: HistoryBuffer::clear_all
#[derive(Debug)]
pub struct HistoryBuffer {
    /// Records, most recent at the front
    records: VecDeque<ReadRecord>,
    /// Maximum records retained after an insertion completes
    capacity: usize,
    /// Next uid to assign; never reused, never reset
    next_uid: u64,
}

impl HistoryBuffer {
    /// Create an empty buffer with the given capacity
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
            next_uid: 0,
        }
    }

    /// Insert a record at the most-recent position and return its uid
    ///
    /// The record's uid field is overwritten with the next counter value.
    /// After the push, the oldest records are evicted until the buffer is
    /// back within capacity; with capacity 0 the record is evicted again
    /// immediately. Fails only if the record slot cannot be allocated, in
    /// which case the buffer is left untouched.
    pub fn insert(&mut self, mut record: ReadRecord) -> Result<u64> {
        self.records
            .try_reserve(1)
            .map_err(|_| Error::AllocationFailed)?;

        let uid = self.next_uid;
        self.next_uid += 1;
        record.uid = uid;
        self.records.push_front(record);

        while self.records.len() > self.capacity {
            self.records.pop_back();
        }

        Ok(uid)
    }

    /// Remove every record; the uid counter keeps its value
    pub fn clear_all(&mut self) {
        self.records.clear();
    }

    /// Iterate newest to oldest
    pub fn iter(&self) -> impl Iterator<Item = &ReadRecord> {
        self.records.iter()
    }

    /// Record at `index`, counted from the newest (0)
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ReadRecord> {
        self.records.get(index)
    }

    /// Number of records currently held
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current capacity limit
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity limit without evicting
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }
}
