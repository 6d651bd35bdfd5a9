//! Read-history stat table
//!
//! Exports a pool's read history as a fixed-width text table. Column order
//! and widths are kept stable for existing tooling: UID, start, objset
//! (hex), object, level, blkid, aflags (hex), origin, pid, process.

use crate::raw::RawStatSource;
use readhist_core::{PoolIdent, ReadRecord, Recorder};
use std::fmt::Write;
use std::sync::Arc;

/// Stat path for a pool's read-history table
#[must_use]
pub fn stat_path(pool: &PoolIdent) -> String {
    format!("pool/{}/reads", pool.name)
}

/// Header row for the read-history table
#[must_use]
pub fn header_row() -> String {
    format!(
        "{:<8} {:<16} {:<8} {:<8} {:<8} {:<8} {:<8} {:<24} {:<8} {:<16}\n",
        "UID", "start", "objset", "object", "level", "blkid", "aflags", "origin", "pid", "process",
    )
}

/// One record as a fixed-width table row
#[must_use]
pub fn render_row(record: &ReadRecord) -> String {
    let mut row = String::new();
    // infallible for String
    let _ = write!(
        row,
        "{:<8} {:<16} 0x{:<6x} {:<8} {:<8} {:<8} 0x{:<6x} {:<24} {:<8} {:<16}\n",
        record.uid,
        record.start_ns,
        record.objset,
        record.object,
        record.level,
        record.blkid,
        record.flags,
        record.origin,
        record.pid,
        record.task,
    );
    row
}

/// Binds a pool's recorder to the raw stat protocol
pub struct ReadHistoryStat {
    recorder: Arc<Recorder>,
}

impl ReadHistoryStat {
    #[must_use]
    pub fn new(recorder: Arc<Recorder>) -> Self {
        Self { recorder }
    }
}

impl RawStatSource for ReadHistoryStat {
    fn headers(&self) -> String {
        header_row()
    }

    fn for_each_row(&self, emit: &mut dyn FnMut(&str)) {
        let mut session = self.recorder.snapshot();
        while let Some(record) = session.next_record() {
            let row = render_row(record);
            emit(&row);
        }
    }

    fn reset(&self) {
        self.recorder.clear();
    }

    fn entry_count(&self) -> usize {
        self.recorder.len()
    }

    fn byte_size(&self) -> usize {
        self.recorder.len() * ReadRecord::WIDTH
    }
}
