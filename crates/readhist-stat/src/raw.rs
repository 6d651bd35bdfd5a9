//! Raw stat source protocol
//!
//! A raw stat source exports a table of text rows through a virtual
//! statistics file. The transport (procfs-style file, HTTP handler, a CLI
//! dump) frames the bytes; the source only answers the protocol below.
//! Reading is a single exclusive session per call; writing to the file
//! means "discard everything now".

/// Protocol between the stat registry and one exported table
pub trait RawStatSource: Send + Sync {
    /// Header row, including the trailing newline
    fn headers(&self) -> String;

    /// Stream every current row to `emit`, newest first
    ///
    /// The whole traversal runs as one exclusive session over the source's
    /// own lock; rows from concurrent mutation never interleave.
    fn for_each_row(&self, emit: &mut dyn FnMut(&str));

    /// Handle a write request: discard all buffered entries
    fn reset(&self);

    /// Current number of entries
    ///
    /// Recomputed on every interaction; transports use it together with
    /// [`byte_size`](RawStatSource::byte_size) to size transfer buffers.
    fn entry_count(&self) -> usize;

    /// Current payload size in bytes (entries times fixed record width)
    fn byte_size(&self) -> usize;
}
