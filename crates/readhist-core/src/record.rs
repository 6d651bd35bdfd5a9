//! Read-history records
//!
//! A [`ReadRecord`] describes one observed read: which block was read,
//! where in the code the read originated, and which task asked for it.
//! Records are immutable once inserted into a buffer; text fields are
//! stored inline with fixed capacity so every record has the same size.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Maximum bytes kept from an origin tag
pub const ORIGIN_WIDTH: usize = 24;

/// Maximum bytes kept from a task name
pub const TASK_WIDTH: usize = 16;

/// Fixed-capacity inline string, truncated at construction
///
/// Truncation is byte-bounded but never splits a UTF-8 character, so
/// `as_str` is always valid. Capacity is part of the type; records built
/// from these never allocate for their text fields.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagStr<const N: usize> {
    buf: [u8; N],
    len: u8,
}

impl<const N: usize> TagStr<N> {
    /// Build from a string slice, keeping at most `N` bytes
    pub fn new(s: &str) -> Self {
        let mut end = s.len().min(N);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        let mut buf = [0u8; N];
        buf[..end].copy_from_slice(&s.as_bytes()[..end]);
        Self { buf, len: end as u8 }
    }

    /// The stored text
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..usize::from(self.len)]).unwrap_or("")
    }

    /// Stored length in bytes
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<const N: usize> Default for TagStr<N> {
    fn default() -> Self {
        Self::new("")
    }
}

impl<const N: usize> From<&str> for TagStr<N> {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<const N: usize> fmt::Debug for TagStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagStr({:?})", self.as_str())
    }
}

impl<const N: usize> fmt::Display for TagStr<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Characteristics of a read, as reported by the caller
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ReadFlags(u32);

impl ReadFlags {
    /// No flags set
    pub const NONE: Self = Self(0);
    /// Read was served from the block cache
    pub const CACHED: Self = Self(1 << 0);
    /// Read was issued by speculative readahead
    pub const PREFETCH: Self = Self(1 << 1);
    /// Read targeted metadata rather than user data
    pub const METADATA: Self = Self(1 << 2);

    /// Raw bit representation
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reconstruct from raw bits
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// True if every bit of `other` is set in `self`
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for ReadFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ReadFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for ReadFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReadFlags(0x{:x})", self.0)
    }
}

impl fmt::LowerHex for ReadFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// One observed read against a pool
///
/// Constructed by the recorder from caller-supplied block coordinates plus
/// environment-derived identity (capture time, requesting task). The uid is
/// assigned by the buffer at insertion; records are never mutated after
/// that point, only evicted.
#[derive(Clone, Debug)]
pub struct ReadRecord {
    /// Unique within the owning buffer's lifetime, strictly increasing
    pub uid: u64,
    /// Monotonic capture time, nanoseconds
    pub start_ns: u64,
    /// Objset the read targeted
    pub objset: u64,
    /// Object number within the objset
    pub object: u64,
    /// Indirection level of the block
    pub level: u64,
    /// Block id within the object
    pub blkid: u64,
    /// Code path the read originated from
    pub origin: TagStr<ORIGIN_WIDTH>,
    /// Read characteristics
    pub flags: ReadFlags,
    /// Process id of the requesting task
    pub pid: u32,
    /// Name of the requesting task
    pub task: TagStr<TASK_WIDTH>,
}

impl ReadRecord {
    /// In-memory width of one record, used to report export byte sizes
    pub const WIDTH: usize = std::mem::size_of::<Self>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagstr_short_input() {
        let tag: TagStr<24> = TagStr::new("open_ctx");
        assert_eq!(tag.as_str(), "open_ctx");
        assert_eq!(tag.len(), 8);
        assert!(!tag.is_empty());
    }

    #[test]
    fn test_tagstr_truncates_to_capacity() {
        let tag: TagStr<8> = TagStr::new("a_rather_long_origin_tag");
        assert_eq!(tag.as_str(), "a_rather");
        assert_eq!(tag.len(), 8);
    }

    #[test]
    fn test_tagstr_truncates_at_char_boundary() {
        // "éé" is 4 bytes; a 3-byte capacity must not split the second char
        let tag: TagStr<3> = TagStr::new("éé");
        assert_eq!(tag.as_str(), "é");
        assert_eq!(tag.len(), 2);
    }

    #[test]
    fn test_tagstr_empty() {
        let tag: TagStr<16> = TagStr::default();
        assert!(tag.is_empty());
        assert_eq!(tag.as_str(), "");
    }

    #[test]
    fn test_flags_contains() {
        let flags = ReadFlags::CACHED | ReadFlags::PREFETCH;
        assert!(flags.contains(ReadFlags::CACHED));
        assert!(flags.contains(ReadFlags::PREFETCH));
        assert!(!flags.contains(ReadFlags::METADATA));
        assert!(!ReadFlags::NONE.contains(ReadFlags::CACHED));
    }

    #[test]
    fn test_flags_bits_roundtrip() {
        let flags = ReadFlags::CACHED | ReadFlags::METADATA;
        assert_eq!(ReadFlags::from_bits(flags.bits()), flags);
        assert!(ReadFlags::NONE.is_empty());
        assert!(!flags.is_empty());
    }

    #[test]
    fn test_flags_hex_render() {
        let flags = ReadFlags::CACHED | ReadFlags::PREFETCH;
        assert_eq!(format!("0x{flags:x}"), "0x3");
    }
}
