//! Reference into the shared string byte table.

use std::ops::Range;

/// An `(offset, length)` view into the interned string bytes.
///
/// Never owns bytes. A valid ref satisfies `offset + length <= table.len()`
/// for the table it was produced against.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct StringRef {
    pub offset: u32,
    pub length: u32,
}

impl StringRef {
    /// Encoded size: two little-endian u32 values.
    pub const SIZE: usize = 8;

    #[inline]
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    /// One past the last byte, widened so the sum cannot overflow.
    #[inline]
    pub fn end(self) -> u64 {
        self.offset as u64 + self.length as u64
    }

    /// Byte range into the table, or `None` if it falls outside `table_len`.
    pub fn range_within(self, table_len: usize) -> Option<Range<usize>> {
        if self.end() > table_len as u64 {
            return None;
        }
        let start = self.offset as usize;
        Some(start..start + self.length as usize)
    }

    /// Encode as `offset` then `length`, both little-endian.
    pub fn to_bytes(self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&self.offset.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.length.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self {
            offset: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            length: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    /// Append the encoded form to `out`.
    #[inline]
    pub fn write_to(self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.to_bytes());
    }
}
