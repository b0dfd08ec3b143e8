//! Attribute-value-parts sub-block codec.
//!
//! Each entry: name StringRef, u32 segment count, then per segment a u32
//! kind tag followed by a StringRef into the main string table. Entries
//! are packed back to back without padding.

use snap_core::StringRef;

use super::constants::SEGMENT_ENTRY_SIZE;
use super::module::ModuleError;

/// Segment kind tag as written to the sub-block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum SegmentKind {
    Static = 0,
    Dynamic = 1,
}

impl SegmentKind {
    pub fn from_u32(v: u32) -> Option<Self> {
        match v {
            0 => Some(Self::Static),
            1 => Some(Self::Dynamic),
            _ => None,
        }
    }
}

/// A segment whose text has been interned.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SegmentRef {
    pub kind: SegmentKind,
    pub value: StringRef,
}

/// Bytes needed for an entry with `segments` segments.
#[inline]
pub fn parts_entry_size(segments: usize) -> usize {
    StringRef::SIZE + 4 + segments * SEGMENT_ENTRY_SIZE
}

/// Append one entry to `out`.
///
/// The caller guarantees `segments.len()` fits in u32; the emitter caps
/// segment counts long before that.
pub fn encode_parts_entry(name: StringRef, segments: &[SegmentRef], out: &mut Vec<u8>) {
    out.reserve(parts_entry_size(segments.len()));
    name.write_to(out);
    out.extend_from_slice(&(segments.len() as u32).to_le_bytes());
    for segment in segments {
        out.extend_from_slice(&(segment.kind as u32).to_le_bytes());
        segment.value.write_to(out);
    }
}

/// Decode the single entry that spans exactly `bytes`.
pub(crate) fn decode_parts_entry(
    bytes: &[u8],
) -> Result<(StringRef, Vec<SegmentRef>), ModuleError> {
    let mut cursor = Cursor { bytes, pos: 0 };

    let name = cursor.string_ref()?;
    let count = cursor.u32()? as usize;
    if bytes.len() != parts_entry_size(count) {
        return Err(ModuleError::MalformedParts {
            expected: parts_entry_size(count),
            actual: bytes.len(),
        });
    }

    let mut segments = Vec::with_capacity(count);
    for _ in 0..count {
        let tag = cursor.u32()?;
        let kind = SegmentKind::from_u32(tag).ok_or(ModuleError::UnknownSegmentKind(tag))?;
        let value = cursor.string_ref()?;
        segments.push(SegmentRef { kind, value });
    }

    Ok((name, segments))
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N], ModuleError> {
        let chunk = self
            .bytes
            .get(self.pos..self.pos + N)
            .ok_or(ModuleError::MalformedParts {
                expected: self.pos + N,
                actual: self.bytes.len(),
            })?;
        self.pos += N;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        Ok(out)
    }

    fn u32(&mut self) -> Result<u32, ModuleError> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    fn string_ref(&mut self) -> Result<StringRef, ModuleError> {
        self.take::<8>().map(StringRef::from_bytes)
    }
}
