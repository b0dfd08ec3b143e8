//! Global string interning for one compile.
//!
//! Every tag name, attribute name, literal value, field name and event name
//! goes through one [`Interner`]. Identical strings share storage, and bytes
//! are laid out in first-occurrence order so identical input always yields an
//! identical table.

use indexmap::IndexMap;

use crate::StringRef;

/// The string table would outgrow the u32 offsets used on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("string table overflow: {0} bytes (max 4294967295)")]
pub struct StringTableOverflow(pub usize);

/// Deduplicating string table.
///
/// Owns the flat UTF-8 byte table and a map from string value to the ref of
/// its first occurrence.
#[derive(Debug, Clone, Default)]
pub struct Interner {
    bytes: Vec<u8>,
    refs: IndexMap<Box<str>, StringRef>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning the ref of its first occurrence.
    ///
    /// A repeated string appends nothing.
    pub fn intern(&mut self, s: &str) -> Result<StringRef, StringTableOverflow> {
        if let Some(&r) = self.refs.get(s) {
            return Ok(r);
        }

        let new_len = self.bytes.len() + s.len();
        if new_len > u32::MAX as usize {
            return Err(StringTableOverflow(new_len));
        }

        let r = StringRef::new(self.bytes.len() as u32, s.len() as u32);
        self.bytes.extend_from_slice(s.as_bytes());
        self.refs.insert(s.into(), r);
        Ok(r)
    }

    /// Look up a string without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<StringRef> {
        self.refs.get(s).copied()
    }

    /// Resolve a ref produced by this interner.
    pub fn resolve(&self, r: StringRef) -> Option<&str> {
        let range = r.range_within(self.bytes.len())?;
        std::str::from_utf8(&self.bytes[range]).ok()
    }

    /// Number of distinct strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// Size of the byte table.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// The raw byte table.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Distinct strings with their refs, in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (StringRef, &str)> {
        self.refs.iter().map(|(s, &r)| (r, s.as_ref()))
    }
}
