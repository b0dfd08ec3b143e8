//! Bytecode index newtypes.

use super::constants::MAX_PAYLOAD_INDEX;

/// Index into an opcode's own payload table (24 bits on the wire).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PayloadIndex(u32);

impl PayloadIndex {
    pub const ZERO: Self = Self(0);

    /// Returns `None` when `index` does not fit in 24 bits.
    #[inline]
    pub fn new(index: usize) -> Option<Self> {
        if index > MAX_PAYLOAD_INDEX as usize {
            return None;
        }
        Some(Self(index as u32))
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_index_limit() {
        assert_eq!(PayloadIndex::new(0), Some(PayloadIndex::ZERO));
        assert_eq!(
            PayloadIndex::new(0xFF_FFFF).map(PayloadIndex::get),
            Some(0xFF_FFFF)
        );
        assert_eq!(PayloadIndex::new(0x100_0000), None);
    }
}
