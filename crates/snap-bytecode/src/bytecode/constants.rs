//! Bytecode format constants.

/// Number of u32 length fields in the header.
pub const HEADER_FIELDS: usize = 12;

/// Header size in bytes.
pub const HEADER_SIZE: usize = HEADER_FIELDS * 4;

/// Every instruction is one little-endian u32.
pub const INSTRUCTION_SIZE: usize = 4;

/// Alignment of each StringRef table. The string bytes and the parts
/// sub-block are not aligned.
pub const TABLE_ALIGN: usize = 4;

/// Largest payload index that fits in the high 24 bits of an instruction.
pub const MAX_PAYLOAD_INDEX: u32 = 0x00FF_FFFF;

/// One segment in the parts sub-block: u32 kind tag + StringRef.
pub const SEGMENT_ENTRY_SIZE: usize = 4 + 8;
