//! Binary template format for snap.
//!
//! This crate contains:
//! - Wire format definitions (opcodes, packed instructions, header, section layout)
//! - The attribute-value-parts sub-block codec
//! - A reference reader ([`Module`]) and a human-readable [`dump`]

pub mod bytecode;

pub use bytecode::{
    HEADER_FIELDS, HEADER_SIZE, Header, INSTRUCTION_SIZE, Instr, MAX_PAYLOAD_INDEX, Module,
    ModuleError, Op, Opcode, PayloadIndex, SEGMENT_ENTRY_SIZE, SectionOffsets, Segment,
    SegmentKind, SegmentRef, StringsView, TABLE_ALIGN, Table, TableView, align_up, dump,
    encode_parts_entry, parts_entry_size,
};
pub use snap_core::StringRef;
