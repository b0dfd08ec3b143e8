//! Template bytecode: one flat little-endian buffer.
//!
//! Section order: Header → Instructions → StringBytes → TagOpens → Texts →
//! StaticAttrs → DynTexts → StaticDynAttrs → DynStaticAttrs → DynDynAttrs →
//! DynEvents → DynAttrValuePartRefs → DynAttrValueParts

mod constants;
mod dump;
mod header;
mod ids;
mod instructions;
mod module;
mod segments;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod instructions_tests;
#[cfg(test)]
mod module_tests;

pub use constants::{
    HEADER_FIELDS, HEADER_SIZE, INSTRUCTION_SIZE, MAX_PAYLOAD_INDEX, SEGMENT_ENTRY_SIZE,
    TABLE_ALIGN,
};
pub use dump::dump;
pub use header::{Header, SectionOffsets, align_up};
pub use ids::PayloadIndex;
pub use instructions::{Instr, Opcode, Table};
pub use module::{Module, ModuleError, Op, Segment, StringsView, TableView};
pub use segments::{SegmentKind, SegmentRef, encode_parts_entry, parts_entry_size};
