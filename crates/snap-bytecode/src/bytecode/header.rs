//! Buffer header: twelve little-endian u32 counts (48 bytes).
//!
//! The header stores counts only. Every section offset is derived from
//! them by [`Header::compute_offsets`], which both the serializer and the
//! reader use.

use super::constants::{HEADER_FIELDS, HEADER_SIZE, INSTRUCTION_SIZE, TABLE_ALIGN};
use super::instructions::Table;

/// Buffer header. Field order is the wire order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    pub instruction_count: u32,
    pub string_byte_count: u32,
    pub tag_open_count: u32,
    pub text_count: u32,
    pub static_attr_count: u32,
    pub dyn_text_count: u32,
    pub static_dyn_attr_count: u32,
    pub dyn_static_attr_count: u32,
    pub dyn_dyn_attr_count: u32,
    pub dyn_event_count: u32,
    pub dyn_attr_value_part_ref_count: u32,
    /// Size of the attribute-value-parts sub-block in bytes.
    pub parts_byte_count: u32,
}

/// Absolute byte offsets of every section, computed from header counts.
///
/// Order: Header → Instructions → StringBytes → nine StringRef tables →
/// DynAttrValueParts. Tables start on a 4-byte boundary; string bytes and
/// the parts sub-block do not.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionOffsets {
    pub instructions: u64,
    pub strings: u64,
    pub tables: [u64; 9],
    pub parts: u64,
    /// Total buffer length.
    pub end: u64,
}

impl SectionOffsets {
    pub fn table(&self, table: Table) -> u64 {
        self.tables[table as usize]
    }
}

impl Header {
    /// Decode the header from the first 48 bytes. Returns `None` when
    /// `bytes` is shorter than that.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let head = bytes.get(..HEADER_SIZE)?;
        let mut fields = [0u32; HEADER_FIELDS];
        for (field, chunk) in fields.iter_mut().zip(head.chunks_exact(4)) {
            *field = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Some(Self::from_fields(fields))
    }

    /// Encode the header to 48 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        for (chunk, field) in bytes.chunks_exact_mut(4).zip(self.fields()) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }
        bytes
    }

    /// Fields in wire order.
    pub fn fields(&self) -> [u32; HEADER_FIELDS] {
        [
            self.instruction_count,
            self.string_byte_count,
            self.tag_open_count,
            self.text_count,
            self.static_attr_count,
            self.dyn_text_count,
            self.static_dyn_attr_count,
            self.dyn_static_attr_count,
            self.dyn_dyn_attr_count,
            self.dyn_event_count,
            self.dyn_attr_value_part_ref_count,
            self.parts_byte_count,
        ]
    }

    fn from_fields(f: [u32; HEADER_FIELDS]) -> Self {
        Self {
            instruction_count: f[0],
            string_byte_count: f[1],
            tag_open_count: f[2],
            text_count: f[3],
            static_attr_count: f[4],
            dyn_text_count: f[5],
            static_dyn_attr_count: f[6],
            dyn_static_attr_count: f[7],
            dyn_dyn_attr_count: f[8],
            dyn_event_count: f[9],
            dyn_attr_value_part_ref_count: f[10],
            parts_byte_count: f[11],
        }
    }

    /// Entry count of one payload table.
    pub fn table_count(&self, table: Table) -> u32 {
        match table {
            Table::TagOpens => self.tag_open_count,
            Table::Texts => self.text_count,
            Table::StaticAttrs => self.static_attr_count,
            Table::DynTexts => self.dyn_text_count,
            Table::StaticDynAttrs => self.static_dyn_attr_count,
            Table::DynStaticAttrs => self.dyn_static_attr_count,
            Table::DynDynAttrs => self.dyn_dyn_attr_count,
            Table::DynEvents => self.dyn_event_count,
            Table::DynAttrValuePartRefs => self.dyn_attr_value_part_ref_count,
        }
    }

    pub fn set_table_count(&mut self, table: Table, count: u32) {
        let slot = match table {
            Table::TagOpens => &mut self.tag_open_count,
            Table::Texts => &mut self.text_count,
            Table::StaticAttrs => &mut self.static_attr_count,
            Table::DynTexts => &mut self.dyn_text_count,
            Table::StaticDynAttrs => &mut self.static_dyn_attr_count,
            Table::DynStaticAttrs => &mut self.dyn_static_attr_count,
            Table::DynDynAttrs => &mut self.dyn_dyn_attr_count,
            Table::DynEvents => &mut self.dyn_event_count,
            Table::DynAttrValuePartRefs => &mut self.dyn_attr_value_part_ref_count,
        };
        *slot = count;
    }

    /// Compute section offsets from counts.
    pub fn compute_offsets(&self) -> SectionOffsets {
        let align = TABLE_ALIGN as u64;

        let instructions = HEADER_SIZE as u64;
        let strings = instructions + self.instruction_count as u64 * INSTRUCTION_SIZE as u64;

        let mut cursor = strings + self.string_byte_count as u64;
        let mut tables = [0u64; 9];
        for table in Table::ALL {
            let start = align_up(cursor, align);
            tables[table as usize] = start;
            cursor = start + self.table_count(table) as u64 * table.entry_size() as u64;
        }

        let parts = cursor;
        let end = parts + self.parts_byte_count as u64;

        SectionOffsets {
            instructions,
            strings,
            tables,
            parts,
            end,
        }
    }
}

/// Round up to the next multiple of `align` (a power of two).
#[inline]
pub fn align_up(value: u64, align: u64) -> u64 {
    (value + align - 1) & !(align - 1)
}
