//! Flat buffer writer.
//!
//! Offsets come from [`Header::compute_offsets`], the same routine the
//! reader uses, so writer and reader cannot disagree on layout.

use snap_bytecode::{Header, Instr, Table};
use snap_core::StringRef;

/// Everything the serializer reads. Nothing here is mutated.
pub(crate) struct Sections<'a> {
    pub header: Header,
    pub instructions: &'a [Instr],
    pub strings: &'a [u8],
    pub tables: &'a [Vec<StringRef>; 9],
    pub parts: &'a [u8],
}

/// Write header, instructions, string bytes, the nine tables and the
/// parts sub-block, all little-endian. Padding bytes are zero.
pub(crate) fn serialize(sections: &Sections<'_>) -> Vec<u8> {
    let offsets = sections.header.compute_offsets();
    let mut out = Vec::with_capacity(offsets.end as usize);

    out.extend_from_slice(&sections.header.to_bytes());
    for instr in sections.instructions {
        out.extend_from_slice(&instr.pack().to_le_bytes());
    }
    out.extend_from_slice(sections.strings);

    for table in Table::ALL {
        pad_to(&mut out, offsets.table(table));
        for r in &sections.tables[table as usize] {
            r.write_to(&mut out);
        }
    }

    debug_assert_eq!(out.len() as u64, offsets.parts);
    out.extend_from_slice(sections.parts);
    debug_assert_eq!(out.len() as u64, offsets.end);
    out
}

/// Zero-fill up to `offset`.
fn pad_to(buf: &mut Vec<u8>, offset: u64) {
    let offset = offset as usize;
    if buf.len() < offset {
        buf.resize(offset, 0);
    }
}
