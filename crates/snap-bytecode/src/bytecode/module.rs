//! Reference reader for compiled template buffers.
//!
//! [`Module`] validates the header against the buffer length once, then
//! serves typed views over each section. [`Module::decode`] resolves the
//! whole instruction stream into [`Op`]s with string arguments.

use std::io;
use std::path::Path;

use snap_core::StringRef;

use super::constants::{HEADER_SIZE, INSTRUCTION_SIZE};
use super::header::{Header, SectionOffsets};
use super::instructions::{Instr, Opcode, Table};
use super::segments::{SegmentKind, SegmentRef, decode_parts_entry};

/// Module load or decode error.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("buffer too small: {0} bytes (minimum {HEADER_SIZE})")]
    TooSmall(usize),
    #[error("size mismatch: header implies {expected} bytes, got {actual}")]
    SizeMismatch { expected: u64, actual: usize },
    #[error("instruction {index}: unknown opcode {opcode}")]
    UnknownOpcode { index: usize, opcode: u8 },
    #[error("instruction {index}: {opcode} payload {payload} out of range (table has {count})")]
    PayloadOutOfRange {
        index: usize,
        opcode: Opcode,
        payload: u32,
        count: u32,
    },
    #[error("string ref {offset}+{length} outside table of {table_len} bytes")]
    StringOutOfRange {
        offset: u32,
        length: u32,
        table_len: usize,
    },
    #[error("string ref {offset}+{length} is not valid UTF-8")]
    InvalidUtf8 { offset: u32, length: u32 },
    #[error("unknown segment kind {0}")]
    UnknownSegmentKind(u32),
    #[error("malformed parts entry: expected {expected} bytes, got {actual}")]
    MalformedParts { expected: usize, actual: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// One resolved attribute-value segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub value: &'a str,
}

/// A decoded instruction with its string arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op<'a> {
    TagOpen { tag: &'a str },
    TagClose,
    SelfClosing,
    Text { text: &'a str },
    StaticAttr { name: &'a str, value: &'a str },
    DynText { field: &'a str },
    StaticDynAttr { name: &'a str, field: &'a str },
    DynStaticAttr { field: &'a str, value: &'a str },
    DynDynAttr { name_field: &'a str, value_field: &'a str },
    Event { event: &'a str, handler: &'a str },
    AttrValueParts { name: &'a str, segments: Vec<Segment<'a>> },
}

impl Op<'_> {
    pub fn opcode(&self) -> Opcode {
        match self {
            Self::TagOpen { .. } => Opcode::StaticTagOpen,
            Self::TagClose => Opcode::StaticTagClose,
            Self::SelfClosing => Opcode::SelfClosingTag,
            Self::Text { .. } => Opcode::StaticText,
            Self::StaticAttr { .. } => Opcode::StaticAttribute,
            Self::DynText { .. } => Opcode::DynText,
            Self::StaticDynAttr { .. } => Opcode::StaticDynAttr,
            Self::DynStaticAttr { .. } => Opcode::DynStaticAttr,
            Self::DynDynAttr { .. } => Opcode::DynDynAttr,
            Self::Event { .. } => Opcode::DynEvent,
            Self::AttrValueParts { .. } => Opcode::DynAttrValueParts,
        }
    }
}

/// A compiled template buffer.
#[derive(Debug)]
pub struct Module {
    bytes: Vec<u8>,
    header: Header,
    /// Cached section offsets (computed from header counts).
    offsets: SectionOffsets,
}

impl Module {
    /// Load a module from owned bytes.
    ///
    /// The buffer length must equal the length implied by the header.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ModuleError> {
        let header = Header::from_bytes(&bytes).ok_or(ModuleError::TooSmall(bytes.len()))?;
        let offsets = header.compute_offsets();

        if offsets.end != bytes.len() as u64 {
            return Err(ModuleError::SizeMismatch {
                expected: offsets.end,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            bytes,
            header,
            offsets,
        })
    }

    /// Load a module from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModuleError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn offsets(&self) -> &SectionOffsets {
        &self.offsets
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw instruction words in stream order.
    pub fn instructions(&self) -> impl Iterator<Item = u32> + '_ {
        self.section(self.offsets.instructions, self.offsets.strings)
            .chunks_exact(INSTRUCTION_SIZE)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
    }

    /// The interned string bytes.
    pub fn strings(&self) -> StringsView<'_> {
        StringsView {
            bytes: self.section(
                self.offsets.strings,
                self.offsets.strings + self.header.string_byte_count as u64,
            ),
        }
    }

    /// One payload table.
    pub fn table(&self, table: Table) -> TableView<'_> {
        let start = self.offsets.table(table);
        let count = self.header.table_count(table);
        let end = start + count as u64 * table.entry_size() as u64;
        TableView {
            bytes: self.section(start, end),
            table,
            count,
        }
    }

    /// The attribute-value-parts sub-block.
    pub fn parts_bytes(&self) -> &[u8] {
        self.section(self.offsets.parts, self.offsets.end)
    }

    /// Decode the sub-block entry addressed by `entry` (a ref relative to
    /// the start of the sub-block).
    pub fn parts_entry(
        &self,
        entry: StringRef,
    ) -> Result<(StringRef, Vec<SegmentRef>), ModuleError> {
        let parts = self.parts_bytes();
        let range = entry
            .range_within(parts.len())
            .ok_or(ModuleError::StringOutOfRange {
                offset: entry.offset,
                length: entry.length,
                table_len: parts.len(),
            })?;
        decode_parts_entry(&parts[range])
    }

    /// Decode every instruction and resolve its arguments.
    pub fn decode<'m>(&'m self) -> Result<Vec<Op<'m>>, ModuleError> {
        let strings = self.strings();
        let mut ops = Vec::with_capacity(self.header.instruction_count as usize);

        for (index, word) in self.instructions().enumerate() {
            let instr = Instr::unpack(word).ok_or(ModuleError::UnknownOpcode {
                index,
                opcode: (word & 0xFF) as u8,
            })?;

            let Some(table) = instr.opcode().table() else {
                ops.push(match instr {
                    Instr::SelfClosingTag => Op::SelfClosing,
                    Instr::StaticTagClose => Op::TagClose,
                    other => unreachable!("{other:?} has a payload table"),
                });
                continue;
            };

            let view = self.table(table);
            let payload = instr.payload().map_or(0, |p| p.get());
            let out_of_range = || ModuleError::PayloadOutOfRange {
                index,
                opcode: instr.opcode(),
                payload,
                count: view.len() as u32,
            };
            let single = || -> Result<&'m str, ModuleError> {
                let r = view.get(payload as usize).ok_or_else(out_of_range)?;
                strings.get(r)
            };
            let pair = || -> Result<(&'m str, &'m str), ModuleError> {
                let (a, b) = view.get_pair(payload as usize).ok_or_else(out_of_range)?;
                Ok((strings.get(a)?, strings.get(b)?))
            };

            let op = match table {
                Table::TagOpens => Op::TagOpen { tag: single()? },
                Table::Texts => Op::Text { text: single()? },
                Table::DynTexts => Op::DynText { field: single()? },
                Table::StaticAttrs => {
                    let (name, value) = pair()?;
                    Op::StaticAttr { name, value }
                }
                Table::StaticDynAttrs => {
                    let (name, field) = pair()?;
                    Op::StaticDynAttr { name, field }
                }
                Table::DynStaticAttrs => {
                    let (field, value) = pair()?;
                    Op::DynStaticAttr { field, value }
                }
                Table::DynDynAttrs => {
                    let (name_field, value_field) = pair()?;
                    Op::DynDynAttr {
                        name_field,
                        value_field,
                    }
                }
                Table::DynEvents => {
                    let (event, handler) = pair()?;
                    Op::Event { event, handler }
                }
                Table::DynAttrValuePartRefs => {
                    let r = view.get(payload as usize).ok_or_else(out_of_range)?;
                    let (name, segments) = self.parts_entry(r)?;
                    let segments = segments
                        .into_iter()
                        .map(|s| {
                            Ok(Segment {
                                kind: s.kind,
                                value: strings.get(s.value)?,
                            })
                        })
                        .collect::<Result<Vec<_>, ModuleError>>()?;
                    Op::AttrValueParts {
                        name: strings.get(name)?,
                        segments,
                    }
                }
            };
            ops.push(op);
        }

        Ok(ops)
    }

    /// Slice between two section offsets. Offsets were validated against the
    /// buffer length at load time.
    fn section(&self, start: u64, end: u64) -> &[u8] {
        &self.bytes[start as usize..end as usize]
    }
}

/// View into the string byte table.
#[derive(Clone, Copy)]
pub struct StringsView<'a> {
    bytes: &'a [u8],
}

impl<'a> StringsView<'a> {
    /// Resolve a ref to its text.
    pub fn get(&self, r: StringRef) -> Result<&'a str, ModuleError> {
        let range = r
            .range_within(self.bytes.len())
            .ok_or(ModuleError::StringOutOfRange {
                offset: r.offset,
                length: r.length,
                table_len: self.bytes.len(),
            })?;
        std::str::from_utf8(&self.bytes[range]).map_err(|_| ModuleError::InvalidUtf8 {
            offset: r.offset,
            length: r.length,
        })
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// View into one payload table.
#[derive(Clone, Copy)]
pub struct TableView<'a> {
    bytes: &'a [u8],
    table: Table,
    count: u32,
}

impl TableView<'_> {
    pub fn table(&self) -> Table {
        self.table
    }

    /// First ref of entry `index`.
    pub fn get(&self, index: usize) -> Option<StringRef> {
        self.slot(index, 0)
    }

    /// Both refs of a two-ref entry.
    pub fn get_pair(&self, index: usize) -> Option<(StringRef, StringRef)> {
        if self.table.refs_per_entry() != 2 {
            return None;
        }
        Some((self.slot(index, 0)?, self.slot(index, 1)?))
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn slot(&self, index: usize, slot: usize) -> Option<StringRef> {
        if index >= self.len() {
            return None;
        }
        let start = index * self.table.entry_size() + slot * StringRef::SIZE;
        let chunk: [u8; 8] = self.bytes.get(start..start + StringRef::SIZE)?.try_into().ok()?;
        Some(StringRef::from_bytes(chunk))
    }
}
