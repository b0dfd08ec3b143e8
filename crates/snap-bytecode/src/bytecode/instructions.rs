//! Instruction definitions.
//!
//! On the wire an instruction is one u32: low 8 bits opcode, high 24 bits
//! payload index. In memory it is the [`Instr`] enum; packing happens only at
//! the serialization boundary.

use std::fmt;

use super::ids::PayloadIndex;

/// Instruction opcodes. Values are fixed by the renderer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum Opcode {
    StaticTagOpen = 0,
    StaticTagClose = 1,
    SelfClosingTag = 2,
    StaticText = 3,
    StaticAttribute = 4,
    DynText = 5,
    StaticDynAttr = 6,
    DynStaticAttr = 7,
    DynDynAttr = 8,
    DynEvent = 9,
    DynAttrValueParts = 10,
}

impl Opcode {
    pub const ALL: [Self; 11] = [
        Self::StaticTagOpen,
        Self::StaticTagClose,
        Self::SelfClosingTag,
        Self::StaticText,
        Self::StaticAttribute,
        Self::DynText,
        Self::StaticDynAttr,
        Self::DynStaticAttr,
        Self::DynDynAttr,
        Self::DynEvent,
        Self::DynAttrValueParts,
    ];

    pub fn from_u8(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::StaticTagOpen => "static_tag_open",
            Self::StaticTagClose => "static_tag_close",
            Self::SelfClosingTag => "self_closing_tag",
            Self::StaticText => "static_text",
            Self::StaticAttribute => "static_attribute",
            Self::DynText => "dyn_text",
            Self::StaticDynAttr => "static_dyn_attr",
            Self::DynStaticAttr => "dyn_static_attr",
            Self::DynDynAttr => "dyn_dyn_attr",
            Self::DynEvent => "dyn_event",
            Self::DynAttrValueParts => "dyn_attribute_value_parts",
        }
    }

    /// Payload table this opcode indexes, `None` for close and void.
    pub fn table(self) -> Option<Table> {
        match self {
            Self::StaticTagOpen => Some(Table::TagOpens),
            Self::StaticTagClose | Self::SelfClosingTag => None,
            Self::StaticText => Some(Table::Texts),
            Self::StaticAttribute => Some(Table::StaticAttrs),
            Self::DynText => Some(Table::DynTexts),
            Self::StaticDynAttr => Some(Table::StaticDynAttrs),
            Self::DynStaticAttr => Some(Table::DynStaticAttrs),
            Self::DynDynAttr => Some(Table::DynDynAttrs),
            Self::DynEvent => Some(Table::DynEvents),
            Self::DynAttrValueParts => Some(Table::DynAttrValuePartRefs),
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload tables, in header and section order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Table {
    TagOpens,
    Texts,
    StaticAttrs,
    DynTexts,
    StaticDynAttrs,
    DynStaticAttrs,
    DynDynAttrs,
    DynEvents,
    /// One StringRef per attribute, pointing into the parts sub-block.
    DynAttrValuePartRefs,
}

impl Table {
    pub const ALL: [Self; 9] = [
        Self::TagOpens,
        Self::Texts,
        Self::StaticAttrs,
        Self::DynTexts,
        Self::StaticDynAttrs,
        Self::DynStaticAttrs,
        Self::DynDynAttrs,
        Self::DynEvents,
        Self::DynAttrValuePartRefs,
    ];

    pub fn opcode(self) -> Opcode {
        match self {
            Self::TagOpens => Opcode::StaticTagOpen,
            Self::Texts => Opcode::StaticText,
            Self::StaticAttrs => Opcode::StaticAttribute,
            Self::DynTexts => Opcode::DynText,
            Self::StaticDynAttrs => Opcode::StaticDynAttr,
            Self::DynStaticAttrs => Opcode::DynStaticAttr,
            Self::DynDynAttrs => Opcode::DynDynAttr,
            Self::DynEvents => Opcode::DynEvent,
            Self::DynAttrValuePartRefs => Opcode::DynAttrValueParts,
        }
    }

    /// StringRefs per entry.
    pub fn refs_per_entry(self) -> usize {
        match self {
            Self::TagOpens | Self::Texts | Self::DynTexts | Self::DynAttrValuePartRefs => 1,
            Self::StaticAttrs
            | Self::StaticDynAttrs
            | Self::DynStaticAttrs
            | Self::DynDynAttrs
            | Self::DynEvents => 2,
        }
    }

    /// Entry size in bytes.
    pub fn entry_size(self) -> usize {
        self.refs_per_entry() * 8
    }

    /// Short name used in dumps.
    pub fn name(self) -> &'static str {
        match self {
            Self::TagOpens => "tag_open",
            Self::Texts => "text",
            Self::StaticAttrs => "static_attr",
            Self::DynTexts => "dyn_text",
            Self::StaticDynAttrs => "static_dyn_attr",
            Self::DynStaticAttrs => "dyn_static_attr",
            Self::DynDynAttrs => "dyn_dyn_attr",
            Self::DynEvents => "dyn_event",
            Self::DynAttrValuePartRefs => "dyn_attr_value_part_ref",
        }
    }
}

/// One instruction, tagged by opcode, carrying its payload index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Instr {
    StaticTagOpen(PayloadIndex),
    StaticTagClose,
    SelfClosingTag,
    StaticText(PayloadIndex),
    StaticAttribute(PayloadIndex),
    DynText(PayloadIndex),
    StaticDynAttr(PayloadIndex),
    DynStaticAttr(PayloadIndex),
    DynDynAttr(PayloadIndex),
    DynEvent(PayloadIndex),
    DynAttrValueParts(PayloadIndex),
}

impl Instr {
    /// Build from opcode and index. Close and void ignore `index`.
    pub fn new(opcode: Opcode, index: PayloadIndex) -> Self {
        match opcode {
            Opcode::StaticTagOpen => Self::StaticTagOpen(index),
            Opcode::StaticTagClose => Self::StaticTagClose,
            Opcode::SelfClosingTag => Self::SelfClosingTag,
            Opcode::StaticText => Self::StaticText(index),
            Opcode::StaticAttribute => Self::StaticAttribute(index),
            Opcode::DynText => Self::DynText(index),
            Opcode::StaticDynAttr => Self::StaticDynAttr(index),
            Opcode::DynStaticAttr => Self::DynStaticAttr(index),
            Opcode::DynDynAttr => Self::DynDynAttr(index),
            Opcode::DynEvent => Self::DynEvent(index),
            Opcode::DynAttrValueParts => Self::DynAttrValueParts(index),
        }
    }

    pub fn opcode(self) -> Opcode {
        match self {
            Self::StaticTagOpen(_) => Opcode::StaticTagOpen,
            Self::StaticTagClose => Opcode::StaticTagClose,
            Self::SelfClosingTag => Opcode::SelfClosingTag,
            Self::StaticText(_) => Opcode::StaticText,
            Self::StaticAttribute(_) => Opcode::StaticAttribute,
            Self::DynText(_) => Opcode::DynText,
            Self::StaticDynAttr(_) => Opcode::StaticDynAttr,
            Self::DynStaticAttr(_) => Opcode::DynStaticAttr,
            Self::DynDynAttr(_) => Opcode::DynDynAttr,
            Self::DynEvent(_) => Opcode::DynEvent,
            Self::DynAttrValueParts(_) => Opcode::DynAttrValueParts,
        }
    }

    /// Payload index, `None` for close and void.
    pub fn payload(self) -> Option<PayloadIndex> {
        match self {
            Self::StaticTagClose | Self::SelfClosingTag => None,
            Self::StaticTagOpen(i)
            | Self::StaticText(i)
            | Self::StaticAttribute(i)
            | Self::DynText(i)
            | Self::StaticDynAttr(i)
            | Self::DynStaticAttr(i)
            | Self::DynDynAttr(i)
            | Self::DynEvent(i)
            | Self::DynAttrValueParts(i) => Some(i),
        }
    }

    /// Pack into the wire word: `opcode | index << 8`.
    #[inline]
    pub fn pack(self) -> u32 {
        let index = self.payload().unwrap_or(PayloadIndex::ZERO).get();
        (self.opcode() as u32 & 0xFF) | ((index & 0x00FF_FFFF) << 8)
    }

    /// Unpack a wire word. Returns `None` for an unknown opcode.
    #[inline]
    pub fn unpack(word: u32) -> Option<Self> {
        let opcode = Opcode::from_u8((word & 0xFF) as u8)?;
        let index = PayloadIndex::new((word >> 8) as usize)?;
        Some(Self::new(opcode, index))
    }
}
