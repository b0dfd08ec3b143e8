//! Per-compile context: interner, payload tables, instruction stream.

use std::borrow::Cow;

use rowan::TextRange;
use snap_bytecode::{
    Header, Instr, PayloadIndex, SegmentKind, SegmentRef, Table, encode_parts_entry,
    parts_entry_size,
};
use snap_core::{Interner, StringRef};

use crate::classify::{self, AttrClass, Segment};
use crate::config::{CloseMode, CompilerConfig};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::markup::{Attribute, Element, Node, is_void_element};

use super::error::CompileError;
use super::serialize::{Sections, serialize};
use super::Compiled;

/// Pending work for the iterative tree walk.
enum Work<'n> {
    Node(&'n Node),
    Close { void: bool },
}

/// Compiler state for one template.
///
/// Created empty, grown by the walk, consumed by [`Compiler::finish`].
pub struct Compiler<'c> {
    config: &'c CompilerConfig,
    strings: Interner,
    instructions: Vec<Instr>,
    /// Flat refs per table; two-ref tables store pairs back to back.
    tables: [Vec<StringRef>; 9],
    parts: Vec<u8>,
    diagnostics: Diagnostics,
}

impl<'c> Compiler<'c> {
    pub fn new(config: &'c CompilerConfig) -> Self {
        Self {
            config,
            strings: Interner::new(),
            instructions: Vec::new(),
            tables: Default::default(),
            parts: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Compile a sequence of sibling nodes in pre-order.
    pub fn compile_nodes(&mut self, nodes: &[Node]) -> Result<(), CompileError> {
        let mut stack: Vec<Work<'_>> = nodes.iter().rev().map(Work::Node).collect();

        while let Some(work) = stack.pop() {
            match work {
                Work::Node(node) => self.compile_node(node, &mut stack)?,
                Work::Close { void } => self.emit_close(void)?,
            }
        }
        Ok(())
    }

    fn compile_node<'n>(
        &mut self,
        node: &'n Node,
        stack: &mut Vec<Work<'n>>,
    ) -> Result<(), CompileError> {
        match node {
            Node::Element(el) => self.compile_element(el, stack),
            Node::Text { text, span } => self.compile_text(text, *span),
            Node::Comment { .. } => Ok(()),
            Node::Other { kind, span, .. } => {
                self.diagnostics
                    .report(DiagnosticKind::UnsupportedNodeKind, *span)
                    .message(kind.name())
                    .emit();
                Ok(())
            }
        }
    }

    fn compile_element<'n>(
        &mut self,
        el: &'n Element,
        stack: &mut Vec<Work<'n>>,
    ) -> Result<(), CompileError> {
        let tag = self.tag_name(el);
        self.emit_tag_open(&tag)?;

        for attr in &el.attributes {
            self.compile_attribute(attr)?;
        }

        let void = is_void_element(&tag);
        if void && !el.children.is_empty() {
            self.diagnostics
                .report(DiagnosticKind::VoidElementChildren, el.span)
                .message(&*tag)
                .emit();
        }

        stack.push(Work::Close { void });
        if !void {
            stack.extend(el.children.iter().rev().map(Work::Node));
        }
        Ok(())
    }

    /// Normalized tag name, or the placeholder for a blank one.
    fn tag_name<'n>(&mut self, el: &'n Element) -> Cow<'n, str> {
        let trimmed = el.name.trim();
        if trimmed.is_empty() {
            let placeholder = self.config.placeholder().to_ascii_lowercase();
            self.diagnostics
                .report(DiagnosticKind::EmptyTagName, el.span)
                .message(placeholder.as_str())
                .emit();
            return Cow::Owned(placeholder);
        }
        if trimmed.bytes().any(|b| b.is_ascii_uppercase()) {
            return Cow::Owned(trimmed.to_ascii_lowercase());
        }
        Cow::Borrowed(trimmed)
    }

    fn compile_attribute(&mut self, attr: &Attribute) -> Result<(), CompileError> {
        if classify::has_unmatched_brace(&attr.name) || classify::has_unmatched_brace(&attr.value)
        {
            self.diagnostics
                .report(DiagnosticKind::UnmatchedBrace, attr.span)
                .emit();
        }

        match classify::classify_attribute(&attr.name, &attr.value) {
            AttrClass::Event { event, handler } => self.emit_dyn_event(event, handler),
            AttrClass::DynDyn {
                name_field,
                value_field,
            } => self.emit_dyn_dyn_attr(name_field, value_field),
            AttrClass::Parts { name, segments } => self.emit_attr_value_parts(name, &segments),
            AttrClass::StaticDyn { name, field } => self.emit_static_dyn_attr(name, field),
            AttrClass::DynStatic { field, value } => self.emit_dyn_static_attr(field, value),
            AttrClass::Static { name, value } => self.emit_static_attribute(name, value),
        }
    }

    fn compile_text(&mut self, text: &str, span: TextRange) -> Result<(), CompileError> {
        if text.trim().is_empty() {
            return Ok(());
        }
        if classify::has_unmatched_brace(text) {
            self.diagnostics
                .report(DiagnosticKind::UnmatchedBrace, span)
                .emit();
        }

        for segment in classify::text_segments(text) {
            match segment {
                Segment::Static(s) => self.emit_static_text(s)?,
                Segment::Dynamic(field) => self.emit_dyn_text(field)?,
            }
        }
        Ok(())
    }

    fn emit_close(&mut self, void: bool) -> Result<(), CompileError> {
        match self.config.get_close_mode() {
            CloseMode::VoidOpcode if void => self.emit_self_closing(),
            _ => self.emit_tag_close(),
        }
    }

    pub fn emit_tag_open(&mut self, tag: &str) -> Result<(), CompileError> {
        self.push_entry(Table::TagOpens, &[tag])
    }

    pub fn emit_tag_close(&mut self) -> Result<(), CompileError> {
        self.push_instr(Instr::StaticTagClose)
    }

    pub fn emit_self_closing(&mut self) -> Result<(), CompileError> {
        self.push_instr(Instr::SelfClosingTag)
    }

    pub fn emit_static_text(&mut self, text: &str) -> Result<(), CompileError> {
        self.push_entry(Table::Texts, &[text])
    }

    pub fn emit_static_attribute(&mut self, name: &str, value: &str) -> Result<(), CompileError> {
        self.push_entry(Table::StaticAttrs, &[name, value])
    }

    pub fn emit_dyn_text(&mut self, field: &str) -> Result<(), CompileError> {
        self.push_entry(Table::DynTexts, &[field])
    }

    pub fn emit_static_dyn_attr(&mut self, name: &str, field: &str) -> Result<(), CompileError> {
        self.push_entry(Table::StaticDynAttrs, &[name, field])
    }

    pub fn emit_dyn_static_attr(&mut self, field: &str, value: &str) -> Result<(), CompileError> {
        self.push_entry(Table::DynStaticAttrs, &[field, value])
    }

    pub fn emit_dyn_dyn_attr(
        &mut self,
        name_field: &str,
        value_field: &str,
    ) -> Result<(), CompileError> {
        self.push_entry(Table::DynDynAttrs, &[name_field, value_field])
    }

    pub fn emit_dyn_event(&mut self, event: &str, handler: &str) -> Result<(), CompileError> {
        self.push_entry(Table::DynEvents, &[event, handler])
    }

    /// Write one sub-block entry and reference it from the part-ref table.
    pub fn emit_attr_value_parts(
        &mut self,
        name: &str,
        segments: &[Segment<'_>],
    ) -> Result<(), CompileError> {
        let table = Table::DynAttrValuePartRefs;
        let index = self.reserve(table)?;

        let size = parts_entry_size(segments.len());
        let new_len = self.parts.len() + size;
        if new_len > u32::MAX as usize {
            return Err(CompileError::SubBlockOverflow(new_len));
        }

        let name = self.strings.intern(name)?;
        let mut refs = Vec::with_capacity(segments.len());
        for segment in segments {
            let kind = if segment.is_dynamic() {
                SegmentKind::Dynamic
            } else {
                SegmentKind::Static
            };
            let value = self.strings.intern(segment.text())?;
            refs.push(SegmentRef { kind, value });
        }

        let entry = StringRef::new(self.parts.len() as u32, size as u32);
        encode_parts_entry(name, &refs, &mut self.parts);
        self.tables[table as usize].push(entry);
        self.push_instr(Instr::new(table.opcode(), index))
    }

    /// Intern `args` as one new entry of `table` and emit its instruction.
    fn push_entry(&mut self, table: Table, args: &[&str]) -> Result<(), CompileError> {
        debug_assert_eq!(args.len(), table.refs_per_entry());
        let index = self.reserve(table)?;
        for arg in args {
            let r = self.strings.intern(arg)?;
            self.tables[table as usize].push(r);
        }
        self.push_instr(Instr::new(table.opcode(), index))
    }

    /// Payload index the next entry of `table` will get. Fails before
    /// anything is interned when the table is full.
    fn reserve(&self, table: Table) -> Result<PayloadIndex, CompileError> {
        let len = self.table_len(table);
        let max = self.config.payload_limit();
        let overflow = || CompileError::PayloadTableOverflow {
            opcode: table.opcode(),
            len: len + 1,
            max,
        };
        if len >= max {
            return Err(overflow());
        }
        PayloadIndex::new(len).ok_or_else(overflow)
    }

    fn push_instr(&mut self, instr: Instr) -> Result<(), CompileError> {
        if self.instructions.len() >= u32::MAX as usize {
            return Err(CompileError::InstructionOverflow(self.instructions.len() + 1));
        }
        self.instructions.push(instr);
        Ok(())
    }

    /// Entries in `table`.
    pub fn table_len(&self, table: Table) -> usize {
        self.tables[table as usize].len() / table.refs_per_entry()
    }

    pub fn instructions(&self) -> &[Instr] {
        &self.instructions
    }

    pub fn strings(&self) -> &Interner {
        &self.strings
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Serialize the accumulated state into one buffer.
    pub fn finish(self) -> Result<Compiled, CompileError> {
        let mut header = Header {
            instruction_count: self.instructions.len() as u32,
            string_byte_count: self.strings.byte_len() as u32,
            parts_byte_count: self.parts.len() as u32,
            ..Default::default()
        };
        for table in Table::ALL {
            header.set_table_count(table, self.table_len(table) as u32);
        }

        let bytes = serialize(&Sections {
            header,
            instructions: &self.instructions,
            strings: self.strings.bytes(),
            tables: &self.tables,
            parts: &self.parts,
        });

        tracing::debug!(
            instructions = header.instruction_count,
            strings = self.strings.len(),
            string_bytes = header.string_byte_count,
            parts_bytes = header.parts_byte_count,
            bytes = bytes.len(),
            diagnostics = self.diagnostics.len(),
            "template compiled"
        );

        Ok(Compiled {
            bytes,
            diagnostics: self.diagnostics,
        })
    }
}
