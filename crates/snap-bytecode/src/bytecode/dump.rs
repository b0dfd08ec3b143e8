//! Human-readable dump of a compiled template.
//!
//! Three sections: `[header]` counts, `[strings]` (the raw string table as
//! one literal), and `[code]` with one line per instruction, indented by
//! element depth.

use std::fmt::Write as _;

use snap_core::Colors;

use super::instructions::Table;
use super::module::{Module, ModuleError, Op};
use super::segments::SegmentKind;

/// Generate a human-readable dump of the module.
pub fn dump(module: &Module, colors: Colors) -> Result<String, ModuleError> {
    let ops = module.decode()?;
    let mut out = String::new();

    dump_header(&mut out, module, &colors);
    dump_strings(&mut out, module, &colors);
    dump_code(&mut out, &ops, &colors);

    Ok(out)
}

fn dump_header(out: &mut String, module: &Module, c: &Colors) {
    let header = module.header();
    writeln!(out, "{}", c.paint_mnemonic("[header]")).unwrap();
    writeln!(out, "instructions = {}", header.instruction_count).unwrap();
    writeln!(out, "string_bytes = {}", header.string_byte_count).unwrap();
    for table in Table::ALL {
        writeln!(out, "{} = {}", table.name(), header.table_count(table)).unwrap();
    }
    writeln!(out, "parts_bytes = {}", header.parts_byte_count).unwrap();
    out.push('\n');
}

fn dump_strings(out: &mut String, module: &Module, c: &Colors) {
    let text = String::from_utf8_lossy(module.strings().bytes());
    writeln!(out, "{}", c.paint_mnemonic("[strings]")).unwrap();
    writeln!(out, "{}", c.paint_literal(&text)).unwrap();
    out.push('\n');
}

fn dump_code(out: &mut String, ops: &[Op<'_>], c: &Colors) {
    writeln!(out, "{}", c.paint_mnemonic("[code]")).unwrap();

    let w = width_for_count(ops.len());
    let mut depth = 0usize;

    for (i, op) in ops.iter().enumerate() {
        if matches!(op, Op::TagClose | Op::SelfClosing) {
            depth = depth.saturating_sub(1);
        }

        let index = c.paint_dim(&format!("{i:>w$}"));
        let indent = "  ".repeat(depth);
        writeln!(out, "{index}  {indent}{}", format_op(op, c)).unwrap();

        if matches!(op, Op::TagOpen { .. }) {
            depth += 1;
        }
    }
}

fn format_op(op: &Op<'_>, c: &Colors) -> String {
    let attr = |name: String, value: String| {
        format!("{} {name}={value}", c.paint_mnemonic("attr"))
    };

    match op {
        Op::TagOpen { tag } => format!("{} {tag}", c.paint_mnemonic("open")),
        Op::TagClose => c.paint_mnemonic("close"),
        Op::SelfClosing => c.paint_mnemonic("void"),
        Op::Text { text } => format!("{} {}", c.paint_mnemonic("text"), c.paint_literal(text)),
        Op::DynText { field } => {
            format!("{} {}", c.paint_mnemonic("dyn_text"), c.paint_field(field))
        }
        Op::StaticAttr { name, value } => attr(name.to_string(), c.paint_literal(value)),
        Op::StaticDynAttr { name, field } => attr(name.to_string(), c.paint_field(field)),
        Op::DynStaticAttr { field, value } => attr(c.paint_field(field), c.paint_literal(value)),
        Op::DynDynAttr {
            name_field,
            value_field,
        } => attr(c.paint_field(name_field), c.paint_field(value_field)),
        Op::Event { event, handler } => {
            format!("{} {event}={}", c.paint_mnemonic("on"), c.paint_field(handler))
        }
        Op::AttrValueParts { name, segments } => {
            let parts: Vec<String> = segments
                .iter()
                .map(|s| match s.kind {
                    SegmentKind::Static => c.paint_literal(s.value),
                    SegmentKind::Dynamic => c.paint_field(s.value),
                })
                .collect();
            attr(name.to_string(), format!("[{}]", parts.join(" ")))
        }
    }
}

/// Minimum width needed to display numbers up to `count - 1`.
pub(super) fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        (count - 1).ilog10() as usize + 1
    }
}
