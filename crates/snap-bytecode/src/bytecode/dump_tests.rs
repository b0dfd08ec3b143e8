use snap_core::{Colors, StringRef};

use super::*;

fn idx(i: usize) -> PayloadIndex {
    PayloadIndex::new(i).unwrap()
}

/// `<ul><li class="a {b}">x</li><br></ul>` laid out by hand.
fn list_module() -> Module {
    // "ul" "li" "class" "a " "b" "x" "br"
    let strings = "ulliclassa bxbr";
    let instrs = [
        Instr::StaticTagOpen(idx(0)),
        Instr::StaticTagOpen(idx(1)),
        Instr::DynAttrValueParts(idx(0)),
        Instr::StaticText(idx(0)),
        Instr::StaticTagClose,
        Instr::StaticTagOpen(idx(2)),
        Instr::SelfClosingTag,
        Instr::StaticTagClose,
    ];

    let mut parts = Vec::new();
    encode_parts_entry(
        StringRef::new(4, 5),
        &[
            SegmentRef {
                kind: SegmentKind::Static,
                value: StringRef::new(9, 2),
            },
            SegmentRef {
                kind: SegmentKind::Dynamic,
                value: StringRef::new(11, 1),
            },
        ],
        &mut parts,
    );

    let header = Header {
        instruction_count: instrs.len() as u32,
        string_byte_count: strings.len() as u32,
        tag_open_count: 3,
        text_count: 1,
        dyn_attr_value_part_ref_count: 1,
        parts_byte_count: parts.len() as u32,
        ..Default::default()
    };
    let offsets = header.compute_offsets();

    let mut out = header.to_bytes().to_vec();
    for i in instrs {
        out.extend_from_slice(&i.pack().to_le_bytes());
    }
    out.extend_from_slice(strings.as_bytes());
    out.resize(offsets.table(Table::TagOpens) as usize, 0);
    for r in [
        StringRef::new(0, 2),
        StringRef::new(2, 2),
        StringRef::new(13, 2),
    ] {
        r.write_to(&mut out);
    }
    out.resize(offsets.table(Table::Texts) as usize, 0);
    StringRef::new(12, 1).write_to(&mut out);
    out.resize(offsets.table(Table::DynAttrValuePartRefs) as usize, 0);
    StringRef::new(0, parts.len() as u32).write_to(&mut out);
    out.extend_from_slice(&parts);

    Module::from_bytes(out).unwrap()
}

#[test]
fn dump_nested() {
    let out = dump(&list_module(), Colors::OFF).unwrap();

    insta::assert_snapshot!(out, @r#"
    [header]
    instructions = 8
    string_bytes = 15
    tag_open = 3
    text = 1
    static_attr = 0
    dyn_text = 0
    static_dyn_attr = 0
    dyn_static_attr = 0
    dyn_dyn_attr = 0
    dyn_event = 0
    dyn_attr_value_part_ref = 1
    parts_bytes = 36

    [strings]
    "ulliclassa bxbr"

    [code]
    0  open ul
    1    open li
    2      attr class=["a " {b}]
    3      text "x"
    4    close
    5    open br
    6    void
    7  close
    "#);
}

#[test]
fn dump_colored_wraps_mnemonics() {
    let out = dump(&list_module(), Colors::ON).unwrap();

    assert!(out.contains("\x1b[34mopen\x1b[0m ul"));
    assert!(out.contains("\x1b[33m{b}\x1b[0m"));
    assert!(out.contains("\x1b[32m\"x\"\x1b[0m"));
}

#[test]
fn dump_empty() {
    let module = Module::from_bytes(Header::default().to_bytes().to_vec()).unwrap();
    let out = dump(&module, Colors::OFF).unwrap();

    assert!(out.ends_with("[code]\n"));
    assert!(out.contains("[strings]\n\"\"\n"));
}

#[test]
fn width_for_count_values() {
    assert_eq!(super::dump::width_for_count(0), 1);
    assert_eq!(super::dump::width_for_count(10), 1);
    assert_eq!(super::dump::width_for_count(11), 2);
    assert_eq!(super::dump::width_for_count(101), 3);
}
