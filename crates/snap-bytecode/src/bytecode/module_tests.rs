use snap_core::StringRef;

use super::*;

/// Lay out a buffer by hand from its parts, using the shared offsets.
fn assemble(
    instrs: &[Instr],
    strings: &str,
    tables: &[(Table, Vec<StringRef>)],
    parts: &[u8],
) -> Vec<u8> {
    let mut header = Header {
        instruction_count: instrs.len() as u32,
        string_byte_count: strings.len() as u32,
        parts_byte_count: parts.len() as u32,
        ..Default::default()
    };
    for (table, refs) in tables {
        header.set_table_count(*table, (refs.len() / table.refs_per_entry()) as u32);
    }
    let offsets = header.compute_offsets();

    let mut out = header.to_bytes().to_vec();
    for instr in instrs {
        out.extend_from_slice(&instr.pack().to_le_bytes());
    }
    out.extend_from_slice(strings.as_bytes());
    for table in Table::ALL {
        out.resize(offsets.table(table) as usize, 0);
        if let Some((_, refs)) = tables.iter().find(|(t, _)| *t == table) {
            for r in refs {
                r.write_to(&mut out);
            }
        }
    }
    out.extend_from_slice(parts);
    assert_eq!(out.len() as u64, offsets.end);
    out
}

fn idx(i: usize) -> PayloadIndex {
    PayloadIndex::new(i).unwrap()
}

fn paragraph() -> Vec<u8> {
    // "p" "class" "x" "hi"
    assemble(
        &[
            Instr::StaticTagOpen(idx(0)),
            Instr::StaticAttribute(idx(0)),
            Instr::StaticText(idx(0)),
            Instr::StaticTagClose,
        ],
        "pclassxhi",
        &[
            (Table::TagOpens, vec![StringRef::new(0, 1)]),
            (Table::Texts, vec![StringRef::new(7, 2)]),
            (
                Table::StaticAttrs,
                vec![StringRef::new(1, 5), StringRef::new(6, 1)],
            ),
        ],
        &[],
    )
}

#[test]
fn load_and_decode() {
    let bytes = paragraph();
    assert_eq!(bytes.len(), 108);

    let module = Module::from_bytes(bytes).unwrap();
    assert_eq!(module.header().instruction_count, 4);
    assert_eq!(module.strings().len(), 9);
    assert_eq!(module.table(Table::StaticAttrs).len(), 1);

    let ops = module.decode().unwrap();
    assert_eq!(
        ops,
        vec![
            Op::TagOpen { tag: "p" },
            Op::StaticAttr {
                name: "class",
                value: "x"
            },
            Op::Text { text: "hi" },
            Op::TagClose,
        ]
    );
}

#[test]
fn empty_buffer_is_header_only() {
    let module = Module::from_bytes(Header::default().to_bytes().to_vec()).unwrap();
    assert!(module.decode().unwrap().is_empty());
    assert!(module.strings().is_empty());
}

#[test]
fn rejects_short_buffer() {
    let err = Module::from_bytes(vec![0; 10]).unwrap_err();
    assert!(matches!(err, ModuleError::TooSmall(10)));
}

#[test]
fn rejects_size_mismatch() {
    let mut bytes = paragraph();
    bytes.push(0);

    let err = Module::from_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        ModuleError::SizeMismatch {
            expected: 108,
            actual: 109
        }
    ));
}

#[test]
fn rejects_unknown_opcode() {
    let mut bytes = paragraph();
    // third instruction's opcode byte
    bytes[48 + 8] = 0x2A;

    let module = Module::from_bytes(bytes).unwrap();
    assert!(matches!(
        module.decode(),
        Err(ModuleError::UnknownOpcode {
            index: 2,
            opcode: 0x2A
        })
    ));
}

#[test]
fn rejects_payload_out_of_range() {
    let bytes = assemble(
        &[Instr::DynText(idx(1))],
        "x",
        &[(Table::DynTexts, vec![StringRef::new(0, 1)])],
        &[],
    );

    let module = Module::from_bytes(bytes).unwrap();
    assert!(matches!(
        module.decode(),
        Err(ModuleError::PayloadOutOfRange {
            index: 0,
            payload: 1,
            count: 1,
            ..
        })
    ));
}

#[test]
fn rejects_string_out_of_range() {
    let bytes = assemble(
        &[Instr::StaticText(idx(0))],
        "abc",
        &[(Table::Texts, vec![StringRef::new(2, 5)])],
        &[],
    );

    let module = Module::from_bytes(bytes).unwrap();
    assert!(matches!(
        module.decode(),
        Err(ModuleError::StringOutOfRange {
            offset: 2,
            length: 5,
            table_len: 3
        })
    ));
}

#[test]
fn decodes_parts_entry() {
    // "class" "foo " "bar"
    let mut parts = Vec::new();
    encode_parts_entry(
        StringRef::new(0, 5),
        &[
            SegmentRef {
                kind: SegmentKind::Static,
                value: StringRef::new(5, 4),
            },
            SegmentRef {
                kind: SegmentKind::Dynamic,
                value: StringRef::new(9, 3),
            },
        ],
        &mut parts,
    );
    let bytes = assemble(
        &[Instr::DynAttrValueParts(idx(0))],
        "classfoo bar",
        &[(
            Table::DynAttrValuePartRefs,
            vec![StringRef::new(0, parts.len() as u32)],
        )],
        &parts,
    );

    let module = Module::from_bytes(bytes).unwrap();
    assert_eq!(module.parts_bytes().len(), 36);
    assert_eq!(
        module.decode().unwrap(),
        vec![Op::AttrValueParts {
            name: "class",
            segments: vec![
                Segment {
                    kind: SegmentKind::Static,
                    value: "foo "
                },
                Segment {
                    kind: SegmentKind::Dynamic,
                    value: "bar"
                },
            ],
        }]
    );
}

#[test]
fn pair_tables_decode_in_order() {
    let bytes = assemble(
        &[
            Instr::StaticDynAttr(idx(0)),
            Instr::DynStaticAttr(idx(0)),
            Instr::DynDynAttr(idx(0)),
            Instr::DynEvent(idx(0)),
        ],
        "abcd",
        &[
            (
                Table::StaticDynAttrs,
                vec![StringRef::new(0, 1), StringRef::new(1, 1)],
            ),
            (
                Table::DynStaticAttrs,
                vec![StringRef::new(1, 1), StringRef::new(2, 1)],
            ),
            (
                Table::DynDynAttrs,
                vec![StringRef::new(2, 1), StringRef::new(3, 1)],
            ),
            (
                Table::DynEvents,
                vec![StringRef::new(3, 1), StringRef::new(0, 1)],
            ),
        ],
        &[],
    );

    let module = Module::from_bytes(bytes).unwrap();
    assert_eq!(
        module.decode().unwrap(),
        vec![
            Op::StaticDynAttr {
                name: "a",
                field: "b"
            },
            Op::DynStaticAttr {
                field: "b",
                value: "c"
            },
            Op::DynDynAttr {
                name_field: "c",
                value_field: "d"
            },
            Op::Event {
                event: "d",
                handler: "a"
            },
        ]
    );
}

#[test]
fn table_view_pair_on_single_table() {
    let module = Module::from_bytes(paragraph()).unwrap();
    assert_eq!(module.table(Table::TagOpens).get_pair(0), None);
    assert_eq!(
        module.table(Table::TagOpens).get(0),
        Some(StringRef::new(0, 1))
    );
    assert_eq!(module.table(Table::TagOpens).get(1), None);
}

#[test]
fn every_table_decodes_to_its_own_opcode() {
    let mut parts = Vec::new();
    encode_parts_entry(
        StringRef::new(0, 1),
        &[SegmentRef {
            kind: SegmentKind::Dynamic,
            value: StringRef::new(1, 1),
        }],
        &mut parts,
    );

    let tables: Vec<(Table, Vec<StringRef>)> = Table::ALL
        .into_iter()
        .map(|table| match table {
            Table::DynAttrValuePartRefs => (table, vec![StringRef::new(0, parts.len() as u32)]),
            _ => (table, vec![StringRef::new(0, 1); table.refs_per_entry()]),
        })
        .collect();
    let instrs: Vec<Instr> = Table::ALL
        .iter()
        .map(|table| Instr::new(table.opcode(), idx(0)))
        .collect();

    let module = Module::from_bytes(assemble(&instrs, "ab", &tables, &parts)).unwrap();
    let opcodes: Vec<Opcode> = module.decode().unwrap().iter().map(Op::opcode).collect();
    let expected: Vec<Opcode> = Table::ALL.iter().map(|t| t.opcode()).collect();
    assert_eq!(opcodes, expected);
}
