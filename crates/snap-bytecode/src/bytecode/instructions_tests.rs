use super::*;

#[test]
fn opcode_values_are_fixed() {
    let values: Vec<u8> = Opcode::ALL.iter().map(|&op| op as u8).collect();
    assert_eq!(values, (0u8..=10).collect::<Vec<_>>());

    assert_eq!(Opcode::from_u8(9), Some(Opcode::DynEvent));
    assert_eq!(Opcode::from_u8(11), None);
}

#[test]
fn tables_follow_header_order() {
    let opcodes: Vec<u8> = Table::ALL.iter().map(|t| t.opcode() as u8).collect();
    assert_eq!(opcodes, vec![0, 3, 4, 5, 6, 7, 8, 9, 10]);

    for table in Table::ALL {
        assert_eq!(table.opcode().table(), Some(table));
    }
    assert_eq!(Opcode::StaticTagClose.table(), None);
    assert_eq!(Opcode::SelfClosingTag.table(), None);
}

#[test]
fn entry_sizes() {
    assert_eq!(Table::TagOpens.entry_size(), 8);
    assert_eq!(Table::DynEvents.entry_size(), 16);
    assert_eq!(Table::DynAttrValuePartRefs.entry_size(), 8);
}

#[test]
fn pack_puts_opcode_low_and_index_high() {
    let idx = PayloadIndex::new(3).unwrap();

    assert_eq!(Instr::StaticText(idx).pack(), 0x0000_0303);
    assert_eq!(Instr::StaticTagClose.pack(), 1);
    assert_eq!(Instr::SelfClosingTag.pack(), 2);

    let max = PayloadIndex::new(0xFF_FFFF).unwrap();
    assert_eq!(Instr::DynAttrValueParts(max).pack(), 0xFFFF_FF0A);
}

#[test]
fn unpack_reverses_pack() {
    let idx = PayloadIndex::new(77).unwrap();
    for opcode in Opcode::ALL {
        let instr = Instr::new(opcode, idx);
        assert_eq!(Instr::unpack(instr.pack()), Some(instr));
    }
}

#[test]
fn unpack_rejects_unknown_opcode() {
    assert_eq!(Instr::unpack(0x0000_010B), None);
    assert_eq!(Instr::unpack(0xFF), None);
}

#[test]
fn close_ignores_index() {
    let idx = PayloadIndex::new(5).unwrap();
    assert_eq!(Instr::new(Opcode::StaticTagClose, idx), Instr::StaticTagClose);
    assert_eq!(Instr::StaticTagClose.payload(), None);
}
