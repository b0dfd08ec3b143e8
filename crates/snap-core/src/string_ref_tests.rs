use crate::StringRef;

#[test]
fn bytes_are_offset_then_length_little_endian() {
    let r = StringRef::new(0x0102_0304, 7);

    assert_eq!(r.to_bytes(), [0x04, 0x03, 0x02, 0x01, 7, 0, 0, 0]);
    assert_eq!(StringRef::from_bytes(r.to_bytes()), r);
}

#[test]
fn range_within_checks_bounds() {
    let r = StringRef::new(2, 3);

    assert_eq!(r.range_within(5), Some(2..5));
    assert_eq!(r.range_within(4), None);
}

#[test]
fn end_does_not_overflow() {
    let r = StringRef::new(u32::MAX, u32::MAX);

    assert_eq!(r.end(), 2 * u32::MAX as u64);
}
