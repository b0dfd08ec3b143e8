use crate::{Interner, StringRef};

#[test]
fn intern_deduplicates() {
    let mut interner = Interner::new();

    let a = interner.intern("foo").unwrap();
    let b = interner.intern("foo").unwrap();
    let c = interner.intern("bar").unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(interner.len(), 2);
    assert_eq!(interner.bytes(), b"foobar");
}

#[test]
fn repeated_string_appends_nothing() {
    let mut interner = Interner::new();
    interner.intern("class").unwrap();
    let before = interner.byte_len();

    interner.intern("class").unwrap();

    assert_eq!(interner.byte_len(), before);
}

#[test]
fn refs_follow_first_occurrence_order() {
    let mut interner = Interner::new();

    let z = interner.intern("z").unwrap();
    let abc = interner.intern("abc").unwrap();
    let z_again = interner.intern("z").unwrap();

    assert_eq!(z, StringRef::new(0, 1));
    assert_eq!(abc, StringRef::new(1, 3));
    assert_eq!(z_again, z);
}

#[test]
fn empty_string_gets_zero_length_ref() {
    let mut interner = Interner::new();
    interner.intern("div").unwrap();

    let empty = interner.intern("").unwrap();

    assert_eq!(empty, StringRef::new(3, 0));
    assert_eq!(interner.resolve(empty), Some(""));
}

#[test]
fn resolve_roundtrip_multibyte() {
    let mut interner = Interner::new();
    interner.intern("a").unwrap();
    let r = interner.intern("héllo").unwrap();

    assert_eq!(r.length, 6);
    assert_eq!(interner.resolve(r), Some("héllo"));
}

#[test]
fn resolve_rejects_out_of_range() {
    let mut interner = Interner::new();
    interner.intern("ab").unwrap();

    assert_eq!(interner.resolve(StringRef::new(1, 5)), None);
}

#[test]
fn get_does_not_intern() {
    let mut interner = Interner::new();
    let r = interner.intern("x").unwrap();

    assert_eq!(interner.get("x"), Some(r));
    assert_eq!(interner.get("y"), None);
    assert_eq!(interner.len(), 1);
}

#[test]
fn iter_yields_first_occurrence_order() {
    let mut interner = Interner::new();
    let b = interner.intern("beta").unwrap();
    let a = interner.intern("alpha").unwrap();
    interner.intern("beta").unwrap();

    let items: Vec<_> = interner.iter().collect();
    assert_eq!(items, vec![(b, "beta"), (a, "alpha")]);
}
