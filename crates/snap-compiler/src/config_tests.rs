use crate::config::{CloseMode, CompilerConfig, PAYLOAD_LIMIT};

#[test]
fn defaults() {
    let config = CompilerConfig::default();

    assert_eq!(config.get_close_mode(), CloseMode::VoidOpcode);
    assert_eq!(config.placeholder(), "div");
    assert_eq!(config.payload_limit(), 0x00FF_FFFF);
}

#[test]
fn default_limit_is_payload_index_ceiling() {
    assert_eq!(PAYLOAD_LIMIT, snap_bytecode::MAX_PAYLOAD_INDEX as usize);
    assert_eq!(CompilerConfig::default().payload_limit(), PAYLOAD_LIMIT);
}

#[test]
fn payload_limit_is_clamped() {
    let config = CompilerConfig::new().max_payload_entries(usize::MAX);

    assert_eq!(config.payload_limit(), PAYLOAD_LIMIT);
}

#[test]
fn blank_placeholder_falls_back() {
    let config = CompilerConfig::new().placeholder_tag("  ");

    assert_eq!(config.placeholder(), "div");
}

#[test]
fn from_json_partial() {
    let config = CompilerConfig::from_json(r#"{ "close_mode": "plain_close" }"#).unwrap();

    assert_eq!(config.get_close_mode(), CloseMode::PlainClose);
    assert_eq!(config.placeholder(), "div");
}

#[test]
fn from_json_full() {
    let json = r#"{
        "close_mode": "void_opcode",
        "placeholder_tag": "span",
        "max_payload_entries": 10
    }"#;
    let config = CompilerConfig::from_json(json).unwrap();

    assert_eq!(
        config,
        CompilerConfig::new()
            .placeholder_tag("span")
            .max_payload_entries(10)
    );
}

#[test]
fn from_json_rejects_unknown_fields() {
    assert!(CompilerConfig::from_json(r#"{ "mode": 1 }"#).is_err());
}

#[test]
fn json_limit_is_clamped_at_use() {
    let config = CompilerConfig::from_json(r#"{ "max_payload_entries": 99999999999 }"#).unwrap();

    assert_eq!(config.payload_limit(), PAYLOAD_LIMIT);
}
