use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, compile_command, dump_command};

#[test]
fn compile_params() {
    let m = compile_command()
        .try_get_matches_from([
            "compile",
            "page.html",
            "-s",
            "#row",
            "-o",
            "row.bin",
            "--plain-close",
            "--color",
            "never",
        ])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.input.path, PathBuf::from("page.html"));
    assert_eq!(params.input.selector.as_deref(), Some("#row"));
    assert_eq!(params.output, Some(PathBuf::from("row.bin")));
    assert!(params.plain_close);
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn compile_defaults() {
    let m = compile_command()
        .try_get_matches_from(["compile", "-"])
        .unwrap();
    let params = CompileParams::from_matches(&m);

    assert_eq!(params.input.path, PathBuf::from("-"));
    assert_eq!(params.input.selector, None);
    assert_eq!(params.output, None);
    assert_eq!(params.input.config, None);
    assert!(!params.plain_close);
    assert_eq!(params.color, ColorChoice::Auto);
}

#[test]
fn compile_requires_input() {
    assert!(compile_command().try_get_matches_from(["compile"]).is_err());
}

#[test]
fn dump_binary_flag() {
    let m = dump_command()
        .try_get_matches_from(["dump", "row.bin", "--binary"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert!(params.binary);
    assert_eq!(params.input.path, PathBuf::from("row.bin"));
}

#[test]
fn dump_config_flag() {
    let m = dump_command()
        .try_get_matches_from(["dump", "page.html", "--config", "snap.json"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.input.config, Some(PathBuf::from("snap.json")));
}

#[test]
fn check_strict_and_color() {
    let m = check_command()
        .try_get_matches_from(["check", "page.html", "--strict", "--color", "always"])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert!(params.strict);
    assert!(!params.compact);
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn check_rejects_output_flag() {
    let result = check_command().try_get_matches_from(["check", "page.html", "-o", "x"]);

    assert!(result.is_err());
}

#[test]
fn color_rejects_unknown_value() {
    let result = check_command().try_get_matches_from(["check", "page.html", "--color", "blue"]);

    assert!(result.is_err());
}

#[test]
fn cli_requires_subcommand() {
    assert!(build_cli().try_get_matches_from(["snap"]).is_err());
}

#[test]
fn cli_routes_subcommands() {
    let m = build_cli()
        .try_get_matches_from(["snap", "check", "page.html"])
        .unwrap();

    assert_eq!(m.subcommand_name(), Some("check"));
}

#[test]
fn check_help_lists_strict() {
    let help = check_command().render_help().to_string();

    assert!(help.contains("--strict"));
    assert!(!help.contains("--binary"));
}

#[test]
fn check_compact_flag() {
    let m = check_command()
        .try_get_matches_from(["check", "page.html", "--compact"])
        .unwrap();

    assert!(CheckParams::from_matches(&m).compact);
}

#[test]
fn compact_is_check_only() {
    let result = dump_command().try_get_matches_from(["dump", "page.html", "--compact"]);

    assert!(result.is_err());
}

#[test]
fn auto_color_is_off_for_files() {
    let file = std::fs::File::open(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml")).unwrap();

    assert!(ColorChoice::Always.enabled_for(&file));
    assert!(!ColorChoice::Never.enabled_for(&file));
    assert!(!ColorChoice::Auto.enabled_for(&file));
}
