//! Argument groups shared by the subcommands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Positional input plus the template selector.
pub fn input_args() -> [Arg; 2] {
    [
        Arg::new("input_path")
            .value_name("FILE")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("Input file, or - for stdin"),
        Arg::new("selector")
            .short('s')
            .long("selector")
            .value_name("SELECTOR")
            .help("Compile the children of the first element matching #id or a tag name"),
    ]
}

/// `--config FILE`, optionally with the `--plain-close` override.
pub fn config_args(with_close_override: bool) -> Vec<Arg> {
    let mut args = vec![
        Arg::new("config")
            .long("config")
            .value_name("JSON")
            .value_parser(value_parser!(PathBuf))
            .help("Compiler config file (JSON)"),
    ];
    if with_close_override {
        args.push(flag(
            "plain_close",
            "plain-close",
            "End every element with static_tag_close, including void elements",
        ));
    }
    args
}

pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file instead of stdout")
}

pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Boolean switch stored under `id`.
pub fn flag(id: &'static str, long: &'static str, help: &'static str) -> Arg {
    Arg::new(id).long(long).action(ArgAction::SetTrue).help(help)
}
