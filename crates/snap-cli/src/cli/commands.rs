//! Subcommand definitions.

use clap::Command;

use super::args::{color_arg, config_args, flag, input_args, output_arg};

pub fn build_cli() -> Command {
    Command::new("snap")
        .about("Compile markup templates into renderer bytecode")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommands([compile_command(), dump_command(), check_command()])
}

/// Compile a template to a binary buffer.
pub fn compile_command() -> Command {
    Command::new("compile")
        .about("Compile a template to a binary buffer")
        .after_help(
            r#"EXAMPLES:
  snap compile page.html -s '#row' -o row.bin
  snap compile page.html --plain-close > page.bin
  cat page.html | snap compile - --config snap.json"#,
        )
        .args(input_args())
        .arg(output_arg())
        .args(config_args(true))
        .arg(color_arg())
}

/// Show a compiled template in human-readable form.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the compiled form of a template")
        .after_help(
            r#"EXAMPLES:
  snap dump page.html -s '#row'
  snap dump row.bin --binary"#,
        )
        .args(input_args())
        .args(config_args(true))
        .arg(flag(
            "binary",
            "binary",
            "Input is an already-compiled template buffer",
        ))
        .arg(color_arg())
}

/// Report template diagnostics.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Report template diagnostics")
        .after_help(
            r#"EXAMPLES:
  snap check page.html
  snap check page.html -s '#row' --strict
  snap check page.html --compact"#,
        )
        .args(input_args())
        .args(config_args(false))
        .arg(flag("strict", "strict", "Treat warnings as errors"))
        .arg(flag(
            "compact",
            "compact",
            "Print one line per diagnostic (path:line:col)",
        ))
        .arg(color_arg())
}
