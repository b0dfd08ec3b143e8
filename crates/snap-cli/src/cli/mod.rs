mod args;
mod commands;
mod dispatch;

#[cfg(test)]
mod dispatch_tests;

use std::io::IsTerminal;

use clap::ArgMatches;

pub use commands::build_cli;
pub use dispatch::{CheckParams, CompileParams, DumpParams};

/// `--color` setting, resolved per output stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn from_matches(m: &ArgMatches) -> Self {
        match m.get_one::<String>("color").map(String::as_str) {
            Some("always") => Self::Always,
            Some("never") => Self::Never,
            _ => Self::Auto,
        }
    }

    /// `Auto` colors only when `stream` is a terminal.
    pub fn enabled_for(self, stream: &impl IsTerminal) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stream.is_terminal(),
        }
    }
}
