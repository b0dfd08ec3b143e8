//! Read parsed matches into typed params, then hand them to the commands.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::compile::CompileArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::source_loader::ConfigArgs;

/// Where the template comes from; every subcommand takes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputParams {
    pub path: PathBuf,
    pub selector: Option<String>,
    pub config: Option<PathBuf>,
}

impl InputParams {
    fn from_matches(m: &ArgMatches) -> Self {
        Self {
            // Required positional: clap has already rejected its absence.
            path: m
                .get_one::<PathBuf>("input_path")
                .cloned()
                .unwrap_or_else(|| PathBuf::from("-")),
            selector: m.get_one::<String>("selector").cloned(),
            config: m.get_one::<PathBuf>("config").cloned(),
        }
    }

    fn config_args(&self, plain_close: bool) -> ConfigArgs {
        ConfigArgs {
            path: self.config.clone(),
            plain_close,
        }
    }
}

pub struct CompileParams {
    pub input: InputParams,
    pub output: Option<PathBuf>,
    pub plain_close: bool,
    pub color: ColorChoice,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            output: m.get_one::<PathBuf>("output").cloned(),
            plain_close: m.get_flag("plain_close"),
            color: ColorChoice::from_matches(m),
        }
    }
}

impl From<CompileParams> for CompileArgs {
    fn from(p: CompileParams) -> Self {
        Self {
            config: p.input.config_args(p.plain_close),
            input_path: p.input.path,
            selector: p.input.selector,
            output: p.output,
            // Buffer goes to stdout; only diagnostics are colored.
            color: p.color.enabled_for(&std::io::stderr()),
        }
    }
}

pub struct DumpParams {
    pub input: InputParams,
    pub plain_close: bool,
    pub binary: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            plain_close: m.get_flag("plain_close"),
            binary: m.get_flag("binary"),
            color: ColorChoice::from_matches(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            config: p.input.config_args(p.plain_close),
            input_path: p.input.path,
            selector: p.input.selector,
            binary: p.binary,
            color: p.color.enabled_for(&std::io::stdout()),
        }
    }
}

pub struct CheckParams {
    pub input: InputParams,
    pub strict: bool,
    pub compact: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            strict: m.get_flag("strict"),
            compact: m.get_flag("compact"),
            color: ColorChoice::from_matches(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            config: p.input.config_args(false),
            input_path: p.input.path,
            selector: p.input.selector,
            strict: p.strict,
            compact: p.compact,
            color: p.color.enabled_for(&std::io::stderr()),
        }
    }
}
