mod cli;
mod commands;

use cli::{CheckParams, CompileParams, DumpParams, build_cli};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Log filter variable, e.g. `SNAP_LOG=snap_compiler=debug`.
const LOG_ENV: &str = "SNAP_LOG";

fn main() {
    init_logging();

    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("subcommand_required is set");
    };
    tracing::debug!(command = name, "dispatching");

    match name {
        "compile" => commands::compile::run(CompileParams::from_matches(m).into()),
        "dump" => commands::dump::run(DumpParams::from_matches(m).into()),
        "check" => commands::check::run(CheckParams::from_matches(m).into()),
        other => unreachable!("unknown subcommand {other}"),
    }
}

/// Logs go to stderr so they never mix with a buffer written to stdout.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
