use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use super::source_loader::{ConfigArgs, compile_template, fail, load_config, load_source};

pub struct CompileArgs {
    pub input_path: PathBuf,
    pub selector: Option<String>,
    pub output: Option<PathBuf>,
    pub config: ConfigArgs,
    pub color: bool,
}

pub fn run(args: CompileArgs) {
    let config = load_config(&args.config).unwrap_or_else(|e| fail(e));
    let source = load_source(&args.input_path).unwrap_or_else(|e| fail(e));
    let template =
        compile_template(source, args.selector.as_deref(), &config).unwrap_or_else(|e| fail(e));

    let diagnostics = &template.compiled.diagnostics;
    if !diagnostics.is_empty() {
        eprintln!(
            "{}",
            diagnostics
                .printer()
                .source(&template.source.text)
                .path(&template.source.name)
                .colored(args.color)
                .render()
        );
    }

    let bytes = &template.compiled.bytes;
    let written = match &args.output {
        Some(path) => fs::write(path, bytes),
        None => io::stdout().lock().write_all(bytes),
    };
    if let Err(e) = written {
        fail(format!("failed to write output: {e}"));
    }

    tracing::info!(bytes = bytes.len(), "template written");
}
