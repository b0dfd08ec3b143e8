use std::path::PathBuf;

use super::source_loader::{ConfigArgs, compile_template, fail, load_config, load_source};

pub struct CheckArgs {
    pub input_path: PathBuf,
    pub selector: Option<String>,
    pub config: ConfigArgs,
    pub strict: bool,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let config = load_config(&args.config).unwrap_or_else(|e| fail(e));
    let source = load_source(&args.input_path).unwrap_or_else(|e| fail(e));
    let template =
        compile_template(source, args.selector.as_deref(), &config).unwrap_or_else(|e| fail(e));

    let diagnostics = template.compiled.diagnostics.filtered();
    let blocking = if args.strict {
        diagnostics.len()
    } else {
        diagnostics.error_count()
    };
    if blocking == 0 {
        return;
    }

    eprintln!(
        "{}",
        diagnostics
            .printer()
            .source(&template.source.text)
            .path(&template.source.name)
            .colored(args.color)
            .compact(args.compact)
            .summary(true)
            .render()
    );
    std::process::exit(1);
}
