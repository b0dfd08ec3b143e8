use std::path::PathBuf;

use snap_bytecode::{Module, dump};
use snap_core::Colors;

use super::source_loader::{
    ConfigArgs, compile_template, fail, load_bytes, load_config, load_source,
};

pub struct DumpArgs {
    pub input_path: PathBuf,
    pub selector: Option<String>,
    pub config: ConfigArgs,
    pub binary: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let bytes = if args.binary {
        load_bytes(&args.input_path).unwrap_or_else(|e| fail(e))
    } else {
        compile(&args)
    };

    let module = Module::from_bytes(bytes).unwrap_or_else(|e| fail(e));
    let out = dump(&module, Colors::new(args.color)).unwrap_or_else(|e| fail(e));
    print!("{out}");
}

fn compile(args: &DumpArgs) -> Vec<u8> {
    let config = load_config(&args.config).unwrap_or_else(|e| fail(e));
    let source = load_source(&args.input_path).unwrap_or_else(|e| fail(e));
    let template =
        compile_template(source, args.selector.as_deref(), &config).unwrap_or_else(|e| fail(e));

    let diagnostics = &template.compiled.diagnostics;
    if diagnostics.has_errors() {
        eprintln!(
            "{}",
            diagnostics
                .printer()
                .source(&template.source.text)
                .path(&template.source.name)
                .colored(args.color)
                .render()
        );
        std::process::exit(1);
    }

    template.compiled.bytes
}
