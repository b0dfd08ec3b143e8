//! Input loading shared by every command: source text, compiler config,
//! and the template selected from the parsed document.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use snap_compiler::markup::{Document, Node};
use snap_compiler::{CloseMode, CompileError, Compiled, CompilerConfig, Diagnostics, compile};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config '{}': {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("no element matches selector '{0}'")]
    SelectorNotFound(String),
    #[error("{0}")]
    Compile(#[from] CompileError),
}

/// Config sources given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigArgs {
    pub path: Option<PathBuf>,
    pub plain_close: bool,
}

/// Loaded input text and the name to show in diagnostics.
pub struct Source {
    pub name: String,
    pub text: String,
}

/// A compiled template with every diagnostic for its document.
pub struct CompiledTemplate {
    pub source: Source,
    pub compiled: Compiled,
}

pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read raw bytes from a file or stdin.
pub fn load_bytes(path: &Path) -> Result<Vec<u8>, LoadError> {
    if is_stdin(path) {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(LoadError::Stdin)?;
        return Ok(buf);
    }
    fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Read markup text from a file or stdin.
pub fn load_source(path: &Path) -> Result<Source, LoadError> {
    if is_stdin(path) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(LoadError::Stdin)?;
        return Ok(Source {
            name: "<stdin>".to_string(),
            text,
        });
    }

    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Source {
        name: path.to_string_lossy().into_owned(),
        text,
    })
}

/// Build the compiler config: file first, then flag overrides.
pub fn load_config(args: &ConfigArgs) -> Result<CompilerConfig, LoadError> {
    let mut config = match &args.path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| LoadError::Read {
                path: path.clone(),
                source,
            })?;
            parse_config(path, &json)?
        }
        None => CompilerConfig::default(),
    };

    if args.plain_close {
        config = config.close_mode(CloseMode::PlainClose);
    }
    Ok(config)
}

pub fn parse_config(path: &Path, json: &str) -> Result<CompilerConfig, LoadError> {
    CompilerConfig::from_json(json).map_err(|source| LoadError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Nodes to compile: the whole document, or the children of the element
/// matched by `selector`.
pub fn template_nodes<'d>(
    document: &'d Document,
    selector: Option<&str>,
) -> Result<&'d [Node], LoadError> {
    match selector {
        None => Ok(document.nodes()),
        Some(sel) => document
            .select(sel)
            .map(|el| el.children.as_slice())
            .ok_or_else(|| LoadError::SelectorNotFound(sel.to_string())),
    }
}

/// Parse and compile. Diagnostics hold parse issues for the whole
/// document followed by compile issues for the selected template.
pub fn compile_template(
    source: Source,
    selector: Option<&str>,
    config: &CompilerConfig,
) -> Result<CompiledTemplate, LoadError> {
    let document = Document::parse(&source.text);
    let nodes = template_nodes(&document, selector)?;
    let mut compiled = compile(nodes, config)?;

    let mut diagnostics: Diagnostics = document.diagnostics().clone();
    diagnostics.extend(compiled.diagnostics);
    compiled.diagnostics = diagnostics;

    Ok(CompiledTemplate { source, compiled })
}

/// Print `error: ...` and exit with status 1.
pub fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
