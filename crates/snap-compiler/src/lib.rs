#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Template compiler for snap.
//!
//! Turns markup with `{field}` placeholders into the flat instruction
//! buffer defined by `snap-bytecode`.
//!
//! - [`markup`]: source text to a node tree
//! - [`classify`]: static/dynamic classification of names, values and text
//! - [`emit`]: instruction emission and serialization
//! - [`host`]: two-phase size-then-copy transport

pub mod classify;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod host;
pub mod markup;

#[cfg(test)]
mod classify_tests;
#[cfg(test)]
mod config_tests;

pub use config::{CloseMode, CompilerConfig};
pub use diagnostics::{
    DiagnosticKind, DiagnosticMessage, Diagnostics, DiagnosticsPrinter, Severity,
};
pub use emit::{CompileError, Compiled, Compiler, compile};
pub use host::{TemplateHost, TransportError};
pub use markup::{Document, Element, Node};

/// Parse `source` and compile its top-level nodes.
///
/// Parse diagnostics come first in the result, followed by compile
/// diagnostics.
pub fn compile_source(source: &str, config: &CompilerConfig) -> Result<Compiled, CompileError> {
    let document = Document::parse(source);
    let mut compiled = compile(document.nodes(), config)?;

    let mut diagnostics = document.diagnostics().clone();
    diagnostics.extend(compiled.diagnostics);
    compiled.diagnostics = diagnostics;
    Ok(compiled)
}
