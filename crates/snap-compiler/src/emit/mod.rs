//! Bytecode emission from a markup tree.
//!
//! - [`Compiler`]: one context per compile, owning the interner and every
//!   payload table
//! - Serializer: lays the accumulated state out as one flat buffer

mod compiler;
mod error;
mod serialize;


pub use compiler::Compiler;
pub use error::CompileError;

use crate::config::CompilerConfig;
use crate::diagnostics::Diagnostics;
use crate::markup::Node;

/// A compiled template buffer and the warnings produced on the way.
#[derive(Debug, Clone)]
pub struct Compiled {
    pub bytes: Vec<u8>,
    pub diagnostics: Diagnostics,
}

/// Compile sibling `nodes` into one buffer.
///
/// Capacity errors abort the compile; no partial buffer is returned.
pub fn compile(nodes: &[Node], config: &CompilerConfig) -> Result<Compiled, CompileError> {
    let mut compiler = Compiler::new(config);
    compiler.compile_nodes(nodes)?;
    compiler.finish()
}
