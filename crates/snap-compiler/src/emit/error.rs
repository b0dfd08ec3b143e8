use snap_bytecode::Opcode;
use snap_core::StringTableOverflow;

/// Fatal compile failure. No buffer is produced.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("template too large: {opcode} table would hold {len} entries (max {max})")]
    PayloadTableOverflow {
        opcode: Opcode,
        len: usize,
        max: usize,
    },
    #[error(transparent)]
    StringTableOverflow(#[from] StringTableOverflow),
    #[error("template too large: attribute parts sub-block would be {0} bytes")]
    SubBlockOverflow(usize),
    #[error("template too large: {0} instructions")]
    InstructionOverflow(usize),
}
