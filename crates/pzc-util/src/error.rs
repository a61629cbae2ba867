//! Core error types for pzc-util.

use thiserror::Error;

/// Error type for the persisted instruction-file codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodeError {
    /// An opcode number outside the instruction set.
    #[error("invalid opcode {0}")]
    InvalidOpcode(i64),

    /// A line did not contain four whitespace-separated integers.
    #[error("malformed instruction on line {line}")]
    MalformedInstruction { line: usize },
}
