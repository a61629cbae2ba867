//! Execution error definitions.

use pzc_util::CodeError;
use thiserror::Error;

/// A fatal execution error.
///
/// The trace written up to the failing instruction is preserved; the
/// machine stops at the first violation.
#[derive(Debug, Error)]
pub enum ExecError {
    /// More instructions than the machine's code store holds.
    #[error("code-length exceeded: {0} instructions (maximum is 500)")]
    CodeTooLong(usize),

    /// The stack pointer left the stack store.
    #[error("stack overflow")]
    StackOverflow,

    /// A stack access outside the live store; only reachable from
    /// hand-crafted instruction streams.
    #[error("stack access out of range: {0}")]
    StackOutOfRange(i64),

    /// A register index outside the register bank.
    #[error("register out of range: {0}")]
    RegisterOutOfRange(i64),

    /// The program counter left the code store.
    #[error("program counter out of range: {0}")]
    PcOutOfRange(i64),

    /// Division or modulo by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A persisted instruction file failed to decode.
    #[error(transparent)]
    BadCode(#[from] CodeError),

    /// Standard input ended before a read instruction was satisfied.
    #[error("input exhausted while reading an integer")]
    InputExhausted,

    /// Standard input held something other than a signed integer.
    #[error("malformed input: expected a signed integer, found {0:?}")]
    MalformedInput(String),

    /// An I/O failure on input, output, or the trace sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
