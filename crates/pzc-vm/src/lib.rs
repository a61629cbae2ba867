//! pzc-vm - The P-Machine
//!
//! ============================================================================
//! MACHINE MODEL
//! ============================================================================
//!
//! The P-Machine is a register-augmented stack machine. It has two memory
//! stores and a small CPU state:
//!
//! - `code`  - the loaded instruction list, at most 500 instructions
//! - `stack` - a flat integer array of 2000 cells holding activation
//!             records and locals
//! - `pc`, `bp`, `sp`, `ir` - program counter, base pointer, stack
//!             pointer, instruction register
//! - `reg[0..15]` - sixteen general-purpose registers for expression
//!             evaluation
//!
//! ACTIVATION RECORDS:
//! -------------------
//! A procedure call lays down four linkage cells at `sp+1..sp+4`:
//!
//! ```text
//! stack[bp+0]  return value (always 0; reserved by convention)
//! stack[bp+1]  static link   - frame of the lexical parent
//! stack[bp+2]  dynamic link  - frame of the caller
//! stack[bp+3]  return address
//! stack[bp+4..] locals, at symbol offsets 4, 5, 6, ...
//! ```
//!
//! Non-local variable access walks the static-link chain: `base(l, bp)`
//! follows `stack[b+1]` exactly `l` times. The dynamic link and return
//! address restore the caller on `RTN`.
//!
//! EXECUTION:
//! ----------
//! A fetch-decode-execute loop runs until a halt: either the explicit
//! `SIO 0,0,3`, or returning from the outermost frame (which restores the
//! zero-initialized linkage cells, leaving `sp = bp = pc = 0`). Every
//! executed instruction appends a post-state line to the trace.
//!
//! All failure modes (stack overflow, division by zero, invalid opcode in
//! a persisted file, out-of-range register or program counter, malformed
//! input) abort execution; the trace up to the failing instruction is
//! preserved.

pub mod error;
pub mod machine;
pub mod trace;

pub use error::ExecError;
pub use machine::Machine;

use std::io::{BufRead, Write};

use pzc_util::Instruction;

/// Loads and runs an instruction stream in one call.
///
/// # Example
///
/// ```
/// use pzc_util::{Instruction, Op};
/// use pzc_vm::execute;
///
/// let code = vec![
///     Instruction::new(Op::Lit, 0, 0, 8),
///     Instruction::new(Op::SioOut, 0, 0, 1),
///     Instruction::new(Op::SioHalt, 0, 0, 3),
/// ];
/// let mut output = Vec::new();
/// execute(code, &mut std::io::empty(), &mut output, &mut std::io::sink()).unwrap();
/// assert_eq!(output, b"8\n");
/// ```
pub fn execute(
    code: Vec<Instruction>,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    trace: &mut dyn Write,
) -> Result<(), ExecError> {
    let mut machine = Machine::load(code)?;
    machine.run(input, output, trace)
}

/// Parses a persisted instruction file and runs it.
///
/// Rejects files with unknown opcodes or truncated tuples before any
/// instruction executes.
pub fn execute_text(
    text: &str,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
    trace: &mut dyn Write,
) -> Result<(), ExecError> {
    let code = pzc_util::parse_program(text)?;
    execute(code, input, output, trace)
}
