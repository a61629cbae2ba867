//! P-Machine instruction set.
//!
//! Instructions are 4-tuples `(op, r, l, m)`:
//!
//! - `op` - opcode
//! - `r`  - destination/source register index (0..15)
//! - `l`  - lexical-level difference (static-link hops from the current
//!          frame), or the left operand register for arithmetic
//! - `m`  - immediate: literal value, frame offset, jump target, right
//!          operand register, or SIO selector
//!
//! The persisted form ("mcode") is ASCII: one instruction per line, four
//! whitespace-separated decimal integers `op r l m`. Instruction indices
//! are zero-based line numbers.

use std::fmt;
use std::str::FromStr;

use crate::error::CodeError;

/// Maximum number of instructions the P-Machine will load.
pub const MAX_CODE_LENGTH: usize = 500;

/// Maximum stack height during execution.
pub const MAX_STACK_HEIGHT: usize = 2000;

/// Maximum static nesting depth of procedures.
pub const MAX_LEXI_LEVELS: usize = 3;

/// Number of general-purpose registers.
pub const NUM_REGISTERS: usize = 16;

/// P-Machine opcodes with their traditional numeric codes.
///
/// The three `SIO` variants share one mnemonic and are distinguished by
/// their code (and, redundantly, by the `m` field the code generator
/// writes: 1 = write, 2 = read, 3 = halt).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i64)]
pub enum Op {
    /// `reg[r] <- m`
    Lit = 1,
    /// Return from procedure.
    Rtn = 2,
    /// `reg[r] <- stack[base(l, bp) + m]`
    Lod = 3,
    /// `stack[base(l, bp) + m] <- reg[r]`
    Sto = 4,
    /// Call the procedure at code address `m`, `l` levels out.
    Cal = 5,
    /// `sp <- sp + m`
    Inc = 6,
    /// `pc <- m`
    Jmp = 7,
    /// `if reg[r] == 0 { pc <- m }`
    Jpc = 8,
    /// Write `reg[r]` to standard output, newline-terminated.
    SioOut = 9,
    /// Read a signed integer from standard input into `reg[r]`.
    SioIn = 10,
    /// Halt the machine.
    SioHalt = 11,
    /// `reg[r] <- -reg[l]`
    Neg = 12,
    /// `reg[r] <- reg[l] + reg[m]`
    Add = 13,
    /// `reg[r] <- reg[l] - reg[m]`
    Sub = 14,
    /// `reg[r] <- reg[l] * reg[m]`
    Mul = 15,
    /// `reg[r] <- reg[l] / reg[m]`
    Div = 16,
    /// `reg[r] <- reg[l] mod 2`
    Odd = 17,
    /// `reg[r] <- reg[l] mod reg[m]`
    Mod = 18,
    /// `reg[r] <- (reg[l] == reg[m])`
    Eql = 19,
    /// `reg[r] <- (reg[l] != reg[m])`
    Neq = 20,
    /// `reg[r] <- (reg[l] < reg[m])`
    Lss = 21,
    /// `reg[r] <- (reg[l] <= reg[m])`
    Leq = 22,
    /// `reg[r] <- (reg[l] > reg[m])`
    Gtr = 23,
    /// `reg[r] <- (reg[l] >= reg[m])`
    Geq = 24,
}

impl Op {
    /// Returns the numeric opcode.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Decodes a numeric opcode.
    pub fn from_code(code: i64) -> Option<Op> {
        Some(match code {
            1 => Op::Lit,
            2 => Op::Rtn,
            3 => Op::Lod,
            4 => Op::Sto,
            5 => Op::Cal,
            6 => Op::Inc,
            7 => Op::Jmp,
            8 => Op::Jpc,
            9 => Op::SioOut,
            10 => Op::SioIn,
            11 => Op::SioHalt,
            12 => Op::Neg,
            13 => Op::Add,
            14 => Op::Sub,
            15 => Op::Mul,
            16 => Op::Div,
            17 => Op::Odd,
            18 => Op::Mod,
            19 => Op::Eql,
            20 => Op::Neq,
            21 => Op::Lss,
            22 => Op::Leq,
            23 => Op::Gtr,
            24 => Op::Geq,
            _ => return None,
        })
    }

    /// Returns the assembly mnemonic used in listings and traces.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Lit => "LIT",
            Op::Rtn => "RTN",
            Op::Lod => "LOD",
            Op::Sto => "STO",
            Op::Cal => "CAL",
            Op::Inc => "INC",
            Op::Jmp => "JMP",
            Op::Jpc => "JPC",
            Op::SioOut | Op::SioIn | Op::SioHalt => "SIO",
            Op::Neg => "NEG",
            Op::Add => "ADD",
            Op::Sub => "SUB",
            Op::Mul => "MUL",
            Op::Div => "DIV",
            Op::Odd => "ODD",
            Op::Mod => "MOD",
            Op::Eql => "EQL",
            Op::Neq => "NEQ",
            Op::Lss => "LSS",
            Op::Leq => "LEQ",
            Op::Gtr => "GTR",
            Op::Geq => "GEQ",
        }
    }
}

/// One P-Machine instruction.
///
/// # Example
///
/// ```
/// use pzc_util::{Instruction, Op};
///
/// let i = Instruction::new(Op::Lit, 0, 0, 42);
/// assert_eq!(i.to_string(), "1 0 0 42");
/// assert_eq!("1 0 0 42".parse::<Instruction>(), Ok(i));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub op: Op,
    pub r: i64,
    pub l: i64,
    pub m: i64,
}

impl Instruction {
    /// Creates an instruction.
    pub fn new(op: Op, r: i64, l: i64, m: i64) -> Self {
        Self { op, r, l, m }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.op.code(), self.r, self.l, self.m)
    }
}

impl FromStr for Instruction {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<i64> = s
            .split_whitespace()
            .map(|w| w.parse::<i64>())
            .collect::<Result<_, _>>()
            .map_err(|_| CodeError::MalformedInstruction { line: 0 })?;
        if fields.len() != 4 {
            return Err(CodeError::MalformedInstruction { line: 0 });
        }
        let op = Op::from_code(fields[0]).ok_or(CodeError::InvalidOpcode(fields[0]))?;
        Ok(Instruction {
            op,
            r: fields[1],
            l: fields[2],
            m: fields[3],
        })
    }
}

/// Serializes an instruction stream in the persisted mcode form.
pub fn format_program(code: &[Instruction]) -> String {
    let mut out = String::new();
    for instruction in code {
        out.push_str(&instruction.to_string());
        out.push('\n');
    }
    out
}

/// Parses an instruction stream from its persisted mcode form.
///
/// Accepts one instruction per line; blank lines are skipped. The flat
/// whitespace-separated form the historical tools wrote (all integers on
/// one line) is accepted too, since the codec splits on any whitespace.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, CodeError> {
    let mut words = text.split_whitespace().map(|w| w.parse::<i64>());
    let mut code = Vec::new();
    loop {
        let first = match words.next() {
            None => break,
            Some(Ok(v)) => v,
            Some(Err(_)) => return Err(CodeError::MalformedInstruction { line: code.len() }),
        };
        let mut rest = [0i64; 3];
        for slot in rest.iter_mut() {
            *slot = words
                .next()
                .and_then(Result::ok)
                .ok_or(CodeError::MalformedInstruction { line: code.len() })?;
        }
        let op = Op::from_code(first).ok_or(CodeError::InvalidOpcode(first))?;
        code.push(Instruction::new(op, rest[0], rest[1], rest[2]));
    }
    Ok(code)
}
