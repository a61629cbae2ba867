//! The fetch-decode-execute core.

use std::io::{BufRead, Write};

use pzc_util::{Instruction, Op, MAX_CODE_LENGTH, MAX_STACK_HEIGHT, NUM_REGISTERS};

use crate::error::ExecError;
use crate::trace;

/// The P-Machine.
///
/// Two memory stores: `stack`, holding activation records and locals as a
/// flat integer array, and `code`, holding the loaded instructions. The
/// CPU state is the program counter, base pointer, stack pointer, and a
/// bank of 16 general-purpose registers.
///
/// The machine starts with `bp = 1`, `sp = 0`, `pc = 0` and a
/// zero-initialized stack. A `RTN` in the outermost frame therefore
/// restores all three to 0, which is the halt condition; `SIO 0,0,3`
/// halts explicitly.
pub struct Machine {
    code: Vec<Instruction>,
    stack: Vec<i64>,
    registers: [i64; NUM_REGISTERS],
    pc: i64,
    bp: i64,
    sp: i64,
    halted: bool,
    /// First stack cell of each called activation record, innermost last.
    /// Maintained by `CAL`/`RTN` for the trace's record separators.
    record_bounds: Vec<i64>,
}

impl Machine {
    /// Loads an instruction stream.
    ///
    /// Fails with `CodeTooLong` when the stream exceeds the machine's
    /// code store.
    pub fn load(code: Vec<Instruction>) -> Result<Self, ExecError> {
        if code.len() > MAX_CODE_LENGTH {
            return Err(ExecError::CodeTooLong(code.len()));
        }
        Ok(Self {
            code,
            stack: vec![0; MAX_STACK_HEIGHT + 1],
            registers: [0; NUM_REGISTERS],
            pc: 0,
            bp: 1,
            sp: 0,
            halted: false,
            record_bounds: Vec::new(),
        })
    }

    /// Runs the loaded program to completion.
    ///
    /// `input` satisfies `SIO r,0,2`, `output` receives `SIO r,0,1`
    /// lines, and `trace` receives the code listing followed by one state
    /// line per executed instruction. Pass [`std::io::sink`] as `trace`
    /// to discard it.
    pub fn run(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
        trace: &mut dyn Write,
    ) -> Result<(), ExecError> {
        trace::write_code_listing(trace, &self.code)?;
        trace::write_state_header(trace)?;
        trace::write_initial_state(trace, self)?;

        while !self.halted {
            let line = self.pc;
            let ir = self.fetch()?;
            self.pc += 1;

            self.execute(ir, input, output)?;

            trace::write_state_line(trace, line, ir, self)?;

            // Returning from the outermost frame restores the three
            // zero-initialized linkage cells; that state is the halt.
            if self.sp == 0 && self.bp == 0 && self.pc == 0 {
                self.halted = true;
            }
        }

        Ok(())
    }

    fn fetch(&self) -> Result<Instruction, ExecError> {
        usize::try_from(self.pc)
            .ok()
            .and_then(|pc| self.code.get(pc))
            .copied()
            .ok_or(ExecError::PcOutOfRange(self.pc))
    }

    fn execute(
        &mut self,
        ir: Instruction,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> Result<(), ExecError> {
        match ir.op {
            Op::Lit => self.set_reg(ir.r, ir.m)?,
            Op::Rtn => {
                self.sp = self.bp - 1;
                self.bp = self.stack_at(self.sp + 3)?;
                self.pc = self.stack_at(self.sp + 4)?;
                self.record_bounds.pop();
            }
            Op::Lod => {
                let address = self.base(ir.l)? + ir.m;
                let value = self.stack_at(address)?;
                self.set_reg(ir.r, value)?;
            }
            Op::Sto => {
                let address = self.base(ir.l)? + ir.m;
                let value = self.reg(ir.r)?;
                self.set_stack(address, value)?;
            }
            Op::Cal => {
                if self.sp + 4 > MAX_STACK_HEIGHT as i64 {
                    return Err(ExecError::StackOverflow);
                }
                let static_link = self.base(ir.l)?;
                self.set_stack(self.sp + 1, 0)?;
                self.set_stack(self.sp + 2, static_link)?;
                self.set_stack(self.sp + 3, self.bp)?;
                self.set_stack(self.sp + 4, self.pc)?;
                self.record_bounds.push(self.sp + 1);
                self.bp = self.sp + 1;
                self.pc = ir.m;
            }
            Op::Inc => {
                self.sp += ir.m;
                if self.sp > MAX_STACK_HEIGHT as i64 {
                    return Err(ExecError::StackOverflow);
                }
            }
            Op::Jmp => self.pc = ir.m,
            Op::Jpc => {
                if self.reg(ir.r)? == 0 {
                    self.pc = ir.m;
                }
            }
            Op::SioOut => {
                let value = self.reg(ir.r)?;
                writeln!(output, "{value}")?;
            }
            Op::SioIn => {
                let value = read_integer(input)?;
                self.set_reg(ir.r, value)?;
            }
            Op::SioHalt => self.halted = true,
            Op::Neg => {
                let value = self.reg(ir.l)?;
                self.set_reg(ir.r, value.wrapping_neg())?;
            }
            Op::Add => self.binary(ir, i64::wrapping_add)?,
            Op::Sub => self.binary(ir, i64::wrapping_sub)?,
            Op::Mul => self.binary(ir, i64::wrapping_mul)?,
            Op::Div => {
                let divisor = self.reg(ir.m)?;
                if divisor == 0 {
                    return Err(ExecError::DivisionByZero);
                }
                let dividend = self.reg(ir.l)?;
                self.set_reg(ir.r, dividend.wrapping_div(divisor))?;
            }
            Op::Odd => {
                let value = self.reg(ir.l)?;
                self.set_reg(ir.r, value % 2)?;
            }
            Op::Mod => {
                let divisor = self.reg(ir.m)?;
                if divisor == 0 {
                    return Err(ExecError::DivisionByZero);
                }
                let dividend = self.reg(ir.l)?;
                self.set_reg(ir.r, dividend.wrapping_rem(divisor))?;
            }
            Op::Eql => self.compare(ir, |a, b| a == b)?,
            Op::Neq => self.compare(ir, |a, b| a != b)?,
            Op::Lss => self.compare(ir, |a, b| a < b)?,
            Op::Leq => self.compare(ir, |a, b| a <= b)?,
            Op::Gtr => self.compare(ir, |a, b| a > b)?,
            Op::Geq => self.compare(ir, |a, b| a >= b)?,
        }
        Ok(())
    }

    fn binary(&mut self, ir: Instruction, apply: fn(i64, i64) -> i64) -> Result<(), ExecError> {
        let left = self.reg(ir.l)?;
        let right = self.reg(ir.m)?;
        self.set_reg(ir.r, apply(left, right))
    }

    fn compare(&mut self, ir: Instruction, apply: fn(i64, i64) -> bool) -> Result<(), ExecError> {
        let left = self.reg(ir.l)?;
        let right = self.reg(ir.m)?;
        self.set_reg(ir.r, apply(left, right) as i64)
    }

    /// Walks `hops` static links from the current frame.
    fn base(&self, hops: i64) -> Result<i64, ExecError> {
        let mut b = self.bp;
        let mut remaining = hops;
        while remaining > 0 {
            b = self.stack_at(b + 1)?;
            remaining -= 1;
        }
        Ok(b)
    }

    fn reg(&self, index: i64) -> Result<i64, ExecError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.registers.get(i))
            .copied()
            .ok_or(ExecError::RegisterOutOfRange(index))
    }

    fn set_reg(&mut self, index: i64, value: i64) -> Result<(), ExecError> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.registers.get_mut(i))
            .ok_or(ExecError::RegisterOutOfRange(index))?;
        *slot = value;
        Ok(())
    }

    fn stack_at(&self, index: i64) -> Result<i64, ExecError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.stack.get(i))
            .copied()
            .ok_or(ExecError::StackOutOfRange(index))
    }

    fn set_stack(&mut self, index: i64, value: i64) -> Result<(), ExecError> {
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.stack.get_mut(i))
            .ok_or(ExecError::StackOutOfRange(index))?;
        *slot = value;
        Ok(())
    }

    // Trace accessors.

    pub(crate) fn pc(&self) -> i64 {
        self.pc
    }

    pub(crate) fn bp(&self) -> i64 {
        self.bp
    }

    pub(crate) fn sp(&self) -> i64 {
        self.sp
    }

    pub(crate) fn stack_cell(&self, index: i64) -> i64 {
        self.stack_at(index).unwrap_or(0)
    }

    pub(crate) fn record_bounds(&self) -> &[i64] {
        &self.record_bounds
    }
}

/// Reads one whitespace-delimited signed decimal integer.
fn read_integer(input: &mut dyn BufRead) -> Result<i64, ExecError> {
    // Skip leading whitespace.
    loop {
        let buffer = input.fill_buf()?;
        if buffer.is_empty() {
            return Err(ExecError::InputExhausted);
        }
        let skipped = buffer
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();
        let more = skipped == buffer.len();
        input.consume(skipped);
        if !more {
            break;
        }
    }

    // Collect the token up to the next whitespace.
    let mut word = String::new();
    loop {
        let buffer = input.fill_buf()?;
        if buffer.is_empty() {
            break;
        }
        let taken = buffer
            .iter()
            .take_while(|b| !b.is_ascii_whitespace())
            .count();
        word.push_str(
            std::str::from_utf8(&buffer[..taken])
                .map_err(|_| ExecError::MalformedInput(String::from("<non-ascii>")))?,
        );
        let more = taken == buffer.len();
        input.consume(taken);
        if !more {
            break;
        }
    }

    word.parse::<i64>()
        .map_err(|_| ExecError::MalformedInput(word))
}
