//! Execution trace formatting.
//!
//! The trace opens with a disassembled code listing, then records one
//! line per executed instruction: the instruction's code line, mnemonic
//! and operands, the post-execution `pc`/`bp`/`sp`, and the live stack
//! cells `1..=sp`. A `|` separates consecutive activation records; the
//! machine tracks record boundaries at `CAL` and `RTN`.

use std::io::Write;

use pzc_util::Instruction;

use crate::machine::Machine;

/// Writes the disassembled code listing.
pub(crate) fn write_code_listing(
    sink: &mut dyn Write,
    code: &[Instruction],
) -> std::io::Result<()> {
    writeln!(sink, "line\tOP\tR\tL\tM")?;
    for (line, instruction) in code.iter().enumerate() {
        writeln!(
            sink,
            "{line}\t{}\t{}\t{}\t{}",
            instruction.op.mnemonic(),
            instruction.r,
            instruction.l,
            instruction.m
        )?;
    }
    writeln!(sink)
}

/// Writes the column header for the state lines.
pub(crate) fn write_state_header(sink: &mut dyn Write) -> std::io::Result<()> {
    writeln!(sink, "\t\t\t\t\tPC\tBP\tSP\tstack")
}

/// Writes the pre-execution state line.
pub(crate) fn write_initial_state(
    sink: &mut dyn Write,
    machine: &Machine,
) -> std::io::Result<()> {
    writeln!(
        sink,
        "Initial values\t\t\t\t\t{}\t{}\t{}\t",
        machine.pc(),
        machine.bp(),
        machine.sp()
    )
}

/// Writes the state line for one executed instruction.
pub(crate) fn write_state_line(
    sink: &mut dyn Write,
    line: i64,
    ir: Instruction,
    machine: &Machine,
) -> std::io::Result<()> {
    write!(
        sink,
        "{line}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
        ir.op.mnemonic(),
        ir.r,
        ir.l,
        ir.m,
        machine.pc(),
        machine.bp(),
        machine.sp()
    )?;

    for cell in 1..=machine.sp() {
        if cell > 1 && machine.record_bounds().contains(&cell) {
            write!(sink, "| ")?;
        }
        write!(sink, "{} ", machine.stack_cell(cell))?;
    }
    writeln!(sink)
}
