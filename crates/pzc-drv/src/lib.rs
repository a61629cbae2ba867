//! pzc-drv - Compiler Driver
//!
//! ============================================================================
//! PIPELINE ORCHESTRATION
//! ============================================================================
//!
//! The driver is the entry point for the whole toolchain. It owns:
//!
//! 1. COMMAND LINE PARSING
//!    One source file plus the historical diagnostic directives:
//!    `-l` lexeme list and name table, `-a` generated assembly,
//!    `-v` VM execution trace, and `--artifacts <dir>` to persist the
//!    intermediate files in their on-disk formats.
//!
//! 2. PHASE SEQUENCING
//!    ```text
//!    Source (.p0)
//!         |
//!         v
//!    [Scanner]  -> lexeme stream + name table
//!         |
//!         v
//!    [Parser/CodeGen] -> instruction stream
//!         |
//!         v
//!    [P-Machine] -> program output + execution trace
//!    ```
//!    Each phase fully materializes its output before the next starts.
//!    The first error in any phase stops the pipeline; nothing after it
//!    runs.
//!
//! 3. EXIT STATUS
//!    0 for a clean end-to-end run, nonzero for any fatal error. The
//!    fixed diagnostic sentence of the failing phase is printed once.
//!
//! The execution trace is buffered in memory and flushed to `-v` output
//! and the artifacts directory even when the machine faults, so the trace
//! up to the failing instruction is always preserved.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use pzc_lex::token::{lexeme_list_string, Lexeme};
use pzc_util::{format_program, Instruction, NameTable};

/// PL/0 compiler and P-Machine.
#[derive(Debug, Parser)]
#[command(name = "pzc", version, about = "Compile and run a PL/0 program")]
pub struct Cli {
    /// PL/0 source file.
    pub input: PathBuf,

    /// Print the lexeme list and name table after scanning.
    #[arg(short = 'l', long = "lexemes")]
    pub print_lexemes: bool,

    /// Print the generated assembly.
    #[arg(short = 'a', long = "assembly")]
    pub print_assembly: bool,

    /// Print the execution trace after the program runs.
    #[arg(short = 'v', long = "trace")]
    pub print_trace: bool,

    /// Persist lexemelist.txt, nametable.txt, mcode.txt, and
    /// stacktrace.txt into this directory.
    #[arg(long = "artifacts", value_name = "DIR")]
    pub artifacts: Option<PathBuf>,
}

/// Parses the command line and runs the pipeline.
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

/// Runs scan, compile, and execute for one source file.
pub fn run(cli: &Cli) -> Result<()> {
    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("unable to open {}", cli.input.display()))?;

    let (lexemes, names) = pzc_lex::scan(&source)?;
    tracing::debug!(lexemes = lexemes.len(), names = names.len(), "scan complete");

    let code = pzc_par::compile(&lexemes, &names)?;
    tracing::debug!(instructions = code.len(), "code generation complete");
    eprintln!("No errors, program is syntactically correct.");

    if let Some(dir) = &cli.artifacts {
        persist_front_end(dir, &lexemes, &names, &code)?;
    }

    if cli.print_lexemes {
        println!("{}", lexeme_list_string(&lexemes));
        println!("{}", names.to_table_string());
    }

    if cli.print_assembly {
        print!("{}", format_program(&code));
    }

    let trace = execute_program(cli, code)?;

    if cli.print_trace {
        io::stdout().write_all(&trace)?;
    }

    Ok(())
}

/// Runs the P-Machine against real stdin/stdout, preserving the trace
/// even when execution faults.
fn execute_program(cli: &Cli, code: Vec<Instruction>) -> Result<Vec<u8>> {
    let mut trace = Vec::new();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = {
        let mut input = stdin.lock();
        let mut output = stdout.lock();
        pzc_vm::execute(code, &mut input, &mut output, &mut trace)
    };
    tracing::debug!(faulted = result.is_err(), "execution finished");

    if let Some(dir) = &cli.artifacts {
        fs::write(dir.join("stacktrace.txt"), &trace)
            .with_context(|| format!("unable to write {}/stacktrace.txt", dir.display()))?;
    }

    if result.is_err() && cli.print_trace {
        // The run directive still gets the partial trace on a fault.
        io::stdout().write_all(&trace)?;
    }

    result?;
    Ok(trace)
}

/// Writes the scanner and parser artifacts in their on-disk formats.
fn persist_front_end(
    dir: &Path,
    lexemes: &[Lexeme],
    names: &NameTable,
    code: &[Instruction],
) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("unable to create {}", dir.display()))?;
    fs::write(dir.join("lexemelist.txt"), lexeme_list_string(lexemes))?;
    fs::write(dir.join("nametable.txt"), names.to_table_string())?;
    fs::write(dir.join("mcode.txt"), format_program(code))?;
    Ok(())
}
