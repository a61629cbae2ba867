//! pzc-util - Shared Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the types that cross phase boundaries in the pzc
//! pipeline. The phases are strictly sequential (scanner, then parser /
//! code generator, then P-Machine), and each phase fully materializes its
//! output before the next phase starts, so everything in here is plain
//! owned data with no interior mutability and no synchronization.
//!
//! CONTENTS:
//! ---------
//! 1. NAME TABLE
//!    A deduplicating, insertion-ordered table of identifier and number
//!    spellings. The scanner builds it; every later phase only reads it.
//!    Tokens refer to spellings by dense integer index ([`NameId`]).
//!
//! 2. INSTRUCTION SET
//!    The P-Machine ISA shared between the code generator (producer) and
//!    the virtual machine (consumer): [`Op`], [`Instruction`], the machine
//!    limits, and the text codec for persisted instruction files.
//!
//! The name table plays the role a string interner plays in a larger
//! compiler: O(1) handle comparison and a single owned copy of every
//! spelling. Because the pipeline is single-threaded, the table is an
//! ordinary value handed from phase to phase rather than a global.

pub mod error;
pub mod isa;
pub mod names;

pub use error::CodeError;
pub use isa::{
    format_program, parse_program, Instruction, Op, MAX_CODE_LENGTH, MAX_LEXI_LEVELS,
    MAX_STACK_HEIGHT, NUM_REGISTERS,
};
pub use names::{NameId, NameTable};
