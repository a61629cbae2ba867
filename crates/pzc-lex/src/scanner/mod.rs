//! The scanner proper.
//!
//! [`Scanner`] owns the cursor and the name table under construction. Its
//! implementation is split by character class: dispatch in `core`,
//! identifier/reserved-word scanning in `identifier`, number scanning in
//! `number`, punctuation in `operator`, comment elision in `comment`.

mod comment;
mod core;
mod identifier;
mod number;
mod operator;

use crate::cursor::Cursor;
use pzc_util::NameTable;

/// Maximum identifier length in characters.
pub const MAX_IDENTIFIER_LENGTH: usize = 11;

/// Maximum number length in digits.
pub const MAX_NUMBER_LENGTH: usize = 5;

/// Scanner for PL/0 source text.
///
/// Produces one lexeme per call to [`Scanner::next_lexeme`] and
/// accumulates identifier/number spellings in its name table. The usual
/// entry point is the crate-level [`scan`](crate::scan) function, which
/// drives the scanner to the end of input.
pub struct Scanner<'a> {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// Name table under construction.
    pub(crate) names: NameTable,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            names: NameTable::new(),
        }
    }

    /// Consumes the scanner, yielding the completed name table.
    pub fn into_names(self) -> NameTable {
        self.names
    }
}
