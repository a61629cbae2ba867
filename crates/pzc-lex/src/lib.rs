//! pzc-lex - Lexical Analyzer (Scanner)
//!
//! ============================================================================
//! SCANNING OVERVIEW
//! ============================================================================
//!
//! The scanner is the first phase of the pipeline. It transforms PL/0
//! source text into a stream of lexemes plus a name table of identifier
//! and number spellings.
//!
//! Source: "const a = 5;"
//!
//! Lexemes: [Const] [Ident -> "a"] [Eql] [Number -> "5"] [Semicolon]
//!          where -> is an index into the name table
//!
//! The scanner is a deterministic finite-state machine, direct-coded:
//! dispatch on the first non-whitespace character, then consume the
//! maximal run that character class admits.
//!
//! CLASSIFICATION:
//! ---------------
//! - Letter start  -> identifier or reserved word (maximal letter/digit run)
//! - Digit start   -> number (maximal digit run; a trailing letter is an
//!                    error, so `123abc` is rejected at scan time)
//! - Punctuation   -> single- or two-character operator, with one character
//!                    of lookahead for `:=`, `<=`, `<>`, `>=`, and `/*`
//!
//! Comments are `/* ... */`, elided between tokens; they never nest and
//! never produce a lexeme. Whitespace is insignificant except as a token
//! separator.
//!
//! LIMITS:
//! -------
//! Identifiers are at most 11 characters and numbers at most 5 digits.
//! Violations are fatal, as is any byte that starts no token.
//!
//! All of the scanner's output is materialized before the parser starts:
//! [`scan`] returns the full lexeme vector and the completed, thereafter
//! read-only name table.

pub mod cursor;
pub mod error;
pub mod scanner;
pub mod token;

pub use cursor::Cursor;
pub use error::LexError;
pub use scanner::Scanner;
pub use token::{reserved_word, Lexeme, Token};

#[cfg(test)]
mod edge_cases;

use pzc_util::NameTable;

/// Scans a complete source text.
///
/// Returns the lexeme stream and the name table it indexes into, or the
/// first lexical error. There is no error recovery: scanning stops at the
/// first offending character.
///
/// # Example
///
/// ```
/// use pzc_lex::{scan, Token};
///
/// let (lexemes, names) = scan("var x; begin x := 3 end.").unwrap();
/// assert_eq!(lexemes[0].token, Token::Var);
/// assert_eq!(names.get(lexemes[1].name.unwrap()), "x");
/// ```
pub fn scan(source: &str) -> Result<(Vec<Lexeme>, NameTable), LexError> {
    let mut scanner = Scanner::new(source);
    let mut lexemes = Vec::new();
    while let Some(lexeme) = scanner.next_lexeme()? {
        lexemes.push(lexeme);
    }
    Ok((lexemes, scanner.into_names()))
}
