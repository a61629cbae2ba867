//! Lexical error definitions.
//!
//! Every lexical error is fatal and carries the traditional PL/0 error
//! number in its fixed diagnostic sentence. Scanning stops at the first
//! error; no downstream phase runs.

use thiserror::Error;

/// A fatal lexical error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A number literal longer than 5 digits.
    #[error("Error 17. This number is too large.")]
    NumberTooLarge,

    /// An identifier longer than 11 characters.
    #[error("Error 19. Variable name is too long.")]
    IdentifierTooLong,

    /// A character that starts no token.
    #[error("Error 20. Invalid symbol.")]
    InvalidSymbol(char),

    /// A `/*` comment with no closing `*/` before end of input.
    #[error("Error 21. No end to comments. */ required.")]
    UnterminatedComment,

    /// A digit run terminated by a letter, e.g. `123abc`.
    #[error("Error 22. Variable does not start with a letter.")]
    IdentifierStartsWithDigit,
}
