//! Number scanning.

use crate::error::LexError;
use crate::scanner::MAX_NUMBER_LENGTH;
use crate::token::{Lexeme, Token};
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Scans a maximal digit run starting at a digit.
    ///
    /// A letter immediately after the run rejects the whole token
    /// (`123abc` is not "number then identifier"); that check precedes
    /// the length check, so `123456abc` reports the malformed-identifier
    /// error rather than the oversized-number one.
    pub(crate) fn scan_number(&mut self) -> Result<Lexeme, LexError> {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char().is_ascii_alphabetic() {
            return Err(LexError::IdentifierStartsWithDigit);
        }

        let spelling = self.cursor.slice_from(start);

        if spelling.len() > MAX_NUMBER_LENGTH {
            return Err(LexError::NumberTooLarge);
        }

        let id = self.names.intern(spelling);
        Ok(Lexeme::named(Token::Number, id))
    }
}
