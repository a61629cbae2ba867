//! Scanner dispatch loop.

use crate::error::LexError;
use crate::token::Lexeme;
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Returns the next lexeme, or `None` at end of input.
    ///
    /// Skips whitespace and comments, then dispatches on the first
    /// character of the token: letters start identifiers and reserved
    /// words, digits start numbers, everything else is punctuation.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>, LexError> {
        loop {
            self.cursor.skip_whitespace();

            if self.cursor.is_at_end() {
                return Ok(None);
            }

            if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '*' {
                self.skip_comment()?;
                continue;
            }

            break;
        }

        let c = self.cursor.current_char();
        let lexeme = if c.is_ascii_alphabetic() {
            self.scan_identifier()?
        } else if c.is_ascii_digit() {
            self.scan_number()?
        } else {
            self.scan_operator()?
        };

        Ok(Some(lexeme))
    }
}
