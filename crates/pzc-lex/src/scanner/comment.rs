//! Comment elision.

use crate::error::LexError;
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Skips a `/* ... */` comment.
    ///
    /// Called with the cursor on the opening `/`. Comments do not nest:
    /// the first `*/` closes the comment regardless of any `/*` inside.
    pub(crate) fn skip_comment(&mut self) -> Result<(), LexError> {
        // Consume "/*".
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() {
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                return Ok(());
            }
            self.cursor.advance();
        }

        Err(LexError::UnterminatedComment)
    }
}
