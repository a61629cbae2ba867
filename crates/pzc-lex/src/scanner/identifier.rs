//! Identifier and reserved-word scanning.

use crate::error::LexError;
use crate::scanner::MAX_IDENTIFIER_LENGTH;
use crate::token::{reserved_word, Lexeme, Token};
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Scans a maximal letter/digit run starting at a letter.
    ///
    /// The run is first compared against the reserved-word set; only a
    /// non-reserved spelling is entered into the name table. The length
    /// limit applies to identifiers, not reserved words, but no reserved
    /// word is anywhere near 11 characters so the distinction never
    /// surfaces.
    pub(crate) fn scan_identifier(&mut self) -> Result<Lexeme, LexError> {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_alphanumeric() {
            self.cursor.advance();
        }

        let spelling = self.cursor.slice_from(start);

        if let Some(word) = reserved_word(spelling) {
            return Ok(Lexeme::plain(word));
        }

        if spelling.len() > MAX_IDENTIFIER_LENGTH {
            return Err(LexError::IdentifierTooLong);
        }

        let id = self.names.intern(spelling);
        Ok(Lexeme::named(Token::Ident, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_one(source: &str) -> Result<Lexeme, LexError> {
        let mut scanner = Scanner::new(source);
        scanner.scan_identifier()
    }

    #[test]
    fn test_simple_identifier() {
        let lexeme = scan_one("counter").unwrap();
        assert_eq!(lexeme.token, Token::Ident);
        assert!(lexeme.name.is_some());
    }

    #[test]
    fn test_identifier_with_digits() {
        let lexeme = scan_one("x1y2").unwrap();
        assert_eq!(lexeme.token, Token::Ident);
    }

    #[test]
    fn test_reserved_words() {
        for (source, token) in [
            ("odd", Token::Odd),
            ("begin", Token::Begin),
            ("end", Token::End),
            ("if", Token::If),
            ("then", Token::Then),
            ("while", Token::While),
            ("do", Token::Do),
            ("call", Token::Call),
            ("const", Token::Const),
            ("var", Token::Var),
            ("procedure", Token::Procedure),
            ("write", Token::Write),
            ("read", Token::Read),
            ("else", Token::Else),
        ] {
            let lexeme = scan_one(source).unwrap();
            assert_eq!(lexeme.token, token, "for {source}");
            assert_eq!(lexeme.name, None);
        }
    }

    #[test]
    fn test_reserved_prefix_is_identifier() {
        let lexeme = scan_one("ends").unwrap();
        assert_eq!(lexeme.token, Token::Ident);
    }

    #[test]
    fn test_length_boundary() {
        // Exactly 11 characters: accepted.
        assert_eq!(scan_one("abcdefghijk").unwrap().token, Token::Ident);
        // 12 characters: rejected.
        assert_eq!(
            scan_one("abcdefghijkl"),
            Err(LexError::IdentifierTooLong)
        );
    }

    #[test]
    fn test_same_spelling_same_index() {
        let mut scanner = Scanner::new("abc abc");
        let a = scanner.next_lexeme().unwrap().unwrap();
        let b = scanner.next_lexeme().unwrap().unwrap();
        assert_eq!(a.name, b.name);
    }
}
