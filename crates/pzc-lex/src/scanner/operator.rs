//! Punctuation and operator scanning.

use crate::error::LexError;
use crate::token::{Lexeme, Token};
use crate::Scanner;

impl<'a> Scanner<'a> {
    /// Scans a punctuation token with one character of lookahead.
    ///
    /// Maximal munch: `<` becomes `<=` or `<>` when the next character
    /// completes the pair, `>` becomes `>=`, and `:` is only legal as
    /// `:=`. Comment openers never reach this method; the dispatch loop
    /// consumes them first.
    pub(crate) fn scan_operator(&mut self) -> Result<Lexeme, LexError> {
        let c = self.cursor.current_char();
        self.cursor.advance();

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Mult,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '=' => Token::Eql,
            ',' => Token::Comma,
            '.' => Token::Period,
            ';' => Token::Semicolon,
            '<' => {
                if self.cursor.match_char('=') {
                    Token::Leq
                } else if self.cursor.match_char('>') {
                    Token::Neq
                } else {
                    Token::Lss
                }
            }
            '>' => {
                if self.cursor.match_char('=') {
                    Token::Geq
                } else {
                    Token::Gtr
                }
            }
            ':' => {
                if self.cursor.match_char('=') {
                    Token::Becomes
                } else {
                    return Err(LexError::InvalidSymbol(':'));
                }
            }
            other => return Err(LexError::InvalidSymbol(other)),
        };

        Ok(Lexeme::plain(token))
    }
}
