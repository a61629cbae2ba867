//! Token definitions and the lexeme-list codec.
//!
//! Tokens carry the traditional PL/0 integer codes so the persisted
//! lexeme-list form is bit-compatible with the historical tools: a list of
//! decimal token codes in which every `Ident` (2) and `Number` (3) is
//! immediately followed by its name-table index.

use pzc_util::{NameId, NameTable};
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// A classified lexical unit.
///
/// The discriminants are the token codes of the persisted form. `Null` is
/// a sentinel only: the scanner never emits it, and the parser sees it
/// when it reads past the end of the lexeme stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Token {
    /// Sentinel; never produced by scanning.
    Null = 1,
    /// Identifier; the lexeme carries a name-table index.
    Ident = 2,
    /// Number literal; the lexeme carries a name-table index.
    Number = 3,
    /// `+`
    Plus = 4,
    /// `-`
    Minus = 5,
    /// `*`
    Mult = 6,
    /// `/`
    Slash = 7,
    /// `odd`
    Odd = 8,
    /// `=`
    Eql = 9,
    /// `<>`
    Neq = 10,
    /// `<`
    Lss = 11,
    /// `<=`
    Leq = 12,
    /// `>`
    Gtr = 13,
    /// `>=`
    Geq = 14,
    /// `(`
    LParen = 15,
    /// `)`
    RParen = 16,
    /// `,`
    Comma = 17,
    /// `;`
    Semicolon = 18,
    /// `.`
    Period = 19,
    /// `:=`
    Becomes = 20,
    /// `begin`
    Begin = 21,
    /// `end`
    End = 22,
    /// `if`
    If = 23,
    /// `then`
    Then = 24,
    /// `while`
    While = 25,
    /// `do`
    Do = 26,
    /// `call`
    Call = 27,
    /// `const`
    Const = 28,
    /// `var`
    Var = 29,
    /// `procedure`
    Procedure = 30,
    /// `write`
    Write = 31,
    /// `read`
    Read = 32,
    /// `else`
    Else = 33,
}

impl Token {
    /// Returns the traditional integer code of the token.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Null => "<null>",
            Token::Ident => "identifier",
            Token::Number => "number",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Mult => "*",
            Token::Slash => "/",
            Token::Odd => "odd",
            Token::Eql => "=",
            Token::Neq => "<>",
            Token::Lss => "<",
            Token::Leq => "<=",
            Token::Gtr => ">",
            Token::Geq => ">=",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Period => ".",
            Token::Becomes => ":=",
            Token::Begin => "begin",
            Token::End => "end",
            Token::If => "if",
            Token::Then => "then",
            Token::While => "while",
            Token::Do => "do",
            Token::Call => "call",
            Token::Const => "const",
            Token::Var => "var",
            Token::Procedure => "procedure",
            Token::Write => "write",
            Token::Read => "read",
            Token::Else => "else",
        };
        f.write_str(text)
    }
}

/// Looks up a letter-run spelling in the reserved-word set.
///
/// Returns the word's token if the spelling is reserved, `None` if it is
/// an ordinary identifier.
pub fn reserved_word(spelling: &str) -> Option<Token> {
    static WORDS: OnceLock<FxHashMap<&'static str, Token>> = OnceLock::new();
    let words = WORDS.get_or_init(|| {
        let mut map = FxHashMap::default();
        map.insert("odd", Token::Odd);
        map.insert("begin", Token::Begin);
        map.insert("end", Token::End);
        map.insert("if", Token::If);
        map.insert("then", Token::Then);
        map.insert("while", Token::While);
        map.insert("do", Token::Do);
        map.insert("call", Token::Call);
        map.insert("const", Token::Const);
        map.insert("var", Token::Var);
        map.insert("procedure", Token::Procedure);
        map.insert("write", Token::Write);
        map.insert("read", Token::Read);
        map.insert("else", Token::Else);
        map
    });
    words.get(spelling).copied()
}

/// A token plus, for `Ident` and `Number`, the index of its spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexeme {
    pub token: Token,
    pub name: Option<NameId>,
}

impl Lexeme {
    /// A lexeme with no associated spelling.
    pub fn plain(token: Token) -> Self {
        Self { token, name: None }
    }

    /// An `Ident` or `Number` lexeme carrying its spelling index.
    pub fn named(token: Token, name: NameId) -> Self {
        Self {
            token,
            name: Some(name),
        }
    }
}

/// Serializes a lexeme stream in its persisted form: whitespace-separated
/// decimal token codes, with `Ident` and `Number` immediately followed by
/// their name-table index.
pub fn lexeme_list_string(lexemes: &[Lexeme]) -> String {
    let mut words = Vec::new();
    for lexeme in lexemes {
        words.push(lexeme.token.code().to_string());
        if let Some(name) = lexeme.name {
            words.push(name.to_string());
        }
    }
    words.join(" ")
}

/// Pretty-prints a lexeme stream as source-shaped text, one token per
/// space. Scanning the result reproduces the same token stream.
pub fn pretty_print(lexemes: &[Lexeme], names: &NameTable) -> String {
    lexemes
        .iter()
        .map(|lexeme| match lexeme.name {
            Some(id) => names.get(id).to_owned(),
            None => lexeme.token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_codes() {
        assert_eq!(Token::Null.code(), 1);
        assert_eq!(Token::Ident.code(), 2);
        assert_eq!(Token::Number.code(), 3);
        assert_eq!(Token::Becomes.code(), 20);
        assert_eq!(Token::Else.code(), 33);
    }

    #[test]
    fn test_reserved_words() {
        assert_eq!(reserved_word("begin"), Some(Token::Begin));
        assert_eq!(reserved_word("procedure"), Some(Token::Procedure));
        assert_eq!(reserved_word("odd"), Some(Token::Odd));
        assert_eq!(reserved_word("x"), None);
        assert_eq!(reserved_word("Begin"), None);
        assert_eq!(reserved_word("beginx"), None);
    }

    #[test]
    fn test_lexeme_list_string() {
        let mut names = NameTable::new();
        let x = names.intern("x");
        let five = names.intern("5");
        let lexemes = vec![
            Lexeme::plain(Token::Var),
            Lexeme::named(Token::Ident, x),
            Lexeme::plain(Token::Semicolon),
            Lexeme::named(Token::Number, five),
        ];
        assert_eq!(lexeme_list_string(&lexemes), "29 2 0 18 3 1");
    }

    #[test]
    fn test_pretty_print() {
        let mut names = NameTable::new();
        let x = names.intern("x");
        let lexemes = vec![
            Lexeme::named(Token::Ident, x),
            Lexeme::plain(Token::Becomes),
            Lexeme::named(Token::Ident, x),
            Lexeme::plain(Token::Plus),
        ];
        assert_eq!(pretty_print(&lexemes, &names), "x := x +");
    }
}
