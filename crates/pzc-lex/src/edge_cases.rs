//! Edge case tests for pzc-lex.

use crate::token::{lexeme_list_string, pretty_print};
use crate::{scan, LexError, Token};

fn tokens_of(source: &str) -> Vec<Token> {
    let (lexemes, _) = scan(source).unwrap();
    lexemes.into_iter().map(|l| l.token).collect()
}

// ==================== EDGE CASES ====================

#[test]
fn test_edge_empty_source() {
    let (lexemes, names) = scan("").unwrap();
    assert!(lexemes.is_empty());
    assert!(names.is_empty());
}

#[test]
fn test_edge_whitespace_only() {
    let (lexemes, _) = scan(" \t \r\n ").unwrap();
    assert!(lexemes.is_empty());
}

#[test]
fn test_edge_full_program() {
    let tokens = tokens_of("const a = 5; var b; begin b := a + 3; write b end.");
    assert_eq!(
        tokens,
        vec![
            Token::Const,
            Token::Ident,
            Token::Eql,
            Token::Number,
            Token::Semicolon,
            Token::Var,
            Token::Ident,
            Token::Semicolon,
            Token::Begin,
            Token::Ident,
            Token::Becomes,
            Token::Ident,
            Token::Plus,
            Token::Number,
            Token::Semicolon,
            Token::Write,
            Token::Ident,
            Token::End,
            Token::Period,
        ]
    );
}

#[test]
fn test_edge_name_table_dedup_across_kinds() {
    let (lexemes, names) = scan("x 5 x 5 y").unwrap();
    // x, 5, y: three distinct spellings in first-occurrence order.
    assert_eq!(names.len(), 3);
    let ids: Vec<_> = lexemes.iter().map(|l| l.name.unwrap().index()).collect();
    assert_eq!(ids, vec![0, 1, 0, 1, 2]);
}

#[test]
fn test_edge_no_whitespace_needed_around_punctuation() {
    let tokens = tokens_of("b:=a+3;");
    assert_eq!(
        tokens,
        vec![
            Token::Ident,
            Token::Becomes,
            Token::Ident,
            Token::Plus,
            Token::Number,
            Token::Semicolon,
        ]
    );
}

#[test]
fn test_edge_digit_start_identifier_rejected() {
    assert_eq!(scan("1abc"), Err(LexError::IdentifierStartsWithDigit));
}

#[test]
fn test_edge_error_stops_scanning() {
    // The valid prefix does not leak out when a later token is invalid.
    assert!(scan("var x; ?").is_err());
}

#[test]
fn test_edge_comment_at_every_gap() {
    let tokens = tokens_of("/*a*/begin/*b*/x/*c*/:=/*d*/1/*e*/end/*f*/.");
    assert_eq!(
        tokens,
        vec![
            Token::Begin,
            Token::Ident,
            Token::Becomes,
            Token::Number,
            Token::End,
            Token::Period,
        ]
    );
}

#[test]
fn test_edge_lexeme_list_matches_historical_form() {
    let (lexemes, _) = scan("var x; x := 3.").unwrap();
    assert_eq!(lexeme_list_string(&lexemes), "29 2 0 18 2 0 20 3 1 19");
}

#[test]
fn test_edge_pretty_print_rescans_identically() {
    let source = "const a = 5; var b, c; begin b := (a + 3) * c; write b end.";
    let (lexemes, names) = scan(source).unwrap();
    let printed = pretty_print(&lexemes, &names);
    let (rescanned, _) = scan(&printed).unwrap();
    let original: Vec<Token> = lexemes.iter().map(|l| l.token).collect();
    let round_tripped: Vec<Token> = rescanned.iter().map(|l| l.token).collect();
    assert_eq!(original, round_tripped);
}

// ==================== PROPERTIES ====================

mod properties {
    use super::*;
    use proptest::prelude::*;

    fn ident_strategy() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,10}".prop_filter("not reserved", |s| {
            crate::reserved_word(s).is_none()
        })
    }

    proptest! {
        #[test]
        fn prop_identifiers_scan_as_idents(name in ident_strategy()) {
            let (lexemes, names) = scan(&name).unwrap();
            prop_assert_eq!(lexemes.len(), 1);
            prop_assert_eq!(lexemes[0].token, Token::Ident);
            prop_assert_eq!(names.get(lexemes[0].name.unwrap()), name.as_str());
        }

        #[test]
        fn prop_numbers_scan_as_numbers(value in 0u32..=99999) {
            let text = value.to_string();
            let (lexemes, _) = scan(&text).unwrap();
            prop_assert_eq!(lexemes.len(), 1);
            prop_assert_eq!(lexemes[0].token, Token::Number);
        }

        #[test]
        fn prop_extra_whitespace_is_insignificant(
            pad in proptest::collection::vec("[ \t\n]{1,3}", 8..=8)
        ) {
            let parts = ["begin", "x", ":=", "x", "+", "1", "end", "."];
            let spaced: String = parts
                .iter()
                .zip(pad.iter())
                .map(|(tok, ws)| format!("{ws}{tok}"))
                .collect();
            let plain = parts.join(" ");
            prop_assert_eq!(tokens_of(&spaced), tokens_of(&plain));
        }
    }
}
