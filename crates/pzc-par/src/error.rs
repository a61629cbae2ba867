//! Parse error definitions.
//!
//! The numbering and sentences are the traditional PL/0 set. Every error
//! is fatal: the parser reports the first violation and stops, leaving no
//! partial instruction stream behind.

use thiserror::Error;

/// A fatal syntax or use-site error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// `:=` where a constant declaration needs `=`.
    #[error("Error 1. Use = instead of :=.")]
    UseEqualsNotBecomes,

    /// The `=` of a constant declaration not followed by a number.
    #[error("Error 2. = must be followed by a number.")]
    EqualsMustBeFollowedByNumber,

    /// A constant name not followed by `=`.
    #[error("Error 3. Identifier must be followed by =.")]
    IdentifierMustBeFollowedByEquals,

    /// `const`, `var`, or `procedure` not followed by an identifier.
    #[error("Error 4. const, var, procedure must be followed by identifier.")]
    DeclKeywordMustBeFollowedByIdent,

    /// A declaration list neither continued nor terminated.
    #[error("Error 5. Semicolon or comma missing.")]
    SemicolonOrCommaMissing,

    /// Program did not end with `.`.
    #[error("Error 6. Period expected.")]
    PeriodExpected,

    /// Use of a name with no visible declaration.
    #[error("Error 7. Undeclared identifier.")]
    UndeclaredIdentifier,

    /// Assignment (or `read`) targeting a constant or procedure.
    #[error("Error 8. Assignment to constant or procedure is not allowed.")]
    AssignmentToConstOrProc,

    /// An assignment without `:=`.
    #[error("Error 9. Assignment operator expected.")]
    AssignmentOperatorExpected,

    /// `if` condition not followed by `then`.
    #[error("Error 10. then expected.")]
    ThenExpected,

    /// A `begin` body neither continued nor closed.
    #[error("Error 11. Semicolon or end expected.")]
    SemicolonOrEndExpected,

    /// `while` condition not followed by `do`.
    #[error("Error 12. do expected.")]
    DoExpected,

    /// A condition without a relational operator.
    #[error("Error 13. Relational operator expected.")]
    RelationalOperatorExpected,

    /// A procedure name used as a value.
    #[error("Error 14. Expression must not contain a procedure identifier.")]
    ProcedureInExpression,

    /// A parenthesized expression without its `)`.
    #[error("Error 15. Right parenthesis missing.")]
    RightParenMissing,

    /// A token that can start no factor.
    #[error("Error 16. An expression cannot begin with this symbol.")]
    InvalidExpressionStart,

    /// A number spelling outside the representable range. The scanner
    /// bounds literals at five digits, so this only fires on hand-crafted
    /// lexeme streams.
    #[error("Error 17. This number is too large.")]
    NumberTooLarge,

    /// `read` or `write` not followed by an identifier.
    #[error("Error 18. Read or write must be followed by an identifier.")]
    ReadOrWriteMustBeFollowedByIdent,

    /// `call` not followed by an identifier.
    #[error("Error 23. Call must be followed by an identifier.")]
    CallMustBeFollowedByIdent,

    /// `call` naming a constant or variable.
    #[error("Error 24. Call of a constant or variable is meaningless.")]
    CallOfConstOrVar,
}
