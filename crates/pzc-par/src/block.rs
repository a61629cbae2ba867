//! Block parsing: declarations, nested procedures, frame setup.

use crate::error::ParseError;
use crate::symbols::{SymbolEntry, SymbolKind};
use crate::Parser;
use pzc_lex::Token;
use pzc_util::Op;

impl<'a> Parser<'a> {
    /// Parses one block.
    ///
    /// Emission order within a block:
    ///
    /// 1. a placeholder `JMP` reserving the block's entry jump (nested
    ///    procedure bodies are emitted before the block's own body, so
    ///    callers of this block must hop over them),
    /// 2. the nested procedure bodies themselves,
    /// 3. the back-patched entry point: `INC 0 0 (4 + vars)` reserving the
    ///    activation-record cells plus locals,
    /// 4. the body statement,
    /// 5. `RTN`.
    ///
    /// On exit the block's declarations are popped, restoring the symbol
    /// stack to its depth at entry.
    pub(crate) fn block(&mut self) -> Result<(), ParseError> {
        self.level += 1;

        let entry_jmp = self.emit(Op::Jmp, 0, 0, 0);

        let mut constants = 0;
        let mut variables = 0;
        let mut procedures = 0;

        if self.current() == Token::Const {
            constants = self.constant_declaration()?;
        }

        if self.current() == Token::Var {
            variables = self.variable_declaration()?;
        }

        if self.current() == Token::Procedure {
            procedures = self.procedure_declaration()?;
        }

        let entry = self.here();
        self.patch(entry_jmp, entry);

        self.emit(Op::Inc, 0, 0, 4 + variables as i64);

        self.statement()?;

        self.symbols.pop_n(constants + variables + procedures);
        self.emit(Op::Rtn, 0, 0, 0);

        self.level -= 1;
        Ok(())
    }

    /// Parses `"const" ident "=" number {"," ident "=" number} ";"`.
    ///
    /// Returns the number of constants declared.
    fn constant_declaration(&mut self) -> Result<usize, ParseError> {
        let mut count = 0;

        loop {
            // Past "const" or ",".
            self.advance();

            let name = self
                .ident_spelling(ParseError::DeclKeywordMustBeFollowedByIdent)?
                .to_owned();
            self.advance();

            if self.current() != Token::Eql {
                if self.current() == Token::Becomes {
                    return Err(ParseError::UseEqualsNotBecomes);
                }
                return Err(ParseError::IdentifierMustBeFollowedByEquals);
            }
            self.advance();

            if self.current() != Token::Number {
                return Err(ParseError::EqualsMustBeFollowedByNumber);
            }
            let value = self.number_value()?;
            self.advance();

            self.symbols.push(SymbolEntry {
                kind: SymbolKind::Constant,
                name,
                value,
                level: self.level,
                address: 0,
            });
            count += 1;

            if self.current() != Token::Comma {
                break;
            }
        }

        if self.current() != Token::Semicolon {
            return Err(ParseError::SemicolonOrCommaMissing);
        }
        self.advance();

        Ok(count)
    }

    /// Parses `"var" ident {"," ident} ";"`.
    ///
    /// Variables are assigned frame offsets 4, 5, 6, ... in declaration
    /// order, past the four activation-record cells.
    fn variable_declaration(&mut self) -> Result<usize, ParseError> {
        let mut count: usize = 0;

        loop {
            self.advance();

            let name = self
                .ident_spelling(ParseError::DeclKeywordMustBeFollowedByIdent)?
                .to_owned();
            self.advance();

            self.symbols.push(SymbolEntry {
                kind: SymbolKind::Variable,
                name,
                value: 0,
                level: self.level,
                address: 4 + count as i64,
            });
            count += 1;

            if self.current() != Token::Comma {
                break;
            }
        }

        if self.current() != Token::Semicolon {
            return Err(ParseError::SemicolonOrCommaMissing);
        }
        self.advance();

        Ok(count)
    }

    /// Parses `{ "procedure" ident ";" block ";" }`.
    ///
    /// The procedure's code address is the current emission position: the
    /// very next instruction is the inner block's entry `JMP`, so a `CAL`
    /// lands on it and hops to the inner block's `INC`.
    fn procedure_declaration(&mut self) -> Result<usize, ParseError> {
        let mut count = 0;

        loop {
            self.advance();

            let name = self
                .ident_spelling(ParseError::DeclKeywordMustBeFollowedByIdent)?
                .to_owned();
            self.advance();

            self.symbols.push(SymbolEntry {
                kind: SymbolKind::Procedure,
                name,
                value: 0,
                level: self.level,
                address: self.here(),
            });
            count += 1;

            if self.current() != Token::Semicolon {
                return Err(ParseError::SemicolonOrCommaMissing);
            }
            self.advance();

            self.block()?;

            if self.current() != Token::Semicolon {
                return Err(ParseError::SemicolonOrCommaMissing);
            }
            self.advance();

            if self.current() != Token::Procedure {
                break;
            }
        }

        Ok(count)
    }
}
