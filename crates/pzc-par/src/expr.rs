//! Condition, expression, term, and factor parsing.

use crate::error::ParseError;
use crate::symbols::SymbolKind;
use crate::Parser;
use pzc_lex::Token;
use pzc_util::Op;

impl<'a> Parser<'a> {
    /// `"odd" expression | expression rel_op expression`
    ///
    /// Either form leaves a single 0/1 result in the top live register.
    pub(crate) fn condition(&mut self) -> Result<(), ParseError> {
        if self.current() == Token::Odd {
            self.advance();
            self.expression()?;
            let r = self.current_register;
            self.emit(Op::Odd, r, r, 0);
            return Ok(());
        }

        self.expression()?;

        let relation = rel_op(self.current()).ok_or(ParseError::RelationalOperatorExpected)?;
        self.advance();

        self.expression()?;

        let r = self.current_register;
        self.emit(relation, r - 1, r - 1, r);
        self.current_register -= 1;
        Ok(())
    }

    /// `["+"|"-"] term { ("+"|"-") term }`
    pub(crate) fn expression(&mut self) -> Result<(), ParseError> {
        match self.current() {
            Token::Plus => {
                // Unary plus is a no-op.
                self.advance();
                self.term()?;
            }
            Token::Minus => {
                self.advance();
                self.term()?;
                let r = self.current_register;
                self.emit(Op::Neg, r, r, 0);
            }
            _ => self.term()?,
        }

        while matches!(self.current(), Token::Plus | Token::Minus) {
            let op = if self.current() == Token::Plus {
                Op::Add
            } else {
                Op::Sub
            };
            self.advance();

            self.term()?;

            let r = self.current_register;
            self.emit(op, r - 1, r - 1, r);
            self.current_register -= 1;
        }

        Ok(())
    }

    /// `factor { ("*"|"/") factor }`
    pub(crate) fn term(&mut self) -> Result<(), ParseError> {
        self.factor()?;

        while matches!(self.current(), Token::Mult | Token::Slash) {
            let op = if self.current() == Token::Mult {
                Op::Mul
            } else {
                Op::Div
            };
            self.advance();

            self.factor()?;

            let r = self.current_register;
            self.emit(op, r - 1, r - 1, r);
            self.current_register -= 1;
        }

        Ok(())
    }

    /// `ident | number | "(" expression ")"`
    ///
    /// Every arm leaves exactly one new live register: a variable loads
    /// through its static-link distance, a constant and a number literal
    /// materialize with `LIT`.
    pub(crate) fn factor(&mut self) -> Result<(), ParseError> {
        match self.current() {
            Token::Ident => {
                let name = self.ident_spelling(ParseError::InvalidExpressionStart)?;
                let symbol = self.symbols.resolve(name)?;
                let kind = symbol.kind;
                let distance = self.level - symbol.level;
                let address = symbol.address;
                let value = symbol.value;
                self.advance();

                self.current_register += 1;
                match kind {
                    SymbolKind::Variable => {
                        self.emit(Op::Lod, self.current_register, distance, address);
                    }
                    SymbolKind::Constant => {
                        self.emit(Op::Lit, self.current_register, 0, value);
                    }
                    SymbolKind::Procedure => return Err(ParseError::ProcedureInExpression),
                }
                Ok(())
            }
            Token::Number => {
                let value = self.number_value()?;
                self.advance();

                self.current_register += 1;
                self.emit(Op::Lit, self.current_register, 0, value);
                Ok(())
            }
            Token::LParen => {
                self.advance();
                self.expression()?;

                if self.current() != Token::RParen {
                    return Err(ParseError::RightParenMissing);
                }
                self.advance();
                Ok(())
            }
            _ => Err(ParseError::InvalidExpressionStart),
        }
    }
}

/// Maps a relational token to its comparison opcode.
fn rel_op(token: Token) -> Option<Op> {
    match token {
        Token::Eql => Some(Op::Eql),
        Token::Neq => Some(Op::Neq),
        Token::Lss => Some(Op::Lss),
        Token::Leq => Some(Op::Leq),
        Token::Gtr => Some(Op::Gtr),
        Token::Geq => Some(Op::Geq),
        _ => None,
    }
}
