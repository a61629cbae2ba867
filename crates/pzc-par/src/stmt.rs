//! Statement parsing and emission.

use crate::error::ParseError;
use crate::symbols::SymbolKind;
use crate::Parser;
use pzc_lex::Token;
use pzc_util::Op;

impl<'a> Parser<'a> {
    /// Parses one statement. The empty statement is legal: any token that
    /// starts no statement form leaves the stream untouched and emits
    /// nothing.
    pub(crate) fn statement(&mut self) -> Result<(), ParseError> {
        match self.current() {
            Token::Ident => self.assignment(),
            Token::Call => self.call_statement(),
            Token::Begin => self.begin_statement(),
            Token::If => self.if_statement(),
            Token::While => self.while_statement(),
            Token::Read => self.read_statement(),
            Token::Write => self.write_statement(),
            _ => Ok(()),
        }
    }

    /// `ident ":=" expression`
    fn assignment(&mut self) -> Result<(), ParseError> {
        let name = self.ident_spelling(ParseError::UndeclaredIdentifier)?;
        let symbol = self.symbols.resolve(name)?;
        if symbol.kind != SymbolKind::Variable {
            return Err(ParseError::AssignmentToConstOrProc);
        }
        let distance = self.level - symbol.level;
        let address = symbol.address;
        self.advance();

        if self.current() != Token::Becomes {
            return Err(ParseError::AssignmentOperatorExpected);
        }
        self.advance();

        self.expression()?;

        self.emit(Op::Sto, self.current_register, distance, address);
        self.current_register -= 1;
        Ok(())
    }

    /// `"call" ident`
    fn call_statement(&mut self) -> Result<(), ParseError> {
        self.advance();

        let name = self.ident_spelling(ParseError::CallMustBeFollowedByIdent)?;
        let symbol = self.symbols.resolve(name)?;
        if symbol.kind != SymbolKind::Procedure {
            return Err(ParseError::CallOfConstOrVar);
        }
        let distance = self.level - symbol.level;
        let address = symbol.address;
        self.advance();

        self.emit(Op::Cal, 0, distance, address);
        Ok(())
    }

    /// `"begin" statement {";" statement} "end"`
    fn begin_statement(&mut self) -> Result<(), ParseError> {
        self.advance();

        self.statement()?;
        while self.current() == Token::Semicolon {
            self.advance();
            self.statement()?;
        }

        if self.current() != Token::End {
            return Err(ParseError::SemicolonOrEndExpected);
        }
        self.advance();
        Ok(())
    }

    /// `"if" condition "then" statement ["else" statement]`
    ///
    /// The `JPC` after the condition jumps over the then-branch when the
    /// condition register is 0. With an else-branch, the then-branch ends
    /// in a `JMP` over the else-branch and the `JPC` is retargeted to the
    /// else-branch entry.
    fn if_statement(&mut self) -> Result<(), ParseError> {
        self.advance();

        self.condition()?;

        if self.current() != Token::Then {
            return Err(ParseError::ThenExpected);
        }
        self.advance();

        let skip_then = self.emit(Op::Jpc, self.current_register, 0, 0);
        self.current_register -= 1;

        self.statement()?;

        if self.current() == Token::Else {
            self.advance();

            let skip_else = self.emit(Op::Jmp, 0, 0, 0);
            let else_entry = self.here();
            self.patch(skip_then, else_entry);

            self.statement()?;

            let after = self.here();
            self.patch(skip_else, after);
        } else {
            let after = self.here();
            self.patch(skip_then, after);
        }
        Ok(())
    }

    /// `"while" condition "do" statement`
    ///
    /// The loop target is the first instruction of the condition, so the
    /// condition is re-evaluated on every iteration; the `JPC` exits
    /// forward once it yields 0.
    fn while_statement(&mut self) -> Result<(), ParseError> {
        let loop_entry = self.here();
        self.advance();

        self.condition()?;

        let exit_jpc = self.emit(Op::Jpc, self.current_register, 0, 0);
        self.current_register -= 1;

        if self.current() != Token::Do {
            return Err(ParseError::DoExpected);
        }
        self.advance();

        self.statement()?;

        self.emit(Op::Jmp, 0, 0, loop_entry);
        let after = self.here();
        self.patch(exit_jpc, after);
        Ok(())
    }

    /// `"read" ident` - read an integer into a variable.
    fn read_statement(&mut self) -> Result<(), ParseError> {
        self.advance();

        let name = self.ident_spelling(ParseError::ReadOrWriteMustBeFollowedByIdent)?;
        let symbol = self.symbols.resolve(name)?;
        if symbol.kind != SymbolKind::Variable {
            return Err(ParseError::AssignmentToConstOrProc);
        }
        let distance = self.level - symbol.level;
        let address = symbol.address;
        self.advance();

        self.current_register += 1;
        self.emit(Op::SioIn, self.current_register, 0, 2);
        self.emit(Op::Sto, self.current_register, distance, address);
        self.current_register -= 1;
        Ok(())
    }

    /// `"write" expression` - evaluate and print.
    ///
    /// The operand is a full expression: a variable loads, a constant or
    /// number materializes with `LIT`, compound operands evaluate in
    /// place. A procedure name fails inside the expression as usual.
    fn write_statement(&mut self) -> Result<(), ParseError> {
        self.advance();

        if !matches!(
            self.current(),
            Token::Ident | Token::Number | Token::LParen | Token::Plus | Token::Minus
        ) {
            return Err(ParseError::ReadOrWriteMustBeFollowedByIdent);
        }

        self.expression()?;

        self.emit(Op::SioOut, self.current_register, 0, 1);
        self.current_register -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::compile_text;
    use crate::error::ParseError;
    use pzc_util::{Instruction, Op};

    #[test]
    fn test_assignment_emits_store() {
        let code = compile_text("var x; begin x := 7 end.").unwrap();
        assert_eq!(code[2], Instruction::new(Op::Lit, 0, 0, 7));
        assert_eq!(code[3], Instruction::new(Op::Sto, 0, 0, 4));
    }

    #[test]
    fn test_assignment_to_constant() {
        assert_eq!(
            compile_text("const c = 1; begin c := 2 end.").unwrap_err(),
            ParseError::AssignmentToConstOrProc
        );
    }

    #[test]
    fn test_assignment_without_becomes() {
        assert_eq!(
            compile_text("var x; begin x = 2 end.").unwrap_err(),
            ParseError::AssignmentOperatorExpected
        );
    }

    #[test]
    fn test_assignment_to_undeclared() {
        assert_eq!(
            compile_text("begin y := 1 end.").unwrap_err(),
            ParseError::UndeclaredIdentifier
        );
    }

    #[test]
    fn test_call_of_variable() {
        assert_eq!(
            compile_text("var x; begin call x end.").unwrap_err(),
            ParseError::CallOfConstOrVar
        );
    }

    #[test]
    fn test_call_without_ident() {
        assert_eq!(
            compile_text("begin call 5 end.").unwrap_err(),
            ParseError::CallMustBeFollowedByIdent
        );
    }

    #[test]
    fn test_begin_without_end() {
        assert_eq!(
            compile_text("var x; begin x := 1 .").unwrap_err(),
            ParseError::SemicolonOrEndExpected
        );
    }

    #[test]
    fn test_empty_begin_end() {
        let code = compile_text("begin end.").unwrap();
        // Nothing between frame setup and teardown.
        assert_eq!(
            code,
            vec![
                Instruction::new(Op::Jmp, 0, 0, 1),
                Instruction::new(Op::Inc, 0, 0, 4),
                Instruction::new(Op::Rtn, 0, 0, 0),
                Instruction::new(Op::SioHalt, 0, 0, 3),
            ]
        );
    }

    #[test]
    fn test_if_backpatch_lands_after_then() {
        let code = compile_text("var x; begin if x > 0 then x := 1 end.").unwrap();
        //   2: LOD 0 0 4
        //   3: LIT 1 0 0
        //   4: GTR 0 0 1
        //   5: JPC 0 0 8
        //   6: LIT 0 0 1
        //   7: STO 0 0 4
        //   8: RTN
        assert_eq!(code[5], Instruction::new(Op::Jpc, 0, 0, 8));
        assert_eq!(code[8].op, Op::Rtn);
    }

    #[test]
    fn test_if_else_shape() {
        let code = compile_text("var x; begin if odd x then x := 1 else x := 2 end.").unwrap();
        //   2: LOD 0 0 4
        //   3: ODD 0 0 0
        //   4: JPC 0 0 8      -> else branch
        //   5: LIT 0 0 1
        //   6: STO 0 0 4
        //   7: JMP 0 0 10     -> past else branch
        //   8: LIT 0 0 2
        //   9: STO 0 0 4
        //  10: RTN
        assert_eq!(code[4], Instruction::new(Op::Jpc, 0, 0, 8));
        assert_eq!(code[7], Instruction::new(Op::Jmp, 0, 0, 10));
        assert_eq!(code[10].op, Op::Rtn);
    }

    #[test]
    fn test_if_without_then() {
        assert_eq!(
            compile_text("var x; begin if x > 0 x := 1 end.").unwrap_err(),
            ParseError::ThenExpected
        );
    }

    #[test]
    fn test_while_loops_back_to_condition() {
        let code = compile_text("var i; begin while i < 3 do i := i + 1 end.").unwrap();
        //   2: LOD 0 0 4      <- loop entry
        //   3: LIT 1 0 3
        //   4: LSS 0 0 1
        //   5: JPC 0 0 10
        //   6: LOD 0 0 4
        //   7: LIT 1 0 1
        //   8: ADD 0 0 1
        //   9: STO 0 0 4
        //  10: JMP 0 0 2
        // Back-edge target is strictly before the JPC; exit target is
        // right after the back-edge.
        assert_eq!(code[10], Instruction::new(Op::Jmp, 0, 0, 2));
        assert_eq!(code[5], Instruction::new(Op::Jpc, 0, 0, 11));
    }

    #[test]
    fn test_while_without_do() {
        assert_eq!(
            compile_text("var i; begin while i < 3 i := 1 end.").unwrap_err(),
            ParseError::DoExpected
        );
    }

    #[test]
    fn test_read_emits_input_then_store() {
        let code = compile_text("var x; begin read x end.").unwrap();
        assert_eq!(code[2], Instruction::new(Op::SioIn, 0, 0, 2));
        assert_eq!(code[3], Instruction::new(Op::Sto, 0, 0, 4));
    }

    #[test]
    fn test_read_into_constant() {
        assert_eq!(
            compile_text("const c = 1; begin read c end.").unwrap_err(),
            ParseError::AssignmentToConstOrProc
        );
    }

    #[test]
    fn test_write_variable() {
        let code = compile_text("var x; begin write x end.").unwrap();
        assert_eq!(code[2], Instruction::new(Op::Lod, 0, 0, 4));
        assert_eq!(code[3], Instruction::new(Op::SioOut, 0, 0, 1));
    }

    #[test]
    fn test_write_constant() {
        let code = compile_text("const c = 9; begin write c end.").unwrap();
        assert_eq!(code[2], Instruction::new(Op::Lit, 0, 0, 9));
        assert_eq!(code[3], Instruction::new(Op::SioOut, 0, 0, 1));
    }

    #[test]
    fn test_write_expression_operand() {
        let code = compile_text("var x; begin write x * 2 end.").unwrap();
        //   2: LOD 0 0 4
        //   3: LIT 1 0 2
        //   4: MUL 0 0 1
        //   5: SIO 0 0 1
        assert_eq!(code[4], Instruction::new(Op::Mul, 0, 0, 1));
        assert_eq!(code[5], Instruction::new(Op::SioOut, 0, 0, 1));
    }

    #[test]
    fn test_write_without_operand() {
        assert_eq!(
            compile_text("begin write * end.").unwrap_err(),
            ParseError::ReadOrWriteMustBeFollowedByIdent
        );
    }

    #[test]
    fn test_write_procedure_rejected() {
        assert_eq!(
            compile_text("procedure p; ; begin write p end.").unwrap_err(),
            ParseError::ProcedureInExpression
        );
    }

    #[test]
    fn test_read_without_ident() {
        assert_eq!(
            compile_text("begin read 4 end.").unwrap_err(),
            ParseError::ReadOrWriteMustBeFollowedByIdent
        );
    }
}
