//! `statements`, `let`, `if`, `while`, `do`, `return` productions.

use jackc_lex::{Keyword, Token};
use jackc_util::CompileResult;

use crate::vmwriter::{ArithCmd, Segment};
use crate::Engine;

impl<'a> Engine<'a> {
    /// A `statements` block: zero or more statements, consumed until the
    /// matching `}` (not consumed here — the caller owns that token).
    pub(crate) fn compile_statements(&mut self) -> CompileResult<()> {
        loop {
            match self.current() {
                Token::Keyword(Keyword::Let) => self.compile_let()?,
                Token::Keyword(Keyword::If) => self.compile_if()?,
                Token::Keyword(Keyword::While) => self.compile_while()?,
                Token::Keyword(Keyword::Do) => self.compile_do()?,
                Token::Keyword(Keyword::Return) => self.compile_return()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// `let <name> ([expr])? = expr ;`
    fn compile_let(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Let)?;
        let name_span = self.span();
        let name = self.expect_identifier()?;

        if self.current().is_symbol(Some('[')) {
            // Array element write: isolates RHS evaluation from the target
            // address so an array read on the RHS cannot clobber it.
            let (seg, idx) = self.resolve_or_err(name, name_span)?;
            self.writer.push(seg, idx);
            self.bump()?; // consume '['
            self.compile_expression()?;
            self.expect_symbol(']')?;
            self.writer.arithmetic(ArithCmd::Add);

            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;

            let span = self.span();
            self.writer.pop(Segment::Temp, 0, span)?;
            self.writer.pop(Segment::Pointer, 1, span)?;
            self.writer.push(Segment::Temp, 0);
            self.writer.pop(Segment::That, 0, span)?;
        } else {
            self.expect_symbol('=')?;
            self.compile_expression()?;
            self.expect_symbol(';')?;

            let (seg, idx) = self.resolve_or_err(name, name_span)?;
            let span = self.span();
            self.writer.pop(seg, idx, span)?;
        }
        Ok(())
    }

    /// `if ( expr ) { stmts } (else { stmts })?`
    fn compile_if(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::If)?;
        let n = self.new_if_label();
        let true_label = format!("IF_TRUE_{n}");
        let false_label = format!("IF_FALSE_{n}");
        let end_label = format!("IF_END_{n}");

        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;

        self.writer.if_goto(&true_label);
        self.writer.goto(&false_label);
        self.writer.label(&true_label);

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        if self.current().is_keyword_kind(Keyword::Else) {
            self.writer.goto(&end_label);
            self.writer.label(&false_label);
            self.bump()?;
            self.expect_symbol('{')?;
            self.compile_statements()?;
            self.expect_symbol('}')?;
            self.writer.label(&end_label);
        } else {
            self.writer.label(&false_label);
        }
        Ok(())
    }

    /// `while ( expr ) { stmts }`
    fn compile_while(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::While)?;
        let n = self.new_while_label();
        let exp_label = format!("WHILE_EXP_{n}");
        let end_label = format!("WHILE_END_{n}");

        self.writer.label(&exp_label);
        self.expect_symbol('(')?;
        self.compile_expression()?;
        self.expect_symbol(')')?;
        self.writer.arithmetic(ArithCmd::Not);
        self.writer.if_goto(&end_label);

        self.expect_symbol('{')?;
        self.compile_statements()?;
        self.expect_symbol('}')?;

        self.writer.goto(&exp_label);
        self.writer.label(&end_label);
        Ok(())
    }

    /// `do subroutineCall ;`
    fn compile_do(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Do)?;
        self.compile_subroutine_call()?;
        self.expect_symbol(';')?;
        let span = self.span();
        self.writer.pop(Segment::Temp, 0, span)?;
        Ok(())
    }

    /// `return (expr)? ;`
    fn compile_return(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Return)?;
        if self.current().is_symbol(Some(';')) {
            self.writer.push(Segment::Constant, 0);
        } else {
            self.compile_expression()?;
        }
        self.expect_symbol(';')?;
        self.writer.return_();
        Ok(())
    }
}
