//! `expression`, `term`, `expressionList`, and `subroutineCall` productions.
//!
//! Jack expressions have no operator precedence: `expression` is `term (op
//! term)*` evaluated strictly left to right, so unlike a Pratt parser there
//! is no binding-power table here — each `op term` pair just emits
//! immediately after the term that completes it.

use jackc_lex::{Keyword, Token};
use jackc_util::{CompileError, CompileResult, Span, Symbol};

use crate::vmwriter::{ArithCmd, Segment};
use crate::Engine;

impl<'a> Engine<'a> {
    /// `expression` -> `term (op term)*`
    pub(crate) fn compile_expression(&mut self) -> CompileResult<()> {
        self.compile_term()?;
        while self.current().is_op() {
            let op = match self.current() {
                Token::Symbol(c) => c,
                _ => unreachable!("is_op only matches Token::Symbol"),
            };
            self.bump()?;
            self.compile_term()?;
            self.emit_binary_op(op);
        }
        Ok(())
    }

    fn emit_binary_op(&mut self, op: char) {
        match op {
            '+' => self.writer.arithmetic(ArithCmd::Add),
            '-' => self.writer.arithmetic(ArithCmd::Sub),
            '&' => self.writer.arithmetic(ArithCmd::And),
            '|' => self.writer.arithmetic(ArithCmd::Or),
            '<' => self.writer.arithmetic(ArithCmd::Lt),
            '>' => self.writer.arithmetic(ArithCmd::Gt),
            '=' => self.writer.arithmetic(ArithCmd::Eq),
            '*' => self.writer.call("Math.multiply", 2),
            '/' => self.writer.call("Math.divide", 2),
            _ => unreachable!("is_op restricts the operator set"),
        }
    }

    /// `term`, dispatching on `current` and (for identifiers) one further
    /// lookahead to distinguish a plain name from an array access or a
    /// subroutine call.
    pub(crate) fn compile_term(&mut self) -> CompileResult<()> {
        match self.current() {
            Token::IntegerConstant(v) => {
                self.bump()?;
                self.writer.push(Segment::Constant, v);
            }
            Token::StringConstant(s) => {
                self.bump()?;
                self.compile_string_literal(s);
            }
            Token::Keyword(Keyword::True) => {
                self.bump()?;
                self.writer.push(Segment::Constant, 1);
                self.writer.arithmetic(ArithCmd::Neg);
            }
            Token::Keyword(Keyword::False) | Token::Keyword(Keyword::Null) => {
                self.bump()?;
                self.writer.push(Segment::Constant, 0);
            }
            Token::Keyword(Keyword::This) => {
                self.bump()?;
                self.writer.push(Segment::Pointer, 0);
            }
            Token::Symbol('(') => {
                self.bump()?;
                self.compile_expression()?;
                self.expect_symbol(')')?;
            }
            tok if tok.is_unary_op() => {
                let op = match tok {
                    Token::Symbol(c) => c,
                    _ => unreachable!(),
                };
                self.bump()?;
                self.compile_term()?;
                match op {
                    '-' => self.writer.arithmetic(ArithCmd::Neg),
                    '~' => self.writer.arithmetic(ArithCmd::Not),
                    _ => unreachable!("is_unary_op restricts to '-' and '~'"),
                }
            }
            Token::Identifier(name) => {
                let span = self.span();
                self.bump()?;
                if self.current().is_symbol(Some('[')) {
                    let (seg, idx) = self.resolve_or_err(name, span)?;
                    self.writer.push(seg, idx);
                    self.bump()?; // consume '['
                    self.compile_expression()?;
                    self.expect_symbol(']')?;
                    self.writer.arithmetic(ArithCmd::Add);
                    self.writer.pop(Segment::Pointer, 1, span)?;
                    self.writer.push(Segment::That, 0);
                } else if self.current().is_symbol(Some('(')) || self.current().is_symbol(Some('.')) {
                    self.compile_subroutine_call_on(name, span)?;
                } else {
                    let (seg, idx) = self.resolve_or_err(name, span)?;
                    self.writer.push(seg, idx);
                }
            }
            other => {
                return Err(CompileError::parse(
                    self.span(),
                    format!("expected a term, found {other}"),
                ))
            }
        }
        Ok(())
    }

    fn compile_string_literal(&mut self, s: Symbol) {
        let text = s.as_str();
        self.writer.push(Segment::Constant, text.chars().count() as u16);
        self.writer.call("String.new", 1);
        for c in text.chars() {
            self.writer.push(Segment::Constant, c as u16);
            self.writer.call("String.appendChar", 2);
        }
    }

    /// `expressionList` -> (expression (`,` expression)*)?, returning the
    /// count of top-level expressions parsed.
    pub(crate) fn compile_expression_list(&mut self) -> CompileResult<u16> {
        if self.current().is_symbol(Some(')')) {
            return Ok(0);
        }
        let mut count = 1u16;
        self.compile_expression()?;
        while self.current().is_symbol(Some(',')) {
            self.bump()?;
            self.compile_expression()?;
            count += 1;
        }
        Ok(count)
    }

    /// `subroutineCall` reached from a `do` statement, where the leading
    /// identifier has not yet been consumed.
    pub(crate) fn compile_subroutine_call(&mut self) -> CompileResult<()> {
        let span = self.span();
        let name = self.expect_identifier()?;
        self.compile_subroutine_call_on(name, span)
    }

    /// `subroutineCall` continuation, reached from `term` where the leading
    /// identifier `name` has already been consumed at `span`.
    fn compile_subroutine_call_on(&mut self, name: Symbol, span: Span) -> CompileResult<()> {
        if self.current().is_symbol(Some('.')) {
            self.bump()?;
            let method = self.expect_identifier()?;
            self.expect_symbol('(')?;
            if let Some((seg, idx)) = self.resolve(name) {
                self.writer.push(seg, idx);
                let ty = self
                    .type_of(name)
                    .expect("resolve succeeded so a declared type exists");
                let nargs = self.compile_expression_list()?;
                self.expect_symbol(')')?;
                self.writer.call(&format!("{ty}.{method}"), nargs + 1);
            } else {
                let nargs = self.compile_expression_list()?;
                self.expect_symbol(')')?;
                self.writer.call(&format!("{name}.{method}"), nargs);
            }
        } else {
            // Unqualified call: a method invocation on the current object.
            if self.is_bound(name) {
                return Err(CompileError::symbol(
                    span,
                    format!("`{name}` is a variable, not a subroutine"),
                ));
            }
            self.writer.push(Segment::Pointer, 0);
            self.expect_symbol('(')?;
            let nargs = self.compile_expression_list()?;
            self.expect_symbol(')')?;
            self.writer.call(&format!("{}.{name}", self.class_name), nargs + 1);
        }
        Ok(())
    }
}
