//! Lexer for preprocessed Jack source (comments already stripped by
//! `jackc-drv::preprocess`).

use jackc_util::{CompileError, CompileResult, Span, Symbol};

use crate::cursor::Cursor;
use crate::token::{is_symbol_char, Keyword, Token};

/// Turns a preprocessed source buffer into a forward stream of [`Token`]s
/// with single-token lookahead, matching the grammar's LL(1) shape.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    current: Token,
    current_span: Span,
    lookahead: Option<(Token, Span)>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> CompileResult<Self> {
        let mut lexer = Self {
            cursor: Cursor::new(source),
            current: Token::Eof,
            current_span: Span::DUMMY,
            lookahead: None,
        };
        lexer.advance()?;
        Ok(lexer)
    }

    pub fn current(&self) -> Token {
        self.current
    }

    pub fn current_span(&self) -> Span {
        self.current_span
    }

    /// Consumes `current`, lexing the next token (or returning a previously
    /// buffered `peek()` result) and returning the token just consumed.
    pub fn advance(&mut self) -> CompileResult<Token> {
        let consumed = self.current;
        let (token, span) = if let Some(buffered) = self.lookahead.take() {
            buffered
        } else {
            self.scan_token()?
        };
        self.current = token;
        self.current_span = span;
        Ok(consumed)
    }

    /// Returns the token after `current` without consuming `current`. The
    /// engine resolves its one two-token lookahead (disambiguating a plain
    /// name from `name[`, `name(`, and `name.`) by consuming the identifier
    /// and inspecting the new `current` instead, so this is exposed as a
    /// general lexer capability rather than something the engine calls.
    pub fn peek(&mut self) -> CompileResult<Token> {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.scan_token()?);
        }
        Ok(self.lookahead.as_ref().unwrap().0)
    }

    fn scan_token(&mut self) -> CompileResult<(Token, Span)> {
        self.cursor.skip_whitespace();

        let span = Span::new(self.cursor.line(), self.cursor.column());

        if self.cursor.is_at_end() {
            return Ok((Token::Eof, span));
        }

        let c = self.cursor.current_char();

        if c.is_ascii_digit() {
            return self.scan_integer(span);
        }

        if c == '"' {
            return self.scan_string(span);
        }

        if is_ident_start(c) {
            return Ok((self.scan_identifier_or_keyword(), span));
        }

        if is_symbol_char(c) {
            self.cursor.advance();
            return Ok((Token::Symbol(c), span));
        }

        Err(CompileError::lex(
            span,
            format!("unexpected character `{c}`"),
        ))
    }

    fn scan_integer(&mut self, span: Span) -> CompileResult<(Token, Span)> {
        let start = self.cursor.position();
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(start);
        let value: u32 = lexeme
            .parse()
            .map_err(|_| CompileError::lex(span, format!("malformed integer constant `{lexeme}`")))?;
        if value > 32767 {
            return Err(CompileError::lex(
                span,
                format!("integer constant `{value}` out of range 0..32767"),
            ));
        }
        Ok((Token::IntegerConstant(value as u16), span))
    }

    fn scan_string(&mut self, span: Span) -> CompileResult<(Token, Span)> {
        self.cursor.advance(); // opening quote
        let start = self.cursor.position();
        loop {
            if self.cursor.is_at_end() {
                return Err(CompileError::lex(span, "unterminated string constant"));
            }
            let c = self.cursor.current_char();
            if c == '"' {
                break;
            }
            if c == '\n' {
                return Err(CompileError::lex(
                    span,
                    "unterminated string constant (newline before closing quote)",
                ));
            }
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(start);
        let sym = Symbol::intern(lexeme);
        self.cursor.advance(); // closing quote
        Ok((Token::StringConstant(sym), span))
    }

    fn scan_identifier_or_keyword(&mut self) -> Token {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let lexeme = self.cursor.slice_from(start);
        match Keyword::from_str(lexeme) {
            Some(kw) => Token::Keyword(kw),
            None => Token::Identifier(Symbol::intern(lexeme)),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source).unwrap();
        let mut out = Vec::new();
        loop {
            let tok = lexer.current();
            if tok.is_eof() {
                break;
            }
            out.push(tok);
            lexer.advance().unwrap();
        }
        out
    }

    #[test]
    fn lexes_keywords_and_symbols() {
        let toks = tokens("class A { }");
        assert_eq!(
            toks,
            vec![
                Token::Keyword(Keyword::Class),
                Token::Identifier(Symbol::intern("A")),
                Token::Symbol('{'),
                Token::Symbol('}'),
            ]
        );
    }

    #[test]
    fn lexes_integer_constant() {
        assert_eq!(tokens("32767"), vec![Token::IntegerConstant(32767)]);
    }

    #[test]
    fn rejects_integer_out_of_range() {
        let err = Lexer::new("32768").and_then(|mut l| l.advance());
        assert!(err.is_err());
    }

    #[test]
    fn lexes_string_constant_without_quotes() {
        assert_eq!(
            tokens("\"hi\""),
            vec![Token::StringConstant(Symbol::intern("hi"))]
        );
    }

    #[test]
    fn rejects_unterminated_string() {
        assert!(Lexer::new("\"hi").is_err());
    }

    #[test]
    fn rejects_unknown_character() {
        assert!(Lexer::new("@").is_err());
    }

    #[test]
    fn peek_does_not_consume() {
        let mut lexer = Lexer::new("a (").unwrap();
        assert_eq!(lexer.peek().unwrap(), Token::Symbol('('));
        assert_eq!(lexer.current(), Token::Identifier(Symbol::intern("a")));
    }

    #[test]
    fn property_arbitrary_identifiers_lex_as_one_identifier_token() {
        use proptest::prelude::*;

        proptest!(|(input in "[a-zA-Z_][a-zA-Z0-9_]{0,30}")| {
            prop_assume!(Keyword::from_str(&input).is_none());
            let toks = tokens(&input);
            prop_assert_eq!(toks.len(), 1);
            prop_assert!(matches!(toks[0], Token::Identifier(_)));
        });
    }

    #[test]
    fn property_in_range_decimal_strings_lex_as_integer_constant() {
        use proptest::prelude::*;

        proptest!(|(value in 0u16..=32767)| {
            let toks = tokens(&value.to_string());
            prop_assert_eq!(toks, vec![Token::IntegerConstant(value)]);
        });
    }

    #[test]
    fn property_out_of_range_decimal_strings_are_rejected() {
        use proptest::prelude::*;

        proptest!(|(value in 32768u32..100_000)| {
            prop_assert!(Lexer::new(&value.to_string()).is_err());
        });
    }

    #[test]
    fn property_quoted_strings_round_trip_without_quotes() {
        use proptest::prelude::*;

        proptest!(|(input in "[^\"\n]{0,30}")| {
            let source = format!("\"{input}\"");
            let toks = tokens(&source);
            prop_assert_eq!(toks, vec![Token::StringConstant(Symbol::intern(&input))]);
        });
    }
}
