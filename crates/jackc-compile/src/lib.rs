//! Recursive-descent, single-pass Jack compiler: parses Jack's grammar and
//! emits VM text as a side effect of parsing, with no persistent AST.
//! Grammar productions are split across `items` (class/subroutine/variable
//! declarations), `stmt` (statements), and `expr` (expressions/terms/calls)
//! as separate `impl<'a> Engine<'a>` blocks over one shared struct — the
//! same module-per-grammar-concern split `faxc-par` uses for its
//! AST-building parser, adapted here to a parser that emits instead of
//! building nodes.

pub mod expr;
pub mod items;
pub mod stmt;
pub mod vmwriter;


use jackc_lex::{Keyword, Lexer, Token};
use jackc_symtab::{Kind, SymbolTable};
use jackc_util::{CompileError, CompileResult, Span, Symbol};
use vmwriter::{Segment, VmWriter};

/// Governs entry-prologue emission and the meaning of `this` within a
/// subroutine body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Constructor,
    Function,
    Method,
}

pub struct Engine<'a> {
    lexer: Lexer<'a>,
    class_table: SymbolTable,
    sub_table: SymbolTable,
    writer: VmWriter,
    class_name: Symbol,
    category: Category,
    if_counter: u32,
    while_counter: u32,
}

impl<'a> Engine<'a> {
    /// Compiles one preprocessed Jack source unit end to end, returning the
    /// emitted VM text.
    pub fn compile(source: &'a str) -> CompileResult<String> {
        let lexer = Lexer::new(source)?;
        let mut engine = Self {
            lexer,
            class_table: SymbolTable::new(),
            sub_table: SymbolTable::new(),
            writer: VmWriter::new(),
            class_name: Symbol::intern(""),
            category: Category::Function,
            if_counter: 0,
            while_counter: 0,
        };
        engine.compile_class()?;
        Ok(engine.writer.into_text())
    }

    fn span(&self) -> Span {
        self.lexer.current_span()
    }

    fn current(&self) -> Token {
        self.lexer.current()
    }

    fn bump(&mut self) -> CompileResult<Token> {
        self.lexer.advance()
    }

    fn expect_keyword(&mut self, kw: Keyword) -> CompileResult<()> {
        if self.current().is_keyword_kind(kw) {
            self.bump()?;
            Ok(())
        } else {
            Err(CompileError::parse(
                self.span(),
                format!("expected keyword `{kw}`, found {}", self.current()),
            ))
        }
    }

    fn expect_symbol(&mut self, c: char) -> CompileResult<()> {
        if self.current().is_symbol(Some(c)) {
            self.bump()?;
            Ok(())
        } else {
            Err(CompileError::parse(
                self.span(),
                format!("expected symbol `{c}`, found {}", self.current()),
            ))
        }
    }

    fn expect_identifier(&mut self) -> CompileResult<Symbol> {
        match self.current() {
            Token::Identifier(sym) => {
                self.bump()?;
                Ok(sym)
            }
            other => Err(CompileError::parse(
                self.span(),
                format!("expected identifier, found {other}"),
            )),
        }
    }

    /// A `type` is `int | char | boolean | <ClassName>`.
    fn expect_type(&mut self) -> CompileResult<Symbol> {
        match self.current() {
            Token::Keyword(kw @ (Keyword::Int | Keyword::Char | Keyword::Boolean)) => {
                self.bump()?;
                Ok(Symbol::intern(kw.as_str()))
            }
            Token::Identifier(sym) => {
                self.bump()?;
                Ok(sym)
            }
            other => Err(CompileError::parse(
                self.span(),
                format!("expected a type, found {other}"),
            )),
        }
    }

    fn new_if_label(&mut self) -> u32 {
        self.if_counter += 1;
        self.if_counter
    }

    fn new_while_label(&mut self) -> u32 {
        self.while_counter += 1;
        self.while_counter
    }

    /// Looks up `name` in the subroutine table, then the class table (no
    /// cross-scope fallback beyond that explicit order), returning the
    /// segment/index pair to push or pop.
    fn resolve(&self, name: Symbol) -> Option<(Segment, u16)> {
        if let Some(kind) = self.sub_table.kind_of(name) {
            return Some((kind_to_segment(kind), self.sub_table.index_of(name).unwrap()));
        }
        if let Some(kind) = self.class_table.kind_of(name) {
            return Some((kind_to_segment(kind), self.class_table.index_of(name).unwrap()));
        }
        None
    }

    fn resolve_or_err(&self, name: Symbol, span: Span) -> CompileResult<(Segment, u16)> {
        self.resolve(name)
            .ok_or_else(|| CompileError::symbol(span, format!("undefined name `{name}`")))
    }

    /// The declared class type of a resolved name, used to dispatch a
    /// qualified `obj.method(...)` call to `<type>.method`.
    fn type_of(&self, name: Symbol) -> Option<Symbol> {
        self.sub_table
            .type_of(name)
            .or_else(|| self.class_table.type_of(name))
    }

    fn is_bound(&self, name: Symbol) -> bool {
        self.sub_table.contains(name) || self.class_table.contains(name)
    }
}

fn kind_to_segment(kind: Kind) -> Segment {
    match kind {
        Kind::Static => Segment::Static,
        Kind::Field => Segment::This,
        Kind::Argument => Segment::Argument,
        Kind::Local => Segment::Local,
    }
}
