//! `class`, `classVarDec`, and `subroutineDec` productions.

use jackc_lex::{Keyword, Token};
use jackc_symtab::Kind;
use jackc_util::{CompileError, CompileResult, Symbol};

use crate::vmwriter::Segment;
use crate::{Category, Engine};

impl<'a> Engine<'a> {
    /// `class` -> `class <Name> { classVarDec* subroutineDec* }`
    pub(crate) fn compile_class(&mut self) -> CompileResult<()> {
        self.class_table.reset();
        self.expect_keyword(Keyword::Class)?;
        self.class_name = self.expect_identifier()?;
        self.expect_symbol('{')?;

        while self.current().is_keyword_kind(Keyword::Static)
            || self.current().is_keyword_kind(Keyword::Field)
        {
            self.compile_class_var_dec()?;
        }

        while matches!(
            self.current(),
            Token::Keyword(Keyword::Constructor | Keyword::Function | Keyword::Method)
        ) {
            self.compile_subroutine_dec()?;
        }

        self.expect_symbol('}')?;
        Ok(())
    }

    /// `classVarDec` -> (`static`|`field`) <type> <name> (`,` <name>)* `;`
    fn compile_class_var_dec(&mut self) -> CompileResult<()> {
        let kind = match self.current() {
            Token::Keyword(Keyword::Static) => Kind::Static,
            Token::Keyword(Keyword::Field) => Kind::Field,
            other => {
                return Err(CompileError::parse(
                    self.span(),
                    format!("expected `static` or `field`, found {other}"),
                ))
            }
        };
        self.bump()?;
        let ty = self.expect_type()?;

        let name = self.expect_identifier()?;
        let span = self.span();
        self.class_table.define(name, ty, kind, span)?;
        while self.current().is_symbol(Some(',')) {
            self.bump()?;
            let name = self.expect_identifier()?;
            let span = self.span();
            self.class_table.define(name, ty, kind, span)?;
        }
        self.expect_symbol(';')?;
        Ok(())
    }

    /// `subroutineDec` -> (`constructor`|`function`|`method`)
    /// (`void`|<type>) <name> `(` paramList `)` subroutineBody
    fn compile_subroutine_dec(&mut self) -> CompileResult<()> {
        self.sub_table.reset();
        self.if_counter = 0;
        self.while_counter = 0;

        let category = match self.current() {
            Token::Keyword(Keyword::Constructor) => Category::Constructor,
            Token::Keyword(Keyword::Function) => Category::Function,
            Token::Keyword(Keyword::Method) => Category::Method,
            other => {
                return Err(CompileError::parse(
                    self.span(),
                    format!("expected a subroutine declaration, found {other}"),
                ))
            }
        };
        self.category = category;
        self.bump()?;

        if category == Category::Method {
            let span = self.span();
            self.sub_table
                .define(Symbol::intern("this"), self.class_name, Kind::Argument, span)?;
        }

        // return type: void or a type, unused for emission but must be consumed
        if self.current().is_keyword_kind(Keyword::Void) {
            self.bump()?;
        } else {
            self.expect_type()?;
        }

        let sub_name = self.expect_identifier()?;
        self.expect_symbol('(')?;
        self.compile_param_list()?;
        self.expect_symbol(')')?;

        self.expect_symbol('{')?;
        while self.current().is_keyword_kind(Keyword::Var) {
            self.compile_var_dec()?;
        }
        let nlocals = self.sub_table.count(Kind::Local);

        let full_name = format!("{}.{}", self.class_name, sub_name);
        self.writer.function(&full_name, nlocals);

        match category {
            Category::Constructor => {
                let nfields = self.class_table.count(Kind::Field);
                self.writer.push(Segment::Constant, nfields);
                self.writer.call("Memory.alloc", 1);
                self.writer.pop(Segment::Pointer, 0, self.span())?;
            }
            Category::Method => {
                self.writer.push(Segment::Argument, 0);
                self.writer.pop(Segment::Pointer, 0, self.span())?;
            }
            Category::Function => {}
        }

        self.compile_statements()?;
        self.expect_symbol('}')?;
        Ok(())
    }

    /// `parameterList` -> ((<type> <name>) (`,` <type> <name>)*)?
    fn compile_param_list(&mut self) -> CompileResult<()> {
        if self.current().is_symbol(Some(')')) {
            return Ok(());
        }
        let ty = self.expect_type()?;
        let name = self.expect_identifier()?;
        let span = self.span();
        self.sub_table.define(name, ty, Kind::Argument, span)?;

        while self.current().is_symbol(Some(',')) {
            self.bump()?;
            let ty = self.expect_type()?;
            let name = self.expect_identifier()?;
            let span = self.span();
            self.sub_table.define(name, ty, Kind::Argument, span)?;
        }
        Ok(())
    }

    /// `varDec` -> `var` <type> <name> (`,` <name>)* `;`
    fn compile_var_dec(&mut self) -> CompileResult<()> {
        self.expect_keyword(Keyword::Var)?;
        let ty = self.expect_type()?;

        let name = self.expect_identifier()?;
        let span = self.span();
        self.sub_table.define(name, ty, Kind::Local, span)?;
        while self.current().is_symbol(Some(',')) {
            self.bump()?;
            let name = self.expect_identifier()?;
            let span = self.span();
            self.sub_table.define(name, ty, Kind::Local, span)?;
        }
        self.expect_symbol(';')?;
        Ok(())
    }
}
