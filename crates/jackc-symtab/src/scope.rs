//! The two-table binding model: one class-scope table, one subroutine-scope
//! table, each with its own per-kind counters. Unlike `faxc-sem`'s
//! `Rib`/`ScopeTree` (arbitrary lexical nesting resolved by walking parent
//! ribs), Jack has exactly two flat scopes and no nesting, so there is no
//! scope stack here — `CompilationEngine` just owns one of each and queries
//! them explicitly in order (subroutine table, then class table).

use jackc_util::{CompileError, CompileResult, Span, Symbol};
use rustc_hash::FxHashMap;

/// Storage class of a bound identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Static,
    Field,
    Argument,
    Local,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Static, Kind::Field, Kind::Argument, Kind::Local];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Entry {
    ty: Symbol,
    kind: Kind,
    index: u16,
}

/// A scope-local binding registry. One instance is the class table (holds
/// only `Static`/`Field` entries); another is the subroutine table (holds
/// only `Argument`/`Local`). Which kinds a given table is used for is a
/// convention enforced by `CompilationEngine`, not by this type, mirroring
/// `symbol_table.py`'s single generic table used both ways.
#[derive(Default)]
pub struct SymbolTable {
    entries: FxHashMap<Symbol, Entry>,
    counters: [u16; 4],
}

fn kind_slot(kind: Kind) -> usize {
    match kind {
        Kind::Static => 0,
        Kind::Field => 1,
        Kind::Argument => 2,
        Kind::Local => 3,
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties the table and zeroes all four kind counters.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.counters = [0; 4];
    }

    /// Binds `name`, assigning it the next index for `kind`. Fails if `name`
    /// is already present in this table.
    pub fn define(&mut self, name: Symbol, ty: Symbol, kind: Kind, span: Span) -> CompileResult<u16> {
        if self.entries.contains_key(&name) {
            return Err(CompileError::symbol(
                span,
                format!("duplicate declaration of `{name}`"),
            ));
        }
        let slot = kind_slot(kind);
        let index = self.counters[slot];
        self.counters[slot] += 1;
        self.entries.insert(name, Entry { ty, kind, index });
        Ok(index)
    }

    /// Current count of bindings for `kind` (also the index the next
    /// `define` with that kind would receive).
    pub fn count(&self, kind: Kind) -> u16 {
        self.counters[kind_slot(kind)]
    }

    pub fn contains(&self, name: Symbol) -> bool {
        self.entries.contains_key(&name)
    }

    pub fn kind_of(&self, name: Symbol) -> Option<Kind> {
        self.entries.get(&name).map(|e| e.kind)
    }

    pub fn type_of(&self, name: Symbol) -> Option<Symbol> {
        self.entries.get(&name).map(|e| e.ty)
    }

    pub fn index_of(&self, name: Symbol) -> Option<u16> {
        self.entries.get(&name).map(|e| e.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defines_assign_dense_zero_based_indices_per_kind() {
        let mut table = SymbolTable::new();
        let int_ty = Symbol::intern("int");
        table
            .define(Symbol::intern("a"), int_ty, Kind::Argument, Span::DUMMY)
            .unwrap();
        table
            .define(Symbol::intern("b"), int_ty, Kind::Argument, Span::DUMMY)
            .unwrap();
        table
            .define(Symbol::intern("x"), int_ty, Kind::Local, Span::DUMMY)
            .unwrap();

        assert_eq!(table.index_of(Symbol::intern("a")), Some(0));
        assert_eq!(table.index_of(Symbol::intern("b")), Some(1));
        assert_eq!(table.index_of(Symbol::intern("x")), Some(0));
        assert_eq!(table.count(Kind::Argument), 2);
        assert_eq!(table.count(Kind::Local), 1);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut table = SymbolTable::new();
        let int_ty = Symbol::intern("int");
        table
            .define(Symbol::intern("a"), int_ty, Kind::Local, Span::DUMMY)
            .unwrap();
        assert!(table
            .define(Symbol::intern("a"), int_ty, Kind::Local, Span::DUMMY)
            .is_err());
    }

    #[test]
    fn reset_clears_entries_and_counters() {
        let mut table = SymbolTable::new();
        table
            .define(Symbol::intern("a"), Symbol::intern("int"), Kind::Local, Span::DUMMY)
            .unwrap();
        table.reset();
        assert_eq!(table.count(Kind::Local), 0);
        assert!(!table.contains(Symbol::intern("a")));
    }

    #[quickcheck_macros::quickcheck]
    fn indices_for_a_kind_form_a_dense_zero_based_range(names: Vec<String>) -> bool {
        let mut table = SymbolTable::new();
        let mut defined = 0u16;
        let int_ty = Symbol::intern("int");
        for name in names {
            if name.is_empty() {
                continue;
            }
            let sym = Symbol::intern(&name);
            if table.contains(sym) {
                continue;
            }
            if table
                .define(sym, int_ty, Kind::Local, Span::DUMMY)
                .is_err()
            {
                return false;
            }
            defined += 1;
        }
        table.count(Kind::Local) == defined
    }
}
