//! String interning for identifiers and class/subroutine names.
//!
//! Every local variable, field, and subroutine name in a Jack source file is
//! re-mentioned at each use site, so interning turns repeated `String`
//! comparisons in `SymbolTable` lookups and VM-call target construction into
//! `u32` comparisons. The table is process-global and append-only, matching
//! the "leak on purpose" tradeoff of a short-lived compiler process.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;

/// A compact handle to an interned string.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    pub fn intern(s: &str) -> Self {
        INTERNER.with(|i| i.borrow_mut().intern(s))
    }

    pub fn as_str(&self) -> &'static str {
        INTERNER.with(|i| i.borrow().resolve(*self))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

struct Interner {
    index: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            strings: Vec::new(),
        }
    }

    fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&id) = self.index.get(s) {
            return Symbol(id);
        }
        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        let id = self.strings.len() as u32;
        self.strings.push(leaked);
        self.index.insert(leaked, id);
        Symbol(id)
    }

    fn resolve(&self, sym: Symbol) -> &'static str {
        self.strings[sym.0 as usize]
    }
}

thread_local! {
    static INTERNER: RefCell<Interner> = RefCell::new(Interner::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_string_interns_to_same_symbol() {
        assert_eq!(Symbol::intern("x"), Symbol::intern("x"));
    }

    #[test]
    fn different_strings_intern_to_different_symbols() {
        assert_ne!(Symbol::intern("x"), Symbol::intern("y"));
    }

    #[test]
    fn round_trips_through_as_str() {
        let sym = Symbol::intern("doAThing");
        assert_eq!(sym.as_str(), "doAThing");
    }

    #[quickcheck_macros::quickcheck]
    fn intern_round_trip(s: String) -> bool {
        if s.is_empty() {
            return true;
        }
        Symbol::intern(&s).as_str() == s
    }
}
