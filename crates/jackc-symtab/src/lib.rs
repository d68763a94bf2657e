//! Class-scope and subroutine-scope symbol tables for `jackc-compile`.

pub mod scope;

pub use scope::{Kind, SymbolTable};
