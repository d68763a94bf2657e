//! Tokenizes preprocessed Jack source into the stream `jackc-compile`'s
//! `CompilationEngine` drives.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{Keyword, Token};
