//! The single error type threaded through `Lexer`, `SymbolTable`, and
//! `CompilationEngine`.
//!
//! Compilation halts at the first violation (no error recovery), so there is
//! one flat enum rather than per-phase error types that would need merging
//! at the driver boundary.

use crate::span::Span;
use std::fmt;
use thiserror::Error;

/// Severity of a diagnostic. Jack compilation never downgrades a violation
/// to a warning, so `Error` is the only variant, kept as an enum rather than
/// a unit struct so a future non-fatal diagnostic has somewhere to go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
        }
    }
}

/// A positioned, leveled message. `CompileError` carries the same
/// information typed by phase; `Diagnostic` is what the driver prints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.span, self.level, self.message)
    }
}

/// One variant per phase of the pipeline. Each carries the `Span` of the
/// lexeme or construct that triggered it so the driver can render
/// `"{file}:{line}:{column}: error: {msg}"` without re-deriving position.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{span}: error: {message}")]
    Lex { span: Span, message: String },

    #[error("{span}: error: {message}")]
    Parse { span: Span, message: String },

    #[error("{span}: error: {message}")]
    Symbol { span: Span, message: String },

    #[error("{span}: error: {message}")]
    Emit { span: Span, message: String },
}

impl CompileError {
    pub fn span(&self) -> Span {
        match self {
            CompileError::Lex { span, .. }
            | CompileError::Parse { span, .. }
            | CompileError::Symbol { span, .. }
            | CompileError::Emit { span, .. } => *span,
        }
    }

    pub fn lex(span: Span, message: impl Into<String>) -> Self {
        CompileError::Lex {
            span,
            message: message.into(),
        }
    }

    pub fn parse(span: Span, message: impl Into<String>) -> Self {
        CompileError::Parse {
            span,
            message: message.into(),
        }
    }

    pub fn symbol(span: Span, message: impl Into<String>) -> Self {
        CompileError::Symbol {
            span,
            message: message.into(),
        }
    }

    pub fn emit(span: Span, message: impl Into<String>) -> Self {
        CompileError::Emit {
            span,
            message: message.into(),
        }
    }

    /// Render with a leading filename, matching `jackc-drv`'s CLI output.
    pub fn display_with_file(&self, file: &str) -> String {
        let span = self.span();
        let message = match self {
            CompileError::Lex { message, .. }
            | CompileError::Parse { message, .. }
            | CompileError::Symbol { message, .. }
            | CompileError::Emit { message, .. } => message,
        };
        format!("{file}:{span}: error: {message}")
    }
}

pub type CompileResult<T> = std::result::Result<T, CompileError>;
