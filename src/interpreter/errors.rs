use std::io;
use thiserror::Error;

/// Runtime error taxonomy. Every variant that can originate from script
/// execution carries the source line for diagnostics.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeError {
    #[error("UndefinedVariable at line {line}: Undefined variable '{name}'")]
    UndefinedVariable { name: String, line: usize },

    #[error("TypeMismatch at line {line}: {message}")]
    TypeMismatch { message: String, line: usize },

    #[error("ArityMismatch at line {line}: {message}")]
    ArityMismatch { message: String, line: usize },

    #[error("IndexOutOfBounds at line {line}: {message}")]
    IndexOutOfBounds { message: String, line: usize },

    #[error("DivisionByZero at line {line}: Division by zero")]
    DivisionByZero { line: usize },

    #[error("StackOverflow at line {line}: Call depth exceeded {limit} frames")]
    StackOverflow { line: usize, limit: usize },

    #[error("AssertionFailed at line {line}: {message}")]
    AssertionFailed { message: String, line: usize },

    #[error("ImportNotFound at line {line}: Module '{path}' not found")]
    ImportNotFound { path: String, line: usize },

    #[error("ImportParseError at line {line}: {message}")]
    ImportParseError { message: String, line: usize },

    #[error("UnknownBuiltin at line {line}: Unknown builtin '{name}'")]
    UnknownBuiltin { name: String, line: usize },

    #[error("IoError: {0}")]
    Io(String),
}

impl From<io::Error> for RuntimeError {
    fn from(value: io::Error) -> Self {
        RuntimeError::Io(value.to_string())
    }
}

impl RuntimeError {
    /// Source line the error refers to, when one exists.
    pub fn line(&self) -> Option<usize> {
        match self {
            RuntimeError::UndefinedVariable { line, .. }
            | RuntimeError::TypeMismatch { line, .. }
            | RuntimeError::ArityMismatch { line, .. }
            | RuntimeError::IndexOutOfBounds { line, .. }
            | RuntimeError::DivisionByZero { line }
            | RuntimeError::StackOverflow { line, .. }
            | RuntimeError::AssertionFailed { line, .. }
            | RuntimeError::ImportNotFound { line, .. }
            | RuntimeError::ImportParseError { line, .. }
            | RuntimeError::UnknownBuiltin { line, .. } => Some(*line),
            RuntimeError::Io(_) => None,
        }
    }
}
