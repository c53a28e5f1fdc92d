//! Error types for parsing block configuration sources

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors that can occur while building a configuration tree
#[derive(Debug)]
pub enum ParseError {
    /// A closing tag did not match the currently open section.
    ///
    /// `expected` is `None` when the close appeared with nothing left to close.
    /// The implicit root never counts as an open section, so any close tag at
    /// top level reports `None`, whatever name it carries.
    StructuralMismatch {
        expected: Option<String>,
        found: String,
        line: usize,
    },
    /// End of input reached with a section still open (strict mode only)
    UnclosedSection { name: String, line: usize },
    /// The underlying source could not be read
    Io { path: Option<PathBuf>, source: io::Error },
}

impl ParseError {
    /// Line number the error was raised at, when it came from the input itself
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::StructuralMismatch { line, .. } => Some(*line),
            ParseError::UnclosedSection { line, .. } => Some(*line),
            ParseError::Io { .. } => None,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::StructuralMismatch {
                expected: Some(expected),
                found,
                line,
            } => write!(
                f,
                "line {}: section mismatch: '</{}>' should close '<{}>'",
                line, found, expected
            ),
            ParseError::StructuralMismatch {
                expected: None,
                found,
                line,
            } => write!(
                f,
                "line {}: section mismatch: '</{}>' has no open section to close",
                line, found
            ),
            ParseError::UnclosedSection { name, line } => {
                write!(f, "line {}: section '<{}>' is never closed", line, name)
            }
            ParseError::Io {
                path: Some(path),
                source,
            } => write!(f, "failed to read {}: {}", path.display(), source),
            ParseError::Io { path: None, source } => write!(f, "failed to read input: {}", source),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result alias used by the parse entry points
pub type ParseResult<T> = Result<T, ParseError>;
