/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for stylesheet parsing.

use std::fmt;

use thiserror::Error;

/// A 1-based line/column location in the parsed source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// Compute the position of a byte offset in `source`.
    ///
    /// Columns count characters, not bytes.
    pub fn from_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let prefix = &source[..offset];
        let line = prefix.matches('\n').count() + 1;
        let line_start = prefix.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = prefix[line_start..].chars().count() + 1;
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors that can occur while parsing a stylesheet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CssError {
    /// A `{` was never matched by a `}`.
    #[error("Unclosed block opened at {position}")]
    UnclosedBlock { position: Position },

    /// A `/*` was never matched by a `*/`.
    #[error("Unclosed comment starting at {position}")]
    UnclosedComment { position: Position },

    /// A quoted string ran to the end of input.
    #[error("Unclosed string starting at {position}")]
    UnclosedString { position: Position },

    /// A `}` appeared at the top level.
    #[error("Unexpected '}}' at {position}")]
    UnexpectedCloseBrace { position: Position },

    /// A statement that is neither an at-rule, a rule nor a declaration.
    #[error("Unknown word '{word}' at {position}")]
    UnknownWord { word: String, position: Position },
}

/// Result type for stylesheet operations.
pub type Result<T> = std::result::Result<T, CssError>;
