/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for stylesheet migrations.

use tailwind_css_ast::CssError;
use thiserror::Error;

/// Errors that can occur while upgrading a stylesheet.
#[derive(Debug, Error)]
pub enum UpgradeError {
    /// The input could not be parsed.
    #[error("Failed to parse stylesheet: {0}")]
    Parse(#[from] CssError),

    /// A migration gave up on the stylesheet.
    #[error("Migration '{migration}' failed: {message}")]
    Migration { migration: String, message: String },
}

/// Result type for migrations.
pub type Result<T> = std::result::Result<T, UpgradeError>;
