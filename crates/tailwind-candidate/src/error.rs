/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for design system configuration.
//!
//! Candidate parsing itself never fails: input that does not match the
//! design system simply produces no candidates.

use thiserror::Error;

/// Errors that can occur while building a [`DesignSystem`](crate::DesignSystem)
/// from configuration.
#[derive(Debug, Error)]
pub enum DesignSystemError {
    /// The configuration is not valid TOML or does not match the schema.
    #[error("Invalid design system configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A utility or variant name was empty.
    #[error("Empty name in [{section}]")]
    EmptyName { section: &'static str },

    /// The same variant was registered with two different kinds.
    #[error("Variant '{name}' is listed under more than one kind")]
    ConflictingVariant { name: String },
}

/// Result type for design system operations.
pub type Result<T> = std::result::Result<T, DesignSystemError>;
