/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Stylesheet migrations for upgrading Tailwind CSS projects.
//!
//! This crate provides:
//! - [`CssMigration`] and [`MigrationPipeline`] for running ordered rewrites
//!   over a parsed [`Stylesheet`](tailwind_css_ast::Stylesheet)
//! - [`MigrateMissingLayers`], which wraps content that implicitly belongs to
//!   a legacy layer in an explicit `@layer` block
//! - [`migrate_css`], a source-to-source entry point running the default
//!   pipeline
//!
//! # Example
//!
//! ```
//! let css = tailwind_upgrade::migrate_css(
//!     "@tailwind base;\nhtml { color: black; }\n@tailwind components;\n",
//! )
//! .unwrap();
//! assert_eq!(
//!     css,
//!     "@tailwind base;\n@layer base {\n  html { color: black; }\n}\n@tailwind components;\n"
//! );
//! ```

mod error;
mod migration;
pub mod migrations;

pub use error::{Result, UpgradeError};
pub use migration::{CssMigration, MigrationPipeline};
pub use migrations::{MigrateMissingLayers, migrate_missing_layers};

use tailwind_css_ast::parse_stylesheet;

/// Parse `source`, run the default migrations and print the result.
///
/// # Errors
///
/// Returns [`UpgradeError::Parse`] if `source` is not a well-formed
/// stylesheet, or the error of the first migration that fails.
pub fn migrate_css(source: &str) -> Result<String> {
    let mut sheet = parse_stylesheet(source)?;
    MigrationPipeline::with_default_migrations().execute(&mut sheet)?;
    Ok(sheet.to_css())
}
