/*
 * migration.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Stylesheet migration pipeline infrastructure.
 */

//! Stylesheet migration pipeline infrastructure.
//!
//! - [`CssMigration`] - The trait implemented by all stylesheet migrations
//! - [`MigrationPipeline`] - Ordered collection of migrations to execute
//!
//! Migrations run in a flat, ordered sequence (insertion order). Each one
//! receives the whole parsed [`Stylesheet`] and may restructure it freely;
//! node handles collected by an earlier migration are still valid in a
//! later one because the tree never frees nodes.
//!
//! # Example
//!
//! ```
//! use tailwind_css_ast::{Stylesheet, parse_stylesheet};
//! use tailwind_upgrade::{CssMigration, MigrationPipeline, Result};
//!
//! struct DropComments;
//!
//! impl CssMigration for DropComments {
//!     fn name(&self) -> &str { "drop-comments" }
//!
//!     fn migrate(&self, sheet: &mut Stylesheet) -> Result<()> {
//!         let comments: Vec<_> = sheet
//!             .descendants(sheet.root())
//!             .into_iter()
//!             .filter(|&id| sheet.node(id).as_comment().is_some())
//!             .collect();
//!         for id in comments {
//!             sheet.remove(id);
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut pipeline = MigrationPipeline::new();
//! pipeline.push(Box::new(DropComments));
//!
//! let mut sheet = parse_stylesheet("/* x */.a{}").unwrap();
//! pipeline.execute(&mut sheet).unwrap();
//! assert_eq!(sheet.to_css(), ".a{}");
//! ```

use tailwind_css_ast::Stylesheet;

use crate::Result;
use crate::migrations::MigrateMissingLayers;

/// Trait for stylesheet migrations.
///
/// Migrations must be `Send + Sync` so a single pipeline can be shared by
/// workers upgrading several files.
pub trait CssMigration: Send + Sync {
    /// Human-readable name for this migration.
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &str;

    /// Apply the migration to a stylesheet.
    ///
    /// # Errors
    ///
    /// Returns an error if the migration cannot be applied.
    fn migrate(&self, sheet: &mut Stylesheet) -> Result<()>;
}

/// A pipeline of stylesheet migrations to execute in order.
pub struct MigrationPipeline {
    migrations: Vec<Box<dyn CssMigration>>,
}

impl MigrationPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            migrations: Vec::new(),
        }
    }

    /// The migrations applied by a full upgrade, in order.
    pub fn with_default_migrations() -> Self {
        let mut pipeline = Self::new();
        pipeline.push(Box::new(MigrateMissingLayers));
        pipeline
    }

    /// Add a migration to the pipeline.
    ///
    /// Migrations run in the order they are added.
    pub fn push(&mut self, migration: Box<dyn CssMigration>) {
        self.migrations.push(migration);
    }

    pub fn len(&self) -> usize {
        self.migrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.migrations.is_empty()
    }

    /// Execute all migrations in insertion order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Execution stops on error.
    pub fn execute(&self, sheet: &mut Stylesheet) -> Result<()> {
        for migration in &self.migrations {
            tracing::debug!(migration = migration.name(), "Running migration");
            migration.migrate(sheet)?;
        }

        Ok(())
    }

    /// List the names of all migrations in execution order.
    pub fn migration_names(&self) -> Vec<&str> {
        self.migrations.iter().map(|m| m.name()).collect()
    }
}

impl Default for MigrationPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UpgradeError;
    use std::sync::{Arc, Mutex};
    use tailwind_css_ast::parse_stylesheet;

    /// Records its name into a shared log when run.
    struct RecordingMigration {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl CssMigration for RecordingMigration {
        fn name(&self) -> &str {
            self.name
        }

        fn migrate(&self, _sheet: &mut Stylesheet) -> Result<()> {
            self.log.lock().unwrap().push(self.name);
            Ok(())
        }
    }

    struct FailingMigration;

    impl CssMigration for FailingMigration {
        fn name(&self) -> &str {
            "failing"
        }

        fn migrate(&self, _sheet: &mut Stylesheet) -> Result<()> {
            Err(UpgradeError::Migration {
                migration: self.name().to_string(),
                message: "intentional failure".to_string(),
            })
        }
    }

    fn recording(name: &'static str, log: &Arc<Mutex<Vec<&'static str>>>) -> Box<dyn CssMigration> {
        Box::new(RecordingMigration {
            name,
            log: Arc::clone(log),
        })
    }

    #[test]
    fn test_empty_pipeline() {
        let pipeline = MigrationPipeline::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);

        let mut sheet = parse_stylesheet(".a{}").unwrap();
        pipeline.execute(&mut sheet).unwrap();
        assert_eq!(sheet.to_css(), ".a{}");
    }

    #[test]
    fn test_runs_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = MigrationPipeline::new();
        pipeline.push(recording("first", &log));
        pipeline.push(recording("second", &log));
        pipeline.push(recording("third", &log));

        assert_eq!(pipeline.migration_names(), vec!["first", "second", "third"]);

        let mut sheet = Stylesheet::new();
        pipeline.execute(&mut sheet).unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_stops_on_first_error() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pipeline = MigrationPipeline::default();
        pipeline.push(recording("before", &log));
        pipeline.push(Box::new(FailingMigration));
        pipeline.push(recording("after", &log));

        let mut sheet = Stylesheet::new();
        let err = pipeline.execute(&mut sheet).unwrap_err();
        assert!(matches!(err, UpgradeError::Migration { ref migration, .. } if migration == "failing"));
        assert_eq!(*log.lock().unwrap(), vec!["before"]);
    }

    #[test]
    fn test_default_migrations() {
        let pipeline = MigrationPipeline::with_default_migrations();
        assert_eq!(pipeline.migration_names(), vec!["migrate-missing-layers"]);
    }
}
