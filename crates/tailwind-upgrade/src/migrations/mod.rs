/*
 * migrations/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Concrete stylesheet migrations.

mod missing_layers;

pub use missing_layers::{
    Layer, LayerName, MigrateMissingLayers, NodeRole, classify, migrate_missing_layers,
};
