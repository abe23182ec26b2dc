/*
 * missing_layers.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Wrap implicitly layered content in explicit `@layer` blocks.
//!
//! Tailwind v3 stylesheets mark layer regions with boundary directives:
//!
//! ```css
//! @tailwind base;
//! html { color: black; }
//! @tailwind components;
//! .btn { padding: 1rem; }
//! @tailwind utilities;
//! ```
//!
//! or with the equivalent `@import "tailwindcss/base"` form. Everything
//! between two boundaries implicitly belongs to the layer opened by the
//! first one. This migration makes that explicit:
//!
//! ```css
//! @tailwind base;
//! @layer base {
//!   html { color: black; }
//! }
//! @tailwind components;
//! @layer components {
//!   .btn { padding: 1rem; }
//! }
//! @tailwind utilities;
//! ```
//!
//! Only the immediate children of the root are inspected. A bucket is only
//! closed by the next boundary, exempt directive, `@layer` or `@import`, so
//! content before the first boundary or after the last one is left alone.
//! `@theme`/`@utility` blocks are never wrapped.

use once_cell::sync::Lazy;
use regex::Regex;
use tailwind_css_ast::{NodeId, Raws, Stylesheet};

use crate::Result;
use crate::migration::CssMigration;

/// Name of a cascade layer. The empty string means no layer is active yet.
pub type LayerName = String;

/// `@import "tailwindcss/<layer>"` with either quote character.
static LEGACY_LAYER_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^["']tailwindcss/(base|components|utilities)["']"#).unwrap());

/// What a top-level node means to the layer scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// `@theme` or `@utility`: must stay outside any layer.
    LayerExempt,
    /// `@tailwind <layer>` or `@import "tailwindcss/<layer>"`.
    Boundary(Layer),
    /// An explicit `@layer` rule.
    AlreadyScoped,
    /// Any other `@import`.
    Import,
    Content,
}

/// The three layers a legacy boundary can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Base,
    Components,
    Utilities,
}

impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Layer::Base => "base",
            Layer::Components => "components",
            Layer::Utilities => "utilities",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "base" => Some(Layer::Base),
            "components" => Some(Layer::Components),
            "utilities" => Some(Layer::Utilities),
            _ => None,
        }
    }
}

/// Classify a node. Rules are checked in priority order; anything that is
/// not a recognized at-rule is content.
pub fn classify(sheet: &Stylesheet, id: NodeId) -> NodeRole {
    let Some(at_rule) = sheet.at_rule(id) else {
        return NodeRole::Content;
    };

    match at_rule.name.as_str() {
        "theme" | "utility" => NodeRole::LayerExempt,
        "tailwind" => match Layer::from_name(&at_rule.params) {
            Some(layer) => NodeRole::Boundary(layer),
            None => NodeRole::Content,
        },
        "layer" => NodeRole::AlreadyScoped,
        "import" => {
            let legacy = LEGACY_LAYER_IMPORT
                .captures(&at_rule.params)
                .and_then(|caps| caps.get(1))
                .and_then(|layer| Layer::from_name(layer.as_str()));
            match legacy {
                Some(layer) => NodeRole::Boundary(layer),
                None => NodeRole::Import,
            }
        }
        _ => NodeRole::Content,
    }
}

/// State threaded through the forward scan.
#[derive(Debug, Default)]
struct LayerScan {
    current_layer: LayerName,
    bucket: Vec<NodeId>,
    deferred: Vec<(LayerName, Vec<NodeId>)>,
}

impl LayerScan {
    /// Close the open bucket, if it holds anything.
    fn flush(&mut self) {
        if self.bucket.is_empty() {
            return;
        }
        let nodes = std::mem::take(&mut self.bucket);
        tracing::trace!(layer = %self.current_layer, nodes = nodes.len(), "Flushing bucket");
        self.deferred.push((self.current_layer.clone(), nodes));
    }

    fn visit(&mut self, sheet: &mut Stylesheet, id: NodeId) {
        match classify(sheet, id) {
            NodeRole::LayerExempt | NodeRole::AlreadyScoped => self.flush(),
            NodeRole::Boundary(layer) => {
                self.flush();
                self.current_layer = layer.as_str().to_string();
            }
            NodeRole::Import => {
                if let Some(import) = sheet.at_rule_mut(id)
                    && !import.params.contains("layer(")
                {
                    import.params.push_str(&format!(" layer({})", self.current_layer));
                    tracing::debug!(params = %import.params, "Tagged import with layer");
                }
                self.flush();
            }
            NodeRole::Content => {
                if !self.current_layer.is_empty() {
                    self.bucket.push(id);
                }
            }
        }
    }
}

/// Wrap runs of top-level nodes between a layer boundary and the next flush
/// point in an explicit `@layer` block, and tag plain `@import`s with the
/// active layer.
pub fn migrate_missing_layers(sheet: &mut Stylesheet) {
    let root = sheet.root();
    let children = sheet.children(root).to_vec();

    let mut scan = LayerScan::default();
    for id in children {
        scan.visit(sheet, id);
    }

    for (layer, nodes) in scan.deferred {
        let Some((&target, rest)) = nodes.split_first() else {
            continue;
        };

        for &node in rest {
            sheet.remove(node);
        }

        let wrapper = sheet.create_at_rule(
            "layer",
            layer.as_str(),
            Raws {
                pretty: true,
                ..Raws::default()
            },
        );
        sheet.replace_with(target, wrapper);
        for &node in &nodes {
            sheet.append(wrapper, node);
        }

        tracing::debug!(layer = %layer, nodes = nodes.len(), "Wrapped nodes in @layer");
    }
}

/// [`migrate_missing_layers`] as a pipeline step.
#[derive(Debug, Default, Clone, Copy)]
pub struct MigrateMissingLayers;

impl CssMigration for MigrateMissingLayers {
    fn name(&self) -> &str {
        "migrate-missing-layers"
    }

    fn migrate(&self, sheet: &mut Stylesheet) -> Result<()> {
        migrate_missing_layers(sheet);
        Ok(())
    }
}
