/*
 * design_system.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The registry of utility roots and variants a candidate is parsed against.
//!
//! # Configuration
//!
//! A design system can be described in TOML:
//!
//! ```toml
//! include_defaults = true
//!
//! [utilities]
//! static = ["btn"]
//! functional = ["tab-size"]
//!
//! [variants]
//! static = ["hocus"]
//! functional = ["theme"]
//! compound = ["ancestor"]
//! non_compounding = []
//! ```

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::error::{DesignSystemError, Result};

/// How a utility root consumes the rest of a class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtilityKind {
    /// The whole class name is the utility, e.g. `underline`.
    Static,
    /// A root followed by a value, e.g. `bg` in `bg-red-500`.
    Functional,
}

/// How a variant root consumes the rest of the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// `hover`
    Static,
    /// `data-[state=open]`, `supports-grid`
    Functional,
    /// `group-hover`: wraps another variant.
    Compound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VariantEntry {
    kind: VariantKind,
    compounds: bool,
}

/// Registry of known utilities and variants.
#[derive(Debug, Clone, Default)]
pub struct DesignSystem {
    static_utilities: HashSet<String>,
    functional_utilities: HashSet<String>,
    variants: HashMap<String, VariantEntry>,
}

/// `[utilities]` table of a design system configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UtilityConfig {
    #[serde(rename = "static")]
    pub static_roots: Vec<String>,
    pub functional: Vec<String>,
}

/// `[variants]` table of a design system configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantConfig {
    #[serde(rename = "static")]
    pub static_roots: Vec<String>,
    pub functional: Vec<String>,
    pub compound: Vec<String>,
    /// Variants that cannot be wrapped by a compound variant
    /// (pseudo-elements such as `before`).
    pub non_compounding: Vec<String>,
}

/// Deserialized design system configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DesignSystemConfig {
    /// Start from [`DesignSystem::tailwind_default`] instead of an empty registry.
    pub include_defaults: bool,
    pub utilities: UtilityConfig,
    pub variants: VariantConfig,
}

const DEFAULT_STATIC_UTILITIES: &[&str] = &[
    "block",
    "box-border",
    "box-content",
    "capitalize",
    "container",
    "contents",
    "flex",
    "grid",
    "hidden",
    "inline",
    "inline-block",
    "inline-flex",
    "inset-auto",
    "inset-full",
    "-inset-full",
    "italic",
    "line-through",
    "lowercase",
    "no-underline",
    "overline",
    "sr-only",
    "truncate",
    "underline",
    "uppercase",
];

const DEFAULT_FUNCTIONAL_UTILITIES: &[&str] = &[
    "bg",
    "border",
    "bottom",
    "col-span",
    "fill",
    "font",
    "gap",
    "grid-cols",
    "h",
    "inset",
    "inset-x",
    "inset-y",
    "leading",
    "left",
    "m",
    "mx",
    "my",
    "opacity",
    "outline",
    "p",
    "px",
    "py",
    "right",
    "ring",
    "rotate",
    "rounded",
    "scale",
    "shadow",
    "space-x",
    "space-y",
    "stroke",
    "text",
    "top",
    "tracking",
    "translate-x",
    "translate-y",
    "w",
    "z",
];

const DEFAULT_STATIC_VARIANTS: &[&str] = &[
    "2xl",
    "active",
    "dark",
    "disabled",
    "even",
    "first",
    "focus",
    "focus-visible",
    "focus-within",
    "hover",
    "last",
    "lg",
    "md",
    "motion-reduce",
    "motion-safe",
    "odd",
    "print",
    "sm",
    "visited",
    "xl",
];

const DEFAULT_PSEUDO_ELEMENT_VARIANTS: &[&str] = &[
    "after",
    "before",
    "file",
    "marker",
    "placeholder",
    "selection",
];

const DEFAULT_FUNCTIONAL_VARIANTS: &[&str] = &["aria", "data", "max", "min", "supports"];

const DEFAULT_COMPOUND_VARIANTS: &[&str] = &["group", "has", "in", "not", "peer"];

impl DesignSystem {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A built-in subset of the framework's default registry.
    pub fn tailwind_default() -> Self {
        let mut design_system = Self::new();
        for name in DEFAULT_STATIC_UTILITIES {
            design_system.register_static_utility(*name);
        }
        for name in DEFAULT_FUNCTIONAL_UTILITIES {
            design_system.register_functional_utility(*name);
        }
        for name in DEFAULT_STATIC_VARIANTS {
            design_system.register_variant(*name, VariantKind::Static, true);
        }
        for name in DEFAULT_PSEUDO_ELEMENT_VARIANTS {
            design_system.register_variant(*name, VariantKind::Static, false);
        }
        for name in DEFAULT_FUNCTIONAL_VARIANTS {
            design_system.register_variant(*name, VariantKind::Functional, true);
        }
        for name in DEFAULT_COMPOUND_VARIANTS {
            design_system.register_variant(*name, VariantKind::Compound, true);
        }
        design_system
    }

    /// Build a registry from a deserialized configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DesignSystemError::EmptyName`] for empty entries and
    /// [`DesignSystemError::ConflictingVariant`] when one variant name is
    /// listed under two kinds.
    pub fn from_config(config: &DesignSystemConfig) -> Result<Self> {
        let mut design_system = if config.include_defaults {
            Self::tailwind_default()
        } else {
            Self::new()
        };

        for name in &config.utilities.static_roots {
            ensure_named(name, "utilities")?;
            design_system.register_static_utility(name.clone());
        }
        for name in &config.utilities.functional {
            ensure_named(name, "utilities")?;
            design_system.register_functional_utility(name.clone());
        }

        let variants = &config.variants;
        let mut seen: HashMap<&str, VariantKind> = HashMap::new();
        let kinds = [
            (&variants.static_roots, VariantKind::Static),
            (&variants.functional, VariantKind::Functional),
            (&variants.compound, VariantKind::Compound),
        ];
        for (names, kind) in kinds {
            for name in names {
                ensure_named(name, "variants")?;
                if seen.insert(name, kind).is_some_and(|previous| previous != kind) {
                    return Err(DesignSystemError::ConflictingVariant { name: name.clone() });
                }
                let compounds = !variants.non_compounding.contains(name);
                design_system.register_variant(name.clone(), kind, compounds);
            }
        }
        for name in &variants.non_compounding {
            if let Some(entry) = design_system.variants.get_mut(name) {
                entry.compounds = false;
            }
        }

        Ok(design_system)
    }

    /// Parse a TOML configuration and build a registry from it.
    ///
    /// # Example
    ///
    /// ```
    /// use tailwind_candidate::{DesignSystem, UtilityKind};
    ///
    /// let design_system = DesignSystem::from_toml(r#"
    /// [utilities]
    /// functional = ["tab-size"]
    /// "#).unwrap();
    /// assert!(design_system.has_utility("tab-size", UtilityKind::Functional));
    /// ```
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: DesignSystemConfig = toml::from_str(source)?;
        Self::from_config(&config)
    }

    pub fn register_static_utility(&mut self, name: impl Into<String>) {
        self.static_utilities.insert(name.into());
    }

    pub fn register_functional_utility(&mut self, name: impl Into<String>) {
        self.functional_utilities.insert(name.into());
    }

    /// Register (or re-register) a variant.
    pub fn register_variant(&mut self, name: impl Into<String>, kind: VariantKind, compounds: bool) {
        self.variants
            .insert(name.into(), VariantEntry { kind, compounds });
    }

    pub fn has_utility(&self, root: &str, kind: UtilityKind) -> bool {
        match kind {
            UtilityKind::Static => self.static_utilities.contains(root),
            UtilityKind::Functional => self.functional_utilities.contains(root),
        }
    }

    pub fn has_variant(&self, name: &str) -> bool {
        self.variants.contains_key(name)
    }

    pub fn variant_kind(&self, name: &str) -> Option<VariantKind> {
        self.variants.get(name).map(|entry| entry.kind)
    }

    /// Whether the variant may be wrapped by a compound variant.
    /// Unknown variants do not compound.
    pub fn variant_compounds(&self, name: &str) -> bool {
        self.variants.get(name).is_some_and(|entry| entry.compounds)
    }
}

fn ensure_named(name: &str, section: &'static str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DesignSystemError::EmptyName { section });
    }
    Ok(())
}
