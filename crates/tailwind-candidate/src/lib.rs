/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Utility class candidates for the Tailwind upgrade tooling.
//!
//! A *candidate* is a class name such as `hover:bg-red-500/50!` parsed into
//! its structured parts: variants, a root, an optional value and modifier,
//! and importance / negative flags. This crate provides:
//!
//! - [`DesignSystem`] - the registry of known utility roots and variants
//! - [`parse_candidate`] - raw class name to zero or more [`Candidate`]s
//! - [`print_candidate`] - a [`Candidate`] back to its canonical text
//! - [`canonicalize`] - parse, print and deduplicate in one step
//! - [`extract_candidates`] - find candidates (with offsets) in template text
//!
//! # Example
//!
//! ```
//! use tailwind_candidate::{DesignSystem, canonicalize};
//!
//! let design_system = DesignSystem::tailwind_default();
//! assert_eq!(canonicalize("!bg-red-500", &design_system), vec!["bg-red-500!"]);
//! ```

mod candidate;
mod design_system;
mod error;
mod extract;
mod printer;
mod segment;

pub use candidate::{
    Candidate, CandidateModifier, CandidateValue, Variant, VariantValue, parse_candidate,
    parse_variant,
};
pub use design_system::{
    DesignSystem, DesignSystemConfig, UtilityConfig, UtilityKind, VariantConfig, VariantKind,
};
pub use error::{DesignSystemError, Result};
pub use extract::{LocatedCandidate, extract_candidates};
pub use printer::{canonicalize, print_candidate, print_variant};
pub use segment::{decode_arbitrary_value, encode_arbitrary_value, segment};
