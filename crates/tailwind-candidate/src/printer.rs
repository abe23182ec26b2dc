/*
 * printer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Canonical printing of candidates.
//!
//! The canonical form differs from the raw input only in normalizations that
//! do not change meaning; most notably importance is always written as a
//! trailing `!` (`!underline` prints as `underline!`).

use crate::candidate::{
    Candidate, CandidateModifier, CandidateValue, Variant, VariantValue, parse_candidate,
};
use crate::design_system::DesignSystem;
use crate::segment::encode_arbitrary_value;

/// Print a candidate in canonical form.
///
/// # Example
///
/// ```
/// use tailwind_candidate::{DesignSystem, parse_candidate, print_candidate};
///
/// let design_system = DesignSystem::tailwind_default();
/// let candidate = &parse_candidate("!bg-[#0088cc]", &design_system)[0];
/// assert_eq!(print_candidate(candidate), "bg-[#0088cc]!");
/// ```
pub fn print_candidate(candidate: &Candidate) -> String {
    let mut base = String::new();

    match candidate {
        Candidate::Arbitrary {
            property,
            value,
            modifier,
            ..
        } => {
            base.push('[');
            base.push_str(property);
            base.push(':');
            base.push_str(&encode_arbitrary_value(value));
            base.push(']');
            push_modifier(&mut base, modifier.as_ref());
        }
        Candidate::Static { root, negative, .. } => {
            if *negative {
                base.push('-');
            }
            base.push_str(root);
        }
        Candidate::Functional {
            root,
            value,
            modifier,
            negative,
            ..
        } => {
            if *negative {
                base.push('-');
            }
            base.push_str(root);
            if let Some(value) = value {
                base.push('-');
                match value {
                    CandidateValue::Arbitrary { data_type, value } => {
                        base.push('[');
                        if let Some(data_type) = data_type {
                            base.push_str(data_type);
                            base.push(':');
                        }
                        base.push_str(&encode_arbitrary_value(value));
                        base.push(']');
                    }
                    CandidateValue::Named { value, .. } => base.push_str(value),
                }
            }
            push_modifier(&mut base, modifier.as_ref());
        }
    }

    if candidate.important() {
        base.push('!');
    }

    let mut parts: Vec<String> = candidate.variants().iter().rev().map(print_variant).collect();
    parts.push(base);
    parts.join(":")
}

/// Print a single variant in canonical form.
pub fn print_variant(variant: &Variant) -> String {
    match variant {
        Variant::Arbitrary { selector, .. } => format!("[{}]", encode_arbitrary_value(selector)),
        Variant::Static { root, .. } => root.clone(),
        Variant::Functional {
            root,
            value,
            modifier,
            ..
        } => {
            let mut out = root.clone();
            match value {
                Some(VariantValue::Arbitrary { value }) => {
                    out.push_str("-[");
                    out.push_str(&encode_arbitrary_value(value));
                    out.push(']');
                }
                Some(VariantValue::Named { value }) => {
                    out.push('-');
                    out.push_str(value);
                }
                None => {}
            }
            push_modifier(&mut out, modifier.as_ref());
            out
        }
        Variant::Compound {
            root,
            modifier,
            variant,
            ..
        } => {
            let mut out = format!("{root}-{}", print_variant(variant));
            push_modifier(&mut out, modifier.as_ref());
            out
        }
    }
}

/// Parse `raw` and return the distinct canonical forms, in parse order.
///
/// A single class name can parse to several candidates that print the same
/// way (`-inset-full` is both a static and a negative functional utility);
/// those collapse into one entry.
pub fn canonicalize(raw: &str, design_system: &DesignSystem) -> Vec<String> {
    let mut printed: Vec<String> = Vec::new();
    for candidate in parse_candidate(raw, design_system) {
        let text = print_candidate(&candidate);
        if !printed.contains(&text) {
            printed.push(text);
        }
    }
    printed
}

fn push_modifier(out: &mut String, modifier: Option<&CandidateModifier>) {
    match modifier {
        Some(CandidateModifier::Arbitrary { value }) => {
            out.push_str("/[");
            out.push_str(&encode_arbitrary_value(value));
            out.push(']');
        }
        Some(CandidateModifier::Named { value }) => {
            out.push('/');
            out.push_str(value);
        }
        None => {}
    }
}
