/*
 * candidate.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Candidate types and the candidate parser.
//!
//! A raw class name is split on top-level `:` into variants and a base. The
//! base is then matched against the [`DesignSystem`] in this order:
//!
//! 1. an exact static utility (`underline`, `-inset-full`)
//! 2. an arbitrary property (`[color:red]`)
//! 3. a functional utility root followed by a value (`bg-red-500`,
//!    `bg-[#0088cc]`), trying the longest root first
//!
//! More than one rule can match, so parsing yields a list. For example
//! `-inset-full` is both a static utility and the negative of `inset-full`.

use serde::Serialize;

use crate::design_system::{DesignSystem, UtilityKind, VariantKind};
use crate::segment::{decode_arbitrary_value, segment};

/// Modifier after a `/`: `bg-red-500/50` or `bg-red-500/[0.5]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CandidateModifier {
    Arbitrary { value: String },
    Named { value: String },
}

/// Value of a functional utility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CandidateValue {
    /// `bg-[length:10px]` has data type `length` and value `10px`.
    Arbitrary {
        #[serde(rename = "dataType")]
        data_type: Option<String>,
        value: String,
    },
    /// `w-1/2` has value `1` and fraction `1/2`.
    Named {
        value: String,
        fraction: Option<String>,
    },
}

/// Value of a functional variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VariantValue {
    Arbitrary { value: String },
    Named { value: String },
}

/// A parsed variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Variant {
    /// `[&:hover]`, `[@media(print)]`
    Arbitrary {
        selector: String,
        /// Starts with a combinator (`>`, `+`, `~`).
        relative: bool,
        compounds: bool,
    },
    Static {
        root: String,
        compounds: bool,
    },
    Functional {
        root: String,
        value: Option<VariantValue>,
        modifier: Option<CandidateModifier>,
        compounds: bool,
    },
    Compound {
        root: String,
        modifier: Option<CandidateModifier>,
        variant: Box<Variant>,
        compounds: bool,
    },
}

impl Variant {
    /// Whether this variant may be wrapped by a compound variant.
    pub fn compounds(&self) -> bool {
        match self {
            Variant::Arbitrary { compounds, .. }
            | Variant::Static { compounds, .. }
            | Variant::Functional { compounds, .. }
            | Variant::Compound { compounds, .. } => *compounds,
        }
    }
}

/// A parsed utility class name.
///
/// `variants` are stored innermost first, i.e. in reverse of the order they
/// were written: `hover:focus:flex` stores `[focus, hover]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Candidate {
    /// `[color:red]`
    Arbitrary {
        property: String,
        value: String,
        modifier: Option<CandidateModifier>,
        variants: Vec<Variant>,
        important: bool,
        raw: String,
    },
    /// `underline`
    Static {
        root: String,
        variants: Vec<Variant>,
        negative: bool,
        important: bool,
        raw: String,
    },
    /// `bg-red-500/50`
    Functional {
        root: String,
        value: Option<CandidateValue>,
        modifier: Option<CandidateModifier>,
        variants: Vec<Variant>,
        negative: bool,
        important: bool,
        raw: String,
    },
}

impl Candidate {
    /// The class name this candidate was parsed from.
    pub fn raw(&self) -> &str {
        match self {
            Candidate::Arbitrary { raw, .. }
            | Candidate::Static { raw, .. }
            | Candidate::Functional { raw, .. } => raw,
        }
    }

    pub fn variants(&self) -> &[Variant] {
        match self {
            Candidate::Arbitrary { variants, .. }
            | Candidate::Static { variants, .. }
            | Candidate::Functional { variants, .. } => variants,
        }
    }

    pub fn important(&self) -> bool {
        match self {
            Candidate::Arbitrary { important, .. }
            | Candidate::Static { important, .. }
            | Candidate::Functional { important, .. } => *important,
        }
    }
}

/// Parse a raw class name into every candidate it can stand for.
///
/// Returns an empty list when any variant is unknown or the base matches
/// nothing in `design_system`.
///
/// # Example
///
/// ```
/// use tailwind_candidate::{Candidate, DesignSystem, parse_candidate};
///
/// let design_system = DesignSystem::tailwind_default();
/// let candidates = parse_candidate("hover:bg-red-500/50", &design_system);
/// assert_eq!(candidates.len(), 1);
/// assert!(matches!(&candidates[0], Candidate::Functional { root, .. } if root == "bg"));
/// ```
pub fn parse_candidate(input: &str, design_system: &DesignSystem) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    let mut raw_variants = segment(input, b':');
    let Some(mut base) = raw_variants.pop() else {
        return candidates;
    };

    let mut variants = Vec::with_capacity(raw_variants.len());
    for raw_variant in raw_variants.iter().rev() {
        let Some(variant) = parse_variant(raw_variant, design_system) else {
            return candidates;
        };
        variants.push(variant);
    }

    let mut important = false;
    if let Some(stripped) = base.strip_suffix('!') {
        important = true;
        base = stripped;
    } else if let Some(stripped) = base.strip_prefix('!') {
        important = true;
        base = stripped;
    }

    if design_system.has_utility(base, UtilityKind::Static) && !base.contains('[') {
        candidates.push(Candidate::Static {
            root: base.to_string(),
            variants: variants.clone(),
            negative: false,
            important,
            raw: input.to_string(),
        });
    }

    let parts = segment(base, b'/');
    if parts.len() > 2 {
        return candidates;
    }
    let base_without_modifier = parts[0];
    let modifier_segment = parts.get(1).copied();
    let modifier = match modifier_segment {
        Some(segment) => match parse_modifier(segment) {
            Some(modifier) => Some(modifier),
            None => return candidates,
        },
        None => None,
    };

    if base_without_modifier.starts_with('[') {
        if let Some((property, value)) = parse_arbitrary_property(base_without_modifier) {
            candidates.push(Candidate::Arbitrary {
                property,
                value,
                modifier,
                variants,
                important,
                raw: input.to_string(),
            });
        }
        return candidates;
    }

    let (negative, unsigned) = match base_without_modifier.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, base_without_modifier),
    };

    let roots: Vec<(&str, Option<&str>)> = if unsigned.ends_with(']') {
        let Some(index) = unsigned.find("-[") else {
            return candidates;
        };
        let root = &unsigned[..index];
        if !design_system.has_utility(root, UtilityKind::Functional) {
            return candidates;
        }
        vec![(root, Some(&unsigned[index + 1..]))]
    } else {
        find_roots(unsigned, |root| {
            design_system.has_utility(root, UtilityKind::Functional)
        })
    };

    for (root, value) in roots {
        let value = match value {
            None => None,
            Some(value) => match value.find('[') {
                Some(start) => {
                    if !value.ends_with(']') {
                        return candidates;
                    }
                    match parse_arbitrary_value(&value[start + 1..value.len() - 1]) {
                        Some(value) => Some(value),
                        None => continue,
                    }
                }
                None => {
                    let fraction = match (&modifier, modifier_segment) {
                        (Some(CandidateModifier::Named { .. }), Some(segment)) => {
                            Some(format!("{value}/{segment}"))
                        }
                        _ => None,
                    };
                    Some(CandidateValue::Named {
                        value: value.to_string(),
                        fraction,
                    })
                }
            },
        };

        candidates.push(Candidate::Functional {
            root: root.to_string(),
            value,
            modifier: modifier.clone(),
            variants: variants.clone(),
            negative,
            important,
            raw: input.to_string(),
        });
    }

    candidates
}

/// Parse a single variant such as `hover`, `data-[state=open]`,
/// `group-hover/sidebar` or `[&>*]`.
pub fn parse_variant(variant: &str, design_system: &DesignSystem) -> Option<Variant> {
    if variant.len() >= 2 && variant.starts_with('[') && variant.ends_with(']') {
        let inner = &variant[1..variant.len() - 1];
        // At-rules cannot also reference the selector.
        if inner.starts_with('@') && inner.contains('&') {
            return None;
        }
        let selector = decode_arbitrary_value(inner);
        if selector.trim().is_empty() {
            return None;
        }
        let relative = selector.starts_with(['>', '+', '~']);
        return Some(Variant::Arbitrary {
            selector,
            relative,
            compounds: true,
        });
    }

    let parts = segment(variant, b'/');
    if parts.len() > 2 {
        return None;
    }
    let variant_without_modifier = parts[0];
    let modifier = parts.get(1).copied();

    for (root, value) in find_roots(variant_without_modifier, |root| {
        design_system.has_variant(root)
    }) {
        let compounds = design_system.variant_compounds(root);
        match design_system.variant_kind(root)? {
            VariantKind::Static => {
                if value.is_some() || modifier.is_some() {
                    return None;
                }
                return Some(Variant::Static {
                    root: root.to_string(),
                    compounds,
                });
            }
            VariantKind::Functional => {
                let modifier = match modifier {
                    Some(modifier) => Some(parse_modifier(modifier)?),
                    None => None,
                };
                let value = match value {
                    None => None,
                    Some(value) if value.ends_with(']') => {
                        if !value.starts_with('[') {
                            continue;
                        }
                        let decoded = decode_arbitrary_value(&value[1..value.len() - 1]);
                        if decoded.trim().is_empty() {
                            return None;
                        }
                        Some(VariantValue::Arbitrary { value: decoded })
                    }
                    Some(value) => Some(VariantValue::Named {
                        value: value.to_string(),
                    }),
                };
                return Some(Variant::Functional {
                    root: root.to_string(),
                    value,
                    modifier,
                    compounds,
                });
            }
            VariantKind::Compound => {
                let inner = parse_variant(value?, design_system)?;
                if !inner.compounds() {
                    return None;
                }
                let modifier = match modifier {
                    Some(modifier) => Some(parse_modifier(modifier)?),
                    None => None,
                };
                return Some(Variant::Compound {
                    root: root.to_string(),
                    modifier,
                    variant: Box::new(inner),
                    compounds,
                });
            }
        }
    }

    None
}

fn parse_modifier(modifier: &str) -> Option<CandidateModifier> {
    if modifier.is_empty() {
        return None;
    }
    if modifier.len() >= 2 && modifier.starts_with('[') && modifier.ends_with(']') {
        let value = decode_arbitrary_value(&modifier[1..modifier.len() - 1]);
        if value.trim().is_empty() {
            return None;
        }
        return Some(CandidateModifier::Arbitrary { value });
    }
    Some(CandidateModifier::Named {
        value: modifier.to_string(),
    })
}

/// `[color:red]` into `("color", "red")`.
fn parse_arbitrary_property(base: &str) -> Option<(String, String)> {
    if base.len() < 2 || !base.ends_with(']') {
        return None;
    }
    let inner = &base[1..base.len() - 1];
    let first = *inner.as_bytes().first()?;
    if first != b'-' && !first.is_ascii_lowercase() {
        return None;
    }
    let colon = inner.find(':')?;
    if colon == 0 || colon == inner.len() - 1 {
        return None;
    }
    Some((
        inner[..colon].to_string(),
        decode_arbitrary_value(&inner[colon + 1..]),
    ))
}

/// Contents of `[...]` in a functional value, with an optional
/// `type:` hint (`length:10px`).
fn parse_arbitrary_value(inner: &str) -> Option<CandidateValue> {
    let decoded = decode_arbitrary_value(inner);
    let hint_end = decoded
        .bytes()
        .position(|b| b != b'-' && !b.is_ascii_lowercase());

    let (data_type, value) = match hint_end {
        Some(end) if decoded.as_bytes()[end] == b':' => {
            let hint = &decoded[..end];
            (
                (!hint.is_empty()).then(|| hint.to_string()),
                decoded[end + 1..].to_string(),
            )
        }
        _ => (None, decoded),
    };

    if value.trim().is_empty() {
        return None;
    }
    Some(CandidateValue::Arbitrary { data_type, value })
}

/// Every way to split `input` into a known root and a value, longest root
/// first. A root matching the whole input comes first, with no value.
fn find_roots<'a>(input: &'a str, exists: impl Fn(&str) -> bool) -> Vec<(&'a str, Option<&'a str>)> {
    let mut roots = Vec::new();

    if exists(input) {
        roots.push((input, None));
    }

    let Some(mut index) = input.rfind('-') else {
        if let Some(rest) = input.strip_prefix('@')
            && exists("@")
        {
            roots.push(("@", Some(rest)));
        }
        return roots;
    };

    loop {
        let maybe_root = &input[..index];
        if exists(maybe_root) {
            let value = &input[index + 1..];
            if value.is_empty() {
                break;
            }
            roots.push((maybe_root, Some(value)));
        }
        match input[..index].rfind('-') {
            Some(next) if next > 0 => index = next,
            _ => break,
        }
    }

    roots
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn design_system() -> DesignSystem {
        DesignSystem::tailwind_default()
    }

    #[test]
    fn test_find_roots_longest_first() {
        let roots = find_roots("inset-x-4", |root| matches!(root, "inset" | "inset-x"));
        assert_eq!(roots, vec![("inset-x", Some("4")), ("inset", Some("x-4"))]);
    }

    #[test]
    fn test_find_roots_exact_and_trailing_dash() {
        assert_eq!(find_roots("flex", |root| root == "flex"), vec![("flex", None)]);
        assert!(find_roots("bg-", |root| root == "bg").is_empty());
    }

    #[test]
    fn test_parse_static() {
        let candidates = parse_candidate("underline", &design_system());
        assert_eq!(
            candidates,
            vec![Candidate::Static {
                root: "underline".to_string(),
                variants: vec![],
                negative: false,
                important: false,
                raw: "underline".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_functional_with_named_modifier() {
        let candidates = parse_candidate("w-1/2", &design_system());
        assert_eq!(
            candidates,
            vec![Candidate::Functional {
                root: "w".to_string(),
                value: Some(CandidateValue::Named {
                    value: "1".to_string(),
                    fraction: Some("1/2".to_string()),
                }),
                modifier: Some(CandidateModifier::Named {
                    value: "2".to_string()
                }),
                variants: vec![],
                negative: false,
                important: false,
                raw: "w-1/2".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_arbitrary_value_with_type_hint() {
        let candidates = parse_candidate("bg-[color:var(--brand)]", &design_system());
        let [Candidate::Functional { value, .. }] = candidates.as_slice() else {
            panic!("expected one functional candidate, got {candidates:?}");
        };
        assert_eq!(
            value,
            &Some(CandidateValue::Arbitrary {
                data_type: Some("color".to_string()),
                value: "var(--brand)".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_arbitrary_property() {
        let candidates = parse_candidate("[mask-type:luminance]", &design_system());
        assert!(matches!(
            candidates.as_slice(),
            [Candidate::Arbitrary { property, value, .. }]
                if property == "mask-type" && value == "luminance"
        ));

        // Property must start with a lowercase letter or a dash
        assert!(parse_candidate("[Color:red]", &design_system()).is_empty());
        assert!(parse_candidate("[color:]", &design_system()).is_empty());
    }

    #[test]
    fn test_negative_static_and_functional() {
        let candidates = parse_candidate("-inset-full", &design_system());
        assert_eq!(candidates.len(), 2);
        assert!(matches!(&candidates[0], Candidate::Static { root, .. } if root == "-inset-full"));
        assert!(matches!(
            &candidates[1],
            Candidate::Functional { root, negative: true, .. } if root == "inset"
        ));
    }

    #[test]
    fn test_variants_stored_innermost_first() {
        let candidates = parse_candidate("hover:focus:text-white", &design_system());
        assert_eq!(
            candidates[0].variants(),
            &[
                Variant::Static {
                    root: "focus".to_string(),
                    compounds: true
                },
                Variant::Static {
                    root: "hover".to_string(),
                    compounds: true
                },
            ]
        );
    }

    #[test]
    fn test_unknown_variant_rejects_candidate() {
        assert!(parse_candidate("nope:flex", &design_system()).is_empty());
    }

    #[test]
    fn test_parse_variants() {
        let ds = design_system();
        assert_eq!(
            parse_variant("data-[state=open]", &ds),
            Some(Variant::Functional {
                root: "data".to_string(),
                value: Some(VariantValue::Arbitrary {
                    value: "state=open".to_string()
                }),
                modifier: None,
                compounds: true,
            })
        );
        assert_eq!(
            parse_variant("group-hover/sidebar", &ds),
            Some(Variant::Compound {
                root: "group".to_string(),
                modifier: Some(CandidateModifier::Named {
                    value: "sidebar".to_string()
                }),
                variant: Box::new(Variant::Static {
                    root: "hover".to_string(),
                    compounds: true
                }),
                compounds: true,
            })
        );
        assert_eq!(
            parse_variant("[&>*]", &ds),
            Some(Variant::Arbitrary {
                selector: "&>*".to_string(),
                relative: false,
                compounds: true,
            })
        );
        // Pseudo-elements cannot be compounded
        assert_eq!(parse_variant("group-before", &ds), None);
        // Static variants take no value or modifier
        assert_eq!(parse_variant("hover/foo", &ds), None);
        assert_eq!(parse_variant("[@media_print{&}]", &ds), None);
    }

    #[test]
    fn test_serialize_json_shape() {
        let candidates = parse_candidate("[color:red]", &design_system());
        let json = serde_json::to_value(&candidates[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "arbitrary",
                "property": "color",
                "value": "red",
                "modifier": null,
                "variants": [],
                "important": false,
                "raw": "[color:red]",
            })
        );
    }
}
