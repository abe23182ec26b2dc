/*
 * extract.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Candidate extraction from template sources (HTML, JSX, ...).

use serde::Serialize;

use crate::candidate::{Candidate, parse_candidate};
use crate::design_system::DesignSystem;
use crate::printer::print_candidate;

/// A candidate together with the byte range of its raw text in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedCandidate {
    pub candidate: Candidate,
    pub start: usize,
    pub end: usize,
}

/// Find every class-like token in `content` that parses as a candidate.
///
/// Tokens are delimited by whitespace and by markup punctuation (quotes,
/// `<`, `>`, `=`, ...) outside of `[...]`/`(...)` groups. A token that parses
/// to several candidates with the same canonical form is reported once.
///
/// # Example
///
/// ```
/// use tailwind_candidate::{DesignSystem, extract_candidates};
///
/// let design_system = DesignSystem::tailwind_default();
/// let found = extract_candidates(r#"<div class="underline p-4">"#, &design_system);
/// let spans: Vec<_> = found.iter().map(|c| (c.start, c.end)).collect();
/// assert_eq!(spans, vec![(12, 21), (22, 25)]);
/// ```
pub fn extract_candidates(content: &str, design_system: &DesignSystem) -> Vec<LocatedCandidate> {
    let mut found = Vec::new();

    for (start, end) in tokens(content) {
        let raw = &content[start..end];
        let mut printed: Vec<String> = Vec::new();
        for candidate in parse_candidate(raw, design_system) {
            let text = print_candidate(&candidate);
            if printed.contains(&text) {
                continue;
            }
            printed.push(text);
            found.push(LocatedCandidate {
                candidate,
                start,
                end,
            });
        }
    }

    found
}

fn is_delimiter(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '"' | '\'' | '`' | '<' | '>' | '=' | '{' | '}' | ',' | ';')
}

/// Byte ranges of candidate-like tokens.
fn tokens(content: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut start: Option<usize> = None;
    let mut depth = 0usize;

    for (index, ch) in content.char_indices() {
        let splits = ch.is_whitespace() || (depth == 0 && is_delimiter(ch));
        if splits {
            if let Some(token_start) = start.take() {
                ranges.push((token_start, index));
            }
            depth = 0;
            continue;
        }

        if start.is_none() {
            start = Some(index);
        }
        match ch {
            '[' | '(' => depth += 1,
            ']' | ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }

    if let Some(token_start) = start {
        ranges.push((token_start, content.len()));
    }

    ranges
}
