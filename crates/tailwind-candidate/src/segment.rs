/*
 * segment.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Low-level string helpers shared by the candidate parser and printer.

/// Split `input` on `separator`, ignoring separators nested inside `()`,
/// `[]`, `{}` or quotes, and separators escaped with a backslash.
///
/// Always returns at least one (possibly empty) segment.
///
/// # Example
///
/// ```
/// use tailwind_candidate::segment;
///
/// assert_eq!(segment("hover:[&:focus]:flex", b':'), vec!["hover", "[&:focus]", "flex"]);
/// assert_eq!(segment("bg-[url(a/b.png)]/50", b'/'), vec!["bg-[url(a/b.png)]", "50"]);
/// ```
pub fn segment(input: &str, separator: u8) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut closing: Vec<u8> = Vec::new();
    let mut parts = Vec::new();
    let mut last = 0;
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];

        if closing.is_empty() && byte == separator {
            parts.push(&input[last..i]);
            last = i + 1;
            i += 1;
            continue;
        }

        match byte {
            b'\\' => {
                i += 2;
                continue;
            }
            b'"' | b'\'' => {
                i += 1;
                while i < bytes.len() && bytes[i] != byte {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'(' => closing.push(b')'),
            b'[' => closing.push(b']'),
            b'{' => closing.push(b'}'),
            b')' | b']' | b'}' => {
                if closing.last() == Some(&byte) {
                    closing.pop();
                }
            }
            _ => {}
        }
        i += 1;
    }

    parts.push(&input[last.min(input.len())..]);
    parts
}

/// Decode the contents of an arbitrary value (`[...]`).
///
/// Underscores stand for spaces; `\_` is a literal underscore. Underscores
/// inside `url(...)` are left alone.
pub fn decode_arbitrary_value(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if input[index..].starts_with("url(") {
            let end = input[index..]
                .find(')')
                .map(|offset| index + offset + 1)
                .unwrap_or(input.len());
            out.push_str(&input[index..end]);
            while chars.peek().is_some_and(|&(next, _)| next < end) {
                chars.next();
            }
            continue;
        }

        match ch {
            '\\' if chars.peek().is_some_and(|&(_, next)| next == '_') => {
                chars.next();
                out.push('_');
            }
            '_' => out.push(' '),
            _ => out.push(ch),
        }
    }

    out
}

/// Inverse of [`decode_arbitrary_value`]: spaces become underscores and
/// literal underscores are escaped.
pub fn encode_arbitrary_value(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        if rest.starts_with("url(") {
            let end = rest.find(')').map(|offset| offset + 1).unwrap_or(rest.len());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }
        match ch {
            ' ' => out.push('_'),
            '_' => out.push_str("\\_"),
            _ => out.push(ch),
        }
        rest = &rest[ch.len_utf8()..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_top_level_only() {
        assert_eq!(segment("a:b:c", b':'), vec!["a", "b", "c"]);
        assert_eq!(segment("[color:red]", b':'), vec!["[color:red]"]);
        assert_eq!(
            segment("supports-[display:grid]:grid", b':'),
            vec!["supports-[display:grid]", "grid"]
        );
        assert_eq!(segment("content-['a:b']", b':'), vec!["content-['a:b']"]);
        assert_eq!(segment("a\\:b:c", b':'), vec!["a\\:b", "c"]);
    }

    #[test]
    fn test_segment_edges() {
        assert_eq!(segment("", b':'), vec![""]);
        assert_eq!(segment("hover:", b':'), vec!["hover", ""]);
        assert_eq!(segment("w-1/2/3", b'/'), vec!["w-1", "2", "3"]);
    }

    #[test]
    fn test_decode_arbitrary_value() {
        assert_eq!(decode_arbitrary_value("1fr_auto"), "1fr auto");
        assert_eq!(decode_arbitrary_value("a\\_b"), "a_b");
        assert_eq!(
            decode_arbitrary_value("url(/img/my_file.png)_no-repeat"),
            "url(/img/my_file.png) no-repeat"
        );
    }

    #[test]
    fn test_encode_arbitrary_value() {
        assert_eq!(encode_arbitrary_value("1fr auto"), "1fr_auto");
        assert_eq!(encode_arbitrary_value("a_b"), "a\\_b");
        assert_eq!(
            encode_arbitrary_value("url(/img/my_file.png) no-repeat"),
            "url(/img/my_file.png)_no-repeat"
        );
    }
}
