/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Stylesheet parser.
//!
//! A small recursive-descent parser in the spirit of postcss. It does not
//! tokenize values or selectors; it only finds statement boundaries and keeps
//! every piece of whitespace in [`Raws`] so that printing an unmodified tree
//! reproduces the input exactly.
//!
//! Statements are scanned up to the first top-level `;`, `{` or `}`, skipping
//! over strings, comments, escapes and `(...)`/`[...]` groups:
//!
//! - `... {` opens an at-rule block (prelude starts with `@`) or a rule
//! - `... ;` (or a statement running into `}`/end of input) is a blockless
//!   at-rule or a declaration

use crate::error::{CssError, Position, Result};
use crate::node::{AtRule, Comment, Declaration, NodeId, NodeKind, Raws, Rule};
use crate::stylesheet::Stylesheet;

/// Parse `source` into a [`Stylesheet`].
///
/// # Errors
///
/// Returns a [`CssError`] for unbalanced braces, unterminated strings or
/// comments, and statements that are neither rules, at-rules nor
/// declarations.
///
/// # Example
///
/// ```
/// use tailwind_css_ast::parse_stylesheet;
///
/// let sheet = parse_stylesheet("@tailwind base;\n.btn { color: red; }").unwrap();
/// let children = sheet.children(sheet.root());
/// assert_eq!(children.len(), 2);
/// assert_eq!(sheet.at_rule(children[0]).unwrap().params, "base");
/// ```
pub fn parse_stylesheet(source: &str) -> Result<Stylesheet> {
    let mut parser = Parser::new(source);
    let root = parser.sheet.root();
    parser.parse_block(root, None)?;
    Ok(parser.sheet)
}

/// How a scanned statement ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    OpenBrace,
    CloseBrace,
    Eof,
}

struct Parser<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    sheet: Stylesheet,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            sheet: Stylesheet::new(),
        }
    }

    fn position(&self, offset: usize) -> Position {
        Position::from_offset(self.source, offset)
    }

    /// Parse children of `parent` until its closing `}` (or end of input for
    /// the root). `open` is the offset of the `{` that opened the block.
    fn parse_block(&mut self, parent: NodeId, open: Option<usize>) -> Result<()> {
        let mut last_semicolon = false;

        loop {
            let ws_start = self.pos;
            self.skip_whitespace();
            let before = self.source[ws_start..self.pos].to_string();

            let Some(&byte) = self.bytes.get(self.pos) else {
                if let Some(open) = open {
                    return Err(CssError::UnclosedBlock {
                        position: self.position(open),
                    });
                }
                self.finish_block(parent, before, last_semicolon);
                return Ok(());
            };

            match byte {
                b'}' => {
                    if open.is_none() {
                        return Err(CssError::UnexpectedCloseBrace {
                            position: self.position(self.pos),
                        });
                    }
                    self.pos += 1;
                    self.finish_block(parent, before, last_semicolon);
                    return Ok(());
                }
                // Stray semicolons carry no meaning and are dropped.
                b';' => {
                    self.pos += 1;
                }
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'*') => {
                    let start = self.pos;
                    let end = self.comment_end(start)?;
                    let text = self.source[start + 2..end - 2].to_string();
                    let id = self.sheet.create(
                        NodeKind::Comment(Comment { text }),
                        Raws {
                            before,
                            ..Raws::default()
                        },
                    );
                    self.sheet.append(parent, id);
                    self.pos = end;
                    last_semicolon = false;
                }
                _ => {
                    last_semicolon = self.parse_statement(parent, before)?;
                }
            }
        }
    }

    fn finish_block(&mut self, id: NodeId, after: String, semicolon: bool) {
        let raws = &mut self.sheet.node_mut(id).raws;
        raws.after = after;
        raws.semicolon = semicolon;
    }

    /// Parse one statement. Returns whether it was terminated by `;`.
    fn parse_statement(&mut self, parent: NodeId, before: String) -> Result<bool> {
        let start = self.pos;
        let (end, terminator) = self.scan_statement()?;
        let text = &self.source[start..end];

        match terminator {
            Terminator::OpenBrace => {
                let prelude = text.trim_end();
                let between = text[prelude.len()..].to_string();
                let mut raws = Raws {
                    before,
                    between,
                    ..Raws::default()
                };
                let kind = match prelude.strip_prefix('@') {
                    Some(rest) => {
                        let (name, after_name, params) = split_at_rule(rest);
                        raws.after_name = after_name.to_string();
                        NodeKind::AtRule(AtRule {
                            name: name.to_string(),
                            params: params.to_string(),
                            has_block: true,
                        })
                    }
                    None => NodeKind::Rule(Rule {
                        selector: prelude.to_string(),
                    }),
                };
                let id = self.sheet.create(kind, raws);
                self.sheet.append(parent, id);
                self.pos = end + 1;
                self.parse_block(id, Some(end))?;
                Ok(false)
            }
            Terminator::Semicolon => {
                self.push_blockless(parent, before, text, start)?;
                self.pos = end + 1;
                Ok(true)
            }
            Terminator::CloseBrace | Terminator::Eof => {
                // Trailing whitespace belongs to the enclosing block.
                let trimmed = text.trim_end();
                self.push_blockless(parent, before, trimmed, start)?;
                self.pos = start + trimmed.len();
                Ok(false)
            }
        }
    }

    /// Create a blockless at-rule or a declaration from `text`.
    fn push_blockless(
        &mut self,
        parent: NodeId,
        before: String,
        text: &str,
        start: usize,
    ) -> Result<()> {
        let body = text.trim_end();
        let after = text[body.len()..].to_string();

        let (kind, raws) = match body.strip_prefix('@') {
            Some(rest) => {
                let (name, after_name, params) = split_at_rule(rest);
                let kind = NodeKind::AtRule(AtRule {
                    name: name.to_string(),
                    params: params.to_string(),
                    has_block: false,
                });
                let raws = Raws {
                    before,
                    after_name: after_name.to_string(),
                    after,
                    ..Raws::default()
                };
                (kind, raws)
            }
            None => {
                let property_end = body.find(':').filter(|&colon| {
                    !body[..colon].trim().is_empty()
                });
                let Some(colon) = property_end else {
                    return Err(CssError::UnknownWord {
                        word: body.trim().to_string(),
                        position: self.position(start),
                    });
                };
                let property = body[..colon].trim_end();
                let value_start = colon + 1 + leading_whitespace(&body[colon + 1..]);
                let (value, important) = split_important(&body[value_start..]);
                let kind = NodeKind::Declaration(Declaration {
                    property: property.to_string(),
                    value: value.to_string(),
                    important: !important.is_empty(),
                });
                let raws = Raws {
                    before,
                    between: body[property.len()..value_start].to_string(),
                    important: important.to_string(),
                    after,
                    ..Raws::default()
                };
                (kind, raws)
            }
        };

        let id = self.sheet.create(kind, raws);
        self.sheet.append(parent, id);
        Ok(())
    }

    /// Find the end of the statement starting at `self.pos`.
    fn scan_statement(&self) -> Result<(usize, Terminator)> {
        let len = self.bytes.len();
        let mut depth = 0usize;
        let mut i = self.pos;

        while i < len {
            match self.bytes[i] {
                b'\\' => {
                    i = (i + 2).min(len);
                    continue;
                }
                b'"' | b'\'' => {
                    i = self.string_end(i)?;
                    continue;
                }
                b'/' if self.bytes.get(i + 1) == Some(&b'*') => {
                    i = self.comment_end(i)?;
                    continue;
                }
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth = depth.saturating_sub(1),
                b';' if depth == 0 => return Ok((i, Terminator::Semicolon)),
                b'{' if depth == 0 => return Ok((i, Terminator::OpenBrace)),
                b'}' if depth == 0 => return Ok((i, Terminator::CloseBrace)),
                _ => {}
            }
            i += 1;
        }

        Ok((len, Terminator::Eof))
    }

    /// Offset just past the closing quote of the string starting at `start`.
    fn string_end(&self, start: usize) -> Result<usize> {
        let quote = self.bytes[start];
        let mut i = start + 1;
        while i < self.bytes.len() {
            match self.bytes[i] {
                b'\\' => i += 2,
                b if b == quote => return Ok(i + 1),
                _ => i += 1,
            }
        }
        Err(CssError::UnclosedString {
            position: self.position(start),
        })
    }

    /// Offset just past the `*/` closing the comment starting at `start`.
    fn comment_end(&self, start: usize) -> Result<usize> {
        self.source[start + 2..]
            .find("*/")
            .map(|offset| start + 2 + offset + 2)
            .ok_or_else(|| CssError::UnclosedComment {
                position: self.position(start),
            })
    }

    fn skip_whitespace(&mut self) {
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| b.is_ascii_whitespace())
        {
            self.pos += 1;
        }
    }
}

/// Split `name params` (the text after `@`) into name, separating whitespace
/// and params.
fn split_at_rule(rest: &str) -> (&str, &str, &str) {
    let name_end = rest
        .find(|c: char| c.is_whitespace() || matches!(c, '(' | '"' | '\'' | '{' | ';'))
        .unwrap_or(rest.len());
    let name = &rest[..name_end];
    let after_name_end = name_end + leading_whitespace(&rest[name_end..]);
    (
        name,
        &rest[name_end..after_name_end],
        &rest[after_name_end..],
    )
}

/// Split a declaration value into the value proper and its raw `!important`
/// suffix (empty when absent).
fn split_important(value: &str) -> (&str, &str) {
    if let Some(bang) = value.rfind('!')
        && value[bang + 1..].trim().eq_ignore_ascii_case("important")
    {
        let head = value[..bang].trim_end();
        return (head, &value[head.len()..]);
    }
    (value, "")
}

fn leading_whitespace(text: &str) -> usize {
    text.len() - text.trim_start().len()
}
