/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Stylesheet tree for the Tailwind upgrade tooling.
//!
//! This crate provides a small, postcss-shaped model of a stylesheet:
//!
//! - [`Stylesheet`] - an arena owning every node, addressed by [`NodeId`]
//! - [`parse_stylesheet`] - a hand-written parser that keeps whitespace in [`Raws`]
//! - [`Stylesheet::to_css`] - a printer that reproduces unmodified input byte-for-byte
//!
//! Nodes are never freed while the stylesheet is alive. Detaching a node
//! (via [`Stylesheet::remove`]) only unlinks it from its parent, so a
//! [`NodeId`] stays valid across structural edits. This is what lets a
//! migration collect handles in one pass and move them around in a second.
//!
//! # Example
//!
//! ```
//! use tailwind_css_ast::parse_stylesheet;
//!
//! let mut sheet = parse_stylesheet("@import \"a.css\";\n.a { color: red; }\n").unwrap();
//! let import = sheet.children(sheet.root())[0];
//! sheet.at_rule_mut(import).unwrap().params.push_str(" layer(base)");
//!
//! assert_eq!(sheet.to_css(), "@import \"a.css\" layer(base);\n.a { color: red; }\n");
//! ```

mod error;
mod node;
mod parser;
mod printer;
mod stylesheet;

pub use error::{CssError, Position, Result};
pub use node::{AtRule, Comment, Declaration, Node, NodeId, NodeKind, Raws, Rule};
pub use parser::parse_stylesheet;
pub use stylesheet::Stylesheet;
