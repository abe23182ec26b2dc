/*
 * node.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Node types stored in a [`Stylesheet`](crate::Stylesheet).

use std::fmt;

/// Stable handle to a node inside a [`Stylesheet`](crate::Stylesheet).
///
/// Handles are only meaningful for the stylesheet that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An at-rule: `@name params;` or `@name params { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    /// Raw parameter text, with surrounding whitespace removed.
    pub params: String,
    /// Whether the at-rule has a `{ ... }` block.
    pub has_block: bool,
}

/// A qualified rule: `selector { ... }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
}

/// A declaration: `property: value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// A comment. `text` is everything between `/*` and `*/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

/// The kind-specific payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    AtRule(AtRule),
    Rule(Rule),
    Declaration(Declaration),
    Comment(Comment),
}

/// Formatting details captured by the parser and used by the printer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Raws {
    /// Whitespace before the node inside its parent.
    pub before: String,
    /// Whitespace between an at-rule's name and its params.
    pub after_name: String,
    /// Text between the prelude and `{`, or between a property and its value
    /// (colon included).
    pub between: String,
    /// Whitespace before the closing `}` (or at the end of the root).
    pub after: String,
    /// Raw `!important` suffix of a declaration, including leading whitespace.
    pub important: String,
    /// Whether the last child of this container ended with `;`.
    pub semicolon: bool,
    /// Print children one per line, indented, ignoring their `before` raws.
    pub pretty: bool,
}

/// A node and its links to the surrounding tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub raws: Raws,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(kind: NodeKind, raws: Raws) -> Self {
        Self {
            kind,
            raws,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The parent of this node, or `None` for the root and detached nodes.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Immediate children in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_at_rule(&self) -> Option<&AtRule> {
        match &self.kind {
            NodeKind::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    pub fn as_rule(&self) -> Option<&Rule> {
        match &self.kind {
            NodeKind::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn as_declaration(&self) -> Option<&Declaration> {
        match &self.kind {
            NodeKind::Declaration(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_comment(&self) -> Option<&Comment> {
        match &self.kind {
            NodeKind::Comment(comment) => Some(comment),
            _ => None,
        }
    }

    /// Whether this node prints a `{ ... }` block.
    pub fn has_block(&self) -> bool {
        match &self.kind {
            NodeKind::Rule(_) => true,
            NodeKind::AtRule(at_rule) => at_rule.has_block,
            NodeKind::Root | NodeKind::Declaration(_) | NodeKind::Comment(_) => false,
        }
    }

    /// Whether this node is terminated by `;` when followed by a sibling.
    pub(crate) fn needs_semicolon(&self) -> bool {
        match &self.kind {
            NodeKind::Declaration(_) => true,
            NodeKind::AtRule(at_rule) => !at_rule.has_block,
            NodeKind::Root | NodeKind::Rule(_) | NodeKind::Comment(_) => false,
        }
    }
}
