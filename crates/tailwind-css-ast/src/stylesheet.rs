/*
 * stylesheet.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The node arena and its structural edits.

use crate::node::{AtRule, Node, NodeId, NodeKind, Raws};

/// An owned stylesheet tree.
///
/// All nodes live in one arena. Structural edits ([`remove`](Self::remove),
/// [`append`](Self::append), [`insert`](Self::insert),
/// [`replace_with`](Self::replace_with)) only rewire parent/child links, so
/// every [`NodeId`] handed out stays valid for the lifetime of the stylesheet.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    nodes: Vec<Node>,
}

impl Stylesheet {
    /// Create an empty stylesheet containing only a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, Raws::default())],
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Immediate children of `id` in order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn at_rule(&self, id: NodeId) -> Option<&AtRule> {
        self.nodes[id.0].as_at_rule()
    }

    pub fn at_rule_mut(&mut self, id: NodeId) -> Option<&mut AtRule> {
        match &mut self.nodes[id.0].kind {
            NodeKind::AtRule(at_rule) => Some(at_rule),
            _ => None,
        }
    }

    /// Add a detached node to the arena.
    pub fn create(&mut self, kind: NodeKind, raws: Raws) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, raws));
        id
    }

    /// Add a detached at-rule with an (empty) block.
    ///
    /// Missing `after_name`/`between` raws default to a single space, so the
    /// rule prints as `@name params {`.
    pub fn create_at_rule(
        &mut self,
        name: impl Into<String>,
        params: impl Into<String>,
        mut raws: Raws,
    ) -> NodeId {
        if raws.after_name.is_empty() {
            raws.after_name = " ".to_string();
        }
        if raws.between.is_empty() {
            raws.between = " ".to_string();
        }
        self.create(
            NodeKind::AtRule(AtRule {
                name: name.into(),
                params: params.into(),
                has_block: true,
            }),
            raws,
        )
    }

    /// Position of `child` among the children of `parent`.
    pub fn index_of(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.nodes[parent.0].children.iter().position(|&c| c == child)
    }

    /// Detach `id` from its parent. Detaching a detached node is a no-op.
    ///
    /// Returns `id` so calls can be chained into [`append`](Self::append).
    pub fn remove(&mut self, id: NodeId) -> NodeId {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
        id
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Move `child` to `index` among `parent`'s children.
    ///
    /// `index` is interpreted after `child` has been detached, and is clamped
    /// to the number of children.
    pub fn insert(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.remove(child);
        let children = &mut self.nodes[parent.0].children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Put `replacement` where `target` is, and detach `target`.
    ///
    /// If `replacement` has no `before` raw it inherits the one from `target`,
    /// so the replacement lands on the same line position. Replacing a
    /// detached node does nothing.
    pub fn replace_with(&mut self, target: NodeId, replacement: NodeId) {
        if target == replacement {
            return;
        }
        let Some(parent) = self.nodes[target.0].parent else {
            return;
        };
        self.remove(replacement);
        let Some(index) = self.index_of(parent, target) else {
            return;
        };
        self.nodes[parent.0].children[index] = replacement;
        self.nodes[replacement.0].parent = Some(parent);
        self.nodes[target.0].parent = None;

        if self.nodes[replacement.0].raws.before.is_empty() {
            let before = self.nodes[target.0].raws.before.clone();
            self.nodes[replacement.0].raws.before = before;
        }
    }

    /// All nodes below `id` in pre-order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        out
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Comment, Rule};

    fn rule(sheet: &mut Stylesheet, selector: &str) -> NodeId {
        sheet.create(
            NodeKind::Rule(Rule {
                selector: selector.to_string(),
            }),
            Raws::default(),
        )
    }

    #[test]
    fn test_append_and_remove() {
        let mut sheet = Stylesheet::new();
        let root = sheet.root();
        let a = rule(&mut sheet, ".a");
        let b = rule(&mut sheet, ".b");
        sheet.append(root, a);
        sheet.append(root, b);
        assert_eq!(sheet.children(root), &[a, b]);
        assert_eq!(sheet.parent(a), Some(root));

        sheet.remove(a);
        assert_eq!(sheet.children(root), &[b]);
        assert_eq!(sheet.parent(a), None);

        // Removing twice is harmless
        sheet.remove(a);
        assert_eq!(sheet.children(root), &[b]);
    }

    #[test]
    fn test_append_moves_between_parents() {
        let mut sheet = Stylesheet::new();
        let root = sheet.root();
        let a = rule(&mut sheet, ".a");
        let wrapper = sheet.create_at_rule("layer", "base", Raws::default());
        sheet.append(root, a);
        sheet.append(root, wrapper);
        sheet.append(wrapper, a);

        assert_eq!(sheet.children(root), &[wrapper]);
        assert_eq!(sheet.children(wrapper), &[a]);
        assert_eq!(sheet.parent(a), Some(wrapper));
    }

    #[test]
    fn test_replace_with_keeps_position() {
        let mut sheet = Stylesheet::new();
        let root = sheet.root();
        let a = rule(&mut sheet, ".a");
        let b = rule(&mut sheet, ".b");
        let c = rule(&mut sheet, ".c");
        for id in [a, b, c] {
            sheet.append(root, id);
        }
        sheet.node_mut(b).raws.before = "\n\n".to_string();

        let wrapper = sheet.create_at_rule("layer", "base", Raws::default());
        sheet.replace_with(b, wrapper);

        assert_eq!(sheet.children(root), &[a, wrapper, c]);
        assert_eq!(sheet.parent(b), None);
        assert_eq!(sheet.node(wrapper).raws.before, "\n\n");

        // The replaced node can now be moved into the wrapper
        sheet.append(wrapper, b);
        assert_eq!(sheet.children(wrapper), &[b]);
    }

    #[test]
    fn test_replace_detached_is_noop() {
        let mut sheet = Stylesheet::new();
        let a = rule(&mut sheet, ".a");
        let b = rule(&mut sheet, ".b");
        sheet.replace_with(a, b);
        assert!(sheet.is_empty());
        assert_eq!(sheet.parent(b), None);
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut sheet = Stylesheet::new();
        let root = sheet.root();
        let a = rule(&mut sheet, ".a");
        let b = rule(&mut sheet, ".b");
        sheet.insert(root, 10, a);
        sheet.insert(root, 0, b);
        assert_eq!(sheet.children(root), &[b, a]);
    }

    #[test]
    fn test_descendants_preorder() {
        let mut sheet = Stylesheet::new();
        let root = sheet.root();
        let media = sheet.create_at_rule("media", "print", Raws::default());
        let a = rule(&mut sheet, ".a");
        let note = sheet.create(
            NodeKind::Comment(Comment {
                text: " note ".to_string(),
            }),
            Raws::default(),
        );
        let b = rule(&mut sheet, ".b");
        sheet.append(root, media);
        sheet.append(media, a);
        sheet.append(a, note);
        sheet.append(root, b);

        assert_eq!(sheet.descendants(root), vec![media, a, note, b]);
    }
}
