/*
 * printer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Stylesheet printer.
//!
//! Printing is driven by [`Raws`](crate::Raws) and is literal: whatever
//! whitespace the raws hold is what gets printed. Nodes carrying the `pretty`
//! hint are the exception; they print their children one per line, indented
//! by two spaces, and ignore the children's `before` raws.

use std::fmt;

use crate::node::{NodeId, NodeKind};
use crate::stylesheet::Stylesheet;

const INDENT: &str = "  ";

impl Stylesheet {
    /// Print the whole stylesheet.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        self.write_children(self.root(), &mut out);
        out.push_str(&self.node(self.root()).raws.after);
        out
    }

    /// Print a single node, without its `before` raw.
    pub fn node_to_css(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Root => self.write_children(id, out),
            NodeKind::Comment(comment) => {
                out.push_str("/*");
                out.push_str(&comment.text);
                out.push_str("*/");
            }
            NodeKind::Declaration(decl) => {
                out.push_str(&decl.property);
                out.push_str(&node.raws.between);
                out.push_str(&decl.value);
                if decl.important {
                    out.push_str(if node.raws.important.is_empty() {
                        " !important"
                    } else {
                        &node.raws.important
                    });
                }
                out.push_str(&node.raws.after);
            }
            NodeKind::Rule(rule) => {
                out.push_str(&rule.selector);
                self.write_block(id, out);
            }
            NodeKind::AtRule(at_rule) => {
                out.push('@');
                out.push_str(&at_rule.name);
                if !at_rule.params.is_empty() {
                    out.push_str(&node.raws.after_name);
                    out.push_str(&at_rule.params);
                }
                if at_rule.has_block {
                    self.write_block(id, out);
                } else {
                    out.push_str(&node.raws.after);
                }
            }
        }
    }

    /// Write `{ children }` including the prelude/brace spacing.
    fn write_block(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        out.push_str(&node.raws.between);
        out.push('{');

        if node.raws.pretty {
            for &child in self.children(id) {
                let mut text = String::new();
                self.write_node(child, &mut text);
                if self.node(child).needs_semicolon() {
                    // The `after` raw is whitespace before the `;`.
                    text.truncate(text.trim_end().len());
                    text.push(';');
                }
                out.push('\n');
                out.push_str(&indent(&text));
            }
            out.push_str("\n}");
            return;
        }

        self.write_children(id, out);
        out.push_str(&node.raws.after);
        out.push('}');
    }

    fn write_children(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        let children = self.children(id);
        for (index, &child) in children.iter().enumerate() {
            let child_node = self.node(child);
            out.push_str(&child_node.raws.before);
            self.write_node(child, out);
            let is_last = index + 1 == children.len();
            if child_node.needs_semicolon() && (!is_last || node.raws.semicolon) {
                out.push(';');
            }
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Indent every non-empty line of `text` by one level.
fn indent(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use crate::node::{NodeKind, Raws, Rule};
    use crate::parse_stylesheet;
    use crate::stylesheet::Stylesheet;

    #[test]
    fn test_roundtrip_is_exact() {
        let inputs = [
            "",
            "\n\n",
            "@tailwind base;",
            "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n",
            "a{color:red}",
            ".a {\n  color: red;\n  background: blue !important;\n}\n",
            "@media print {\n  /* print only */\n  .a { display: none }\n}\n",
            "@import \"tailwindcss/base\" ;\n@layer base{h1{font-size:2rem;}}",
            "@font-face{font-family:x;src:url('x.woff2')}\n",
        ];
        for input in inputs {
            let sheet = parse_stylesheet(input).unwrap();
            assert_eq!(sheet.to_css(), input, "roundtrip of {input:?}");
        }
    }

    #[test]
    fn test_pretty_block_indents_children() {
        let mut sheet = parse_stylesheet(".a {\n  color: red;\n}\n\n.b { color: blue }\n").unwrap();
        let root = sheet.root();
        let children = sheet.children(root).to_vec();
        let wrapper = sheet.create_at_rule(
            "layer",
            "base",
            Raws {
                pretty: true,
                ..Raws::default()
            },
        );
        sheet.replace_with(children[0], wrapper);
        for child in children {
            sheet.append(wrapper, child);
        }

        insta::assert_snapshot!(sheet.to_css().trim_end(), @r"
        @layer base {
          .a {
            color: red;
          }
          .b { color: blue }
        }
        ");
    }

    #[test]
    fn test_pretty_block_drops_space_before_semicolon() {
        let mut sheet = parse_stylesheet("@font-feature-values x ;\n.a{}\n").unwrap();
        let root = sheet.root();
        let children = sheet.children(root).to_vec();
        let wrapper = sheet.create_at_rule(
            "layer",
            "base",
            Raws {
                pretty: true,
                ..Raws::default()
            },
        );
        sheet.replace_with(children[0], wrapper);
        for child in children {
            sheet.append(wrapper, child);
        }

        assert_eq!(
            sheet.to_css(),
            "@layer base {\n  @font-feature-values x;\n  .a{}\n}\n"
        );
    }

    #[test]
    fn test_hand_built_nodes_print_compactly() {
        let mut sheet = Stylesheet::new();
        let root = sheet.root();
        let rule = sheet.create(
            NodeKind::Rule(Rule {
                selector: ".a".to_string(),
            }),
            Raws::default(),
        );
        sheet.append(root, rule);
        assert_eq!(sheet.to_css(), ".a{}");
    }
}
