//! Integration tests for parsing, editing and printing whole stylesheets.

use pretty_assertions::assert_eq;
use tailwind_css_ast::{NodeKind, Raws, parse_stylesheet};

const LEGACY_INPUT: &str = r#"@import 'tailwindcss/base';
@import "./fonts.css";

html {
  font-family: system-ui;
}

@tailwind components;

/* Buttons */
.btn {
  padding: 0.5rem 1rem;
  border-radius: 0.25rem !important;
}

@media (min-width: 640px) {
  .btn { padding: 1rem }
}
"#;

#[test]
fn legacy_stylesheet_roundtrips() {
    let sheet = parse_stylesheet(LEGACY_INPUT).unwrap();
    assert_eq!(sheet.to_css(), LEGACY_INPUT);
}

#[test]
fn top_level_children_in_order() {
    let sheet = parse_stylesheet(LEGACY_INPUT).unwrap();
    let summary: Vec<String> = sheet
        .children(sheet.root())
        .iter()
        .map(|&id| match &sheet.node(id).kind {
            NodeKind::AtRule(at) => format!("@{}", at.name),
            NodeKind::Rule(rule) => rule.selector.clone(),
            NodeKind::Comment(_) => "comment".to_string(),
            other => panic!("unexpected top-level node {other:?}"),
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            "@import", "@import", "html", "@tailwind", "comment", ".btn", "@media",
        ]
    );
}

#[test]
fn param_edit_preserves_surrounding_text() {
    let mut sheet = parse_stylesheet(LEGACY_INPUT).unwrap();
    let font_import = sheet.children(sheet.root())[1];
    sheet
        .at_rule_mut(font_import)
        .unwrap()
        .params
        .push_str(" layer(base)");

    let expected = LEGACY_INPUT.replace(
        "@import \"./fonts.css\";",
        "@import \"./fonts.css\" layer(base);",
    );
    assert_eq!(sheet.to_css(), expected);
}

#[test]
fn detached_nodes_keep_their_handles() {
    let mut sheet = parse_stylesheet(".a{}.b{}.c{}").unwrap();
    let root = sheet.root();
    let [a, b, c] = <[_; 3]>::try_from(sheet.children(root).to_vec()).unwrap();

    let wrapper = sheet.create_at_rule(
        "layer",
        "components",
        Raws {
            pretty: true,
            ..Raws::default()
        },
    );
    sheet.remove(c);
    sheet.replace_with(b, wrapper);
    sheet.append(wrapper, b);
    sheet.append(wrapper, c);

    assert_eq!(sheet.children(root), &[a, wrapper]);
    assert_eq!(sheet.children(wrapper), &[b, c]);
    assert_eq!(sheet.parent(c), Some(wrapper));
    assert_eq!(sheet.to_css(), ".a{}@layer components {\n  .b{}\n  .c{}\n}");
}
