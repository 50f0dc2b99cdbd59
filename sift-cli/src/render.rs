//! Terminal output for selectors, matches, and trees.

use std::iter;

use owo_colors::OwoColorize;
use sift_dom::{DomTree, ElementData, NodeId, NodeType};
use sift_selector::{SelectorTree, SyntaxError};

/// Colors for terminal output, or none at all.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub const fn new(color: bool) -> Self {
        Self { color }
    }

    fn tag(self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_owned()
        }
    }

    fn attr(self, text: &str) -> String {
        if self.color {
            text.yellow().to_string()
        } else {
            text.to_owned()
        }
    }

    fn muted(self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_owned()
        }
    }

    pub fn error(self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_owned()
        }
    }
}

/// `tag#id.class1.class2`
fn label(data: &ElementData, palette: Palette) -> String {
    let mut out = palette.tag(&data.tag_name);
    if let Some(id) = data.id() {
        out.push_str(&palette.attr(&format!("#{id}")));
    }
    for class in data.classes() {
        out.push_str(&palette.attr(&format!(".{class}")));
    }
    out
}

/// The chain of element labels from the outermost ancestor down to `id`,
/// joined as child combinators.
pub fn element_path(tree: &DomTree, id: NodeId, palette: Palette) -> String {
    let mut chain: Vec<NodeId> =
        iter::successors(Some(id), |&node| tree.parent_element(node)).collect();
    chain.reverse();

    chain
        .into_iter()
        .filter_map(|node| tree.as_element(node))
        .map(|data| label(data, palette))
        .collect::<Vec<_>>()
        .join(" > ")
}

/// An indented dump of the subtree at `id`, one node per line.
pub fn tree_dump(tree: &DomTree, id: NodeId, palette: Palette) -> String {
    let mut out = String::new();
    dump_node(tree, id, 0, palette, &mut out);
    out
}

fn dump_node(tree: &DomTree, id: NodeId, indent: usize, palette: Palette, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    out.push_str(&"  ".repeat(indent));
    match &node.node_type {
        NodeType::Document => out.push_str(&palette.muted("Document")),
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&palette.tag(&data.tag_name));
            let mut attrs: Vec<_> = data.attrs.iter().collect();
            attrs.sort();
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(&palette.attr(name));
                if !value.is_empty() {
                    out.push_str(&format!("=\"{value}\""));
                }
            }
            out.push('>');
        }
        NodeType::Text(text) => {
            let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
            out.push_str(&palette.muted(&format!("\"{display}\"")));
        }
        NodeType::Comment(text) => out.push_str(&palette.muted(&format!("<!-- {text} -->"))),
    }
    out.push('\n');

    for &child in tree.children(id) {
        dump_node(tree, child, indent + 1, palette, out);
    }
}

/// The selector on one line and a caret under the offending offset.
pub fn syntax_error(input: &str, err: &SyntaxError, palette: Palette) -> String {
    let line: String = input
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    let column = input.get(..err.offset).map_or(0, |head| head.chars().count());
    format!(
        "  {line}\n  {}{}",
        " ".repeat(column),
        palette.error("^")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_selector::parse_selector;

    const PLAIN: Palette = Palette::new(false);

    fn sample() -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let parent = tree.append_element(
            NodeId::ROOT,
            ElementData::new("div").with_attr("class", "parent"),
        );
        let _ = tree.append_text(parent, "\n ");
        let child = tree.append_element(
            parent,
            ElementData::new("div")
                .with_attr("id", "x")
                .with_attr("class", "child big"),
        );
        (tree, child)
    }

    #[test]
    fn test_element_path() {
        let (tree, child) = sample();
        assert_eq!(
            element_path(&tree, child, PLAIN),
            "div.parent > div#x.child.big"
        );
    }

    #[test]
    fn test_tree_dump() {
        let (tree, _) = sample();
        assert_eq!(
            tree_dump(&tree, NodeId::ROOT, PLAIN),
            "Document\n  <div class=\"parent\">\n    \"\\n\u{00B7}\"\n    <div class=\"child big\" id=\"x\">\n"
        );
    }

    #[test]
    fn test_syntax_error_caret() {
        let input = "div >\tp[x]";
        let err = parse_selector(input).unwrap_err();
        assert_eq!(syntax_error(input, &err, PLAIN), "  div > p[x]\n         ^");
    }

    #[test]
    fn test_syntax_error_caret_counts_characters() {
        let input = "é";
        let err = parse_selector(input).unwrap_err();
        // The offending character sits in the first column.
        assert_eq!(err.offset, 0);
        assert_eq!(syntax_error(input, &err, PLAIN), "  é\n  ^");
    }
}
