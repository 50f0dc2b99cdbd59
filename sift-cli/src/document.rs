//! JSON documents.
//!
//! An element is `{"tag": "div", "attrs": {"class": "a b"}, "children": [...]}`
//! with `attrs` and `children` optional; a text node is a bare JSON string.
//! A file holds either one element or an array of nodes, all attached under
//! the Document node.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use sift_dom::{AttributesMap, DomTree, ElementData, NodeId};
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonDocument {
    Nodes(Vec<JsonNode>),
    Node(JsonNode),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonNode {
    Text(String),
    Element(JsonElement),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonElement {
    tag: String,
    #[serde(default)]
    attrs: AttributesMap,
    #[serde(default)]
    children: Vec<JsonNode>,
}

/// Read and build the document at `path`.
pub fn load(path: &Path) -> Result<DomTree> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read document {}", path.display()))?;
    let tree = from_json(&text)
        .with_context(|| format!("{} is not a valid JSON document", path.display()))?;
    debug!(path = %path.display(), nodes = tree.len(), "loaded document");
    Ok(tree)
}

/// Build a tree from JSON text.
pub fn from_json(text: &str) -> serde_json::Result<DomTree> {
    let nodes = match serde_json::from_str(text)? {
        JsonDocument::Nodes(nodes) => nodes,
        JsonDocument::Node(node) => vec![node],
    };

    let mut tree = DomTree::new();
    for node in nodes {
        append(&mut tree, NodeId::ROOT, node);
    }
    Ok(tree)
}

fn append(tree: &mut DomTree, parent: NodeId, node: JsonNode) {
    match node {
        JsonNode::Text(text) => {
            let _ = tree.append_text(parent, text);
        }
        JsonNode::Element(element) => {
            let id = tree.append_element(
                parent,
                ElementData {
                    tag_name: element.tag,
                    attrs: element.attrs,
                },
            );
            for child in element.children {
                append(tree, id, child);
            }
        }
    }
}
