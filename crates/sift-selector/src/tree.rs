//! The navigation contract selectors are matched through.
//!
//! The matcher never owns or mutates a tree. Anything that can answer these
//! questions about its nodes can be queried; [`DomTree`] is the implementation
//! shipped with the workspace.

use std::hash::Hash;

use sift_dom::{DescendantIterator, DomTree, NodeId};

/// A read-only tree of element-like nodes.
pub trait SelectorTree {
    /// Node handle. Equality is node identity and is what query results are
    /// deduplicated on.
    type Node: Copy + Eq + Hash;

    /// Pre-order iterator returned by [`SelectorTree::descendants`].
    type Descendants<'a>: Iterator<Item = Self::Node>
    where
        Self: 'a;

    /// The element's local name, or `None` if the node is not an element.
    /// Non-elements never match any selector.
    fn local_name(&self, node: Self::Node) -> Option<&str>;

    /// The value of the element's `id` attribute.
    fn id_attribute(&self, node: Self::Node) -> Option<&str>;

    /// Whether the element's class list contains `name`.
    fn has_class(&self, node: Self::Node, name: &str) -> bool;

    /// The parent, if it is an element.
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node>;

    /// The closest preceding sibling that is an element.
    fn prev_sibling_element(&self, node: Self::Node) -> Option<Self::Node>;

    /// Every descendant of `root` in tree order, `root` excluded.
    fn descendants(&self, root: Self::Node) -> Self::Descendants<'_>;
}

impl SelectorTree for DomTree {
    type Node = NodeId;
    type Descendants<'a> = DescendantIterator<'a>;

    fn local_name(&self, node: NodeId) -> Option<&str> {
        self.as_element(node).map(|e| e.tag_name.as_str())
    }

    fn id_attribute(&self, node: NodeId) -> Option<&str> {
        self.as_element(node).and_then(|e| e.id())
    }

    fn has_class(&self, node: NodeId, name: &str) -> bool {
        self.as_element(node).is_some_and(|e| e.has_class(name))
    }

    /// The Document node is not an element, so top-level elements have no
    /// parent element.
    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|&parent| self.is_element(parent))
    }

    /// Text and comment siblings are skipped.
    fn prev_sibling_element(&self, node: NodeId) -> Option<NodeId> {
        self.preceding_siblings(node)
            .find(|&sibling| self.is_element(sibling))
    }

    fn descendants(&self, root: NodeId) -> DescendantIterator<'_> {
        DomTree::descendants(self, root)
    }
}
