//! Selector matching.
//!
//! [§ 4.1 Selector Matching](https://www.w3.org/TR/selectors-4/#match-a-selector-against-an-element)
//!
//! Matching starts at the candidate element: the subject compound must match
//! it first, and only then is the left operand of a combinator evaluated
//! against related elements. Left operands may themselves be chains, which
//! recurse. Results for chain prefixes are memoized per query, which bounds
//! the work at one evaluation per prefix and node.

use std::collections::{HashMap, HashSet};
use std::iter;

use tracing::debug;

use crate::ast::{
    Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList, SimpleSelector,
};
use crate::tree::SelectorTree;

impl SimpleSelector {
    /// Check if this simple selector matches `node`.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        match self {
            // [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
            // Element names in HTML documents are ASCII case-insensitive.
            Self::Tag { name } => tree
                .local_name(node)
                .is_some_and(|local| local.eq_ignore_ascii_case(name)),

            // [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
            Self::Id { id } => tree.id_attribute(node) == Some(id.as_str()),

            // [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
            Self::Class { name } => tree.has_class(node, name),
        }
    }
}

impl CompoundSelector {
    /// Check if every simple selector matches `node`. Non-elements never
    /// match, not even an empty compound.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        tree.local_name(node).is_some()
            && self
                .selectors
                .iter()
                .all(|simple| simple.matches(tree, node))
    }
}

impl ComplexSelector {
    /// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
    ///
    /// `right` must match `node`; `left` is then looked for among the
    /// elements the combinator relates `node` to.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        self.right.matches(tree, node)
            && Matcher::new(tree).link(0, self, self.left.depth() + 1, node)
    }
}

impl Selector {
    /// Check if this selector matches `node`.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        Matcher::new(tree).selector(0, self, self.depth(), node)
    }
}

impl SelectorList {
    /// Check if any clause matches `node`.
    #[must_use]
    pub fn matches<T: SelectorTree>(&self, tree: &T, node: T::Node) -> bool {
        Matcher::new(tree).list(self, node)
    }

    /// Every descendant of `root` matched by any clause, in tree order and
    /// without duplicates. `root` itself is never included.
    #[must_use]
    pub fn query_all<T: SelectorTree>(&self, tree: &T, root: T::Node) -> Vec<T::Node> {
        let mut matcher = Matcher::new(tree);
        let mut seen = HashSet::new();
        let mut matched = Vec::new();

        for node in tree.descendants(root) {
            if matcher.list(self, node) && seen.insert(node) {
                matched.push(node);
            }
        }

        debug!(
            selector = %self,
            clauses = self.len(),
            matched = matched.len(),
            cached = matcher.known.len(),
            "selector query complete"
        );
        matched
    }

    /// The first descendant of `root` in tree order matched by any clause.
    #[must_use]
    pub fn query_first<T: SelectorTree>(&self, tree: &T, root: T::Node) -> Option<T::Node> {
        let mut matcher = Matcher::new(tree);
        tree.descendants(root).find(|&node| matcher.list(self, node))
    }
}

/// Matching state for one query.
///
/// Within a clause, a chain prefix is identified by its depth (the number of
/// combinators it contains). `known` records whether the prefix of a given
/// clause and depth matched a given node, so each pair is evaluated at most
/// once however many candidates share the ancestor or sibling.
struct Matcher<'t, T: SelectorTree> {
    tree: &'t T,
    known: HashMap<(usize, usize, T::Node), bool>,
}

impl<'t, T: SelectorTree> Matcher<'t, T> {
    fn new(tree: &'t T) -> Self {
        Self {
            tree,
            known: HashMap::new(),
        }
    }

    fn list(&mut self, list: &SelectorList, node: T::Node) -> bool {
        list.iter()
            .enumerate()
            .any(|(clause, selector)| self.selector(clause, selector, selector.depth(), node))
    }

    fn selector(
        &mut self,
        clause: usize,
        selector: &Selector,
        depth: usize,
        node: T::Node,
    ) -> bool {
        if !selector.subject().matches(self.tree, node) {
            return false;
        }
        match selector {
            Selector::Compound(_) => true,
            Selector::Complex(complex) => self.link(clause, complex, depth, node),
        }
    }

    /// Whether `complex.left` is satisfied by an element related to `node`.
    /// The caller has already matched `complex.right` against `node`.
    fn link(
        &mut self,
        clause: usize,
        complex: &ComplexSelector,
        depth: usize,
        node: T::Node,
    ) -> bool {
        let key = (clause, depth, node);
        if let Some(&known) = self.known.get(&key) {
            return known;
        }

        let tree = self.tree;
        let left = &*complex.left;
        let depth = depth.saturating_sub(1);
        let matched = match complex.combinator {
            // "an element B that is an arbitrary descendant of some ancestor
            // element A"
            Combinator::Descendant => {
                ancestors(tree, node).any(|ancestor| self.selector(clause, left, depth, ancestor))
            }

            // "an element B that is a direct child of element A"
            Combinator::Child => tree
                .parent_element(node)
                .is_some_and(|parent| self.selector(clause, left, depth, parent)),

            // "an element B that immediately follows element A"
            Combinator::AdjacentSibling => tree
                .prev_sibling_element(node)
                .is_some_and(|sibling| self.selector(clause, left, depth, sibling)),

            // "an element B that follows element A (not necessarily immediately)"
            Combinator::GeneralSibling => preceding_siblings(tree, node)
                .any(|sibling| self.selector(clause, left, depth, sibling)),
        };

        let _ = self.known.insert(key, matched);
        matched
    }
}

fn ancestors<T: SelectorTree>(tree: &T, node: T::Node) -> impl Iterator<Item = T::Node> {
    iter::successors(tree.parent_element(node), move |&n| tree.parent_element(n))
}

fn preceding_siblings<T: SelectorTree>(
    tree: &T,
    node: T::Node,
) -> impl Iterator<Item = T::Node> {
    iter::successors(tree.prev_sibling_element(node), move |&n| {
        tree.prev_sibling_element(n)
    })
}
