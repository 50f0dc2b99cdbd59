//! CSS selector parsing and matching for the sift query engine.
//!
//! # Scope
//!
//! - **Parsing** ([Selectors Level 4 § 4](https://www.w3.org/TR/selectors-4/#syntax))
//!   - Type, class, and ID selectors
//!   - Compound selectors (`img#hero.wide`)
//!   - Descendant, child, next-sibling, and subsequent-sibling combinators
//!   - Comma-separated selector lists
//!
//! - **Matching** against any tree implementing [`SelectorTree`]
//!   - `querySelectorAll` semantics: descendants only, tree order, no duplicates
//!
//! # Not Implemented
//!
//! - Universal, attribute, and pseudo-class selectors
//! - Specificity and the cascade
//! - Namespaces
//!
//! # Example
//!
//! ```
//! use sift_dom::{DomTree, ElementData, NodeId};
//!
//! let mut tree = DomTree::new();
//! let list = tree.append_element(NodeId::ROOT, ElementData::new("ul").with_attr("class", "menu"));
//! let item = tree.append_element(list, ElementData::new("li"));
//!
//! let found = sift_selector::query_selector_all(&tree, NodeId::ROOT, ".menu > li").unwrap();
//! assert_eq!(found, vec![item]);
//! ```

/// Selector expression trees.
pub mod ast;
/// Selector syntax errors.
pub mod error;
/// Matching selectors against tree nodes.
pub mod matching;
/// Selector string parsing.
pub mod parser;
/// The tree navigation contract.
pub mod tree;

pub use ast::{
    Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList, SimpleSelector,
};
pub use error::{SyntaxError, SyntaxErrorKind};
pub use parser::{MAX_COMBINATORS, parse_selector};
pub use tree::SelectorTree;

/// Every descendant of `root` matching `selector`, in tree order, each at
/// most once.
///
/// This is `root.querySelectorAll(selector)`. Each call parses afresh; use
/// [`SelectorList::query_all`] to run one parsed list against several roots.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if `selector` does not parse. No nodes are
/// returned in that case.
pub fn query_selector_all<T: SelectorTree>(
    tree: &T,
    root: T::Node,
    selector: &str,
) -> Result<Vec<T::Node>, SyntaxError> {
    let list = parse_selector(selector)?;
    Ok(list.query_all(tree, root))
}

/// The first descendant of `root` in tree order matching `selector`.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if `selector` does not parse.
pub fn query_selector<T: SelectorTree>(
    tree: &T,
    root: T::Node,
    selector: &str,
) -> Result<Option<T::Node>, SyntaxError> {
    let list = parse_selector(selector)?;
    Ok(list.query_first(tree, root))
}
