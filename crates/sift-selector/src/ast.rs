//! Selector expression trees produced by the parser.
//!
//! Every type here is plain immutable data with structural equality, so two
//! parses of the same input compare equal and tests can assert whole trees.

use std::fmt;
use std::mem;
use std::slice;

use serde::Serialize;
use strum_macros::{EnumIter, IntoStaticStr};

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Compared ASCII case-insensitively against the element's local name.
    /// Examples: `div`, `p`, `h1`
    Tag {
        /// The element name as written in the selector.
        name: String,
    },

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    /// "An ID selector is a hash (#, U+0023) immediately followed by the
    /// ID value, which is an identifier."
    ///
    /// Examples: `#main`, `#nav-bar`
    Id {
        /// The id value, compared exactly.
        id: String,
    },

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    /// "The class selector is given as a full stop (. U+002E) immediately
    /// followed by an identifier."
    ///
    /// Examples: `.highlight`, `.nav-item`
    Class {
        /// The class name, compared exactly against each class token.
        name: String,
    },
}

impl SimpleSelector {
    /// Type selector for `name`.
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self::Tag { name: name.into() }
    }

    /// ID selector for `id`.
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id { id: id.into() }
    }

    /// Class selector for `name`.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class { name: name.into() }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag { name } => f.write_str(name),
            Self::Id { id } => write!(f, "#{id}"),
            Self::Class { name } => write!(f, ".{name}"),
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
///
/// Simple selectors keep their source order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CompoundSelector {
    /// The simple selectors that must all match.
    pub selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    /// Wrap a list of simple selectors.
    #[must_use]
    pub const fn new(selectors: Vec<SimpleSelector>) -> Self {
        Self { selectors }
    }
}

impl From<SimpleSelector> for CompoundSelector {
    fn from(simple: SimpleSelector) -> Self {
        Self::new(vec![simple])
    }
}

impl fmt::Display for CompoundSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.selectors
            .iter()
            .try_for_each(|simple| write!(f, "{simple}"))
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
///
/// "A combinator is punctuation that represents a particular kind of
/// relationship between the selectors on either side."
///
/// The static string form (via [`IntoStaticStr`]) is the kebab-case name used
/// in log fields; the serialized form keeps the short names of the JSON tree.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, IntoStaticStr, strum_macros::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    #[serde(rename = "descendant")]
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    #[serde(rename = "child")]
    Child,

    /// [§ 16.3 Next-sibling combinator](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators)
    /// "A selector of the form 'A + B' represents an element B that
    /// immediately follows element A, where A and B share the same parent."
    #[serde(rename = "adjacent")]
    AdjacentSibling,

    /// [§ 16.4 Subsequent-sibling combinator](https://www.w3.org/TR/selectors-4/#general-sibling-combinators)
    /// "A selector of the form 'A ~ B' represents an element B that follows
    /// element A (not necessarily immediately), where A and B share the
    /// same parent."
    #[serde(rename = "sibling")]
    GeneralSibling,
}

impl Combinator {
    /// Selector text for this combinator, including surrounding spaces.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => " > ",
            Self::AdjacentSibling => " + ",
            Self::GeneralSibling => " ~ ",
        }
    }
}

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// One link of a combinator chain. Chains fold to the left, so for
/// `div.container > ul li` the outermost link is
/// ```text
/// Descendant( Child(div.container, ul), li )
/// ```
/// and `right` is always the subject of the whole selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ComplexSelector {
    /// Relationship between the `left` element and the subject.
    #[serde(rename = "type")]
    pub combinator: Combinator,

    /// Evaluated against the ancestor, parent, or preceding sibling.
    pub left: Box<Selector>,

    /// Evaluated against the candidate element itself.
    pub right: CompoundSelector,
}

impl fmt::Display for ComplexSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, self.combinator.as_css(), self.right)
    }
}

impl Drop for ComplexSelector {
    /// Unlinks the `left` chain one box at a time.
    fn drop(&mut self) {
        let mut next = mem::replace(&mut *self.left, Selector::empty());
        while let Selector::Complex(complex) = &mut next {
            let left = mem::replace(&mut *complex.left, Selector::empty());
            next = left;
        }
    }
}

/// A single comma-separated clause: either a bare compound selector or a
/// combinator chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Selector {
    /// A compound selector with no combinators.
    Compound(CompoundSelector),
    /// A combinator chain.
    Complex(ComplexSelector),
}

impl Selector {
    /// Placeholder left behind when a chain is taken apart.
    const fn empty() -> Self {
        Self::Compound(CompoundSelector::new(Vec::new()))
    }

    /// Extend this selector to the right: `self <combinator> right`.
    #[must_use]
    pub fn combine(self, combinator: Combinator, right: CompoundSelector) -> Self {
        Self::Complex(ComplexSelector {
            combinator,
            left: Box::new(self),
            right,
        })
    }

    /// The rightmost compound selector, i.e. the one that must match the
    /// element being tested.
    #[must_use]
    pub const fn subject(&self) -> &CompoundSelector {
        match self {
            Self::Compound(compound) => compound,
            Self::Complex(complex) => &complex.right,
        }
    }

    /// Number of combinators in the chain.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Self::Complex(complex) = current {
            depth += 1;
            current = &complex.left;
        }
        depth
    }
}

impl From<CompoundSelector> for Selector {
    fn from(compound: CompoundSelector) -> Self {
        Self::Compound(compound)
    }
}

impl From<SimpleSelector> for Selector {
    fn from(simple: SimpleSelector) -> Self {
        Self::Compound(simple.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Links from the subject outwards; printed leftmost first.
        let mut links = Vec::new();
        let mut current = self;
        while let Self::Complex(complex) = current {
            links.push(complex);
            current = &complex.left;
        }

        write!(f, "{}", current.subject())?;
        for complex in links.iter().rev() {
            write!(f, "{}{}", complex.combinator.as_css(), complex.right)?;
        }
        Ok(())
    }
}

/// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
///
/// "A comma-separated list of selectors represents the union of all elements
/// selected by each of the individual selectors in the list."
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SelectorList(pub Vec<Selector>);

impl SelectorList {
    /// Number of clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for lists produced by the parser.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the clauses in source order.
    pub fn iter(&self) -> slice::Iter<'_, Selector> {
        self.0.iter()
    }
}

impl From<Vec<Selector>> for SelectorList {
    fn from(selectors: Vec<Selector>) -> Self {
        Self(selectors)
    }
}

impl<'a> IntoIterator for &'a SelectorList {
    type Item = &'a Selector;
    type IntoIter = slice::Iter<'a, Selector>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}
