//! Selector syntax errors.

use thiserror::Error;

/// A selector string that does not conform to the grammar.
///
/// Parsing never returns a partial tree: any error aborts the whole list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind} at offset {offset}")]
pub struct SyntaxError {
    /// Byte offset into the selector string where parsing stopped.
    pub offset: usize,
    /// What went wrong.
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    /// Create an error at `offset`.
    #[must_use]
    pub const fn new(offset: usize, kind: SyntaxErrorKind) -> Self {
        Self { offset, kind }
    }

    /// The part of `input` starting at the offending position.
    ///
    /// Returns an empty string when the error is at the end of input, or when
    /// `input` is not the string that produced this error.
    #[must_use]
    pub fn fragment<'a>(&self, input: &'a str) -> &'a str {
        input.get(self.offset..).unwrap_or_default()
    }
}

/// The kinds of [`SyntaxError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyntaxErrorKind {
    /// The input is empty or only whitespace.
    #[error("empty selector")]
    EmptySelector,

    /// A compound selector was required here: at the start of a clause, after
    /// a comma, or after a combinator.
    #[error("expected a selector, found {}", describe(.found))]
    ExpectedSelector {
        /// The character found instead, `None` at end of input.
        found: Option<char>,
    },

    /// `#` or `.` not followed by an identifier.
    #[error("expected an identifier after '{after}'")]
    ExpectedIdentifier {
        /// The prefix character, `#` or `.`.
        after: char,
    },

    /// A single clause chains more than
    /// [`MAX_COMBINATORS`](crate::parser::MAX_COMBINATORS) combinators.
    #[error("more than {limit} combinators in one selector")]
    TooManyCombinators {
        /// The limit that was exceeded.
        limit: usize,
    },

    /// A character that can neither continue a compound selector nor start a
    /// combinator or the next clause.
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
}

#[allow(clippy::ref_option)]
fn describe(found: &Option<char>) -> String {
    found.map_or_else(|| "end of input".to_owned(), |c| format!("'{c}'"))
}
