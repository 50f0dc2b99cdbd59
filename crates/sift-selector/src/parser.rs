//! Selector parser.
//!
//! [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
//!
//! Recursive descent over the grammar
//!
//! ```text
//! selector-list  := ws* clause ( ws* ',' ws* clause )* ws*
//! clause         := compound ( combinator compound )*
//! combinator     := ws* ( '>' | '+' | '~' ) ws*  |  ws+
//! compound       := ident? ( '#' ident | '.' ident )*      (non-empty)
//! ident          := [A-Za-z0-9-]+
//! ```
//!
//! Combinator chains fold to the left: `a b c` is
//! `Descendant(Descendant(a, b), c)`.

use std::str::FromStr;

use tracing::{debug, trace};

use crate::ast::{Combinator, CompoundSelector, Selector, SelectorList, SimpleSelector};
use crate::error::{SyntaxError, SyntaxErrorKind};

/// Most combinators a single clause may chain.
///
/// Every link nests the chain one level deeper, and matching, comparison, and
/// serialization walk that nesting recursively.
pub const MAX_COMBINATORS: usize = 256;

/// Parse a selector list such as `div.note > p, #main`.
///
/// # Errors
///
/// Returns a [`SyntaxError`] for empty input, empty clauses, dangling
/// combinators, `#`/`.` without an identifier, any character outside the
/// grammar, and clauses longer than [`MAX_COMBINATORS`].
pub fn parse_selector(input: &str) -> Result<SelectorList, SyntaxError> {
    match Parser::new(input).parse_list() {
        Ok(list) => {
            trace!(
                selector = input,
                clauses = list.len(),
                depth = list.iter().map(Selector::depth).max().unwrap_or_default(),
                "parsed selector list"
            );
            Ok(list)
        }
        Err(err) => {
            debug!(selector = input, offset = err.offset, "selector syntax error: {}", err.kind);
            Err(err)
        }
    }
}

impl FromStr for SelectorList {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_selector(s)
    }
}

/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
///
/// Restricted to ASCII letters, digits, and hyphen.
const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// [§ 4.2 Definitions](https://www.w3.org/TR/css-syntax-3/#whitespace)
/// "A newline, U+0009 CHARACTER TABULATION, or U+0020 SPACE."
const fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

/// Whether `c` can begin a compound selector.
const fn starts_compound(c: char) -> bool {
    is_ident_char(c) || c == '#' || c == '.'
}

struct Parser<'i> {
    input: &'i str,
    pos: usize,
}

impl<'i> Parser<'i> {
    const fn new(input: &'i str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Skip whitespace, returning whether any was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    const fn error(&self, kind: SyntaxErrorKind) -> SyntaxError {
        SyntaxError::new(self.pos, kind)
    }

    /// [§ 4.1 Selector lists](https://www.w3.org/TR/selectors-4/#grouping)
    fn parse_list(mut self) -> Result<SelectorList, SyntaxError> {
        let _ = self.skip_whitespace();
        if self.peek().is_none() {
            return Err(self.error(SyntaxErrorKind::EmptySelector));
        }

        let mut selectors = vec![self.parse_clause()?];
        // parse_clause stops only at a comma or at end of input.
        while self.peek() == Some(',') {
            self.bump();
            let _ = self.skip_whitespace();
            selectors.push(self.parse_clause()?);
        }

        Ok(SelectorList(selectors))
    }

    /// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
    ///
    /// "A complex selector is a chain of one or more compound selectors
    /// separated by combinators."
    fn parse_clause(&mut self) -> Result<Selector, SyntaxError> {
        let mut selector = Selector::Compound(self.parse_compound()?);
        let mut combinators = 0;

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => return Ok(selector),
                Some('>') => Combinator::Child,
                Some('+') => Combinator::AdjacentSibling,
                Some('~') => Combinator::GeneralSibling,
                // [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators)
                // "A descendant combinator is whitespace that separates two
                // compound selectors."
                Some(c) if had_whitespace && starts_compound(c) => Combinator::Descendant,
                Some(c) => return Err(self.error(SyntaxErrorKind::UnexpectedCharacter(c))),
            };

            combinators += 1;
            if combinators > MAX_COMBINATORS {
                return Err(self.error(SyntaxErrorKind::TooManyCombinators {
                    limit: MAX_COMBINATORS,
                }));
            }

            if combinator != Combinator::Descendant {
                self.bump();
                let _ = self.skip_whitespace();
            }

            let right = self.parse_compound()?;
            selector = selector.combine(combinator, right);
        }
    }

    /// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
    ///
    /// An optional type selector followed by any mix of ID and class
    /// selectors, with no whitespace in between.
    fn parse_compound(&mut self) -> Result<CompoundSelector, SyntaxError> {
        let mut selectors = Vec::new();

        if self.peek().is_some_and(is_ident_char) {
            selectors.push(SimpleSelector::tag(self.consume_ident()));
        }

        while let Some(prefix @ ('#' | '.')) = self.peek() {
            let marker = self.pos;
            self.bump();
            let name = self.consume_ident();
            if name.is_empty() {
                return Err(SyntaxError::new(
                    marker,
                    SyntaxErrorKind::ExpectedIdentifier { after: prefix },
                ));
            }
            selectors.push(if prefix == '#' {
                SimpleSelector::id(name)
            } else {
                SimpleSelector::class(name)
            });
        }

        if selectors.is_empty() {
            return Err(self.error(SyntaxErrorKind::ExpectedSelector { found: self.peek() }));
        }

        Ok(CompoundSelector::new(selectors))
    }

    /// Consume a run of identifier characters, possibly empty.
    fn consume_ident(&mut self) -> &'i str {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.bump();
        }
        &self.input[start..self.pos]
    }
}
