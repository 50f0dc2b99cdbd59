//! Integration tests for selector parsing.

use sift_selector::{
    Combinator, CompoundSelector, MAX_COMBINATORS, Selector, SelectorList, SimpleSelector,
    SyntaxErrorKind, parse_selector,
};

fn compound(selectors: Vec<SimpleSelector>) -> Selector {
    Selector::Compound(CompoundSelector::new(selectors))
}

fn assert_parses(input: &str, expected: Vec<Selector>) {
    assert_eq!(parse_selector(input).unwrap(), SelectorList(expected), "input: {input:?}");
}

fn assert_rejects(input: &str, kind: SyntaxErrorKind) {
    let err = parse_selector(input).unwrap_err();
    assert_eq!(err.kind, kind, "input: {input:?}");
}

// Simple and compound selectors

#[test]
fn test_parse_tag() {
    assert_parses("body", vec![compound(vec![SimpleSelector::tag("body")])]);
}

#[test]
fn test_parse_id() {
    assert_parses("#cool-thing", vec![compound(vec![SimpleSelector::id("cool-thing")])]);
}

#[test]
fn test_parse_class() {
    assert_parses(".cool-class", vec![compound(vec![SimpleSelector::class("cool-class")])]);
}

#[test]
fn test_parse_compound_keeps_source_order() {
    assert_parses(
        "img#nice.cool",
        vec![compound(vec![
            SimpleSelector::tag("img"),
            SimpleSelector::id("nice"),
            SimpleSelector::class("cool"),
        ])],
    );

    // IDs and classes may come in any order after the tag.
    assert_parses(
        ".b#a.c",
        vec![compound(vec![
            SimpleSelector::class("b"),
            SimpleSelector::id("a"),
            SimpleSelector::class("c"),
        ])],
    );
}

#[test]
fn test_parse_identifier_characters() {
    // Letters, digits, and hyphens, in any position.
    assert_parses(
        "h1.col-2#3d",
        vec![compound(vec![
            SimpleSelector::tag("h1"),
            SimpleSelector::class("col-2"),
            SimpleSelector::id("3d"),
        ])],
    );
}

// Selector lists

#[test]
fn test_parse_comma_separated_selectors() {
    assert_parses(
        ".what.is.up, select, #dang",
        vec![
            compound(vec![
                SimpleSelector::class("what"),
                SimpleSelector::class("is"),
                SimpleSelector::class("up"),
            ]),
            compound(vec![SimpleSelector::tag("select")]),
            compound(vec![SimpleSelector::id("dang")]),
        ],
    );
}

#[test]
fn test_parse_comma_whitespace_is_optional() {
    let tight = parse_selector("a,b").unwrap();
    let loose = parse_selector("  a\t,\n b  ").unwrap();
    assert_eq!(tight, loose);
    assert_eq!(tight.len(), 2);
}

// Combinators
// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)

fn parent_child(combinator: Combinator) -> Vec<Selector> {
    vec![
        Selector::from(SimpleSelector::class("parent"))
            .combine(combinator, SimpleSelector::id("child").into()),
    ]
}

#[test]
fn test_parse_descendant_combinator() {
    assert_parses(".parent #child", parent_child(Combinator::Descendant));
    assert_parses(".parent \t\n #child", parent_child(Combinator::Descendant));
}

#[test]
fn test_parse_child_combinator() {
    assert_parses(".parent > #child", parent_child(Combinator::Child));
    assert_parses(".parent>#child", parent_child(Combinator::Child));
}

#[test]
fn test_parse_general_sibling_combinator() {
    assert_parses(".parent  ~ #child", parent_child(Combinator::GeneralSibling));
    assert_parses(".parent~#child", parent_child(Combinator::GeneralSibling));
}

#[test]
fn test_parse_adjacent_sibling_combinator() {
    assert_parses(".parent  + #child", parent_child(Combinator::AdjacentSibling));
    assert_parses(".parent+ #child", parent_child(Combinator::AdjacentSibling));
}

#[test]
fn test_parse_chain_folds_left() {
    // a b c == Descendant(Descendant(a, b), c)
    let expected = Selector::from(SimpleSelector::tag("a"))
        .combine(Combinator::Descendant, SimpleSelector::tag("b").into())
        .combine(Combinator::Descendant, SimpleSelector::tag("c").into());
    assert_parses("a b c", vec![expected]);

    let list = parse_selector("a b c").unwrap();
    let Selector::Complex(outer) = &list.0[0] else {
        panic!("expected a combinator chain");
    };
    // The rightmost run is the immediate right operand of the outermost link.
    assert_eq!(outer.right, CompoundSelector::from(SimpleSelector::tag("c")));
    let Selector::Complex(inner) = &*outer.left else {
        panic!("expected a nested chain");
    };
    assert_eq!(inner.right, CompoundSelector::from(SimpleSelector::tag("b")));
    assert_eq!(*inner.left, Selector::from(SimpleSelector::tag("a")));
}

#[test]
fn test_parse_mixed_chain() {
    // div.container > ul.nav li + a.active
    let expected = Selector::from(CompoundSelector::new(vec![
        SimpleSelector::tag("div"),
        SimpleSelector::class("container"),
    ]))
    .combine(
        Combinator::Child,
        CompoundSelector::new(vec![SimpleSelector::tag("ul"), SimpleSelector::class("nav")]),
    )
    .combine(Combinator::Descendant, SimpleSelector::tag("li").into())
    .combine(
        Combinator::AdjacentSibling,
        CompoundSelector::new(vec![SimpleSelector::tag("a"), SimpleSelector::class("active")]),
    );

    assert_parses("div.container > ul.nav li + a.active", vec![expected]);
}

#[test]
fn test_parse_chains_in_list() {
    let list = parse_selector("ul > li, h1 + p ~ span").unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.0[0].depth(), 1);
    assert_eq!(list.0[1].depth(), 2);
    assert_eq!(
        list.0[1].subject(),
        &CompoundSelector::from(SimpleSelector::tag("span"))
    );
}

#[test]
fn test_parse_surrounding_whitespace_ignored() {
    assert_eq!(
        parse_selector("   div > p   ").unwrap(),
        parse_selector("div > p").unwrap()
    );
}

// Idempotence

#[test]
fn test_parse_twice_is_equal() {
    for input in ["body", "#a.b", "a b c", "x > y + z ~ w", "a, b, .c#d"] {
        assert_eq!(parse_selector(input).unwrap(), parse_selector(input).unwrap());
    }
}

#[test]
fn test_canonical_form_reparses() {
    let list = parse_selector("div.a>p  ,#x~ .y+span").unwrap();
    assert_eq!(list.to_string(), "div.a > p, #x ~ .y + span");
    assert_eq!(list.to_string().parse::<SelectorList>().unwrap(), list);
}

// Rejection

#[test]
fn test_reject_empty() {
    assert_rejects("", SyntaxErrorKind::EmptySelector);
    assert_rejects(" \t\n", SyntaxErrorKind::EmptySelector);
}

#[test]
fn test_reject_dangling_combinator() {
    assert_rejects("div >", SyntaxErrorKind::ExpectedSelector { found: None });
    assert_rejects("div + ", SyntaxErrorKind::ExpectedSelector { found: None });
    assert_rejects("div ~", SyntaxErrorKind::ExpectedSelector { found: None });
    assert_rejects("div > , p", SyntaxErrorKind::ExpectedSelector { found: Some(',') });
}

#[test]
fn test_reject_leading_combinator() {
    assert_rejects("> div", SyntaxErrorKind::ExpectedSelector { found: Some('>') });
    assert_rejects("+ p", SyntaxErrorKind::ExpectedSelector { found: Some('+') });
    assert_rejects("a, ~ p", SyntaxErrorKind::ExpectedSelector { found: Some('~') });
}

#[test]
fn test_reject_doubled_combinator() {
    assert_rejects("a > > b", SyntaxErrorKind::ExpectedSelector { found: Some('>') });
    assert_rejects("a >+ b", SyntaxErrorKind::ExpectedSelector { found: Some('+') });
}

#[test]
fn test_reject_empty_clause() {
    assert_rejects("a,,b", SyntaxErrorKind::ExpectedSelector { found: Some(',') });
    assert_rejects(", a", SyntaxErrorKind::ExpectedSelector { found: Some(',') });
    assert_rejects("a ,", SyntaxErrorKind::ExpectedSelector { found: None });
}

#[test]
fn test_reject_missing_identifier() {
    assert_rejects("#", SyntaxErrorKind::ExpectedIdentifier { after: '#' });
    assert_rejects("div.", SyntaxErrorKind::ExpectedIdentifier { after: '.' });
    assert_rejects("a.#b", SyntaxErrorKind::ExpectedIdentifier { after: '.' });
    assert_rejects(". a", SyntaxErrorKind::ExpectedIdentifier { after: '.' });
}

#[test]
fn test_reject_unsupported_syntax() {
    // Universal, attribute, and pseudo-class selectors are outside the grammar.
    assert_rejects("*", SyntaxErrorKind::ExpectedSelector { found: Some('*') });
    assert_rejects("a[href]", SyntaxErrorKind::UnexpectedCharacter('['));
    assert_rejects("li:first-child", SyntaxErrorKind::UnexpectedCharacter(':'));
    assert_rejects("a_b", SyntaxErrorKind::UnexpectedCharacter('_'));
}

#[test]
fn test_reject_never_returns_partial_list() {
    // The first clause is valid, but the whole list is rejected.
    let err = parse_selector("div, p > ").unwrap_err();
    assert_eq!(err.offset, 9);
    assert_eq!(err.fragment("div, p > "), "");
}

// Chain length

#[test]
fn test_parse_chain_at_combinator_limit() {
    let input = format!("a{}", " a".repeat(MAX_COMBINATORS));
    let list = parse_selector(&input).unwrap();
    assert_eq!(list.0[0].depth(), MAX_COMBINATORS);
    assert_eq!(list.to_string(), input);
}

#[test]
fn test_reject_chain_over_combinator_limit() {
    let input = format!("a{}", " > a".repeat(MAX_COMBINATORS + 1));
    let err = parse_selector(&input).unwrap_err();
    assert_eq!(err.kind, SyntaxErrorKind::TooManyCombinators { limit: MAX_COMBINATORS });
    // The offending combinator is the last one.
    assert_eq!(err.fragment(&input), "> a");
}

#[test]
fn test_reject_very_long_selector() {
    let input = "a ".repeat(20_000) + "a";
    assert_rejects(&input, SyntaxErrorKind::TooManyCombinators { limit: MAX_COMBINATORS });

    // The limit applies per clause.
    let clause = format!("a{}", " + a".repeat(MAX_COMBINATORS));
    let list = parse_selector(&[clause.as_str(); 3].join(", ")).unwrap();
    assert_eq!(list.len(), 3);
}

// Serialized shape

#[test]
fn test_serialized_compound_shape() {
    let list = parse_selector("img#nice.cool").unwrap();
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "selectors": [
                { "type": "tag", "name": "img" },
                { "type": "id", "id": "nice" },
                { "type": "class", "name": "cool" },
            ]
        }])
    );
}

#[test]
fn test_serialized_combinator_shape() {
    let list = parse_selector(".parent > #child, a + b ~ c").unwrap();
    let json = serde_json::to_value(&list).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {
                "type": "child",
                "left": { "selectors": [{ "type": "class", "name": "parent" }] },
                "right": { "selectors": [{ "type": "id", "id": "child" }] },
            },
            {
                "type": "sibling",
                "left": {
                    "type": "adjacent",
                    "left": { "selectors": [{ "type": "tag", "name": "a" }] },
                    "right": { "selectors": [{ "type": "tag", "name": "b" }] },
                },
                "right": { "selectors": [{ "type": "tag", "name": "c" }] },
            },
        ])
    );
}
