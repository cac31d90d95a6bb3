//! Tests for template parsing and canonical display.

use rstest::rstest;

use super::*;
use crate::error::ParseError;
use crate::value::Number;

fn text(value: &str) -> Node {
    Node::Text(value.to_owned())
}

fn tag(key: &str, children: Vec<Node>) -> Node {
    Node::Tag(Tag {
        key: key.to_owned(),
        children: TokenTree::new(children),
        self_closing: false,
    })
}

fn simple(key: &str) -> Node {
    Node::Placeholder(Placeholder {
        key: key.to_owned(),
        argument: Argument::Simple,
    })
}

#[test]
fn parses_nested_tags() {
    let tree = parse("Hello <0>World <1>{name}</1></0>!").expect("valid template");
    assert_eq!(
        tree.nodes(),
        &[
            text("Hello "),
            tag("0", vec![text("World "), tag("1", vec![simple("name")])]),
            text("!"),
        ]
    );
}

#[test]
fn parses_named_and_self_closing_tags() {
    let tree = parse("Line<br/>next <link>docs</link>").expect("valid template");
    assert_eq!(
        tree.nodes(),
        &[
            text("Line"),
            Node::Tag(Tag {
                key: String::from("br"),
                children: TokenTree::default(),
                self_closing: true,
            }),
            text("next "),
            tag("link", vec![text("docs")]),
        ]
    );
}

#[rstest]
#[case("<0>text", ParseError::UnterminatedTag { key: String::from("0"), offset: 0 })]
#[case(
    "<0><1>text</0></1>",
    ParseError::UnbalancedTag {
        expected: String::from("1"),
        found: String::from("0"),
        offset: 10,
    }
)]
#[case("text</0>", ParseError::UnexpectedClosingTag { key: String::from("0"), offset: 4 })]
#[case("Hello {name", ParseError::UnterminatedPlaceholder { offset: 6 })]
#[case("a {} b", ParseError::EmptyPlaceholder { offset: 2 })]
#[case("a } b", ParseError::UnexpectedBrace { offset: 2 })]
fn rejects_malformed_templates(#[case] template: &str, #[case] expected: ParseError) {
    assert_eq!(parse(template), Err(expected));
}

#[rstest]
#[case("a < b")]
#[case("<>")]
#[case("x <0 y")]
#[case("1 <= 2")]
fn stray_angle_brackets_are_literal(#[case] template: &str) {
    let tree = parse(template).expect("literal text");
    assert_eq!(tree.nodes(), &[text(template)]);
}

#[test]
fn parses_plural_cases_with_pound_and_tags() {
    let tree = parse("{count, plural, =0 {Zero items} one {# item} other {# <0>A lot of them</0>}}")
        .expect("valid plural");
    let [Node::Placeholder(placeholder)] = tree.nodes() else {
        panic!("expected one placeholder, got {:?}", tree.nodes());
    };
    assert_eq!(placeholder.key, "count");
    let Argument::Plural(spec) = &placeholder.argument else {
        panic!("expected plural argument");
    };
    assert_eq!(spec.kind, crate::plural::PluralKind::Cardinal);
    assert_eq!(spec.offset, 0);
    assert_eq!(
        spec.cases.exact(Number::Int(0)).map(TokenTree::nodes),
        Some(&[text("Zero items")][..])
    );
    assert_eq!(
        spec.cases.keyword("one").map(TokenTree::nodes),
        Some(&[Node::Pound, text(" item")][..])
    );
    assert_eq!(
        spec.cases.other().nodes(),
        &[Node::Pound, text(" "), tag("0", vec![text("A lot of them")])]
    );
}

#[rstest]
#[case("{n, plural, offset:1 one {x} other {y}}", 1)]
#[case("{n, plural, offset: 2 other {y}}", 2)]
#[case("{n, plural, other {y}}", 0)]
fn reads_plural_offset(#[case] template: &str, #[case] expected: i64) {
    let tree = parse(template).expect("valid plural");
    let Some(Node::Placeholder(Placeholder {
        argument: Argument::Plural(spec),
        ..
    })) = tree.nodes().first()
    else {
        panic!("expected plural placeholder");
    };
    assert_eq!(spec.offset, expected);
}

#[rstest]
#[case(
    "{n, plural, one {x}}",
    ParseError::MissingOtherCase { key: String::from("n"), offset: 0 }
)]
#[case(
    "{n, plural, one {x} one {y} other {z}}",
    ParseError::DuplicateCase { label: String::from("one"), offset: 0 }
)]
#[case(
    "{n, plural, lots {x} other {z}}",
    ParseError::InvalidCaseLabel { label: String::from("lots"), offset: 12 }
)]
#[case(
    "{n, plural, offset:x other {z}}",
    ParseError::InvalidOffset { text: String::from("x"), offset: 12 }
)]
#[case("{n, plural, one {x} other {y}", ParseError::UnterminatedPlaceholder { offset: 0 })]
#[case(
    "{n, plural, one {<0>x} other {y}}",
    ParseError::UnterminatedTag { key: String::from("0"), offset: 17 }
)]
fn rejects_invalid_case_tables(#[case] template: &str, #[case] expected: ParseError) {
    assert_eq!(parse(template), Err(expected));
}

#[test]
fn select_accepts_arbitrary_labels() {
    let tree = parse("{gender, select, female {She} male {He} other {They}}").expect("valid select");
    let Some(Node::Placeholder(Placeholder {
        argument: Argument::Select(cases),
        ..
    })) = tree.nodes().first()
    else {
        panic!("expected select placeholder");
    };
    assert_eq!(cases.keyword("female").map(TokenTree::nodes), Some(&[text("She")][..]));
    assert_eq!(cases.other().nodes(), &[text("They")]);
}

#[test]
fn pound_is_literal_outside_plural() {
    let tree = parse("Issue #4 {kind, select, bug {#bug} other {#x}}").expect("valid template");
    assert_eq!(tree.nodes().first(), Some(&text("Issue #4 ")));
    let Some(Node::Placeholder(Placeholder {
        argument: Argument::Select(cases),
        ..
    })) = tree.nodes().get(1)
    else {
        panic!("expected select placeholder");
    };
    assert_eq!(cases.keyword("bug").map(TokenTree::nodes), Some(&[text("#bug")][..]));
}

#[rstest]
#[case("{price, number}", FormatKind::Number, None)]
#[case("{price, number, currency}", FormatKind::Number, Some("currency"))]
#[case("{day, date, short}", FormatKind::Date, Some("short"))]
#[case("{at, time}", FormatKind::Time, None)]
fn parses_format_arguments(
    #[case] template: &str,
    #[case] expected_kind: FormatKind,
    #[case] expected_style: Option<&str>,
) {
    let tree = parse(template).expect("valid format placeholder");
    let Some(Node::Placeholder(Placeholder {
        argument: Argument::Format { kind, style },
        ..
    })) = tree.nodes().first()
    else {
        panic!("expected format placeholder");
    };
    assert_eq!(kind, &expected_kind);
    assert_eq!(style.as_deref(), expected_style);
}

#[rstest]
#[case("it''s", "it's")]
#[case("'{name}' stays", "{name} stays")]
#[case("'<0>'literal", "<0>literal")]
#[case("don't", "don't")]
#[case("'{it''s}'", "{it's}")]
fn apostrophes_quote_syntax_characters(#[case] template: &str, #[case] expected: &str) {
    let tree = parse(template).expect("valid template");
    assert_eq!(tree.nodes(), &[text(expected)]);
}

#[test]
fn literal_text_skips_placeholders() {
    let tree = parse("Hello <0>{name}, welcome</0> to <1>the site</1>").expect("valid template");
    assert_eq!(tree.literal_text(), "Hello , welcome to the site");
}

#[rstest]
#[case("Hello <0>World</0>")]
#[case("Line<br/>next")]
#[case("{count, plural, offset:1 =0 {none} one {# item} other {# items}}")]
#[case("{g, select, a {A <0>#</0>} other {O}}")]
#[case("{n, plural, one {'#' is #} other {#}}")]
#[case("'{literal}' and it''s")]
#[case("{price, number, currency} on {day, date}")]
fn display_round_trips(#[case] template: &str) {
    let tree = parse(template).expect("valid template");
    let rendered = tree.to_string();
    assert_eq!(parse(&rendered).expect("canonical form parses"), tree);
}

#[test]
fn display_writes_canonical_form() {
    let tree = parse("{count,plural,  =0{none}  other{# <0>items</0>}}").expect("valid template");
    assert_eq!(
        tree.to_string(),
        "{count, plural, =0 {none} other {# <0>items</0>}}"
    );
}
