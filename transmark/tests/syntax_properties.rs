//! Property tests for template parsing and canonical display.
//!
//! Trees are generated directly, written out with `Display`, and parsed
//! again. Literal chunks deliberately contain the syntax characters
//! `{ } < # '` so the quoting rules are exercised at every nesting level.

use proptest::prelude::*;
use transmark::syntax::{
    Argument, CaseLabel, CaseTable, Node, Placeholder, PluralSpec, Tag, TokenTree, parse,
};
use transmark::{Binder, Bindings, CldrPlurals, FormatHook, PluralKind};
use unic_langid::langid;

fn literal() -> impl Strategy<Value = String> {
    "[a-zé {}<>#'/]{1,8}"
}

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,4}|[0-9]"
}

/// Merges neighbouring text chunks the way the parser does.
fn canonical(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match (out.last_mut(), node) {
            (Some(Node::Text(previous)), Node::Text(text)) => previous.push_str(&text),
            (_, node) => out.push(node),
        }
    }
    out
}

fn plural(key: String, body: String) -> Option<Node> {
    let other = TokenTree::new(vec![Node::Pound, Node::Text(body)]);
    let cases = CaseTable::new(vec![(CaseLabel::Keyword(String::from("other")), other)]).ok()?;
    Some(Node::Placeholder(Placeholder {
        key,
        argument: Argument::Plural(Box::new(PluralSpec {
            kind: PluralKind::Cardinal,
            offset: 0,
            cases,
        })),
    }))
}

fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        4 => literal().prop_map(Node::Text),
        2 => key().prop_map(|key| Node::Placeholder(Placeholder {
            key,
            argument: Argument::Simple,
        })),
        1 => key().prop_map(|key| Node::Tag(Tag {
            key,
            children: TokenTree::default(),
            self_closing: true,
        })),
        1 => (key(), literal()).prop_filter_map("plural needs an other case", |(key, body)| {
            plural(key, body)
        }),
    ]
}

fn node() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone(),
            (key(), prop::collection::vec(inner, 0..4)).prop_map(|(key, children)| {
                Node::Tag(Tag {
                    key,
                    children: TokenTree::new(canonical(children)),
                    self_closing: false,
                })
            }),
        ]
    })
}

fn tree() -> impl Strategy<Value = TokenTree> {
    prop::collection::vec(node(), 0..6).prop_map(|nodes| TokenTree::new(canonical(nodes)))
}

proptest! {
    #[test]
    fn display_reparses_to_the_same_tree(tree in tree()) {
        let rendered = tree.to_string();
        let reparsed = parse(&rendered)
            .map_err(|err| TestCaseError::fail(format!("{rendered:?}: {err}")))?;
        prop_assert_eq!(&reparsed, &tree, "canonical form {:?}", rendered);
        prop_assert_eq!(reparsed.literal_text(), tree.literal_text());
    }

    #[test]
    fn display_is_a_fixed_point(tree in tree()) {
        let once = tree.to_string();
        let reparsed = parse(&once)
            .map_err(|err| TestCaseError::fail(format!("{once:?}: {err}")))?;
        prop_assert_eq!(reparsed.to_string(), once);
    }

    #[test]
    fn binding_is_deterministic(tree in tree(), count in 0_i64..200) {
        let locale = langid!("cs");
        let plurals = CldrPlurals::new(locale.clone());
        let bindings = Bindings::<()>::new().with_value("n", count).with_value("0", "zero");
        let binder = Binder::new(&bindings, FormatHook::new(&locale), &plurals);
        prop_assert_eq!(binder.bind(&tree), binder.bind(&tree));
    }

    #[test]
    fn parsing_arbitrary_input_never_panics(input in "[a-z0-9 {}<>/#',=]{0,40}") {
        let first = parse(&input);
        prop_assert_eq!(first, parse(&input));
    }
}
