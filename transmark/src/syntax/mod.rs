//! Token trees for message templates.
//!
//! A template mixes literal text, `{placeholder}` markers (optionally with a
//! `number`/`date` format or a `plural`/`select` case table), and paired tag
//! markers such as `<0>...</0>` or `<link>...</link>`. [`parse`] turns the
//! text into a [`TokenTree`]; the tree's [`Display`](fmt::Display)
//! implementation writes it back out in canonical form.

mod cases;
mod parser;

use std::fmt;

pub use cases::{CaseLabel, CaseTable};
pub use parser::parse;

use crate::format::FormatKind;
use crate::plural::PluralKind;

/// Parsed template: an ordered sequence of nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenTree {
    nodes: Vec<Node>,
}

impl TokenTree {
    /// Wraps parsed nodes.
    #[must_use]
    pub const fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Nodes in source order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns true for an empty template.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Concatenates literal text depth-first through tags, skipping
    /// placeholders and their case bodies.
    #[must_use]
    pub fn literal_text(&self) -> String {
        let mut out = String::new();
        collect_literals(&self.nodes, &mut out);
        out
    }
}

impl<'a> IntoIterator for &'a TokenTree {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

fn collect_literals(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Tag(tag) => collect_literals(&tag.children.nodes, out),
            Node::Placeholder(_) | Node::Pound => {}
        }
    }
}

/// One element of a [`TokenTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, already unescaped.
    Text(String),
    /// A `{key ...}` marker.
    Placeholder(Placeholder),
    /// A `<key>...</key>` or `<key/>` marker.
    Tag(Tag),
    /// `#` inside a plural case: the offset-adjusted count.
    Pound,
}

/// A `{key}` marker and its argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Binding key.
    pub key: String,
    /// What to do with the bound value.
    pub argument: Argument,
}

/// Argument part of a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// `{key}`: substitute the value.
    Simple,
    /// `{key, type}` or `{key, type, style}`.
    Format {
        /// Placeholder type keyword.
        kind: FormatKind,
        /// Optional style name.
        style: Option<String>,
    },
    /// `{key, plural, ...}` or `{key, selectordinal, ...}`.
    Plural(Box<PluralSpec>),
    /// `{key, select, ...}`.
    Select(Box<CaseTable>),
}

/// Case table selected by plural category.
#[derive(Debug, Clone, PartialEq)]
pub struct PluralSpec {
    /// Cardinal (`plural`) or ordinal (`selectordinal`) rules.
    pub kind: PluralKind,
    /// Subtracted from the value before matching.
    pub offset: i64,
    /// Case sub-templates.
    pub cases: CaseTable,
}

/// A tag marker and its content.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Component key.
    pub key: String,
    /// Content between the opening and closing markers.
    pub children: TokenTree,
    /// Written as `<key/>`.
    pub self_closing: bool,
}

impl fmt::Display for TokenTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes, false)
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node], in_plural: bool) -> fmt::Result {
    for node in nodes {
        match node {
            Node::Text(text) => write_text(f, text, in_plural)?,
            Node::Pound => f.write_str("#")?,
            Node::Tag(tag) if tag.self_closing && tag.children.is_empty() => {
                write!(f, "<{}/>", tag.key)?;
            }
            Node::Tag(tag) => {
                write!(f, "<{}>", tag.key)?;
                write_nodes(f, &tag.children.nodes, in_plural)?;
                write!(f, "</{}>", tag.key)?;
            }
            Node::Placeholder(placeholder) => write_placeholder(f, placeholder, in_plural)?,
        }
    }
    Ok(())
}

fn write_text(f: &mut fmt::Formatter<'_>, text: &str, in_plural: bool) -> fmt::Result {
    // Runs of syntax characters share one quoted span; apostrophes inside a
    // span are doubled like everywhere else.
    let mut quoted = false;
    for ch in text.chars() {
        let special = matches!(ch, '{' | '}' | '<') || (in_plural && ch == '#');
        if special && !quoted {
            f.write_str("'")?;
            quoted = true;
        } else if !special && ch != '\'' && quoted {
            f.write_str("'")?;
            quoted = false;
        }
        if ch == '\'' {
            f.write_str("''")?;
        } else {
            write!(f, "{ch}")?;
        }
    }
    if quoted {
        f.write_str("'")?;
    }
    Ok(())
}

fn write_placeholder(
    f: &mut fmt::Formatter<'_>,
    placeholder: &Placeholder,
    in_plural: bool,
) -> fmt::Result {
    let key = &placeholder.key;
    match &placeholder.argument {
        Argument::Simple => write!(f, "{{{key}}}"),
        Argument::Format { kind, style: None } => write!(f, "{{{key}, {kind}}}"),
        Argument::Format {
            kind,
            style: Some(style),
        } => write!(f, "{{{key}, {kind}, {style}}}"),
        Argument::Plural(spec) => {
            write!(f, "{{{key}, {},", spec.kind.keyword())?;
            if spec.offset != 0 {
                write!(f, " offset:{}", spec.offset)?;
            }
            write_cases(f, &spec.cases, true)?;
            f.write_str("}")
        }
        Argument::Select(cases) => {
            write!(f, "{{{key}, select,")?;
            write_cases(f, cases, in_plural)?;
            f.write_str("}")
        }
    }
}

fn write_cases(f: &mut fmt::Formatter<'_>, cases: &CaseTable, in_plural: bool) -> fmt::Result {
    for (label, tree) in cases.iter() {
        write!(f, " {label} {{")?;
        write_nodes(f, &tree.nodes, in_plural)?;
        f.write_str("}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
