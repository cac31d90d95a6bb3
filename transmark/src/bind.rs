//! Binds a parsed template to caller values and components.
//!
//! Binding never fails: a placeholder without a value renders as `{key}` and
//! a tag without a component renders its markers as text, so gaps in the
//! supplied bindings stay visible in the output.

use crate::format::FormatHook;
use crate::plural::{PluralCategorizer, resolve_plural, resolve_select};
use crate::syntax::{Argument, Node, Placeholder, Tag, TokenTree};
use crate::value::{Bindings, ComponentBinding, Value};

/// One node of rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNode<C> {
    /// Text; adjacent runs are merged.
    Text(String),
    /// A component emitted as-is.
    Component(C),
    /// A component wrapping rendered children.
    Element {
        /// Wrapper component bound to the tag.
        component: C,
        /// Rendered tag content.
        children: Vec<OutputNode<C>>,
    },
}

impl<C> OutputNode<C> {
    /// Concatenates the text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Component(_) => String::new(),
            Self::Element { children, .. } => text_content(children),
        }
    }
}

/// Concatenates the text of rendered nodes, ignoring bare components.
#[must_use]
pub fn text_content<C>(nodes: &[OutputNode<C>]) -> String {
    nodes.iter().map(OutputNode::text_content).collect()
}

/// Accumulates output, merging adjacent text.
#[derive(Debug)]
struct OutputBuilder<C> {
    nodes: Vec<OutputNode<C>>,
}

impl<C> OutputBuilder<C> {
    const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.nodes.last_mut() {
            Some(OutputNode::Text(previous)) => previous.push_str(text),
            _ => self.nodes.push(OutputNode::Text(text.to_owned())),
        }
    }

    fn node(&mut self, node: OutputNode<C>) {
        match node {
            OutputNode::Text(text) => self.text(&text),
            other => self.nodes.push(other),
        }
    }

    fn finish(self) -> Vec<OutputNode<C>> {
        self.nodes
    }
}

/// Walks a [`TokenTree`] left to right, depth first, substituting bindings.
pub struct Binder<'a, C> {
    bindings: &'a Bindings<C>,
    hook: FormatHook<'a>,
    plurals: &'a dyn PluralCategorizer,
}

impl<'a, C: Clone> Binder<'a, C> {
    /// Creates a binder for one render call.
    #[must_use]
    pub const fn new(
        bindings: &'a Bindings<C>,
        hook: FormatHook<'a>,
        plurals: &'a dyn PluralCategorizer,
    ) -> Self {
        Self {
            bindings,
            hook,
            plurals,
        }
    }

    /// Produces the output sequence for `tree`.
    #[must_use]
    pub fn bind(&self, tree: &TokenTree) -> Vec<OutputNode<C>> {
        let mut out = OutputBuilder::new();
        self.bind_into(tree, None, &mut out);
        out.finish()
    }

    fn bind_into(&self, tree: &TokenTree, pound: Option<&str>, out: &mut OutputBuilder<C>) {
        for node in tree {
            match node {
                Node::Text(text) => out.text(text),
                Node::Pound => out.text(pound.unwrap_or("#")),
                Node::Placeholder(placeholder) => self.placeholder(placeholder, pound, out),
                Node::Tag(tag) => self.tag(tag, pound, out),
            }
        }
    }

    fn placeholder(
        &self,
        placeholder: &Placeholder,
        pound: Option<&str>,
        out: &mut OutputBuilder<C>,
    ) {
        let key = placeholder.key.as_str();
        let Some(value) = self.bindings.value(key) else {
            tracing::debug!(key, "no value bound to placeholder");
            out.text(&format!("{{{key}}}"));
            return;
        };

        match &placeholder.argument {
            Argument::Simple => emit_value(value, out, Value::to_text),
            Argument::Format { kind, style } => emit_value(value, out, |scalar| {
                self.hook.format(scalar, kind, style.as_deref())
            }),
            Argument::Plural(spec) => {
                let Some(number) = value.as_number() else {
                    tracing::debug!(key, "non-numeric plural value selects 'other'");
                    let raw = value.to_text().unwrap_or_default();
                    self.bind_into(spec.cases.other(), Some(&raw), out);
                    return;
                };
                let (case, adjusted) = resolve_plural(spec, number, self.plurals);
                let formatted = self.hook.default_number(adjusted);
                self.bind_into(case, Some(&formatted), out);
            }
            Argument::Select(table) => {
                let label = value.to_text().unwrap_or_default();
                self.bind_into(resolve_select(table, &label), pound, out);
            }
        }
    }

    fn tag(&self, tag: &Tag, pound: Option<&str>, out: &mut OutputBuilder<C>) {
        match self.bindings.component(&tag.key) {
            Some(ComponentBinding::One(component)) => {
                let mut children = OutputBuilder::new();
                self.bind_into(&tag.children, pound, &mut children);
                out.node(OutputNode::Element {
                    component: component.clone(),
                    children: children.finish(),
                });
            }
            Some(ComponentBinding::Many(components)) => {
                for component in components {
                    out.node(OutputNode::Component(component.clone()));
                }
            }
            None if tag.self_closing && tag.children.is_empty() => {
                out.text(&format!("<{}/>", tag.key));
            }
            None => {
                tracing::debug!(key = tag.key.as_str(), "no component bound to tag");
                out.text(&format!("<{}>", tag.key));
                self.bind_into(&tag.children, pound, out);
                out.text(&format!("</{}>", tag.key));
            }
        }
    }
}

fn emit_value<C: Clone>(
    value: &Value<C>,
    out: &mut OutputBuilder<C>,
    render: impl FnOnce(&Value<C>) -> Option<String>,
) {
    if value.is_blank() {
        return;
    }
    match value {
        Value::Component(component) => out.node(OutputNode::Component(component.clone())),
        Value::Components(components) => {
            for component in components {
                out.node(OutputNode::Component(component.clone()));
            }
        }
        scalar => {
            if let Some(text) = render(scalar) {
                out.text(&text);
            }
        }
    }
}
