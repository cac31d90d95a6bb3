//! An HTML element descriptor for use as the rendered component type.
//!
//! ```
//! use transmark_test_helpers::{Html, render_html};
//! use transmark::OutputNode;
//!
//! let nodes = vec![
//!     OutputNode::Text(String::from("Read ")),
//!     OutputNode::Element {
//!         component: Html::new("a").with_attr("href", "/docs"),
//!         children: vec![OutputNode::Text(String::from("the docs"))],
//!     },
//! ];
//! assert_eq!(render_html(&nodes), r#"Read <a href="/docs">the docs</a>"#);
//! ```

use transmark::OutputNode;

/// Tag name plus attributes, rendered by [`render_html`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Html {
    tag: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
}

impl Html {
    /// Creates a descriptor for `tag` with no attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            text: None,
        }
    }

    /// Adds an attribute; attributes render in insertion order.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Sets the content shown when the descriptor renders on its own.
    ///
    /// Ignored when the descriptor wraps a translated tag body.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    fn close(&self, out: &mut String) {
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    fn open(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }
    }
}

impl From<&str> for Html {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Serialises rendered output as HTML markup.
///
/// Text is escaped. Standalone components render their own text, or
/// self-closed when they have none.
#[must_use]
pub fn render_html(nodes: &[OutputNode<Html>]) -> String {
    let mut out = String::new();
    write_nodes(nodes, &mut out);
    out
}

fn write_nodes(nodes: &[OutputNode<Html>], out: &mut String) {
    for node in nodes {
        match node {
            OutputNode::Text(text) => out.push_str(&escape(text)),
            OutputNode::Component(component) => {
                component.open(out);
                let Some(text) = component.text.as_deref() else {
                    out.push_str("/>");
                    continue;
                };
                out.push('>');
                out.push_str(&escape(text));
                component.close(out);
            }
            OutputNode::Element {
                component,
                children,
            } => {
                component.open(out);
                out.push('>');
                write_nodes(children, out);
                component.close(out);
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_self_close() {
        let nodes = vec![OutputNode::Component(Html::new("br"))];
        assert_eq!(render_html(&nodes), "<br/>");
    }

    #[test]
    fn standalone_components_render_their_text() {
        let nodes = vec![OutputNode::Component(Html::new("strong").with_text("John"))];
        assert_eq!(render_html(&nodes), "<strong>John</strong>");
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let nodes = vec![
            OutputNode::Text(String::from("a < b & c")),
            OutputNode::Element {
                component: Html::new("abbr").with_attr("title", "\"quoted\""),
                children: Vec::new(),
            },
        ];
        assert_eq!(
            render_html(&nodes),
            "a &lt; b &amp; c<abbr title=\"&quot;quoted&quot;\"></abbr>"
        );
    }
}
