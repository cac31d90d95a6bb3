//! Prints rendered output as tag markup.

use transmark::OutputNode;

/// Serialises output whose components are element names.
///
/// Bare components print as `<tag/>`; wrappers print as `<tag>...</tag>`.
#[must_use]
pub fn to_markup(nodes: &[OutputNode<String>]) -> String {
    let mut out = String::new();
    write_nodes(nodes, &mut out);
    out
}

fn write_nodes(nodes: &[OutputNode<String>], out: &mut String) {
    for node in nodes {
        match node {
            OutputNode::Text(text) => out.push_str(text),
            OutputNode::Component(tag) => {
                out.push('<');
                out.push_str(tag);
                out.push_str("/>");
            }
            OutputNode::Element {
                component,
                children,
            } => {
                out.push('<');
                out.push_str(component);
                out.push('>');
                write_nodes(children, out);
                out.push_str("</");
                out.push_str(component);
                out.push('>');
            }
        }
    }
}
