//! HTML parsing support.
//!
//! Parses HTML strings into the source [`Node`] structure so documents can
//! be converted without a host-provided DOM. The fragment is rooted in a
//! synthetic `html` element, which the converter unwraps naturally.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a [`Node`] tree.
///
/// # Example
///
/// ```rust
/// use telegraph_convert::{parse_html, Converter};
///
/// let converter = Converter::new();
/// let nodes = converter.convert(&parse_html("<h1>Hello</h1>"));
/// assert_eq!(nodes[0].as_element().map(|el| el.tag.as_str()), Some("h3"));
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    element_to_node(document.root_element())
}

fn element_to_node(element: ElementRef) -> Node {
    let mut node = Node::element(element.value().name());
    for (name, value) in element.value().attrs() {
        node.set_attr(name, value);
    }

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => node.add_child(Node::text(&text.text)),
            ScraperNode::Comment(comment) => node.add_child(Node::comment(&comment.comment)),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(element_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}
