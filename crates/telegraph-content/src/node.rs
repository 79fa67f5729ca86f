//! Telegraph content tree nodes.
//!
//! A page is a sequence of [`ContentNode`]s. Text runs are bare strings in
//! the wire form, elements are objects with a `tag` and optional `attrs` and
//! `children`. Both optional fields are omitted entirely when absent, which
//! the serde attributes below reproduce.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute map of an element node.
///
/// Insertion order is preserved so the serialized form lists attributes in
/// the order they were collected from the source element.
pub type AttrMap = IndexMap<String, String>;

/// A single unit of Telegraph page content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    /// An inline text run.
    Text(String),
    /// A tagged element.
    Element(NodeElement),
}

/// An element node in the Telegraph content tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeElement {
    /// Tag name, restricted to the vocabulary in [`crate::tags`].
    pub tag: String,

    /// Element attributes; only `href` and `src` are meaningful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attrs: Option<AttrMap>,

    /// Child nodes; never present as an empty sequence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ContentNode>>,
}

impl NodeElement {
    /// Create a childless element with no attributes.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: None,
            children: None,
        }
    }

    /// Set a single attribute, creating the map on first use.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs
            .get_or_insert_with(AttrMap::new)
            .insert(name.into(), value.into());
    }

    /// Attach a children sequence. An empty sequence leaves `children`
    /// unset so leaf elements serialize without the field.
    pub fn with_children(mut self, children: Vec<ContentNode>) -> Self {
        if !children.is_empty() {
            self.children = Some(children);
        }
        self
    }
}

impl ContentNode {
    /// Create a text node.
    pub fn text(content: impl Into<String>) -> Self {
        ContentNode::Text(content.into())
    }

    /// Check whether this node is a text run.
    pub fn is_text(&self) -> bool {
        matches!(self, ContentNode::Text(_))
    }

    /// View this node as an element, if it is one.
    pub fn as_element(&self) -> Option<&NodeElement> {
        match self {
            ContentNode::Element(el) => Some(el),
            ContentNode::Text(_) => None,
        }
    }
}

impl From<NodeElement> for ContentNode {
    fn from(el: NodeElement) -> Self {
        ContentNode::Element(el)
    }
}
