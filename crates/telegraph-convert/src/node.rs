//! Source DOM node structure.
//!
//! The converter is parser agnostic: any HTML parser (or a host-provided
//! DOM) can produce this structure. It carries exactly the capabilities the
//! conversion needs — tag name, ordered attributes, ordered children, class
//! membership tests, and derived plain-text content.

/// Node kinds the converter distinguishes.
///
/// Anything a parser cannot express as an element or text maps to
/// [`NodeKind::Comment`] and converts to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
}

/// A node in the source document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    /// Lowercase tag name for elements, `#text` / `#comment` otherwise.
    name: String,
    /// Payload for text and comment nodes.
    value: Option<String>,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Node {
    /// Create an element node. The tag name is lowercased on construction.
    pub fn element(tag: &str) -> Self {
        Self {
            kind: NodeKind::Element,
            name: tag.to_lowercase(),
            value: None,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element node with attributes.
    pub fn element_with_attrs(tag: &str, attrs: &[(&str, &str)]) -> Self {
        let mut node = Self::element(tag);
        for (name, value) in attrs {
            node.set_attr(name, value);
        }
        node
    }

    /// Create a text node.
    pub fn text(content: &str) -> Self {
        Self {
            kind: NodeKind::Text,
            name: "#text".to_string(),
            value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a comment node.
    pub fn comment(content: &str) -> Self {
        Self {
            kind: NodeKind::Comment,
            name: "#comment".to_string(),
            value: Some(content.to_string()),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Lowercase tag name (`#text` / `#comment` for non-elements).
    pub fn tag_name(&self) -> &str {
        &self.name
    }

    /// Raw payload of a text or comment node.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Look up an attribute by name, case-insensitively.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Check membership in the `class` attribute.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Iterate over attribute name/value pairs in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Iterate over all child nodes.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    /// Iterate over element children only.
    pub fn element_children(&self) -> impl Iterator<Item = &Node> {
        self.children().filter(|n| n.is_element())
    }

    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Set an attribute, replacing any existing value for the same name.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for (n, v) in &mut self.attributes {
            if n.eq_ignore_ascii_case(name) {
                *v = value.to_string();
                return;
            }
        }
        self.attributes.push((name.to_string(), value.to_string()));
    }

    /// Concatenated text of this node and its descendants.
    ///
    /// Comments contribute nothing, matching what a rendered document
    /// would show.
    pub fn text_content(&self) -> String {
        match self.kind {
            NodeKind::Text => self.value.clone().unwrap_or_default(),
            NodeKind::Comment => String::new(),
            NodeKind::Element => self.children().map(Node::text_content).collect(),
        }
    }
}
