//! telegraph-content - Telegraph content node model
//!
//! This crate provides the data structures for Telegraph page content and
//! their JSON wire form. Telegraph represents a page as a flat sequence of
//! nodes, where each node is either a plain string or an element with a tag,
//! optional attributes, and optional children. Only a small vocabulary of
//! tags and two attributes (`href`, `src`) are accepted by the API; the
//! vocabulary tables live in [`tags`].
//!
//! # Example
//!
//! ```rust
//! use telegraph_content::{to_json, ContentNode, NodeElement};
//!
//! let nodes = vec![ContentNode::Element(
//!     NodeElement::new("p").with_children(vec![ContentNode::text("Hello World")]),
//! )];
//!
//! assert_eq!(to_json(&nodes).unwrap(), r#"[{"tag":"p","children":["Hello World"]}]"#);
//! ```

mod node;
pub mod tags;
mod validate;

pub use node::{AttrMap, ContentNode, NodeElement};
pub use validate::{validate, ContentError};

/// Result alias for content operations
pub type Result<T> = std::result::Result<T, ContentError>;

/// Serialize a content sequence to the JSON form expected by the Telegraph API.
pub fn to_json(nodes: &[ContentNode]) -> Result<String> {
    Ok(serde_json::to_string(nodes)?)
}

/// Parse a content sequence back from its JSON form.
pub fn from_json(json: &str) -> Result<Vec<ContentNode>> {
    Ok(serde_json::from_str(json)?)
}
