//! # telegraph-convert
//!
//! Convert DOM nodes to Telegraph content nodes.
//!
//! Telegraph pages are built from a small vocabulary of tags with at most
//! two attributes. This crate walks an arbitrary DOM-style tree and
//! rewrites it into that vocabulary: six heading levels collapse onto the
//! two Telegraph supports, quote callouts become asides, an image with an
//! italic caption fuses into a figure, tables degrade to preformatted
//! text, and anything without a Telegraph representation unwraps so its
//! content survives.
//!
//! The conversion is best effort by design. Malformed subtrees drop,
//! unwrap, or fall back to a generic path; nothing aborts the traversal.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use telegraph_convert::{Converter, Node};
//!
//! let converter = Converter::new();
//!
//! let mut h1 = Node::element("h1");
//! h1.add_child(Node::text("Hello World"));
//!
//! let nodes = converter.convert(&h1);
//! assert_eq!(nodes[0].as_element().map(|el| el.tag.as_str()), Some("h3"));
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use telegraph_convert::{parse_html, Converter};
//!
//! let converter = Converter::new();
//! let nodes = converter.convert(&parse_html("<p>Hello <em>World</em></p>"));
//! assert_eq!(telegraph_content::to_json(&nodes).unwrap(),
//!     r#"[{"tag":"p","children":["Hello ",{"tag":"em","children":["World"]}]}]"#);
//! ```

pub mod convert;
#[cfg(feature = "html")]
pub mod html;
pub mod node;

pub use convert::{ConvertOptions, Converter};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{Node, NodeKind};

// Re-export the output model so callers need only one crate.
pub use telegraph_content::{AttrMap, ContentNode, NodeElement};
