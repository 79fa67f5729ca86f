//! Post-pass validation of content trees.
//!
//! The converter never fails; it drops, unwraps, or degrades anything it
//! cannot represent. Callers that need strictness instead (for example to
//! reject documents with unsupported constructs before upload) can run
//! [`validate`] over the produced sequence.

use crate::node::{ContentNode, NodeElement};
use crate::tags;

/// Error raised by validation and the JSON helpers.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("tag not supported by Telegraph: {0}")]
    UnsupportedTag(String),

    #[error("attribute `{attr}` not allowed on <{tag}>")]
    UnsupportedAttr { tag: String, attr: String },

    #[error("empty text node")]
    EmptyText,

    #[error("element <{0}> carries an empty children sequence")]
    EmptyChildren(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Check a content sequence against the Telegraph vocabulary.
///
/// Verifies the invariants the converter guarantees: every tag is in the
/// allow-list, attributes are restricted to `href`/`src`, text runs are
/// non-blank, and `children`, when present, is non-empty.
pub fn validate(nodes: &[ContentNode]) -> Result<(), ContentError> {
    for node in nodes {
        match node {
            ContentNode::Text(text) => {
                if text.trim().is_empty() {
                    return Err(ContentError::EmptyText);
                }
            }
            ContentNode::Element(el) => validate_element(el)?,
        }
    }
    Ok(())
}

fn validate_element(el: &NodeElement) -> Result<(), ContentError> {
    if !tags::is_available_tag(&el.tag) {
        return Err(ContentError::UnsupportedTag(el.tag.clone()));
    }
    if let Some(attrs) = &el.attrs {
        for name in attrs.keys() {
            if !tags::is_available_attr(name) {
                return Err(ContentError::UnsupportedAttr {
                    tag: el.tag.clone(),
                    attr: name.clone(),
                });
            }
        }
    }
    if let Some(children) = &el.children {
        if children.is_empty() {
            return Err(ContentError::EmptyChildren(el.tag.clone()));
        }
        validate(children)?;
    }
    Ok(())
}
