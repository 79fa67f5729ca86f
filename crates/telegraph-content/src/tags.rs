//! Tag and attribute vocabulary of the Telegraph content format.

/// Tags accepted by the Telegraph API (see <https://telegra.ph/api#NodeElement>).
pub const AVAILABLE_TAGS: &[&str] = &[
    "a", "aside", "b", "blockquote", "br", "code", "em", "figcaption", "figure", "h3", "h4", "hr",
    "i", "iframe", "img", "li", "ol", "p", "pre", "s", "strong", "u", "ul", "video",
    // not part of the API set; kept so tables reach the degrade-to-pre path
    "table",
];

/// Tags that may coexist as siblings inside unwrapped block contexts.
///
/// Anything not listed here counts as block-level for unwrap propagation:
/// once inside a list item or an aside there is nowhere for further block
/// structure to go, so block children collapse into the surrounding flow.
pub const INLINE_TAGS: &[&str] = &[
    "a", "aside", "b", "blockquote", "br", "code", "em", "i", "s", "strong", "u",
];

/// Attributes that survive onto an output element.
pub const AVAILABLE_ATTRS: &[&str] = &["href", "src"];

/// Check whether a tag has a Telegraph representation.
pub fn is_available_tag(tag: &str) -> bool {
    AVAILABLE_TAGS.contains(&tag)
}

/// Check whether a tag is inline in the Telegraph sense.
pub fn is_inline_tag(tag: &str) -> bool {
    INLINE_TAGS.contains(&tag)
}

/// Check whether an attribute is allowed on output elements.
pub fn is_available_attr(name: &str) -> bool {
    AVAILABLE_ATTRS.contains(&name)
}

/// Map a source tag onto the Telegraph vocabulary.
///
/// Telegraph supports only two heading levels, so the six source levels
/// collapse onto them: `h1`/`h2` become `h3`, `h3` becomes `h4`, and
/// `h4`-`h6` demote to paragraphs. The demoted headings keep their visual
/// weight through bolding, applied by the converter after recursion.
pub fn remap_tag(tag: &str) -> &str {
    match tag {
        "h1" | "h2" => "h3",
        "h3" => "h4",
        "h4" | "h5" | "h6" => "p",
        other => other,
    }
}
