//! Recursive conversion from DOM nodes to Telegraph content nodes.
//!
//! The walk is depth first and best effort: every shape the target format
//! cannot express degrades — elements without a Telegraph tag unwrap so
//! their content survives, tables flatten to preformatted text, malformed
//! callouts fall back to plain unwrapping. Nothing here returns an error.

use indexmap::IndexMap;
use telegraph_content::{tags, AttrMap, ContentNode, NodeElement};

use crate::node::{Node, NodeKind};

/// Options for the converter.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Base URL used to absolutize relative image sources. When unset,
    /// sources pass through as written.
    pub base_url: Option<String>,
}

/// Traversal context threaded through the recursion.
///
/// Overridden copies are created at call sites: list items and callout
/// bodies force `unwrap_block`, caption and aside subtrees clear the
/// parent tag.
#[derive(Debug, Clone, Copy, Default)]
struct Context<'a> {
    /// When set, block-level elements unwrap instead of emitting.
    unwrap_block: bool,
    /// Original (pre-remap) tag of the enclosing element.
    parent_tag: Option<&'a str>,
}

/// Converts source DOM trees into Telegraph content sequences.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Get the current options.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a single source node into zero or more content nodes.
    ///
    /// One source node can fan out (unwrapping, callout rewrite, figure
    /// fusion) or vanish (whitespace, comments, frontmatter), so the
    /// result is a sequence rather than a single node.
    pub fn convert(&self, node: &Node) -> Vec<ContentNode> {
        self.convert_node(node, Context::default())
    }

    fn convert_node(&self, node: &Node, ctx: Context<'_>) -> Vec<ContentNode> {
        match node.kind() {
            NodeKind::Text => self.convert_text(node, ctx),
            NodeKind::Element => self.convert_element(node, ctx),
            NodeKind::Comment => Vec::new(),
        }
    }

    fn convert_text(&self, node: &Node, ctx: Context<'_>) -> Vec<ContentNode> {
        let text = node.value().unwrap_or_default();
        if text.trim().is_empty() {
            return Vec::new();
        }
        // Text directly under a demoted h4/h5 heading keeps its weight
        // as a bold run; the heading itself became a paragraph.
        if matches!(ctx.parent_tag, Some("h4" | "h5")) {
            let strong =
                NodeElement::new("strong").with_children(vec![ContentNode::text(text)]);
            return vec![ContentNode::Element(strong)];
        }
        vec![ContentNode::text(trim_line_breaks(text))]
    }

    fn convert_element(&self, el: &Node, ctx: Context<'_>) -> Vec<ContentNode> {
        if let Some(nodes) = self.convert_quote_callout(el, ctx) {
            return nodes;
        }
        // Metadata blocks have no place in the output.
        if el.has_class("frontmatter") || el.has_class("frontmatter-container") {
            return Vec::new();
        }
        if let Some(nodes) = self.convert_figure(el) {
            return nodes;
        }
        self.convert_generic(el, ctx)
    }

    /// Rewrite a quote callout into an `aside`.
    ///
    /// The note tool renders `> [!quote]` as
    /// `<div class="callout" data-callout="quote">` with the body inside a
    /// `callout-content` wrapper. The wrapper's children convert with
    /// `unwrap_block` forced so paragraphs flatten into the aside instead
    /// of nesting. A callout without the wrapper unwraps in place rather
    /// than dropping its content.
    fn convert_quote_callout(&self, el: &Node, ctx: Context<'_>) -> Option<Vec<ContentNode>> {
        if el.tag_name() != "div"
            || !el.has_class("callout")
            || el.attr("data-callout") != Some("quote")
        {
            return None;
        }

        let Some(content) = el
            .element_children()
            .find(|child| child.has_class("callout-content"))
        else {
            return Some(self.unwrap_children(
                el,
                Context {
                    unwrap_block: true,
                    parent_tag: ctx.parent_tag,
                },
            ));
        };

        let mut children = Vec::new();
        for child in content.children() {
            children.extend(self.convert_node(
                child,
                Context {
                    unwrap_block: true,
                    parent_tag: None,
                },
            ));
        }
        let aside = NodeElement::new("aside").with_children(children);
        Some(vec![ContentNode::Element(aside)])
    }

    /// Fuse an image and an italic caption inside one paragraph into a
    /// `figure`/`figcaption` pair.
    ///
    /// Applies only when the paragraph holds exactly one `img` and exactly
    /// one `em` and nothing else meaningful. An empty caption abandons the
    /// rewrite so the paragraph keeps its normal rendering.
    fn convert_figure(&self, el: &Node) -> Option<Vec<ContentNode>> {
        if el.tag_name() != "p" {
            return None;
        }

        let mut img = None;
        let mut em = None;
        for child in el.element_children() {
            match child.tag_name() {
                "img" => {
                    if img.replace(child).is_some() {
                        return None;
                    }
                }
                "em" => {
                    if em.replace(child).is_some() {
                        return None;
                    }
                }
                _ => {}
            }
        }
        let (img, em) = (img?, em?);

        if el.children().any(is_meaningful_figure_sibling) {
            return None;
        }

        let mut caption = Vec::new();
        for child in em.children() {
            caption.extend(self.convert_node(
                child,
                Context {
                    unwrap_block: true,
                    parent_tag: None,
                },
            ));
        }
        if caption.is_empty() {
            return None;
        }

        let mut children = Vec::new();
        if let Some(image) = self.image_node(img) {
            children.push(ContentNode::Element(image));
        }
        children.push(ContentNode::Element(
            NodeElement::new("figcaption").with_children(caption),
        ));
        let figure = NodeElement::new("figure").with_children(children);
        Some(vec![ContentNode::Element(figure)])
    }

    fn convert_generic(&self, el: &Node, ctx: Context<'_>) -> Vec<ContentNode> {
        let original_tag = el.tag_name();

        let Some(mut element) = self.element_node(el) else {
            // No Telegraph representation; promote the subtree so inline
            // and text content is not lost.
            return self.unwrap_children(el, ctx);
        };
        if ctx.unwrap_block && !tags::is_inline_tag(&element.tag) {
            return self.unwrap_children(el, ctx);
        }

        let mut unwrap_block = ctx.unwrap_block;
        let output_tag = element.tag.clone();
        match output_tag.as_str() {
            // Telegraph lists cannot nest block structure.
            "li" => unwrap_block = true,
            "pre" => {
                let code = el
                    .element_children()
                    .next()
                    .map(Node::text_content)
                    .unwrap_or_else(|| el.text_content());
                return vec![ContentNode::Element(
                    element.with_children(text_child(&code)),
                )];
            }
            "table" => {
                // Not representable structurally; degrade to preformatted
                // text instead of dropping.
                element.tag = "pre".to_string();
                return vec![ContentNode::Element(
                    element.with_children(text_child(&table_text(el))),
                )];
            }
            // A line break inside a list item would start a new item.
            "br" if ctx.parent_tag == Some("li") => return Vec::new(),
            _ => {}
        }

        let mut children = Vec::new();
        for child in el.children() {
            children.extend(self.convert_node(
                child,
                Context {
                    unwrap_block,
                    parent_tag: Some(original_tag),
                },
            ));
        }
        let children = fixup_children(original_tag, children);
        vec![ContentNode::Element(element.with_children(children))]
    }

    fn unwrap_children(&self, el: &Node, ctx: Context<'_>) -> Vec<ContentNode> {
        let mut nodes = Vec::new();
        for child in el.children() {
            nodes.extend(self.convert_node(child, ctx));
        }
        nodes
    }

    /// Build the output element for a source element, or `None` when the
    /// remapped tag has no Telegraph representation.
    fn element_node(&self, el: &Node) -> Option<NodeElement> {
        let tag = tags::remap_tag(el.tag_name());
        if !tags::is_available_tag(tag) {
            return None;
        }

        let mut node = NodeElement::new(tag);
        let attrs: AttrMap = el
            .attributes()
            .filter(|&(name, _)| tags::is_available_attr(name))
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        if !attrs.is_empty() {
            node.attrs = Some(attrs);
        }

        // Every emitted <img> carries a usable src: the resolved source
        // replaces whatever survived the generic filter.
        if node.tag == "img" {
            if let Some(src) = el.attr("src").filter(|s| !s.is_empty()) {
                node.attrs
                    .get_or_insert_with(IndexMap::new)
                    .insert("src".to_string(), self.resolve_src(src));
            }
        }

        Some(node)
    }

    /// Build a standalone `img` node for the figure rewrite. Returns
    /// `None` when the image has no usable source.
    fn image_node(&self, el: &Node) -> Option<NodeElement> {
        let src = el.attr("src").filter(|s| !s.is_empty())?;
        let mut node = NodeElement::new("img");
        node.set_attr("src", self.resolve_src(src));
        Some(node)
    }

    /// Absolutize an image source against the configured base URL.
    fn resolve_src(&self, src: &str) -> String {
        if src.contains("://") || src.starts_with("data:") {
            return src.to_string();
        }
        match &self.options.base_url {
            Some(base) => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                src.trim_start_matches('/')
            ),
            None => src.to_string(),
        }
    }
}

/// Post-recursion adjustments keyed on the original tag, applied to the
/// children sequence before it is attached.
fn fixup_children(original_tag: &str, mut children: Vec<ContentNode>) -> Vec<ContentNode> {
    match original_tag {
        // Demoted headings keep their weight: bare string children wrap
        // in strong. Text directly under h4/h5 was already wrapped during
        // descent; this also catches strings surfaced by unwrapping.
        "h4" | "h5" | "h6" => {
            for child in &mut children {
                if let ContentNode::Text(text) = child {
                    let text = std::mem::take(text);
                    *child = ContentNode::Element(
                        NodeElement::new("strong").with_children(vec![ContentNode::Text(text)]),
                    );
                }
            }
        }
        // Keep multi-line list-item text visually separated: consecutive
        // string children get a newline stitched onto the first.
        "li" => {
            for i in 0..children.len() {
                if !matches!(children.get(i + 1), Some(ContentNode::Text(_))) {
                    continue;
                }
                if let Some(ContentNode::Text(text)) = children.get_mut(i) {
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                }
            }
        }
        _ => {}
    }
    children
}

/// Meaningful siblings block the figure rewrite: non-whitespace text, any
/// element other than `img`/`br`/`em`, and any non-text non-element node.
fn is_meaningful_figure_sibling(node: &Node) -> bool {
    match node.kind() {
        NodeKind::Text => !node.text_content().trim().is_empty(),
        NodeKind::Element => !matches!(node.tag_name(), "img" | "br" | "em"),
        NodeKind::Comment => true,
    }
}

/// Strip leading and trailing newline runs, leaving inner whitespace alone.
fn trim_line_breaks(s: &str) -> &str {
    s.trim_matches('\n')
}

/// Wrap trimmed text as a single-string children sequence; blank text
/// yields no children at all.
fn text_child(text: &str) -> Vec<ContentNode> {
    let text = text.trim();
    if text.is_empty() {
        Vec::new()
    } else {
        vec![ContentNode::text(text)]
    }
}

/// Approximate a table's rendered text: cells joined by tabs, rows by
/// newlines. Falls back to raw text content for tables without rows.
fn table_text(el: &Node) -> String {
    let mut rows = Vec::new();
    collect_rows(el, &mut rows);
    if rows.is_empty() {
        el.text_content()
    } else {
        rows.join("\n")
    }
}

fn collect_rows(el: &Node, rows: &mut Vec<String>) {
    for child in el.element_children() {
        match child.tag_name() {
            "tr" => {
                let cells: Vec<String> = child
                    .element_children()
                    .filter(|c| matches!(c.tag_name(), "td" | "th"))
                    .map(Node::text_content)
                    .collect();
                rows.push(cells.join("\t"));
            }
            "thead" | "tbody" | "tfoot" => collect_rows(child, rows),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(node: &Node) -> Vec<ContentNode> {
        Converter::new().convert(node)
    }

    fn element(node: &ContentNode) -> &NodeElement {
        node.as_element().expect("expected an element node")
    }

    #[test]
    fn test_whitespace_text_produces_nothing() {
        assert!(convert(&Node::text("   \n\t ")).is_empty());
    }

    #[test]
    fn test_text_trims_line_breaks_only() {
        let nodes = convert(&Node::text("\n\nhello world \n"));
        assert_eq!(nodes, vec![ContentNode::text("hello world ")]);
    }

    #[test]
    fn test_comment_is_dropped() {
        assert!(convert(&Node::comment("ignored")).is_empty());
    }

    #[test]
    fn test_paragraph_passes_through() {
        let mut p = Node::element("p");
        p.add_child(Node::text("Hello"));

        let nodes = convert(&p);
        assert_eq!(nodes.len(), 1);
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "p");
        assert_eq!(el.children, Some(vec![ContentNode::text("Hello")]));
        assert_eq!(el.attrs, None);
    }

    #[test]
    fn test_heading_remap() {
        for (source, target) in [("h1", "h3"), ("h2", "h3"), ("h3", "h4")] {
            let mut heading = Node::element(source);
            heading.add_child(Node::text("Title"));
            let nodes = convert(&heading);
            let el = element(&nodes[0]);
            assert_eq!(el.tag, target);
            assert_eq!(el.children, Some(vec![ContentNode::text("Title")]));
        }
    }

    #[test]
    fn test_demoted_heading_bolds_text() {
        for source in ["h4", "h5", "h6"] {
            let mut heading = Node::element(source);
            heading.add_child(Node::text("Note"));

            let nodes = convert(&heading);
            let el = element(&nodes[0]);
            assert_eq!(el.tag, "p");
            let children = el.children.as_ref().expect("children");
            let strong = element(&children[0]);
            assert_eq!(strong.tag, "strong");
            assert_eq!(strong.children, Some(vec![ContentNode::text("Note")]));
        }
    }

    #[test]
    fn test_unknown_tag_unwraps() {
        let mut span = Node::element("span");
        span.add_child(Node::text("text"));

        assert_eq!(convert(&span), vec![ContentNode::text("text")]);
    }

    #[test]
    fn test_attribute_filtering() {
        let a = Node::element_with_attrs(
            "a",
            &[
                ("href", "https://example.com"),
                ("class", "external-link"),
                ("target", "_blank"),
            ],
        );
        let nodes = convert(&a);
        let el = element(&nodes[0]);
        let attrs = el.attrs.as_ref().expect("attrs");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("href").map(String::as_str), Some("https://example.com"));
    }

    #[test]
    fn test_frontmatter_is_dropped() {
        let mut div = Node::element_with_attrs("div", &[("class", "frontmatter")]);
        div.add_child(Node::text("title: secret"));
        assert!(convert(&div).is_empty());

        let container = Node::element_with_attrs("div", &[("class", "frontmatter-container")]);
        assert!(convert(&container).is_empty());
    }

    #[test]
    fn test_br_suppressed_in_list_item() {
        let mut li = Node::element("li");
        li.add_child(Node::text("Line1"));
        li.add_child(Node::element("br"));
        li.add_child(Node::text("Line2"));

        let nodes = convert(&li);
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "li");
        assert_eq!(
            el.children,
            Some(vec![ContentNode::text("Line1\n"), ContentNode::text("Line2")])
        );
    }

    #[test]
    fn test_block_children_unwrap_inside_list_item() {
        let mut p = Node::element("p");
        p.add_child(Node::text("nested"));
        let mut li = Node::element("li");
        li.add_child(p);

        let nodes = convert(&li);
        let el = element(&nodes[0]);
        assert_eq!(el.children, Some(vec![ContentNode::text("nested")]));
    }

    #[test]
    fn test_pre_takes_code_text_verbatim() {
        let mut code = Node::element("code");
        code.add_child(Node::text("fn main() {\n    println!(\"hi\");\n}\n"));
        let mut pre = Node::element("pre");
        pre.add_child(code);

        let nodes = convert(&pre);
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "pre");
        assert_eq!(
            el.children,
            Some(vec![ContentNode::text("fn main() {\n    println!(\"hi\");\n}")])
        );
    }

    #[test]
    fn test_pre_without_element_child_uses_own_text() {
        let mut pre = Node::element("pre");
        pre.add_child(Node::text("plain code\n"));

        let nodes = convert(&pre);
        let el = element(&nodes[0]);
        assert_eq!(el.children, Some(vec![ContentNode::text("plain code")]));
    }

    #[test]
    fn test_table_degrades_to_pre() {
        let mut tr = Node::element("tr");
        let mut td_a = Node::element("td");
        td_a.add_child(Node::text("A"));
        let mut td_b = Node::element("td");
        td_b.add_child(Node::text("B"));
        tr.add_child(td_a);
        tr.add_child(td_b);
        let mut table = Node::element("table");
        table.add_child(tr);

        let nodes = convert(&table);
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "pre");
        assert_eq!(el.children, Some(vec![ContentNode::text("A\tB")]));
    }

    #[test]
    fn test_img_src_kept_and_other_attrs_dropped() {
        let img = Node::element_with_attrs("img", &[("src", "https://host/a.png"), ("alt", "x")]);
        let nodes = convert(&img);
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "img");
        let attrs = el.attrs.as_ref().expect("attrs");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("src").map(String::as_str), Some("https://host/a.png"));
        assert_eq!(el.children, None);
    }

    #[test]
    fn test_relative_img_src_resolves_against_base_url() {
        let converter = Converter::with_options(ConvertOptions {
            base_url: Some("https://vault.example.com/".to_string()),
        });
        let img = Node::element_with_attrs("img", &[("src", "/attachments/a.png")]);
        let nodes = converter.convert(&img);
        let attrs = element(&nodes[0]).attrs.as_ref().expect("attrs");
        assert_eq!(
            attrs.get("src").map(String::as_str),
            Some("https://vault.example.com/attachments/a.png")
        );
    }

    #[test]
    fn test_absolute_and_data_srcs_pass_through() {
        let converter = Converter::with_options(ConvertOptions {
            base_url: Some("https://vault.example.com".to_string()),
        });
        for src in ["https://other/a.png", "data:image/png;base64,AAAA"] {
            let img = Node::element_with_attrs("img", &[("src", src)]);
            let nodes = converter.convert(&img);
            let attrs = element(&nodes[0]).attrs.as_ref().expect("attrs");
            assert_eq!(attrs.get("src").map(String::as_str), Some(src));
        }
    }

    fn quote_callout(with_wrapper: bool) -> Node {
        let mut p = Node::element("p");
        p.add_child(Node::text("Hi"));

        let mut callout = Node::element_with_attrs(
            "div",
            &[("class", "callout"), ("data-callout", "quote")],
        );
        if with_wrapper {
            let mut content = Node::element_with_attrs("div", &[("class", "callout-content")]);
            content.add_child(p);
            callout.add_child(content);
        } else {
            callout.add_child(p);
        }
        callout
    }

    #[test]
    fn test_quote_callout_becomes_aside() {
        let nodes = convert(&quote_callout(true));
        assert_eq!(nodes.len(), 1);
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "aside");
        assert_eq!(el.children, Some(vec![ContentNode::text("Hi")]));
    }

    #[test]
    fn test_callout_without_wrapper_unwraps() {
        let nodes = convert(&quote_callout(false));
        assert_eq!(nodes, vec![ContentNode::text("Hi")]);
    }

    #[test]
    fn test_non_quote_callout_takes_generic_path() {
        let mut callout = Node::element_with_attrs(
            "div",
            &[("class", "callout"), ("data-callout", "warning")],
        );
        let mut p = Node::element("p");
        p.add_child(Node::text("careful"));
        callout.add_child(p);

        // div has no representation, so it unwraps to the paragraph
        let nodes = convert(&callout);
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "p");
    }

    fn captioned_paragraph(caption: &str) -> Node {
        let mut em = Node::element("em");
        if !caption.is_empty() {
            em.add_child(Node::text(caption));
        }
        let mut p = Node::element("p");
        p.add_child(Node::element_with_attrs("img", &[("src", "a.png")]));
        p.add_child(Node::text("\n"));
        p.add_child(em);
        p
    }

    #[test]
    fn test_figure_fusion() {
        let nodes = convert(&captioned_paragraph("caption"));
        assert_eq!(nodes.len(), 1);
        let figure = element(&nodes[0]);
        assert_eq!(figure.tag, "figure");

        let children = figure.children.as_ref().expect("children");
        assert_eq!(children.len(), 2);
        let img = element(&children[0]);
        assert_eq!(img.tag, "img");
        assert_eq!(
            img.attrs.as_ref().and_then(|a| a.get("src")).map(String::as_str),
            Some("a.png")
        );
        let figcaption = element(&children[1]);
        assert_eq!(figcaption.tag, "figcaption");
        assert_eq!(figcaption.children, Some(vec![ContentNode::text("caption")]));
    }

    #[test]
    fn test_figure_abandoned_when_caption_empty() {
        let nodes = convert(&captioned_paragraph(""));
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "p");
    }

    #[test]
    fn test_figure_abandoned_when_paragraph_has_other_content() {
        let mut p = captioned_paragraph("caption");
        p.add_child(Node::text("trailing prose"));

        let nodes = convert(&p);
        assert_eq!(element(&nodes[0]).tag, "p");
    }

    #[test]
    fn test_figure_without_img_src_keeps_caption_only() {
        let mut em = Node::element("em");
        em.add_child(Node::text("caption"));
        let mut p = Node::element("p");
        p.add_child(Node::element("img"));
        p.add_child(em);

        let nodes = convert(&p);
        let figure = element(&nodes[0]);
        assert_eq!(figure.tag, "figure");
        let children = figure.children.as_ref().expect("children");
        assert_eq!(children.len(), 1);
        assert_eq!(element(&children[0]).tag, "figcaption");
    }

    #[test]
    fn test_list_newline_stitching() {
        let mut li = Node::element("li");
        li.add_child(Node::text("first"));
        li.add_child(Node::text("second\n"));
        li.add_child(Node::text("third"));

        let nodes = convert(&li);
        let el = element(&nodes[0]);
        assert_eq!(
            el.children,
            Some(vec![
                ContentNode::text("first\n"),
                ContentNode::text("second\n"),
                ContentNode::text("third"),
            ])
        );
    }

    #[test]
    fn test_childless_element_has_no_children_field() {
        let nodes = convert(&Node::element("hr"));
        let el = element(&nodes[0]);
        assert_eq!(el.tag, "hr");
        assert_eq!(el.children, None);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let mut ul = Node::element("ul");
        let mut li = Node::element("li");
        li.add_child(Node::text("item"));
        ul.add_child(li);

        assert_eq!(convert(&ul), convert(&ul));
    }
}
