//! Plain-text excerpts for post listings and page descriptions.

use crate::node::RenderNode;

/// Elements whose text runs on with its neighbours; every other element
/// is treated as a block and separated from adjacent text.
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "cite", "code", "data", "del", "dfn", "em", "i", "ins", "kbd",
    "mark", "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "var",
];

/// Excerpt length used for post descriptions.
pub const DEFAULT_EXCERPT_CHARS: usize = 160;

/// Plain-text excerpt of a render tree.
///
/// Collects text in document order (code blocks and figure captions
/// included) with block boundaries acting as whitespace, collapses whitespace
/// runs to single spaces, trims, and keeps at most `max_chars` characters.
///
/// # Examples
///
/// ```
/// use quill_content::{excerpt, parse_fragment, transform};
///
/// let nodes = transform(&parse_fragment("<h1>Title</h1><p>Body   <em>text</em></p>"));
/// assert_eq!(excerpt(&nodes, 160), "Title Body text");
/// assert_eq!(excerpt(&nodes, 5), "Title");
/// ```
#[must_use]
pub fn excerpt(nodes: &[RenderNode], max_chars: usize) -> String {
    let mut raw = String::new();
    collect_text(nodes, &mut raw);

    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

fn collect_text(nodes: &[RenderNode], out: &mut String) {
    for node in nodes {
        match node {
            RenderNode::Text { text } => out.push_str(text),
            RenderNode::CodeBlock { code, .. } => {
                out.push(' ');
                out.push_str(code);
                out.push(' ');
            }
            RenderNode::Figure { caption, .. } => {
                if let Some(caption) = caption {
                    out.push(' ');
                    out.push_str(caption);
                    out.push(' ');
                }
            }
            RenderNode::Link { children, .. } => collect_text(children, out),
            RenderNode::Element(element) if is_inline(&element.tag) => {
                collect_text(&element.children, out);
            }
            _ => {
                out.push(' ');
                collect_text(node.children(), out);
                out.push(' ');
            }
        }
    }
}

fn is_inline(tag: &str) -> bool {
    INLINE_ELEMENTS.iter().any(|inline| tag.eq_ignore_ascii_case(inline))
}
