//! Content transformer.
//!
//! Rewrites a parsed fragment into a [`RenderNode`] tree. Traversal is
//! depth-first, pre-order; each element dispatches on its tag name:
//!
//! | Tag | Output |
//! |-----|--------|
//! | `pre` with a `code` child | [`RenderNode::CodeBlock`] with language and text |
//! | `img` | [`RenderNode::Figure`], `alt` as caption when non-empty |
//! | `a` | [`RenderNode::Link`], external unless `href` starts with `/` or `#` |
//! | `h1`-`h6` | [`RenderNode::Heading`] with explicit or slugified id |
//! | `table` | [`RenderNode::Table`] (scroll container) |
//! | `tr` | [`RenderNode::TableRow`] with zero-based sibling index |
//! | anything else | [`RenderNode::Element`], children transformed |
//!
//! The transform never fails and never escapes text; escaping is the
//! sanitizer's job on the way in and the render backend's on the way out.
//! Heading ids are not deduplicated.

use crate::node::{Attributes, ParsedElement, ParsedNode, RenderElement, RenderNode};
use crate::util::{heading_level, slugify};

/// Language used when a code block declares none.
pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// Class prefix marking a code block language.
const LANGUAGE_CLASS_PREFIX: &str = "language-";

/// Attribute the source may carry for row striping; superseded by the
/// computed index.
const ROW_INDEX_ATTR: &str = "data-index";

/// Transform a sequence of sibling nodes, preserving their order.
///
/// # Examples
///
/// ```
/// use quill_content::{RenderNode, parse_fragment, transform};
///
/// let nodes = transform(&parse_fragment(
///     r#"<pre><code class="language-python">print(1)</code></pre>"#,
/// ));
/// assert_eq!(
///     nodes,
///     vec![RenderNode::CodeBlock {
///         language: "python".to_owned(),
///         code: "print(1)".to_owned(),
///     }]
/// );
/// ```
#[must_use]
pub fn transform(nodes: &[ParsedNode]) -> Vec<RenderNode> {
    let mut row_index = 0;
    nodes
        .iter()
        .map(|node| match node {
            ParsedNode::Element(element) if element.is("tr") => {
                let row = transform_row(element, row_index);
                row_index += 1;
                row
            }
            _ => transform_node(node),
        })
        .collect()
}

/// Transform a single node.
///
/// A `tr` transformed on its own has no siblings and gets index 0; use
/// [`transform`] on the parent's children to number rows.
#[must_use]
pub fn transform_node(node: &ParsedNode) -> RenderNode {
    match node {
        ParsedNode::Text(text) => RenderNode::text(text.as_str()),
        ParsedNode::Element(element) => transform_element(element),
    }
}

fn transform_element(element: &ParsedElement) -> RenderNode {
    let tag = element.tag.to_ascii_lowercase();
    match tag.as_str() {
        "pre" => code_block(element).unwrap_or_else(|| pass_through(element)),
        "img" => figure(element),
        "a" => link(element),
        "table" => RenderNode::Table {
            attrs: element.attrs.clone(),
            children: transform(&element.children),
        },
        "tr" => transform_row(element, 0),
        _ => match heading_level(&tag) {
            Some(level) => heading(element, level),
            None => pass_through(element),
        },
    }
}

/// Unrecognised or styling-only element: copy it, transform its children.
fn pass_through(element: &ParsedElement) -> RenderNode {
    RenderNode::Element(RenderElement {
        tag: element.tag.clone(),
        attrs: element.attrs.clone(),
        children: transform(&element.children),
    })
}

fn code_block(pre: &ParsedElement) -> Option<RenderNode> {
    let code = pre
        .children
        .iter()
        .filter_map(ParsedNode::as_element)
        .find(|child| child.is("code"))?;

    let language = code_language(code.attrs.get("class"));
    tracing::trace!(%language, "Extracted code block");

    Some(RenderNode::CodeBlock {
        language,
        code: code.text_content(),
    })
}

/// Language identifier from a `code` element's class list.
///
/// Prefers a `language-*` class; falls back to the first class, then to
/// [`DEFAULT_CODE_LANGUAGE`].
fn code_language(class: Option<&str>) -> String {
    let mut classes = class.unwrap_or_default().split_whitespace();
    let first = classes.clone().next();

    classes
        .find_map(|c| c.strip_prefix(LANGUAGE_CLASS_PREFIX))
        .filter(|lang| !lang.is_empty())
        .or(first.filter(|c| *c != LANGUAGE_CLASS_PREFIX))
        .unwrap_or(DEFAULT_CODE_LANGUAGE)
        .to_owned()
}

fn figure(img: &ParsedElement) -> RenderNode {
    let caption = img
        .attrs
        .get("alt")
        .filter(|alt| !alt.is_empty())
        .map(str::to_owned);

    let mut image = img.attrs.clone();
    if image.get("alt").is_none() {
        image.insert("alt", "");
    }

    RenderNode::Figure { image, caption }
}

fn link(anchor: &ParsedElement) -> RenderNode {
    RenderNode::Link {
        attrs: anchor.attrs.clone(),
        external: anchor.attrs.get("href").is_some_and(is_external_href),
        children: transform(&anchor.children),
    }
}

/// Whether a link leaves the site.
///
/// Anything that is not a site-root path or a fragment is external. An empty
/// `href` points at the current page.
fn is_external_href(href: &str) -> bool {
    !href.is_empty() && !href.starts_with('/') && !href.starts_with('#')
}

fn heading(element: &ParsedElement, level: u8) -> RenderNode {
    let id = match element.attrs.get("id") {
        Some(id) if !id.is_empty() => id.to_owned(),
        _ => slugify(&element.text_content()),
    };

    RenderNode::Heading {
        level,
        id,
        attrs: element.attrs.clone(),
        children: transform(&element.children),
    }
}

fn transform_row(row: &ParsedElement, index: usize) -> RenderNode {
    let mut attrs: Attributes = row.attrs.clone();
    attrs.remove(ROW_INDEX_ATTR);

    RenderNode::TableRow {
        index,
        attrs,
        children: transform(&row.children),
    }
}
