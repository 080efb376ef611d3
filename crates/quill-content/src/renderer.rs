//! Generic render-tree walker with pluggable backend.

use std::marker::PhantomData;

use crate::backend::RenderBackend;
use crate::html::{HtmlBackend, write_attrs};
use crate::node::{RenderElement, RenderNode};
use crate::util::escape_html;

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose first newline is dropped by the HTML parser.
const NEWLINE_STRIPPING_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

/// Walks a render tree and serializes it through a [`RenderBackend`].
///
/// Text and pass-through elements are written here, with text and attribute
/// values escaped; every enriched node kind is delegated to the backend.
pub struct TreeRenderer<B: RenderBackend> {
    output: String,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> TreeRenderer<B> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            _backend: PhantomData,
        }
    }

    /// Render `nodes` and return the output.
    #[must_use]
    pub fn render(mut self, nodes: &[RenderNode]) -> String {
        self.render_nodes(nodes);
        self.output
    }

    fn render_nodes(&mut self, nodes: &[RenderNode]) {
        for node in nodes {
            self.render_node(node);
        }
    }

    fn render_node(&mut self, node: &RenderNode) {
        match node {
            RenderNode::Text { text } => self.output.push_str(&escape_html(text)),
            RenderNode::Element(element) => self.render_element(element),
            RenderNode::CodeBlock { language, code } => {
                B::code_block(language, code, &mut self.output);
            }
            RenderNode::Figure { image, caption } => {
                B::figure(image, caption.as_deref(), &mut self.output);
            }
            RenderNode::Link {
                attrs,
                external,
                children,
            } => {
                B::link_start(attrs, *external, &mut self.output);
                self.render_nodes(children);
                B::link_end(&mut self.output);
            }
            RenderNode::Heading {
                level,
                id,
                attrs,
                children,
            } => {
                B::heading_start(*level, id, attrs, &mut self.output);
                self.render_nodes(children);
                B::heading_end(*level, id, &mut self.output);
            }
            RenderNode::Table { attrs, children } => {
                B::table_start(attrs, &mut self.output);
                self.render_nodes(children);
                B::table_end(&mut self.output);
            }
            RenderNode::TableRow {
                index,
                attrs,
                children,
            } => {
                B::row_start(*index, attrs, &mut self.output);
                self.render_nodes(children);
                B::row_end(&mut self.output);
            }
        }
    }

    fn render_element(&mut self, element: &RenderElement) {
        self.output.push('<');
        self.output.push_str(&element.tag);
        write_attrs(&element.attrs, &mut self.output);
        self.output.push('>');

        if VOID_ELEMENTS.contains(&element.tag.as_str()) {
            return;
        }
        if NEWLINE_STRIPPING_ELEMENTS.contains(&element.tag.as_str())
            && matches!(element.children.first(), Some(RenderNode::Text { text }) if text.starts_with('\n'))
        {
            self.output.push('\n');
        }

        self.render_nodes(&element.children);
        self.output.push_str("</");
        self.output.push_str(&element.tag);
        self.output.push('>');
    }
}

impl<B: RenderBackend> Default for TreeRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a tree to HTML with [`HtmlBackend`].
///
/// # Examples
///
/// ```
/// use quill_content::{parse_fragment, render_html, transform};
///
/// let html = render_html(&transform(&parse_fragment(r#"<a href="/about">About</a>"#)));
/// assert_eq!(html, r#"<a href="/about">About</a>"#);
/// ```
#[must_use]
pub fn render_html(nodes: &[RenderNode]) -> String {
    TreeRenderer::<HtmlBackend>::new().render(nodes)
}
