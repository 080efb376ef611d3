//! Render backend trait for format-specific rendering.
//!
//! [`TreeRenderer`](crate::TreeRenderer) walks the render tree and writes text
//! and pass-through elements itself; the node kinds produced by the
//! transformer's rewrite rules are delegated to a backend.

use crate::node::Attributes;

/// Backend trait for format-specific rendering operations.
///
/// Implementations decide how each enriched node is presented:
/// - Code blocks (highlighting hooks, copy affordance)
/// - Figures and captions
/// - Link markers for external targets
/// - Heading self-links
/// - Table scroll containers and row striping
pub trait RenderBackend {
    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `language` - Language identifier (e.g., "rust", "python")
    /// * `code` - The code content, unescaped
    /// * `out` - Output buffer to write to
    fn code_block(language: &str, code: &str, out: &mut String);

    /// Render an image wrapped in a figure.
    ///
    /// # Arguments
    ///
    /// * `image` - Image attributes (`src`, `alt`, ...)
    /// * `caption` - Caption text, `None` when the image has no alt text
    /// * `out` - Output buffer to write to
    fn figure(image: &Attributes, caption: Option<&str>, out: &mut String);

    /// Render a link start tag.
    fn link_start(attrs: &Attributes, external: bool, out: &mut String);

    /// Render a link end tag.
    fn link_end(out: &mut String) {
        out.push_str("</a>");
    }

    /// Render a heading start tag carrying its anchor id.
    fn heading_start(level: u8, id: &str, attrs: &Attributes, out: &mut String);

    /// Render a heading end, including its self-link.
    fn heading_end(level: u8, id: &str, out: &mut String);

    /// Render a table start inside its scroll container.
    fn table_start(attrs: &Attributes, out: &mut String);

    /// Render a table end, closing the scroll container.
    fn table_end(out: &mut String);

    /// Render a table row start tag.
    ///
    /// `index` is the zero-based position among sibling rows.
    fn row_start(index: usize, attrs: &Attributes, out: &mut String);

    /// Render a table row end tag.
    fn row_end(out: &mut String) {
        out.push_str("</tr>");
    }
}
