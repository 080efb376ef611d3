//! Blog post content rendering.
//!
//! Turns the HTML body of a blog post into a typed render tree:
//!
//! 1. [`Sanitizer`] strips unsafe markup ([`AmmoniaSanitizer`] by default)
//! 2. [`parse_fragment`] parses the sanitized HTML into [`ParsedNode`]s
//! 3. [`transform`] rewrites code blocks, images, links, headings and tables
//!    into [`RenderNode`]s carrying the metadata a renderer needs
//! 4. [`TreeRenderer`] serializes the tree through a [`RenderBackend`]
//!    ([`HtmlBackend`] for HTML)
//!
//! [`ContentPipeline`] runs steps 1-3 with sanitizer failure fallback.
//!
//! # Example
//!
//! ```
//! use quill_content::{AmmoniaSanitizer, ContentPipeline, SanitizeOptions, render_html};
//!
//! let mut pipeline =
//!     ContentPipeline::new(Box::new(AmmoniaSanitizer::new()), SanitizeOptions::default());
//! let nodes = pipeline.render(r#"<pre><code class="language-rust">fn main() {}</code></pre>"#);
//! let html = render_html(&nodes);
//! assert!(html.contains(r#"data-language="rust""#));
//! ```

mod backend;
mod excerpt;
mod html;
mod node;
mod parser;
mod pipeline;
mod renderer;
mod sanitize;
mod transform;
mod util;

pub use backend::RenderBackend;
pub use excerpt::{DEFAULT_EXCERPT_CHARS, excerpt};
pub use html::HtmlBackend;
pub use node::{
    Attributes, EXTERNAL_REL, EXTERNAL_TARGET, ParsedElement, ParsedNode, RenderElement,
    RenderNode,
};
pub use parser::{MAX_NESTING_DEPTH, parse_fragment};
pub use pipeline::ContentPipeline;
pub use renderer::{TreeRenderer, render_html};
pub use sanitize::{AmmoniaSanitizer, SanitizeError, SanitizeOptions, Sanitizer};
pub use transform::{DEFAULT_CODE_LANGUAGE, transform, transform_node};
pub use util::{escape_html, slugify};
