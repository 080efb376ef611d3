//! Raw post content to render tree.
//!
//! [`ContentPipeline`] chains sanitize → parse → transform. Sanitization runs
//! once per distinct raw input; if it fails the pipeline keeps rendering the
//! last content that was sanitized successfully (or nothing) instead of
//! surfacing an error.

use crate::node::RenderNode;
use crate::parser::parse_fragment;
use crate::sanitize::{SanitizeOptions, Sanitizer};
use crate::transform::transform;

/// Last raw input and its sanitized form.
struct Sanitized {
    raw: String,
    html: String,
}

/// Sanitize-parse-transform pipeline for post content.
pub struct ContentPipeline {
    sanitizer: Box<dyn Sanitizer>,
    options: SanitizeOptions,
    last: Option<Sanitized>,
}

impl ContentPipeline {
    /// Create a pipeline using `sanitizer` with the given allow-list.
    #[must_use]
    pub fn new(sanitizer: Box<dyn Sanitizer>, options: SanitizeOptions) -> Self {
        Self {
            sanitizer,
            options,
            last: None,
        }
    }

    /// Render raw post content into a render tree.
    ///
    /// Never fails: a sanitizer error falls back to the previous successfully
    /// sanitized content, or to an empty fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use quill_content::{AmmoniaSanitizer, ContentPipeline, RenderNode, SanitizeOptions};
    ///
    /// let mut pipeline =
    ///     ContentPipeline::new(Box::new(AmmoniaSanitizer::new()), SanitizeOptions::default());
    /// let nodes = pipeline.render("<h2>Hi there</h2><script>alert(1)</script>");
    /// assert_eq!(nodes.len(), 1);
    /// assert!(matches!(&nodes[0], RenderNode::Heading { id, .. } if id == "hi-there"));
    /// ```
    pub fn render(&mut self, raw: &str) -> Vec<RenderNode> {
        match self.sanitized(raw) {
            Some(html) => transform(&parse_fragment(html)),
            None => Vec::new(),
        }
    }

    /// Sanitized HTML for `raw`, reusing the cached result when unchanged.
    fn sanitized(&mut self, raw: &str) -> Option<&str> {
        let cached = self.last.as_ref().is_some_and(|last| last.raw == raw);
        if !cached {
            match self.sanitizer.sanitize(raw, &self.options) {
                Ok(html) => {
                    self.last = Some(Sanitized {
                        raw: raw.to_owned(),
                        html,
                    });
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        has_fallback = self.last.is_some(),
                        "Sanitization failed, rendering last sanitized content"
                    );
                }
            }
        }
        self.last.as_ref().map(|last| last.html.as_str())
    }

    /// Allow-list this pipeline sanitizes with.
    #[must_use]
    pub fn options(&self) -> &SanitizeOptions {
        &self.options
    }
}
