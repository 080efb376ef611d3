//! HTML sanitization.
//!
//! [`Sanitizer`] is the seam between untrusted post content and the parser.
//! [`AmmoniaSanitizer`] is the default implementation; callers with a
//! different policy engine implement the trait themselves.

/// Extra tags and attributes allowed on top of a sanitizer's base policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Tags to allow in addition to the base policy.
    pub add_tags: Vec<String>,
    /// Attributes to allow on every tag in addition to the base policy.
    pub add_attrs: Vec<String>,
}

impl Default for SanitizeOptions {
    /// Embedded media allow-list used for blog posts.
    fn default() -> Self {
        Self {
            add_tags: vec!["iframe".to_owned()],
            add_attrs: ["allow", "allowfullscreen", "frameborder", "scrolling"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }
}

/// Error returned when sanitization cannot run.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SanitizeError {
    /// The sanitizing capability is not available.
    #[error("sanitizer unavailable: {0}")]
    Unavailable(String),
    /// The sanitizer rejected the input or its configuration.
    #[error("sanitization failed: {0}")]
    Failed(String),
}

/// Strips unsafe markup before content is parsed and transformed.
pub trait Sanitizer: Send + Sync {
    /// Sanitize `html`, allowing `options` on top of the base policy.
    ///
    /// # Errors
    ///
    /// Returns [`SanitizeError`] if the sanitizer cannot process the input.
    fn sanitize(&self, html: &str, options: &SanitizeOptions) -> Result<String, SanitizeError>;
}

/// Attributes allowed on every tag by the base policy.
///
/// `class` carries code block languages; `id` carries explicit heading anchors.
const BASE_GENERIC_ATTRS: &[&str] = &["class", "id"];

/// Tags removed together with their content; they can never be allowed.
const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

/// Attributes an allowed `iframe` needs to be useful.
const IFRAME_ATTRS: &[&str] = &["src", "width", "height", "title"];

/// Sanitizer backed by ammonia.
///
/// Base policy: ammonia defaults, `class` and `id` on every tag, comments
/// stripped, no `rel` injected on links (link markers belong to the
/// transform). When `iframe` is added its `src`, `width`, `height` and `title`
/// attributes are allowed as well.
#[derive(Debug, Default, Clone, Copy)]
pub struct AmmoniaSanitizer;

impl AmmoniaSanitizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Sanitizer for AmmoniaSanitizer {
    fn sanitize(&self, html: &str, options: &SanitizeOptions) -> Result<String, SanitizeError> {
        if let Some(tag) = options.add_tags.iter().find(|tag| {
            CONTENT_STRIPPED_TAGS
                .iter()
                .any(|stripped| tag.eq_ignore_ascii_case(stripped))
        }) {
            return Err(SanitizeError::Failed(format!(
                "`{tag}` cannot be allowed, its content is always removed"
            )));
        }

        let mut builder = ammonia::Builder::default();
        builder
            .strip_comments(true)
            .link_rel(None)
            .add_generic_attributes(BASE_GENERIC_ATTRS.iter().copied())
            .add_tags(options.add_tags.iter().map(String::as_str))
            .add_generic_attributes(options.add_attrs.iter().map(String::as_str));

        if options.add_tags.iter().any(|tag| tag == "iframe") {
            builder.add_tag_attributes("iframe", IFRAME_ATTRS.iter().copied());
        }

        Ok(builder.clean(html).to_string())
    }
}
