//! CLI command implementations.

pub(crate) mod post;
pub(crate) mod posts;
pub(crate) mod render;
pub(crate) mod tags;

use std::time::Duration;

use clap::ValueEnum;
use quill_api::BlogClient;
use quill_config::{Config, SanitizerConfig};
use quill_content::{AmmoniaSanitizer, ContentPipeline, RenderNode, SanitizeOptions, render_html};

use crate::error::CliError;

pub(crate) use post::PostArgs;
pub(crate) use posts::PostsArgs;
pub(crate) use render::RenderArgs;
pub(crate) use tags::SidebarArgs;

/// Output format for rendered content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Serialized HTML.
    #[default]
    Html,
    /// Render tree as JSON.
    Json,
}

impl Format {
    /// Serialize a render tree in this format.
    pub(crate) fn write(self, nodes: &[RenderNode]) -> Result<String, CliError> {
        match self {
            Self::Html => Ok(render_html(nodes)),
            Self::Json => Ok(serde_json::to_string_pretty(nodes)?),
        }
    }
}

/// Sanitizer options from config, falling back to the built-in allow-list
/// per field.
pub(crate) fn sanitize_options(config: &SanitizerConfig) -> SanitizeOptions {
    let defaults = SanitizeOptions::default();
    SanitizeOptions {
        add_tags: config.add_tags.clone().unwrap_or(defaults.add_tags),
        add_attrs: config.add_attrs.clone().unwrap_or(defaults.add_attrs),
    }
}

/// Content pipeline configured from `config`.
pub(crate) fn pipeline(config: &Config) -> ContentPipeline {
    ContentPipeline::new(
        Box::new(AmmoniaSanitizer::new()),
        sanitize_options(&config.sanitizer),
    )
}

/// API client configured from `config`.
pub(crate) fn client(config: &Config) -> BlogClient {
    BlogClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )
}
