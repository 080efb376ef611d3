//! `quill posts` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_api::{Pagination, PostQuery};
use quill_config::{CliSettings, Config};
use quill_content::excerpt;
use tracing::info;

use super::post::display_date;
use super::{client, pipeline};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the posts command.
#[derive(Args)]
pub(crate) struct PostsArgs {
    /// Page number (starting at 1).
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,

    /// Posts per page (overrides config).
    #[arg(short, long)]
    limit: Option<u32>,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Blog API base URL (overrides config).
    #[arg(long, env = "QUILL_API_URL")]
    api_url: Option<String>,
}

impl PostsArgs {
    /// Execute the posts command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            api_url: self.api_url,
            posts_per_page: self.limit,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let query = PostQuery {
            page: self.page,
            limit: config.api.posts_per_page,
        };
        let listing = client(&config).list_posts(&query)?;
        info!(
            page = query.page,
            count = listing.data.len(),
            "Fetched posts"
        );

        if listing.data.is_empty() {
            output.warning("No posts found");
            return Ok(());
        }

        let mut pipeline = pipeline(&config);
        for post in &listing.data {
            let nodes = pipeline.render(&post.content);
            output.highlight(&post.title);
            output.muted(&format!(
                "{} | {} | {}",
                post.slug,
                post.author.name,
                display_date(&post.created_at)
            ));
            output.content(&excerpt(&nodes, config.content.excerpt_chars))?;
            output.info("");
        }

        output.separator();
        output.info(&page_summary(&listing.pagination));
        Ok(())
    }
}

/// `Page 2 of 5 (27 posts)` line with navigation hints.
fn page_summary(pagination: &Pagination) -> String {
    let mut summary = format!(
        "Page {} of {} ({} posts)",
        pagination.page, pagination.total_pages, pagination.total_items
    );
    if pagination.has_prev() {
        summary.push_str(&format!(
            " | prev: --page {}",
            pagination.page.saturating_sub(1)
        ));
    }
    if pagination.has_next() {
        summary.push_str(&format!(
            " | next: --page {}",
            pagination.page.saturating_add(1)
        ));
    }
    summary
}
