//! `quill tags` and `quill recent` command implementations.

use std::path::PathBuf;

use clap::Args;
use quill_api::{PostSummary, Tag};
use quill_config::{CliSettings, Config};

use super::client;
use super::post::display_date;
use crate::error::CliError;
use crate::output::Output;

/// Arguments shared by the tag and recent-post listings.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Blog API base URL (overrides config).
    #[arg(long, env = "QUILL_API_URL")]
    api_url: Option<String>,
}

impl SidebarArgs {
    fn load_config(self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            api_url: self.api_url,
            ..Default::default()
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Execute the tags command.
    pub(crate) fn execute_tags(self) -> Result<(), CliError> {
        let output = Output::new();
        let tags = client(&self.load_config()?).list_tags()?;

        if tags.is_empty() {
            output.warning("No tags found");
            return Ok(());
        }
        for tag in &tags {
            output.content(&tag_line(tag))?;
        }
        Ok(())
    }

    /// Execute the recent command.
    pub(crate) fn execute_recent(self) -> Result<(), CliError> {
        let output = Output::new();
        let posts = client(&self.load_config()?).recent_posts()?;

        if posts.is_empty() {
            output.warning("No recent posts");
            return Ok(());
        }
        for post in &posts {
            output.content(&recent_line(post))?;
        }
        Ok(())
    }
}

/// `<slug>\t<name>` line.
fn tag_line(tag: &Tag) -> String {
    format!("{}\t{}", tag.slug, tag.name)
}

/// `<slug>\t<title>` line, prefixed with the date when known.
fn recent_line(post: &PostSummary) -> String {
    match &post.created_at {
        Some(created_at) => format!(
            "{}\t{}\t{}",
            display_date(created_at),
            post.slug,
            post.title
        ),
        None => format!("{}\t{}", post.slug, post.title),
    }
}
