//! `quill post` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_api::{Comment, Post, PostQuery};
use quill_config::{CliSettings, Config};
use quill_content::excerpt;

use super::{Format, client, pipeline};
use crate::error::CliError;
use crate::output::Output;

/// Comments shown below a post.
const COMMENTS_PER_PAGE: u32 = 5;

/// Arguments for the post command.
#[derive(Args)]
pub(crate) struct PostArgs {
    /// Slug of the post to fetch.
    slug: String,

    /// Output format for the post body.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Blog API base URL (overrides config).
    #[arg(long, env = "QUILL_API_URL")]
    api_url: Option<String>,
}

impl PostArgs {
    /// Execute the post command.
    ///
    /// Post metadata and comments go to stderr, the rendered body to stdout.
    /// A failed comment fetch is reported as a warning.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            api_url: self.api_url,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let client = client(&config);
        let post = client.get_post(&self.slug)?;
        let nodes = pipeline(&config).render(&post.content);

        output.highlight(&post.title);
        output.info(&byline(&post));
        if !post.tags.is_empty() {
            output.muted(&tag_line(&post));
        }
        let summary = excerpt(&nodes, config.content.excerpt_chars);
        if summary.is_empty() {
            output.warning("Post has no renderable content");
        } else {
            output.muted(&summary);
        }
        output.separator();

        output.content(&self.format.write(&nodes)?)?;

        let query = PostQuery {
            page: 1,
            limit: COMMENTS_PER_PAGE,
        };
        match client.list_comments(post.id, &query) {
            Ok(page) => {
                output.separator();
                output.highlight(&format!("Comments ({})", page.pagination.total_items));
                for comment in &page.data {
                    output.info(&comment_line(comment));
                }
                if page.pagination.has_next() {
                    output.muted(&format!(
                        "... {} more",
                        page.pagination
                            .total_items
                            .saturating_sub(page.data.len() as u64)
                    ));
                }
            }
            Err(err) => output.warning(&format!("Failed to load comments: {err}")),
        }
        Ok(())
    }
}

/// `<username> (<date>): <text>` line.
fn comment_line(comment: &Comment) -> String {
    format!(
        "{} ({}): {}",
        comment.username,
        display_date(&comment.created_at),
        comment.text
    )
}

/// `By <author> on <date>` line.
fn byline(post: &Post) -> String {
    format!("By {} on {}", post.author.name, display_date(&post.created_at))
}

/// Tag names joined with `#` markers.
fn tag_line(post: &Post) -> String {
    post.tags
        .iter()
        .map(|tag| format!("#{}", tag.slug))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Date part of an ISO 8601 timestamp.
pub(crate) fn display_date(timestamp: &str) -> &str {
    timestamp.split_once('T').map_or(timestamp, |(date, _)| date)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn post() -> Post {
        serde_json::from_str(
            r#"{
                "id": 1,
                "title": "Hello",
                "content": "<p>Hi</p>",
                "createdAt": "2024-05-01T10:00:00.000Z",
                "author": {"id": 1, "name": "Sam", "email": "sam@example.com"},
                "slug": "hello",
                "tags": [
                    {"id": 1, "name": "Rust", "slug": "rust"},
                    {"id": 2, "name": "Web Dev", "slug": "web-dev"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_byline() {
        assert_eq!(byline(&post()), "By Sam on 2024-05-01");
    }

    #[test]
    fn test_tag_line() {
        assert_eq!(tag_line(&post()), "#rust #web-dev");
    }

    #[test]
    fn test_comment_line() {
        let comment: Comment = serde_json::from_str(
            r#"{"id": 1, "username": "kim", "text": "Nice post", "createdAt": "2024-05-02T08:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(comment_line(&comment), "kim (2024-05-02): Nice post");
    }

    #[test]
    fn test_display_date_without_time() {
        assert_eq!(display_date("2024-05-01"), "2024-05-01");
    }
}
