//! Blog REST API client.
//!
//! Provides a sync HTTP client for the blog backend. Only read endpoints are
//! covered: single post by slug, paged post listings, paged comments of a
//! post, the tag list and recent posts.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tracing::debug;
use ureq::Agent;

use crate::error::ApiError;
use crate::types::{CommentsPage, DataList, Post, PostSummary, PostsPage, Tag};

/// Characters left as-is in a path segment: A-Z a-z 0-9 - . _ ~
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Page selection for paged listings (posts, comments).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    /// One-based page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self { page: 1, limit: 6 }
    }
}

/// Blog REST API client.
pub struct BlogClient {
    agent: Agent,
    base_url: String,
}

impl BlogClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch a single post by slug.
    ///
    /// A 404 answer maps to [`ApiError::NotFound`].
    pub fn get_post(&self, slug: &str) -> Result<Post, ApiError> {
        let url = self.post_url(slug);
        match self.get_json(&url) {
            Err(ApiError::HttpResponse { status: 404, .. }) => {
                Err(ApiError::NotFound(slug.to_owned()))
            }
            result => result,
        }
    }

    /// Fetch one page of the post listing.
    pub fn list_posts(&self, query: &PostQuery) -> Result<PostsPage, ApiError> {
        let url = self.posts_url(query);
        self.get_json(&url)
    }

    /// Fetch one page of a post's comments.
    pub fn list_comments(
        &self,
        post_id: u64,
        query: &PostQuery,
    ) -> Result<CommentsPage, ApiError> {
        let url = self.comments_url(post_id, query);
        self.get_json(&url)
    }

    /// Fetch all tags.
    pub fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        let url = format!("{}/tags", self.base_url);
        let list: DataList<Tag> = self.get_json(&url)?;
        Ok(list.data)
    }

    /// Fetch the most recent posts, as chosen by the server.
    pub fn recent_posts(&self) -> Result<Vec<PostSummary>, ApiError> {
        let url = format!("{}/posts/recent", self.base_url);
        let list: DataList<PostSummary> = self.get_json(&url)?;
        Ok(list.data)
    }

    fn post_url(&self, slug: &str) -> String {
        format!(
            "{}/posts/slug/{}",
            self.base_url,
            utf8_percent_encode(slug, PATH_SEGMENT)
        )
    }

    fn posts_url(&self, query: &PostQuery) -> String {
        format!(
            "{}/posts?page={}&limit={}",
            self.base_url, query.page, query.limit
        )
    }

    fn comments_url(&self, post_id: u64, query: &PostQuery) -> String {
        format!(
            "{}/posts/{post_id}/comments?page={}&limit={}",
            self.base_url, query.page, query.limit
        )
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "GET");

        let response = self
            .agent
            .get(url)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            debug!(url, status, "request failed");
            return Err(ApiError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body = body_reader.read_to_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}
