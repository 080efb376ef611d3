//! Client for the blog REST API.
//!
//! Fetches posts as JSON and hands their HTML `content` to the
//! `quill-content` pipeline. The client is synchronous; the CLI runs one
//! request per invocation.

mod client;
mod error;
mod types;

pub use client::{BlogClient, PostQuery};
pub use error::ApiError;
pub use types::{Author, Comment, CommentsPage, Pagination, Post, PostSummary, PostsPage, Tag};
