//! Error types for blog API access.

/// Error from blog API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// Server answered with an error status.
    #[error("HTTP error: {status} - {body}")]
    HttpResponse { status: u16, body: String },

    /// No post exists for the slug.
    #[error("Post not found: {0}")]
    NotFound(String),

    /// Response body was not the expected JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
