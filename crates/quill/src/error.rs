//! CLI error types.

use quill_api::ApiError;
use quill_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Render(String),
}
