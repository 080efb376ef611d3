//! Configuration management for Quill.
//!
//! Parses `quill.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `api.base_url` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! ## Example
//!
//! ```toml
//! [api]
//! base_url = "${BLOG_API_URL:-http://localhost:3000/api}"
//! timeout_secs = 10
//! posts_per_page = 6
//!
//! [content]
//! excerpt_chars = 160
//!
//! [sanitizer]
//! add_tags = ["iframe"]
//! add_attrs = ["allow", "allowfullscreen", "frameborder", "scrolling"]
//! ```

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the blog API base URL.
    pub api_url: Option<String>,
    /// Override the page size used for post listings.
    pub posts_per_page: Option<u32>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Tags the sanitizer always removes with their content.
const CONTENT_STRIPPED_TAGS: &[&str] = &["script", "style"];

/// Largest page size accepted for post listings.
const MAX_POSTS_PER_PAGE: u32 = 100;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Blog API configuration.
    pub api: ApiConfig,
    /// Content rendering configuration.
    pub content: ContentConfig,
    /// Sanitizer allow-list overrides.
    pub sanitizer: SanitizerConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Blog API configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the blog REST API (e.g., `https://blog.example.com/api`).
    pub base_url: String,
    /// HTTP timeout in seconds.
    pub timeout_secs: u64,
    /// Posts per page for listings.
    pub posts_per_page: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_owned(),
            timeout_secs: 30,
            posts_per_page: 6,
        }
    }
}

/// Content rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Maximum characters in post excerpts.
    pub excerpt_chars: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self { excerpt_chars: 160 }
    }
}

/// Sanitizer allow-list overrides.
///
/// `None` keeps the built-in blog allow-list for that field.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Extra tags to allow.
    pub add_tags: Option<Vec<String>>,
    /// Extra attributes to allow on every tag.
    pub add_attrs: Option<Vec<String>>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.base_url`").
        field: String,
        /// Error message (e.g., "${`BLOG_API_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quill.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied last and validated together with the file.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(api_url) = &settings.api_url {
            self.api.base_url.clone_from(api_url);
        }
        if let Some(posts_per_page) = settings.posts_per_page {
            self.api.posts_per_page = posts_per_page;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_api()?;
        self.validate_sanitizer()?;

        if self.content.excerpt_chars == 0 {
            return Err(ConfigError::Validation(
                "content.excerpt_chars must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    fn validate_sanitizer(&self) -> Result<(), ConfigError> {
        let tags = self.sanitizer.add_tags.iter().flatten();
        for tag in tags {
            if CONTENT_STRIPPED_TAGS
                .iter()
                .any(|stripped| tag.eq_ignore_ascii_case(stripped))
            {
                return Err(ConfigError::Validation(format!(
                    "sanitizer.add_tags cannot contain `{tag}`"
                )));
            }
        }
        Ok(())
    }

    fn validate_api(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api.base_url, "api.base_url")?;
        require_http_url(&self.api.base_url, "api.base_url")?;

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        let per_page = self.api.posts_per_page;
        if per_page == 0 || per_page > MAX_POSTS_PER_PAGE {
            return Err(ConfigError::Validation(format!(
                "api.posts_per_page must be between 1 and {MAX_POSTS_PER_PAGE}"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.posts_per_page, 6);
        assert_eq!(config.content.excerpt_chars, 160);
        assert!(config.sanitizer.add_tags.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert_eq!(config.api.posts_per_page, 6);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[api]
base_url = "https://blog.example.com/api"
timeout_secs = 5
posts_per_page = 12

[content]
excerpt_chars = 200

[sanitizer]
add_tags = ["iframe", "video"]
add_attrs = ["allowfullscreen"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "https://blog.example.com/api");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.posts_per_page, 12);
        assert_eq!(config.content.excerpt_chars, 200);
        assert_eq!(
            config.sanitizer.add_tags,
            Some(vec!["iframe".to_owned(), "video".to_owned()])
        );
        assert_eq!(
            config.sanitizer.add_attrs,
            Some(vec!["allowfullscreen".to_owned()])
        );
    }

    #[test]
    fn test_load_from_explicit_path() {
        let file = write_config(
            r#"
[api]
base_url = "https://blog.example.com/api"
"#,
        );
        let config = Config::load(Some(file.path()), None).unwrap();
        assert_eq!(config.api.base_url, "https://blog.example.com/api");
        assert_eq!(config.config_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let result = Config::load(Some(Path::new("/nonexistent/quill.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = write_config("[api\nbase_url = ");
        let result = Config::load(Some(file.path()), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_expands_env_vars() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("QUILL_TEST_LOAD_URL", "https://env.example.com/api");
        }
        let file = write_config(
            r#"
[api]
base_url = "${QUILL_TEST_LOAD_URL}"
"#,
        );
        let config = Config::load(Some(file.path()), None).unwrap();
        assert_eq!(config.api.base_url, "https://env.example.com/api");
        unsafe {
            std::env::remove_var("QUILL_TEST_LOAD_URL");
        }
    }

    #[test]
    fn test_cli_settings_override_file() {
        let file = write_config(
            r#"
[api]
base_url = "https://blog.example.com/api"
posts_per_page = 12
"#,
        );
        let settings = CliSettings {
            api_url: Some("http://127.0.0.1:8080/api".to_owned()),
            ..Default::default()
        };
        let config = Config::load(Some(file.path()), Some(&settings)).unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.api.posts_per_page, 12); // Unchanged
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let file = write_config("");
        let settings = CliSettings {
            api_url: Some("ftp://example.com".to_owned()),
            ..Default::default()
        };
        let result = Config::load(Some(file.path()), Some(&settings));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(config.validate().unwrap_err().to_string().contains("api.base_url"));

        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().unwrap_err().to_string().contains("timeout_secs"));

        let mut config = Config::default();
        config.api.posts_per_page = 101;
        assert!(config.validate().unwrap_err().to_string().contains("posts_per_page"));

        let mut config = Config::default();
        config.content.excerpt_chars = 0;
        assert!(config.validate().unwrap_err().to_string().contains("excerpt_chars"));
    }

    #[test]
    fn test_validate_rejects_content_stripped_tags() {
        let file = write_config(
            r#"
[sanitizer]
add_tags = ["iframe", "Style"]
"#,
        );
        let err = Config::load(Some(file.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("`Style`"));
    }
}
