//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a string.
///
/// An unset variable without a default is an error naming `field`. Only
/// braced references are expanded: bare `$name` and an unterminated `${` are
/// copied verbatim, so URL paths containing `$` survive unchanged.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let end = start + len + 1;
        out.push_str(&rest[..start]);
        out.push_str(&expand_reference(&rest[start..end], field)?);
        rest = &rest[end..];
    }
    out.push_str(rest);
    Ok(out)
}

/// Expand a single `${...}` reference.
fn expand_reference(reference: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(reference, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

/// Name of a variable that was referenced but not set.
struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_api_host() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("QUILL_TEST_API_HOST", "blog.example.com");
        }
        let result = expand_env("https://${QUILL_TEST_API_HOST}/api", "api.base_url").unwrap();
        assert_eq!(result, "https://blog.example.com/api");
        unsafe {
            std::env::remove_var("QUILL_TEST_API_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("QUILL_TEST_UNSET_URL");
        }
        let result = expand_env(
            "${QUILL_TEST_UNSET_URL:-http://localhost:3000/api}",
            "api.base_url",
        )
        .unwrap();
        assert_eq!(result, "http://localhost:3000/api");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("QUILL_TEST_MISSING");
        }
        let err = expand_env("${QUILL_TEST_MISSING}", "api.base_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("QUILL_TEST_MISSING"));
        assert!(message.contains("api.base_url"));
    }

    #[test]
    fn test_braced_and_bare_references_mixed() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("QUILL_TEST_MIXED_HOST", "blog.example.com");
        }
        let result = expand_env("https://${QUILL_TEST_MIXED_HOST}/$path/x", "api.base_url").unwrap();
        assert_eq!(result, "https://blog.example.com/$path/x");
        unsafe {
            std::env::remove_var("QUILL_TEST_MIXED_HOST");
        }
    }

    #[test]
    fn test_unterminated_reference_unchanged() {
        assert_eq!(
            expand_env("https://example.com/${oops", "api.base_url").unwrap(),
            "https://example.com/${oops"
        );
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(
            expand_env("http://localhost:3000/api", "api.base_url").unwrap(),
            "http://localhost:3000/api"
        );
        assert_eq!(
            expand_env("https://example.com/$path", "api.base_url").unwrap(),
            "https://example.com/$path"
        );
    }
}
