//! Shared string helpers for transforming and rendering.

/// Convert heading text to an anchor id.
///
/// Lowercases, replaces each whitespace run with a single dash and drops every
/// character outside ASCII word characters (`[A-Za-z0-9_]`) and `-`. The input
/// is not trimmed, so surrounding whitespace becomes a leading or trailing dash.
///
/// # Examples
///
/// ```
/// use quill_content::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("snake_case  Names"), "snake_case-names");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut result = String::with_capacity(lower.len());
    let mut in_whitespace = false;

    for c in lower.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                result.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            result.push(c);
        }
    }

    result
}

/// Heading level from a tag name (`h1`..`h6`).
#[must_use]
pub(crate) fn heading_level(tag: &str) -> Option<u8> {
    let bytes = tag.as_bytes();
    match bytes {
        [b'h' | b'H', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("kebab-case"), "kebab-case");
        assert_eq!(slugify("snake_case"), "snake_case");
    }

    #[test]
    fn test_slugify_keeps_surrounding_dashes() {
        assert_eq!(slugify("  Spaces  "), "-spaces-");
        assert_eq!(slugify("\n\tTitle\n"), "-title-");
    }

    #[test]
    fn test_slugify_drops_non_ascii_word_chars() {
        assert_eq!(slugify("Café Crème"), "caf-crme");
        assert_eq!(slugify("日本語"), "");
    }

    #[test]
    fn test_slugify_whitespace_runs_around_punctuation() {
        // Punctuation is dropped after whitespace collapsing, so dashes can touch.
        assert_eq!(slugify("a - b"), "a---b");
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h6"), Some(6));
        assert_eq!(heading_level("H3"), Some(3));
        assert_eq!(heading_level("h7"), None);
        assert_eq!(heading_level("h"), None);
        assert_eq!(heading_level("hr"), None);
        assert_eq!(heading_level("h10"), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }
}
