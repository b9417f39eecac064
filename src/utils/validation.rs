//! Input validation primitives.
//!
//! Each helper returns the accepted value, or a `validation.invalid_argument`
//! error naming the field.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#?[0-9A-F]{6}$").unwrap());

// https://ihateregex.io/expr/url/
static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{1,6}\b([-a-zA-Z0-9()!@:%_+.~#?&/=]*)",
    )
    .unwrap()
});

/// Require a string to be non-empty after trimming.
pub fn require_non_empty<'a>(value: &'a str, field: &str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::validation_invalid_argument(field, message, None))
    } else {
        Ok(trimmed)
    }
}

/// Six hex digits, optionally prefixed with `#`.
pub fn require_hex(value: &str) -> Result<&str> {
    let trimmed = value.trim();
    if HEX_PATTERN.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(Error::validation_invalid_argument(
            "hex",
            "not a valid hex",
            Some(value.to_string()),
        ))
    }
}

/// An http(s) link with a host and a top-level domain.
pub fn require_url<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if URL_PATTERN.is_match(trimmed) {
        Ok(trimmed)
    } else {
        Err(Error::validation_invalid_argument(
            field,
            "not a valid link",
            Some(value.to_string()),
        ))
    }
}

/// Optional link: blank means absent.
pub fn optional_url(value: Option<&str>, field: &str) -> Result<Option<String>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(url) => require_url(url, field).map(|u| Some(u.to_string())),
    }
}

/// An existing file whose name ends in `svg`.
pub fn require_svg_file(path: &Path) -> Result<&Path> {
    let ends_with_svg = path.to_string_lossy().ends_with("svg");
    if ends_with_svg && path.is_file() {
        Ok(path)
    } else {
        Err(Error::validation_invalid_argument(
            "file",
            "file does not exist",
            Some(path.display().to_string()),
        ))
    }
}

/// One of the allowed values.
pub fn require_choice<T: PartialEq + std::fmt::Display>(
    value: T,
    allowed: &[T],
    field: &str,
) -> Result<T> {
    if allowed.contains(&value) {
        Ok(value)
    } else {
        let choices = allowed
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(Error::validation_invalid_argument(
            field,
            format!("must be one of: {}", choices),
            Some(value.to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn require_non_empty_trims_whitespace() {
        assert_eq!(require_non_empty("  hello  ", "title", "msg").unwrap(), "hello");
        assert!(require_non_empty("   ", "title", "Cannot be empty").is_err());
    }

    #[test]
    fn hex_accepts_with_and_without_hash() {
        assert!(require_hex("#FF00aa").is_ok());
        assert!(require_hex("ff00AA").is_ok());
    }

    #[test]
    fn hex_rejects_wrong_length_or_digits() {
        assert!(require_hex("#FFF").is_err());
        assert!(require_hex("GG0000").is_err());
        assert!(require_hex("##FF0000").is_err());
    }

    #[test]
    fn url_accepts_http_and_https() {
        assert!(require_url("https://nodejs.org/en/about/resources", "source").is_ok());
        assert!(require_url("http://www.example.com", "source").is_ok());
    }

    #[test]
    fn url_rejects_non_links() {
        let err = require_url("nodejs.org", "source").unwrap_err();
        assert_eq!(err.details["field"], "source");
        assert_eq!(err.details["problem"], "not a valid link");
        assert!(require_url("https://localhost", "source").is_err());
    }

    #[test]
    fn optional_url_treats_blank_as_absent() {
        assert_eq!(optional_url(None, "guidelines").unwrap(), None);
        assert_eq!(optional_url(Some("  "), "guidelines").unwrap(), None);
        assert_eq!(
            optional_url(Some("https://brand.example.com"), "guidelines").unwrap(),
            Some("https://brand.example.com".to_string())
        );
        assert!(optional_url(Some("nope"), "guidelines").is_err());
    }

    #[test]
    fn svg_file_must_exist_and_end_in_svg() {
        let dir = TempDir::new().unwrap();
        let svg = dir.path().join("icon.svg");
        let txt = dir.path().join("icon.txt");
        std::fs::write(&svg, "<svg/>").unwrap();
        std::fs::write(&txt, "").unwrap();

        assert!(require_svg_file(&svg).is_ok());
        assert!(require_svg_file(&txt).is_err());
        assert!(require_svg_file(&dir.path().join("missing.svg")).is_err());
    }

    #[test]
    fn choice_lists_allowed_values() {
        assert_eq!(require_choice(4, &[3, 4, 5], "precision").unwrap(), 4);
        let err = require_choice(7, &[3, 4, 5], "precision").unwrap_err();
        assert_eq!(err.details["problem"], "must be one of: 3, 4, 5");
    }
}
