//! Destination URL validation.
//!
//! A destination is stored once and then handed to visitors as a redirect
//! target, so only absolute http(s) URLs are accepted. Script-capable
//! schemes (`javascript:`, `data:`, ...) are rejected with a distinct error
//! so the console can say why.

use url::Url;

/// Schemes that execute or read content in the visitor's browser context.
const BLOCKED_SCHEMES: &[&str] = &["javascript", "data", "file", "vbscript", "about", "blob"];

#[derive(Debug)]
pub enum UrlValidationError {
    Empty,
    NotAbsolute,
    BlockedScheme(String),
    UnsupportedScheme(String),
    Malformed(String),
}

impl std::fmt::Display for UrlValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "destination cannot be empty"),
            Self::NotAbsolute => {
                write!(f, "destination must be an absolute URL (http:// or https://)")
            }
            Self::BlockedScheme(scheme) => write!(f, "scheme '{}:' is blocked", scheme),
            Self::UnsupportedScheme(scheme) => write!(
                f,
                "unsupported scheme '{}:'. Only http and https destinations are allowed",
                scheme
            ),
            Self::Malformed(msg) => write!(f, "malformed destination URL: {}", msg),
        }
    }
}

impl std::error::Error for UrlValidationError {}

/// Validate a redirect destination: non-empty, absolute, http(s) only.
pub fn validate_destination(raw: &str) -> Result<(), UrlValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let parsed = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            return Err(UrlValidationError::NotAbsolute);
        }
        Err(e) => return Err(UrlValidationError::Malformed(e.to_string())),
    };

    // `Url` lowercases the scheme during parsing, so `JAVASCRIPT:` cannot
    // slip past the list.
    let scheme = parsed.scheme();
    if BLOCKED_SCHEMES.contains(&scheme) {
        return Err(UrlValidationError::BlockedScheme(scheme.to_string()));
    }
    if scheme != "http" && scheme != "https" {
        return Err(UrlValidationError::UnsupportedScheme(scheme.to_string()));
    }

    if parsed.host_str().is_none() {
        return Err(UrlValidationError::Malformed("missing host".to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_destinations() {
        assert!(validate_destination("http://example.com").is_ok());
        assert!(validate_destination("https://example.com/path?query=1").is_ok());
        assert!(validate_destination("http://localhost:8080").is_ok());
        assert!(validate_destination("  https://example.com  ").is_ok());
        assert!(validate_destination("HTTPS://example.com").is_ok());
    }

    #[test]
    fn test_blocked_schemes() {
        for dest in [
            "javascript:alert(1)",
            "JAVASCRIPT:alert(1)",
            "data:text/html,x",
            "file:///etc/passwd",
            "vbscript:msgbox(1)",
        ] {
            assert!(
                matches!(
                    validate_destination(dest),
                    Err(UrlValidationError::BlockedScheme(_))
                ),
                "{:?} must be blocked",
                dest
            );
        }
    }

    #[test]
    fn test_unsupported_schemes() {
        assert!(matches!(
            validate_destination("ftp://example.com"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            validate_destination("mailto:a@b.com"),
            Err(UrlValidationError::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_relative_and_empty() {
        assert!(matches!(
            validate_destination("example.com/page"),
            Err(UrlValidationError::NotAbsolute)
        ));
        assert!(matches!(
            validate_destination(""),
            Err(UrlValidationError::Empty)
        ));
        assert!(matches!(
            validate_destination("   "),
            Err(UrlValidationError::Empty)
        ));
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            validate_destination("http://"),
            Err(UrlValidationError::Malformed(_))
        ));
    }
}
