//! Validation of user-supplied link destinations.

use url::Url;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LinkUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Checks that `raw` is an absolute http(s) URL with a host and returns it
/// trimmed.
///
/// The stored value is what the user typed (minus surrounding whitespace),
/// not a re-serialized form, so it renders back exactly as entered.
///
/// # Errors
///
/// Returns [`LinkUrlError::InvalidFormat`] for malformed URLs or URLs without a host.
/// Returns [`LinkUrlError::UnsupportedProtocol`] for other schemes such as
/// `javascript:` or `data:`.
pub fn validate_link_url(raw: &str) -> Result<String, LinkUrlError> {
    let trimmed = raw.trim();
    let parsed = Url::parse(trimmed).map_err(|e| LinkUrlError::InvalidFormat(e.to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LinkUrlError::UnsupportedProtocol);
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(LinkUrlError::InvalidFormat("missing host".to_string()));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert_eq!(
            validate_link_url("  https://example.com/Me?x=1 ").unwrap(),
            "https://example.com/Me?x=1"
        );
        assert!(validate_link_url("http://example.com").is_ok());
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        assert_eq!(
            validate_link_url("javascript:alert(1)"),
            Err(LinkUrlError::UnsupportedProtocol)
        );
        assert_eq!(
            validate_link_url("data:text/html,hi"),
            Err(LinkUrlError::UnsupportedProtocol)
        );
        assert_eq!(
            validate_link_url("ftp://example.com"),
            Err(LinkUrlError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(matches!(
            validate_link_url("example.com"),
            Err(LinkUrlError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_link_url(""),
            Err(LinkUrlError::InvalidFormat(_))
        ));
    }
}
