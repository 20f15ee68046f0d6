//! Validation of URLs submitted for shortening.
//!
//! The submitted string is stored exactly as received; parsing only decides
//! whether it is acceptable and yields the host used for domain counting.

use url::Url;

/// Errors that can occur while validating a URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Parses `input` as an absolute HTTP(S) URL with a host.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed or relative URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes such as
/// `javascript:` or `ftp:`, and [`UrlValidationError::MissingHost`] when the
/// host component is empty.
///
/// Input containing control characters is rejected as
/// [`UrlValidationError::InvalidFormat`]. The parser strips tab, CR and LF,
/// but the stored string must still be valid in a `Location` header.
pub fn validate_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "URL contains control characters".to_string(),
        ));
    }

    let url = Url::parse(input)
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
