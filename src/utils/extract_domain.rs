//! Domain extraction for per-domain counters.

use url::Url;

/// Returns the domain a URL is counted under.
///
/// This is the host component as normalized by the `url` crate (lowercase,
/// without port or credentials) with a single leading `www.` removed.
/// IPv6 hosts keep their brackets.
///
/// # Examples
///
/// ```
/// use redis_shortener::utils::extract_domain::extract_domain;
/// use url::Url;
///
/// let url = Url::parse("https://www.GitHub.com:443/rust-lang").unwrap();
/// assert_eq!(extract_domain(&url), "github.com");
/// ```
pub fn extract_domain(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    host.strip_prefix("www.").unwrap_or(host).to_string()
}
