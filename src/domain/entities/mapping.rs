//! URL mapping entity.

/// Bidirectional association between an original URL and its short code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub original_url: String,
    pub code: String,
}

impl UrlMapping {
    pub fn new(original_url: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            code: code.into(),
        }
    }

    /// Builds the public short URL for this mapping.
    ///
    /// Without a base URL the bare code is returned.
    pub fn short_url(&self, base_url: Option<&str>) -> String {
        match base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), self.code),
            None => self.code.clone(),
        }
    }
}

/// Result of a shorten call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub mapping: UrlMapping,
    /// `true` when this call created the mapping and counted it for its domain.
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_url_without_base() {
        let mapping = UrlMapping::new("https://example.com", "6fbc04d3");
        assert_eq!(mapping.short_url(None), "6fbc04d3");
    }

    #[test]
    fn test_short_url_with_base() {
        let mapping = UrlMapping::new("https://example.com", "6fbc04d3");
        assert_eq!(
            mapping.short_url(Some("https://s.example.com/")),
            "https://s.example.com/6fbc04d3"
        );
        assert_eq!(
            mapping.short_url(Some("http://localhost:8080")),
            "http://localhost:8080/6fbc04d3"
        );
    }
}
