//! Key layout inside the shared store.

/// Builds the store keys for mappings and domain counters.
///
/// Keys have the form `<namespace>:<kind>:<value>`; with an empty namespace the
/// leading `<namespace>:` is omitted.
///
/// | kind     | value          | stored value    |
/// |----------|----------------|-----------------|
/// | `url`    | original URL   | short code      |
/// | `code`   | short code     | original URL    |
/// | `domain` | domain name    | integer counter |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    namespace: String,
}

impl Keyspace {
    pub const DEFAULT_NAMESPACE: &'static str = "shortener";

    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Key of the forward mapping `original URL -> code`.
    pub fn url_key(&self, original_url: &str) -> String {
        format!("{}url:{}", self.root(), original_url)
    }

    /// Key of the reverse mapping `code -> original URL`.
    pub fn code_key(&self, code: &str) -> String {
        format!("{}code:{}", self.root(), code)
    }

    /// Key of the counter for `domain`.
    pub fn domain_key(&self, domain: &str) -> String {
        format!("{}{}", self.domain_prefix(), domain)
    }

    /// Prefix shared by every domain counter.
    pub fn domain_prefix(&self) -> String {
        format!("{}domain:", self.root())
    }

    /// Extracts the domain name from a counter key.
    pub fn domain_from_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        key.strip_prefix(self.domain_prefix().as_str())
    }

    /// Common prefix of every key, empty when no namespace is configured.
    fn root(&self) -> String {
        if self.namespace.is_empty() {
            String::new()
        } else {
            format!("{}:", self.namespace)
        }
    }

    /// Prefixes covering all keys written by the service.
    pub fn owned_prefixes(&self) -> Vec<String> {
        if self.namespace.is_empty() {
            let root = self.root();
            vec![
                format!("{root}url:"),
                format!("{root}code:"),
                self.domain_prefix(),
            ]
        } else {
            vec![self.root()]
        }
    }
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NAMESPACE)
    }
}
