// ABOUTME: Endpoint enum naming the remote extraction APIs and their wire names.
// ABOUTME: Unknown names map to Custom so callers can reach APIs the crate has no model for.

use std::fmt;

/// A remote extraction API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Article,
    Product,
    Image,
    Frontpage,
    /// The page classifier, served as `analyze`.
    Analyze,
    Bulk,
    Crawl,
    Batch,
    Custom(String),
}

impl Endpoint {
    /// The path segment used on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Endpoint::Article => "article",
            Endpoint::Product => "product",
            Endpoint::Image => "image",
            Endpoint::Frontpage => "frontpage",
            Endpoint::Analyze => "analyze",
            Endpoint::Bulk => "bulk",
            Endpoint::Crawl => "crawl",
            Endpoint::Batch => "batch",
            Endpoint::Custom(name) => name,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Endpoint {
    fn from(s: &str) -> Self {
        match s {
            "article" => Endpoint::Article,
            "product" => Endpoint::Product,
            "image" => Endpoint::Image,
            "frontpage" => Endpoint::Frontpage,
            "analyze" => Endpoint::Analyze,
            "bulk" => Endpoint::Bulk,
            "crawl" => Endpoint::Crawl,
            "batch" => Endpoint::Batch,
            other => Endpoint::Custom(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_round_trip() {
        for name in [
            "article",
            "product",
            "image",
            "frontpage",
            "analyze",
            "bulk",
            "crawl",
            "batch",
        ] {
            assert_eq!(Endpoint::from(name).as_str(), name);
        }
    }

    #[test]
    fn unknown_name_is_custom() {
        let ep = Endpoint::from("my-custom-api");
        assert_eq!(ep, Endpoint::Custom("my-custom-api".to_string()));
        assert_eq!(ep.to_string(), "my-custom-api");
    }
}
