//! Utility functions and helpers.

pub mod cache;
pub mod content;
pub mod http;

use url::Url;

pub use cache::ContentCache;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a URL string against a base URL string.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    Url::parse(base_url)
        .ok()
        .map(|base| resolve_url(&base, href))
}

/// Extract a 2020s publication year from free text.
///
/// Falls back to `default` when no year is present.
pub fn extract_year(text: &str, default: u16) -> u16 {
    let Ok(pattern) = regex::Regex::new(r"20(2[0-5])") else {
        return default;
    };
    pattern
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://example.com/path/").unwrap();
        assert_eq!(
            resolve_url(&base, "page.html"),
            "https://example.com/path/page.html"
        );
        assert_eq!(
            resolve_url(&base, "/root.html"),
            "https://example.com/root.html"
        );
        assert_eq!(
            resolve_url(&base, "https://other.com/x"),
            "https://other.com/x"
        );
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("A Budiman, R Sari - 2023 - journal", 2023), 2023);
        assert_eq!(extract_year("published in 2024", 2023), 2024);
        assert_eq!(extract_year("no year here", 2023), 2023);
        // Outside the 2020s decade window
        assert_eq!(extract_year("from 2019", 2023), 2023);
    }
}
