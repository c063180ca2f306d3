//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP client behavior settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Discovery and filtering thresholds
    #[serde(default)]
    pub search: SearchConfig,

    /// Relevance scoring weights and domain lists
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Search keyword lists per language
    #[serde(default)]
    pub keywords: KeywordConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        if self.http.search_timeout_secs == 0 {
            return Err(AppError::validation("http.search_timeout_secs must be > 0"));
        }
        if self.search.min_title_len == 0 {
            return Err(AppError::validation("search.min_title_len must be > 0"));
        }
        if self.search.max_content_len == 0 {
            return Err(AppError::validation("search.max_content_len must be > 0"));
        }
        if self.scoring.min_acceptance_score < 0.0 || self.scoring.min_acceptance_score > 5.0 {
            return Err(AppError::validation(
                "scoring.min_acceptance_score must be within 0.0..=5.0",
            ));
        }
        if self.keywords.id.is_empty() && self.keywords.en.is_empty() {
            return Err(AppError::validation("No search keywords defined"));
        }
        if self.keywords.relevance.is_empty() {
            return Err(AppError::validation("No relevance keywords defined"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            search: SearchConfig::default(),
            scoring: ScoringConfig::default(),
            keywords: KeywordConfig::default(),
        }
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Timeout for content fetches in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Shorter timeout for provider search requests
    #[serde(default = "defaults::search_timeout")]
    pub search_timeout_secs: u64,

    /// Delay between sequential requests in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            search_timeout_secs: defaults::search_timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Discovery and candidate filtering thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Minimum title length for a candidate to survive filtering
    #[serde(default = "defaults::min_title_len")]
    pub min_title_len: usize,

    /// Minimum extracted content length for a source to be kept
    #[serde(default = "defaults::min_content_len")]
    pub min_content_len: usize,

    /// Maximum extracted content length (longer text is truncated)
    #[serde(default = "defaults::max_content_len")]
    pub max_content_len: usize,

    /// Maximum candidates per scholar query
    #[serde(default = "defaults::scholar_limit")]
    pub scholar_limit: usize,

    /// Maximum candidates across the government branch
    #[serde(default = "defaults::government_limit")]
    pub government_limit: usize,

    /// Maximum entries in the content cache before eviction
    #[serde(default = "defaults::cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_title_len: defaults::min_title_len(),
            min_content_len: defaults::min_content_len(),
            max_content_len: defaults::max_content_len(),
            scholar_limit: defaults::scholar_limit(),
            government_limit: defaults::government_limit(),
            cache_capacity: defaults::cache_capacity(),
        }
    }
}

/// Relevance scoring weights and domain allow-list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Score a processed source must reach to be retained
    #[serde(default = "defaults::min_acceptance_score")]
    pub min_acceptance_score: f64,

    /// Keywords counted in titles (0.4 each, capped at 2.5)
    #[serde(default = "defaults::title_keywords")]
    pub title_keywords: Vec<String>,

    /// Phrases counted in content (0.15 each, capped at 1.5)
    #[serde(default = "defaults::content_keywords")]
    pub content_keywords: Vec<String>,

    /// URL substrings granting the flat authority bonus
    #[serde(default = "defaults::credible_domains")]
    pub credible_domains: Vec<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_acceptance_score: defaults::min_acceptance_score(),
            title_keywords: defaults::title_keywords(),
            content_keywords: defaults::content_keywords(),
            credible_domains: defaults::credible_domains(),
        }
    }
}

/// Search keyword lists per language plus relevance gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// Indonesian search keywords
    #[serde(default = "defaults::keywords_id")]
    pub id: Vec<String>,

    /// English search keywords
    #[serde(default = "defaults::keywords_en")]
    pub en: Vec<String>,

    /// Keywords used to gate government/summary relevance
    #[serde(default = "defaults::relevance_keywords")]
    pub relevance: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            id: defaults::keywords_id(),
            en: defaults::keywords_en(),
            relevance: defaults::relevance_keywords(),
        }
    }
}

mod defaults {
    // HTTP defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/121.0.0.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        20
    }
    pub fn search_timeout() -> u64 {
        15
    }
    pub fn request_delay() -> u64 {
        500
    }

    // Search defaults
    pub fn min_title_len() -> usize {
        10
    }
    pub fn min_content_len() -> usize {
        50
    }
    pub fn max_content_len() -> usize {
        10_000
    }
    pub fn scholar_limit() -> usize {
        10
    }
    pub fn government_limit() -> usize {
        8
    }
    pub fn cache_capacity() -> usize {
        100
    }

    // Scoring defaults
    pub fn min_acceptance_score() -> f64 {
        1.0
    }
    pub fn title_keywords() -> Vec<String> {
        [
            "vokasi",
            "vocational",
            "kejuruan",
            "digital",
            "teknologi",
            "akses",
            "inequality",
            "indonesia",
            "smk",
            "politeknik",
            "edtech",
            "pembelajaran",
            "keterampilan",
            "skills",
            "training",
            "education",
            "pendidikan",
        ]
        .map(String::from)
        .to_vec()
    }
    pub fn content_keywords() -> Vec<String> {
        [
            "smk",
            "politeknik",
            "edtech",
            "pembelajaran digital",
            "keterampilan digital",
            "platform pembelajaran",
            "industri 4.0",
            "transformasi digital",
            "kompetensi",
            "sertifikasi",
            "pelatihan kerja",
            "akses internet",
            "kesenjangan digital",
            "literasi digital",
        ]
        .map(String::from)
        .to_vec()
    }
    pub fn credible_domains() -> Vec<String> {
        [
            "bps",
            "kemendikbud",
            "kemnaker",
            "worldbank",
            "unesco",
            "scholar.google",
            "oecd",
            "adb",
            "researchgate",
            "ieee",
            "springer",
            "elsevier",
        ]
        .map(String::from)
        .to_vec()
    }

    // Keyword defaults
    pub fn keywords_id() -> Vec<String> {
        [
            "pendidikan vokasi digital indonesia",
            "akses pendidikan kejuruan digital",
            "kesenjangan digital pendidikan indonesia",
            "platform pembelajaran vokasi online",
            "teknologi pendidikan kejuruan",
            "SMK digital transformation",
            "keterampilan digital indonesia",
            "edtech vokasi indonesia",
            "pelatihan kerja digital indonesia",
            "sertifikasi kompetensi digital",
            "pembelajaran jarak jauh SMK",
            "industri 4.0 pendidikan vokasi",
        ]
        .map(String::from)
        .to_vec()
    }
    pub fn keywords_en() -> Vec<String> {
        [
            "digital vocational education indonesia",
            "vocational training access inequality indonesia",
            "digital divide education indonesia",
            "online vocational learning platform",
            "educational technology vocational",
            "digital skills training indonesia",
            "vocational education technology indonesia",
            "indonesia workforce development digital",
            "technical education digital transformation",
            "TVET digital indonesia",
            "vocational education remote learning",
        ]
        .map(String::from)
        .to_vec()
    }
    pub fn relevance_keywords() -> Vec<String> {
        [
            "vokasi",
            "kejuruan",
            "digital",
            "pendidikan",
            "smk",
            "teknologi",
            "keterampilan",
            "pelatihan",
            "kompetensi",
            "industri 4.0",
            "transformasi digital",
        ]
        .map(String::from)
        .to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        let mut config = Config::default();
        config.scoring.min_acceptance_score = 6.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_keywords() {
        let mut config = Config::default();
        config.keywords.id.clear();
        config.keywords.en.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_keywords_cover_both_languages() {
        let config = Config::default();
        assert!(!config.keywords.id.is_empty());
        assert!(!config.keywords.en.is_empty());
    }
}
