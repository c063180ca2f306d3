//! Candidate and source data structures.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Document type of a discovered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Article,
    Report,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Article => write!(f, "article"),
            FileType::Report => write!(f, "report"),
        }
    }
}

/// Summary language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Id,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Id => "id",
            Language::En => "en",
        }
    }
}

/// An unprocessed discovery result, before content is fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Candidate {
    /// Document title
    pub title: String,

    /// Author or institution name
    pub author: String,

    /// Publication year
    pub year: u16,

    /// Document URL (dedup key)
    pub url: String,

    /// Document type
    pub file_type: FileType,

    /// Name of the discovery provider that produced this candidate
    pub source_name: String,

    /// Citation count, when the provider exposes one
    #[serde(default)]
    pub citations: Option<u32>,
}

/// Named metrics the data-point extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    PartisipasiSmk,
    PengangguranLulusan,
    AksesInternet,
    JumlahSmk,
    LiterasiDigital,
    PenetrasiTeknologi,
    KesiapanKerja,
}

impl Metric {
    /// All metrics in extraction order.
    pub const ALL: [Metric; 7] = [
        Metric::PartisipasiSmk,
        Metric::PengangguranLulusan,
        Metric::AksesInternet,
        Metric::JumlahSmk,
        Metric::LiterasiDigital,
        Metric::PenetrasiTeknologi,
        Metric::KesiapanKerja,
    ];

    /// Stable snake_case key used in exports.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::PartisipasiSmk => "partisipasi_smk",
            Metric::PengangguranLulusan => "pengangguran_lulusan",
            Metric::AksesInternet => "akses_internet",
            Metric::JumlahSmk => "jumlah_smk",
            Metric::LiterasiDigital => "literasi_digital",
            Metric::PenetrasiTeknologi => "penetrasi_teknologi",
            Metric::KesiapanKerja => "kesiapan_kerja",
        }
    }

    /// Human-readable label for report tables.
    pub fn label(&self) -> String {
        let mut out = String::new();
        for word in self.key().split('_') {
            if !out.is_empty() {
                out.push(' ');
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
        out
    }
}

/// Data points extracted from source content.
///
/// The metric set is fixed, so this is a closed schema rather than a
/// free-form mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedData {
    /// Percentage values found anywhere in the content (capped)
    #[serde(default)]
    pub percentages: Vec<String>,

    /// Bare numbers found anywhere in the content (capped)
    #[serde(default)]
    pub numbers: Vec<String>,

    /// Distinct 2020s years mentioned, sorted
    #[serde(default)]
    pub years_mentioned: Vec<String>,

    /// Percentage-valued growth/decline phrases (capped)
    #[serde(default)]
    pub growth_indicators: Vec<String>,

    /// First-match value per named metric
    #[serde(default)]
    pub metrics: BTreeMap<Metric, String>,
}

impl ExtractedData {
    /// Whether any data point was found.
    pub fn is_empty(&self) -> bool {
        self.percentages.is_empty()
            && self.numbers.is_empty()
            && self.years_mentioned.is_empty()
            && self.growth_indicators.is_empty()
            && self.metrics.is_empty()
    }

    /// Number of populated data-point groups, for run statistics.
    pub fn group_count(&self) -> usize {
        [
            !self.percentages.is_empty(),
            !self.numbers.is_empty(),
            !self.years_mentioned.is_empty(),
            !self.growth_indicators.is_empty(),
        ]
        .iter()
        .filter(|b| **b)
        .count()
            + self.metrics.len()
    }
}

/// A fully processed, scored research source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Source {
    /// Document title
    pub title: String,

    /// Author or institution name
    pub author: String,

    /// Publication year
    pub year: u16,

    /// Document URL (unique across the final collection)
    pub url: String,

    /// Document type
    pub file_type: FileType,

    /// Generated extractive summary
    pub summary: String,

    /// Data points extracted from content
    pub extracted_data: ExtractedData,

    /// Relevance score in [0.0, 5.0]
    pub relevance_score: f64,

    /// Extracted text content, size-bounded
    pub content: String,

    /// Citation count, when known
    pub citations: Option<u32>,
}

impl Source {
    /// Create an empty-bodied source from a discovery candidate.
    pub fn from_candidate(candidate: Candidate) -> Self {
        Self {
            title: candidate.title,
            author: candidate.author,
            year: candidate.year,
            url: candidate.url,
            file_type: candidate.file_type,
            summary: String::new(),
            extracted_data: ExtractedData::default(),
            relevance_score: 0.0,
            content: String::new(),
            citations: candidate.citations,
        }
    }

    /// Coarse author category based on the URL, for distribution breakdowns.
    pub fn author_category(&self) -> &'static str {
        let url = self.url.to_lowercase();
        // "kemdikbud" also matches the older kemendikbud.go.id domain.
        if ["bps.go.id", "kemdikbud", "kemnaker"]
            .iter()
            .any(|g| url.contains(g))
        {
            "government"
        } else if ["worldbank", "unesco", "oecd"].iter().any(|i| url.contains(i)) {
            "international"
        } else {
            "academic"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_candidate() -> Candidate {
        Candidate {
            title: "Transformasi Digital SMK".to_string(),
            author: "Kemendikbud".to_string(),
            year: 2024,
            url: "https://www.kemdikbud.go.id/laporan/1".to_string(),
            file_type: FileType::Report,
            source_name: "Kemendikbud".to_string(),
            citations: None,
        }
    }

    #[test]
    fn from_candidate_starts_empty_bodied() {
        let source = Source::from_candidate(sample_candidate());
        assert!(source.content.is_empty());
        assert!(source.summary.is_empty());
        assert_eq!(source.relevance_score, 0.0);
        assert!(source.extracted_data.is_empty());
    }

    #[test]
    fn author_category_buckets_by_url() {
        let mut source = Source::from_candidate(sample_candidate());
        assert_eq!(source.author_category(), "government");

        source.url = "https://www.worldbank.org/report".to_string();
        assert_eq!(source.author_category(), "international");

        source.url = "https://scholar.google.com/abc".to_string();
        assert_eq!(source.author_category(), "academic");
    }

    #[test]
    fn metric_labels_are_title_cased() {
        assert_eq!(Metric::AksesInternet.label(), "Akses Internet");
        assert_eq!(Metric::JumlahSmk.label(), "Jumlah Smk");
    }

    #[test]
    fn file_type_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&FileType::Article).unwrap(),
            "\"article\""
        );
    }
}
