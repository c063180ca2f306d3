// src/pipeline/extract.rs

//! Data-point extraction.
//!
//! Regex-pattern tables mapping named metrics to first-match values, plus
//! generic percentage/number/year/growth extraction. Patterns cover
//! Indonesian and English phrasings of the same metric.

use std::collections::BTreeSet;

use regex::Regex;

use crate::models::{ExtractedData, Metric};

const MAX_PERCENTAGES: usize = 8;
const MAX_NUMBERS: usize = 15;
const MAX_GROWTH_INDICATORS: usize = 3;

/// Ordered candidate patterns per metric. For each metric the first pattern
/// that matches wins; later patterns are not tried.
const METRIC_PATTERNS: [(Metric, &[&str]); 7] = [
    (
        Metric::PartisipasiSmk,
        &[
            r"partisipasi\s+smk[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"enrollment\s+rate[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"tingkat\s+partisipasi[^0-9]*(\d+(?:\.\d+)?)\s*%",
        ],
    ),
    (
        Metric::PengangguranLulusan,
        &[
            r"pengangguran\s+lulusan[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"unemployment\s+rate[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"tingkat\s+pengangguran[^0-9]*(\d+(?:\.\d+)?)\s*%",
        ],
    ),
    (
        Metric::AksesInternet,
        &[
            r"akses\s+internet[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"internet\s+penetration[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"konektivitas[^0-9]*(\d+(?:\.\d+)?)\s*%",
        ],
    ),
    (
        Metric::JumlahSmk,
        &[
            r"smk\s+sebanyak[^0-9]*(\d+(?:[.,]\d{3})*)",
            r"(\d+(?:[.,]\d{3})*)\s+smk",
            r"sekolah\s+menengah\s+kejuruan[^0-9]*(\d+(?:[.,]\d{3})*)",
        ],
    ),
    (
        Metric::LiterasiDigital,
        &[
            r"literasi\s+digital[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"digital\s+literacy[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"kemampuan\s+digital[^0-9]*(\d+(?:\.\d+)?)\s*%",
        ],
    ),
    (
        Metric::PenetrasiTeknologi,
        &[
            r"penetrasi\s+teknologi[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"technology\s+adoption[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"adopsi\s+teknologi[^0-9]*(\d+(?:\.\d+)?)\s*%",
        ],
    ),
    (
        Metric::KesiapanKerja,
        &[
            r"kesiapan\s+kerja[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"job\s+readiness[^0-9]*(\d+(?:\.\d+)?)\s*%",
            r"work\s+readiness[^0-9]*(\d+(?:\.\d+)?)\s*%",
        ],
    ),
];

const GROWTH_PATTERNS: [&str; 5] = [
    r"meningkat\s+(\d+(?:\.\d+)?)\s*%",
    r"turun\s+(\d+(?:\.\d+)?)\s*%",
    r"naik\s+(\d+(?:\.\d+)?)\s*%",
    r"increase(?:d)?\s+by\s+(\d+(?:\.\d+)?)\s*%",
    r"decrease(?:d)?\s+by\s+(\d+(?:\.\d+)?)\s*%",
];

/// Extractor with its pattern tables compiled once.
pub struct DataPointExtractor {
    percentage: Regex,
    number: Regex,
    year: Regex,
    metrics: Vec<(Metric, Vec<Regex>)>,
    growth: Vec<Regex>,
}

impl DataPointExtractor {
    pub fn new() -> Self {
        let compile = |p: &str| Regex::new(p).expect("invalid extraction pattern");

        Self {
            percentage: compile(r"(\d+(?:\.\d+)?)\s*%"),
            number: compile(r"\b(\d{1,3}(?:[.,]\d{3})*(?:[.,]\d+)?)\b"),
            year: compile(r"\b(20(?:2[0-5]))\b"),
            metrics: METRIC_PATTERNS
                .iter()
                .map(|(metric, patterns)| (*metric, patterns.iter().map(|p| compile(p)).collect()))
                .collect(),
            growth: GROWTH_PATTERNS.iter().map(|p| compile(p)).collect(),
        }
    }

    /// Extract data points from source content. Pure: fixed content always
    /// yields the same values.
    pub fn extract(&self, content: &str) -> ExtractedData {
        let content_lower = content.to_lowercase();
        let mut data = ExtractedData::default();

        data.percentages = self
            .percentage
            .captures_iter(&content_lower)
            .take(MAX_PERCENTAGES)
            .map(|caps| caps[1].to_string())
            .collect();

        data.numbers = self
            .number
            .captures_iter(&content_lower)
            .take(MAX_NUMBERS)
            .map(|caps| caps[1].to_string())
            .collect();

        for (metric, patterns) in &self.metrics {
            for pattern in patterns {
                if let Some(caps) = pattern.captures(&content_lower) {
                    data.metrics.insert(*metric, caps[1].to_string());
                    break;
                }
            }
        }

        let years: BTreeSet<String> = self
            .year
            .captures_iter(&content_lower)
            .map(|caps| caps[1].to_string())
            .collect();
        data.years_mentioned = years.into_iter().collect();

        let mut growth = Vec::new();
        for pattern in &self.growth {
            for caps in pattern.captures_iter(&content_lower) {
                growth.push(caps[1].to_string());
            }
        }
        growth.truncate(MAX_GROWTH_INDICATORS);
        data.growth_indicators = growth;

        data
    }
}

impl Default for DataPointExtractor {
    fn default() -> Self {
        Self::new()
    }
}
