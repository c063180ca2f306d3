// src/pipeline/score.rs

//! Relevance scoring.
//!
//! Additive, human-auditable scoring: every contribution is an independently
//! capped term over one field of the source, and the weights are plain
//! constants.

use crate::models::{ScoringConfig, Source};

const TITLE_KEYWORD_WEIGHT: f64 = 0.4;
const TITLE_CAP: f64 = 2.5;
const CONTENT_KEYWORD_WEIGHT: f64 = 0.15;
const CONTENT_CAP: f64 = 1.5;
const AUTHORITY_BONUS: f64 = 1.0;
const MAX_SCORE: f64 = 5.0;

/// Pure relevance scorer over fully populated sources.
pub struct RelevanceScorer {
    config: ScoringConfig,
    current_year: u16,
}

impl RelevanceScorer {
    /// Create a scorer anchored at the given current year.
    ///
    /// The year is fixed at construction so `score` stays a pure function
    /// of the source.
    pub fn new(config: ScoringConfig, current_year: u16) -> Self {
        Self {
            config,
            current_year,
        }
    }

    /// Score a source; always in [0.0, 5.0].
    pub fn score(&self, source: &Source) -> f64 {
        let mut score = 0.0;

        // Title keyword matches
        let title_lower = source.title.to_lowercase();
        let title_hits = self
            .config
            .title_keywords
            .iter()
            .filter(|k| title_lower.contains(k.as_str()))
            .count();
        score += (title_hits as f64 * TITLE_KEYWORD_WEIGHT).min(TITLE_CAP);

        // Content phrase matches
        if !source.content.is_empty() {
            let content_lower = source.content.to_lowercase();
            let content_hits = self
                .config
                .content_keywords
                .iter()
                .filter(|k| content_lower.contains(k.as_str()))
                .count();
            score += (content_hits as f64 * CONTENT_KEYWORD_WEIGHT).min(CONTENT_CAP);
        }

        // Source authority: flat bonus, first match wins, no stacking
        let url_lower = source.url.to_lowercase();
        if self
            .config
            .credible_domains
            .iter()
            .any(|d| url_lower.contains(d.as_str()))
        {
            score += AUTHORITY_BONUS;
        }

        // Recency: tiered bonus by publication age
        let age = self.current_year.saturating_sub(source.year);
        score += match age {
            0..=1 => 0.3,
            2 => 0.2,
            3 => 0.1,
            _ => 0.0,
        };

        // Citations: tiered bonus for academic impact
        if let Some(citations) = source.citations {
            score += match citations {
                c if c > 100 => 0.3,
                c if c > 50 => 0.2,
                c if c > 10 => 0.1,
                _ => 0.0,
            };
        }

        score.min(MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, FileType};

    fn scorer() -> RelevanceScorer {
        RelevanceScorer::new(ScoringConfig::default(), 2025)
    }

    fn source(title: &str, url: &str, year: u16) -> Source {
        Source::from_candidate(Candidate {
            title: title.to_string(),
            author: "Penulis".to_string(),
            year,
            url: url.to_string(),
            file_type: FileType::Article,
            source_name: "Test".to_string(),
            citations: None,
        })
    }

    #[test]
    fn score_is_bounded() {
        let mut rich = source(
            "pendidikan vokasi kejuruan digital teknologi akses indonesia smk politeknik \
             edtech pembelajaran keterampilan skills training education",
            "https://www.kemendikbud.go.id/laporan",
            2025,
        );
        rich.content = "smk politeknik edtech pembelajaran digital keterampilan digital \
                        platform pembelajaran industri 4.0 transformasi digital kompetensi \
                        sertifikasi pelatihan kerja akses internet kesenjangan digital \
                        literasi digital"
            .to_string();
        rich.citations = Some(500);

        let score = scorer().score(&rich);
        assert!(score <= 5.0);
        assert!(score >= 0.0);
        assert_eq!(score, 5.0);
    }

    #[test]
    fn score_is_idempotent() {
        let mut s = source(
            "Transformasi digital pendidikan vokasi",
            "https://www.worldbank.org/report",
            2024,
        );
        s.content = "akses internet dan literasi digital di smk".to_string();
        let scorer = scorer();
        assert_eq!(scorer.score(&s), scorer.score(&s));
    }

    #[test]
    fn authority_bonus_does_not_stack() {
        // URL matching two credible substrings still gets a single bonus.
        let single = source("tanpa kata kunci cocok", "https://www.bps.go.id/x", 2010);
        let double = source(
            "tanpa kata kunci cocok",
            "https://scholar.google.com/bps",
            2010,
        );
        let scorer = scorer();
        assert_eq!(scorer.score(&single), 1.0);
        assert_eq!(scorer.score(&double), 1.0);
    }

    #[test]
    fn recency_tiers() {
        let scorer = scorer();
        let base = |year| scorer.score(&source("tanpa kecocokan", "https://x.example", year));
        assert_eq!(base(2025), 0.3);
        assert_eq!(base(2024), 0.3);
        assert_eq!(base(2023), 0.2);
        assert_eq!(base(2022), 0.1);
        assert_eq!(base(2020), 0.0);
    }

    #[test]
    fn citation_tiers() {
        let scorer = scorer();
        let with_citations = |count| {
            let mut s = source("tanpa kecocokan", "https://x.example", 2010);
            s.citations = Some(count);
            scorer.score(&s)
        };
        assert_eq!(with_citations(101), 0.3);
        assert_eq!(with_citations(51), 0.2);
        assert_eq!(with_citations(11), 0.1);
        assert_eq!(with_citations(5), 0.0);
    }

    #[test]
    fn title_contribution_is_capped() {
        // 17 default title keywords; all present would be 6.8 uncapped.
        let s = source(
            "vokasi vocational kejuruan digital teknologi akses inequality indonesia smk \
             politeknik edtech pembelajaran keterampilan skills training education pendidikan",
            "https://x.example",
            2010,
        );
        assert_eq!(scorer().score(&s), 2.5);
    }
}
