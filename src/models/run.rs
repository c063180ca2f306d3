//! Run parameters and statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Language;

/// Parameters for one research run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// Research topic
    pub topic: String,

    /// Year range filter in "YYYY-YYYY" form
    pub year_range: String,

    /// Maximum number of sources to retain
    pub max_sources: usize,

    /// Summary language
    pub language: Language,

    /// Whether candidates are processed on a worker pool
    pub parallel: bool,

    /// Worker count for parallel processing
    pub workers: usize,
}

impl RunRequest {
    /// Parse the year range into (from, to) bounds.
    ///
    /// Returns None when the string is not two dash-separated years.
    pub fn year_bounds(&self) -> Option<(u16, u16)> {
        let (from, to) = self.year_range.split_once('-')?;
        let from: u16 = from.trim().parse().ok()?;
        let to: u16 = to.trim().parse().ok()?;
        if from > to {
            return None;
        }
        Some((from, to))
    }
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            topic: "akses pendidikan vokasi di Indonesia".to_string(),
            year_range: "2021-2025".to_string(),
            max_sources: 25,
            language: Language::Id,
            // The processor defaults to the worker pool; `--sequential`
            // turns it off.
            parallel: true,
            workers: 4,
        }
    }
}

/// Statistics for a completed run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,

    /// Raw candidates produced by all providers
    pub candidate_count: usize,

    /// Candidates surviving dedup/filtering
    pub unique_count: usize,

    /// Sources retained in the final collection
    pub source_count: usize,

    /// URLs claimed during processing
    pub processed_url_count: usize,

    /// Entries left in the content cache
    pub cache_size: usize,

    pub average_score: f64,
    pub max_score: f64,
    pub min_score: f64,
}

impl RunStats {
    /// Compute score aggregates over the final collection.
    pub fn score_summary(scores: &[f64]) -> (f64, f64, f64) {
        if scores.is_empty() {
            return (0.0, 0.0, 0.0);
        }
        let sum: f64 = scores.iter().sum();
        let max = scores.iter().cloned().fold(f64::MIN, f64::max);
        let min = scores.iter().cloned().fold(f64::MAX, f64::min);
        (sum / scores.len() as f64, max, min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_bounds_parses_valid_range() {
        let request = RunRequest {
            year_range: "2021-2025".to_string(),
            ..RunRequest::default()
        };
        assert_eq!(request.year_bounds(), Some((2021, 2025)));
    }

    #[test]
    fn year_bounds_rejects_inverted_range() {
        let request = RunRequest {
            year_range: "2025-2021".to_string(),
            ..RunRequest::default()
        };
        assert_eq!(request.year_bounds(), None);
    }

    #[test]
    fn year_bounds_rejects_garbage() {
        let request = RunRequest {
            year_range: "recent".to_string(),
            ..RunRequest::default()
        };
        assert_eq!(request.year_bounds(), None);
    }

    // The original tool forced parallel mode on regardless of the CLI flag;
    // here the default stays on but an explicit override must stick.
    #[test]
    fn parallel_defaults_on_and_override_sticks() {
        assert!(RunRequest::default().parallel);
        let request = RunRequest {
            parallel: false,
            ..RunRequest::default()
        };
        assert!(!request.parallel);
    }

    #[test]
    fn score_summary_handles_empty() {
        assert_eq!(RunStats::score_summary(&[]), (0.0, 0.0, 0.0));
        let (avg, max, min) = RunStats::score_summary(&[1.0, 2.0, 3.0]);
        assert!((avg - 2.0).abs() < f64::EPSILON);
        assert_eq!(max, 3.0);
        assert_eq!(min, 1.0);
    }
}
