// src/pipeline/research.rs

//! Research run orchestration.
//!
//! topic -> discovery (3 providers) -> dedup/filter -> processing ->
//! ranking -> (sources, stats).

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};

use crate::error::Result;
use crate::models::{Config, RunRequest, RunStats, Source};
use crate::pipeline::dedup::filter_candidates;
use crate::pipeline::process::SourceProcessor;
use crate::pipeline::registry::UrlRegistry;
use crate::services::{GovernmentProvider, InternationalProvider, ScholarProvider};
use crate::utils::{ContentCache, http};

/// Scholar keyword mix: first six Indonesian, first four English.
const SCHOLAR_KEYWORDS_ID: usize = 6;
const SCHOLAR_KEYWORDS_EN: usize = 4;

/// Delay between scholar queries, to stay polite.
const SCHOLAR_QUERY_DELAY: Duration = Duration::from_millis(1500);

/// Fallback year bounds when the request carries an unparsable range.
const DEFAULT_YEAR_BOUNDS: (u16, u16) = (2021, 2025);

/// Execute a full research run.
///
/// Per-provider and per-candidate failures never abort the run; the only
/// errors propagated are orchestration-level ones (client construction).
pub async fn run_research(config: &Config, request: &RunRequest) -> Result<(Vec<Source>, RunStats)> {
    let start_time = Utc::now();
    log::info!("Starting comprehensive search for topic: {}", request.topic);
    log::info!(
        "Target sources: {}, parallel: {}",
        request.max_sources,
        request.parallel
    );

    let client = http::create_client(&config.http)?;
    let registry = Arc::new(UrlRegistry::new());
    let cache = Arc::new(ContentCache::new(config.search.cache_capacity));

    let year_bounds = request.year_bounds().unwrap_or_else(|| {
        log::warn!(
            "Invalid year range '{}', using {}-{}",
            request.year_range,
            DEFAULT_YEAR_BOUNDS.0,
            DEFAULT_YEAR_BOUNDS.1
        );
        DEFAULT_YEAR_BOUNDS
    });

    // Discovery: academic branch
    let mut candidates = Vec::new();
    let scholar = ScholarProvider::new(&client, &config.http, config.search.scholar_limit);
    let scholar_keywords = config
        .keywords
        .id
        .iter()
        .take(SCHOLAR_KEYWORDS_ID)
        .chain(config.keywords.en.iter().take(SCHOLAR_KEYWORDS_EN));

    for keyword in scholar_keywords {
        let query = format!("{} {}", keyword, request.topic);
        candidates.extend(scholar.search(&query, year_bounds).await);

        if candidates.len() >= request.max_sources * 2 {
            break;
        }
        tokio::time::sleep(SCHOLAR_QUERY_DELAY).await;
    }

    // Discovery: government and international branches
    let government = GovernmentProvider::new(
        &client,
        &config.http,
        &config.keywords.relevance,
        config.search.government_limit,
    );
    candidates.extend(government.search(&request.topic).await);

    let international = InternationalProvider::new(&client, &config.http);
    candidates.extend(international.search(&request.topic).await);

    let candidate_count = candidates.len();
    let unique = filter_candidates(candidates, config.search.min_title_len, request.max_sources);
    let unique_count = unique.len();
    log::info!("Found {} unique candidates for processing", unique_count);

    // Processing
    let current_year = Utc::now().year().clamp(0, u16::MAX as i32) as u16;
    let processor = SourceProcessor::new(
        client,
        config.clone(),
        request.language,
        Arc::clone(&registry),
        Arc::clone(&cache),
        current_year,
    );
    let mut sources = processor.process_all(unique, request).await;

    rank_sources(&mut sources, request.max_sources);

    let scores: Vec<f64> = sources.iter().map(|s| s.relevance_score).collect();
    let (average_score, max_score, min_score) = RunStats::score_summary(&scores);
    if !sources.is_empty() {
        log::info!(
            "Quality metrics - Avg: {:.2}, Max: {:.2}, Min: {:.2}",
            average_score,
            max_score,
            min_score
        );
    }

    let stats = RunStats {
        start_time,
        end_time: Utc::now(),
        candidate_count,
        unique_count,
        source_count: sources.len(),
        processed_url_count: registry.len(),
        cache_size: cache.len(),
        average_score,
        max_score,
        min_score,
    };

    log::info!("Successfully processed {} high-quality sources", sources.len());
    Ok((sources, stats))
}

/// Sort by descending relevance score (stable) and truncate to the target.
pub fn rank_sources(sources: &mut Vec<Source>, max_sources: usize) {
    sources.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    sources.truncate(max_sources);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, FileType};
    use crate::pipeline::dedup::filter_candidates;

    fn source(title: &str, url: &str, score: f64) -> Source {
        let mut source = Source::from_candidate(Candidate {
            title: title.to_string(),
            author: "Penulis Uji".to_string(),
            year: 2024,
            url: url.to_string(),
            file_type: FileType::Article,
            source_name: "Test".to_string(),
            citations: None,
        });
        source.relevance_score = score;
        source
    }

    #[test]
    fn rank_sorts_non_increasing_and_truncates() {
        let mut sources = vec![
            source("Sumber dengan skor sedang", "https://1", 2.0),
            source("Sumber dengan skor tinggi", "https://2", 4.5),
            source("Sumber dengan skor rendah", "https://3", 1.1),
            source("Sumber dengan skor teratas", "https://4", 5.0),
        ];
        rank_sources(&mut sources, 3);

        assert_eq!(sources.len(), 3);
        for pair in sources.windows(2) {
            assert!(pair[0].relevance_score >= pair[1].relevance_score);
        }
        assert_eq!(sources[0].url, "https://4");
    }

    #[test]
    fn rank_is_stable_for_equal_scores() {
        let mut sources = vec![
            source("Skor sama, lebih dulu ditemukan", "https://1", 3.0),
            source("Skor sama, ditemukan kemudian", "https://2", 3.0),
        ];
        rank_sources(&mut sources, 10);
        assert_eq!(sources[0].url, "https://1");
    }

    // Two providers returning overlapping URLs must still yield a bounded,
    // duplicate-free collection with populated titles and authors.
    #[test]
    fn overlapping_providers_stay_bounded_and_unique() {
        let max_sources = 8;
        let mut candidates = Vec::new();
        for i in 0..10 {
            candidates.push(Candidate {
                title: format!("Pendidikan vokasi digital indonesia {i}"),
                author: "Google Scholar Author".to_string(),
                year: 2024,
                url: format!("https://shared.example/{i}"),
                file_type: FileType::Article,
                source_name: "Google Scholar".to_string(),
                citations: None,
            });
            // Second provider reports the same URLs.
            candidates.push(Candidate {
                title: format!("Laporan vokasi digital indonesia {i}"),
                author: "Kemendikbud".to_string(),
                year: 2024,
                url: format!("https://shared.example/{i}"),
                file_type: FileType::Report,
                source_name: "Kemendikbud".to_string(),
                citations: None,
            });
        }

        let unique = filter_candidates(candidates, 10, max_sources);
        let mut sources: Vec<Source> = unique
            .into_iter()
            .map(|c| {
                let mut s = Source::from_candidate(c);
                s.relevance_score = 2.0;
                s
            })
            .collect();
        rank_sources(&mut sources, max_sources);

        assert!(sources.len() <= max_sources);
        let urls: std::collections::HashSet<_> =
            sources.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls.len(), sources.len());
        for s in &sources {
            assert!(!s.title.is_empty());
            assert!(!s.author.is_empty());
        }
    }
}
