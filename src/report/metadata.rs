// src/report/metadata.rs

//! Run metadata (JSON) and the plain-text research summary.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{Value, json};

use crate::models::{Config, Language, RunRequest, RunStats, Source};
use crate::report::quality_buckets;

/// Build the comprehensive metadata document for a completed run.
pub fn build(
    config: &Config,
    request: &RunRequest,
    sources: &[Source],
    stats: &RunStats,
) -> Value {
    let mut meta = json!({
        "research_info": {
            "date": stats.end_time.to_rfc3339(),
            "version": "2.0",
            "platform": "LUMIRA Research Assistant",
            "processing_mode": if request.parallel { "parallel" } else { "sequential" },
            "max_workers": if request.parallel { request.workers } else { 1 },
        },
        "search_parameters": {
            "topic": request.topic,
            "year_range": request.year_range,
            "target_sources": request.max_sources,
            "actual_sources_found": sources.len(),
            "language": request.language.as_str(),
            "search_keywords_id": config.keywords.id,
            "search_keywords_en": config.keywords.en,
        },
        "quality_metrics": {},
        "source_distribution": {
            "by_type": {},
            "by_year": {},
            "by_author_type": {},
            "by_relevance_range": {},
        },
        "content_analysis": {
            "total_content_length": 0,
            "average_content_length": 0.0,
            "sources_with_content": 0,
            "sources_with_data": 0,
            "total_extracted_metrics": 0,
            "data_extraction_success_rate": 0.0,
        },
        "processing_statistics": {
            "parallel_processing_enabled": request.parallel,
            "candidate_count": stats.candidate_count,
            "unique_candidate_count": stats.unique_count,
            "processed_urls_count": stats.processed_url_count,
            "cache_size": stats.cache_size,
            "started_at": stats.start_time.to_rfc3339(),
            "finished_at": stats.end_time.to_rfc3339(),
        },
    });

    if !sources.is_empty() {
        let (high, medium, low) = quality_buckets(sources);
        meta["quality_metrics"] = json!({
            "average_relevance_score": stats.average_score,
            "highest_score": stats.max_score,
            "lowest_score": stats.min_score,
            "median_score": median_score(sources),
            "high_quality_sources": high,
            "medium_quality_sources": medium,
            "low_quality_sources": low,
        });
        meta["source_distribution"] = source_distribution(sources);
        meta["content_analysis"] = content_analysis(sources);
    }

    meta
}

fn median_score(sources: &[Source]) -> f64 {
    let mut scores: Vec<f64> = sources.iter().map(|s| s.relevance_score).collect();
    scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    scores[scores.len() / 2]
}

fn source_distribution(sources: &[Source]) -> Value {
    let mut by_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_year: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_author_type: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_relevance_range: BTreeMap<String, usize> = BTreeMap::new();

    for source in sources {
        *by_type.entry(source.file_type.to_string()).or_default() += 1;
        *by_year.entry(source.year.to_string()).or_default() += 1;
        *by_author_type
            .entry(source.author_category().to_string())
            .or_default() += 1;

        let floor = source.relevance_score.floor() as i64;
        *by_relevance_range
            .entry(format!("{}-{}", floor, floor + 1))
            .or_default() += 1;
    }

    json!({
        "by_type": by_type,
        "by_year": by_year,
        "by_author_type": by_author_type,
        "by_relevance_range": by_relevance_range,
    })
}

fn content_analysis(sources: &[Source]) -> Value {
    let content_lengths: Vec<usize> = sources
        .iter()
        .filter(|s| !s.content.is_empty())
        .map(|s| s.content.chars().count())
        .collect();
    let total: usize = content_lengths.iter().sum();
    let average = if content_lengths.is_empty() {
        0.0
    } else {
        total as f64 / content_lengths.len() as f64
    };

    let sources_with_data = sources
        .iter()
        .filter(|s| !s.extracted_data.is_empty())
        .count();
    let total_metrics: usize = sources.iter().map(|s| s.extracted_data.group_count()).sum();

    json!({
        "total_content_length": total,
        "average_content_length": average,
        "sources_with_content": content_lengths.len(),
        "sources_with_data": sources_with_data,
        "total_extracted_metrics": total_metrics,
        "data_extraction_success_rate": sources_with_data as f64 / sources.len() as f64,
    })
}

/// Render the short plain-text summary saved alongside the metadata.
pub fn render_summary(request: &RunRequest, sources: &[Source], stats: &RunStats) -> String {
    let mut out = String::new();
    out.push_str("RINGKASAN PENELITIAN LUMIRA\n");
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");
    out.push_str(&format!(
        "Tanggal: {}\n",
        Utc::now().format("%d %B %Y %H:%M")
    ));
    out.push_str(&format!("Topik: {}\n", request.topic));
    out.push_str(&format!("Total sumber dianalisis: {}\n", sources.len()));

    if !sources.is_empty() {
        let (high, _, _) = quality_buckets(sources);
        out.push_str(&format!(
            "Rata-rata skor relevansi: {:.2}/5.0\n",
            stats.average_score
        ));
        out.push_str(&format!("Sumber kualitas tinggi: {high}\n"));
    }

    out.push_str(&format!(
        "Mode pemrosesan: {}\n",
        if request.parallel { "Paralel" } else { "Sequential" }
    ));
    out.push_str(&format!(
        "Bahasa ringkasan: {}\n",
        match request.language {
            Language::Id => "Indonesia",
            Language::En => "English",
        }
    ));

    out
}
