// src/pipeline/process.rs

//! Candidate processing.
//!
//! Each candidate is fetched, summarized, mined for data points, and scored
//! independently; workers share only the URL registry and the content cache.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;

use crate::models::{Candidate, Config, Language, RunRequest, Source};
use crate::pipeline::extract::DataPointExtractor;
use crate::pipeline::registry::UrlRegistry;
use crate::pipeline::score::RelevanceScorer;
use crate::pipeline::summarize::Summarizer;
use crate::utils::{ContentCache, content, http};

/// Candidate count below which the worker pool is not worth spinning up.
const PARALLEL_THRESHOLD: usize = 5;

/// Placeholder body for PDF responses; always below the content gate.
const PDF_PLACEHOLDER: &str = "PDF document - content extraction not implemented";

/// Processes candidates into scored sources.
pub struct SourceProcessor {
    client: Client,
    config: Config,
    registry: Arc<UrlRegistry>,
    cache: Arc<ContentCache>,
    summarizer: Summarizer,
    extractor: DataPointExtractor,
    scorer: RelevanceScorer,
}

impl SourceProcessor {
    pub fn new(
        client: Client,
        config: Config,
        language: Language,
        registry: Arc<UrlRegistry>,
        cache: Arc<ContentCache>,
        current_year: u16,
    ) -> Self {
        let summarizer = Summarizer::new(config.keywords.relevance.clone(), language);
        let scorer = RelevanceScorer::new(config.scoring.clone(), current_year);

        Self {
            client,
            config,
            registry,
            cache,
            summarizer,
            extractor: DataPointExtractor::new(),
            scorer,
        }
    }

    /// Process all candidates, either on a bounded worker pool or
    /// sequentially.
    ///
    /// Results are collected in completion order; once `max_sources` are
    /// accepted, remaining completions are discarded (in-flight work is not
    /// cancelled). Final ordering is imposed later by the ranking sort.
    pub async fn process_all(&self, candidates: Vec<Candidate>, request: &RunRequest) -> Vec<Source> {
        let max_sources = request.max_sources;
        let mut sources = Vec::new();

        if request.parallel && candidates.len() > PARALLEL_THRESHOLD {
            let workers = request.workers.max(1);
            log::info!("Processing {} candidates with {} workers", candidates.len(), workers);

            let mut results = stream::iter(candidates)
                .map(|candidate| self.process_one(candidate))
                .buffer_unordered(workers);

            while let Some(result) = results.next().await {
                if let Some(source) = result {
                    if sources.len() < max_sources {
                        sources.push(source);
                    } else {
                        log::debug!("Target source count reached, discarding completion");
                    }
                }
            }
        } else {
            log::info!("Processing {} candidates sequentially", candidates.len());
            let delay = Duration::from_millis(self.config.http.request_delay_ms);

            for candidate in candidates {
                if sources.len() >= max_sources {
                    break;
                }
                if let Some(source) = self.process_one(candidate).await {
                    sources.push(source);
                }
                if delay.as_millis() > 0 {
                    tokio::time::sleep(delay).await;
                }
            }
        }

        sources
    }

    /// Process a single candidate: claim, fetch, summarize, extract, score.
    async fn process_one(&self, candidate: Candidate) -> Option<Source> {
        if !self.registry.claim(&candidate.url) {
            log::debug!("URL already claimed, skipping: {}", candidate.url);
            return None;
        }

        let preview: String = candidate.title.chars().take(60).collect();
        log::info!("Processing: {}...", preview);

        let content = self.fetch_content(&candidate.url).await;
        self.build_source(candidate, content)
    }

    /// Fetch and extract content for a URL, consulting the shared cache.
    async fn fetch_content(&self, url: &str) -> String {
        if let Some(cached) = self.cache.get(url) {
            return cached;
        }

        let page = match http::fetch_page(&self.client, url, self.config.http.timeout_secs).await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Error fetching content from {}: {}", url, e);
                return String::new();
            }
        };

        if page.is_pdf() {
            log::info!("PDF detected for {}, skipping content extraction", url);
            return PDF_PLACEHOLDER.to_string();
        }
        if !page.status.is_success() {
            log::warn!("Content fetch returned HTTP {} for {}", page.status, url);
            return String::new();
        }

        let text = content::extract_text(&page.body, self.config.search.max_content_len);
        self.cache.insert(url, &text);
        text
    }

    /// Enrich a candidate into a source, applying the content-length and
    /// acceptance-score gates. Pure given the fetched content.
    fn build_source(&self, candidate: Candidate, content: String) -> Option<Source> {
        if content.trim().chars().count() <= self.config.search.min_content_len {
            return None;
        }

        let mut source = Source::from_candidate(candidate);
        source.content = content;
        source.summary = self.summarizer.summarize(&source.content, &source.title);
        source.extracted_data = self.extractor.extract(&source.content);
        source.relevance_score = self.scorer.score(&source);

        if source.relevance_score < self.config.scoring.min_acceptance_score {
            log::debug!(
                "Dropping '{}': score {:.2} below acceptance threshold",
                source.title,
                source.relevance_score
            );
            return None;
        }

        Some(source)
    }
}
