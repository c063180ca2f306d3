// src/services/government.rs

//! Indonesian government sources provider.
//!
//! Probes a handful of publication/statistics listing pages per ministry and
//! keeps links whose text passes the relevance keyword gate.

use std::collections::HashSet;

use reqwest::Client;
use scraper::{Html, Selector};

use crate::models::{Candidate, FileType, HttpConfig};
use crate::utils::{http, resolve};

/// Ministries and statistics agencies probed by this provider.
const GOV_SOURCES: [(&str, &str); 3] = [
    ("BPS", "https://www.bps.go.id"),
    ("Kemendikbud", "https://www.kemdikbud.go.id"),
    ("Kemenaker", "https://www.kemnaker.go.id"),
];

/// Listing endpoints probed on each site.
const ENDPOINTS: [&str; 4] = ["/publication", "/publikasi", "/data", "/statistik"];

/// Links inspected per listing page.
const LINKS_PER_PAGE: usize = 20;

/// Year assumed for undated government publications.
const DEFAULT_YEAR: u16 = 2024;

/// Provider for government report discovery.
pub struct GovernmentProvider<'a> {
    client: &'a Client,
    http: &'a HttpConfig,
    keywords: &'a [String],
    limit: usize,
}

impl<'a> GovernmentProvider<'a> {
    pub fn new(
        client: &'a Client,
        http: &'a HttpConfig,
        keywords: &'a [String],
        limit: usize,
    ) -> Self {
        Self {
            client,
            http,
            keywords,
            limit,
        }
    }

    /// Search government listing pages for relevant publications.
    pub async fn search(&self, topic: &str) -> Vec<Candidate> {
        log::info!("Searching government sources for: {}", topic);

        let mut results = Vec::new();
        let mut seen = HashSet::new();

        'sources: for (source_name, base_url) in GOV_SOURCES {
            for endpoint in ENDPOINTS {
                let listing_url = format!("{base_url}{endpoint}");
                let page = match http::fetch_page(
                    self.client,
                    &listing_url,
                    self.http.search_timeout_secs,
                )
                .await
                {
                    Ok(page) => page,
                    Err(e) => {
                        log::warn!("Failed to fetch {} endpoint {}: {}", source_name, endpoint, e);
                        continue;
                    }
                };

                if !page.status.is_success() {
                    continue;
                }

                let document = Html::parse_document(&page.body);
                self.collect_links(&document, source_name, base_url, &mut seen, &mut results);

                if results.len() >= self.limit {
                    break 'sources;
                }
            }
        }

        log::info!("Found {} results from government sources", results.len());
        results
    }

    /// Keep links whose text passes the relevance keyword gate.
    fn collect_links(
        &self,
        document: &Html,
        source_name: &str,
        base_url: &str,
        seen: &mut HashSet<String>,
        results: &mut Vec<Candidate>,
    ) {
        let Ok(link_sel) = Selector::parse("a[href]") else {
            return;
        };

        for link in document.select(&link_sel).take(LINKS_PER_PAGE) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let text: String = link
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ");
            let text_lower = text.to_lowercase();

            let relevant = self.keywords.iter().any(|k| text_lower.contains(k.as_str()));
            if !relevant || text.chars().count() <= 10 {
                continue;
            }

            let Some(full_url) = resolve(base_url, href) else {
                continue;
            };
            if !seen.insert(full_url.clone()) {
                continue;
            }

            results.push(Candidate {
                title: text,
                author: source_name.to_string(),
                year: DEFAULT_YEAR,
                url: full_url,
                file_type: FileType::Report,
                source_name: source_name.to_string(),
                citations: None,
            });

            if results.len() >= self.limit {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpConfig;

    fn provider_parts() -> (HttpConfig, Vec<String>) {
        (
            HttpConfig::default(),
            vec![
                "vokasi".to_string(),
                "digital".to_string(),
                "pendidikan".to_string(),
            ],
        )
    }

    fn collect(html: &str, limit: usize) -> Vec<Candidate> {
        let (http, keywords) = provider_parts();
        let client = Client::new();
        let provider = GovernmentProvider::new(&client, &http, &keywords, limit);

        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        let mut results = Vec::new();
        provider.collect_links(
            &document,
            "BPS",
            "https://www.bps.go.id",
            &mut seen,
            &mut results,
        );
        results
    }

    const FIXTURE: &str = r#"
        <ul>
            <li><a href="/publikasi/statistik-pendidikan-2024">Statistik Pendidikan Indonesia 2024</a></li>
            <li><a href="/publikasi/vokasi-digital">Laporan Pendidikan Vokasi Digital</a></li>
            <li><a href="/kontak">Kontak</a></li>
            <li><a href="/publikasi/x">digital</a></li>
        </ul>
    "#;

    #[test]
    fn keeps_relevant_links_and_resolves_urls() {
        let results = collect(FIXTURE, 8);
        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].url,
            "https://www.bps.go.id/publikasi/statistik-pendidikan-2024"
        );
        assert_eq!(results[0].author, "BPS");
        assert_eq!(results[0].year, DEFAULT_YEAR);
        assert_eq!(results[0].file_type, FileType::Report);
    }

    #[test]
    fn drops_short_link_text() {
        // "digital" matches a keyword but is under the length gate.
        let results = collect(FIXTURE, 8);
        assert!(results.iter().all(|c| c.title != "digital"));
    }

    #[test]
    fn honors_result_cap() {
        let results = collect(FIXTURE, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn dedupes_repeated_hrefs() {
        let html = r#"
            <a href="/publikasi/a">Laporan vokasi pertama yang relevan</a>
            <a href="/publikasi/a">Laporan vokasi kedua duplikat URL</a>
        "#;
        let results = collect(html, 8);
        assert_eq!(results.len(), 1);
    }
}
