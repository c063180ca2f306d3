// src/services/international.rs

//! International organization sources provider.
//!
//! Combines a documents JSON API (World Bank) with keyword search pages
//! (UNESCO, OECD). Layouts and response shapes are brittle; every branch
//! degrades independently.

use std::collections::HashSet;

use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use url::Url;

use crate::models::{Candidate, FileType, HttpConfig};
use crate::utils::{http, resolve};

const WORLDBANK_API: &str =
    "https://documents.worldbank.org/en/publication/documents-reports/api/search";
const UNESCO_BASE: &str = "https://en.unesco.org";
const OECD_BASE: &str = "https://www.oecd.org";

const WORLDBANK_DOC_LIMIT: usize = 5;
const UNESCO_LINK_LIMIT: usize = 15;
const UNESCO_RESULT_LIMIT: usize = 10;
const OECD_LINK_LIMIT: usize = 10;

/// Provider for international organization discovery.
pub struct InternationalProvider<'a> {
    client: &'a Client,
    http: &'a HttpConfig,
}

impl<'a> InternationalProvider<'a> {
    pub fn new(client: &'a Client, http: &'a HttpConfig) -> Self {
        Self { client, http }
    }

    /// Search international sources for reports related to the topic.
    pub async fn search(&self, topic: &str) -> Vec<Candidate> {
        log::info!("Searching international sources for: {}", topic);

        let mut results = Vec::new();
        let mut seen = HashSet::new();

        self.search_worldbank(topic, &mut seen, &mut results).await;
        self.search_unesco(&mut seen, &mut results).await;
        self.search_oecd(topic, &mut seen, &mut results).await;

        log::info!("Found {} results from international sources", results.len());
        results
    }

    async fn search_worldbank(
        &self,
        topic: &str,
        seen: &mut HashSet<String>,
        results: &mut Vec<Candidate>,
    ) {
        let queries = [
            topic,
            "indonesia vocational education",
            "indonesia digital skills",
        ];

        for query in queries {
            let search_url =
                match Url::parse_with_params(WORLDBANK_API, &[("q", query), ("lang", "en")]) {
                    Ok(url) => url,
                    Err(e) => {
                        log::warn!("Failed to build World Bank query URL: {}", e);
                        return;
                    }
                };

            let page = match http::fetch_page(
                self.client,
                search_url.as_str(),
                self.http.search_timeout_secs,
            )
            .await
            {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("World Bank search failed: {}", e);
                    continue;
                }
            };

            if !page.status.is_success() {
                continue;
            }

            let data: Value = match serde_json::from_str(&page.body) {
                Ok(data) => data,
                Err(_) => {
                    log::warn!("Invalid JSON response from World Bank API");
                    continue;
                }
            };

            for doc in documents(&data).iter().take(WORLDBANK_DOC_LIMIT) {
                let title = doc
                    .get("title")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let title_lower = title.to_lowercase();
                if !title_lower.contains("indonesia") && !title_lower.contains("vocational") {
                    continue;
                }

                let url = doc
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                if !url.is_empty() && !seen.insert(url.clone()) {
                    continue;
                }

                results.push(Candidate {
                    title,
                    author: "World Bank".to_string(),
                    year: document_year(doc, 2024),
                    url,
                    file_type: FileType::Report,
                    source_name: "World Bank".to_string(),
                    citations: None,
                });
            }
        }
    }

    async fn search_unesco(&self, seen: &mut HashSet<String>, results: &mut Vec<Candidate>) {
        let keywords = [
            "indonesia education technology",
            "vocational education asia",
            "digital skills training",
        ];

        for keyword in keywords {
            let search_url = match Url::parse_with_params(
                &format!("{UNESCO_BASE}/search"),
                &[("keywords", keyword)],
            ) {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("Failed to build UNESCO query URL: {}", e);
                    return;
                }
            };

            let page = match http::fetch_page(
                self.client,
                search_url.as_str(),
                self.http.search_timeout_secs,
            )
            .await
            {
                Ok(page) => page,
                Err(e) => {
                    log::warn!("UNESCO search failed: {}", e);
                    continue;
                }
            };

            if !page.status.is_success() {
                continue;
            }

            let document = Html::parse_document(&page.body);
            collect_search_links(
                &document,
                UNESCO_BASE,
                UNESCO_LINK_LIMIT,
                |text| {
                    ["indonesia", "vocational", "digital", "education"]
                        .iter()
                        .any(|term| text.contains(term))
                },
                "UNESCO",
                2024,
                seen,
                results,
            );

            if results.len() >= UNESCO_RESULT_LIMIT {
                return;
            }
        }
    }

    async fn search_oecd(
        &self,
        topic: &str,
        seen: &mut HashSet<String>,
        results: &mut Vec<Candidate>,
    ) {
        let query = format!("{topic} indonesia");
        let search_url =
            match Url::parse_with_params(&format!("{OECD_BASE}/search/"), &[("q", query.as_str())])
            {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("Failed to build OECD query URL: {}", e);
                    return;
                }
            };

        let page = match http::fetch_page(
            self.client,
            search_url.as_str(),
            self.http.search_timeout_secs,
        )
        .await
        {
            Ok(page) => page,
            Err(e) => {
                log::warn!("OECD search failed: {}", e);
                return;
            }
        };

        if !page.status.is_success() {
            return;
        }

        let document = Html::parse_document(&page.body);
        collect_search_links(
            &document,
            OECD_BASE,
            OECD_LINK_LIMIT,
            |text| {
                text.contains("indonesia")
                    && ["education", "skill", "digital"]
                        .iter()
                        .any(|term| text.contains(term))
            },
            "OECD",
            2023,
            seen,
            results,
        );
    }
}

/// Documents array of a World Bank API response, if present.
fn documents(data: &Value) -> Vec<&Value> {
    match data.get("documents") {
        Some(Value::Array(docs)) => docs.iter().collect(),
        // Some API revisions key documents by id instead of an array.
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    }
}

/// Publication year of a World Bank document; the field is sometimes a
/// string and sometimes a number.
fn document_year(doc: &Value, default: u16) -> u16 {
    match doc.get("year") {
        Some(Value::Number(n)) => n.as_u64().and_then(|y| u16::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
    .unwrap_or(default)
}

/// Collect relevant links from a search results page.
#[allow(clippy::too_many_arguments)]
fn collect_search_links(
    document: &Html,
    base_url: &str,
    link_limit: usize,
    keep: impl Fn(&str) -> bool,
    source_name: &str,
    year: u16,
    seen: &mut HashSet<String>,
    results: &mut Vec<Candidate>,
) {
    let Ok(link_sel) = Selector::parse("a[href]") else {
        return;
    };

    for link in document.select(&link_sel).take(link_limit) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let text: String = link
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        if text.chars().count() <= 10 || !keep(&text.to_lowercase()) {
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
            year,
            url: full_url,
            file_type: FileType::Report,
            source_name: source_name.to_string(),
            citations: None,
        });
    }
}
