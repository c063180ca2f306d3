// src/services/scholar.rs

//! Academic search provider.
//!
//! Scrapes a scholarly search results page. The page layout is brittle by
//! nature; parse failures degrade to fewer candidates.

use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::{Candidate, FileType, HttpConfig};
use crate::utils::{extract_year, http};

const SCHOLAR_BASE: &str = "https://scholar.google.com/scholar";

/// Year assumed when a result block carries no recognizable year.
const DEFAULT_YEAR: u16 = 2023;

/// Provider for academic article discovery.
pub struct ScholarProvider<'a> {
    client: &'a Client,
    http: &'a HttpConfig,
    limit: usize,
}

impl<'a> ScholarProvider<'a> {
    pub fn new(client: &'a Client, http: &'a HttpConfig, limit: usize) -> Self {
        Self {
            client,
            http,
            limit,
        }
    }

    /// Search for academic articles matching a query within a year range.
    pub async fn search(&self, query: &str, year_bounds: (u16, u16)) -> Vec<Candidate> {
        log::info!("Searching scholar for: {}", query);

        let (from, to) = year_bounds;
        let search_url = match Url::parse_with_params(
            SCHOLAR_BASE,
            &[
                ("q", query),
                ("as_ylo", &from.to_string()),
                ("as_yhi", &to.to_string()),
                ("hl", "en"),
            ],
        ) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("Failed to build scholar query URL: {}", e);
                return Vec::new();
            }
        };

        let page = match http::fetch_page(self.client, search_url.as_str(), self.http.search_timeout_secs)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Scholar search failed for '{}': {}", query, e);
                return Vec::new();
            }
        };

        if !page.status.is_success() {
            log::warn!("Scholar search returned HTTP {} for '{}'", page.status, query);
            return Vec::new();
        }

        let results = parse_results(&Html::parse_document(&page.body), self.limit);
        log::info!("Found {} scholar results for '{}'", results.len(), query);
        results
    }
}

/// Parse candidate records out of a scholar results document.
fn parse_results(document: &Html, limit: usize) -> Vec<Candidate> {
    let Ok(row_sel) = Selector::parse("div.gs_r.gs_or.gs_scl") else {
        return Vec::new();
    };

    document
        .select(&row_sel)
        .take(limit)
        .filter_map(parse_result_row)
        .collect()
}

fn parse_result_row(row: ElementRef) -> Option<Candidate> {
    let title_sel = Selector::parse("h3.gs_rt").ok()?;
    let byline_sel = Selector::parse("div.gs_a").ok()?;
    let footer_sel = Selector::parse("div.gs_fl").ok()?;
    let link_sel = Selector::parse("a").ok()?;

    let title_elem = row.select(&title_sel).next()?;
    let title = flatten_text(title_elem);
    if title.is_empty() {
        return None;
    }

    let url = title_elem
        .select(&link_sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| {
            if href.starts_with("http") {
                href.to_string()
            } else {
                format!("https://scholar.google.com{href}")
            }
        })
        .unwrap_or_default();

    let byline = row
        .select(&byline_sel)
        .next()
        .map(flatten_text)
        .unwrap_or_default();
    let year = extract_year(&byline, DEFAULT_YEAR);
    let author = parse_author(&byline);

    let citations = row
        .select(&footer_sel)
        .next()
        .map(flatten_text)
        .as_deref()
        .and_then(parse_citations);

    Some(Candidate {
        title,
        author,
        year,
        url,
        file_type: FileType::Article,
        source_name: "Google Scholar".to_string(),
        citations,
    })
}

/// Author is the text before the first comma or dash of the byline.
fn parse_author(byline: &str) -> String {
    let author = byline
        .split(',')
        .next()
        .unwrap_or("")
        .split('-')
        .next()
        .unwrap_or("")
        .trim();
    if author.len() < 2 {
        "Unknown Author".to_string()
    } else {
        author.to_string()
    }
}

fn parse_citations(footer: &str) -> Option<u32> {
    let pattern = Regex::new(r"Cited by (\d+)").ok()?;
    pattern
        .captures(footer)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn flatten_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <div class="gs_r gs_or gs_scl">
            <h3 class="gs_rt"><a href="/citations?view=1">Transformasi Digital
            Pendidikan Vokasi</a></h3>
            <div class="gs_a">A Budiman, R Sari - Jurnal Vokasi, 2023 - journal.id</div>
            <div class="gs_fl"><a>Cited by 57</a></div>
        </div>
        <div class="gs_r gs_or gs_scl">
            <h3 class="gs_rt"><a href="https://example.org/paper">Digital Divide
            in Indonesian TVET</a></h3>
            <div class="gs_a">-</div>
        </div>
        <div class="gs_r gs_or gs_scl">
            <div class="gs_a">block without a title</div>
        </div>
    "#;

    #[test]
    fn parses_title_author_year_citations() {
        let document = Html::parse_document(FIXTURE);
        let results = parse_results(&document, 10);
        assert_eq!(results.len(), 2);

        let first = &results[0];
        assert_eq!(first.title, "Transformasi Digital Pendidikan Vokasi");
        assert_eq!(first.author, "A Budiman");
        assert_eq!(first.year, 2023);
        assert_eq!(first.citations, Some(57));
        assert_eq!(first.url, "https://scholar.google.com/citations?view=1");
        assert_eq!(first.file_type, FileType::Article);
    }

    #[test]
    fn falls_back_on_missing_byline_fields() {
        let document = Html::parse_document(FIXTURE);
        let results = parse_results(&document, 10);

        let second = &results[1];
        assert_eq!(second.author, "Unknown Author");
        assert_eq!(second.year, 2023);
        assert_eq!(second.citations, None);
        assert_eq!(second.url, "https://example.org/paper");
    }

    #[test]
    fn respects_result_limit() {
        let document = Html::parse_document(FIXTURE);
        let results = parse_results(&document, 1);
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn parse_citations_requires_number() {
        assert_eq!(parse_citations("Cited by 120"), Some(120));
        assert_eq!(parse_citations("Related articles"), None);
    }
}
