// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::error::Result;
use crate::models::HttpConfig;

/// Create a configured asynchronous HTTP client with browser-like headers.
pub fn create_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8",
        ),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// A fetched response body, with enough metadata for the caller to interpret.
#[derive(Debug)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub content_type: String,
    pub body: String,
}

impl FetchedPage {
    pub fn is_pdf(&self) -> bool {
        self.content_type.contains("application/pdf")
    }
}

/// Fetch a page with a per-request timeout.
///
/// Ordinary HTTP error statuses are returned to the caller, not raised;
/// only transport-level failures (timeouts, DNS, TLS) become errors.
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    timeout_secs: u64,
) -> Result<FetchedPage> {
    let response = client
        .get(url)
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();
    let body = response.text().await?;

    Ok(FetchedPage {
        status,
        content_type,
        body,
    })
}
