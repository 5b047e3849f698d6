use async_trait::async_trait;
use log::{info, warn};
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::ensure_success;
use crate::config::{Config, REDACTED};
use crate::errors::{PresenterError, Result};
use crate::models::content::ScrapedPage;

/// Fetches a webpage as markdown and/or HTML.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 2],
    only_main_content: bool,
    wait_for: u32,
    timeout: u32,
    remove_base64_images: bool,
    block_ads: bool,
}

impl<'a> ScrapeRequest<'a> {
    fn new(url: &'a str) -> Self {
        Self {
            url,
            formats: ["markdown", "html"],
            only_main_content: true,
            wait_for: 5000,
            timeout: 30000,
            remove_base64_images: true,
            block_ads: true,
        }
    }
}

#[derive(Deserialize)]
struct ScrapeResponse {
    data: Option<ScrapedPage>,
}

/// Client for the Firecrawl scrape endpoint.
#[derive(Clone)]
pub struct FirecrawlClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl fmt::Debug for FirecrawlClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirecrawlClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &REDACTED)
            .finish()
    }
}

impl FirecrawlClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            endpoint: format!("{}/v1/scrape", config.firecrawl_base_url.trim_end_matches('/')),
            api_key: config.firecrawl_api_key.clone(),
        }
    }
}

#[async_trait]
impl PageScraper for FirecrawlClient {
    async fn scrape(&self, url: &str) -> Result<ScrapedPage> {
        if url.trim().is_empty() {
            return Err(PresenterError::InvalidInput("URL cannot be empty".to_string()));
        }
        info!("Scraping webpage content from {}...", url);

        let response = self
            .http
            .post(&self.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&ScrapeRequest::new(url))
            .send()
            .await
            .map_err(PresenterError::Network)?;
        let response = ensure_success(response, "scrape webpage content").await?;

        let bytes = response.bytes().await.map_err(PresenterError::Network)?;
        let parsed: ScrapeResponse = serde_json::from_slice(&bytes)?;
        match parsed.data {
            Some(page) => {
                info!("Scrape response received");
                Ok(page)
            }
            None => {
                warn!("Unexpected scrape response format");
                Err(PresenterError::Extraction(
                    "invalid scrape response structure".to_string(),
                ))
            }
        }
    }
}
