//! Gemini REST client used by the language-model planner.

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::ensure_success;
use crate::config::{Config, REDACTED};
use crate::errors::{PresenterError, Result};

/// A model that turns a prompt into free text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

/// Concatenates the text parts of the first candidate.
fn extract_text(response: GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    let text: String = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect();
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &REDACTED)
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns `PresenterError::Configuration` if no Gemini key is configured.
    pub fn new(config: &Config, http: reqwest::Client) -> Result<Self> {
        Ok(Self {
            http,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            api_key: config.require_gemini_key()?.to_string(),
            model: config.gemini_model.clone(),
        })
    }

    /// The key travels in a header so it never shows up in URLs or transport errors.
    fn request(&self, prompt: &str) -> reqwest::RequestBuilder {
        let url = format!(
            "{}/v1beta/models/{model}:generateContent",
            self.base_url,
            model = self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        self.http
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!("Sending {} character prompt to {}", prompt.len(), self.model);

        let response = self
            .request(prompt)
            .send()
            .await
            .map_err(|e| PresenterError::Network(e.without_url()))?;
        let response = ensure_success(response, "generate slides with AI").await?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PresenterError::Network(e.without_url()))?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;
        extract_text(parsed).ok_or_else(|| {
            PresenterError::Protocol("language model returned no text".to_string())
        })
    }
}
