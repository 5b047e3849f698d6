use async_trait::async_trait;
use log::{error, info};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Response;
use serde::Deserialize;

use crate::config::Config;
use crate::errors::{PresenterError, Result};
use crate::models::api::{
    CreatePresentationRequest, CreateSlideRequest, CreateVariantRequest, CreatedPresentation,
    CreatedVariant, SetActiveVariantRequest, SharePresentationRequest,
};
use crate::models::element::ElementSlideVariant;

/// Helper struct to pull a message out of common JSON error bodies.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum ApiErrorBody {
    Nested { error: ApiErrorDetail },
    Detail { detail: serde_json::Value },
    Message { message: String },
}

#[derive(Deserialize, Debug)]
struct ApiErrorDetail {
    message: String,
}

/// Passes successful responses through; turns anything else into `RemoteCall`.
///
/// The status and raw body are logged before the error is returned.
pub(crate) async fn ensure_success(response: Response, action: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.map_err(PresenterError::Network)?;
    error!("Failed to {}: status {}", action, status);
    error!("Response data: {}", error_text);

    let message = match serde_json::from_str::<ApiErrorBody>(&error_text) {
        Ok(ApiErrorBody::Nested { error }) => error.message,
        Ok(ApiErrorBody::Detail { detail }) => match detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        },
        Ok(ApiErrorBody::Message { message }) => message,
        Err(_) => error_text,
    };
    Err(PresenterError::RemoteCall {
        action: action.to_string(),
        status,
        message,
    })
}

/// The remote calls needed to build and publish a presentation.
///
/// Every call carries the bearer token of the current run.
#[async_trait]
pub trait PresentationService: Send + Sync {
    async fn create_presentation(
        &self,
        token: &str,
        request: &CreatePresentationRequest,
    ) -> Result<CreatedPresentation>;

    async fn create_slide(&self, token: &str, request: &CreateSlideRequest) -> Result<()>;

    /// Submits an element grid as a new variant of `slide_id`; returns the variant id.
    async fn create_variant(
        &self,
        token: &str,
        slide_id: &str,
        variant: &ElementSlideVariant,
    ) -> Result<String>;

    /// Makes `variant_id` the displayed variant of `slide_id`.
    async fn set_active_variant(&self, token: &str, slide_id: &str, variant_id: &str)
        -> Result<()>;

    /// Publishes the presentation and returns its public URL.
    async fn share_presentation(&self, token: &str, presentation_id: &str) -> Result<String>;
}

/// REST client for the Alai presentation backend.
#[derive(Debug, Clone)]
pub struct AlaiClient {
    http: reqwest::Client,
    api_base_url: String,
    app_base_url: String,
}

impl AlaiClient {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            api_base_url: config.alai_api_base_url.trim_end_matches('/').to_string(),
            app_base_url: config.alai_app_base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post<T: serde::Serialize + ?Sized>(
        &self,
        token: &str,
        endpoint: &str,
        body: &T,
        action: &str,
    ) -> Result<Response> {
        let response = self
            .http
            .post(format!("{}/{}", self.api_base_url, endpoint))
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .header(ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(PresenterError::Network)?;
        ensure_success(response, action).await
    }
}

#[async_trait]
impl PresentationService for AlaiClient {
    async fn create_presentation(
        &self,
        token: &str,
        request: &CreatePresentationRequest,
    ) -> Result<CreatedPresentation> {
        let response = self
            .post(token, "create-new-presentation", request, "create presentation")
            .await?;
        let bytes = response.bytes().await.map_err(PresenterError::Network)?;
        let created: CreatedPresentation = serde_json::from_slice(&bytes)?;
        info!("Created presentation with ID: {}", request.presentation_id);
        Ok(created)
    }

    async fn create_slide(&self, token: &str, request: &CreateSlideRequest) -> Result<()> {
        self.post(token, "create-new-slide", request, "create slide")
            .await?;
        info!("Created new slide with ID: {}", request.slide_id);
        Ok(())
    }

    async fn create_variant(
        &self,
        token: &str,
        slide_id: &str,
        variant: &ElementSlideVariant,
    ) -> Result<String> {
        let request = CreateVariantRequest {
            slide_id,
            element_slide_variant: variant,
        };
        let response = self
            .post(
                token,
                "create-slide-variant-from-element-slide",
                &request,
                "create slide variant",
            )
            .await?;
        let bytes = response.bytes().await.map_err(PresenterError::Network)?;
        let created: CreatedVariant = serde_json::from_slice(&bytes)?;
        let variant_id = created.id.ok_or_else(|| {
            PresenterError::Protocol(format!("no variant id returned for slide {}", slide_id))
        })?;
        info!("Created {} variant with ID: {}", variant.layout, variant_id);
        Ok(variant_id)
    }

    async fn set_active_variant(
        &self,
        token: &str,
        slide_id: &str,
        variant_id: &str,
    ) -> Result<()> {
        let request = SetActiveVariantRequest {
            slide_id,
            variant_id,
        };
        self.post(token, "set-active-variant", &request, "set active variant")
            .await?;
        Ok(())
    }

    async fn share_presentation(&self, token: &str, presentation_id: &str) -> Result<String> {
        let request = SharePresentationRequest {
            presentation_id,
            public: true,
        };
        let response = self
            .post(
                token,
                "upsert-presentation-share",
                &request,
                "get shareable link",
            )
            .await?;
        let body = response.text().await.map_err(PresenterError::Network)?;
        let share_id = parse_share_id(&body).ok_or_else(|| {
            PresenterError::Protocol("share response did not contain a share id".to_string())
        })?;
        Ok(format!("{}/view/{}", self.app_base_url, share_id))
    }
}

/// The share endpoint answers with a bare id, either JSON-quoted or as plain text.
fn parse_share_id(body: &str) -> Option<String> {
    let id = serde_json::from_str::<String>(body)
        .unwrap_or_else(|_| body.trim().to_string());
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}
