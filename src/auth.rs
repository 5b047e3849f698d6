use async_trait::async_trait;
use log::info;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::client::ensure_success;
use crate::config::{Config, REDACTED};
use crate::errors::{PresenterError, Result};

/// Something that can hand out a bearer token for the presentation service.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn access_token(&self) -> Result<String>;
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
    gotrue_meta_security: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchanges the configured email and password for an access token.
#[derive(Clone)]
pub struct PasswordAuthenticator {
    http: reqwest::Client,
    token_url: String,
    anon_key: String,
    email: String,
    password: String,
}

impl fmt::Debug for PasswordAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordAuthenticator")
            .field("token_url", &self.token_url)
            .field("anon_key", &REDACTED)
            .field("email", &self.email)
            .field("password", &REDACTED)
            .finish()
    }
}

impl PasswordAuthenticator {
    pub fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            token_url: format!(
                "{}/auth/v1/token?grant_type=password",
                config.auth_base_url.trim_end_matches('/')
            ),
            anon_key: config.alai_anon_key.clone(),
            email: config.alai_email.clone(),
            password: config.alai_password.clone(),
        }
    }
}

#[async_trait]
impl Authenticator for PasswordAuthenticator {
    async fn access_token(&self) -> Result<String> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(PresenterError::Configuration(
                "ALAI_EMAIL and ALAI_PASSWORD must be provided".to_string(),
            ));
        }
        info!("Authenticating as {}...", self.email);

        let body = PasswordGrant {
            email: &self.email,
            password: &self.password,
            gotrue_meta_security: serde_json::Map::new(),
        };
        let response = self
            .http
            .post(&self.token_url)
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.anon_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(PresenterError::Network)?;
        let response = ensure_success(response, "authenticate").await?;

        let token: TokenResponse = response.json().await.map_err(PresenterError::Network)?;
        let access_token = token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                PresenterError::Protocol("no access token in authentication response".to_string())
            })?;
        info!("Authentication successful");
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grant_body_carries_empty_security_meta() {
        let body = PasswordGrant {
            email: "me@example.com",
            password: "pw",
            gotrue_meta_security: serde_json::Map::new(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"email": "me@example.com", "password": "pw", "gotrue_meta_security": {}})
        );
    }

    #[test]
    fn token_url_is_derived_from_base() {
        let mut config = Config::from_lookup(|key| match key {
            "FIRECRAWL_API_KEY" | "ALAI_EMAIL" | "ALAI_PASSWORD" => Some("x".to_string()),
            _ => None,
        })
        .unwrap();
        config.auth_base_url = "http://localhost:9999/".to_string();
        let auth = PasswordAuthenticator::new(&config, reqwest::Client::new());
        assert_eq!(
            auth.token_url,
            "http://localhost:9999/auth/v1/token?grant_type=password"
        );
    }

    #[test]
    fn debug_output_hides_credentials() {
        let config = Config::from_lookup(|key| match key {
            "FIRECRAWL_API_KEY" => Some("fc".to_string()),
            "ALAI_EMAIL" => Some("me@example.com".to_string()),
            "ALAI_PASSWORD" => Some("hunter2".to_string()),
            "ALAI_ANON_KEY" => Some("anon-secret".to_string()),
            _ => None,
        })
        .unwrap();
        let printed = format!("{:?}", PasswordAuthenticator::new(&config, reqwest::Client::new()));
        assert!(!printed.contains("hunter2"));
        assert!(!printed.contains("anon-secret"));
        assert!(printed.contains("me@example.com"));
    }
}
