use crate::errors::{PresenterError, Result};
use std::env;
use std::fmt;

/// Stand-in for secrets in `Debug` output.
pub(crate) const REDACTED: &str = "<redacted>";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_FIRECRAWL_BASE_URL: &str = "https://api.firecrawl.dev";
pub const DEFAULT_AUTH_BASE_URL: &str = "https://api.getalai.com";
pub const DEFAULT_ALAI_API_BASE_URL: &str = "https://alai-standalone-backend.getalai.com";
pub const DEFAULT_ALAI_APP_BASE_URL: &str = "https://app.getalai.com";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Credentials and endpoints for one run.
///
/// Built once (usually from the environment) and passed by reference to each
/// collaborator when it is constructed.
#[derive(Clone)]
pub struct Config {
    pub firecrawl_api_key: String,
    pub alai_email: String,
    pub alai_password: String,
    /// Public anon key sent with the token exchange. May be empty.
    pub alai_anon_key: String,
    /// Only needed by the language-model planner.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,

    pub firecrawl_base_url: String,
    pub auth_base_url: String,
    pub alai_api_base_url: String,
    pub alai_app_base_url: String,
    pub gemini_base_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("firecrawl_api_key", &REDACTED)
            .field("alai_email", &self.alai_email)
            .field("alai_password", &REDACTED)
            .field("alai_anon_key", &REDACTED)
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| REDACTED))
            .field("gemini_model", &self.gemini_model)
            .field("firecrawl_base_url", &self.firecrawl_base_url)
            .field("auth_base_url", &self.auth_base_url)
            .field("alai_api_base_url", &self.alai_api_base_url)
            .field("alai_app_base_url", &self.alai_app_base_url)
            .field("gemini_base_url", &self.gemini_base_url)
            .finish()
    }
}

impl Config {
    /// Reads the configuration from environment variables.
    ///
    /// Call `dotenvy::dotenv().ok()` beforehand to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns `PresenterError::Configuration` naming the first required variable
    /// that is missing or empty.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| {
                PresenterError::Configuration(format!(
                    "{} must be provided in environment variables",
                    key
                ))
            })
        };

        Ok(Self {
            firecrawl_api_key: required("FIRECRAWL_API_KEY")?,
            alai_email: required("ALAI_EMAIL")?,
            alai_password: required("ALAI_PASSWORD")?,
            alai_anon_key: optional("ALAI_ANON_KEY").unwrap_or_default(),
            gemini_api_key: optional("GEMINI_API_KEY"),
            gemini_model: optional("GEMINI_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            firecrawl_base_url: DEFAULT_FIRECRAWL_BASE_URL.to_string(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            alai_api_base_url: DEFAULT_ALAI_API_BASE_URL.to_string(),
            alai_app_base_url: DEFAULT_ALAI_APP_BASE_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        })
    }

    /// Returns the Gemini key, failing if the language-model planner was requested without one.
    pub fn require_gemini_key(&self) -> Result<&str> {
        self.gemini_api_key.as_deref().ok_or_else(|| {
            PresenterError::Configuration(
                "GEMINI_API_KEY must be provided to plan slides with the language model"
                    .to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("FIRECRAWL_API_KEY", "fc-key"),
            ("ALAI_EMAIL", "me@example.com"),
            ("ALAI_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        assert_eq!(config.firecrawl_api_key, "fc-key");
        assert_eq!(config.alai_anon_key, "");
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert!(config.gemini_api_key.is_none());
        assert!(matches!(
            config.require_gemini_key(),
            Err(PresenterError::Configuration(_))
        ));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = Config::from_lookup(lookup_from(&[
            ("FIRECRAWL_API_KEY", "fc-secret"),
            ("ALAI_EMAIL", "me@example.com"),
            ("ALAI_PASSWORD", "hunter2"),
            ("ALAI_ANON_KEY", "anon-secret"),
            ("GEMINI_API_KEY", "gm-secret"),
        ]))
        .unwrap();

        let printed = format!("{config:?}");
        for secret in ["fc-secret", "hunter2", "anon-secret", "gm-secret"] {
            assert!(!printed.contains(secret), "{secret} leaked: {printed}");
        }
        assert!(printed.contains("me@example.com"));
    }

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("FIRECRAWL_API_KEY", "fc-key"),
            ("ALAI_EMAIL", "me@example.com"),
            ("ALAI_PASSWORD", "  "),
        ]))
        .unwrap_err();

        match err {
            PresenterError::Configuration(msg) => assert!(msg.contains("ALAI_PASSWORD")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
