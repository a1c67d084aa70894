use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::GenerateApiError;
use crate::payload::DEFAULT_MODEL;
use crate::url::DEFAULT_GENERATE_BASE_URL;

/// Environment variable consulted by [`GenerateApiConfig::from_env`].
pub const API_KEY_ENV_VAR: &str = "COHERE_API_KEY";

/// Transport configuration for generate requests.
///
/// The API key is always injected here by the embedder (directly or via
/// [`GenerateApiConfig::from_env`]); the transport never embeds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateApiConfig {
    /// Bearer token passed to `Authorization`.
    pub api_key: String,
    /// Base URL for generate endpoints.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout; transport default applies when unset.
    pub timeout: Option<Duration>,
}

impl Default for GenerateApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GENERATE_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl GenerateApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Reads the API key from the process environment.
    pub fn from_env() -> Result<Self, GenerateApiError> {
        let api_key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(GenerateApiError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.extra_headers.extend(headers);
        self
    }
}
