use serde::{Deserialize, Serialize};

/// Default model identifier sent with every generate request.
pub const DEFAULT_MODEL: &str = "command-xlarge-nightly";
/// Fixed completion budget sent with every generate request.
pub const MAX_TOKENS: u32 = 1000;
/// Fixed sampling temperature sent with every generate request.
pub const TEMPERATURE: f64 = 0.7;

/// Canonical request payload shape for the generate endpoint.
///
/// Field names and values are a compatibility contract with the hosted
/// model; they serialize exactly as
/// `{ "prompt": ..., "max_tokens": 1000, "model": ..., "temperature": 0.7 }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub model: String,
    pub temperature: f64,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: MAX_TOKENS,
            model: DEFAULT_MODEL.to_string(),
            temperature: TEMPERATURE,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Response body shape; only the first generation is consumed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub generations: Vec<Generation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Generation {
    pub text: String,
}
