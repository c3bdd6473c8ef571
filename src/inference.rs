use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::{NatarisApi, DEFAULT_INFERENCE_MODEL, DEFAULT_MAX_TOKENS};

/// Parameters for a plain text inference request
#[derive(Serialize, Debug, Clone)]
pub struct InferenceParams {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl InferenceParams {
    /// Builds params for the given prompt with the default model and token budget
    pub fn new(prompt: &str) -> Self {
        Self {
            model: DEFAULT_INFERENCE_MODEL.to_string(),
            prompt: prompt.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Generated output plus the token accounting reported by the service
#[derive(Deserialize, Debug, Clone)]
pub struct InferenceResult {
    pub model: String,
    pub output: String,
    pub usage: TokenUsage,
}

/// Token usage counts attached to generation responses
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    pub total_tokens: u32,
}

impl NatarisApi {
    /**
    Runs a single text inference request

    Returns the generated output and token usage counts.

    Fails with a validation error before any network call if the prompt or
    the model id is empty.
    */
    pub async fn run_inference(&self, params: InferenceParams) -> Result<InferenceResult> {
        if params.prompt.trim().is_empty() {
            return Err(Error::Validation("prompt must not be empty".to_string()));
        }
        if params.model.trim().is_empty() {
            return Err(Error::Validation("model id must not be empty".to_string()));
        }

        self.post_json("/inference", &params).await
    }
}
