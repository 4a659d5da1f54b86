use crate::llm::{LlmConnector, LlmError};
use crate::utils::config::{GenerationOptions, LlmConfig};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Connector for the Ollama `/api/generate` endpoint.
///
/// Sends the prompt with the fixed generation options and a hard client-side
/// timeout. Streaming is disabled; the reply is one JSON body.
pub struct OllamaConnector {
    http: reqwest::Client,
    base_url: String,
    model: String,
    options: GenerationOptions,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaConnector {
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            options: config.options.clone(),
            timeout: config.timeout(),
        }
    }
}

#[async_trait]
impl LlmConnector for OllamaConnector {
    async fn send_prompt(&self, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": self.options,
        });

        debug!(model = %self.model, prompt_len = prompt.len(), "sending prompt to inference endpoint");

        let response = self
            .http
            .post(&url)
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let response = response
            .error_for_status()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Transport(format!("malformed response body: {e}")))?;

        Ok(parsed.response)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
