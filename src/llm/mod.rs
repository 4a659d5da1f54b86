//! External inference boundary.
//!
//! The connector sends one assembled prompt and returns raw text. Outcomes
//! are an explicit result type: [`LlmError::Timeout`] when the endpoint
//! misses the budget, [`LlmError::Transport`] for every other fault. No
//! retries are performed here; the orchestrator falls back on first failure.

pub mod ollama;

pub use ollama::OllamaConnector;

use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("inference endpoint did not respond within {0:?}")]
    Timeout(Duration),

    #[error("inference endpoint unreachable: {0}")]
    Transport(String),
}

/// Prompt-in, text-out client for the external model.
#[async_trait]
pub trait LlmConnector: Send + Sync {
    /// Send an assembled prompt and return the raw completion text.
    async fn send_prompt(&self, prompt: &str) -> Result<String, LlmError>;

    /// The model identifier, for logs.
    fn model_name(&self) -> &str;
}
