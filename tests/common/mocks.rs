//! Mock implementations for testing.
//!
//! Provides a scripted inference connector that can be shared across test
//! files without duplication.

use async_trait::async_trait;
use concierge::llm::{LlmConnector, LlmError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Scripted stand-in for the inference endpoint.
///
/// Returns a fixed reply, or a typed failure, and counts how many prompts it
/// received so tests can assert that canned replies never reach the model.
pub struct MockConnector {
    reply: Option<String>,
    failure: Option<Failure>,
    calls: AtomicUsize,
}

#[derive(Clone, Copy)]
enum Failure {
    Timeout,
    Transport,
}

impl MockConnector {
    /// A connector that always answers with `reply`.
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A connector whose every call misses the deadline.
    pub fn timing_out() -> Self {
        Self {
            reply: None,
            failure: Some(Failure::Timeout),
            calls: AtomicUsize::new(0),
        }
    }

    /// A connector whose every call fails at the transport level.
    pub fn unreachable() -> Self {
        Self {
            reply: None,
            failure: Some(Failure::Transport),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of prompts received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmConnector for MockConnector {
    async fn send_prompt(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match (&self.reply, self.failure) {
            (Some(reply), _) => Ok(reply.clone()),
            (None, Some(Failure::Timeout)) => Err(LlmError::Timeout(Duration::from_secs(15))),
            (None, Some(Failure::Transport)) => {
                Err(LlmError::Transport("connection refused".to_string()))
            }
            (None, None) => unreachable!("mock connector misconfigured"),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
