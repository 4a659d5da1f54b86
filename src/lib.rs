//! # Villa Petriolo Concierge Server
//!
//! Backend for the hotel concierge chat widget: classifies each guest
//! message, keeps a short-lived per-room conversation memory, delegates
//! open questions to an external LLM endpoint, and recovers with canned
//! per-topic replies when the model is slow or unreachable.
//!
//! ## Overview
//!
//! The per-turn pipeline, first applicable branch wins:
//!
//! 1. record the user turn in the room's [`context::ContextStore`] entry
//!    (slot extraction + topic detection, unless the turn is a follow-up);
//! 2. canned replies ([`response::ResponseGenerator`]) short-circuit the
//!    model entirely;
//! 3. otherwise a prompt is assembled from the recent transcript, the
//!    topic fact block, the guest slots, and the detected intent, and sent
//!    through the [`llm::LlmConnector`] with a hard timeout;
//! 4. model output is post-processed by [`response::ResponseNaturalizer`];
//!    on timeout or transport failure the per-topic fallback is served
//!    instead.
//!
//! Conversation state is in-memory only and expires after 24 idle hours.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use concierge::{ConciergeService, ContextStore, OllamaConnector};
//! use concierge::utils::config::Config;
//! use std::sync::Arc;
//!
//! let config = Config::from_env()?;
//! let store = Arc::new(ContextStore::new(config.chat.context_ttl()));
//! let connector = Arc::new(OllamaConnector::new(&config.llm));
//! let service = ConciergeService::new(store, connector);
//! let reply = service.process_message("ciao", "camera-12").await;
//! ```

/// HTTP API handlers and routes.
pub mod api;
/// Per-room conversation state and expiry.
pub mod context;
/// External inference endpoint boundary.
pub mod llm;
/// Topic, intent, and key-information classification.
pub mod nlu;
/// Canned replies, fact blocks, fallbacks, and reply post-processing.
pub mod response;
/// The per-turn orchestrator.
pub mod service;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use context::{ContextStore, Sender};
pub use llm::{LlmConnector, LlmError, OllamaConnector};
pub use nlu::{Intent, IntentDetector, KeyInfoExtractor, Topic, TopicDetector};
pub use response::{ResponseGenerator, ResponseNaturalizer};
pub use service::ConciergeService;
pub use types::{AppError, ChatRequest, ChatResponse, Result};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Server and model configuration
    pub config: Arc<Config>,
    /// Per-room conversation store, shared with the expiry sweep
    pub contexts: Arc<ContextStore>,
    /// The per-turn orchestrator
    pub service: Arc<ConciergeService>,
}
