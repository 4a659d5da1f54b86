//! Per-room conversation state.
//!
//! The store owns its own synchronization and is passed by handle into the
//! request path and the expiry sweep. Different rooms never contend; turns
//! for the same room serialize on that room's lock, so the append, the
//! 10-message trim, the slot merge, and the topic update land atomically.

use crate::nlu::{KeyInfoExtractor, SlotMap, Topic, TopicDetector};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use regex::Regex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Most recent turns kept per room.
pub const MAX_CONTEXT_MESSAGES: usize = 10;

/// Default idle lifetime of a room context.
pub const DEFAULT_CONTEXT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub struct TurnMessage {
    pub sender: Sender,
    pub text: String,
}

#[derive(Debug)]
struct ConversationContext {
    messages: VecDeque<TurnMessage>,
    key_information: SlotMap,
    current_topic: Option<Topic>,
    last_update: DateTime<Utc>,
}

impl ConversationContext {
    fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            key_information: SlotMap::new(),
            current_topic: None,
            last_update: Utc::now(),
        }
    }
}

/// Read-only view of one room's state, cloned out from under the lock.
#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    pub messages: Vec<TurnMessage>,
    pub key_information: SlotMap,
    pub current_topic: Option<Topic>,
}

impl ContextSnapshot {
    fn empty() -> Self {
        Self {
            messages: Vec::new(),
            key_information: SlotMap::new(),
            current_topic: None,
        }
    }
}

/// Anchored continuation phrases; any hit marks the turn as a follow-up.
const FOLLOW_UP_PATTERNS: &[&str] = &[
    r"^altro\??$",
    r"^e poi\??$",
    r"^qualcos'altro\??$",
    r"^cos'altro\??$",
    r"^cosa altro\??$",
    r"^e ancora\??$",
    r"^continua\??$",
    r"^di più\??$",
    r"^ce ne sono altri\??$",
    r"^e\??$",
    r"^ancora\??$",
    r"^dimmi di più\??$",
];

/// In-memory session store, one [`ConversationContext`] per room.
pub struct ContextStore {
    rooms: RwLock<HashMap<String, Arc<Mutex<ConversationContext>>>>,
    extractor: KeyInfoExtractor,
    topic_detector: TopicDetector,
    follow_up_patterns: Vec<Regex>,
    interrogative_stems: Regex,
    ttl: Duration,
}

impl ContextStore {
    pub fn new(ttl: Duration) -> Self {
        let follow_up_patterns = FOLLOW_UP_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("follow-up pattern table is valid"))
            .collect();

        Self {
            rooms: RwLock::new(HashMap::new()),
            extractor: KeyInfoExtractor::new(),
            topic_detector: TopicDetector::new(),
            follow_up_patterns,
            interrogative_stems: Regex::new("cosa|dove|come|quando|qual|chi|perché|altro")
                .expect("follow-up pattern table is valid"),
            ttl,
        }
    }

    /// Returns the room's current state, or a fresh empty view if no turn has
    /// happened yet. Never fails, never allocates a stored context.
    pub fn snapshot(&self, room_id: &str) -> ContextSnapshot {
        let rooms = self.rooms.read();
        match rooms.get(room_id) {
            Some(ctx) => {
                let ctx = ctx.lock();
                ContextSnapshot {
                    messages: ctx.messages.iter().cloned().collect(),
                    key_information: ctx.key_information.clone(),
                    current_topic: ctx.current_topic,
                }
            }
            None => ContextSnapshot::empty(),
        }
    }

    /// Appends a turn to a room, creating the context lazily on first use.
    ///
    /// User turns additionally merge extracted slot values (later values
    /// overwrite earlier ones) and recompute the topic unless the message is
    /// a follow-up to the conversation in progress.
    pub fn record_turn(&self, room_id: &str, text: &str, sender: Sender) {
        let room = self.room_handle(room_id);
        let mut ctx = room.lock();

        ctx.last_update = Utc::now();

        let is_follow_up =
            sender == Sender::User && self.is_follow_up_question(text, &ctx.messages);

        ctx.messages.push_back(TurnMessage {
            sender,
            text: text.to_string(),
        });
        if ctx.messages.len() > MAX_CONTEXT_MESSAGES {
            ctx.messages.pop_front();
        }

        if sender == Sender::User {
            let slots = self.extractor.extract(text);
            ctx.key_information.extend(slots);

            if !is_follow_up {
                ctx.current_topic = Some(self.topic_detector.detect(text));
            }
        }
    }

    /// Follow-up classification, short-circuit, first rule wins:
    /// 1. the trimmed lowercased message matches a continuation phrase;
    /// 2. the message is under 10 chars and contains an interrogative stem;
    /// 3. the last bot message asked a question and this reply is under 20
    ///    chars (a terse answer to that question).
    fn is_follow_up_question(&self, message: &str, history: &VecDeque<TurnMessage>) -> bool {
        let lower = message.to_lowercase();
        let lower = lower.trim();
        let len = lower.chars().count();

        if self.follow_up_patterns.iter().any(|p| p.is_match(lower)) {
            return true;
        }

        if len < 10 && self.interrogative_stems.is_match(lower) {
            return true;
        }

        let last_bot = history.iter().rev().find(|m| m.sender == Sender::Bot);
        if let Some(bot_msg) = last_bot {
            if bot_msg.text.contains('?') {
                return len < 20;
            }
        }

        false
    }

    /// Removes every context idle past the TTL. Age is re-checked under the
    /// room's own lock so the sweep cannot race an in-flight turn.
    pub fn cleanup_expired(&self) {
        let now = Utc::now();
        let max_age =
            chrono::Duration::from_std(self.ttl).unwrap_or_else(|_| chrono::Duration::hours(24));

        let candidates: Vec<String> = {
            let rooms = self.rooms.read();
            rooms
                .iter()
                .filter(|(_, ctx)| now - ctx.lock().last_update > max_age)
                .map(|(room_id, _)| room_id.clone())
                .collect()
        };

        if candidates.is_empty() {
            return;
        }

        let mut rooms = self.rooms.write();
        for room_id in candidates {
            let still_stale = rooms
                .get(&room_id)
                .map(|ctx| now - ctx.lock().last_update > max_age)
                .unwrap_or(false);
            if still_stale {
                rooms.remove(&room_id);
                info!(room_id = %room_id, "removed idle conversation context");
            }
        }
    }

    /// Number of live contexts, for the sweep log line.
    pub fn len(&self) -> usize {
        self.rooms.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.read().is_empty()
    }

    fn room_handle(&self, room_id: &str) -> Arc<Mutex<ConversationContext>> {
        if let Some(ctx) = self.rooms.read().get(room_id) {
            return Arc::clone(ctx);
        }
        let mut rooms = self.rooms.write();
        Arc::clone(
            rooms
                .entry(room_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(ConversationContext::new()))),
        )
    }

    #[cfg(test)]
    fn backdate(&self, room_id: &str, age: chrono::Duration) {
        if let Some(ctx) = self.rooms.read().get(room_id) {
            ctx.lock().last_update = Utc::now() - age;
        }
    }
}

impl Default for ContextStore {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT_TTL)
    }
}
