//! Per-turn response orchestration.
//!
//! Every terminal state of the turn state machine produces a valid
//! guest-facing string: canned reply, naturalized model output, or the
//! per-topic fallback. Nothing below this layer leaves a failure unhandled.

use crate::context::{ContextSnapshot, ContextStore, Sender};
use crate::llm::LlmConnector;
use crate::nlu::{IntentDetector, Topic};
use crate::response::{ResponseGenerator, ResponseNaturalizer};
use std::sync::Arc;
use tracing::{info, warn};

/// Fixed apology for failures outside the per-turn state machine.
pub const APOLOGY_RESPONSE: &str = "Mi scusi, al momento ho qualche difficoltà tecnica. \
Può ripetere la sua richiesta tra qualche istante?";

/// Prior turns included in the prompt transcript.
const PROMPT_HISTORY_WINDOW: usize = 6;

/// Root orchestrator for one guest turn.
pub struct ConciergeService {
    contexts: Arc<ContextStore>,
    connector: Arc<dyn LlmConnector>,
    intent_detector: IntentDetector,
    generator: ResponseGenerator,
    naturalizer: ResponseNaturalizer,
}

impl ConciergeService {
    pub fn new(contexts: Arc<ContextStore>, connector: Arc<dyn LlmConnector>) -> Self {
        Self::with_naturalizer(contexts, connector, ResponseNaturalizer::new())
    }

    /// Construction with a caller-supplied naturalizer, so tests can pin its
    /// random source.
    pub fn with_naturalizer(
        contexts: Arc<ContextStore>,
        connector: Arc<dyn LlmConnector>,
        naturalizer: ResponseNaturalizer,
    ) -> Self {
        Self {
            contexts,
            connector,
            intent_detector: IntentDetector::new(),
            generator: ResponseGenerator::new(),
            naturalizer,
        }
    }

    /// Handles one user message and always returns a guest-facing reply.
    ///
    /// First applicable branch wins: canned reply, naturalized model output,
    /// or the per-topic fallback when the endpoint times out or is
    /// unreachable.
    pub async fn process_message(&self, message: &str, room_id: &str) -> String {
        self.contexts.record_turn(room_id, message, Sender::User);

        if let Some(simple) = self.generator.simple_response(message) {
            info!(room_id, "canned reply hit, skipping model call");
            self.contexts.record_turn(room_id, simple, Sender::Bot);
            return simple.to_string();
        }

        let snapshot = self.contexts.snapshot(room_id);
        let prompt = self.build_prompt(message, &snapshot);

        let reply = match self.connector.send_prompt(&prompt).await {
            Ok(raw) => self.naturalizer.naturalize(&raw),
            Err(err) => {
                warn!(room_id, error = %err, "model unavailable, serving topic fallback");
                self.generator
                    .fallback_response(snapshot.current_topic)
                    .to_string()
            }
        };

        self.contexts.record_turn(room_id, &reply, Sender::Bot);
        reply
    }

    /// Topic fallback for the room's current conversation, used by callers
    /// that need a reply without running a turn.
    pub fn fallback_response(&self, room_id: &str) -> String {
        let snapshot = self.contexts.snapshot(room_id);
        self.generator
            .fallback_response(snapshot.current_topic)
            .to_string()
    }

    /// Assembles the model prompt: persona, trailing transcript window,
    /// topic fact block, guest slots, topic and intent labels, style
    /// directives, and the question itself.
    fn build_prompt(&self, message: &str, snapshot: &ContextSnapshot) -> String {
        // The current user turn is already in the snapshot; the transcript
        // window covers the turns before it.
        let prior = snapshot
            .messages
            .split_last()
            .map(|(_, rest)| rest)
            .unwrap_or(&[]);
        let window_start = prior.len().saturating_sub(PROMPT_HISTORY_WINDOW);
        let transcript = prior[window_start..]
            .iter()
            .map(|m| {
                let speaker = match m.sender {
                    Sender::User => "Ospite",
                    Sender::Bot => "Concierge",
                };
                format!("{speaker}: {}", m.text)
            })
            .collect::<Vec<_>>()
            .join("\n");

        let guest_info = snapshot
            .key_information
            .iter()
            .map(|(slot, value)| format!("- {}: {}", slot.as_str(), value))
            .collect::<Vec<_>>()
            .join("\n");

        let topic = snapshot.current_topic.unwrap_or(Topic::General);
        let intent = self.intent_detector.detect(message);

        format!(
            "\
Sei il concierge digitale di Villa Petriolo, un elegante agriturismo toscano.
Rispondi in modo professionale, caloroso e personalizzato. Il tuo tono è sempre cortese e naturale.

### Contesto della conversazione:
{transcript}

### Informazioni rilevanti:
{info}

### Informazioni sull'ospite:
{guest_info}

### L'argomento attuale è: {topic}
### L'intento rilevato è: {intent}

### Il tuo stile:
- Sii dettagliato ma conciso
- Usa un linguaggio naturale, evitando formule troppo ripetitive
- Includi sempre una domanda di follow-up pertinente per mantenere viva la conversazione
- Se menzionato cibo o attività, offri sempre un consiglio personale (\"Vi consiglio particolarmente...\")
- Adatta il tuo tono in base a ciò che chiede l'ospite

### Domanda dell'ospite:
{message}
",
            transcript = transcript,
            info = self.generator.contextual_information(snapshot.current_topic),
            guest_info = guest_info,
            topic = topic.as_str(),
            intent = intent.as_str(),
            message = message,
        )
    }
}
