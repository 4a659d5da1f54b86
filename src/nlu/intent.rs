use super::Intent;
use regex::Regex;

/// Pattern table per intent, evaluated in this fixed order. Ties between
/// equal non-zero confidences resolve to the earlier intent.
const INTENT_PATTERNS: &[(Intent, &[&str])] = &[
    (
        Intent::InquiryRestaurant,
        &[
            "ristorante",
            "mangiare",
            "cena",
            "pranzo",
            "prenotare tavolo",
            "menu",
        ],
    ),
    (
        Intent::InquiryActivities,
        &[
            "cosa fare",
            "attività",
            "escursion",
            "visita",
            "tour",
            "esperienz",
        ],
    ),
    (
        Intent::InquiryFacilities,
        &["servizi", "wifi", "piscina", "spa", "camera", "orari"],
    ),
    (
        Intent::BookingRequest,
        &[
            "prenotare",
            "vorrei riservare",
            "disponibilità",
            "posso",
            "quando",
        ],
    ),
    (
        Intent::Greeting,
        &["^ciao", "^salve", "^buongiorno", "^buonasera", "^hey"],
    ),
    (Intent::Thanks, &["grazie", "ringrazio", "gentile"]),
];

/// Pattern-scored intent classifier.
///
/// Confidence for an intent is the number of its patterns matching the
/// lowercased message. Patterns are full regular expressions, so greetings
/// anchor to the start of the message instead of matching mid-sentence.
pub struct IntentDetector {
    intents: Vec<(Intent, Vec<Regex>)>,
}

impl IntentDetector {
    pub fn new() -> Self {
        let intents = INTENT_PATTERNS
            .iter()
            .map(|(intent, patterns)| {
                let compiled = patterns
                    .iter()
                    .map(|p| Regex::new(p).expect("intent pattern table is valid"))
                    .collect();
                (*intent, compiled)
            })
            .collect();

        Self { intents }
    }

    pub fn detect(&self, message: &str) -> Intent {
        let lower = message.to_lowercase();

        let mut best = Intent::GeneralInquiry;
        let mut best_confidence = 0usize;

        for (intent, patterns) in &self.intents {
            let confidence = patterns.iter().filter(|p| p.is_match(&lower)).count();
            if confidence > best_confidence {
                best_confidence = confidence;
                best = *intent;
            }
        }

        best
    }
}

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new()
    }
}
