use super::Slot;
use regex::Regex;
use std::collections::BTreeMap;

/// Slot values extracted from a single message, keyed by slot kind.
pub type SlotMap = BTreeMap<Slot, String>;

/// Shallow slot extractor for prompt augmentation.
///
/// Dietary, interest, and temporal slots record the entire original message
/// when their presence test fires; only the party size is parsed into a bare
/// count. These are signals for the prompt, not structured facts.
pub struct KeyInfoExtractor {
    dietary: Regex,
    interests: Regex,
    time_references: Regex,
    group_size: Regex,
}

impl KeyInfoExtractor {
    pub fn new() -> Self {
        Self {
            dietary: Regex::new(
                "(?i)vegetarian|vegan|allergic|intolerant|celiac|vegano|vegetariano|allergia|intolleranza|celiaco",
            )
            .expect("slot pattern table is valid"),
            interests: Regex::new(
                "(?i)interested in|like to|prefer|enjoy|interessa|preferisco|mi piace|vorrei",
            )
            .expect("slot pattern table is valid"),
            time_references: Regex::new(
                "(?i)tomorrow|next week|tonight|today|domani|prossima settimana|stasera|oggi",
            )
            .expect("slot pattern table is valid"),
            group_size: Regex::new(r"(?i)per (\d+) person[ea]").expect("slot pattern table is valid"),
        }
    }

    pub fn extract(&self, message: &str) -> SlotMap {
        let mut slots = SlotMap::new();

        if self.dietary.is_match(message) {
            slots.insert(Slot::DietaryPreferences, message.to_string());
        }
        if self.interests.is_match(message) {
            slots.insert(Slot::Interests, message.to_string());
        }
        if self.time_references.is_match(message) {
            slots.insert(Slot::TimeReferences, message.to_string());
        }
        if let Some(caps) = self.group_size.captures(message) {
            slots.insert(Slot::GroupSize, caps[1].to_string());
        }

        slots
    }
}

impl Default for KeyInfoExtractor {
    fn default() -> Self {
        Self::new()
    }
}
