//! Message classification: topic, intent, and key-information slots.
//!
//! All three classifiers are table-driven. The tables declare their
//! precedence once; there is no layered special-casing on top of them.

pub mod intent;
pub mod key_info;
pub mod topic;

pub use intent::IntentDetector;
pub use key_info::{KeyInfoExtractor, SlotMap};
pub use topic::TopicDetector;

use serde::{Deserialize, Serialize};

/// Coarse subject of a conversation, persisted across turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Menu,
    #[serde(rename = "attivita")]
    Activities,
    #[serde(rename = "servizi")]
    Services,
    #[serde(rename = "eventi")]
    Events,
    #[serde(rename = "meteo")]
    Weather,
    #[serde(rename = "generale")]
    General,
}

impl Topic {
    /// Label used in prompts and logs, matching the canned content language.
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Menu => "menu",
            Topic::Activities => "attivita",
            Topic::Services => "servizi",
            Topic::Events => "eventi",
            Topic::Weather => "meteo",
            Topic::General => "generale",
        }
    }
}

/// Fine-grained purpose of a single message, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    InquiryRestaurant,
    InquiryActivities,
    InquiryFacilities,
    BookingRequest,
    Greeting,
    Thanks,
    GeneralInquiry,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::InquiryRestaurant => "inquiry_restaurant",
            Intent::InquiryActivities => "inquiry_activities",
            Intent::InquiryFacilities => "inquiry_facilities",
            Intent::BookingRequest => "booking_request",
            Intent::Greeting => "greeting",
            Intent::Thanks => "thanks",
            Intent::GeneralInquiry => "general_inquiry",
        }
    }
}

/// Guest signal slots filled by [`KeyInfoExtractor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Slot {
    DietaryPreferences,
    Interests,
    TimeReferences,
    GroupSize,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::DietaryPreferences => "preferenze alimentari",
            Slot::Interests => "interessi",
            Slot::TimeReferences => "riferimenti temporali",
            Slot::GroupSize => "numero di persone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_labels_match_content_language() {
        assert_eq!(Topic::Activities.as_str(), "attivita");
        assert_eq!(Topic::Weather.as_str(), "meteo");
        assert_eq!(Topic::General.as_str(), "generale");
    }

    #[test]
    fn slot_map_is_usable_from_the_module_root() {
        let mut slots = SlotMap::new();
        slots.insert(Slot::GroupSize, "2".to_string());
        assert_eq!(slots.get(&Slot::GroupSize).map(String::as_str), Some("2"));
    }

    #[test]
    fn topic_serde_roundtrip_uses_italian_labels() {
        let json = serde_json::to_string(&Topic::Events).unwrap();
        assert_eq!(json, "\"eventi\"");
        let back: Topic = serde_json::from_str("\"attivita\"").unwrap();
        assert_eq!(back, Topic::Activities);
    }
}
