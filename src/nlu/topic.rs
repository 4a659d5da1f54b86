use super::Topic;

/// Keyword table per category, evaluated in this fixed order. The order is
/// the documented tie-break for equal non-zero scores.
const TOPIC_KEYWORDS: &[(Topic, &[&str])] = &[
    (
        Topic::Menu,
        &[
            "menu",
            "ristorante",
            "pranzo",
            "cena",
            "colazione",
            "piatti",
            "cibo",
            "mangiare",
            "bevande",
            "vino",
            "bere",
            "prenotare tavolo",
            "culinaria",
            "chef",
            "specialità",
            "degustazione",
        ],
    ),
    (
        Topic::Activities,
        &[
            "attività",
            "cosa fare",
            "tour",
            "escursione",
            "passeggiata",
            "camminata",
            "visita",
            "bicicletta",
            "trekking",
            "cavallo",
            "piscina",
            "spa",
            "massaggio",
            "yoga",
            "corsi",
        ],
    ),
    (
        Topic::Services,
        &[
            "servizi",
            "wifi",
            "parcheggio",
            "bagagli",
            "assistenza",
            "reception",
            "check-in",
            "checkout",
            "camera",
            "pulizia",
            "navetta",
            "transfer",
            "orari",
            "prenotazione",
        ],
    ),
    (
        Topic::Events,
        &[
            "eventi",
            "concerti",
            "programma",
            "spettacoli",
            "intrattenimento",
            "degustazione",
            "festival",
            "mostra",
            "esposizione",
            "calendario",
        ],
    ),
    (
        Topic::Weather,
        &[
            "tempo",
            "meteo",
            "pioggia",
            "sole",
            "clima",
            "temperatura",
            "previsioni",
            "caldo",
            "freddo",
            "umidità",
        ],
    ),
];

/// Keyword-scored topic classifier.
///
/// Each category's score is the total number of substring occurrences of its
/// keywords in the lowercased message. The strictly highest score wins; on an
/// all-zero message the result is [`Topic::General`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TopicDetector;

impl TopicDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, message: &str) -> Topic {
        let lower = message.to_lowercase();

        let mut best = Topic::General;
        let mut best_score = 0usize;

        for (topic, keywords) in TOPIC_KEYWORDS {
            let score: usize = keywords.iter().map(|kw| lower.matches(kw).count()).sum();
            if score > best_score {
                best_score = score;
                best = *topic;
            }
        }

        best
    }
}
