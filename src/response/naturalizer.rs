use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;

/// Probability of appending a Tuscan idiom to a reply.
const EMBELLISH_PROBABILITY: f64 = 0.1;

/// Occasional flavor sentences appended to replies.
const TOSCANA_EXPRESSIONS: &[&str] = &[
    "Come diciamo in Toscana, 'chi ha tempo non aspetti tempo'!",
    "Sa, qui in Toscana diciamo che 'il vino fa buon sangue'.",
    "Come diciamo qui, 'andare a zonzo' tra le colline è un'esperienza imperdibile.",
    "In Toscana abbiamo un detto: 'val più la pratica della grammatica'.",
    "Come si dice qui, 'il contadino, scarpe grosse e cervello fino'.",
];

/// Closing prompts; one is appended whenever a reply does not already end
/// with a question, so every bot turn invites further interaction.
const RESPONSE_CLOSINGS: &[&str] = &[
    "Posso aiutarla con altro?",
    "C'è altro che le interessa?",
    "Ha altre domande?",
    "Desidera sapere altro su questo?",
    "Posso fornirle ulteriori dettagli?",
    "Le serve altro?",
];

/// Stilted phrasings rewritten into more casual equivalents.
const PHRASE_REWRITES: &[(&str, &str)] = &[
    ("Mi permetta di informarla", "Posso dirle"),
    ("Non esiti a contattarci", "Non esiti a chiedere"),
    ("Desidero informarla", "Le faccio sapere"),
];

/// Post-processes model output before delivery: deterministic cleanup first,
/// then light randomized styling.
///
/// The randomness lives behind an injected [`StdRng`] so tests can pin the
/// embellishment to always or never fire; production seeds from the OS.
pub struct ResponseNaturalizer {
    empty_parens: Regex,
    repeated_whitespace: Regex,
    doubled_commas: Regex,
    doubled_periods: Regex,
    section_headers: Regex,
    euro_amount: Regex,
    euro_spacing: Regex,
    embellish_probability: f64,
    rng: Mutex<StdRng>,
}

impl ResponseNaturalizer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng(), EMBELLISH_PROBABILITY)
    }

    /// Construction with a pinned random source, for tests and replays.
    pub fn with_rng(rng: StdRng, embellish_probability: f64) -> Self {
        Self {
            empty_parens: Regex::new(r"\(\s*\)").expect("naturalizer rule table is valid"),
            repeated_whitespace: Regex::new(r"\s{2,}").expect("naturalizer rule table is valid"),
            doubled_commas: Regex::new(r",\s*,").expect("naturalizer rule table is valid"),
            doubled_periods: Regex::new(r"\.\s*\.").expect("naturalizer rule table is valid"),
            section_headers: Regex::new(
                r"(ANTIPASTI|PRIMI|SECONDI|DOLCI|INTERNE|ESTERNE|ESCURSIONI)\s*:",
            )
            .expect("naturalizer rule table is valid"),
            euro_amount: Regex::new(r"(?i)(\d+)\s*euro").expect("naturalizer rule table is valid"),
            euro_spacing: Regex::new(r"€\s+(\d+)").expect("naturalizer rule table is valid"),
            embellish_probability,
            rng: Mutex::new(rng),
        }
    }

    pub fn naturalize(&self, response: &str) -> String {
        let mut text = self.empty_parens.replace_all(response, "").into_owned();
        text = self.repeated_whitespace.replace_all(&text, " ").into_owned();

        text = self.doubled_commas.replace_all(&text, ",").into_owned();
        text = self.doubled_periods.replace_all(&text, ".").into_owned();

        for (stilted, casual) in PHRASE_REWRITES {
            text = text.replace(stilted, casual);
        }

        text = self.section_headers.replace_all(&text, "$1:").into_owned();

        text = self.euro_amount.replace_all(&text, "€$1").into_owned();
        text = self.euro_spacing.replace_all(&text, "€$1").into_owned();

        let mut rng = self.rng.lock();

        if rng.random_bool(self.embellish_probability) {
            let idx = rng.random_range(0..TOSCANA_EXPRESSIONS.len());
            text.push(' ');
            text.push_str(TOSCANA_EXPRESSIONS[idx]);
        }

        if !text.trim_end().ends_with('?') {
            let idx = rng.random_range(0..RESPONSE_CLOSINGS.len());
            text.push(' ');
            text.push_str(RESPONSE_CLOSINGS[idx]);
        }

        text
    }
}

impl Default for ResponseNaturalizer {
    fn default() -> Self {
        Self::new()
    }
}
