use crate::nlu::Topic;

/// Exact-match canned replies for greetings, thanks, and farewells. A hit
/// bypasses classification, the model call, and naturalization entirely.
const SIMPLE_RESPONSES: &[(&str, &str)] = &[
    ("ciao", "Salve! Come posso esserle utile oggi?"),
    ("salve", "Salve! Come posso esserle utile oggi?"),
    ("buongiorno", "Buongiorno! Come posso esserle utile oggi?"),
    ("buonasera", "Buonasera! Come posso esserle utile oggi?"),
    ("grazie", "Prego! Sono qui per qualsiasi altra necessità."),
    (
        "arrivederci",
        "Arrivederci! Le auguro una piacevole permanenza a Villa Petriolo.",
    ),
    (
        "addio",
        "Arrivederci! Le auguro una piacevole permanenza a Villa Petriolo.",
    ),
];

/// Static reply tables: canned responses, per-topic fact sheets for prompt
/// injection, and fully formed fallbacks for when the model is unreachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseGenerator;

impl ResponseGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Case-insensitive, whitespace-trimmed lookup in the canned table.
    pub fn simple_response(&self, message: &str) -> Option<&'static str> {
        let lower = message.to_lowercase();
        let lower = lower.trim();
        SIMPLE_RESPONSES
            .iter()
            .find(|(key, _)| *key == lower)
            .map(|(_, reply)| *reply)
    }

    /// Per-topic fact sheet injected into the model prompt.
    pub fn contextual_information(&self, topic: Option<Topic>) -> &'static str {
        match topic {
            Some(Topic::Menu) => {
                "\
- L'utente sta chiedendo informazioni sul ristorante o sul cibo
- Il nostro ristorante si chiama \"L'Olivaia\" ed è aperto tutti i giorni dalle 12:30 alle 14:30 e dalle 19:30 alle 22:00
- Offriamo cucina toscana tradizionale con ingredienti biologici dalla nostra tenuta
- I piatti più popolari includono: bistecca alla fiorentina, pappardelle al cinghiale, e ribollita
- Abbiamo un'ottima selezione di vini toscani
- Offriamo opzioni per ospiti con esigenze alimentari speciali (vegetariani, vegani, celiaci)
- È consigliata la prenotazione per la cena"
            }
            Some(Topic::Activities) => {
                "\
- L'utente è interessato alle attività disponibili
- Villa Petriolo offre diverse attività interne: degustazione di vini (€45), corso di cucina toscana (€85), accesso alla spa (€30)
- Attività esterne: tour in bicicletta (€35), passeggiata a cavallo (€60), visita al frantoio (€15)
- Organizziamo escursioni a Firenze, San Gimignano, Siena e alle cantine locali
- La maggior parte delle attività richiede prenotazione con 24 ore di anticipo
- Offriamo attività adatte a famiglie con bambini"
            }
            Some(Topic::Services) => {
                "\
- L'utente sta chiedendo dei servizi dell'hotel
- Offriamo: WiFi gratuito in tutta la struttura, parcheggio gratuito, reception 24/7, servizio in camera
- Check-in dalle 14:00, check-out entro le 11:00
- Servizio navetta a pagamento da/per aeroporto e stazione
- Servizio lavanderia disponibile con consegna in 24 ore
- Noleggio biciclette, servizio baby-sitting su richiesta
- Assistenza per prenotazione di tour e attività fuori struttura"
            }
            Some(Topic::Events) => {
                "\
- L'utente vuole informazioni sugli eventi
- Eventi speciali: Serata Degustazione Vini (15 aprile), Concerto Jazz sotto le Stelle (22 aprile), Cooking Class: Pasta Fresca (18 aprile)
- Eventi settimanali: Aperitivo al Tramonto (venerdì e sabato), Yoga all'Alba (lunedì, mercoledì, venerdì), Tour del Giardino Botanico (martedì, giovedì, domenica)
- Eventi stagionali: Festival della Primavera (15 Aprile - 15 Maggio)
- La maggior parte degli eventi richiede prenotazione"
            }
            Some(Topic::Weather) => {
                "\
- L'utente chiede informazioni sul meteo
- Il clima in Toscana è generalmente mite
- Primavera (marzo-maggio): temperature tra 10°C e 23°C, occasionali piogge
- Estate (giugno-agosto): caldo e soleggiato, temperature tra 18°C e 32°C
- Autunno (settembre-novembre): temperature tra 9°C e 25°C, più piovoso
- Inverno (dicembre-febbraio): temperature tra 4°C e 12°C
- Le previsioni per i prossimi giorni sono di tempo soleggiato con temperature massime di 24°C"
            }
            Some(Topic::General) | None => {
                "\
- Villa Petriolo è un agriturismo di lusso in Toscana
- Siamo situati in una zona tranquilla tra colline e uliveti
- Produciamo olio d'oliva e vino biologici
- Siamo a 30 minuti di auto da Firenze
- Le camere sono arredate in stile tradizionale toscano con comfort moderni
- Abbiamo una piscina all'aperto, una spa, e un ristorante con prodotti biologici"
            }
        }
    }

    /// Fully formed guest reply used when the model cannot be reached.
    /// Section headers (ANTIPASTI:, INTERNE:, ...) are contract tokens for
    /// the rendering layer and must survive naturalization untouched.
    pub fn fallback_response(&self, topic: Option<Topic>) -> &'static str {
        match topic {
            Some(Topic::Menu) => {
                "Il nostro ristorante offre piatti tipici toscani. ANTIPASTI: Tagliere di salumi toscani (€16), Panzanella (€12). PRIMI: Pappardelle al cinghiale (€18), Risotto ai funghi porcini (€20). SECONDI: Bistecca alla fiorentina (€8/etto), Cinghiale in umido (€22). DOLCI: Cantucci con Vin Santo (€10), Tiramisù della casa (€9). Desidera altre informazioni o vorrebbe prenotare un tavolo?"
            }
            Some(Topic::Activities) => {
                "A Villa Petriolo offriamo diverse attività: INTERNE: Degustazione di vini (€45, 2 ore), Corso di cucina toscana (€85, 3 ore), Accesso alla spa (€30, giornaliero). ESTERNE: Tour in bicicletta (€35, 4 ore), Passeggiata a cavallo (€60, 2 ore), Visita al frantoio (€15, 1 ora). Quale attività le interessa maggiormente?"
            }
            Some(Topic::Events) => {
                "Ecco alcuni eventi in programma: SPECIALI: Serata Degustazione Vini (15 aprile), Concerto Jazz sotto le Stelle (22 aprile). SETTIMANALI: Aperitivo al Tramonto (venerdì e sabato), Yoga all'Alba (lunedì, mercoledì, venerdì). Le interessa qualcuno di questi eventi?"
            }
            _ => {
                "Come concierge di Villa Petriolo, sono qui per aiutarla con qualsiasi necessità riguardante il suo soggiorno. Posso fornirle informazioni sul nostro ristorante, sulle attività disponibili o sui servizi della struttura. Come posso esserle utile oggi?"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_lookup_trims_and_lowercases() {
        let generator = ResponseGenerator::new();
        assert_eq!(
            generator.simple_response("  CIAO  "),
            Some("Salve! Come posso esserle utile oggi?")
        );
        assert_eq!(
            generator.simple_response("Grazie"),
            Some("Prego! Sono qui per qualsiasi altra necessità.")
        );
    }

    #[test]
    fn canned_lookup_requires_exact_match() {
        let generator = ResponseGenerator::new();
        assert!(generator.simple_response("ciao, come va?").is_none());
        assert!(generator.simple_response("").is_none());
    }

    #[test]
    fn every_topic_has_a_non_empty_fallback() {
        let generator = ResponseGenerator::new();
        let topics = [
            Some(Topic::Menu),
            Some(Topic::Activities),
            Some(Topic::Services),
            Some(Topic::Events),
            Some(Topic::Weather),
            Some(Topic::General),
            None,
        ];
        for topic in topics {
            assert!(!generator.fallback_response(topic).is_empty());
        }
    }

    #[test]
    fn unset_topic_gets_the_generic_fallback() {
        let generator = ResponseGenerator::new();
        assert_eq!(
            generator.fallback_response(None),
            generator.fallback_response(Some(Topic::General))
        );
        assert!(generator.fallback_response(None).contains("concierge"));
    }

    #[test]
    fn menu_fallback_keeps_section_header_tokens() {
        let generator = ResponseGenerator::new();
        let fallback = generator.fallback_response(Some(Topic::Menu));
        for header in ["ANTIPASTI:", "PRIMI:", "SECONDI:", "DOLCI:"] {
            assert!(fallback.contains(header), "missing header {header}");
        }
    }

    #[test]
    fn contextual_information_differs_per_topic() {
        let generator = ResponseGenerator::new();
        assert!(generator
            .contextual_information(Some(Topic::Menu))
            .contains("L'Olivaia"));
        assert!(generator
            .contextual_information(Some(Topic::Weather))
            .contains("clima"));
        assert!(generator
            .contextual_information(None)
            .contains("agriturismo"));
    }
}
