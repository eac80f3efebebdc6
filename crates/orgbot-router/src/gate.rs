use orgbot_core::config::AssistantSettings;
use orgbot_core::lexicon::contains_any_owned;

/// Keeps the generator on the organization's topics and catches bare greetings.
#[derive(Debug, Clone)]
pub struct DomainGate {
    brand: String,
    domain_terms: Vec<String>,
    greetings: Vec<String>,
}

impl DomainGate {
    pub fn new(settings: &AssistantSettings) -> Self {
        let lower = |v: &[String]| -> Vec<String> {
            v.iter().map(String::as_str).map(normalize).filter(|s| !s.is_empty()).collect()
        };
        Self {
            brand: settings.brand.trim().to_lowercase(),
            domain_terms: lower(&settings.domain_terms),
            greetings: lower(&settings.greetings),
        }
    }

    /// True when the query names the brand or one of the business-unit terms.
    pub fn allows(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        (!self.brand.is_empty() && q.contains(&self.brand)) || contains_any_owned(&q, &self.domain_terms)
    }

    /// True for a bare greeting ("¡Hola!", "buenas tardes") that does not mention the brand.
    pub fn is_greeting(&self, query: &str) -> bool {
        let q = normalize(query);
        if q.is_empty() || (!self.brand.is_empty() && q.contains(&self.brand)) {
            return false;
        }
        self.greetings.iter().any(|g| *g == q)
    }
}

/// Lowercases, turns punctuation into spaces and collapses whitespace.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgbot_core::config::Settings;

    fn gate() -> DomainGate {
        DomainGate::new(&Settings::default().assistant)
    }

    #[test]
    fn brand_or_business_terms_pass() {
        let g = gate();
        assert!(g.allows("¿Qué hace FANALCA?"));
        assert!(g.allows("cuéntame sobre la sostenibilidad de la empresa"));
        assert!(g.allows("motos Honda"));
        assert!(!g.allows("cuál es la capital de Francia"));
        assert!(!g.allows(""));
    }

    #[test]
    fn greetings_are_matched_whole() {
        let g = gate();
        assert!(g.is_greeting("¡Hola!"));
        assert!(g.is_greeting("  Buenas   tardes. "));
        assert!(!g.is_greeting("hola fanalca"));
        assert!(!g.is_greeting("hola, ¿cuál es el NIT?"));
        assert!(!g.is_greeting("?!"));
    }
}
