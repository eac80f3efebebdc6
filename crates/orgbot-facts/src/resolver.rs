use serde_json::Value;
use tracing::debug;

use orgbot_core::lexicon::{contains_any, HR_TERMS};

use crate::table::FactTable;

/// Outcome of a structured lookup. `NotFound` sends the query down the retrieval path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Found(String),
    NotFound,
}

/// Fact topics in match priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Employment,
    Email,
    Phone,
    Address,
    Schedule,
    TaxId,
    Branches,
    Social,
    Website,
}

impl Topic {
    /// Employment comes first: it overlaps with contact words ("correo de talento humano").
    pub const ORDER: [Topic; 9] = [
        Topic::Employment,
        Topic::Email,
        Topic::Phone,
        Topic::Address,
        Topic::Schedule,
        Topic::TaxId,
        Topic::Branches,
        Topic::Social,
        Topic::Website,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::Employment => HR_TERMS,
            Topic::Email => &["correo", "email", "e-mail"],
            Topic::Phone => &["teléfono", "telefono", "celular"],
            Topic::Address => &["dirección", "direccion", "ubicación", "ubicacion", "sede principal"],
            Topic::Schedule => &["horario"],
            Topic::TaxId => &["nit"],
            Topic::Branches => &["sedes", "sede", "cali"],
            Topic::Social => &["redes", "sociales", "instagram", "linkedin", "facebook"],
            Topic::Website => &["sitio web", "página web", "pagina web", "web"],
        }
    }

    /// First topic whose keywords occur in the lowercased query.
    pub fn detect(lowered: &str) -> Option<Topic> {
        Self::ORDER.into_iter().find(|t| contains_any(lowered, t.keywords()))
    }
}

const CUSTOMER_SERVICE: &[&str] = &["cliente", "atención", "atencion", "servicio"];

/// Answers contact and identity questions from the fact table.
pub struct StructuredResolver {
    facts: FactTable,
    brand: String,
}

impl StructuredResolver {
    pub fn new(facts: FactTable, brand: impl Into<String>) -> Self {
        Self { facts, brand: brand.into() }
    }

    pub fn resolve(&self, query: &str) -> Resolution {
        let q = query.trim().to_lowercase();
        let Some(topic) = Topic::detect(&q) else {
            debug!("no fact topic matched");
            return Resolution::NotFound;
        };
        let answer = match topic {
            Topic::Employment => Some(self.employment()),
            Topic::Email => self.email(&q),
            Topic::Phone => self.phone(&q),
            Topic::Address => self
                .facts
                .text("direccion_principal")
                .map(|d| format!("📍 La sede principal está en {d}.")),
            Topic::Schedule => self
                .facts
                .text("horario_atencion")
                .map(|h| format!("🕐 Nuestro horario de atención es {h}.")),
            Topic::TaxId => self.facts.text("nit").map(|nit| format!("🔢 El NIT de {} es {nit}.", self.legal_name())),
            Topic::Branches => self.branches(),
            Topic::Social => self.social(),
            Topic::Website => self.facts.text("sitio_web").map(|s| format!("🌍 Nuestro sitio web oficial es: {s}.")),
        };
        debug!(?topic, found = answer.is_some(), "fact topic resolved");
        answer.map_or(Resolution::NotFound, Resolution::Found)
    }

    fn legal_name(&self) -> &str {
        self.facts.text("nombre").unwrap_or(self.brand.as_str())
    }

    /// Always produces an answer: recruiting questions never fall through to generation.
    fn employment(&self) -> String {
        let page = self.facts.first_text(&["empleo.pagina", "trabaja_con_nosotros", "sitio_web"]);
        let mail = self.facts.first_text(&["empleo.correo", "correo_talento", "correo_contacto"]);
        let platform = self.facts.first_text(&["empleo.plataforma", "redes_sociales.linkedin", "sitio_web"]);

        let mut lines = vec![format!("🧑‍💼 **Empleo y procesos de contratación en {}**", self.brand)];
        if let Some(p) = page {
            lines.push(format!("• Postulaciones y procesos: {p}"));
        }
        if let Some(m) = mail {
            lines.push(format!("• Contacto de Talento Humano: {m}"));
        }
        if let Some(p) = platform {
            lines.push(format!("• También publicamos vacantes en: {p}"));
        }
        if lines.len() > 1 {
            return lines.join("\n");
        }

        let mut msg = "🧑‍💼 Para empleo y contrataciones, consulta la sección 'Trabaja con nosotros' en nuestros canales oficiales.".to_string();
        if let Some(site) = self.facts.text("sitio_web") {
            msg.push_str(&format!("\n• Sitio oficial: {site}"));
        }
        if let Some(linkedin) = self.facts.text("redes_sociales.linkedin") {
            msg.push_str(&format!("\n• LinkedIn: {linkedin}"));
        }
        msg
    }

    fn email(&self, q: &str) -> Option<String> {
        if contains_any(q, CUSTOMER_SERVICE) {
            if let Some(mail) = self.facts.text("servicio_cliente.correo") {
                return Some(format!("✉️ El correo de atención al cliente es {mail}."));
            }
        }
        self.facts
            .text("correo_contacto")
            .map(|mail| format!("✉️ Puedes escribirnos al correo general {mail}."))
    }

    fn phone(&self, q: &str) -> Option<String> {
        if contains_any(q, CUSTOMER_SERVICE) {
            if let Some(phone) = self.facts.text("servicio_cliente.telefono") {
                return Some(format!("📞 El teléfono de atención al cliente de {} es {phone}.", self.brand));
            }
        }
        self.facts
            .text("telefono_principal")
            .map(|phone| format!("📞 El teléfono principal de {} es {phone}.", self.brand))
    }

    fn branches(&self) -> Option<String> {
        let sites = self.facts.records("sedes");
        if sites.is_empty() {
            return None;
        }
        let listing: Vec<String> = sites
            .iter()
            .map(|s| {
                let city = s.get("ciudad").and_then(Value::as_str).unwrap_or("Sede");
                let address = s.get("direccion").and_then(Value::as_str).unwrap_or("");
                format!("- {city}: {address}")
            })
            .collect();
        Some(format!("🏢 Nuestras sedes son:\n{}", listing.join("\n")))
    }

    fn social(&self) -> Option<String> {
        let mut lines = vec!["🌐 Nuestros canales:".to_string()];
        for (label, key) in [
            ("LinkedIn", "redes_sociales.linkedin"),
            ("Instagram", "redes_sociales.instagram"),
            ("Facebook", "redes_sociales.facebook"),
        ] {
            if let Some(url) = self.facts.text(key) {
                lines.push(format!("- {label}: {url}"));
            }
        }
        if lines.len() > 1 {
            return Some(lines.join("\n"));
        }
        self.facts.text("sitio_web").map(|s| format!("🌐 Sitio oficial: {s}"))
    }
}
