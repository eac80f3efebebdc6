use std::path::PathBuf;

use orgbot_facts::{FactTable, Resolution, StructuredResolver, Topic};

fn fixture_resolver() -> StructuredResolver {
    // crates/orgbot-facts -> crates -> repo root
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf();
    let facts = FactTable::from_path(&root.join("test_data/structured_data.json")).expect("facts");
    StructuredResolver::new(facts, "Fanalca")
}

fn found(r: Resolution) -> String {
    match r {
        Resolution::Found(text) => text,
        Resolution::NotFound => panic!("expected an answer"),
    }
}

#[test]
fn nit_is_rendered_in_fixed_template() {
    let facts = FactTable::from_json_str(r#"{"nit": "900.123.456-7"}"#).unwrap();
    let resolver = StructuredResolver::new(facts, "Acme");
    assert_eq!(resolver.resolve("nit"), Resolution::Found("🔢 El NIT de Acme es 900.123.456-7.".to_string()));
}

#[test]
fn nit_question_uses_legal_name_when_present() {
    let text = found(fixture_resolver().resolve("¿Cuál es el NIT?"));
    assert_eq!(text, "🔢 El NIT de Fanalca S.A. es 900.123.456-7.");
}

#[test]
fn employment_wins_over_contact_words() {
    let resolver = fixture_resolver();
    let text = found(resolver.resolve("cómo puedo postularme a un empleo"));
    assert!(text.contains("Empleo y procesos de contratación"));
    assert!(text.contains("talentohumano@fanalca.com"));
    assert!(!text.contains("contacto@fanalca.com"), "HR channel, not the generic mailbox");

    // mentions "correo" but is a recruiting question
    let text = found(resolver.resolve("a qué correo envío mi hoja de vida"));
    assert!(text.contains("talentohumano@fanalca.com"));
}

#[test]
fn employment_falls_back_along_key_chain() {
    let facts = FactTable::from_json_str(r#"{"correo_talento": "rh@acme.co", "correo_contacto": "info@acme.co"}"#).unwrap();
    let text = found(StructuredResolver::new(facts, "Acme").resolve("vacantes"));
    assert!(text.contains("rh@acme.co"));
    assert!(!text.contains("info@acme.co"));
}

#[test]
fn employment_without_any_field_still_guides() {
    let resolver = StructuredResolver::new(FactTable::default(), "Acme");
    let text = found(resolver.resolve("trabaja con nosotros"));
    assert!(text.contains("Trabaja con nosotros"));
}

#[test]
fn customer_service_contacts_take_precedence() {
    let resolver = fixture_resolver();
    assert_eq!(
        found(resolver.resolve("correo de servicio al cliente")),
        "✉️ El correo de atención al cliente es servicioalcliente@fanalca.com."
    );
    assert_eq!(
        found(resolver.resolve("¿me das el email?")),
        "✉️ Puedes escribirnos al correo general contacto@fanalca.com."
    );
    assert!(found(resolver.resolve("teléfono de atención al cliente")).contains("01 8000 510 100"));
    assert!(found(resolver.resolve("teléfono")).contains("+57 602 555 0100"));
}

#[test]
fn branches_social_and_web() {
    let resolver = fixture_resolver();
    let sites = found(resolver.resolve("¿qué sedes tienen?"));
    assert!(sites.starts_with("🏢 Nuestras sedes son:\n"));
    assert!(sites.contains("- Cali: Calle 13 # 31A-80"));
    assert!(sites.contains("- Bogotá: Carrera 7 # 71-21"));

    let social = found(resolver.resolve("instagram"));
    assert!(social.contains("- LinkedIn: https://www.linkedin.com/company/fanalca"));
    assert!(social.contains("- Instagram: https://www.instagram.com/fanalca"));
    assert!(!social.contains("Facebook"));

    assert_eq!(found(resolver.resolve("página web")), "🌍 Nuestro sitio web oficial es: https://fanalca.com.");
}

#[test]
fn social_without_networks_points_to_site() {
    let facts = FactTable::from_json_str(r#"{"sitio_web": "https://acme.co"}"#).unwrap();
    let text = found(StructuredResolver::new(facts, "Acme").resolve("redes sociales"));
    assert_eq!(text, "🌐 Sitio oficial: https://acme.co");
}

#[test]
fn absent_fields_and_unknown_topics_are_misses() {
    let empty = StructuredResolver::new(FactTable::default(), "Acme");
    assert_eq!(empty.resolve("correo"), Resolution::NotFound);
    assert_eq!(empty.resolve("horario"), Resolution::NotFound);
    assert_eq!(empty.resolve("sedes"), Resolution::NotFound);

    let resolver = fixture_resolver();
    assert_eq!(resolver.resolve("¿cuál es la misión de la empresa?"), Resolution::NotFound);
    assert_eq!(resolver.resolve(""), Resolution::NotFound);
}

#[test]
fn resolve_is_deterministic() {
    let resolver = fixture_resolver();
    for q in ["nit", "sedes", "empleo", "redes", "horario de atención", "dirección"] {
        assert_eq!(resolver.resolve(q), resolver.resolve(q));
    }
}

#[test]
fn topics_follow_priority_order() {
    assert_eq!(Topic::detect("correo de talento humano"), Some(Topic::Employment));
    assert_eq!(Topic::detect("dirección de la sede principal"), Some(Topic::Address));
    assert_eq!(Topic::detect("sedes en cali"), Some(Topic::Branches));
    assert_eq!(Topic::detect("misión"), None);
}

#[test]
fn fact_table_lookups() {
    let facts = FactTable::from_json_str(r#"{"a": {"b": "  x  ", "c": ""}, "n": 3, "l": [{"k": 1}, 2]}"#).unwrap();
    assert_eq!(facts.text("a.b"), Some("x"));
    assert_eq!(facts.text("a.c"), None, "empty strings read as absent");
    assert_eq!(facts.text("n"), None);
    assert_eq!(facts.text("a.b.z"), None);
    assert_eq!(facts.first_text(&["missing", "a.b"]), Some("x"));
    assert_eq!(facts.records("l").len(), 1);
    assert!(facts.records("a").is_empty());

    assert!(FactTable::from_json_str("[1, 2]").is_err());
}

#[test]
fn fact_table_loads_from_disk() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("facts.json");
    std::fs::write(&path, r#"{"horario_atencion": "24/7"}"#).unwrap();
    let resolver = StructuredResolver::new(FactTable::from_path(&path).unwrap(), "Acme");
    assert_eq!(found(resolver.resolve("horario")), "🕐 Nuestro horario de atención es 24/7.");
    assert!(FactTable::from_path(&tmp.path().join("nope.json")).is_err());
}
