//! Keyword sets shared by the router, the resolver and the retriever.
//!
//! Matching is plain substring containment over the lowercased query, so
//! short entries such as `"hv"` or `"nit"` also fire inside longer words.

/// Employment and recruiting synonyms. Drives HR routing, the HR resolver
/// topic and query expansion.
pub const HR_TERMS: &[&str] = &[
    "contratación",
    "contratacion",
    "contratar",
    "selección",
    "seleccion",
    "rrhh",
    "recursos humanos",
    "talento",
    "talento humano",
    "trabaja con nosotros",
    "trabajar",
    "empleo",
    "vacante",
    "vacantes",
    "oferta laboral",
    "ofertas laborales",
    "postular",
    "postulación",
    "hoja de vida",
    "hv",
    "curriculum",
    "currículum",
    "cv",
];

/// Contact and identity fields answered from the fact table.
pub const CONTACT_TERMS: &[&str] = &[
    "correo",
    "email",
    "e-mail",
    "teléfono",
    "telefono",
    "dirección",
    "direccion",
    "ubicación",
    "ubicacion",
    "nit",
    "sede",
    "horario",
    "redes",
    "instagram",
    "linkedin",
    "facebook",
    "servicio",
    "atención",
    "sitio web",
    "página web",
    "pagina web",
];

/// Returns true when `haystack` contains any of `needles`.
///
/// `haystack` is expected to be lowercased already.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Same as [`contains_any`] for owned keyword lists coming from configuration.
pub fn contains_any_owned(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| !n.is_empty() && haystack.contains(n.as_str()))
}

pub fn is_hr_query(lowered: &str) -> bool {
    contains_any(lowered, HR_TERMS)
}
