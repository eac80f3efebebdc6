use orgbot_core::types::{DocumentCollection, RetrievalHit};

pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Renders hits as `[title] excerpt (Fuente: url)` blocks joined by [`CONTEXT_SEPARATOR`].
///
/// Title and source are omitted when the document has none. No hits yields an
/// empty string, which callers treat as "no information available".
pub fn assemble(hits: &[RetrievalHit], documents: &DocumentCollection) -> String {
	hits.iter()
		.map(|hit| {
			let doc = documents.get(hit.document_id);
			let title = doc.map(|d| d.title.trim()).filter(|t| !t.is_empty());
			let url = doc.map(|d| d.url.trim()).filter(|u| !u.is_empty());

			let mut parts = Vec::with_capacity(3);
			if let Some(t) = title { parts.push(format!("[{t}]")); }
			if !hit.excerpt.is_empty() { parts.push(hit.excerpt.clone()); }
			if let Some(u) = url { parts.push(format!("(Fuente: {u})")); }
			parts.join(" ")
		})
		.collect::<Vec<_>>()
		.join(CONTEXT_SEPARATOR)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn hit(id: usize, excerpt: &str) -> RetrievalHit {
		RetrievalHit { document_id: id, score: 0.5, excerpt: excerpt.to_string() }
	}

	#[test]
	fn empty_hits_give_empty_context() {
		let docs = DocumentCollection::from_records([("https://x", "X", "texto")]);
		assert_eq!(assemble(&[], &docs), "");
	}

	#[test]
	fn blocks_render_title_and_source_when_present() {
		let docs = DocumentCollection::from_records([
			("https://fanalca.com/nosotros/", "Nosotros", "Somos un grupo"),
			("", "", "Sin metadatos"),
		]);
		let ctx = assemble(&[hit(0, "Somos un grupo"), hit(1, "Sin metadatos")], &docs);
		assert_eq!(
			ctx,
			"[Nosotros] Somos un grupo (Fuente: https://fanalca.com/nosotros/)\n\n---\n\nSin metadatos"
		);
	}
}
