use std::collections::{BTreeSet, HashMap};

use tracing::{debug, info};

use orgbot_core::traits::Retriever;
use orgbot_core::types::{DocId, DocumentCollection, RetrievalHit};

use crate::expand::expand_query;
use crate::tokenize::{build_analyzer, features, tokenize};

pub const DEFAULT_EXCERPT_CHARS: usize = 1500;

type TermId = u32;

/// `top_k` / `min_similarity` pair used by [`LexicalIndex::search_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
	pub top_k: usize,
	pub min_similarity: f32,
}

impl Default for SearchParams {
	fn default() -> Self { Self { top_k: 4, min_similarity: 0.02 } }
}

/// In-memory TF-IDF space over unigrams and bigrams.
///
/// Built once from a collection; there is no incremental update. Row `i` of
/// the matrix belongs to document `i`, and every row is L2-normalized so the
/// dot product with a normalized query is the cosine similarity.
pub struct LexicalIndex {
	vocabulary: HashMap<String, TermId>,
	idf: Vec<f32>,
	rows: Vec<Vec<(TermId, f32)>>,
	excerpts: Vec<String>,
}

impl LexicalIndex {
	pub fn build(collection: &DocumentCollection) -> Self {
		Self::build_with_excerpt_chars(collection, DEFAULT_EXCERPT_CHARS)
	}

	pub fn build_with_excerpt_chars(collection: &DocumentCollection, excerpt_chars: usize) -> Self {
		let mut analyzer = build_analyzer();
		let counts: Vec<HashMap<String, u32>> = collection
			.iter()
			.map(|doc| term_counts(features(&tokenize(&mut analyzer, &doc.text))))
			.collect();

		let terms: BTreeSet<&str> = counts.iter().flat_map(|c| c.keys().map(String::as_str)).collect();
		let vocabulary: HashMap<String, TermId> = terms
			.into_iter()
			.enumerate()
			.map(|(i, t)| (t.to_string(), i as TermId))
			.collect();

		let mut df = vec![0u32; vocabulary.len()];
		for doc_counts in &counts {
			for term in doc_counts.keys() { df[vocabulary[term] as usize] += 1; }
		}
		let n = counts.len() as f32;
		let idf: Vec<f32> = df.iter().map(|&d| ((1.0 + n) / (1.0 + d as f32)).ln() + 1.0).collect();

		let rows: Vec<Vec<(TermId, f32)>> = counts
			.iter()
			.map(|doc_counts| {
				let mut row: Vec<(TermId, f32)> = doc_counts
					.iter()
					.map(|(term, &tf)| {
						let id = vocabulary[term];
						(id, tf as f32 * idf[id as usize])
					})
					.collect();
				row.sort_unstable_by_key(|&(id, _)| id);
				l2_normalize(&mut row);
				row
			})
			.collect();

		let excerpts = collection.iter().map(|d| excerpt(&d.text, excerpt_chars)).collect();

		info!(documents = rows.len(), terms = vocabulary.len(), "built lexical index");
		Self { vocabulary, idf, rows, excerpts }
	}

	pub fn len(&self) -> usize { self.rows.len() }

	pub fn is_empty(&self) -> bool { self.rows.is_empty() }

	pub fn vocabulary_len(&self) -> usize { self.vocabulary.len() }

	/// Cosine similarity of the expanded query against every document, best first.
	///
	/// Ties keep collection order. Scores below `min_similarity` are dropped and
	/// at most `top_k` hits are returned.
	pub fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> Vec<RetrievalHit> {
		if top_k == 0 || self.rows.is_empty() { return Vec::new(); }
		let expanded = expand_query(query);
		let query_vec = self.vectorize(&expanded);

		let mut scored: Vec<(DocId, f32)> = self
			.rows
			.iter()
			.enumerate()
			.map(|(doc, row)| (doc, dot(row, &query_vec)))
			.collect();
		// stable: equal scores stay in collection order
		scored.sort_by(|a, b| b.1.total_cmp(&a.1));

		let hits: Vec<RetrievalHit> = scored
			.into_iter()
			.filter(|&(_, score)| score >= min_similarity)
			.take(top_k)
			.map(|(doc, score)| RetrievalHit { document_id: doc, score, excerpt: self.excerpts[doc].clone() })
			.collect();
		debug!(query, hits = hits.len(), "lexical search");
		hits
	}

	pub fn search_with(&self, query: &str, params: SearchParams) -> Vec<RetrievalHit> {
		self.search(query, params.top_k, params.min_similarity)
	}

	/// Cosine similarity between `text` taken verbatim (no HR expansion) and one document.
	pub fn similarity(&self, text: &str, doc: DocId) -> Option<f32> {
		let row = self.rows.get(doc)?;
		Some(dot(row, &self.vectorize(text)))
	}

	/// Normalized query vector restricted to the fitted vocabulary.
	fn vectorize(&self, text: &str) -> HashMap<TermId, f32> {
		let mut analyzer = build_analyzer();
		let mut row: Vec<(TermId, f32)> = term_counts(features(&tokenize(&mut analyzer, text)))
			.into_iter()
			.filter_map(|(term, tf)| {
				self.vocabulary.get(&term).map(|&id| (id, tf as f32 * self.idf[id as usize]))
			})
			.collect();
		l2_normalize(&mut row);
		row.into_iter().collect()
	}
}

impl Retriever for LexicalIndex {
	fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> Vec<RetrievalHit> {
		LexicalIndex::search(self, query, top_k, min_similarity)
	}
}

fn term_counts(terms: Vec<String>) -> HashMap<String, u32> {
	let mut counts = HashMap::new();
	for t in terms { *counts.entry(t).or_insert(0) += 1; }
	counts
}

fn l2_normalize(row: &mut [(TermId, f32)]) {
	let norm = row.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
	if norm > 0.0 { for (_, w) in row.iter_mut() { *w /= norm; } }
}

fn dot(row: &[(TermId, f32)], query: &HashMap<TermId, f32>) -> f32 {
	if query.is_empty() { return 0.0; }
	row.iter().filter_map(|(id, w)| query.get(id).map(|q| w * q)).fold(0.0, |acc, x| acc + x)
}

/// Hard cutoff after `max_chars` characters.
fn excerpt(text: &str, max_chars: usize) -> String {
	match text.char_indices().nth(max_chars) {
		Some((byte_idx, _)) => text[..byte_idx].to_string(),
		None => text.to_string(),
	}
}
