use tantivy::tokenizer::{LowerCaser, SimpleTokenizer, TextAnalyzer, TokenStream};

/// Tokens shorter than this many characters are dropped.
pub const MIN_TOKEN_CHARS: usize = 2;

pub fn build_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.build()
}

/// Lowercased alphanumeric tokens of at least `MIN_TOKEN_CHARS` characters, in text order.
pub fn tokenize(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
	let mut tokens = Vec::new();
	let mut stream = analyzer.token_stream(text);
	while stream.advance() {
		let token = &stream.token().text;
		if token.chars().count() >= MIN_TOKEN_CHARS { tokens.push(token.clone()); }
	}
	tokens
}

/// Unigrams followed by bigrams of adjacent tokens.
pub fn features(tokens: &[String]) -> Vec<String> {
	let mut out = Vec::with_capacity(tokens.len() * 2);
	out.extend(tokens.iter().cloned());
	out.extend(tokens.windows(2).map(|w| format!("{} {}", w[0], w[1])));
	out
}
