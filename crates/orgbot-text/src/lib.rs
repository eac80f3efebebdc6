//! orgbot-text
//!
//! TF-IDF lexical retrieval over the knowledge base: tokenization on top of
//! tantivy's analyzers, the in-memory `LexicalIndex`, HR query expansion and
//! the context block handed to the generator.
pub mod context;
pub mod expand;
pub mod index;
pub mod tokenize;

pub use context::{assemble, CONTEXT_SEPARATOR};
pub use expand::expand_query;
pub use index::{LexicalIndex, SearchParams, DEFAULT_EXCERPT_CHARS};
