use crate::types::{ChatMessage, RetrievalHit};

/// Blocking text-generation collaborator used for fallback classification and
/// for composing grounded answers.
pub trait ChatModel: Send + Sync {
    fn name(&self) -> &str;
    fn chat(&self, messages: &[ChatMessage], temperature: f32) -> anyhow::Result<String>;
}

/// Similarity search over the knowledge base. An empty result is not an error.
pub trait Retriever: Send + Sync {
    fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> Vec<RetrievalHit>;
}
