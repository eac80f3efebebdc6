//! Domain types shared by the retriever, the resolver and the router.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal position of a document inside its collection.
pub type DocId = usize;

/// A page of the knowledge base.
///
/// - `id`: position in the collection, assigned at load time
/// - `url`: source page; identity for upstream deduplication
/// - `title`: page title, may be empty
/// - `text`: whitespace-collapsed page text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub url: String,
    pub title: String,
    pub text: String,
}

/// Ordered, read-only set of documents loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct DocumentCollection {
    docs: Vec<Document>,
}

impl DocumentCollection {
    /// Builds a collection from `(url, title, text)` triples, assigning ids by position
    /// and collapsing runs of whitespace in the text.
    pub fn from_records<I, U, T, X>(records: I) -> Self
    where
        I: IntoIterator<Item = (U, T, X)>,
        U: Into<String>,
        T: Into<String>,
        X: AsRef<str>,
    {
        let docs = records
            .into_iter()
            .enumerate()
            .map(|(id, (url, title, text))| Document {
                id,
                url: url.into(),
                title: title.into(),
                text: normalize_whitespace(text.as_ref()),
            })
            .collect();
        Self { docs }
    }

    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.get(id)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.docs.iter()
    }
}

impl<'a> IntoIterator for &'a DocumentCollection {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}

/// Collapses every whitespace run into a single space and trims the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Which information source answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteDecision {
    Structured,
    Rag,
}

impl RouteDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structured => "STRUCTURED",
            Self::Rag => "RAG",
        }
    }

    /// Parses a classifier label. Anything other than the two exact labels is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "STRUCTURED" => Some(Self::Structured),
            "RAG" => Some(Self::Rag),
            _ => None,
        }
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One similarity match. `score` is a cosine similarity; higher is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalHit {
    pub document_id: DocId,
    pub score: f32,
    pub excerpt: String,
}

/// What the caller gets back for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub route: RouteDecision,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A role-tagged message sent to the chat collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}
