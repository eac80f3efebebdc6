//! Loading and merging of the scraped knowledge base files.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::DocumentCollection;

/// A knowledge base record as written by the scraper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub url: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "texto", default)]
    pub text: String,
}

/// Reads and deserializes a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    serde_json::from_slice(&bytes).map_err(|source| Error::Json { path: path.to_path_buf(), source })
}

pub fn load_raw_documents(path: &Path) -> Result<Vec<RawDocument>> {
    read_json(path)
}

/// Loads the knowledge base into an immutable collection with normalized text.
pub fn load_documents(path: &Path) -> Result<DocumentCollection> {
    let raw = load_raw_documents(path)?;
    let collection = into_collection(raw);
    info!(path = %path.display(), documents = collection.len(), "loaded knowledge base");
    Ok(collection)
}

pub fn into_collection(raw: Vec<RawDocument>) -> DocumentCollection {
    DocumentCollection::from_records(raw.into_iter().map(|d| (d.url, d.title, d.text)))
}

/// Concatenates two record lists keeping only the first record seen for each url.
pub fn merge_collections(base: Vec<RawDocument>, extra: Vec<RawDocument>) -> Vec<RawDocument> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(base.len() + extra.len());
    for doc in base.into_iter().chain(extra) {
        if seen.insert(doc.url.clone()) {
            merged.push(doc);
        } else {
            debug!(url = %doc.url, "dropping duplicate page");
        }
    }
    merged
}

pub fn write_raw_documents(path: &Path, docs: &[RawDocument]) -> Result<()> {
    let json = serde_json::to_string_pretty(docs).map_err(|source| Error::Json { path: path.to_path_buf(), source })?;
    fs::write(path, json).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}
