#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use orgbot_core::config::Settings;
use orgbot_core::data_loader::load_documents;
use orgbot_core::traits::{ChatModel, Retriever};
use orgbot_core::types::{ChatMessage, DocumentCollection, RetrievalHit};
use orgbot_facts::FactTable;
use orgbot_text::LexicalIndex;

/// Chat model replaying queued replies (`Err` entries fail the call) and
/// recording every message list it receives.
#[derive(Default)]
pub struct ScriptedChat {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedChat {
    pub fn new<I: IntoIterator<Item = Result<&'static str, &'static str>>>(replies: I) -> Arc<Self> {
        let queue = replies.into_iter().map(|r| r.map(str::to_string).map_err(str::to_string)).collect();
        Arc::new(Self { replies: Mutex::new(queue), ..Self::default() })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

impl ChatModel for ScriptedChat {
    fn name(&self) -> &str {
        "scripted"
    }

    fn chat(&self, messages: &[ChatMessage], _temperature: f32) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(messages.to_vec());
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(e)) => Err(anyhow::anyhow!(e)),
            None => Err(anyhow::anyhow!("no scripted reply left")),
        }
    }
}

/// Lexical index that counts how often it is searched.
pub struct CountingRetriever {
    pub inner: LexicalIndex,
    pub searches: AtomicUsize,
}

impl CountingRetriever {
    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }
}

impl Retriever for CountingRetriever {
    fn search(&self, query: &str, top_k: usize, min_similarity: f32) -> Vec<RetrievalHit> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        self.inner.search(query, top_k, min_similarity)
    }
}

fn root() -> PathBuf {
    // crates/orgbot-router -> crates -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).ancestors().nth(2).unwrap().to_path_buf()
}

pub fn knowledge_base() -> DocumentCollection {
    load_documents(&root().join("test_data/knowledge_base.json")).expect("knowledge base")
}

pub fn facts() -> FactTable {
    FactTable::from_path(&root().join("test_data/structured_data.json")).expect("facts")
}

pub fn counting_retriever(docs: &DocumentCollection) -> CountingRetriever {
    CountingRetriever { inner: LexicalIndex::build(docs), searches: AtomicUsize::new(0) }
}

pub fn settings() -> Settings {
    Settings::default()
}
