use std::sync::Arc;

use tracing::{debug, info, warn};

use orgbot_core::config::{FeatureFlags, Settings};
use orgbot_core::traits::{ChatModel, Retriever};
use orgbot_core::types::{Answer, ChatMessage, DocumentCollection, RouteDecision};
use orgbot_facts::{FactTable, Resolution, StructuredResolver};
use orgbot_text::{assemble, LexicalIndex};

use crate::gate::DomainGate;
use crate::prompts::{answer_prompt, greeting_reply, off_topic_refusal, GENERATION_FAILURE, NOT_AVAILABLE};
use crate::router::QueryRouter;
use crate::session::Session;

/// Previous exchanges forwarded to the generator.
const HISTORY_WINDOW: usize = 6;

/// Turn-level orchestration: greeting shortcut, routing, fact lookup, then
/// gated retrieval and grounded generation.
///
/// Everything inside is read-only after construction, so one engine can serve
/// many sessions.
pub struct AnswerEngine<R: Retriever = LexicalIndex> {
    router: QueryRouter,
    resolver: StructuredResolver,
    retriever: R,
    documents: Arc<DocumentCollection>,
    chat: Arc<dyn ChatModel>,
    gate: DomainGate,
    brand: String,
    flags: FeatureFlags,
    top_k: usize,
    min_similarity: f32,
    temperature: f32,
}

impl AnswerEngine<LexicalIndex> {
    /// Builds the lexical index over `documents` and wires the default engine.
    pub fn from_settings(
        settings: &Settings,
        documents: DocumentCollection,
        facts: FactTable,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        let index = LexicalIndex::build_with_excerpt_chars(&documents, settings.search.excerpt_chars);
        Self::new(settings, index, Arc::new(documents), facts, chat)
    }
}

impl<R: Retriever> AnswerEngine<R> {
    pub fn new(
        settings: &Settings,
        retriever: R,
        documents: Arc<DocumentCollection>,
        facts: FactTable,
        chat: Arc<dyn ChatModel>,
    ) -> Self {
        let brand = settings.assistant.brand.clone();
        let router = QueryRouter::new(
            Arc::clone(&chat),
            &brand,
            settings.llm.classifier_temperature,
            settings.features,
        );
        info!(documents = documents.len(), facts = !facts.is_empty(), model = chat.name(), "answer engine ready");
        Self {
            router,
            resolver: StructuredResolver::new(facts, brand.clone()),
            retriever,
            documents,
            chat,
            gate: DomainGate::new(&settings.assistant),
            brand,
            flags: settings.features,
            top_k: settings.search.top_k,
            min_similarity: settings.search.min_similarity,
            temperature: settings.llm.temperature,
        }
    }

    pub fn router(&self) -> &QueryRouter {
        &self.router
    }

    pub fn retriever(&self) -> &R {
        &self.retriever
    }

    pub fn documents(&self) -> &DocumentCollection {
        &self.documents
    }

    /// Answers one user turn and records it in `session`. Never fails: every
    /// degraded path ends in a fixed user-facing message.
    pub fn answer(&self, query: &str, session: &mut Session) -> Answer {
        let answer = self.answer_turn(query, session);
        debug!(thread = %session.thread_id, route = %answer.route, "turn answered");
        session.record(query, &answer);
        answer
    }

    fn answer_turn(&self, query: &str, session: &Session) -> Answer {
        if self.flags.greeting_shortcut && self.gate.is_greeting(query) {
            return Answer { text: greeting_reply(&self.brand), route: RouteDecision::Structured };
        }

        if self.router.classify(query) == RouteDecision::Structured {
            match self.resolver.resolve(query) {
                Resolution::Found(text) => return Answer { text, route: RouteDecision::Structured },
                Resolution::NotFound => debug!("no structured answer, falling back to retrieval"),
            }
        }

        Answer { text: self.answer_from_knowledge_base(query, session), route: RouteDecision::Rag }
    }

    fn answer_from_knowledge_base(&self, query: &str, session: &Session) -> String {
        if self.flags.domain_gate && !self.gate.allows(query) {
            debug!("query outside the organization's domain");
            return off_topic_refusal(&self.brand);
        }

        let hits = self.retriever.search(query, self.top_k, self.min_similarity);
        let context = assemble(&hits, &self.documents);
        if context.is_empty() {
            debug!("no document cleared the similarity floor");
            return NOT_AVAILABLE.to_string();
        }

        let mut messages = vec![ChatMessage::system(answer_prompt(&self.brand, &context))];
        messages.extend(session.history_messages(HISTORY_WINDOW));
        messages.push(ChatMessage::user(query));

        match self.chat.chat(&messages, self.temperature) {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => NOT_AVAILABLE.to_string(),
            Err(e) => {
                warn!(model = self.chat.name(), error = %e, "answer generation failed");
                GENERATION_FAILURE.to_string()
            }
        }
    }
}
