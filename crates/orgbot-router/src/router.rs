use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use orgbot_core::config::FeatureFlags;
use orgbot_core::lexicon::{contains_any, is_hr_query, CONTACT_TERMS};
use orgbot_core::traits::ChatModel;
use orgbot_core::types::{ChatMessage, RouteDecision};

use crate::prompts::router_prompt;

/// Two-stage classifier: keyword heuristics first, the chat model only when
/// no keyword fires. Never fails; every degraded path answers `Rag`.
pub struct QueryRouter {
    chat: Arc<dyn ChatModel>,
    prompt: String,
    temperature: f32,
    flags: FeatureFlags,
    last: Mutex<Option<RouteDecision>>,
}

impl QueryRouter {
    pub fn new(chat: Arc<dyn ChatModel>, brand: &str, temperature: f32, flags: FeatureFlags) -> Self {
        Self { chat, prompt: router_prompt(brand), temperature, flags, last: Mutex::new(None) }
    }

    pub fn classify(&self, query: &str) -> RouteDecision {
        let q = query.trim().to_lowercase();
        let decision = if q.is_empty() {
            RouteDecision::Rag
        } else if self.flags.hr_routing && is_hr_query(&q) {
            debug!("employment keywords matched");
            RouteDecision::Structured
        } else if contains_any(&q, CONTACT_TERMS) {
            debug!("contact keywords matched");
            RouteDecision::Structured
        } else {
            self.ask_model(query)
        };
        if let Ok(mut last) = self.last.lock() {
            *last = Some(decision);
        }
        decision
    }

    /// Most recent decision, for display only.
    pub fn last_decision(&self) -> Option<RouteDecision> {
        self.last.lock().ok().and_then(|l| *l)
    }

    fn ask_model(&self, query: &str) -> RouteDecision {
        let messages = [ChatMessage::system(self.prompt.clone()), ChatMessage::user(query)];
        match self.chat.chat(&messages, self.temperature) {
            Ok(reply) => {
                let label = reply.trim().to_uppercase();
                RouteDecision::from_label(&label).unwrap_or_else(|| {
                    debug!(reply = %label, "unrecognized routing label");
                    RouteDecision::Rag
                })
            }
            Err(e) => {
                warn!(model = self.chat.name(), error = %e, "routing model failed, using RAG");
                RouteDecision::Rag
            }
        }
    }
}
