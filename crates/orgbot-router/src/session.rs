use serde::{Deserialize, Serialize};
use uuid::Uuid;

use orgbot_core::types::{Answer, ChatMessage, RouteDecision};

/// One completed exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub bot: String,
    pub route: RouteDecision,
}

/// Per-conversation state owned by the caller and passed into every turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub thread_id: String,
    pub history: Vec<Turn>,
    pub last_route: Option<RouteDecision>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self { thread_id: new_thread_id(), history: Vec::new(), last_route: None }
    }

    /// Starts a new conversation: clears the history and issues a fresh thread id.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn record(&mut self, user: &str, answer: &Answer) {
        self.last_route = Some(answer.route);
        self.history.push(Turn { user: user.to_string(), bot: answer.text.clone(), route: answer.route });
    }

    /// The last `max_turns` exchanges as alternating user/assistant messages.
    pub fn history_messages(&self, max_turns: usize) -> Vec<ChatMessage> {
        let start = self.history.len().saturating_sub(max_turns);
        self.history[start..]
            .iter()
            .flat_map(|t| [ChatMessage::user(t.user.clone()), ChatMessage::assistant(t.bot.clone())])
            .collect()
    }
}

fn new_thread_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("user-{}", &hex[..8])
}
