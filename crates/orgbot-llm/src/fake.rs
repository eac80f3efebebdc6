use orgbot_core::traits::ChatModel;
use orgbot_core::types::{ChatMessage, Role};

/// Offline stand-in: answers routing prompts with `RAG` and echoes the question otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeChatModel;

impl ChatModel for FakeChatModel {
    fn name(&self) -> &str { "fake" }

    fn chat(&self, messages: &[ChatMessage], _temperature: f32) -> anyhow::Result<String> {
        let is_routing = messages
            .iter()
            .any(|m| m.role == Role::System && m.content.contains("STRUCTURED") && m.content.contains("RAG"));
        if is_routing { return Ok("RAG".to_string()); }
        let question = messages.iter().rev().find(|m| m.role == Role::User).map(|m| m.content.as_str()).unwrap_or("");
        Ok(format!("(respuesta simulada) {question}"))
    }
}
