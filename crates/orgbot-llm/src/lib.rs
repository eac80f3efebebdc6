//! Chat-model collaborators: an Ollama HTTP client and a deterministic fake
//! for offline runs and tests.
use std::sync::Arc;

use tracing::info;

use orgbot_core::config::LlmSettings;
use orgbot_core::traits::ChatModel;

pub mod error;
pub mod fake;
pub mod ollama;

pub use error::LlmError;
pub use fake::FakeChatModel;
pub use ollama::OllamaChat;

/// Returns the Ollama client, or the fake model when `APP_USE_FAKE_LLM` is `1`/`true`.
pub fn get_default_chat_model(settings: &LlmSettings) -> anyhow::Result<Arc<dyn ChatModel>> {
    let use_fake = std::env::var("APP_USE_FAKE_LLM").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true")).unwrap_or(false);
    if use_fake {
        info!("using fake chat model");
        return Ok(Arc::new(FakeChatModel));
    }
    info!(model = %settings.model, base_url = %settings.base_url, "using ollama chat model");
    Ok(Arc::new(OllamaChat::new(settings)?))
}
