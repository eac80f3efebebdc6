#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("temperature {0} outside [0.0, 1.5]")]
    Temperature(f32),

    #[error("empty response from {provider}")]
    EmptyResponse { provider: &'static str },
}

pub type Result<T> = std::result::Result<T, LlmError>;
