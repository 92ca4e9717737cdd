use async_trait::async_trait;

use crate::domain::ChatTurn;

#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the turns as one request and returns the first choice's text.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, CompletionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
