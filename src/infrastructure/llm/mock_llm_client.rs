use crate::application::ports::{CompletionError, LlmClient};
use crate::domain::{ChatTurn, MessageRole};

/// Offline stand-in that echoes the question back with canned advice.
pub struct MockLlmClient;

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, CompletionError> {
        let question = turns
            .iter()
            .rev()
            .find(|turn| turn.role == MessageRole::User)
            .map(|turn| turn.content.as_str())
            .unwrap_or_default();

        Ok(format!(
            "Scaffold answer for \"{}\": consult your local agriculture extension officer.",
            question
        ))
    }
}
