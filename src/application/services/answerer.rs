use std::sync::Arc;

use crate::application::ports::{CompletionError, LlmClient};
use crate::domain::{ChatTurn, Question};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful agriculture chatbot for Indian farmers. \
Give short, practical, and clear answers in simple English or Hindi if needed.";

pub struct Answerer {
    llm_client: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl Answerer {
    pub fn new(llm_client: Arc<dyn LlmClient>, system_prompt: String) -> Self {
        Self {
            llm_client,
            system_prompt,
        }
    }

    /// One stateless completion: the system prompt followed by the question.
    pub async fn answer(&self, question: &Question) -> Result<String, CompletionError> {
        let turns = [
            ChatTurn::system(self.system_prompt.as_str()),
            ChatTurn::user(question.as_str()),
        ];

        let answer = self.llm_client.complete(&turns).await?;

        if answer.trim().is_empty() {
            return Err(CompletionError::InvalidResponse(
                "completion contained no text".to_string(),
            ));
        }

        tracing::info!(chars = answer.len(), "Answer received");

        Ok(answer)
    }
}
