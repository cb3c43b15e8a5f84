use serde::{Deserialize, Serialize};
use smartmama_plan::{Mode, Plan};

use crate::{AssistantError, LanguageModel, prompt};

pub const CHAT_MAX_OUTPUT_TOKENS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: String,
    pub history: Vec<ChatMessage>,
    pub plan: Option<Plan>,
    pub mode: Option<Mode>,
    pub period: Option<String>,
}

/// Answers one question, grounded in the conversation so far and the user's plan.
#[tracing::instrument(skip_all, fields(history = request.history.len(), with_plan = request.plan.is_some()))]
pub async fn ask(
    model: &dyn LanguageModel,
    request: &ChatRequest,
    max_output_tokens: u32,
) -> Result<String, AssistantError> {
    let prompt = prompt::chat_prompt(
        &request.message,
        &request.history,
        request.plan.as_ref(),
        request.mode,
        request.period.as_deref(),
    );

    match model.generate(&prompt, max_output_tokens).await {
        Ok(answer) if !answer.trim().is_empty() => Ok(answer),
        Ok(_) | Err(AssistantError::EmptyReply) => Err(AssistantError::NoAnswer),
        Err(AssistantError::Upstream { status, message }) => {
            tracing::error!(status, message = %message, "chat model request failed");
            Err(AssistantError::ChatUnavailable)
        }
        Err(err) => Err(err),
    }
}
