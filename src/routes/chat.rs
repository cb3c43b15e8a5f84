use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use smartmama_assistant::{ChatMessage, ChatRequest};
use smartmama_plan::{Mode, Plan};
use validator::Validate;

use crate::error::{ApiError, MISSING_MESSAGE};
use crate::routes::{AppState, not_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AskBody {
    #[validate(required, custom(function = "not_blank"))]
    pub message: Option<String>,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub plan_data: Option<Plan>,
    pub mode: Option<Mode>,
    pub period: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub response: String,
}

/// POST /api/ai-doctor
#[tracing::instrument(skip_all)]
pub async fn ask(
    State(app): State<AppState>,
    payload: Result<Json<AskBody>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(body) = payload?;

    body.validate()
        .map_err(|_| ApiError::BadRequest(MISSING_MESSAGE.to_owned()))?;

    let request = ChatRequest {
        message: body.message.unwrap_or_default(),
        history: body.history,
        plan: body.plan_data,
        mode: body.mode,
        period: body.period,
    };

    let response = smartmama_assistant::ask(
        app.model.as_ref(),
        &request,
        app.config.gemini.chat_max_output_tokens,
    )
    .await?;

    Ok(Json(AskResponse { response }))
}
