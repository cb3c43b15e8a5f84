use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use smartmama_assistant::AssistantError;
use smartmama_plan::CalendarError;
use thiserror::Error;

pub const MISSING_PLAN_PARAMS: &str = "Не указаны обязательные параметры";
pub const MISSING_MESSAGE: &str = "Сообщение обязательно";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Assistant(#[from] AssistantError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Json(_) | ApiError::Calendar(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Assistant(err) => {
                StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(err = %self, "request failed");
        } else {
            tracing::debug!(err = %self, status = status.as_u16(), "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
