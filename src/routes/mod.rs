use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use smartmama_assistant::LanguageModel;

mod calendar;
mod chat;
mod health;
mod index;
mod plan;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub model: Arc<dyn LanguageModel>,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/", get(index::page))
        .route("/api/generate-plan", post(plan::generate))
        .route("/api/example-plan/{mode}", get(plan::example))
        .route("/api/ai-doctor", post(chat::ask))
        .route("/api/calendar", post(calendar::apply))
        .route("/api/calendar/day", post(calendar::day))
        .with_state(app_state)
}

/// Rejects strings made of whitespace only.
fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank"));
    }

    Ok(())
}
