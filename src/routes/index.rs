use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse},
};
use smartmama_plan::Mode;

pub const SERVER_ERROR_MESSAGE: &str = "Что-то пошло не так, попробуйте позже";

#[derive(askama::Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub pregnancy_weeks: (u8, u8),
    pub child_months: (u8, u8),
}

impl Default for IndexTemplate {
    fn default() -> Self {
        Self {
            pregnancy_weeks: Mode::Pregnancy.period_bounds(),
            child_months: Mode::Child.period_bounds(),
        }
    }
}

/// GET /
pub async fn page() -> impl IntoResponse {
    match IndexTemplate::default().render() {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            tracing::error!(err = %err, "failed to render index page");

            (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE).into_response()
        }
    }
}
