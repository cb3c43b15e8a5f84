use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde::Deserialize;
use smartmama_assistant::{PlanRequest, generate_plan};
use smartmama_plan::{Mode, Plan, demo_plan};
use validator::Validate;

use crate::error::{ApiError, MISSING_PLAN_PARAMS};
use crate::routes::{AppState, not_blank};

#[derive(Debug, Deserialize, Validate)]
pub struct GeneratePlanBody {
    #[validate(required, custom(function = "not_blank"))]
    pub mode: Option<String>,
    #[validate(required, custom(function = "not_blank"))]
    pub period: Option<String>,
    pub goals: Option<String>,
}

impl GeneratePlanBody {
    fn into_request(self) -> Result<PlanRequest, ApiError> {
        self.validate()
            .map_err(|_| ApiError::BadRequest(MISSING_PLAN_PARAMS.to_owned()))?;

        let (Some(mode), Some(period)) = (self.mode, self.period) else {
            return Err(ApiError::BadRequest(MISSING_PLAN_PARAMS.to_owned()));
        };

        let mode = Mode::from_str(mode.trim())
            .map_err(|_| ApiError::BadRequest(MISSING_PLAN_PARAMS.to_owned()))?;

        Ok(PlanRequest {
            mode,
            period: period.trim().to_owned(),
            goals: self.goals,
        })
    }
}

/// POST /api/generate-plan
#[tracing::instrument(skip_all)]
pub async fn generate(
    State(app): State<AppState>,
    payload: Result<Json<GeneratePlanBody>, JsonRejection>,
) -> Result<Json<Plan>, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;

    let plan = generate_plan(
        app.model.as_ref(),
        &request,
        app.config.gemini.plan_max_output_tokens,
    )
    .await?;

    Ok(Json(plan))
}

/// GET /api/example-plan/{mode}
pub async fn example(Path(mode): Path<String>) -> Result<Json<Plan>, ApiError> {
    let mode = Mode::from_str(&mode)
        .map_err(|_| ApiError::BadRequest(format!("Неизвестный режим: {mode}")))?;

    Ok(Json(demo_plan(mode)))
}
