use smartmama_plan::{Mode, Plan};

use crate::{AssistantError, LanguageModel, prompt, reply};

pub const PLAN_MAX_OUTPUT_TOKENS: u32 = 2000;

#[derive(Debug, Clone)]
pub struct PlanRequest {
    pub mode: Mode,
    pub period: String,
    pub goals: Option<String>,
}

/// Asks the model for a plan and parses its reply. Any parse failure is a hard error;
/// a partially valid plan is never returned.
#[tracing::instrument(skip(model), fields(mode = %request.mode, period = %request.period))]
pub async fn generate_plan(
    model: &dyn LanguageModel,
    request: &PlanRequest,
    max_output_tokens: u32,
) -> Result<Plan, AssistantError> {
    let prompt = prompt::plan_prompt(request.mode, &request.period, request.goals.as_deref());

    let text = model.generate(&prompt, max_output_tokens).await?;

    let plan = reply::parse_plan(&text).inspect_err(|err| {
        tracing::warn!(err = %err, reply_len = text.len(), "model reply is not a valid plan");
    })?;

    tracing::info!(blocks = plan.period_blocks.len(), "plan generated");

    Ok(plan)
}
