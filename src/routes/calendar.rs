use axum::{Json, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use smartmama_plan::{CalendarSession, DayDetail, DayKey, MonthView, Plan, Task, YearMonth};
use time::OffsetDateTime;

use crate::error::ApiError;

/// One user interaction with the calendar.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CalendarAction {
    SetPlan {
        plan: Option<Plan>,
    },
    SetMonth {
        month: YearMonth,
    },
    PreviousMonth,
    NextMonth,
    ToggleTask {
        day: DayKey,
        #[serde(rename = "taskId")]
        task_id: String,
    },
    DeleteTask {
        day: DayKey,
        #[serde(rename = "taskId")]
        task_id: String,
    },
    AddTask {
        day: DayKey,
        text: String,
    },
    ToggleDay {
        day: DayKey,
    },
}

#[derive(Debug, Deserialize)]
pub struct CalendarBody {
    pub session: Option<CalendarSession>,
    pub action: CalendarAction,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarResponse {
    pub session: CalendarSession,
    pub view: MonthView,
    /// Derived tasks brought in by this action.
    pub derived_added: usize,
    /// False when the action targeted a day or task that does not exist.
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

#[derive(Debug, Deserialize)]
pub struct DayBody {
    pub session: CalendarSession,
    pub day: DayKey,
}

fn current_month() -> YearMonth {
    YearMonth::from_date(OffsetDateTime::now_utc().date())
}

/// Applies `action` to `session` and builds the response.
pub fn apply_action(
    mut session: CalendarSession,
    action: CalendarAction,
) -> Result<CalendarResponse, ApiError> {
    let mut derived_added = 0;
    let mut changed = true;
    let mut task = None;

    match action {
        CalendarAction::SetPlan { plan } => derived_added = session.on_plan_changed(plan),
        CalendarAction::SetMonth { month } => derived_added = session.on_month_changed(month),
        CalendarAction::PreviousMonth => derived_added = session.previous_month(),
        CalendarAction::NextMonth => derived_added = session.next_month(),
        CalendarAction::ToggleTask { day, task_id } => {
            changed = session.toggle_task(day, &task_id).is_some();
        }
        CalendarAction::DeleteTask { day, task_id } => {
            changed = session.delete_task(day, &task_id).is_some();
        }
        CalendarAction::AddTask { day, text } => task = Some(session.add_task(day, &text)?),
        CalendarAction::ToggleDay { day } => {
            session.toggle_day_complete(day);
        }
    }

    let view = session.month_view();

    Ok(CalendarResponse {
        session,
        view,
        derived_added,
        changed,
        task,
    })
}

/// POST /api/calendar
#[tracing::instrument(skip_all)]
pub async fn apply(
    payload: Result<Json<CalendarBody>, JsonRejection>,
) -> Result<Json<CalendarResponse>, ApiError> {
    let Json(body) = payload?;

    let session = body
        .session
        .unwrap_or_else(|| CalendarSession::new(current_month()));

    tracing::debug!(action = ?body.action, month = ?session.month(), "calendar action");

    apply_action(session, body.action).map(Json)
}

/// POST /api/calendar/day
pub async fn day(
    payload: Result<Json<DayBody>, JsonRejection>,
) -> Result<Json<DayDetail>, ApiError> {
    let Json(body) = payload?;

    Ok(Json(body.session.day_detail(body.day)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartmama_plan::{Mode, demo_plan};

    fn june() -> CalendarSession {
        CalendarSession::new(YearMonth::new(2025, 5).unwrap())
    }

    #[test]
    fn test_set_plan_derives_visible_month() {
        let response = apply_action(
            june(),
            CalendarAction::SetPlan {
                plan: Some(demo_plan(Mode::Pregnancy)),
            },
        )
        .unwrap();

        assert!(response.derived_added > 0);
        assert!(response.view.has_plan);
        assert!(response.view.days[0].has_plan);
    }

    #[test]
    fn test_missing_task_is_reported_unchanged() {
        let day = DayKey::new(2025, 5, 3).unwrap();

        let response = apply_action(
            june(),
            CalendarAction::ToggleTask {
                day,
                task_id: "nope".to_owned(),
            },
        )
        .unwrap();

        assert!(!response.changed);
        assert!(response.session.day(day).is_none());
    }

    #[test]
    fn test_blank_custom_task_is_rejected() {
        let err = apply_action(
            june(),
            CalendarAction::AddTask {
                day: DayKey::new(2025, 5, 3).unwrap(),
                text: "  ".to_owned(),
            },
        )
        .unwrap_err();

        assert!(matches!(err, ApiError::Calendar(_)));
    }
}
