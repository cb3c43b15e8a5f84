use serde::{Deserialize, Serialize};

use crate::{
    CalendarError, DayCompletion, DayCompletionStore, DayKey, PeriodBlock, Plan, Task, YearMonth,
    day_range, derive_tasks, period,
};

/// Calendar state of one client session: the active plan, the displayed month and the
/// per-day completion records. Only mutated through the methods below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSession {
    plan: Option<Plan>,
    month: YearMonth,
    #[serde(default)]
    store: DayCompletionStore,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub day: u8,
    pub day_key: DayKey,
    pub has_plan: bool,
    pub headline: Option<String>,
    pub completed: bool,
    pub completed_tasks: usize,
    pub total_tasks: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub month: YearMonth,
    pub days_in_month: u8,
    /// Empty cells before day one in a Sunday-first grid.
    pub leading_blanks: u8,
    pub has_plan: bool,
    pub days: Vec<DaySummary>,
}

/// Everything shown for a single day. `period` is `None` when the plan has no content
/// for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayDetail {
    pub day_key: DayKey,
    pub period: Option<PeriodBlock>,
    pub completed: bool,
    pub tasks: Vec<Task>,
}

impl CalendarSession {
    pub fn new(month: YearMonth) -> Self {
        Self {
            plan: None,
            month,
            store: DayCompletionStore::new(),
        }
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn month(&self) -> YearMonth {
        self.month
    }

    pub fn store(&self) -> &DayCompletionStore {
        &self.store
    }

    /// Replaces the active plan and reconciles the displayed month against it. Stored
    /// day state is kept, including when the plan is cleared.
    pub fn on_plan_changed(&mut self, plan: Option<Plan>) -> usize {
        self.plan = plan;
        self.reconcile_visible_month()
    }

    /// Shows `month` and reconciles it. Other months keep their stored state.
    pub fn on_month_changed(&mut self, month: YearMonth) -> usize {
        self.month = month;
        self.reconcile_visible_month()
    }

    pub fn previous_month(&mut self) -> usize {
        self.on_month_changed(self.month.previous())
    }

    pub fn next_month(&mut self) -> usize {
        self.on_month_changed(self.month.next())
    }

    /// Brings derived tasks of every day of the displayed month that has an owning block
    /// into the store. Returns the number of tasks added.
    fn reconcile_visible_month(&mut self) -> usize {
        let Some(plan) = &self.plan else {
            return 0;
        };

        let days_in_month = self.month.days_in_month();
        let mut added = 0;

        for (index, block) in plan.period_blocks.iter().enumerate() {
            let Some(days) = day_range(index, days_in_month) else {
                break;
            };

            for day in days {
                if let Some(key) = self.month.day(day) {
                    added += self.store.reconcile(key, derive_tasks(key, block));
                }
            }
        }

        tracing::debug!(
            year = self.month.year(),
            month = self.month.month(),
            added,
            "calendar month reconciled"
        );

        added
    }

    pub fn plan_for_day(&self, day: DayKey) -> Option<&PeriodBlock> {
        self.plan
            .as_ref()
            .and_then(|plan| period::block_for_day(plan, day.day()))
    }

    pub fn day(&self, day: DayKey) -> Option<&DayCompletion> {
        self.store.get(day)
    }

    pub fn toggle_task(&mut self, day: DayKey, task_id: &str) -> Option<bool> {
        self.store.toggle_task(day, task_id)
    }

    pub fn delete_task(&mut self, day: DayKey, task_id: &str) -> Option<Task> {
        self.store.delete_task(day, task_id)
    }

    pub fn add_task(&mut self, day: DayKey, text: &str) -> Result<Task, CalendarError> {
        self.store.add_task(day, text)
    }

    pub fn toggle_day_complete(&mut self, day: DayKey) -> bool {
        self.store.toggle_day_complete(day)
    }

    pub fn day_detail(&self, day: DayKey) -> DayDetail {
        let entry = self.store.get(day);

        DayDetail {
            day_key: day,
            period: self.plan_for_day(day).cloned(),
            completed: entry.is_some_and(|entry| entry.completed),
            tasks: entry.map(|entry| entry.tasks.clone()).unwrap_or_default(),
        }
    }

    pub fn month_view(&self) -> MonthView {
        let days = self
            .month
            .days()
            .map(|key| {
                let block = self.plan_for_day(key);
                let entry = self.store.get(key);

                DaySummary {
                    day: key.day(),
                    day_key: key,
                    has_plan: block.is_some(),
                    headline: block.and_then(|block| block.goals.first().cloned()),
                    completed: entry.is_some_and(|entry| entry.completed),
                    completed_tasks: entry.map_or(0, DayCompletion::completed_tasks),
                    total_tasks: entry.map_or(0, |entry| entry.tasks.len()),
                }
            })
            .collect();

        MonthView {
            month: self.month,
            days_in_month: self.month.days_in_month(),
            leading_blanks: self.month.first_weekday(),
            has_plan: self.plan.is_some(),
            days,
        }
    }
}
