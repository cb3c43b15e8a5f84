use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{CalendarError, PeriodBlock, YearMonth};

/// Identity of one calendar day. Month is zero-based.
///
/// Serialized as `"{year}-{month + 1}-{day}"`, e.g. `"2025-3-14"` for 14 March 2025.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct DayKey {
    year: i32,
    month: u8,
    day: u8,
}

impl DayKey {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        YearMonth::new(year, month)?
            .day(day)
            .ok_or_else(|| CalendarError::InvalidDayKey(format!("{year}-{}-{day}", month + 1)))
    }

    pub(crate) fn from_parts(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::from_parts(self.year, self.month)
    }

    /// Id of a task derived from `source` item `index` on this day.
    pub fn derived_task_id(&self, source: TaskSource, index: usize) -> String {
        format!("{self}-{source}-{index}")
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.year, self.month + 1, self.day)
    }
}

impl FromStr for DayKey {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidDayKey(s.to_owned());

        // Negative years keep their sign on the first component.
        let (sign, rest) = match s.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, s),
        };

        let mut parts = rest.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        let year = year.parse::<i32>().map_err(|_| invalid())? * sign;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        let day = day.parse::<u8>().map_err(|_| invalid())?;

        if month == 0 {
            return Err(invalid());
        }

        DayKey::new(year, month - 1, day).map_err(|_| invalid())
    }
}

impl From<DayKey> for String {
    fn from(value: DayKey) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for DayKey {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Plan list a derived task comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TaskSource {
    Goal,
    Activity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub custom: bool,
}

impl Task {
    fn derived(day: DayKey, source: TaskSource, index: usize, text: &str) -> Self {
        Self {
            id: day.derived_task_id(source, index),
            text: text.to_owned(),
            completed: false,
            custom: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCompletion {
    pub day_key: DayKey,
    pub completed: bool,
    pub tasks: Vec<Task>,
}

impl DayCompletion {
    pub fn empty(day_key: DayKey) -> Self {
        Self {
            day_key,
            completed: false,
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.task(id).is_some()
    }

    pub fn completed_tasks(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }
}

/// Tasks for `day` from a block: goals first, then activities, in plan order.
pub fn derive_tasks(day: DayKey, block: &PeriodBlock) -> Vec<Task> {
    let goals = block
        .goals
        .iter()
        .enumerate()
        .map(|(index, text)| Task::derived(day, TaskSource::Goal, index, text));

    let activities = block
        .activities
        .iter()
        .enumerate()
        .map(|(index, text)| Task::derived(day, TaskSource::Activity, index, text));

    goals.chain(activities).collect()
}
