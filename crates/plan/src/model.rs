use serde::{Deserialize, Serialize};

/// What the plan is about: a pregnancy counted in weeks or a child counted in months.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Pregnancy,
    Child,
}

impl Mode {
    /// Inclusive bounds of the period the form accepts for this mode.
    pub fn period_bounds(&self) -> (u8, u8) {
        match self {
            Mode::Pregnancy => (1, 42),
            Mode::Child => (0, 36),
        }
    }
}

/// One unit of a plan, a week or a month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBlock {
    pub period: String,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checklist {
    pub title: String,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

/// A generated care plan. Immutable once received; a new generation replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub summary: String,
    #[serde(rename = "weeklyPlan", alias = "periodBlocks")]
    pub period_blocks: Vec<PeriodBlock>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl Plan {
    pub fn block(&self, index: usize) -> Option<&PeriodBlock> {
        self.period_blocks.get(index)
    }
}
