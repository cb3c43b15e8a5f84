use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize, Serializer};

use crate::{CalendarError, DayCompletion, DayKey, Task};

/// Per-day task lists and completion flags for one session.
///
/// Entries are created lazily and never removed. Every mutation is local to a single day.
/// Each entry's `day_key` equals its key and task ids are unique within a day; a
/// deserialized store that breaks either is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<DayKey, DayCompletion>")]
pub struct DayCompletionStore {
    days: BTreeMap<DayKey, DayCompletion>,
}

impl Serialize for DayCompletionStore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.days.serialize(serializer)
    }
}

impl TryFrom<BTreeMap<DayKey, DayCompletion>> for DayCompletionStore {
    type Error = CalendarError;

    fn try_from(days: BTreeMap<DayKey, DayCompletion>) -> Result<Self, Self::Error> {
        for (key, entry) in &days {
            if entry.day_key != *key {
                return Err(CalendarError::InvalidDayKey(format!(
                    "{} stored under {key}",
                    entry.day_key
                )));
            }

            let mut ids = HashSet::new();
            if let Some(task) = entry.tasks.iter().find(|task| !ids.insert(task.id.as_str())) {
                return Err(CalendarError::DuplicateTaskId(task.id.to_owned()));
            }
        }

        Ok(Self { days })
    }
}

impl DayCompletionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, day: DayKey) -> Option<&DayCompletion> {
        self.days.get(&day)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DayKey, &DayCompletion)> {
        self.days.iter()
    }

    /// Replaces the entry for `day` with `mutator(entry)`, starting from an empty entry
    /// when the day has none yet.
    pub fn upsert<F>(&mut self, day: DayKey, mutator: F) -> &DayCompletion
    where
        F: FnOnce(DayCompletion) -> DayCompletion,
    {
        let current = self
            .days
            .remove(&day)
            .unwrap_or_else(|| DayCompletion::empty(day));

        let mut next = mutator(current);
        next.day_key = day;

        self.days.entry(day).or_insert(next)
    }

    /// Additive merge of freshly derived tasks. A new day takes `derived` as is; an
    /// existing day only gains the derived tasks whose id it does not hold yet. Nothing
    /// is removed or reset. Returns the number of tasks added.
    pub fn reconcile(&mut self, day: DayKey, derived: Vec<Task>) -> usize {
        match self.days.get_mut(&day) {
            None => {
                let added = derived.len();
                self.days.insert(
                    day,
                    DayCompletion {
                        day_key: day,
                        completed: false,
                        tasks: derived,
                    },
                );
                added
            }
            Some(existing) => {
                let mut added = 0;
                for task in derived {
                    if !existing.contains(&task.id) {
                        existing.tasks.push(task);
                        added += 1;
                    }
                }
                added
            }
        }
    }

    /// Flips a task's completion. Returns the new state, `None` when the task is unknown.
    pub fn toggle_task(&mut self, day: DayKey, task_id: &str) -> Option<bool> {
        let task = self
            .days
            .get_mut(&day)?
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)?;

        task.completed = !task.completed;

        Some(task.completed)
    }

    /// Removes a task, custom or derived. A derived task comes back on the next
    /// reconciliation of its day since its id is regenerated.
    pub fn delete_task(&mut self, day: DayKey, task_id: &str) -> Option<Task> {
        let entry = self.days.get_mut(&day)?;
        let position = entry.tasks.iter().position(|task| task.id == task_id)?;

        Some(entry.tasks.remove(position))
    }

    /// Appends a user task to `day`, creating the day entry if needed.
    pub fn add_task(&mut self, day: DayKey, text: &str) -> Result<Task, CalendarError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CalendarError::EmptyTaskText);
        }

        let entry = self
            .days
            .entry(day)
            .or_insert_with(|| DayCompletion::empty(day));

        let mut id = custom_task_id(day);
        while entry.contains(&id) {
            id = custom_task_id(day);
        }

        let task = Task {
            id,
            text: text.to_owned(),
            completed: false,
            custom: true,
        };
        entry.tasks.push(task.clone());

        Ok(task)
    }

    /// Flips the day's own completion flag, independent of its tasks.
    pub fn toggle_day_complete(&mut self, day: DayKey) -> bool {
        self.upsert(day, |mut entry| {
            entry.completed = !entry.completed;
            entry
        })
        .completed
    }
}

fn custom_task_id(day: DayKey) -> String {
    format!("{day}-custom-{}", ulid::Ulid::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> DayKey {
        DayKey::new(2025, 9, 5).unwrap()
    }

    fn derived(ids: &[&str]) -> Vec<Task> {
        ids.iter()
            .map(|id| Task {
                id: (*id).to_owned(),
                text: format!("text {id}"),
                completed: false,
                custom: false,
            })
            .collect()
    }

    #[test]
    fn test_reconcile_creates_then_only_adds_missing() {
        let mut store = DayCompletionStore::new();

        assert_eq!(store.reconcile(day(), derived(&["a", "b"])), 2);
        assert_eq!(store.toggle_task(day(), "a"), Some(true));

        assert_eq!(store.reconcile(day(), derived(&["a", "b", "c"])), 1);

        let entry = store.get(day()).unwrap();
        let ids: Vec<&str> = entry.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
        assert!(entry.task("a").unwrap().completed);
    }

    #[test]
    fn test_reconcile_never_removes_tasks() {
        let mut store = DayCompletionStore::new();
        store.reconcile(day(), derived(&["a", "b"]));
        store.add_task(day(), "своя задача").unwrap();

        assert_eq!(store.reconcile(day(), Vec::new()), 0);
        assert_eq!(store.get(day()).unwrap().tasks.len(), 3);
    }

    #[test]
    fn test_unknown_task_is_noop() {
        let mut store = DayCompletionStore::new();

        assert_eq!(store.toggle_task(day(), "missing"), None);
        assert_eq!(store.delete_task(day(), "missing"), None);
        assert!(store.is_empty());

        store.reconcile(day(), derived(&["a"]));
        let before = store.clone();
        assert_eq!(store.toggle_task(day(), "missing"), None);
        assert_eq!(store.delete_task(day(), "missing"), None);
        assert_eq!(store, before);
    }

    #[test]
    fn test_add_task_is_custom_and_unique() {
        let mut store = DayCompletionStore::new();

        let first = store.add_task(day(), "  Купить витамины  ").unwrap();
        let second = store.add_task(day(), "Купить витамины").unwrap();

        assert_eq!(first.text, "Купить витамины");
        assert!(first.custom && !first.completed);
        assert!(first.id.starts_with("2025-10-5-custom-"));
        assert_ne!(first.id, second.id);
        assert_eq!(store.get(day()).unwrap().tasks.len(), 2);
    }

    #[test]
    fn test_add_blank_task_rejected() {
        let mut store = DayCompletionStore::new();

        assert_eq!(store.add_task(day(), "   "), Err(CalendarError::EmptyTaskText));
        assert!(store.get(day()).is_none());
    }

    #[test]
    fn test_toggle_day_complete_is_independent_of_tasks() {
        let mut store = DayCompletionStore::new();
        store.reconcile(day(), derived(&["a"]));

        assert!(store.toggle_day_complete(day()));
        assert!(!store.get(day()).unwrap().task("a").unwrap().completed);

        store.toggle_task(day(), "a");
        assert!(store.get(day()).unwrap().completed);

        assert!(!store.toggle_day_complete(day()));
    }

    #[test]
    fn test_upsert_keeps_key() {
        let mut store = DayCompletionStore::new();
        let other = DayKey::new(2000, 0, 1).unwrap();

        let entry = store.upsert(day(), |mut entry| {
            entry.day_key = other;
            entry.completed = true;
            entry
        });

        assert_eq!(entry.day_key, day());
        assert!(store.get(other).is_none());
    }

    #[test]
    fn test_delete_task_removes_only_that_task() {
        let mut store = DayCompletionStore::new();
        store.reconcile(day(), derived(&["a", "b"]));

        let removed = store.delete_task(day(), "a").unwrap();

        assert_eq!(removed.id, "a");
        assert_eq!(store.get(day()).unwrap().tasks.len(), 1);
    }
}
