//! The task record shared by the store, the fallback computations, and the
//! remote analysis wire format.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A unit of work with a deadline, effort estimate, importance rating, and
/// dependency set.
///
/// Ids are opaque strings. Uniqueness is a caller convention, not enforced
/// on ingestion — duplicate ids coexist in the store and are removed
/// together (see [`TaskStore::remove`](crate::store::TaskStore::remove)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Opaque identifier, assigned by the store or supplied in bulk input.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Calendar due date (ISO-8601 on the wire).
    pub due_date: NaiveDate,
    /// Positive effort estimate in hours.
    pub estimated_hours: f64,
    /// Importance rating, 1–10 inclusive.
    pub importance: u8,
    /// Ids of tasks this task depends on. May reference ids not present in
    /// the store; dangling references are legal.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl Task {
    /// Construct a task with no dependencies. Test and sample helper.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        due_date: NaiveDate,
        estimated_hours: f64,
        importance: u8,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_date,
            estimated_hours,
            importance,
            dependencies: Vec::new(),
        }
    }

    /// Set the dependency list.
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }
}

/// The six demonstration tasks seeded when the dashboard starts without
/// task input, dated relative to `today`.
pub fn sample_tasks(today: NaiveDate) -> Vec<Task> {
    vec![
        Task::new("1", "Complete project proposal", today + Days::new(1), 4.0, 9),
        Task::new("2", "Fix critical bug in login system", today, 2.0, 10)
            .with_dependencies(vec!["1".into()]),
        Task::new("3", "Write API documentation", today + Days::new(7), 3.0, 6),
        Task::new("4", "Setup development environment", today + Days::new(2), 1.0, 7),
        Task::new("5", "Team weekly meeting", today, 1.0, 4),
        Task::new("6", "Learn new framework", today + Days::new(30), 10.0, 8),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn serializes_due_date_as_iso_8601() {
        let task = Task::new("1", "Write report", day("2026-03-01"), 2.0, 5);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["due_date"], "2026-03-01");
        assert_eq!(json["dependencies"], serde_json::json!([]));
    }

    #[test]
    fn deserializes_without_dependencies() {
        let task: Task = serde_json::from_str(
            r#"{"id":"7","title":"A","due_date":"2026-01-01","estimated_hours":2,"importance":5}"#,
        )
        .unwrap();
        assert!(task.dependencies.is_empty());
        assert_eq!(task.due_date, day("2026-01-01"));
    }

    #[test]
    fn sample_tasks_have_unique_sequential_ids() {
        let tasks = sample_tasks(day("2026-08-07"));
        assert_eq!(tasks.len(), 6);
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.id, (i + 1).to_string());
        }
    }
}
