//! Eisenhower classification: the client-side fallback for the remote
//! matrix endpoint.
//!
//! Pure functions of task fields and today's date. Urgency and importance
//! each split the store in two, so every task lands in exactly one of the
//! four quadrants.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Tasks due within this many days count as urgent. Overdue tasks are
/// always urgent.
pub const URGENT_WINDOW_DAYS: i64 = 3;

/// Importance at or above this counts as important.
pub const IMPORTANCE_THRESHOLD: u8 = 7;

/// The four Eisenhower quadrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// Urgent and important.
    DoFirst,
    /// Important but not urgent.
    Schedule,
    /// Urgent but not important.
    Delegate,
    /// Neither urgent nor important.
    Eliminate,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ];

    /// Wire/bucket name, matching the remote matrix shape.
    pub fn key(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "do_first",
            Quadrant::Schedule => "schedule",
            Quadrant::Delegate => "delegate",
            Quadrant::Eliminate => "eliminate",
        }
    }

    /// Display heading for the quadrant.
    pub fn title(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Do First",
            Quadrant::Schedule => "Schedule",
            Quadrant::Delegate => "Delegate",
            Quadrant::Eliminate => "Eliminate",
        }
    }

    /// The urgency/importance combination the quadrant stands for.
    pub fn subtitle(&self) -> &'static str {
        match self {
            Quadrant::DoFirst => "urgent & important",
            Quadrant::Schedule => "important, not urgent",
            Quadrant::Delegate => "urgent, not important",
            Quadrant::Eliminate => "not urgent, not important",
        }
    }
}

/// Whole days from `today` to the task's due date; negative when overdue.
pub fn days_until_due(task: &Task, today: NaiveDate) -> i64 {
    task.due_date.signed_duration_since(today).num_days()
}

/// Classify one task into its quadrant for the given date.
pub fn classify(task: &Task, today: NaiveDate) -> Quadrant {
    let urgent = days_until_due(task, today) <= URGENT_WINDOW_DAYS;
    let important = task.importance >= IMPORTANCE_THRESHOLD;
    match (urgent, important) {
        (true, true) => Quadrant::DoFirst,
        (false, true) => Quadrant::Schedule,
        (true, false) => Quadrant::Delegate,
        (false, false) => Quadrant::Eliminate,
    }
}

/// The four-bucket matrix, in the same shape the remote endpoint returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EisenhowerMatrix {
    pub do_first: Vec<Task>,
    pub schedule: Vec<Task>,
    pub delegate: Vec<Task>,
    pub eliminate: Vec<Task>,
}

impl EisenhowerMatrix {
    pub fn quadrant(&self, quadrant: Quadrant) -> &[Task] {
        match quadrant {
            Quadrant::DoFirst => &self.do_first,
            Quadrant::Schedule => &self.schedule,
            Quadrant::Delegate => &self.delegate,
            Quadrant::Eliminate => &self.eliminate,
        }
    }

    /// Total tasks across all four buckets.
    pub fn total(&self) -> usize {
        Quadrant::ALL.iter().map(|q| self.quadrant(*q).len()).sum()
    }

    /// The static demonstration matrix shown when the store is empty,
    /// dated relative to `today`.
    pub fn sample(today: NaiveDate) -> Self {
        Self {
            do_first: vec![
                Task::new("s1", "Fix critical production bug", today, 2.0, 10),
                Task::new("s2", "Submit quarterly report", today, 3.0, 9),
            ],
            schedule: vec![
                Task::new("s3", "Plan next sprint", today + Days::new(7), 4.0, 8),
                Task::new("s4", "Research new technologies", today + Days::new(14), 6.0, 7),
            ],
            delegate: vec![
                Task::new("s5", "Team meeting preparation", today, 1.0, 5),
                Task::new("s6", "Email responses", today + Days::new(1), 1.0, 4),
            ],
            eliminate: vec![
                Task::new("s7", "Organize desk", today + Days::new(30), 1.0, 3),
                Task::new("s8", "Read industry news", today + Days::new(14), 1.0, 2),
            ],
        }
    }
}

/// Bucket every task into the matrix, preserving store order within each
/// quadrant.
pub fn build_matrix(tasks: &[Task], today: NaiveDate) -> EisenhowerMatrix {
    let mut matrix = EisenhowerMatrix::default();
    for task in tasks {
        let bucket = match classify(task, today) {
            Quadrant::DoFirst => &mut matrix.do_first,
            Quadrant::Schedule => &mut matrix.schedule,
            Quadrant::Delegate => &mut matrix.delegate,
            Quadrant::Eliminate => &mut matrix.eliminate,
        };
        bucket.push(task.clone());
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    fn task(importance: u8, due_in_days: i64) -> Task {
        let due = today() + chrono::Duration::days(due_in_days);
        Task::new("t", "task", due, 1.0, importance)
    }

    #[test]
    fn urgent_and_important_is_do_first() {
        // importance=9, due today
        assert_eq!(classify(&task(9, 0), today()), Quadrant::DoFirst);
        assert_eq!(classify(&task(7, 3), today()), Quadrant::DoFirst);
    }

    #[test]
    fn important_but_distant_is_schedule() {
        // importance=8, due in 10 days
        assert_eq!(classify(&task(8, 10), today()), Quadrant::Schedule);
        assert_eq!(classify(&task(7, 4), today()), Quadrant::Schedule);
    }

    #[test]
    fn urgent_but_unimportant_is_delegate() {
        assert_eq!(classify(&task(6, 3), today()), Quadrant::Delegate);
        assert_eq!(classify(&task(1, 0), today()), Quadrant::Delegate);
    }

    #[test]
    fn neither_is_eliminate() {
        assert_eq!(classify(&task(6, 4), today()), Quadrant::Eliminate);
        assert_eq!(classify(&task(1, 30), today()), Quadrant::Eliminate);
    }

    #[test]
    fn overdue_tasks_are_urgent() {
        assert_eq!(classify(&task(9, -5), today()), Quadrant::DoFirst);
        assert_eq!(classify(&task(2, -1), today()), Quadrant::Delegate);
    }

    #[test]
    fn matrix_partitions_the_store_exactly() {
        let tasks = crate::task::sample_tasks(today());
        let matrix = build_matrix(&tasks, today());
        assert_eq!(matrix.total(), tasks.len());

        // Every task appears in exactly one bucket.
        for task in &tasks {
            let hits = Quadrant::ALL
                .iter()
                .filter(|q| matrix.quadrant(**q).iter().any(|t| t.id == task.id))
                .count();
            assert_eq!(hits, 1, "task {} should be in exactly one quadrant", task.id);
        }
    }

    #[test]
    fn sample_matrix_fills_every_quadrant() {
        let sample = EisenhowerMatrix::sample(today());
        for quadrant in Quadrant::ALL {
            assert_eq!(sample.quadrant(quadrant).len(), 2);
        }
        // The sample is itself consistent with the classifier.
        for quadrant in Quadrant::ALL {
            for task in sample.quadrant(quadrant) {
                assert_eq!(classify(task, today()), quadrant);
            }
        }
    }

    #[test]
    fn matrix_round_trips_through_wire_shape() {
        let matrix = build_matrix(&crate::task::sample_tasks(today()), today());
        let json = serde_json::to_string(&matrix).unwrap();
        let back: EisenhowerMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, matrix);
    }
}
