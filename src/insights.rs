//! Local productivity insights over the task store.
//!
//! The only analysis tab computed entirely client-side: workload totals,
//! urgency/importance counts, and the derived advice strings.

use chrono::NaiveDate;

use crate::classify::{URGENT_WINDOW_DAYS, days_until_due};
use crate::task::Task;

/// Importance at or above this counts toward the high-importance tally.
/// Deliberately stricter than the matrix threshold.
pub const HIGH_IMPORTANCE: u8 = 8;

/// Working hours assumed per day for the completion estimate.
pub const WORK_HOURS_PER_DAY: f64 = 8.0;

/// Urgent-task count above which the focus advice flips to a warning.
pub const URGENT_OVERLOAD: usize = 3;

/// Workload metrics for the insights view.
#[derive(Debug, Clone, PartialEq)]
pub struct InsightReport {
    pub total_tasks: usize,
    /// Sum of estimated hours across the store.
    pub total_hours: f64,
    /// Mean importance; 0 for an empty store.
    pub avg_importance: f64,
    /// Tasks due within the urgency window (or overdue).
    pub urgent_tasks: usize,
    /// Tasks with importance at or above [`HIGH_IMPORTANCE`].
    pub high_importance_tasks: usize,
    /// Total hours spread over [`WORK_HOURS_PER_DAY`]-hour days.
    pub estimated_completion_days: f64,
}

impl InsightReport {
    /// "high" above a 40-hour backlog, "moderate" otherwise.
    pub fn workload_intensity(&self) -> &'static str {
        if self.total_hours > 40.0 { "high" } else { "moderate" }
    }

    /// Focus recommendation based on the urgent-task count.
    pub fn focus_advice(&self) -> &'static str {
        if self.urgent_tasks > URGENT_OVERLOAD {
            "Too many urgent tasks! Consider delegating or reprioritizing."
        } else {
            "Good balance of urgent vs important tasks."
        }
    }

    /// Display-only completion percentage, capped at 100.
    pub fn completion_rate(&self) -> f64 {
        (self.total_tasks as f64 * 10.0).min(100.0)
    }
}

/// Compute the report for the given date. An empty store yields zeros.
pub fn compute(tasks: &[Task], today: NaiveDate) -> InsightReport {
    let total_tasks = tasks.len();
    let total_hours: f64 = tasks.iter().map(|t| t.estimated_hours).sum();
    let avg_importance = if total_tasks == 0 {
        0.0
    } else {
        tasks.iter().map(|t| t.importance as f64).sum::<f64>() / total_tasks as f64
    };
    let urgent_tasks = tasks
        .iter()
        .filter(|t| days_until_due(t, today) <= URGENT_WINDOW_DAYS)
        .count();
    let high_importance_tasks = tasks
        .iter()
        .filter(|t| t.importance >= HIGH_IMPORTANCE)
        .count();

    InsightReport {
        total_tasks,
        total_hours,
        avg_importance,
        urgent_tasks,
        high_importance_tasks,
        estimated_completion_days: total_hours / WORK_HOURS_PER_DAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::sample_tasks;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn totals_over_sample_tasks() {
        let report = compute(&sample_tasks(today()), today());
        assert_eq!(report.total_tasks, 6);
        assert_eq!(report.total_hours, 21.0);
        assert_eq!(report.estimated_completion_days, 21.0 / 8.0);
        // importances: 9, 10, 6, 7, 4, 8
        assert!((report.avg_importance - 44.0 / 6.0).abs() < 1e-9);
        // due today, tomorrow, +2d are within the 3-day window
        assert_eq!(report.urgent_tasks, 4);
        assert_eq!(report.high_importance_tasks, 3);
    }

    #[test]
    fn empty_store_yields_zeros() {
        let report = compute(&[], today());
        assert_eq!(report.total_tasks, 0);
        assert_eq!(report.total_hours, 0.0);
        assert_eq!(report.avg_importance, 0.0);
        assert_eq!(report.completion_rate(), 0.0);
    }

    #[test]
    fn intensity_flips_above_forty_hours() {
        let mut tasks = sample_tasks(today());
        assert_eq!(compute(&tasks, today()).workload_intensity(), "moderate");
        tasks.push(crate::task::Task::new("7", "Big one", today(), 30.0, 5));
        assert_eq!(compute(&tasks, today()).workload_intensity(), "high");
    }

    #[test]
    fn focus_advice_warns_on_urgent_overload() {
        let report = compute(&sample_tasks(today()), today());
        // Four urgent tasks in the samples: above the threshold of three.
        assert!(report.focus_advice().contains("Too many urgent"));

        let calm = compute(&sample_tasks(today())[..2], today());
        assert!(calm.focus_advice().contains("Good balance"));
    }

    #[test]
    fn completion_rate_caps_at_hundred() {
        let mut report = compute(&sample_tasks(today()), today());
        assert_eq!(report.completion_rate(), 60.0);
        report.total_tasks = 25;
        assert_eq!(report.completion_rate(), 100.0);
    }
}
