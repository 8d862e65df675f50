//! Diagnostic error types for taskdeck.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]`
//! derives, providing error codes and help text so users know exactly what
//! went wrong and how to fix it. Validation failures are non-fatal by
//! design: callers surface them in the dashboard banner and leave the task
//! store untouched.

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for taskdeck.
///
/// Each variant wraps a subsystem-specific error, preserving the full
/// diagnostic chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum TaskdeckError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] crate::client::ClientError),
}

/// Convenience alias for functions returning taskdeck results.
pub type TaskdeckResult<T> = std::result::Result<T, TaskdeckError>;

// ---------------------------------------------------------------------------
// Ingestion errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("please fill in all required fields")]
    #[diagnostic(
        code(taskdeck::ingest::missing_fields),
        help("Title, due date, estimated hours, and importance are all required.")
    )]
    MissingFields,

    #[error("invalid due date: \"{value}\"")]
    #[diagnostic(
        code(taskdeck::ingest::bad_date),
        help("Due dates use the ISO-8601 calendar form, e.g. 2026-03-01.")
    )]
    InvalidDate { value: String },

    #[error("{field} is not a number: \"{value}\"")]
    #[diagnostic(code(taskdeck::ingest::bad_number))]
    InvalidNumber {
        field: &'static str,
        value: String,
    },

    #[error("importance must be between 1 and 10, got {value}")]
    #[diagnostic(code(taskdeck::ingest::importance_range))]
    ImportanceOutOfRange { value: i64 },

    #[error("estimated hours must be positive, got {value}")]
    #[diagnostic(code(taskdeck::ingest::hours_positive))]
    NonPositiveHours { value: f64 },

    #[error("invalid JSON: {message}")]
    #[diagnostic(
        code(taskdeck::ingest::malformed),
        help("Bulk input must be a JSON document. Check for syntax errors.")
    )]
    MalformedJson { message: String },

    #[error("bulk input must be a JSON array of tasks")]
    #[diagnostic(
        code(taskdeck::ingest::not_an_array),
        help("Wrap the task objects in [ ... ]; a single object is not accepted.")
    )]
    NotAnArray,

    #[error("bulk input has {} invalid field(s): {}", .errors.len(), summarize(.errors))]
    #[diagnostic(
        code(taskdeck::ingest::invalid_fields),
        help(
            "Each task needs title, due_date (ISO-8601), estimated_hours (> 0), \
             and importance (1–10); id and dependencies are optional."
        )
    )]
    InvalidFields { errors: Vec<FieldError> },
}

/// Convenience alias for ingestion results.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// A single field-level problem found while validating a bulk document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Zero-based position of the task in the input array.
    pub index: usize,
    pub field: Field,
    pub problem: Problem,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task[{}].{}: {}", self.index, self.field, self.problem)
    }
}

/// The schema fields a bulk task may fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    DueDate,
    EstimatedHours,
    Importance,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::DueDate => "due_date",
            Field::EstimatedHours => "estimated_hours",
            Field::Importance => "importance",
        };
        f.write_str(name)
    }
}

/// What went wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    /// Absent, or present with an unusable type.
    Missing,
    /// Not an ISO-8601 calendar date.
    BadDate,
    /// Zero or negative where a positive number is required.
    NotPositive,
    /// Outside the 1–10 importance scale.
    OutOfRange,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Problem::Missing => "missing",
            Problem::BadDate => "not an ISO-8601 date",
            Problem::NotPositive => "must be positive",
            Problem::OutOfRange => "must be between 1 and 10",
        };
        f.write_str(text)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    let mut parts: Vec<String> = errors.iter().take(3).map(|e| e.to_string()).collect();
    if errors.len() > 3 {
        parts.push(format!("… and {} more", errors.len() - 3));
    }
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_error_converts_to_taskdeck_error() {
        let err = IngestError::ImportanceOutOfRange { value: 11 };
        let top: TaskdeckError = err.into();
        assert!(matches!(
            top,
            TaskdeckError::Ingest(IngestError::ImportanceOutOfRange { .. })
        ));
    }

    #[test]
    fn field_errors_render_with_index_and_field() {
        let err = FieldError {
            index: 2,
            field: Field::Importance,
            problem: Problem::OutOfRange,
        };
        assert_eq!(err.to_string(), "task[2].importance: must be between 1 and 10");
    }

    #[test]
    fn invalid_fields_summary_truncates_long_lists() {
        let errors: Vec<FieldError> = (0..5)
            .map(|index| FieldError {
                index,
                field: Field::Title,
                problem: Problem::Missing,
            })
            .collect();
        let msg = IngestError::InvalidFields { errors }.to_string();
        assert!(msg.contains("5 invalid field(s)"));
        assert!(msg.contains("… and 2 more"));
    }
}
