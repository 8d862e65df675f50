//! Task ingestion: form validation and bulk JSON loading.
//!
//! Two entry points feed the task store. [`validate_form`] checks a single
//! task typed field-by-field (the add-task form); [`parse_bulk`] checks a
//! whole JSON document against an explicit schema in one pass, reporting
//! every field-level problem it finds rather than stopping at the first.
//!
//! Both paths enforce the same rules: required title/date/hours/importance,
//! importance in 1–10, hours strictly positive.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{Field, FieldError, IngestError, IngestResult, Problem};

/// Raw form input for a single task, all fields as typed by the user.
/// Empty strings mean the field was left blank.
#[derive(Debug, Clone, Default)]
pub struct TaskForm {
    pub title: String,
    pub due_date: String,
    pub estimated_hours: String,
    pub importance: String,
    /// Comma-separated dependency ids; blank entries are dropped.
    pub dependencies: String,
}

/// A validated task, minus the id the store will assign.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub title: String,
    pub due_date: NaiveDate,
    pub estimated_hours: f64,
    pub importance: u8,
    pub dependencies: Vec<String>,
}

/// One element of a validated bulk document. `id` is the optional explicit
/// id; the store fills in a counter-based default when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkEntry {
    pub id: Option<String>,
    pub fields: TaskFields,
}

/// Validate a single task form.
///
/// Mirrors the dashboard's add-task rules: every required field present,
/// the date ISO-8601, hours positive, importance within 1–10. The first
/// violation is returned; nothing is mutated on failure.
pub fn validate_form(form: &TaskForm) -> IngestResult<TaskFields> {
    let title = form.title.trim();
    let due_date = form.due_date.trim();
    let hours = form.estimated_hours.trim();
    let importance = form.importance.trim();

    if title.is_empty() || due_date.is_empty() || hours.is_empty() || importance.is_empty() {
        return Err(IngestError::MissingFields);
    }

    let due_date: NaiveDate = due_date.parse().map_err(|_| IngestError::InvalidDate {
        value: due_date.to_string(),
    })?;

    let estimated_hours: f64 = hours.parse().map_err(|_| IngestError::InvalidNumber {
        field: "estimated hours",
        value: hours.to_string(),
    })?;
    if estimated_hours <= 0.0 {
        return Err(IngestError::NonPositiveHours {
            value: estimated_hours,
        });
    }

    let importance: i64 = importance.parse().map_err(|_| IngestError::InvalidNumber {
        field: "importance",
        value: importance.to_string(),
    })?;
    if !(1..=10).contains(&importance) {
        return Err(IngestError::ImportanceOutOfRange { value: importance });
    }

    Ok(TaskFields {
        title: title.to_string(),
        due_date,
        estimated_hours,
        importance: importance as u8,
        dependencies: split_dependencies(&form.dependencies),
    })
}

/// Split a comma-separated dependency field, trimming and dropping blanks.
pub fn split_dependencies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|dep| !dep.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse and validate a bulk JSON document in a single pass.
///
/// The document must be a JSON array of objects with required keys
/// `title`, `due_date`, `estimated_hours`, `importance` and optional keys
/// `id` (string or number) and `dependencies` (array of strings). All
/// field-level problems across the whole document are collected and
/// returned together in [`IngestError::InvalidFields`].
pub fn parse_bulk(text: &str) -> IngestResult<Vec<BulkEntry>> {
    let document: Value =
        serde_json::from_str(text).map_err(|e| IngestError::MalformedJson {
            message: e.to_string(),
        })?;

    let Value::Array(elements) = document else {
        return Err(IngestError::NotAnArray);
    };

    let mut entries = Vec::with_capacity(elements.len());
    let mut errors = Vec::new();

    for (index, element) in elements.iter().enumerate() {
        if let Some(entry) = validate_element(index, element, &mut errors) {
            entries.push(entry);
        }
    }

    if errors.is_empty() {
        Ok(entries)
    } else {
        Err(IngestError::InvalidFields { errors })
    }
}

/// Check one array element against the schema, recording every problem.
/// Returns the entry only when the element is fully valid.
fn validate_element(
    index: usize,
    element: &Value,
    errors: &mut Vec<FieldError>,
) -> Option<BulkEntry> {
    let before = errors.len();
    let mut fail = |field, problem| {
        errors.push(FieldError {
            index,
            field,
            problem,
        })
    };

    let title = match element.get("title").and_then(Value::as_str) {
        Some(t) if !t.trim().is_empty() => Some(t.trim().to_string()),
        _ => {
            fail(Field::Title, Problem::Missing);
            None
        }
    };

    let due_date = match element.get("due_date").and_then(Value::as_str) {
        Some(raw) => match raw.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(_) => {
                fail(Field::DueDate, Problem::BadDate);
                None
            }
        },
        None => {
            fail(Field::DueDate, Problem::Missing);
            None
        }
    };

    let estimated_hours = match element.get("estimated_hours").and_then(Value::as_f64) {
        Some(h) if h > 0.0 => Some(h),
        Some(_) => {
            fail(Field::EstimatedHours, Problem::NotPositive);
            None
        }
        None => {
            fail(Field::EstimatedHours, Problem::Missing);
            None
        }
    };

    let importance = match element.get("importance").and_then(Value::as_i64) {
        Some(i) if (1..=10).contains(&i) => Some(i as u8),
        Some(_) => {
            fail(Field::Importance, Problem::OutOfRange);
            None
        }
        None => {
            fail(Field::Importance, Problem::Missing);
            None
        }
    };

    if errors.len() > before {
        return None;
    }

    // Explicit ids may arrive as strings or numbers.
    let id = match element.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let dependencies = element
        .get("dependencies")
        .and_then(Value::as_array)
        .map(|deps| {
            deps.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(BulkEntry {
        id,
        fields: TaskFields {
            title: title?,
            due_date: due_date?,
            estimated_hours: estimated_hours?,
            importance: importance?,
            dependencies,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, due: &str, hours: &str, importance: &str) -> TaskForm {
        TaskForm {
            title: title.into(),
            due_date: due.into(),
            estimated_hours: hours.into(),
            importance: importance.into(),
            dependencies: String::new(),
        }
    }

    #[test]
    fn valid_form_passes() {
        let fields = validate_form(&form("Write report", "2026-03-01", "2.5", "7")).unwrap();
        assert_eq!(fields.title, "Write report");
        assert_eq!(fields.estimated_hours, 2.5);
        assert_eq!(fields.importance, 7);
        assert!(fields.dependencies.is_empty());
    }

    #[test]
    fn blank_fields_are_missing() {
        let err = validate_form(&form("", "2026-03-01", "2", "7")).unwrap_err();
        assert!(matches!(err, IngestError::MissingFields));
        let err = validate_form(&form("A", "2026-03-01", "  ", "7")).unwrap_err();
        assert!(matches!(err, IngestError::MissingFields));
    }

    #[test]
    fn importance_eleven_rejected() {
        let err = validate_form(&form("A", "2026-03-01", "2", "11")).unwrap_err();
        assert!(matches!(err, IngestError::ImportanceOutOfRange { value: 11 }));
    }

    #[test]
    fn importance_zero_rejected() {
        let err = validate_form(&form("A", "2026-03-01", "2", "0")).unwrap_err();
        assert!(matches!(err, IngestError::ImportanceOutOfRange { value: 0 }));
    }

    #[test]
    fn zero_and_negative_hours_rejected() {
        let err = validate_form(&form("A", "2026-03-01", "0", "5")).unwrap_err();
        assert!(matches!(err, IngestError::NonPositiveHours { .. }));
        let err = validate_form(&form("A", "2026-03-01", "-1", "5")).unwrap_err();
        assert!(matches!(err, IngestError::NonPositiveHours { .. }));
    }

    #[test]
    fn unparseable_date_rejected() {
        let err = validate_form(&form("A", "March 1st", "2", "5")).unwrap_err();
        assert!(matches!(err, IngestError::InvalidDate { .. }));
    }

    #[test]
    fn dependency_field_splits_and_trims() {
        let deps = split_dependencies(" 1, 2 ,,3 ");
        assert_eq!(deps, vec!["1", "2", "3"]);
        assert!(split_dependencies("").is_empty());
    }

    #[test]
    fn bulk_single_task_defaults() {
        let entries = parse_bulk(
            r#"[{"title":"A","due_date":"2025-01-01","estimated_hours":2,"importance":5}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, None);
        assert!(entries[0].fields.dependencies.is_empty());
        assert_eq!(entries[0].fields.importance, 5);
    }

    #[test]
    fn bulk_numeric_id_accepted() {
        let entries = parse_bulk(
            r#"[{"id":7,"title":"A","due_date":"2025-01-01","estimated_hours":2,"importance":5}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].id.as_deref(), Some("7"));
    }

    #[test]
    fn bulk_rejects_non_json() {
        assert!(matches!(
            parse_bulk("not json").unwrap_err(),
            IngestError::MalformedJson { .. }
        ));
    }

    #[test]
    fn bulk_rejects_non_array() {
        assert!(matches!(
            parse_bulk(r#"{"title":"A"}"#).unwrap_err(),
            IngestError::NotAnArray
        ));
    }

    #[test]
    fn bulk_collects_field_errors_across_elements() {
        let err = parse_bulk(
            r#"[
                {"due_date":"2025-01-01","estimated_hours":2,"importance":5},
                {"title":"B","due_date":"soon","estimated_hours":0,"importance":12}
            ]"#,
        )
        .unwrap_err();
        let IngestError::InvalidFields { errors } = err else {
            panic!("expected InvalidFields");
        };
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&FieldError {
            index: 0,
            field: Field::Title,
            problem: Problem::Missing,
        }));
        assert!(errors.contains(&FieldError {
            index: 1,
            field: Field::DueDate,
            problem: Problem::BadDate,
        }));
        assert!(errors.contains(&FieldError {
            index: 1,
            field: Field::EstimatedHours,
            problem: Problem::NotPositive,
        }));
        assert!(errors.contains(&FieldError {
            index: 1,
            field: Field::Importance,
            problem: Problem::OutOfRange,
        }));
    }

    #[test]
    fn bulk_enforces_form_rules() {
        // Same range and positivity rules as the form path.
        let err = parse_bulk(
            r#"[{"title":"A","due_date":"2025-01-01","estimated_hours":-2,"importance":11}]"#,
        )
        .unwrap_err();
        let IngestError::InvalidFields { errors } = err else {
            panic!("expected InvalidFields");
        };
        assert_eq!(errors.len(), 2);
    }
}
