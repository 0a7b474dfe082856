//! Structural validation for task batches
//!
//! Validation runs upstream of the engine and checks only that required
//! fields are present: the engine itself is total over malformed field
//! content (see the fallback rules in `task.rs`). A failed batch is
//! reported per task index with every missing field enumerated, and the
//! engine is never invoked for it.

use serde::Serialize;

use super::task::{DueDate, Task};

/// Validation failures for a single task, addressed by batch position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    /// Zero-based position of the task in the submitted batch
    pub index: usize,
    /// One message per missing field
    pub errors: Vec<String>,
}

/// Checks one task for required fields
pub fn validate_task(task: &Task) -> Vec<String> {
    let mut errors = Vec::new();

    if task.title.as_deref().unwrap_or("").is_empty() {
        errors.push("title is required".to_string());
    }

    let due_date_missing = match &task.due_date {
        DueDate::Missing => true,
        DueDate::Invalid(raw) => raw.is_empty(),
        DueDate::Date(_) => false,
    };
    if due_date_missing {
        errors.push("due_date is required (YYYY-MM-DD)".to_string());
    }

    if task.estimated_hours.is_none() {
        errors.push("estimated_hours required".to_string());
    }

    if task.importance.is_none() {
        errors.push("importance is required (1-10)".to_string());
    }

    errors
}

/// Validates a whole batch, returning one issue entry per failing task
pub fn validate_batch(tasks: &[Task]) -> Vec<ValidationIssue> {
    tasks
        .iter()
        .enumerate()
        .filter_map(|(index, task)| {
            let errors = validate_task(task);
            if errors.is_empty() {
                None
            } else {
                Some(ValidationIssue { index, errors })
            }
        })
        .collect()
}
