//! Task domain model
//!
//! An input task is a loosely-typed record: callers hand over whatever
//! they collected from forms or JSON, and the scoring engine must stay
//! total over it. Field types here encode the fallback policy in one
//! place: a malformed `importance` decodes to the default 5, a malformed
//! `estimated_hours` to 1.0, and an unparseable `due_date` scores as
//! "no due date". Structural checks (a field being absent entirely) are
//! the validator's job, not this module's.

use chrono::NaiveDate;
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::id::TaskId;

/// Default importance when the field is absent or malformed
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// Default estimated hours when the field is absent or malformed
pub const DEFAULT_HOURS: f64 = 1.0;

/// Due date as provided by the caller
///
/// Anything that is not a `YYYY-MM-DD` string is kept verbatim and
/// treated as "no due date" by the urgency factor.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DueDate {
    /// Field was absent or null
    #[default]
    Missing,
    /// A parseable calendar date
    Date(NaiveDate),
    /// Present but not a parseable date; raw text kept for output
    Invalid(String),
}

impl DueDate {
    /// Parses a raw string the way the engine does (`YYYY-MM-DD` or invalid)
    pub fn parse(raw: &str) -> Self {
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => DueDate::Date(date),
            Err(_) => DueDate::Invalid(raw.to_string()),
        }
    }

    /// Days from `today` until the due date, or None when there is no usable date
    pub fn days_until(&self, today: NaiveDate) -> Option<i64> {
        match self {
            DueDate::Date(date) => Some((*date - today).num_days()),
            DueDate::Missing | DueDate::Invalid(_) => None,
        }
    }

    /// Returns true if no usable date is present
    pub fn is_unusable(&self) -> bool {
        !matches!(self, DueDate::Date(_))
    }
}

impl Serialize for DueDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            DueDate::Missing => serializer.serialize_none(),
            DueDate::Date(date) => {
                serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
            }
            DueDate::Invalid(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Null => DueDate::Missing,
            serde_json::Value::String(s) => DueDate::parse(&s),
            other => DueDate::Invalid(other.to_string()),
        })
    }
}

/// Importance rating, nominally 1-10
///
/// Decoding never fails: integers pass through, floats truncate, numeric
/// strings parse, anything else becomes the default 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Importance(pub i64);

impl Default for Importance {
    fn default() -> Self {
        Importance(DEFAULT_IMPORTANCE)
    }
}

impl<'de> Deserialize<'de> for Importance {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Importance(lenient_i64(&value).unwrap_or(DEFAULT_IMPORTANCE)))
    }
}

/// Estimated hours of effort, non-negative
///
/// Same lenient policy as [`Importance`]; the fallback is 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

impl Default for Hours {
    fn default() -> Self {
        Hours(DEFAULT_HOURS)
    }
}

impl<'de> Deserialize<'de> for Hours {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Hours(lenient_f64(&value).unwrap_or(DEFAULT_HOURS)))
    }
}

fn lenient_i64(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::Bool(b) => Some(*b as i64),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::Bool(b) => Some(*b as i64 as f64),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A work item submitted for prioritization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Batch-unique identifier; assigned by position (1-based) when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TaskId>,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    /// Calendar due date, kept verbatim when unparseable
    #[serde(default)]
    pub due_date: DueDate,

    /// Importance 1-10; None means the field was absent
    #[serde(default)]
    pub importance: Option<Importance>,

    /// Estimated effort in hours; None means the field was absent
    #[serde(default)]
    pub estimated_hours: Option<Hours>,

    /// IDs of tasks this one depends on (may reference IDs outside the batch)
    #[serde(default)]
    pub dependencies: Vec<TaskId>,
}

impl Task {
    /// Creates a task with the given title and all other fields defaulted
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets an explicit ID
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(TaskId(id));
        self
    }

    /// Sets the due date
    pub fn with_due(mut self, date: NaiveDate) -> Self {
        self.due_date = DueDate::Date(date);
        self
    }

    /// Sets the importance rating
    pub fn with_importance(mut self, value: i64) -> Self {
        self.importance = Some(Importance(value));
        self
    }

    /// Sets the effort estimate
    pub fn with_hours(mut self, value: f64) -> Self {
        self.estimated_hours = Some(Hours(value));
        self
    }

    /// Sets the dependency list
    pub fn with_dependencies(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.dependencies = ids.into_iter().map(TaskId).collect();
        self
    }

    /// Effective importance after the fallback default
    pub fn effective_importance(&self) -> i64 {
        self.importance.unwrap_or_default().0
    }

    /// Effective estimated hours after the fallback default
    pub fn effective_hours(&self) -> f64 {
        self.estimated_hours.unwrap_or_default().0
    }
}

/// Per-factor, human-readable account of how a score was assembled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explanations {
    pub urgency: String,
    pub importance: String,
    pub effort: String,
    pub dependencies: String,
}

impl Explanations {
    /// Flattens all four factors into a single display string
    pub fn summary(&self) -> String {
        format!(
            "Urgency: {} | Importance: {} | Effort: {} | Dependencies: {}",
            self.urgency, self.importance, self.effort, self.dependencies
        )
    }
}

/// A task with its computed priority attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    /// Identifier, always present after ranking
    pub id: TaskId,

    /// Title carried over from the input
    pub title: Option<String>,

    /// Due date carried over from the input
    pub due_date: DueDate,

    /// Importance actually used for scoring (fallback applied)
    pub importance: i64,

    /// Estimated hours actually used for scoring (fallback applied)
    pub estimated_hours: f64,

    /// Dependency list carried over from the input
    pub dependencies: Vec<TaskId>,

    /// Final score, rounded to two decimal places
    pub score: f64,

    /// Per-factor contribution notes
    pub explanations: Explanations,

    /// True when the task participates in a dependency cycle
    pub in_cycle: bool,
}
