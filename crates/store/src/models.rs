//! Data models for taskboard
//!
//! Defines the task record the query pipeline operates on, its persisted JSON
//! shape, and the mapping from raw submitted fields to a record.

use crate::error::{StoreError, StoreResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Naive date-time layouts accepted for due dates, tried in order
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Calendar date layout accepted for due dates
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A task record
///
/// Serialized as one JSON object per persisted file. Only `title` is required;
/// every other field falls back to an empty or zero value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task title, matched by the title filter
    pub title: String,

    /// Free-form description, opaque to the pipeline
    #[serde(default)]
    pub description: String,

    /// Numeric priority, used as a sort key
    #[serde(default, deserialize_with = "deserialize_priority")]
    pub priority: i64,

    /// Raw due date text, parsed on demand by [`Task::due_instant`]
    #[serde(
        rename = "due-date",
        alias = "dueDate",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<String>,

    /// Pinned tasks always precede unpinned ones
    #[serde(default, deserialize_with = "deserialize_pinned")]
    pub pinned: bool,

    /// Labels matched by the tag filter
    #[serde(default)]
    pub tags: Vec<String>,

    /// Opaque progress value, passed through untouched
    #[serde(default)]
    pub progress: serde_json::Value,
}

impl Task {
    /// Create a new unpinned task with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: 0,
            due_date: None,
            pinned: false,
            tags: Vec::new(),
            progress: serde_json::Value::Null,
        }
    }

    /// Set the description of this task
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority of this task
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Set the raw due date of this task
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    /// Set whether this task is pinned
    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Add a tag to this task
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags to this task
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(|t| t.into()));
        self
    }

    /// Set the progress value of this task
    pub fn with_progress(mut self, progress: impl Into<serde_json::Value>) -> Self {
        self.progress = progress.into();
        self
    }

    /// The due date as an instant, or `None` when absent or unparseable.
    pub fn due_instant(&self) -> Option<DateTime<Utc>> {
        self.due_date.as_deref().and_then(parse_due_date)
    }
}

/// Parse due date text into an instant.
///
/// Accepts RFC 3339 date-times, naive date-times (taken as UTC) and plain
/// calendar dates (midnight UTC). Returns `None` for anything else.
pub fn parse_due_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Map submitted pinned text to a boolean.
///
/// Matching is case-insensitive on trimmed input. Absent input and
/// unrecognized text both map to `false`.
pub fn parse_pinned(raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };

    match raw.trim().to_lowercase().as_str() {
        "true" | "on" | "yes" | "1" | "checked" | "pinned" => true,
        "false" | "off" | "no" | "0" | "" => false,
        other => {
            debug!(value = other, "unrecognized pinned value, treating as unpinned");
            false
        }
    }
}

/// Split a comma-delimited tag string into trimmed labels.
///
/// Empty labels are dropped, so `"a, ,b,"` yields `["a", "b"]`.
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Parse submitted priority text.
///
/// Blank or absent input means priority 0.
fn parse_priority(raw: Option<&str>) -> StoreResult<i64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(s) => s.parse::<i64>().map_err(|_| {
            StoreError::validation(format!("invalid priority '{}': expected an integer", s))
        }),
    }
}

/// Raw fields of a task submission, all as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
    pub pinned: Option<String>,
    pub tags: Option<String>,
    pub progress: Option<String>,
}

impl TaskForm {
    /// Build a task record from the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the title is blank or the priority
    /// is not an integer.
    pub fn into_task(self) -> StoreResult<Task> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(StoreError::validation("title required")),
        };

        let priority = parse_priority(self.priority.as_deref())?;
        let pinned = parse_pinned(self.pinned.as_deref());
        let tags = split_tags(self.tags.as_deref());

        let mut task = Task::new(title)
            .with_priority(priority)
            .with_pinned(pinned)
            .with_tags(tags);

        if let Some(description) = self.description {
            task = task.with_description(description);
        }

        if let Some(due_date) = self.due_date.filter(|d| !d.trim().is_empty()) {
            task = task.with_due_date(due_date);
        }

        if let Some(progress) = self.progress {
            task = task.with_progress(progress);
        }

        Ok(task)
    }
}

/// Accept either a JSON integer or a numeric string for `priority`
fn deserialize_priority<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PriorityRepr {
        Number(i64),
        Text(String),
    }

    match Option::<PriorityRepr>::deserialize(deserializer)? {
        None => Ok(0),
        Some(PriorityRepr::Number(n)) => Ok(n),
        Some(PriorityRepr::Text(s)) => parse_priority(Some(&s)).map_err(serde::de::Error::custom),
    }
}

/// Accept either a JSON boolean or a text flag for `pinned`
fn deserialize_pinned<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PinnedRepr {
        Flag(bool),
        Text(String),
    }

    Ok(match Option::<PinnedRepr>::deserialize(deserializer)? {
        None => false,
        Some(PinnedRepr::Flag(flag)) => flag,
        Some(PinnedRepr::Text(s)) => parse_pinned(Some(&s)),
    })
}
