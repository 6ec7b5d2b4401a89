//! Query parameters for the task pipeline
//!
//! Provides a builder-pattern TaskQuery carrying the raw tag, title and sort
//! parameters of a request, plus the parsed sort key and direction.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Secondary sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DueDate,
    Priority,
}

impl SortKey {
    /// Parse a `sort-by` value. Unknown keys yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "due-date" => Some(SortKey::DueDate),
            "priority" => Some(SortKey::Priority),
            _ => None,
        }
    }

    /// Returns the parameter value for this key
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DueDate => "due-date",
            SortKey::Priority => "priority",
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Secondary sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a `sort-order` value. Unknown directions yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    /// Returns the parameter value for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recognized secondary sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub key: SortKey,
    pub order: SortOrder,
}

/// Query parameters for listing tasks
///
/// All fields hold the raw request values. Empty strings count as absent, and
/// unrecognized sort values degrade to "no secondary sort" rather than
/// erroring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Case-insensitive substring matched against each tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Case-insensitive substring matched against the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Raw `sort-by` value
    #[serde(default, rename = "sort-by", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// Raw `sort-order` value
    #[serde(default, rename = "sort-order", skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<String>,
}

impl TaskQuery {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by tag substring
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Filter by title substring
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the raw sort key
    pub fn sort_by(mut self, key: impl Into<String>) -> Self {
        self.sort_by = Some(key.into());
        self
    }

    /// Set the raw sort direction
    pub fn sort_order(mut self, order: impl Into<String>) -> Self {
        self.sort_order = Some(order.into());
        self
    }

    /// Lower-cased tag needle, if the tag filter is active
    pub fn tag_needle(&self) -> Option<String> {
        non_empty(&self.tag).map(str::to_lowercase)
    }

    /// Lower-cased title needle, if the title filter is active
    pub fn title_needle(&self) -> Option<String> {
        non_empty(&self.title).map(str::to_lowercase)
    }

    /// The secondary sort, if both values were supplied and recognized.
    pub fn sort(&self) -> Option<Sort> {
        let (Some(by), Some(order)) = (non_empty(&self.sort_by), non_empty(&self.sort_order))
        else {
            return None;
        };

        match (SortKey::parse(by), SortOrder::parse(order)) {
            (Some(key), Some(order)) => Some(Sort { key, order }),
            _ => {
                debug!(
                    sort_by = by,
                    sort_order = order,
                    "unrecognized sort parameters, keeping pinned order only"
                );
                None
            }
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
