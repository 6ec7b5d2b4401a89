//! Output formatting module for taskboard
//!
//! Renders an ordered task view as an aligned table or as JSON.

use clap::ValueEnum;
use taskboard_store::{StoreError, Task};

/// Maximum width for the title column before truncation
const MAX_TITLE_WIDTH: usize = 30;

/// Maximum width for the tags column before truncation
const MAX_TAGS_WIDTH: usize = 20;

/// Maximum width for the progress column before truncation
const MAX_PROGRESS_WIDTH: usize = 16;

/// Column headers, in display order
const HEADERS: [&str; 6] = ["Pin", "Title", "Priority", "Due", "Tags", "Progress"];

/// How a task view is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    #[default]
    Table,
    /// JSON array of task records
    Json,
}

/// Render tasks in the requested format.
///
/// # Errors
///
/// Returns `StoreError::Serialize` if JSON serialization fails.
pub fn render(tasks: &[Task], format: OutputFormat) -> Result<String, StoreError> {
    match format {
        OutputFormat::Table => Ok(format_task_table(tasks)),
        OutputFormat::Json => format_task_json(tasks),
    }
}

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Format tasks into an aligned table string.
///
/// Produces output in the format:
/// ```text
/// Pin  Title          Priority  Due         Tags           Progress
/// ---  -------------  --------  ----------  -------------  --------
/// *    Pay rent       1         2024-03-05  home, money    -
///      Buy groceries  2         -           errands        started
/// ```
///
/// Returns `No tasks found.` for an empty view.
pub fn format_task_table(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }

    let rows: Vec<[String; 6]> = tasks.iter().map(table_row).collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(&HEADERS.map(str::to_string), &widths));
    lines.push(format_line(&widths.map(|w| "-".repeat(w)), &widths));
    for row in &rows {
        lines.push(format_line(row, &widths));
    }

    lines.join("\n")
}

/// Format tasks as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns `StoreError::Serialize` if serialization fails.
pub fn format_task_json(tasks: &[Task]) -> Result<String, StoreError> {
    serde_json::to_string_pretty(tasks).map_err(StoreError::Serialize)
}

/// Build the display cells for one task.
fn table_row(task: &Task) -> [String; 6] {
    [
        if task.pinned { "*" } else { "" }.to_string(),
        truncate(&task.title, MAX_TITLE_WIDTH),
        task.priority.to_string(),
        task.due_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("-")
            .to_string(),
        truncate(&format_tags(&task.tags), MAX_TAGS_WIDTH),
        truncate(&format_progress(&task.progress), MAX_PROGRESS_WIDTH),
    ]
}

/// Pad cells to their column widths, trimming trailing whitespace.
fn format_line(cells: &[String; 6], widths: &[usize; 6]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Format tags as a comma-separated string.
fn format_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        "-".to_string()
    } else {
        tags.join(", ")
    }
}

/// Format the opaque progress value for display.
fn format_progress(progress: &serde_json::Value) -> String {
    match progress {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) if s.is_empty() => "-".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
