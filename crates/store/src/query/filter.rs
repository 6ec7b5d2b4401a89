//! Filter stage
//!
//! Narrows a collection of tasks by the tag and title substrings of a
//! [`TaskQuery`]. Both filters are case-insensitive, and when both are set a
//! task must match both (AND across filters, any-tag within the tag filter).

use super::params::TaskQuery;
use crate::models::Task;

/// Whether any of the task's tags contains the lower-cased needle
pub fn matches_tag(task: &Task, needle: &str) -> bool {
    task.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
}

/// Whether the task's title contains the lower-cased needle
pub fn matches_title(task: &Task, needle: &str) -> bool {
    task.title.to_lowercase().contains(needle)
}

/// Keep the tasks matching the query's tag and title filters.
///
/// Relative order of the retained tasks is unchanged. Absent or empty filter
/// values retain everything on that axis.
pub fn filter_tasks<'a, I>(tasks: I, query: &TaskQuery) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let tag = query.tag_needle();
    let title = query.title_needle();

    tasks
        .into_iter()
        .filter(|task| {
            if let Some(needle) = &tag
                && !matches_tag(task, needle)
            {
                return false;
            }

            if let Some(needle) = &title
                && !matches_title(task, needle)
            {
                return false;
            }

            true
        })
        .collect()
}
