//! List command for displaying tasks
//!
//! Implements `tb list`: runs the query pipeline over the store and renders
//! the ordered view.

use crate::output::{OutputFormat, render};
use clap::Args;
use taskboard_store::{StoreError, TaskQuery, TaskStore};

/// Filter and sort parameters shared by every command that shows a view
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Keep tasks with a tag containing this text (case-insensitive)
    #[arg(long)]
    pub tag: Option<String>,

    /// Keep tasks whose title contains this text (case-insensitive)
    #[arg(long)]
    pub title: Option<String>,

    /// Secondary sort key (due-date, priority)
    #[arg(long = "sort-by")]
    pub sort_by: Option<String>,

    /// Secondary sort direction (asc, desc)
    #[arg(long = "sort-order")]
    pub sort_order: Option<String>,
}

impl QueryArgs {
    /// Build the pipeline query from the command options.
    ///
    /// Values are passed through untouched; the pipeline decides what an
    /// empty or unrecognized value means.
    pub fn to_query(&self) -> TaskQuery {
        TaskQuery {
            tag: self.tag.clone(),
            title: self.title.clone(),
            sort_by: self.sort_by.clone(),
            sort_order: self.sort_order.clone(),
        }
    }
}

/// List tasks with optional filters and sorting
#[derive(Debug, Args)]
pub struct ListCommand {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ListCommand {
    /// Execute the list command.
    ///
    /// Queries whatever the store currently holds; callers decide whether to
    /// wait for the bulk load first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialize` if JSON output fails.
    pub async fn execute(&self, store: &TaskStore) -> Result<String, StoreError> {
        let tasks = store.query(&self.query.to_query()).await;
        render(&tasks, self.format)
    }
}
