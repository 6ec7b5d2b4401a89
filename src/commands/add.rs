//! Add command for creating new tasks
//!
//! Implements `tb add`: maps the submitted fields to a task record, appends it
//! to the store and shows the resulting default view. The store lives in
//! memory only; nothing is written back to the task directory.

use crate::output::{OutputFormat, render};
use clap::Args;
use taskboard_store::{StoreError, TaskForm, TaskQuery, TaskStore};
use tracing::info;

/// Create a new task
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Title of the task
    #[arg(long)]
    pub title: String,

    /// Detailed description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Priority (integer, defaults to 0)
    #[arg(short, long, allow_hyphen_values = true)]
    pub priority: Option<String>,

    /// Due date (e.g. 2024-03-01 or 2024-03-01T09:00:00Z)
    #[arg(long = "due-date")]
    pub due_date: Option<String>,

    /// Pin the task (true/on/yes/1 to pin, anything else leaves it unpinned)
    #[arg(long)]
    pub pinned: Option<String>,

    /// Comma-separated tags
    #[arg(short, long)]
    pub tags: Option<String>,

    /// Free-form progress note
    #[arg(long)]
    pub progress: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl AddCommand {
    /// The raw submitted fields, as the creation mapping expects them
    pub fn to_form(&self) -> TaskForm {
        TaskForm {
            title: Some(self.title.clone()),
            description: self.description.clone(),
            priority: self.priority.clone(),
            due_date: self.due_date.clone(),
            pinned: self.pinned.clone(),
            tags: self.tags.clone(),
            progress: self.progress.clone(),
        }
    }

    /// Execute the add command.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the title is blank or the priority
    /// is not an integer, and `StoreError::Serialize` if JSON output fails.
    pub async fn execute(&self, store: &TaskStore) -> Result<String, StoreError> {
        let task = self.to_form().into_task()?;
        info!(title = %task.title, pinned = task.pinned, "adding task");
        store.append(task).await;

        let tasks = store.query(&TaskQuery::new()).await;
        render(&tasks, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_store::Task;

    fn add_cmd(title: &str) -> AddCommand {
        AddCommand {
            title: title.to_string(),
            description: None,
            priority: None,
            due_date: None,
            pinned: None,
            tags: None,
            progress: None,
            format: OutputFormat::Table,
        }
    }

    #[test]
    fn test_to_form_copies_fields() {
        let cmd = AddCommand {
            priority: Some("2".to_string()),
            pinned: Some("on".to_string()),
            tags: Some("a, b".to_string()),
            ..add_cmd("Title")
        };
        let form = cmd.to_form();
        assert_eq!(form.title.as_deref(), Some("Title"));
        assert_eq!(form.priority.as_deref(), Some("2"));
        assert_eq!(form.pinned.as_deref(), Some("on"));
        assert_eq!(form.tags.as_deref(), Some("a, b"));
    }

    #[tokio::test]
    async fn test_add_unpinned_goes_last() {
        let store = TaskStore::with_tasks(vec![Task::new("existing")]);
        add_cmd("new").execute(&store).await.unwrap();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].title, "new");
        assert!(!snapshot[1].pinned);
    }

    #[tokio::test]
    async fn test_add_pinned_goes_first() {
        let store = TaskStore::with_tasks(vec![Task::new("existing")]);
        let cmd = AddCommand {
            pinned: Some("yes".to_string()),
            tags: Some(" urgent , home ".to_string()),
            priority: Some("-1".to_string()),
            ..add_cmd("pinned one")
        };
        cmd.execute(&store).await.unwrap();

        let first = &store.snapshot().await[0];
        assert_eq!(first.title, "pinned one");
        assert!(first.pinned);
        assert_eq!(first.tags, vec!["urgent", "home"]);
        assert_eq!(first.priority, -1);
    }

    #[tokio::test]
    async fn test_add_returns_pinned_first_view() {
        let store = TaskStore::with_tasks(vec![
            Task::new("older pinned").with_pinned(true),
            Task::new("plain"),
        ]);
        let cmd = AddCommand {
            format: OutputFormat::Json,
            ..add_cmd("newest")
        };
        let output = cmd.execute(&store).await.unwrap();
        let view: Vec<Task> = serde_json::from_str(&output).unwrap();
        let titles: Vec<&str> = view.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["older pinned", "plain", "newest"]);
    }

    #[tokio::test]
    async fn test_add_blank_title_fails() {
        let store = TaskStore::with_tasks(Vec::new());
        let result = add_cmd("   ").execute(&store).await;
        assert!(matches!(result, Err(StoreError::Validation { .. })));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_add_invalid_priority_fails() {
        let store = TaskStore::with_tasks(Vec::new());
        let cmd = AddCommand {
            priority: Some("urgent".to_string()),
            ..add_cmd("title")
        };
        let err = cmd.execute(&store).await.unwrap_err();
        assert!(err.to_string().contains("invalid priority"));
        assert!(store.is_empty().await);
    }
}
