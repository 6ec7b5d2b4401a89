//! Test infrastructure for integration tests
//!
//! Provides isolated task directory setup/teardown and command builder helpers.
//! Each test gets its own directory and store to ensure no shared state.

use std::path::PathBuf;
use std::sync::Arc;
use taskboard::commands::{AddCommand, ListCommand, QueryArgs};
use taskboard::output::OutputFormat;
use taskboard_store::{LoadReport, Task, TaskStore, load_directory};

/// Test context containing an isolated task directory
pub struct TestContext {
    pub temp_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an empty task directory.
    ///
    /// Each call creates a uniquely named temp directory using process ID,
    /// thread ID, and nanosecond timestamp to guarantee isolation.
    pub fn new() -> Self {
        let temp_dir = std::env::temp_dir().join(format!(
            "tb-integration-test-{}-{:?}-{}",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&temp_dir).unwrap();

        Self { temp_dir }
    }

    /// Persist a task as one JSON file in the directory.
    pub fn write_task(&self, file: &str, task: &Task) {
        let json = serde_json::to_string(task).unwrap();
        self.write_raw(file, &json);
    }

    /// Write arbitrary file contents, for malformed-input cases.
    pub fn write_raw(&self, file: &str, contents: &str) {
        std::fs::write(self.temp_dir.join(file), contents).unwrap();
    }

    /// Load the directory into a fresh store.
    pub async fn load(&self) -> (Arc<TaskStore>, LoadReport) {
        let store = Arc::new(TaskStore::new());
        let report = load_directory(Arc::clone(&store), &self.temp_dir)
            .await
            .unwrap();
        (store, report)
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // Auto-cleanup on drop
        let _ = std::fs::remove_dir_all(&self.temp_dir);
    }
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

/// Create a JSON ListCommand for the given query options.
pub fn list_cmd(
    tag: Option<&str>,
    title: Option<&str>,
    sort_by: Option<&str>,
    sort_order: Option<&str>,
) -> ListCommand {
    ListCommand {
        query: QueryArgs {
            tag: tag.map(String::from),
            title: title.map(String::from),
            sort_by: sort_by.map(String::from),
            sort_order: sort_order.map(String::from),
        },
        format: OutputFormat::Json,
    }
}

/// Create a JSON AddCommand with default optional fields filled in.
pub fn add_cmd(title: &str) -> AddCommand {
    AddCommand {
        title: title.to_string(),
        description: None,
        priority: None,
        due_date: None,
        pinned: None,
        tags: None,
        progress: None,
        format: OutputFormat::Json,
    }
}

/// Run a list command and return the titles of the view, in order.
pub async fn list_titles(store: &TaskStore, cmd: &ListCommand) -> Vec<String> {
    let output = cmd.execute(store).await.unwrap();
    titles_of(&output)
}

/// Titles of a JSON view, in order.
pub fn titles_of(output: &str) -> Vec<String> {
    let view: Vec<Task> = serde_json::from_str(output).unwrap();
    view.into_iter().map(|t| t.title).collect()
}
