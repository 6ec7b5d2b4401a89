//! Task store for taskboard
//!
//! Provides the task record model, the query pipeline (filter + order) that
//! produces the displayed view, an in-memory store with a load readiness
//! signal, and the concurrent loader that fills it from a directory of JSON
//! files.

pub mod error;
pub mod loader;
pub mod models;
pub mod query;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use loader::{DEFAULT_TASKS_DIR, load_directory, read_task_file, spawn_load};
pub use models::{Task, TaskForm, parse_due_date, parse_pinned, split_tags};
pub use query::{
    Sort, SortKey, SortOrder, TaskComparator, TaskQuery, filter_tasks, order_tasks, run_query,
};
pub use store::{LoadReport, LoadState, TaskStore};
