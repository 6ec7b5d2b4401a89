//! In-memory task store
//!
//! Owns the task collection shared by every query, plus a readiness signal
//! that flips to loaded once the bulk load from disk has finished. Queries
//! may run before that point and simply see a partial collection.

use crate::models::Task;
use crate::query::{TaskQuery, run_query};
use tokio::sync::{RwLock, watch};
use tracing::{debug, info};

/// Summary of a finished bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records added to the store
    pub loaded: usize,
    /// Persisted files that could not be read or parsed
    pub skipped: usize,
}

/// Bulk-load state of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// The loader is still running; the collection may be partial
    Loading,
    /// The loader has finished
    Loaded(LoadReport),
}

/// The shared task collection
///
/// Reads take a shared lock for the duration of one query; appends take the
/// write lock, so concurrent writers are serialized.
#[derive(Debug)]
pub struct TaskStore {
    tasks: RwLock<Vec<Task>>,
    state: watch::Sender<LoadState>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store in the `Loading` state.
    pub fn new() -> Self {
        let (state, _) = watch::channel(LoadState::Loading);
        Self {
            tasks: RwLock::new(Vec::new()),
            state,
        }
    }

    /// Create a store that already holds `tasks` and is marked loaded.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let report = LoadReport {
            loaded: tasks.len(),
            skipped: 0,
        };
        let (state, _) = watch::channel(LoadState::Loaded(report));
        Self {
            tasks: RwLock::new(tasks),
            state,
        }
    }

    /// Append a submitted task.
    ///
    /// Pinned tasks go to the front of the collection, others to the back.
    pub async fn append(&self, task: Task) {
        let mut tasks = self.tasks.write().await;
        debug!(title = %task.title, pinned = task.pinned, "appending task");
        if task.pinned {
            tasks.insert(0, task);
        } else {
            tasks.push(task);
        }
    }

    /// Add a record produced by the bulk loader, at the back.
    pub(crate) async fn push_loaded(&self, task: Task) {
        self.tasks.write().await.push(task);
    }

    /// Run the query pipeline against the current collection.
    pub async fn query(&self, query: &TaskQuery) -> Vec<Task> {
        let tasks = self.tasks.read().await;
        run_query(tasks.iter(), query).into_iter().cloned().collect()
    }

    /// Copy of the collection in storage order.
    pub async fn snapshot(&self) -> Vec<Task> {
        self.tasks.read().await.clone()
    }

    /// Number of tasks currently held
    pub async fn len(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Whether the store currently holds no tasks
    pub async fn is_empty(&self) -> bool {
        self.tasks.read().await.is_empty()
    }

    /// Current load state
    pub fn load_state(&self) -> LoadState {
        *self.state.borrow()
    }

    /// Whether the bulk load has finished
    pub fn is_loaded(&self) -> bool {
        matches!(self.load_state(), LoadState::Loaded(_))
    }

    /// Transition to `Loaded`, waking every waiter.
    pub fn mark_loaded(&self, report: LoadReport) {
        info!(
            loaded = report.loaded,
            skipped = report.skipped,
            "task store loaded"
        );
        self.state.send_replace(LoadState::Loaded(report));
    }

    /// Wait until the bulk load has finished.
    ///
    /// Returns immediately if the store is already loaded.
    pub async fn wait_until_loaded(&self) -> LoadReport {
        let mut state = self.state.subscribe();
        loop {
            let current = *state.borrow_and_update();
            if let LoadState::Loaded(report) = current {
                return report;
            }
            if state.changed().await.is_err() {
                return LoadReport::default();
            }
        }
    }
}

// The store is shared between the loader and concurrent queries
static_assertions::assert_impl_all!(TaskStore: Send, Sync);
