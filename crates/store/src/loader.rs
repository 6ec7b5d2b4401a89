//! Bulk loader for persisted tasks
//!
//! Reads every file of a task directory concurrently, one JSON task record per
//! file. Records enter the store in completion order, so there is no ordering
//! guarantee between files. A file that cannot be read or parsed is logged and
//! skipped; the rest of the load carries on.

use crate::error::{StoreError, StoreResult};
use crate::models::Task;
use crate::store::{LoadReport, TaskStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, warn};

/// Default task directory, relative to the working directory
pub const DEFAULT_TASKS_DIR: &str = "saved-tasks";

/// Read and parse a single persisted task file.
///
/// # Errors
///
/// Returns `StoreError::ReadFile` if the file cannot be read and
/// `StoreError::Parse` if its contents are not a task record.
pub async fn read_task_file(path: &Path) -> StoreResult<Task> {
    let data = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

    serde_json::from_str(&data).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// List the regular, non-hidden files of the task directory.
async fn task_files(dir: &Path) -> StoreResult<Vec<PathBuf>> {
    let read_dir_error = |e| StoreError::ReadDirectory {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_dir_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        let is_file = entry
            .file_type()
            .await
            .map(|t| t.is_file())
            .unwrap_or(false);

        if is_file && !hidden {
            files.push(entry.path());
        }
    }

    Ok(files)
}

/// Load every task file in `dir` into `store`, then mark the store loaded.
///
/// The store is marked loaded even when the directory itself cannot be read,
/// so that nothing waiting on readiness hangs.
///
/// # Errors
///
/// Returns `StoreError::ReadDirectory` if the directory cannot be listed.
/// Per-file failures are not errors; they are counted in the report.
pub async fn load_directory(store: Arc<TaskStore>, dir: &Path) -> StoreResult<LoadReport> {
    let files = match task_files(dir).await {
        Ok(files) => files,
        Err(e) => {
            store.mark_loaded(LoadReport::default());
            return Err(e);
        }
    };

    debug!(dir = %dir.display(), files = files.len(), "loading task files");

    let mut reads = JoinSet::new();
    for path in files {
        reads.spawn(async move { read_task_file(&path).await });
    }

    let mut report = LoadReport::default();
    while let Some(joined) = reads.join_next().await {
        match joined {
            Ok(Ok(task)) => {
                store.push_loaded(task).await;
                report.loaded += 1;
            }
            Ok(Err(e)) => {
                warn!(error = %e, "skipping task file");
                report.skipped += 1;
            }
            Err(e) => {
                warn!(error = %e, "task file read did not complete");
                report.skipped += 1;
            }
        }
    }

    store.mark_loaded(report);
    Ok(report)
}

/// Start loading `dir` in the background.
///
/// The returned handle resolves once the store is marked loaded; a directory
/// failure is logged rather than returned.
pub fn spawn_load(store: Arc<TaskStore>, dir: PathBuf) -> JoinHandle<LoadReport> {
    tokio::spawn(async move {
        match load_directory(store, &dir).await {
            Ok(report) => report,
            Err(e) => {
                error!(error = %e, "could not load tasks");
                LoadReport::default()
            }
        }
    })
}
