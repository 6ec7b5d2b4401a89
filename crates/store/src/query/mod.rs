//! Task query pipeline
//!
//! `raw tasks → filter → order → view`. Both stages are pure: they borrow the
//! input records and return references in display order.

mod filter;
mod order;
mod params;

pub use filter::{filter_tasks, matches_tag, matches_title};
pub use order::{TaskComparator, order_tasks, partition_pinned, pinned_first};
pub use params::{Sort, SortKey, SortOrder, TaskQuery};

use crate::models::Task;
use tracing::debug;

/// Run the full pipeline over a collection of tasks.
///
/// The result is never longer than the input and never surfaces an error;
/// unusable parameters degrade to no-ops.
pub fn run_query<'a, I>(tasks: I, query: &TaskQuery) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    debug!(?query, "running task query");
    let filtered = filter_tasks(tasks, query);
    order_tasks(filtered, query)
}
