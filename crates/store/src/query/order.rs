//! Order stage
//!
//! Pinned tasks always come first. When a recognized sort is requested, each
//! pinned partition is additionally ordered by due date or priority; the sort
//! is stable, so ties keep their input order.
//!
//! A task without a usable due date never compares before or after another
//! task. Under a due-date sort such tasks keep their slot inside their
//! partition and the dated tasks are sorted into the remaining slots, which
//! keeps the ordering total.

use super::params::{Sort, SortKey, SortOrder, TaskQuery};
use crate::models::Task;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Comparable value extracted from a task for the active sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Priority(i64),
    Due(DateTime<Utc>),
}

/// Fused pinned-first + secondary comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskComparator {
    sort: Sort,
}

impl TaskComparator {
    /// Create a comparator for a recognized sort
    pub fn new(sort: Sort) -> Self {
        Self { sort }
    }

    /// Comparator for the query, if it carries a recognized sort
    pub fn for_query(query: &TaskQuery) -> Option<Self> {
        query.sort().map(Self::new)
    }

    /// Compare two tasks.
    ///
    /// Exactly one pinned task short-circuits to pinned-first. Otherwise the
    /// secondary key decides; a missing due date compares as equal.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        match (a.pinned, b.pinned) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => match (self.value(a), self.value(b)) {
                (Some(x), Some(y)) => self.directed(x.cmp(&y)),
                _ => Ordering::Equal,
            },
        }
    }

    fn value(&self, task: &Task) -> Option<SortValue> {
        match self.sort.key {
            SortKey::Priority => Some(SortValue::Priority(task.priority)),
            SortKey::DueDate => task.due_instant().map(SortValue::Due),
        }
    }

    fn directed(&self, ordering: Ordering) -> Ordering {
        match self.sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Order one pinned partition in place.
    ///
    /// Tasks without a sort value stay where they are; the others are stably
    /// sorted among the remaining positions.
    fn sort_partition(&self, partition: &mut [&Task]) {
        let (slots, mut keyed): (Vec<usize>, Vec<&Task>) = partition
            .iter()
            .enumerate()
            .filter(|(_, task)| self.value(task).is_some())
            .map(|(i, task)| (i, *task))
            .unzip();

        keyed.sort_by(|a, b| self.compare(a, b));

        for (slot, task) in slots.into_iter().zip(keyed) {
            partition[slot] = task;
        }
    }
}

/// Split tasks into pinned and unpinned, each keeping its input order.
pub fn partition_pinned<'a, I>(tasks: I) -> (Vec<&'a Task>, Vec<&'a Task>)
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().partition(|task| task.pinned)
}

/// Pinned tasks first, otherwise input order.
pub fn pinned_first<'a, I>(tasks: I) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let (mut pinned, unpinned) = partition_pinned(tasks);
    pinned.extend(unpinned);
    pinned
}

/// Order tasks for display.
///
/// Always applies the pinned overlay. Applies the secondary sort only when
/// the query carries both a recognized `sort-by` and `sort-order`; any other
/// combination leaves the pinned overlay as the whole ordering.
pub fn order_tasks<'a, I>(tasks: I, query: &TaskQuery) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    let Some(comparator) = TaskComparator::for_query(query) else {
        return pinned_first(tasks);
    };

    let (mut pinned, mut unpinned) = partition_pinned(tasks);
    comparator.sort_partition(&mut pinned);
    comparator.sort_partition(&mut unpinned);

    pinned.extend(unpinned);
    pinned
}
