//! Filter, search and sort pipeline producing the visible task list.
//!
//! [`compute_view`] is a pure function of its inputs: it never mutates the
//! collection, keeps no state between calls, and returns the same sequence for the
//! same inputs. It is cheap enough to rerun on every keystroke.
//!
//! # Ordering policy
//!
//! | Key | Compared value | Absent value |
//! |---|---|---|
//! | `createdAt` | creation timestamp | lowest |
//! | `dueDate` | due date | lowest |
//! | `priority` | high=3, medium=2, low=1 | 0 |
//! | `text` | lowercased text | n/a |
//!
//! Descending order reverses the comparator. The sort is stable, so tasks with equal
//! keys keep their relative input order in both directions.

use super::params::{SortKey, SortOrder, ViewParams};
use crate::domain::Task;
use std::cmp::Ordering;

/// Computes the ordered subset of `tasks` to display for `params`.
///
/// # Example
///
/// ```
/// use taskdeck::domain::Task;
/// use taskdeck::view::{compute_view, StatusFilter, ViewParams};
///
/// let mut done = Task::new("1", "Buy milk");
/// done.completed = true;
/// let open = Task::new("2", "Write report");
///
/// let params = ViewParams { filter_status: StatusFilter::Pending, ..ViewParams::default() };
/// let visible = compute_view(&[done, open], &params);
/// assert_eq!(visible.len(), 1);
/// assert_eq!(visible[0].text, "Write report");
/// ```
#[must_use]
pub fn compute_view(tasks: &[Task], params: &ViewParams) -> Vec<Task> {
    let _span = tracing::debug_span!(
        "compute_view",
        total = tasks.len(),
        search_len = params.search_term.len(),
        status = %params.filter_status,
        sort_by = %params.sort_by,
        sort_order = %params.sort_order
    )
    .entered();

    let term = params.search_term.to_lowercase();

    let mut visible: Vec<Task> = tasks
        .iter()
        .filter(|task| matches_search(task, &term))
        .filter(|task| params.filter_status.keeps(task.completed))
        .cloned()
        .collect();

    visible.sort_by(|a, b| {
        let ordering = compare_by(a, b, params.sort_by);
        match params.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    tracing::debug!(visible = visible.len(), "view computed");
    visible
}

/// Case-insensitive substring match on text, notes or any tag.
///
/// `term` must already be lowercased. An empty term matches everything.
fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    task.text.to_lowercase().contains(term)
        || task
            .notes
            .as_deref()
            .is_some_and(|notes| notes.to_lowercase().contains(term))
        || task.tags.iter().any(|tag| tag.to_lowercase().contains(term))
}

/// Ascending comparison of two tasks on `key`.
fn compare_by(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        // `None < Some(_)` gives the absent-lowest policy for both dates.
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::DueDate => a.due_date.cmp(&b.due_date),
        SortKey::Priority => priority_rank(a).cmp(&priority_rank(b)),
        SortKey::Text => a.text.to_lowercase().cmp(&b.text.to_lowercase()),
    }
}

fn priority_rank(task: &Task) -> u8 {
    task.priority.map_or(0, |p| p.rank())
}
