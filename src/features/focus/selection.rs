//! Active task selection.

use chrono::{DateTime, Utc};

use crate::core::Schedulable;
use crate::tasks::Task;

/// The task to work on now, and what comes after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusSelection<'a> {
    pub active: Option<&'a Task>,
    pub queued: Vec<&'a Task>,
}

impl FocusSelection<'_> {
    /// No pending tasks at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.active.is_none()
    }
}

/// Pending tasks in focus order: overdue, then due today, then priority.
///
/// The sort is stable, so fully tied tasks keep their stored order.
#[must_use]
pub fn rank_pending_at(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    let mut ranked: Vec<&Task> = tasks.iter().filter(|t| t.is_pending()).collect();
    ranked.sort_by_key(|t| {
        (
            !t.is_overdue_at(now),
            !t.is_due_today_at(now),
            t.priority.rank(),
        )
    });
    ranked
}

/// Split the ranking into the active task and up to `queue_size` queued ones.
#[must_use]
pub fn select_at(tasks: &[Task], now: DateTime<Utc>, queue_size: usize) -> FocusSelection<'_> {
    let mut ranked = rank_pending_at(tasks, now).into_iter();
    FocusSelection {
        active: ranked.next(),
        queued: ranked.take(queue_size).collect(),
    }
}
