//! View derivations over the task collection.
//!
//! All functions here are pure: they borrow the collection, classify every
//! task against one evaluation instant, and sort copies of the references.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::{is_today_at, Schedulable};
use crate::error::FocuscoreError;

use super::model::{Priority, Status, Task};

/// Named derivation rules for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskView {
    /// Pending tasks due today or already overdue, soonest first.
    Agenda,
    /// Pending tasks whose deadline has passed, in stored order.
    Overdue,
    /// The whole collection.
    AllTasks,
    /// The whole collection, for charting.
    Timeline,
}

impl TaskView {
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Agenda => "Agenda",
            Self::Overdue => "Overdue",
            Self::AllTasks => "All Tasks",
            Self::Timeline => "Timeline",
        }
    }

    /// Derive this view from `tasks` as of `now`.
    #[must_use]
    pub fn apply(self, tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
        match self {
            Self::Agenda => {
                let mut agenda: Vec<&Task> = tasks
                    .iter()
                    .filter(|t| t.is_pending() && (t.is_due_today_at(now) || t.is_overdue_at(now)))
                    .collect();
                agenda.sort_by_key(|t| t.deadline);
                agenda
            },
            Self::Overdue => tasks
                .iter()
                .filter(|t| t.is_pending() && t.is_overdue_at(now))
                .collect(),
            Self::AllTasks | Self::Timeline => tasks.iter().collect(),
        }
    }
}

impl std::fmt::Display for TaskView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for TaskView {
    type Err = FocuscoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "agenda" => Ok(Self::Agenda),
            "overdue" => Ok(Self::Overdue),
            "all" | "all_tasks" => Ok(Self::AllTasks),
            "timeline" => Ok(Self::Timeline),
            other => Err(FocuscoreError::InvalidInput(format!("unknown view '{other}'"))),
        }
    }
}

/// Pending tasks split by urgency.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dashboard<'a> {
    /// Past their deadline, soonest first.
    pub overdue: Vec<&'a Task>,
    /// Due later today, soonest first.
    pub today: Vec<&'a Task>,
    /// Everything else, in stored order.
    pub later: Vec<&'a Task>,
}

/// Per-view badge counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewCounts {
    pub pending: usize,
    pub agenda: usize,
    pub overdue: usize,
    pub total: usize,
}

/// Completion statistics over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub completed_today: usize,
    pub pending_high: usize,
    pub pending_medium: usize,
    pub pending_low: usize,
    /// Completed / total, 0.0 for an empty collection.
    pub completion_rate: f64,
}

impl TaskStats {
    /// Pending count for one priority.
    #[must_use]
    pub const fn pending_with(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.pending_high,
            Priority::Medium => self.pending_medium,
            Priority::Low => self.pending_low,
        }
    }
}

/// Bucket pending tasks into overdue, today and later.
#[must_use]
pub fn dashboard(tasks: &[Task], now: DateTime<Utc>) -> Dashboard<'_> {
    let mut board = Dashboard::default();

    for task in tasks.iter().filter(|t| t.is_pending()) {
        if task.is_overdue_at(now) {
            board.overdue.push(task);
        } else if task.is_due_today_at(now) {
            board.today.push(task);
        } else {
            board.later.push(task);
        }
    }

    board.overdue.sort_by_key(|t| t.deadline);
    board.today.sort_by_key(|t| t.deadline);
    board
}

/// Pending tasks that are not overdue, soonest deadline first.
#[must_use]
pub fn upcoming(tasks: &[Task], now: DateTime<Utc>) -> Vec<&Task> {
    let mut upcoming: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.is_pending() && !t.is_overdue_at(now))
        .collect();
    upcoming.sort_by_key(|t| t.deadline);
    upcoming
}

#[must_use]
pub fn counts(tasks: &[Task], now: DateTime<Utc>) -> ViewCounts {
    ViewCounts {
        pending: tasks.iter().filter(|t| t.is_pending()).count(),
        agenda: TaskView::Agenda.apply(tasks, now).len(),
        overdue: TaskView::Overdue.apply(tasks, now).len(),
        total: tasks.len(),
    }
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        match task.status {
            Status::Pending => {
                stats.pending += 1;
                match task.priority {
                    Priority::High => stats.pending_high += 1,
                    Priority::Medium => stats.pending_medium += 1,
                    Priority::Low => stats.pending_low += 1,
                }
            },
            Status::Completed => {
                stats.completed += 1;
                if is_today_at(task.updated_at, now) {
                    stats.completed_today += 1;
                }
            },
        }
    }

    if stats.total > 0 {
        stats.completion_rate = stats.completed as f64 / stats.total as f64;
    }
    stats
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveTime};

    use super::*;
    use crate::core::local_to_utc;

    fn task(id: &str, deadline: DateTime<Utc>, priority: Priority, status: Status) -> Task {
        let created = deadline - Duration::days(30);
        Task {
            id: id.to_string(),
            title: id.to_string(),
            description: None,
            deadline,
            priority,
            tags: Vec::new(),
            status,
            created_at: created,
            updated_at: created,
        }
    }

    /// Noon today, so +/- a few hours stays on the same local date.
    fn noon() -> DateTime<Utc> {
        let date = Local::now().date_naive();
        local_to_utc(date.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()))
    }

    fn ids(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.id.clone()).collect()
    }

    fn sample(now: DateTime<Utc>) -> Vec<Task> {
        vec![
            task("later-today", now + Duration::hours(3), Priority::Low, Status::Pending),
            task("next-week", now + Duration::days(7), Priority::High, Status::Pending),
            task("overdue-recent", now - Duration::hours(1), Priority::Medium, Status::Pending),
            task("done", now - Duration::hours(2), Priority::High, Status::Completed),
            task("overdue-old", now - Duration::days(2), Priority::Low, Status::Pending),
        ]
    }

    #[test]
    fn test_agenda_is_today_or_overdue_sorted() {
        let now = noon();
        let tasks = sample(now);
        let agenda = TaskView::Agenda.apply(&tasks, now);
        assert_eq!(ids(&agenda), vec!["overdue-old", "overdue-recent", "later-today"]);
    }

    #[test]
    fn test_overdue_keeps_stored_order() {
        let now = noon();
        let tasks = sample(now);
        let overdue = TaskView::Overdue.apply(&tasks, now);
        assert_eq!(ids(&overdue), vec!["overdue-recent", "overdue-old"]);
    }

    #[test]
    fn test_all_tasks_and_timeline_are_unfiltered() {
        let now = noon();
        let tasks = sample(now);
        assert_eq!(TaskView::AllTasks.apply(&tasks, now).len(), 5);
        assert_eq!(TaskView::Timeline.apply(&tasks, now).len(), 5);
    }

    #[test]
    fn test_dashboard_buckets() {
        let now = noon();
        let tasks = sample(now);
        let board = dashboard(&tasks, now);

        assert_eq!(ids(&board.overdue), vec!["overdue-old", "overdue-recent"]);
        assert_eq!(ids(&board.today), vec!["later-today"]);
        assert_eq!(ids(&board.later), vec!["next-week"]);
    }

    #[test]
    fn test_upcoming_excludes_overdue_and_completed() {
        let now = noon();
        let tasks = sample(now);
        assert_eq!(ids(&upcoming(&tasks, now)), vec!["later-today", "next-week"]);
    }

    #[test]
    fn test_counts() {
        let now = noon();
        let tasks = sample(now);
        assert_eq!(
            counts(&tasks, now),
            ViewCounts {
                pending: 4,
                agenda: 3,
                overdue: 2,
                total: 5,
            }
        );
    }

    #[test]
    fn test_stats() {
        let now = noon();
        let mut tasks = sample(now);
        tasks[3].updated_at = now;

        let stats = stats(&tasks, now);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.completed_today, 1);
        assert_eq!(stats.pending_with(Priority::Low), 2);
        assert_eq!(stats.pending_with(Priority::High), 1);
        assert!((stats.completion_rate - 0.2).abs() < f64::EPSILON);
    }

    #[test]
    fn test_view_from_str() {
        assert_eq!("all-tasks".parse::<TaskView>().unwrap(), TaskView::AllTasks);
        assert_eq!("AGENDA".parse::<TaskView>().unwrap(), TaskView::Agenda);
        assert!("focus".parse::<TaskView>().is_err());
    }
}
