//! JSON output formatting for focuscore.
//!
//! Tasks serialize with the same field names and timestamp format as the
//! stored collection.

use serde::Serialize;
use serde_json::json;

use crate::error::FocuscoreError;
use crate::features::capture::CapturedTask;
use crate::tasks::{Dashboard, Task, TaskStats, ViewCounts};

/// Format tasks as JSON
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_tasks_json(tasks: &[&Task], list_name: &str) -> Result<String, FocuscoreError> {
    let output = json!({
        "list": list_name,
        "count": tasks.len(),
        "items": tasks
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single task as JSON
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_task_json(task: &Task) -> Result<String, FocuscoreError> {
    Ok(serde_json::to_string_pretty(task)?)
}

/// Format the dashboard buckets and view counts as JSON
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_dashboard_json(
    board: &Dashboard<'_>,
    counts: &ViewCounts,
) -> Result<String, FocuscoreError> {
    let output = json!({
        "counts": counts,
        "overdue": board.overdue,
        "today": board.today,
        "later": board.later,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format statistics as JSON
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_stats_json(stats: &TaskStats) -> Result<String, FocuscoreError> {
    Ok(serde_json::to_string_pretty(stats)?)
}

/// Format a parsed capture line as JSON
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_captured_json(captured: &CapturedTask) -> Result<String, FocuscoreError> {
    let output = json!({
        "title": captured.title,
        "description": captured.description,
        "priority": captured.priority.unwrap_or_default(),
        "deadline": captured
            .deadline
            .as_ref()
            .map(|d| crate::tasks::timestamp::format(&d.to_deadline())),
        "tags": captured.tags,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, FocuscoreError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::capture::parse_capture;
    use crate::tasks::{Priority, Status};

    fn make_task(title: &str) -> Task {
        Task {
            id: "a1b2c3d4".to_string(),
            title: title.to_string(),
            description: None,
            deadline: "2026-10-20T17:00:00Z".parse().unwrap(),
            priority: Priority::High,
            tags: vec!["docs".to_string()],
            status: Status::Pending,
            created_at: "2026-10-19T08:00:00Z".parse().unwrap(),
            updated_at: "2026-10-19T08:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_format_tasks_json_envelope() {
        let task = make_task("Write");
        let output = format_tasks_json(&[&task], "Agenda").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["list"], "Agenda");
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["items"][0]["title"], "Write");
        assert_eq!(parsed["items"][0]["deadline"], "2026-10-20T17:00:00.000Z");
    }

    #[test]
    fn test_format_tasks_json_empty() {
        let output = format_tasks_json(&[], "Overdue").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["count"], 0);
        assert!(parsed["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_task_json_fields() {
        let output = format_task_json(&make_task("Solo")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["id"], "a1b2c3d4");
        assert_eq!(parsed["priority"], "HIGH");
        assert_eq!(parsed["status"], "PENDING");
        assert_eq!(parsed["createdAt"], "2026-10-19T08:00:00.000Z");
    }

    #[test]
    fn test_format_dashboard_json_counts() {
        let task = make_task("Soon");
        let board = Dashboard {
            overdue: vec![],
            today: vec![&task],
            later: vec![],
        };
        let counts = ViewCounts {
            pending: 1,
            agenda: 1,
            overdue: 0,
            total: 1,
        };
        let output = format_dashboard_json(&board, &counts).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["counts"]["agenda"], 1);
        assert_eq!(parsed["today"][0]["title"], "Soon");
        assert!(parsed["overdue"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_stats_json_camel_case() {
        let output = format_stats_json(&TaskStats::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["completedToday"], 0);
        assert_eq!(parsed["completionRate"], 0.0);
    }

    #[test]
    fn test_format_captured_json() {
        let output = format_captured_json(&parse_capture("ship it #release")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["title"], "ship it");
        assert_eq!(parsed["priority"], "MEDIUM");
        assert!(parsed["deadline"].is_null());
        assert_eq!(parsed["tags"][0], "release");
    }
}
