//! Command implementations for focuscore.
//!
//! This module contains the implementation of all CLI commands. Every
//! command reaches the store through a [`TaskHandle`].

mod add;
mod focus;

pub use add::quick_add;
pub use focus::focus;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{EditArgs, OutputFormat};
use crate::core::parse_deadline;
use crate::error::FocuscoreError;
use crate::output::{format_dashboard, format_stats, format_task, format_tasks};
use crate::tasks::{TaskHandle, TaskPatch, TaskView};

/// Execute a list view command (agenda, overdue, list)
///
/// # Errors
///
/// Returns an error if the store is unreachable or output formatting fails.
pub fn view(
    handle: &TaskHandle,
    view: TaskView,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    handle.with(|store| format_tasks(&store.query_by_view(view), view.title(), format))?
}

/// Execute upcoming command
///
/// # Errors
///
/// Returns an error if the store is unreachable or output formatting fails.
pub fn upcoming(handle: &TaskHandle, format: OutputFormat) -> Result<String, FocuscoreError> {
    handle.with(|store| format_tasks(&store.upcoming(), "Upcoming", format))?
}

/// Execute dashboard command
///
/// # Errors
///
/// Returns an error if the store is unreachable or output formatting fails.
pub fn dashboard(handle: &TaskHandle, format: OutputFormat) -> Result<String, FocuscoreError> {
    handle.with(|store| format_dashboard(&store.dashboard(), &store.counts(), format))?
}

/// Execute stats command
///
/// # Errors
///
/// Returns an error if the store is unreachable or output formatting fails.
pub fn stats(handle: &TaskHandle, format: OutputFormat) -> Result<String, FocuscoreError> {
    handle.with(|store| format_stats(&store.stats(), format))?
}

/// Execute show command
///
/// # Errors
///
/// Returns `FocuscoreError::NotFound` if no task has this id.
pub fn show(handle: &TaskHandle, id: &str, format: OutputFormat) -> Result<String, FocuscoreError> {
    handle.with(|store| -> Result<String, FocuscoreError> {
        let task = store
            .get(id)
            .ok_or_else(|| FocuscoreError::NotFound(format!("Task with ID: {id}")))?;
        format_task(task, format)
    })?
}

/// Execute toggle command. An unknown id is reported, not an error.
///
/// # Errors
///
/// Returns an error if the store is unreachable or output formatting fails.
pub fn toggle(handle: &TaskHandle, id: &str, format: OutputFormat) -> Result<String, FocuscoreError> {
    let toggled = handle.with_mut(|store| store.toggle_status(id).cloned())?;

    match (format, toggled) {
        (OutputFormat::Json, task) => Ok(serde_json::to_string_pretty(&json!({
            "changed": task.is_some(),
            "task": task,
        }))?),
        (OutputFormat::Pretty, Some(task)) => Ok(format!(
            "{} {} is now {}",
            "Toggled:".green().bold(),
            task.title,
            task.status
        )),
        (OutputFormat::Pretty, None) => Ok(no_change(id)),
    }
}

/// Execute delete command. An unknown id is reported, not an error.
///
/// # Errors
///
/// Returns an error if the store is unreachable or output formatting fails.
pub fn delete(handle: &TaskHandle, id: &str, format: OutputFormat) -> Result<String, FocuscoreError> {
    let removed = handle.with_mut(|store| store.delete(id))?;

    match (format, removed) {
        (OutputFormat::Json, task) => Ok(serde_json::to_string_pretty(&json!({
            "changed": task.is_some(),
            "task": task,
        }))?),
        (OutputFormat::Pretty, Some(task)) => {
            Ok(format!("{} {}", "Deleted:".red().bold(), task.title))
        },
        (OutputFormat::Pretty, None) => Ok(no_change(id)),
    }
}

/// Execute edit command. An unknown id is reported, not an error.
///
/// # Errors
///
/// Returns `FocuscoreError::InvalidInput` if nothing would change or the
/// deadline cannot be parsed.
pub fn edit(handle: &TaskHandle, args: EditArgs, format: OutputFormat) -> Result<String, FocuscoreError> {
    let patch = build_patch(&args)?;
    if patch.is_empty() {
        return Err(FocuscoreError::InvalidInput(
            "Nothing to change; pass at least one field".to_string(),
        ));
    }

    let updated = handle.with_mut(|store| store.update(&args.id, patch).cloned())?;

    match (format, updated) {
        (OutputFormat::Json, task) => Ok(serde_json::to_string_pretty(&json!({
            "changed": task.is_some(),
            "task": task,
        }))?),
        (OutputFormat::Pretty, Some(task)) => Ok(format!(
            "{} {}",
            "Updated:".green().bold(),
            crate::output::format_task_pretty(&task)
        )),
        (OutputFormat::Pretty, None) => Ok(no_change(&args.id)),
    }
}

fn build_patch(args: &EditArgs) -> Result<TaskPatch, FocuscoreError> {
    let deadline = args
        .deadline
        .as_deref()
        .map(|raw| {
            parse_deadline(raw)
                .ok_or_else(|| FocuscoreError::InvalidInput(format!("Unrecognized deadline '{raw}'")))
        })
        .transpose()?;

    let description = if args.clear_description {
        Some(None)
    } else {
        args.description.clone().map(Some)
    };

    let tags = if args.tags.is_empty() {
        None
    } else {
        Some(
            args.tags
                .iter()
                .map(|t| t.trim().trim_start_matches('#').to_string())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    };

    Ok(TaskPatch {
        title: args.title.clone(),
        description,
        deadline,
        priority: args.priority,
        tags,
        status: None,
    })
}

fn no_change(id: &str) -> String {
    format!("No task with ID {id}; nothing changed").dimmed().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::tasks::{NewTask, Priority, Status, TaskProvider, TaskStore, STORAGE_KEY};

    fn provider() -> TaskProvider {
        let store = TaskStore::load(Box::new(MemoryStore::with_entry(STORAGE_KEY, "[]")));
        TaskProvider::new(store)
    }

    fn edit_args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            title: None,
            description: None,
            clear_description: false,
            priority: None,
            deadline: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_show_missing_is_not_found() {
        let provider = provider();
        let result = show(&provider.handle(), "nope", OutputFormat::Pretty);
        assert!(matches!(result, Err(FocuscoreError::NotFound(_))));
    }

    #[test]
    fn test_toggle_unknown_id_reports_no_change() {
        let provider = provider();
        let output = toggle(&provider.handle(), "nope", OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["changed"], false);
    }

    #[test]
    fn test_toggle_and_delete() {
        let provider = provider();
        let handle = provider.handle();
        let id = handle.with_mut(|s| s.create(NewTask::new("Flip")).id).unwrap();

        toggle(&handle, &id, OutputFormat::Pretty).unwrap();
        let status = handle.with(|s| s.get(&id).map(|t| t.status)).unwrap();
        assert_eq!(status, Some(Status::Completed));

        let output = delete(&handle, &id, OutputFormat::Json).unwrap();
        assert!(output.contains("\"changed\": true"));
        assert!(handle.with(|s| s.get(&id).is_none()).unwrap());
    }

    #[test]
    fn test_edit_applies_patch() {
        let provider = provider();
        let handle = provider.handle();
        let id = handle
            .with_mut(|s| s.create(NewTask::new("Draft").with_description("old")).id)
            .unwrap();

        let mut args = edit_args(&id);
        args.title = Some("Final".to_string());
        args.clear_description = true;
        args.priority = Some(Priority::High);
        args.tags = vec!["#docs".to_string()];
        edit(&handle, args, OutputFormat::Pretty).unwrap();

        let task = handle.with(|s| s.get(&id).cloned()).unwrap().unwrap();
        assert_eq!(task.title, "Final");
        assert!(task.description.is_none());
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags, vec!["docs".to_string()]);
    }

    #[test]
    fn test_edit_without_fields_is_rejected() {
        let provider = provider();
        let result = edit(&provider.handle(), edit_args("x"), OutputFormat::Pretty);
        assert!(matches!(result, Err(FocuscoreError::InvalidInput(_))));
    }

    #[test]
    fn test_upcoming_skips_overdue_and_completed() {
        let provider = provider();
        let handle = provider.handle();
        handle
            .with_mut(|s| {
                let past = crate::core::now() - chrono::Duration::hours(2);
                s.create(NewTask::new("Late").with_deadline(past));
                let done = s.create(NewTask::new("Done")).id;
                s.toggle_status(&done);
                s.create(NewTask::new("Soon"));
            })
            .unwrap();

        let output = upcoming(&handle, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["list"], "Upcoming");
        assert_eq!(parsed["count"], 1);
        assert_eq!(parsed["items"][0]["title"], "Soon");
    }

    #[test]
    fn test_dashboard_includes_counts() {
        let provider = provider();
        let handle = provider.handle();
        handle
            .with_mut(|s| {
                let past = crate::core::now() - chrono::Duration::hours(2);
                s.create(NewTask::new("Late").with_deadline(past));
                s.create(NewTask::new("Today"));
            })
            .unwrap();

        let output = dashboard(&handle, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["counts"]["pending"], 2);
        assert_eq!(parsed["counts"]["overdue"], 1);
        assert_eq!(parsed["counts"]["total"], 2);
        assert_eq!(parsed["overdue"][0]["title"], "Late");
    }

    #[test]
    fn test_view_json_envelope() {
        let provider = provider();
        let handle = provider.handle();
        handle.with_mut(|s| s.create(NewTask::new("Today"))).unwrap();

        let output = view(&handle, TaskView::AllTasks, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["list"], "All Tasks");
        assert_eq!(parsed["count"], 1);
    }
}
