//! Quick add command implementation.
//!
//! This module implements the `focuscore add` command for one-line task entry.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AddArgs, OutputFormat};
use crate::core::parse_deadline;
use crate::error::FocuscoreError;
use crate::features::capture::parse_capture;
use crate::output::{format_captured, format_task_pretty};
use crate::tasks::TaskHandle;

/// Execute the quick add command.
///
/// # Errors
///
/// Returns `FocuscoreError::InvalidInput` if no title remains or the deadline
/// override cannot be parsed, and `FocuscoreError::OutsideProvider` if the
/// store is gone.
pub fn quick_add(
    handle: &TaskHandle,
    args: AddArgs,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    let mut captured = parse_capture(&args.text);

    if let Some(description) = args.description {
        captured.description = Some(description);
    }
    if let Some(priority) = args.priority {
        captured.priority = Some(priority);
    }

    // Merge CLI tags with parsed tags (deduplicated)
    for tag in args.tags {
        let trimmed = tag.trim().trim_start_matches('#').to_string();
        if !trimmed.is_empty() && !captured.tags.contains(&trimmed) {
            captured.tags.push(trimmed);
        }
    }

    if args.parse_only {
        return format_captured(&captured, format);
    }

    if captured.title.is_empty() {
        return Err(FocuscoreError::InvalidInput("No task title found".to_string()));
    }

    let deadline_override = args
        .deadline
        .map(|raw| {
            parse_deadline(&raw)
                .ok_or_else(|| FocuscoreError::InvalidInput(format!("Unrecognized deadline '{raw}'")))
        })
        .transpose()?;

    let mut input = captured.into_new_task();
    if deadline_override.is_some() {
        input.deadline = deadline_override;
    }

    let task = handle.with_mut(|store| store.create(input))?;

    match format {
        OutputFormat::Json => {
            let output = json!({
                "created": true,
                "task": task,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        },
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "Created:".green().bold(),
            format_task_pretty(&task)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::tasks::{Priority, TaskProvider, TaskStore, STORAGE_KEY};

    fn provider() -> TaskProvider {
        let store = TaskStore::load(Box::new(MemoryStore::with_entry(STORAGE_KEY, "[]")));
        TaskProvider::new(store)
    }

    fn args(text: &str) -> AddArgs {
        AddArgs {
            text: text.to_string(),
            description: None,
            priority: None,
            deadline: None,
            tags: Vec::new(),
            parse_only: false,
        }
    }

    #[test]
    fn test_add_creates_task() {
        let provider = provider();
        let handle = provider.handle();

        quick_add(&handle, args("write tests #dev !high"), OutputFormat::Json).unwrap();

        let task = handle.with(|s| s.tasks()[0].clone()).unwrap();
        assert_eq!(task.title, "write tests");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags, vec!["dev".to_string()]);
    }

    #[test]
    fn test_flags_override_parsed_values() {
        let provider = provider();
        let handle = provider.handle();

        let mut add = args("write tests !high #dev");
        add.priority = Some(Priority::Low);
        add.tags = vec!["#dev".to_string(), "qa".to_string()];
        add.deadline = Some("2030-01-02T03:04:05Z".to_string());
        quick_add(&handle, add, OutputFormat::Pretty).unwrap();

        let task = handle.with(|s| s.tasks()[0].clone()).unwrap();
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.tags, vec!["dev".to_string(), "qa".to_string()]);
        assert_eq!(task.deadline.to_rfc3339(), "2030-01-02T03:04:05+00:00");
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let provider = provider();
        let result = quick_add(&provider.handle(), args("#only-tags"), OutputFormat::Pretty);
        assert!(matches!(result, Err(FocuscoreError::InvalidInput(_))));
    }

    #[test]
    fn test_bad_deadline_is_rejected() {
        let provider = provider();
        let mut add = args("something");
        add.deadline = Some("someday maybe".to_string());
        assert!(quick_add(&provider.handle(), add, OutputFormat::Pretty).is_err());
    }

    #[test]
    fn test_parse_only_does_not_create() {
        let provider = provider();
        let handle = provider.handle();
        let mut add = args("dry run tomorrow");
        add.parse_only = true;

        let output = quick_add(&handle, add, OutputFormat::Json).unwrap();
        assert!(output.contains("dry run"));
        assert_eq!(handle.with(|s| s.tasks().len()).unwrap(), 0);
    }
}
