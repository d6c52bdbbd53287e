//! Focus mode command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{FocusCommands, OutputFormat};
use crate::error::FocuscoreError;
use crate::features::focus::FocusController;
use crate::output::format_focus;
use crate::tasks::TaskHandle;

/// Execute focus subcommands. No subcommand shows the status.
///
/// # Errors
///
/// Returns an error if the store is unreachable, the terminal cannot be
/// driven, or output formatting fails.
pub fn focus(
    handle: &TaskHandle,
    controller: &mut FocusController,
    cmd: Option<FocusCommands>,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    match cmd.unwrap_or(FocusCommands::Status) {
        FocusCommands::Status => show_status(handle, controller, format),
        FocusCommands::Complete => complete_active(handle, controller, format),
        FocusCommands::Run => {
            crate::tui::run(handle, controller)?;
            Ok(String::new())
        },
    }
}

fn show_status(
    handle: &TaskHandle,
    controller: &mut FocusController,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    handle.with(|store| {
        controller.sync(store.tasks());
        format_focus(&controller.snapshot(store.tasks()), format)
    })?
}

fn complete_active(
    handle: &TaskHandle,
    controller: &mut FocusController,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    handle.with_mut(|store| -> Result<String, FocuscoreError> {
        let completed = controller.complete(store);
        let next = controller
            .active_id()
            .and_then(|id| store.get(id))
            .map(|t| t.title.clone());

        match (format, completed) {
            (OutputFormat::Json, Some(task)) => {
                let output = json!({
                    "completed": task,
                    "next": next,
                });
                Ok(serde_json::to_string_pretty(&output)?)
            },
            (OutputFormat::Json, None) => Ok(json!({ "completed": null, "next": null }).to_string()),
            (OutputFormat::Pretty, Some(task)) => {
                let mut output = format!("{} {}", "Completed:".green().bold(), task.title);
                match next {
                    Some(title) => output.push_str(&format!("\n{} {title}", "Up next:".cyan())),
                    None => output.push_str(&format!("\n{}", "Nothing left to focus on.".dimmed())),
                }
                Ok(output)
            },
            (OutputFormat::Pretty, None) => Ok("No active task to complete.".dimmed().to_string()),
        }
    })?
}
