//! Output formatting for focuscore.
//!
//! This module provides formatters for displaying tasks and focus state in
//! various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::FocuscoreError;
use crate::features::capture::CapturedTask;
use crate::features::focus::FocusSnapshot;
use crate::tasks::{Dashboard, Task, TaskStats, ViewCounts};

pub use json::*;
pub use pretty::*;

/// Format tasks based on output format
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_tasks(
    tasks: &[&Task],
    title: &str,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_tasks_pretty(tasks, title)),
        OutputFormat::Json => format_tasks_json(tasks, title),
    }
}

/// Format a single task based on output format
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_task(task: &Task, format: OutputFormat) -> Result<String, FocuscoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_task_pretty(task)),
        OutputFormat::Json => format_task_json(task),
    }
}

/// Format the dashboard buckets based on output format
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_dashboard(
    board: &Dashboard<'_>,
    counts: &ViewCounts,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_dashboard_pretty(board, counts)),
        OutputFormat::Json => format_dashboard_json(board, counts),
    }
}

/// Format statistics based on output format
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_stats(stats: &TaskStats, format: OutputFormat) -> Result<String, FocuscoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(stats)),
        OutputFormat::Json => format_stats_json(stats),
    }
}

/// Format a focus snapshot based on output format
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_focus(
    snapshot: &FocusSnapshot<'_>,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_focus_pretty(snapshot)),
        OutputFormat::Json => to_json(snapshot),
    }
}

/// Format a parsed capture line based on output format
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if JSON serialization fails.
pub fn format_captured(
    captured: &CapturedTask,
    format: OutputFormat,
) -> Result<String, FocuscoreError> {
    match format {
        OutputFormat::Pretty => Ok(format_captured_pretty(captured)),
        OutputFormat::Json => format_captured_json(captured),
    }
}
