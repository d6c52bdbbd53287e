use chrono::{DateTime, Local, Utc};
use colored::{ColoredString, Colorize};

use crate::core::{is_overdue, is_today};
use crate::features::capture::CapturedTask;
use crate::features::focus::{render_progress_bar, FocusSnapshot, TimerState};
use crate::tasks::{Dashboard, Priority, Status, Task, TaskStats, ViewCounts};

fn status_icon(status: Status) -> ColoredString {
    match status {
        Status::Pending => "[ ]".white(),
        Status::Completed => "[x]".green(),
    }
}

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "HIGH".red().bold(),
        Priority::Medium => "MED".yellow(),
        Priority::Low => "LOW".dimmed(),
    }
}

/// Local wall-clock deadline, red when overdue and yellow when due today.
fn deadline_label(task: &Task) -> ColoredString {
    let text = format_local(task.deadline);
    if task.is_completed() {
        text.dimmed()
    } else if is_overdue(task.deadline) {
        text.red()
    } else if is_today(task.deadline) {
        text.yellow()
    } else {
        text.normal()
    }
}

fn format_local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn task_line(task: &Task) -> String {
    let title = match task.status {
        Status::Completed => task.title.strikethrough().to_string(),
        Status::Pending => task.title.bold().to_string(),
    };

    let mut line = format!(
        "{} {}  {}  {}  {}",
        status_icon(task.status),
        task.id.dimmed(),
        title,
        priority_label(task.priority),
        deadline_label(task)
    );

    if !task.tags.is_empty() {
        let tags_str = task
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        line.push_str(&format!("  {}", tags_str.cyan()));
    }

    line
}

/// Format a list of tasks as a pretty table
pub fn format_tasks_pretty(tasks: &[&Task], title: &str) -> String {
    if tasks.is_empty() {
        return format!("{title} (0 items)\n  No items");
    }

    let mut output = format!("{title} ({} items)\n", tasks.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for task in tasks {
        output.push_str(&task_line(task));
        output.push('\n');
    }

    output
}

/// Format a single task as pretty output
pub fn format_task_pretty(task: &Task) -> String {
    let mut output = format!("{} {}\n", status_icon(task.status), task.title.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), task.id));
    output.push_str(&format!("  {}: {}\n", "Status".dimmed(), task.status));
    output.push_str(&format!(
        "  {}: {}\n",
        "Priority".dimmed(),
        priority_label(task.priority)
    ));
    output.push_str(&format!("  {}: {}\n", "Deadline".dimmed(), deadline_label(task)));

    if let Some(description) = &task.description {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), description));
    }

    if !task.tags.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Tags".dimmed(), task.tags.join(", ")));
    }

    output.push_str(&format!(
        "  {}: {}\n",
        "Created".dimmed(),
        format_local(task.created_at)
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Updated".dimmed(),
        format_local(task.updated_at)
    ));

    output
}

/// Format the overdue / today / later buckets
pub fn format_dashboard_pretty(board: &Dashboard<'_>, counts: &ViewCounts) -> String {
    let mut output = format!(
        "{} pending | {} on agenda | {} overdue | {} total\n\n",
        counts.pending, counts.agenda, counts.overdue, counts.total
    );

    let sections = [
        ("Overdue".red().bold(), &board.overdue),
        ("Today".yellow().bold(), &board.today),
        ("Later".bold(), &board.later),
    ];

    for (heading, tasks) in sections {
        output.push_str(&format!("{heading} ({})\n", tasks.len()));
        if tasks.is_empty() {
            output.push_str(&format!("  {}\n", "Nothing here".dimmed()));
        }
        for task in tasks.iter() {
            output.push_str(&format!("  {}\n", task_line(task)));
        }
        output.push('\n');
    }

    output.trim_end().to_string()
}

/// Format completion statistics
pub fn format_stats_pretty(stats: &TaskStats) -> String {
    let mut output = format!("{}\n", "Task Statistics".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    output.push_str(&format!("  {:<16} {}\n", "Total", stats.total));
    output.push_str(&format!("  {:<16} {}\n", "Pending", stats.pending));
    output.push_str(&format!("  {:<16} {}\n", "Completed", stats.completed));
    output.push_str(&format!(
        "  {:<16} {}\n",
        "Done today",
        stats.completed_today.to_string().green()
    ));
    output.push_str(&format!(
        "  {:<16} {} {:.0}%\n",
        "Completion",
        render_progress_bar(stats.completion_rate, 20),
        stats.completion_rate * 100.0
    ));

    output.push_str(&format!("\n  {}\n", "Pending by priority".dimmed()));
    for priority in Priority::ALL {
        output.push_str(&format!(
            "  {:<16} {}\n",
            priority_label(priority),
            stats.pending_with(priority)
        ));
    }

    output
}

/// Format the focus screen as static text
pub fn format_focus_pretty(snapshot: &FocusSnapshot<'_>) -> String {
    let Some(active) = snapshot.active else {
        return format!(
            "{}\n  No pending tasks. {} completed today.",
            "Focus".bold(),
            snapshot.completed_today
        );
    };

    let state = match snapshot.state {
        TimerState::Running => "Running".green(),
        TimerState::Idle => "Idle".dimmed(),
    };

    let mut output = format!("{}\n", "Focus".bold());
    output.push_str(&"─".repeat(50));
    output.push('\n');
    output.push_str(&format!("  {}\n", active.title.bold().cyan()));
    output.push_str(&format!(
        "  {}  {}  {}\n",
        active.id.dimmed(),
        priority_label(active.priority),
        deadline_label(active)
    ));
    output.push_str(&format!(
        "\n  {} {} {}\n",
        snapshot.remaining.bold(),
        render_progress_bar(snapshot.progress, 30),
        state
    ));

    if !snapshot.queued.is_empty() {
        output.push_str(&format!("\n  {}\n", "Up next".dimmed()));
        for task in &snapshot.queued {
            output.push_str(&format!(
                "  • {}  {}\n",
                task.title,
                deadline_label(task)
            ));
        }
    }

    output.push_str(&format!(
        "\n  {} completed today\n",
        snapshot.completed_today.to_string().green()
    ));

    output
}

/// Format what a capture line would create
pub fn format_captured_pretty(captured: &CapturedTask) -> String {
    let mut output = format!("{}\n", "Parsed task".bold());
    output.push_str(&format!("  {}: {}\n", "Title".dimmed(), captured.title));

    if let Some(description) = &captured.description {
        output.push_str(&format!("  {}: {}\n", "Notes".dimmed(), description));
    }

    let priority = captured.priority.unwrap_or_default();
    output.push_str(&format!("  {}: {}\n", "Priority".dimmed(), priority_label(priority)));

    let deadline = captured
        .deadline
        .as_ref()
        .map_or_else(|| "end of today".to_string(), |d| format_local(d.to_deadline()));
    output.push_str(&format!("  {}: {}\n", "Deadline".dimmed(), deadline));

    if !captured.tags.is_empty() {
        output.push_str(&format!("  {}: {}\n", "Tags".dimmed(), captured.tags.join(", ")));
    }

    output
}
