//! UI rendering for the focus screen.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::core::is_overdue;
use crate::features::focus::{FocusSnapshot, TimerState};
use crate::tasks::{Priority, Task};

/// Key help for the status bar.
pub const HELP: &str = "space:start/pause | c:complete | ?:help | q:quit";

/// Render the focus screen.
pub fn render(frame: &mut Frame<'_>, snapshot: &FocusSnapshot<'_>, status: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(8), // Active task
            Constraint::Min(0),    // Up next
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, snapshot, chunks[0]);
    render_active(frame, snapshot, chunks[1]);
    render_queue(frame, snapshot, chunks[2]);
    render_status_bar(frame, status, chunks[3]);
}

fn render_header(frame: &mut Frame<'_>, snapshot: &FocusSnapshot<'_>, area: Rect) {
    let title = format!(" Focus ({} done today) ", snapshot.completed_today);

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn render_active(frame: &mut Frame<'_>, snapshot: &FocusSnapshot<'_>, area: Rect) {
    let block = Block::default()
        .title(" Now ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let Some(task) = snapshot.active else {
        let empty = Paragraph::new("All clear. Nothing pending.")
            .style(Style::default().fg(Color::Green))
            .block(block);
        frame.render_widget(empty, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Min(1),    // Description
            Constraint::Length(1), // Timer
            Constraint::Length(1), // Gauge
        ])
        .split(inner);

    let mut title = vec![Span::styled(
        task.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    title.extend(task_badges(task));
    frame.render_widget(Paragraph::new(Line::from(title)), rows[0]);

    if let Some(description) = &task.description {
        let description = Paragraph::new(description.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true });
        frame.render_widget(description, rows[1]);
    }

    let (state_label, state_color) = match snapshot.state {
        TimerState::Running => ("running", Color::Green),
        TimerState::Idle => ("paused", Color::Yellow),
    };
    let timer = Line::from(vec![
        Span::styled(
            snapshot.remaining.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {state_label}"), Style::default().fg(state_color)),
    ]);
    frame.render_widget(Paragraph::new(timer), rows[2]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(snapshot.progress.clamp(0.0, 1.0))
        .label("");
    frame.render_widget(gauge, rows[3]);
}

fn render_queue(frame: &mut Frame<'_>, snapshot: &FocusSnapshot<'_>, area: Rect) {
    let items: Vec<ListItem<'_>> = snapshot
        .queued
        .iter()
        .map(|task| {
            let mut spans = vec![Span::raw(format!("[ ] {}", task.title))];
            spans.extend(task_badges(task));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Up next ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    frame.render_widget(list, area);
}

fn render_status_bar(frame: &mut Frame<'_>, status: Option<&str>, area: Rect) {
    let status = Paragraph::new(status.unwrap_or(HELP)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}

fn task_badges(task: &Task) -> Vec<Span<'_>> {
    let priority_color = match task.priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Blue,
    };

    let mut spans = vec![Span::styled(
        format!("  {}", task.priority),
        Style::default().fg(priority_color),
    )];

    if is_overdue(task.deadline) {
        spans.push(Span::styled("  overdue", Style::default().fg(Color::Red)));
    }

    if !task.tags.is_empty() {
        let tags = task
            .tags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ");
        spans.push(Span::styled(format!("  {tags}"), Style::default().fg(Color::Blue)));
    }

    spans
}
