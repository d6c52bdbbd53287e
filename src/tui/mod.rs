//! Terminal focus screen for focuscore.
//!
//! Shows the active task with its countdown and the tasks queued behind it.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::FocusApp;

use std::io;
use std::time::Instant;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::FocuscoreError;
use crate::features::focus::FocusController;
use crate::tasks::TaskHandle;

/// Run the focus screen until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal fails to initialize or the store is
/// unreachable.
pub fn run(handle: &TaskHandle, controller: &mut FocusController) -> Result<(), FocuscoreError> {
    enable_raw_mode()
        .map_err(|e| FocuscoreError::Config(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| FocuscoreError::Config(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| FocuscoreError::Config(format!("Failed to create terminal: {e}")))?;

    let result = FocusApp::new(handle, controller).and_then(|mut app| run_app(&mut terminal, &mut app));

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    // Leaving the screen stops the countdown
    controller.teardown();
    result
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut FocusApp<'_>) -> Result<(), FocuscoreError> {
    loop {
        app.tick(Instant::now())?;
        draw(terminal, app)?;

        if let Some(action) = event::handle_events()? {
            match action {
                event::Action::Quit => break,
                event::Action::ToggleTimer => app.toggle_timer(),
                event::Action::Complete => app.complete_active()?,
                event::Action::Help => app.status = Some(ui::HELP.to_string()),
            }
        }
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &FocusApp<'_>) -> Result<(), FocuscoreError> {
    let status = app.status.as_deref();
    app.handle().with(|store| {
        let snapshot = app.controller().snapshot(store.tasks());
        terminal
            .draw(|frame| ui::render(frame, &snapshot, status))
            .map(|_| ())
            .map_err(|e| FocuscoreError::Config(format!("Failed to draw: {e}")))
    })?
}
