//! Application state for the focus screen.

use std::time::Instant;

use crate::error::FocuscoreError;
use crate::features::focus::{FocusController, TickOutcome};
use crate::tasks::TaskHandle;

/// Focus screen state.
pub struct FocusApp<'a> {
    /// Handle to the shared task store.
    handle: &'a TaskHandle,
    /// Session state machine driving the countdown.
    controller: &'a mut FocusController,
    /// Status message to display.
    pub status: Option<String>,
}

impl<'a> FocusApp<'a> {
    /// Create the screen state and pick the active task.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub fn new(
        handle: &'a TaskHandle,
        controller: &'a mut FocusController,
    ) -> Result<Self, FocuscoreError> {
        let mut app = Self {
            handle,
            controller,
            status: Some("Press ? for help".to_string()),
        };
        app.sync()?;
        Ok(app)
    }

    pub const fn handle(&self) -> &TaskHandle {
        self.handle
    }

    pub fn controller(&self) -> &FocusController {
        &*self.controller
    }

    /// Re-derive the active task from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub fn sync(&mut self) -> Result<(), FocuscoreError> {
        let controller = &mut *self.controller;
        self.handle.with(|store| controller.sync(store.tasks()))
    }

    /// Apply due ticks and pick up changes made elsewhere.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub fn tick(&mut self, now: Instant) -> Result<(), FocuscoreError> {
        if self.controller.poll(now) == TickOutcome::Expired {
            self.status = Some("Session complete. Take a break.".to_string());
        }
        self.sync()
    }

    /// Start or pause the countdown.
    pub fn toggle_timer(&mut self) {
        if self.controller.active_id().is_none() {
            self.status = Some("Nothing to focus on".to_string());
            return;
        }
        self.controller.toggle();
        self.status = Some(if self.controller.timer().is_running() {
            "Running".to_string()
        } else {
            "Paused".to_string()
        });
    }

    /// Complete the active task and move to the next one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub fn complete_active(&mut self) -> Result<(), FocuscoreError> {
        let controller = &mut *self.controller;
        let completed = self.handle.with_mut(|store| controller.complete(store))?;

        self.status = Some(match completed {
            Some(task) => format!("Completed: {}", task.title),
            None => "No active task".to_string(),
        });
        Ok(())
    }
}
