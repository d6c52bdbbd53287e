//! Focus session controller.
//!
//! Ties the selection order to the countdown timer: whenever the active task
//! changes the timer starts over, and completing the active task goes
//! through the store so every other view sees it.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::is_today_at;
use crate::tasks::{Task, TaskStore};

use super::cue::{ring, CompletionCue};
use super::selection::{select_at, FocusSelection};
use super::timer::{SessionTimer, TickOutcome, TimerState, SESSION_LENGTH_SECS};

/// Default number of queued tasks shown after the active one.
pub const QUEUE_SIZE: usize = 3;

/// Everything a focus screen needs to render.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSnapshot<'a> {
    pub active: Option<&'a Task>,
    pub queued: Vec<&'a Task>,
    pub state: TimerState,
    pub remaining_secs: u32,
    /// Remaining time as MM:SS
    pub remaining: String,
    pub session_secs: u32,
    pub progress: f64,
    pub completed_today: usize,
}

/// Single-task focus session state machine.
pub struct FocusController {
    timer: SessionTimer,
    active_id: Option<String>,
    queue_size: usize,
    cue: Box<dyn CompletionCue>,
}

impl std::fmt::Debug for FocusController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FocusController")
            .field("timer", &self.timer)
            .field("active_id", &self.active_id)
            .field("queue_size", &self.queue_size)
            .finish_non_exhaustive()
    }
}

impl FocusController {
    #[must_use]
    pub fn new(cue: Box<dyn CompletionCue>) -> Self {
        Self {
            timer: SessionTimer::new(SESSION_LENGTH_SECS),
            active_id: None,
            queue_size: QUEUE_SIZE,
            cue,
        }
    }

    #[must_use]
    pub fn with_session_length(mut self, secs: u32) -> Self {
        self.timer = SessionTimer::new(secs);
        self
    }

    #[must_use]
    pub const fn with_queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size;
        self
    }

    /// Id of the current active task, as of the last sync.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[must_use]
    pub const fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    /// Re-derive the active task from `tasks`.
    pub fn sync(&mut self, tasks: &[Task]) {
        self.sync_at(tasks, Utc::now());
    }

    /// Re-derive the active task as of `now`.
    ///
    /// A different active task, including none, resets the timer.
    pub fn sync_at(&mut self, tasks: &[Task], now: DateTime<Utc>) {
        let next = select_at(tasks, now, 0).active.map(|t| t.id.clone());
        if next != self.active_id {
            log::debug!("active task changed: {:?} -> {next:?}", self.active_id);
            self.active_id = next;
            self.timer.reset();
        }
    }

    /// The current selection, bounded by the configured queue size.
    #[must_use]
    pub fn selection<'a>(&self, tasks: &'a [Task]) -> FocusSelection<'a> {
        select_at(tasks, Utc::now(), self.queue_size)
    }

    /// Start counting down. No-op without an active task.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.active_id.is_none() {
            return false;
        }
        self.timer.start(now)
    }

    /// Pause, keeping the remaining time.
    pub fn pause(&mut self) -> bool {
        self.timer.pause()
    }

    /// Start when idle, pause when running.
    pub fn toggle(&mut self) -> bool {
        if self.timer.is_running() {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Advance one second. Expiry plays the cue.
    pub fn tick(&mut self) -> TickOutcome {
        let outcome = self.timer.tick();
        if outcome == TickOutcome::Expired {
            log::info!("focus session expired");
            ring(self.cue.as_mut());
        }
        outcome
    }

    /// Apply every tick that has come due by `now`.
    ///
    /// Stops at expiry. Returns the last outcome, or `Ignored` if nothing
    /// was due.
    pub fn poll(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::Ignored;
        for _ in 0..self.timer.due_ticks(now) {
            outcome = self.tick();
            if outcome == TickOutcome::Expired {
                break;
            }
        }
        outcome
    }

    /// Mark the active task completed and move on to the next one.
    ///
    /// Returns the completed task, or `None` if nothing was active.
    pub fn complete(&mut self, store: &mut TaskStore) -> Option<Task> {
        self.sync(store.tasks());
        let id = self.active_id.take()?;

        ring(self.cue.as_mut());
        let completed = store.toggle_status(&id).cloned();
        self.timer.reset();
        self.sync(store.tasks());

        if let Some(task) = &completed {
            log::info!("completed '{}'", task.title);
        }
        completed
    }

    /// Render state for `tasks`.
    #[must_use]
    pub fn snapshot<'a>(&self, tasks: &'a [Task]) -> FocusSnapshot<'a> {
        let now = Utc::now();
        let selection = select_at(tasks, now, self.queue_size);

        FocusSnapshot {
            active: selection.active,
            queued: selection.queued,
            state: self.timer.state(),
            remaining_secs: self.timer.remaining_secs(),
            remaining: self.timer.format_remaining(),
            session_secs: self.timer.length_secs(),
            progress: self.timer.progress(),
            completed_today: tasks
                .iter()
                .filter(|t| t.is_completed() && is_today_at(t.updated_at, now))
                .count(),
        }
    }

    /// Release the ticker. The controller stays usable.
    pub fn teardown(&mut self) {
        self.timer.pause();
    }
}
