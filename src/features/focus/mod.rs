//! Focus mode.
//!
//! Picks the one pending task to work on and runs a single-task countdown:
//! - Selection: overdue first, then due today, then priority
//! - Pomodoro-style timer with start, pause and expiry
//! - Completion cue on expiry and on completing the active task

mod controller;
mod cue;
mod selection;
mod timer;

pub use controller::{FocusController, FocusSnapshot, QUEUE_SIZE};
pub use cue::{ring, CompletionCue, SilentCue, TerminalBell};
pub use selection::{rank_pending_at, select_at, FocusSelection};
pub use timer::{
    format_duration_mmss, render_progress_bar, SessionTimer, TickOutcome, Ticker, TimerState,
    SESSION_LENGTH_SECS, TICK_INTERVAL,
};
