//! Countdown timer for focus sessions.
//!
//! The timer only counts when told to: each [`SessionTimer::tick`] is one
//! second. While running it holds a [`Ticker`], which an event loop polls to
//! learn how many ticks are due. Leaving the running state drops the ticker,
//! so no further ticks can be produced for a paused or expired session.

use std::time::{Duration as StdDuration, Instant};

use chrono::Duration;
use serde::Serialize;

/// Default session length: 25 minutes.
pub const SESSION_LENGTH_SECS: u32 = 25 * 60;

/// Interval between ticks.
pub const TICK_INTERVAL: StdDuration = StdDuration::from_secs(1);

/// Timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    /// Not counting down
    Idle,
    /// Counting down once per second
    Running,
}

impl std::fmt::Display for TimerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Running => write!(f, "Running"),
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running.
    Ignored,
    /// Counted down; seconds remaining.
    Counting(u32),
    /// Reached zero. The timer is idle again at full length.
    Expired,
}

/// Schedule of one-second ticks, alive only while a timer runs.
#[derive(Debug)]
pub struct Ticker {
    next_due: Instant,
}

impl Ticker {
    fn arm(now: Instant) -> Self {
        Self {
            next_due: now + TICK_INTERVAL,
        }
    }

    /// Number of whole ticks elapsed by `now`. Advances the schedule.
    #[allow(clippy::cast_possible_truncation)]
    pub fn due(&mut self, now: Instant) -> u32 {
        if now < self.next_due {
            return 0;
        }
        let behind = now.duration_since(self.next_due).as_secs() as u32;
        let ticks = behind.saturating_add(1);
        self.next_due += TICK_INTERVAL * ticks;
        ticks
    }
}

/// A resettable countdown timer.
#[derive(Debug)]
pub struct SessionTimer {
    /// Full session length in seconds
    length_secs: u32,
    /// Remaining seconds
    remaining_secs: u32,
    /// Current state
    state: TimerState,
    /// Armed only while running
    ticker: Option<Ticker>,
}

impl Default for SessionTimer {
    fn default() -> Self {
        Self::new(SESSION_LENGTH_SECS)
    }
}

impl SessionTimer {
    /// Create an idle timer with the given length.
    #[must_use]
    pub const fn new(length_secs: u32) -> Self {
        Self {
            length_secs,
            remaining_secs: length_secs,
            state: TimerState::Idle,
            ticker: None,
        }
    }

    /// Start or resume counting. Returns false if nothing changed.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.state == TimerState::Running || self.remaining_secs == 0 {
            return false;
        }
        self.state = TimerState::Running;
        self.ticker = Some(Ticker::arm(now));
        true
    }

    /// Stop counting, keeping the remaining time. Returns false if idle.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.state = TimerState::Idle;
        self.ticker = None;
        true
    }

    /// Count down one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != TimerState::Running {
            return TickOutcome::Ignored;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.reset();
            TickOutcome::Expired
        } else {
            TickOutcome::Counting(self.remaining_secs)
        }
    }

    /// Ticks due by `now`, or zero when not running.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        self.ticker.as_mut().map_or(0, |ticker| ticker.due(now))
    }

    /// Back to idle at full length.
    pub fn reset(&mut self) {
        self.remaining_secs = self.length_secs;
        self.state = TimerState::Idle;
        self.ticker = None;
    }

    #[must_use]
    pub const fn length_secs(&self) -> u32 {
        self.length_secs
    }

    #[must_use]
    pub const fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Get remaining time as Duration.
    #[must_use]
    fn remaining(&self) -> Duration {
        Duration::seconds(i64::from(self.remaining_secs))
    }

    #[must_use]
    pub const fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Whether a ticker is currently armed.
    #[must_use]
    pub const fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Get progress as a fraction (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.length_secs == 0 {
            return 1.0;
        }
        1.0 - f64::from(self.remaining_secs) / f64::from(self.length_secs)
    }

    /// Format remaining time as MM:SS.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_duration_mmss(self.remaining())
    }
}

/// Format a duration as MM:SS.
#[must_use]
pub fn format_duration_mmss(d: Duration) -> String {
    let total_seconds = d.num_seconds().abs();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64) as usize).min(width);
    let empty = width - filled;

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
