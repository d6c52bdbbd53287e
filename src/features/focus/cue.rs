//! Completion cues played when a session expires or a task is completed.

use std::io::Write;

use crate::error::FocuscoreError;

/// Something audible or visible that marks the end of a session.
#[cfg_attr(test, mockall::automock)]
pub trait CompletionCue {
    /// Play the cue once.
    ///
    /// # Errors
    ///
    /// Returns an error if the output device is unavailable.
    fn play(&mut self) -> Result<(), FocuscoreError>;
}

/// Rings the terminal bell on stderr, leaving stdout clean for output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl CompletionCue for TerminalBell {
    fn play(&mut self) -> Result<(), FocuscoreError> {
        let mut stderr = std::io::stderr().lock();
        stderr
            .write_all(b"\x07")
            .and_then(|()| stderr.flush())
            .map_err(|e| FocuscoreError::Cue(format!("terminal bell unavailable: {e}")))
    }
}

/// Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentCue;

impl CompletionCue for SilentCue {
    fn play(&mut self) -> Result<(), FocuscoreError> {
        Ok(())
    }
}

/// Play `cue`, logging and discarding any failure.
pub fn ring(cue: &mut dyn CompletionCue) {
    if let Err(e) = cue.play() {
        log::warn!("completion cue failed: {e}");
    }
}
