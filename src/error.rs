//! Error types for focuscore.

use thiserror::Error;

/// Errors produced by the focuscore library.
#[derive(Debug, Error)]
pub enum FocuscoreError {
    /// Configuration could not be loaded, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The key-value backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A looked-up item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The completion cue could not be played.
    #[error("Cue error: {0}")]
    Cue(String),

    /// A task handle was used after its provider was torn down.
    #[error("Task store accessed outside of its provider")]
    OutsideProvider,

    /// The task store was borrowed re-entrantly.
    #[error("Task store is already in use")]
    StoreBusy,
}
