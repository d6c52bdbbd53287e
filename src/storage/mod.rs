//! Storage layer for focuscore.
//!
//! The task collection is persisted as one serialized value under a fixed
//! key. Backends implement [`KeyValueStore`]:
//! - [`Database`]: `SQLite` file in `~/.focuscore/`
//! - [`MemoryStore`]: in-process map for tests and ephemeral runs

mod database;
mod memory;
mod migrations;

pub use database::Database;
pub use memory::MemoryStore;

use crate::error::FocuscoreError;

/// Durable string key-value storage.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, FocuscoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), FocuscoreError>;
}
