//! Path resolution for focuscore configuration and data files.
//!
//! All focuscore data is stored in `~/.focuscore/`:
//! - `config.yaml` - Main configuration file
//! - `focuscore.db` - SQLite database holding the task collection

use std::path::PathBuf;

use crate::error::FocuscoreError;

/// Paths to focuscore configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.focuscore/`
    pub root: PathBuf,
    /// Config file: `~/.focuscore/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.focuscore/focuscore.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, FocuscoreError> {
        let home = std::env::var("HOME").map_err(|_| {
            FocuscoreError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".focuscore")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("focuscore.db"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), FocuscoreError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                FocuscoreError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".focuscore"))
        })
    }
}
