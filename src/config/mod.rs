//! Configuration management for focuscore.
//!
//! This module handles loading and saving configuration from `~/.focuscore/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, FocusConfig, GeneralConfig, StorageConfig};
