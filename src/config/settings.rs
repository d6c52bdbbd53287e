//! Configuration settings for focuscore.
//!
//! Settings are loaded from `~/.focuscore/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::FocuscoreError;
use crate::features::focus::{QUEUE_SIZE, SESSION_LENGTH_SECS};
use crate::tasks::STORAGE_KEY;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Focus mode settings.
    pub focus: FocusConfig,
    /// Task storage settings.
    pub storage: StorageConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Focus mode settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FocusConfig {
    /// Session length in minutes.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
    /// Number of queued tasks shown after the active one.
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
    /// Ring the terminal bell when a session ends.
    #[serde(default = "default_true")]
    pub completion_sound: bool,
}

impl FocusConfig {
    /// Session length in seconds.
    #[must_use]
    pub const fn session_secs(&self) -> u32 {
        self.session_minutes.saturating_mul(60)
    }
}

/// Task storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key the task collection is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_session_minutes() -> u32 {
    SESSION_LENGTH_SECS / 60
}

const fn default_queue_size() -> usize {
    QUEUE_SIZE
}

const fn default_true() -> bool {
    true
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            session_minutes: default_session_minutes(),
            queue_size: default_queue_size(),
            completion_sound: default_true(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// if it sets a zero-length focus session.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, FocuscoreError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            FocuscoreError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            FocuscoreError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        if config.focus.session_minutes == 0 {
            return Err(FocuscoreError::Config(format!(
                "focus.session_minutes must be at least 1 in {}",
                path.display()
            )));
        }

        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), FocuscoreError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| FocuscoreError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            FocuscoreError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.focus.session_minutes, 25);
        assert_eq!(config.focus.session_secs(), 1500);
        assert_eq!(config.focus.queue_size, 3);
        assert!(config.focus.completion_sound);
        assert_eq!(config.storage.key, "focuscore_tasks_v1");
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();

        // Should return defaults when file doesn't exist
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.focus.session_minutes = 50;
        config.storage.key = "scratch".to_string();

        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.focus.session_minutes, 50);
        assert_eq!(loaded.storage.key, "scratch");
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
focus:
  session_minutes: 45
general:
  default_output: json
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.focus.session_minutes, 45);
        assert_eq!(config.focus.queue_size, 3);
        assert_eq!(config.general.default_output, OutputFormat::Json);
        assert_eq!(config.storage.key, STORAGE_KEY);
    }

    #[test]
    fn test_zero_session_length_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "focus:\n  session_minutes: 0\n").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(FocuscoreError::Config(msg)) if msg.contains("session_minutes")
        ));
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "focus: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(FocuscoreError::Config(_))
        ));
    }
}
