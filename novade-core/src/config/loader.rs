//! Configuration loading for the notification listener.
//!
//! [`ConfigLoader::load`] reads `config.toml` from the application config
//! directory (see [`crate::utils::paths::get_app_config_dir`]). A missing file
//! yields the default configuration. The result is always validated:
//!
//! - log level and format are normalized to lowercase and checked,
//! - relative log file paths are resolved against the application state directory,
//! - the heads-up dismissal timeout and the event channel capacity must be non-zero,
//! - the canned reply message must not be blank.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::NotificationsConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as nova_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Namespace for configuration loading.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration from the application config directory.
    ///
    /// # Errors
    ///
    /// Fails with [`ConfigError::DirectoryUnavailable`] when no home directory can be
    /// determined, [`ConfigError::ReadError`] / [`ConfigError::ParseError`] for unreadable
    /// or malformed files, and [`ConfigError::ValidationError`] for out-of-range values.
    pub fn load() -> Result<NotificationsConfig, CoreError> {
        let path = get_app_config_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from_path(&path)
    }

    /// Loads and validates the configuration from an explicit file.
    ///
    /// A file that does not exist or is empty yields the defaults.
    pub fn load_from_path(path: &Path) -> Result<NotificationsConfig, CoreError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No configuration at {}, using defaults", path.display());
                String::new()
            }
            Err(e) => {
                return Err(CoreError::Config(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }));
            }
        };
        Self::from_toml_str(&content)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<NotificationsConfig, CoreError> {
        let mut config: NotificationsConfig = if content.trim().is_empty() {
            NotificationsConfig::default()
        } else {
            toml::from_str(content).map_err(ConfigError::ParseError)?
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    fn validate_config(config: &mut NotificationsConfig) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => config.logging.level = level_lower,
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                ))
                .into());
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => config.logging.format = format_lower,
            _ => {
                return Err(ConfigError::ValidationError(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                ))
                .into());
            }
        }

        if let Some(file_path) = &config.logging.file_path {
            let absolute_path = if file_path.is_absolute() {
                file_path.clone()
            } else {
                get_app_state_dir()?.join(file_path)
            };
            if let Some(parent_dir) = absolute_path.parent() {
                if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                    nova_fs::ensure_dir_exists(parent_dir)?;
                }
            }
            config.logging.file_path = Some(absolute_path);
        }

        if config.heads_up.dismiss_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "heads_up.dismiss_timeout_ms must be greater than zero.".to_string(),
            )
            .into());
        }

        if config.dispatch.canned_reply_message.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "dispatch.canned_reply_message must not be blank.".to_string(),
            )
            .into());
        }

        if config.event_channel_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "event_channel_capacity must be greater than zero.".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
