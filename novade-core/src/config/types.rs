//! Configuration data structures for the notification listener.
//!
//! These structs are populated by deserializing `config.toml`. Missing keys take
//! their values from [`super::defaults`]; unknown keys are rejected through
//! `#[serde(deny_unknown_fields)]`.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use novade_core::config::LoggingConfig;
///
/// let config: LoggingConfig = toml::from_str(r#"level = "debug""#).unwrap();
/// assert_eq!(config.level, "debug");
/// assert_eq!(config.format, "text");
/// assert_eq!(config.file_path, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the application state directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Settings for transient heads-up alerts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeadsUpConfig {
    /// Time an alert stays visible before its dismissal timer fires. Must be non-zero.
    #[serde(default = "defaults::default_dismiss_timeout_ms")]
    pub dismiss_timeout_ms: u64,
}

impl HeadsUpConfig {
    pub fn dismiss_timeout(&self) -> Duration {
        Duration::from_millis(self.dismiss_timeout_ms)
    }
}

impl Default for HeadsUpConfig {
    fn default() -> Self {
        defaults::default_heads_up_config()
    }
}

/// Settings for the interaction dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatchConfig {
    /// Text attached to a messaging reply action. Must not be blank.
    #[serde(default = "defaults::default_canned_reply_message")]
    pub canned_reply_message: String,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        defaults::default_dispatch_config()
    }
}

/// Root configuration of the notification listener.
///
/// ```
/// use novade_core::config::NotificationsConfig;
///
/// let toml_str = r#"
/// event_channel_capacity = 16
///
/// [heads_up]
/// dismiss_timeout_ms = 5000
/// "#;
/// let config: NotificationsConfig = toml::from_str(toml_str).unwrap();
/// assert_eq!(config.heads_up.dismiss_timeout_ms, 5000);
/// assert_eq!(config.event_channel_capacity, 16);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationsConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_heads_up_config")]
    pub heads_up: HeadsUpConfig,
    #[serde(default = "defaults::default_dispatch_config")]
    pub dispatch: DispatchConfig,
    /// Capacity of the broadcast channel carrying listener events. Must be non-zero.
    #[serde(default = "defaults::default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            logging: defaults::default_logging_config(),
            heads_up: defaults::default_heads_up_config(),
            dispatch: defaults::default_dispatch_config(),
            event_channel_capacity: defaults::default_event_channel_capacity(),
        }
    }
}
