//! Default configuration values for the notification listener.
//!
//! These functions are used by `serde`'s `default` attribute in the configuration
//! structures when a key is not present in `config.toml`.

use crate::config::{DispatchConfig, HeadsUpConfig, LoggingConfig};
use std::path::PathBuf;

/// How long a heads-up alert stays on screen before it is dismissed.
pub const DEFAULT_HEADS_UP_DISMISS_TIMEOUT_MS: u64 = 8_000;

/// Buffer size of the listener event broadcast channel.
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 64;

pub(super) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// No log file by default.
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

pub(super) fn default_log_format() -> String {
    "text".to_string()
}

pub(super) fn default_heads_up_config() -> HeadsUpConfig {
    HeadsUpConfig {
        dismiss_timeout_ms: default_dismiss_timeout_ms(),
    }
}

pub(super) fn default_dismiss_timeout_ms() -> u64 {
    DEFAULT_HEADS_UP_DISMISS_TIMEOUT_MS
}

pub(super) fn default_dispatch_config() -> DispatchConfig {
    DispatchConfig {
        canned_reply_message: default_canned_reply_message(),
    }
}

/// Reply text sent when the user taps "reply" on a messaging notification.
pub(super) fn default_canned_reply_message() -> String {
    "I'm driving right now.".to_string()
}

pub(super) fn default_event_channel_capacity() -> usize {
    DEFAULT_EVENT_CHANNEL_CAPACITY
}
