//! Application directory resolution based on `directories-next`.
//!
//! - [`get_app_config_dir`]: e.g. `~/.config/novade-notifications` on Linux.
//! - [`get_app_state_dir`]: e.g. `~/.local/state/NovaDE/novade-notifications`,
//!   used to resolve relative log file paths.

use crate::error::{ConfigError, CoreError};
use directories_next::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "NovaDE";
const APPLICATION: &str = "novade-notifications";

/// Returns the application-specific configuration directory.
///
/// # Errors
/// [`ConfigError::DirectoryUnavailable`] if no home directory can be determined.
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "App Config".to_string(),
            })
        })
}

/// Returns the application-specific state directory.
///
/// On Linux this honours `$XDG_STATE_HOME` (falling back to `~/.local/state`);
/// other platforms use the local data directory as the base.
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    BaseDirs::new()
        .map(|dirs| {
            #[cfg(target_os = "linux")]
            {
                match std::env::var("XDG_STATE_HOME") {
                    Ok(state_home) if !state_home.is_empty() => PathBuf::from(state_home),
                    _ => dirs.home_dir().join(".local/state"),
                }
            }
            #[cfg(not(target_os = "linux"))]
            {
                dirs.data_local_dir().to_path_buf()
            }
        })
        .map(|base| base.join(ORGANIZATION).join(APPLICATION))
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "State Base".to_string(),
            })
        })
}
