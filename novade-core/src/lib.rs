//! # NovaDE Core (`novade-core`)
//!
//! Infrastructure shared by the NovaDE notification listener:
//!
//! - **Error handling**: [`CoreError`] with the more specific [`ConfigError`] and
//!   [`LoggingError`].
//! - **Configuration**: [`NotificationsConfig`] loaded from TOML by [`ConfigLoader`],
//!   with defaults for every key and validation of out-of-range values.
//! - **Logging**: `tracing` subscriber setup with console and rolling file output.
//!
//! ```rust,ignore
//! use novade_core::{init_logging, ConfigLoader, CoreError};
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging, false)?;
//!     tracing::info!("notification listener starting");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

pub use config::{ConfigLoader, DispatchConfig, HeadsUpConfig, LoggingConfig, NotificationsConfig};
pub use error::{ConfigError, CoreError, LoggingError};
pub use logging::{init_logging, init_minimal_logging};
