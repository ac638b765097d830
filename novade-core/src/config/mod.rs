//! Configuration management for the notification listener.
//!
//! - [`types`]: the schema ([`NotificationsConfig`] and its sections).
//! - [`defaults`]: default values applied by `serde` for missing keys.
//! - [`loader`]: [`ConfigLoader`], which locates, parses and validates `config.toml`.
//!
//! ```rust,ignore
//! use novade_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("heads-up timeout: {:?}", config.heads_up.dismiss_timeout()),
//!     Err(e) => {
//!         novade_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration error: {}", e);
//!     }
//! }
//! ```

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{DispatchConfig, HeadsUpConfig, LoggingConfig, NotificationsConfig};
