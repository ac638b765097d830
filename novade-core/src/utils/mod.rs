//! Filesystem and path helpers used by configuration and logging.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
