//! Project configuration for oobee
//!
//! This module provides:
//! - .oobee.toml config file support
//! - Loading with defaults for a missing file and validation of ranges

pub mod file;
pub mod loader;

pub use file::{ConfigFile, CONFIG_FILE_NAME, HISTORY_LIMIT_RANGE};
pub use loader::ConfigLoader;
