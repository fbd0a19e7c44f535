//! Init command implementation
//!
//! Handles the `oobee init` command which writes a `.oobee.toml` with the
//! default settings so they can be edited.

use crate::config::{self, ConfigFile, ConfigLoader};
use crate::fmt::{self, CHECKMARK, INFO, WARNING};
use anyhow::Result;
use console::style;
use std::path::Path;

/// Create `.oobee.toml` in `project_root` unless one already exists
///
/// Returns whether a file was written.
pub fn cmd_init(project_root: &Path) -> Result<bool> {
    if ConfigLoader::exists(project_root) {
        println!(
            "{} Config file already exists: {}",
            fmt::icon(WARNING),
            style(config::CONFIG_FILE_NAME).cyan()
        );
        println!("   Delete it first or edit manually to update.");
        return Ok(false);
    }

    let defaults = ConfigFile::default();
    ConfigLoader::save(&defaults, project_root)?;

    println!(
        "{} Created {}",
        fmt::icon(CHECKMARK),
        style(config::CONFIG_FILE_NAME).cyan()
    );
    println!("{}  Settings:", fmt::icon(INFO));
    println!("   store-dir     = {}", style(&defaults.store_dir).green());
    println!("   history-limit = {}", style(defaults.history_limit).green());
    println!("   rank-by       = {}", style(defaults.rank_by).green());

    Ok(true)
}
