//! Completions command implementation
//!
//! Handles the `oobee completions` command which generates
//! shell completion scripts for bash, zsh, fish, etc.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completion scripts
///
/// Writes the completion script for `command` to `out`. The binary passes
/// its own `Cli::command()` so completions track the real argument set.
///
/// # Examples
///
/// ```bash
/// # Bash
/// oobee completions bash > /etc/bash_completion.d/oobee
///
/// # Zsh
/// oobee completions zsh > ~/.zfunc/_oobee
///
/// # Fish
/// oobee completions fish > ~/.config/fish/completions/oobee.fish
/// ```
pub fn cmd_completions(shell: Shell, command: &mut Command, out: &mut dyn Write) {
    let bin_name = command.get_name().to_string();
    generate(shell, command, bin_name, out);
}
