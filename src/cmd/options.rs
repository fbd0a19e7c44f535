//! Options command implementation
//!
//! Handles `oobee options show | set | reset`, the command-line face of the
//! persisted advanced scan options.

use super::Project;
use crate::fmt::{self, CHECKMARK, WARNING};
use crate::infra::KeyValueStore;
use crate::options::{SaveOutcome, ScanConfigStore, ScanOptions, ScanOptionsPatch};
use crate::report::ComparisonReporter;
use anyhow::Result;
use console::style;

/// Print the current scan options
pub fn cmd_options_show(project: &Project, json: bool) -> Result<()> {
    let store = project.options();
    let options = store.current();

    if json {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        print!("{}", ComparisonReporter::new().render_options(&options));
    }
    warn_if_degraded(&store);
    Ok(())
}

/// Apply `patch` to the stored options and persist the result
pub fn cmd_options_set(project: &Project, patch: &ScanOptionsPatch) -> Result<()> {
    let store = project.options();

    if patch.is_empty() {
        println!(
            "{} Nothing to change. Pass at least one option, e.g. --viewport mobile",
            fmt::icon(WARNING)
        );
        return Ok(());
    }

    let merged = store.merge(&store.current(), patch);
    let outcome = store.save(merged);
    report_saved(&merged, outcome);
    Ok(())
}

/// Restore and persist the default options
pub fn cmd_options_reset(project: &Project) -> Result<()> {
    let store = project.options();
    let defaults = ScanOptions::default();
    let outcome = store.save(defaults);
    report_saved(&defaults, outcome);
    Ok(())
}

fn report_saved(options: &ScanOptions, outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Persisted => {
            println!("{} {}", fmt::icon(CHECKMARK), style("Scan options saved").green());
        }
        SaveOutcome::SessionOnly => {
            println!(
                "{} {}",
                fmt::icon(WARNING),
                style("Storage unavailable; options apply to this run only").yellow()
            );
        }
    }
    print!("{}", ComparisonReporter::new().render_options(options));
}

fn warn_if_degraded<S: KeyValueStore>(store: &ScanConfigStore<S>) {
    if store.is_degraded() {
        eprintln!(
            "{} {}",
            fmt::icon(WARNING),
            style("Storage unavailable; showing defaults").yellow()
        );
    }
}
