//! Snapshot command implementation
//!
//! Handles `oobee snapshot add` and `oobee snapshot list`, which record scan
//! results into history and show what has been recorded.

use super::Project;
use crate::comparison::{IssueCounts, IssueSnapshot};
use crate::events::OobeeEvent;
use crate::fmt::{self, CHECKMARK, INFO};
use crate::report::ComparisonReporter;
use anyhow::Result;
use console::style;
use log::debug;

/// Record a scan result in history
///
/// When `id` is `None` a fresh `scan-<uuid>` id is generated. Recording an
/// id that already exists replaces that snapshot.
pub fn cmd_snapshot_add(
    project: &Project,
    id: Option<&str>,
    counts: IssueCounts,
    compliance_score: u32,
) -> Result<IssueSnapshot> {
    let snapshot = match id {
        Some(id) => IssueSnapshot::record_as(id, counts, compliance_score)?,
        None => IssueSnapshot::record(counts, compliance_score)?,
    };

    let store = project.store();
    let mut history = project.history()?;
    let replaced = history.add_with_limit(snapshot.clone(), project.config().history_limit);
    history.save(&store)?;

    debug!(
        "Recorded snapshot '{}' ({} snapshots kept)",
        snapshot.id,
        history.len()
    );
    project.observer().notify(&OobeeEvent::SnapshotRecorded {
        id: snapshot.id.clone(),
    });

    let verb = if replaced { "Replaced" } else { "Recorded" };
    println!(
        "{} {} scan {} ({} must fix, {} should fix, {} nice to have, score {})",
        fmt::icon(CHECKMARK),
        verb,
        style(&snapshot.id).bold(),
        counts.must_fix,
        counts.should_fix,
        counts.nice_to_have,
        snapshot.compliance_score
    );

    Ok(snapshot)
}

/// List recorded scans, newest first
pub fn cmd_snapshot_list(project: &Project, json: bool) -> Result<()> {
    let history = project.history()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history.records)?);
        return Ok(());
    }

    print!("{}", ComparisonReporter::new().render_history(&history));
    if history.len() == 1 {
        println!(
            "\n{} Record one more scan to compare results",
            fmt::icon(INFO)
        );
    }
    Ok(())
}
