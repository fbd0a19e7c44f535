//! Rank command implementation
//!
//! Handles `oobee rank`, which orders recorded scans by how much they
//! improved on the oldest recorded scan. `--least` flips the order.

use super::Project;
use crate::comparison::{ComparisonEngine, RankMetric};
use crate::fmt::{self, INFO};
use crate::report::{rank_entries, ComparisonReporter, JsonOutput, RankOrder};
use anyhow::Result;

/// Rank recorded scans against the oldest one
///
/// `by` falls back to the `rank-by` config value. Scans tied on the metric
/// keep their recording order.
pub fn cmd_rank(
    project: &Project,
    by: Option<RankMetric>,
    order: RankOrder,
    json: bool,
) -> Result<()> {
    let by = by.unwrap_or(project.config().rank_by);
    let history = project.history()?;

    let Some(baseline) = history.oldest() else {
        anyhow::bail!("No scans recorded yet. Add one with 'oobee snapshot add'.");
    };

    // Oldest first. The baseline is the reference point, not a candidate,
    // so it never shows up in the ranking.
    let candidates: Vec<_> = history.records.iter().rev().skip(1).cloned().collect();
    let entries = rank_entries(&ComparisonEngine::new(), baseline, &candidates, by, order);

    if json {
        JsonOutput::from_ranking(baseline, by, order, &entries).print();
        return Ok(());
    }

    ComparisonReporter::new().print_ranking(baseline, by, order, &entries);
    if entries.is_empty() {
        println!(
            "{} Record more scans to see which improved most",
            fmt::icon(INFO)
        );
    }
    Ok(())
}
