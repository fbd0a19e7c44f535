//! Compare command implementation
//!
//! Handles the `oobee compare` command which compares two recorded scans
//! to show which issues were resolved between them

use super::Project;
use crate::events::OobeeEvent;
use crate::history::ComparisonOutcome;
use crate::report::{ComparisonReporter, JsonOutput};
use anyhow::Result;

/// Compare scan `before` with scan `after`
///
/// # Examples
///
/// ```no_run
/// use oobee_scan::cmd::{cmd_compare, Project};
/// use std::path::Path;
///
/// let project = Project::open(Path::new("."))?;
/// cmd_compare(&project, "scan-jan", "scan-feb", false)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - Either id is not in history
/// - The history record cannot be read or parsed
pub fn cmd_compare(project: &Project, before: &str, after: &str, json: bool) -> Result<()> {
    let history = project.history()?;
    let outcome = history.compare(before, after)?;
    let reporter = ComparisonReporter::new();

    match outcome {
        ComparisonOutcome::SelectDistinctScans => {
            if json {
                JsonOutput::select_distinct_scans().print();
            } else {
                reporter.print_select_distinct();
            }
        }
        ComparisonOutcome::Compared(result) => {
            project.observer().notify(&OobeeEvent::ComparisonComputed {
                from: result.from_id.clone(),
                to: result.to_id.clone(),
                is_improvement: result.is_improvement,
            });

            if json {
                JsonOutput::from_comparison(&result).print();
            } else {
                reporter.print_comparison(&result);
            }
        }
    }

    Ok(())
}
