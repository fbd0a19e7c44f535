//! Console rendering for comparisons and rankings

use super::{RankEntry, RankOrder};
use crate::comparison::{ComparisonResult, IssueSnapshot, RankMetric, Trend};
use crate::fmt::{self, CHART, CHECKMARK, INFO, TROPHY, WARNING};
use crate::history::SnapshotHistory;
use crate::options::ScanOptions;
use console::style;
use std::fmt::Write as _;

const WIDTH: usize = 72;

/// Handles comparison, ranking and history output
#[derive(Debug, Default)]
pub struct ComparisonReporter;

impl ComparisonReporter {
    /// Create a new comparison reporter
    pub fn new() -> Self {
        Self
    }

    /// Print a comparison table with its verdict
    pub fn print_comparison(&self, result: &ComparisonResult) {
        print!("{}", self.render_comparison(result));
    }

    /// Render a comparison table with its verdict
    pub fn render_comparison(&self, result: &ComparisonResult) -> String {
        let mut out = String::new();
        let trends = result.tier_trends();

        let _ = writeln!(
            out,
            "\n{} Scan Comparison: {} -> {}",
            fmt::icon(CHART),
            style(&result.from_id).bold(),
            style(&result.to_id).bold()
        );
        let _ = writeln!(out, "{}", "=".repeat(WIDTH));
        let _ = writeln!(out, "{:<24} {:>14} {:>14}", "Tier", "Resolved", "Trend");
        let _ = writeln!(out, "{}", "-".repeat(WIDTH));

        for (label, delta, trend) in [
            ("Must fix", result.delta.must_fix, trends.must_fix),
            ("Should fix", result.delta.should_fix, trends.should_fix),
            ("Nice to have", result.delta.nice_to_have, trends.nice_to_have),
        ] {
            let _ = writeln!(
                out,
                "{:<24} {:>14} {:>14}",
                label,
                fmt::format_signed(delta),
                trend_label(trend)
            );
        }

        let _ = writeln!(out, "{}", "-".repeat(WIDTH));
        let _ = writeln!(
            out,
            "{:<24} {:>14}",
            "Total",
            fmt::format_signed(result.delta.total)
        );
        let _ = writeln!(
            out,
            "{:<24} {:>14}",
            "Compliance score",
            format!("{} pts", fmt::format_signed(i64::from(result.score_delta)))
        );
        let _ = writeln!(out, "{}", "=".repeat(WIDTH));

        if result.is_improvement {
            let _ = writeln!(
                out,
                "{} {}",
                fmt::icon(CHECKMARK),
                style("Improvement: fewer must-fix issues and a higher score").green()
            );
        } else {
            let _ = writeln!(
                out,
                "{} {}",
                fmt::icon(WARNING),
                style("No overall improvement").yellow()
            );
        }

        out
    }

    /// Print the prompt shown when the same scan was selected twice
    pub fn print_select_distinct(&self) {
        println!(
            "{} {}",
            fmt::icon(INFO),
            style("Select two different scans to compare").dim()
        );
    }

    /// Print a ranking table
    pub fn print_ranking(
        &self,
        baseline: &IssueSnapshot,
        by: RankMetric,
        order: RankOrder,
        entries: &[RankEntry],
    ) {
        print!("{}", self.render_ranking(baseline, by, order, entries));
    }

    /// Render a ranking table in `order`
    pub fn render_ranking(
        &self,
        baseline: &IssueSnapshot,
        by: RankMetric,
        order: RankOrder,
        entries: &[RankEntry],
    ) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "\n{} {} scans by {} (baseline: {})",
            fmt::icon(TROPHY),
            order.title(),
            style(by).bold(),
            baseline.id
        );
        let _ = writeln!(out, "{}", "=".repeat(WIDTH));
        let _ = writeln!(
            out,
            "{:>4}  {:<34} {:>14} {:>14}",
            "#", "Scan", "Must fix", "Score"
        );
        let _ = writeln!(out, "{}", "-".repeat(WIDTH));

        if entries.is_empty() {
            let _ = writeln!(out, "  {}", style("No scans to rank").dim());
        }

        for entry in entries {
            let _ = writeln!(
                out,
                "{:>4}  {:<34} {:>14} {:>14}",
                entry.rank,
                fmt::truncate(&entry.snapshot.id, 34),
                fmt::format_signed(entry.result.delta.must_fix),
                fmt::format_signed(i64::from(entry.result.score_delta))
            );
        }

        let _ = writeln!(out, "{}", "=".repeat(WIDTH));
        out
    }

    /// Render the recorded snapshots, newest first
    pub fn render_history(&self, history: &SnapshotHistory) -> String {
        let mut out = String::new();

        if history.is_empty() {
            let _ = writeln!(
                out,
                "{} No scans recorded yet. Add one with 'oobee snapshot add'.",
                fmt::icon(INFO)
            );
            return out;
        }

        let _ = writeln!(
            out,
            "{:<34} {:<17} {:>6} {:>6} {:>6} {:>6}",
            "Scan", "Recorded (UTC)", "Must", "Should", "Nice", "Score"
        );
        let _ = writeln!(out, "{}", "-".repeat(WIDTH + 8));
        for snapshot in &history.records {
            let _ = writeln!(
                out,
                "{:<34} {:<17} {:>6} {:>6} {:>6} {:>6}",
                fmt::truncate(&snapshot.id, 34),
                fmt::format_timestamp(snapshot.timestamp),
                snapshot.counts.must_fix,
                snapshot.counts.should_fix,
                snapshot.counts.nice_to_have,
                snapshot.compliance_score.to_string()
            );
        }
        out
    }

    /// Render current scan options as `key = value` lines
    pub fn render_options(&self, options: &ScanOptions) -> String {
        let mut out = String::new();
        for (name, value) in options.fields() {
            let _ = writeln!(out, "{:<20} = {}", name, value);
        }
        out
    }
}

fn trend_label(trend: Trend) -> String {
    match trend {
        Trend::Improved => style("improved").green().to_string(),
        Trend::Regressed => style("regressed").red().to_string(),
        Trend::Unchanged => style("unchanged").dim().to_string(),
    }
}
