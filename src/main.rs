use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use oobee_scan::cmd::{self, Project};
use oobee_scan::comparison::{IssueCounts, RankMetric};
use oobee_scan::options::{ScanOptionsPatch, ScanType, Viewport};
use oobee_scan::report::RankOrder;
use std::path::PathBuf;
use std::process;

/// Accessibility scan options and scan-to-scan comparison
///
/// oobee keeps your advanced scan options between runs and records scan
/// results so you can see which issues were resolved and which scans
/// improved the most.
#[derive(Parser)]
#[command(name = "oobee", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    /// Project directory holding .oobee.toml (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a .oobee.toml with default settings
    Init,

    /// Show or change the persisted scan options
    Options {
        #[command(subcommand)]
        action: OptionsCommand,
    },

    /// Record or list scan results
    Snapshot {
        #[command(subcommand)]
        action: SnapshotCommand,
    },

    /// Compare two recorded scans
    Compare {
        /// Earlier scan id
        before: String,

        /// Later scan id
        after: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank recorded scans by improvement over the oldest scan
    Rank {
        /// Metric to rank by: must-fix, score (defaults to rank-by in .oobee.toml)
        #[arg(long)]
        by: Option<RankMetric>,

        /// List the least improved scans first
        #[arg(long)]
        least: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum OptionsCommand {
    /// Print the current options
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one or more options, keeping the rest
    Set {
        /// Scan type: website-crawl
        #[arg(long)]
        scan_type: Option<ScanType>,

        /// Viewport: desktop, mobile
        #[arg(long)]
        viewport: Option<Viewport>,

        /// Capture screenshots of failing elements
        #[arg(long, value_name = "BOOL")]
        screenshots: Option<bool>,

        /// Follow links into subdomains
        #[arg(long, value_name = "BOOL")]
        subdomains: Option<bool>,

        /// Evaluate WCAG AAA criteria
        #[arg(long, value_name = "BOOL")]
        wcag_aaa: Option<bool>,

        /// Run custom checks
        #[arg(long, value_name = "BOOL")]
        custom_checks: Option<bool>,
    },

    /// Restore the default options
    Reset,
}

#[derive(Subcommand)]
enum SnapshotCommand {
    /// Record a scan result
    Add {
        /// Scan id (a scan-<uuid> id is generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Must-fix issue count
        #[arg(long, default_value_t = 0)]
        must_fix: u32,

        /// Should-fix issue count
        #[arg(long, default_value_t = 0)]
        should_fix: u32,

        /// Nice-to-have issue count
        #[arg(long, default_value_t = 0)]
        nice_to_have: u32,

        /// Compliance score (0-100)
        #[arg(long)]
        score: u32,
    },

    /// List recorded scans, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Commands::Completions { shell } = command {
        cmd::cmd_completions(*shell, &mut Cli::command(), &mut std::io::stdout());
        return Ok(());
    }

    let project_root = match &cli.project_root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    if let Commands::Init = command {
        cmd::cmd_init(&project_root)?;
        return Ok(());
    }

    let project = Project::open(&project_root)?;

    match command {
        Commands::Options { action } => match action {
            OptionsCommand::Show { json } => cmd::cmd_options_show(&project, *json),
            OptionsCommand::Set {
                scan_type,
                viewport,
                screenshots,
                subdomains,
                wcag_aaa,
                custom_checks,
            } => {
                let patch = ScanOptionsPatch {
                    scan_type: *scan_type,
                    viewport: *viewport,
                    include_screenshots: *screenshots,
                    include_subdomains: *subdomains,
                    enable_wcag_aaa: *wcag_aaa,
                    custom_checks: *custom_checks,
                };
                cmd::cmd_options_set(&project, &patch)
            }
            OptionsCommand::Reset => cmd::cmd_options_reset(&project),
        },
        Commands::Snapshot { action } => match action {
            SnapshotCommand::Add {
                id,
                must_fix,
                should_fix,
                nice_to_have,
                score,
            } => cmd::cmd_snapshot_add(
                &project,
                id.as_deref(),
                IssueCounts::new(*must_fix, *should_fix, *nice_to_have),
                *score,
            )
            .map(|_| ()),
            SnapshotCommand::List { json } => cmd::cmd_snapshot_list(&project, *json),
        },
        Commands::Compare {
            before,
            after,
            json,
        } => cmd::cmd_compare(&project, before, after, *json),
        Commands::Rank { by, least, json } => {
            let order = if *least {
                RankOrder::LeastImproved
            } else {
                RankOrder::MostImproved
            };
            cmd::cmd_rank(&project, *by, order, *json)
        }
        Commands::Init | Commands::Completions { .. } => Ok(()),
    }
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_emoji {
        std::env::set_var(oobee_scan::fmt::NO_EMOJI_ENV, "1");
    }

    if let Err(e) = run(&cli) {
        use oobee_scan::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        process::exit(ErrorFormatter::exit_code(&e));
    }
}
