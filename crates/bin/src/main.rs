//! Optima CLI binary.
//!
//! Provides command-line interface for dayparting budget control and performance
//! reporting.

mod error;
mod integration;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{ArgAction, Parser, Subcommand};
use error::CliError;
use integration::simulation::{SimulationConfig, run_live, run_simulation};
use integration::workspace_store::{
    WorkspaceSource, default_workspace_path, load_records, open_store, save_workspace,
    write_sample,
};
use optima_budget::{
    AccountId, ChangeLog, EvaluatorConfig, InMemoryStore, MonitorConfig, OvernightPolicy,
    TieBreak,
};
use optima_metrics::{DateRange, ExportFormat, Exporter, Granularity, ReportBuilder};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "optima")]
#[command(about = "Optima: dayparting budget control and ad performance", long_about = None)]
#[command(version)]
struct Cli {
    /// Workspace file (default: <config dir>/optima/workspace.json, else sample data)
    #[arg(long, global = true)]
    workspace: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the budget monitor against a simulated clock
    Simulate {
        /// Simulated start instant, RFC 3339 (default: now)
        #[arg(long)]
        start: Option<DateTime<Utc>>,

        /// Simulated minutes per tick
        #[arg(long, default_value = "15")]
        step_minutes: i64,

        /// Number of ticks
        #[arg(long, default_value = "96")]
        ticks: u32,

        /// Pace ticks against the wall clock
        #[arg(long)]
        realtime: bool,

        /// Wall-clock milliseconds per tick with --realtime
        #[arg(long, default_value = "1000")]
        tick_ms: u64,

        /// Only reconcile this account's portfolios
        #[arg(long)]
        account: Option<String>,

        /// Resolve overlapping schedules by highest cap instead of declaration order
        #[arg(long)]
        highest_cap: bool,

        /// Treat windows ending before they start as never open
        #[arg(long)]
        same_day: bool,
    },

    /// Run the budget monitor against the system clock
    Monitor {
        /// Seconds between passes
        #[arg(long, default_value = "60")]
        interval_secs: u64,

        /// Run a single pass and exit
        #[arg(long)]
        once: bool,

        /// Only reconcile this account's portfolios
        #[arg(long)]
        account: Option<String>,

        /// Write updated caps back to the workspace file on exit
        #[arg(long)]
        save: bool,
    },

    /// Print performance KPIs and a bucketed series
    Report {
        /// Records CSV (default: generated sample records)
        #[arg(long)]
        records: Option<PathBuf>,

        /// Only include this account's records
        #[arg(long)]
        account: Option<String>,

        /// Date range (last-7-days, last-30-days, this-month, last-month, last-90-days)
        #[arg(long, default_value = "last-30-days")]
        range: DateRange,

        /// Bucket size (daily, weekly, monthly)
        #[arg(long, default_value = "daily")]
        granularity: Granularity,

        /// Reference date for the range (default: today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Print Markdown instead of tables
        #[arg(long)]
        markdown: bool,

        /// Export format (csv, json, pretty-json)
        #[arg(long)]
        export: Option<ExportFormat>,

        /// Export destination (default: stdout)
        #[arg(long, requires = "export")]
        output: Option<PathBuf>,
    },

    /// Write the sample workspace, accounts and records to a directory
    Sample {
        /// Output directory
        dir: PathBuf,

        /// Last day of generated records (default: today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let workspace = cli.workspace.as_deref();

    match cli.command {
        Commands::Simulate {
            start,
            step_minutes,
            ticks,
            realtime,
            tick_ms,
            account,
            highest_cap,
            same_day,
        } => {
            let account = account.map(AccountId::from);
            let (store, _) = open_store(workspace, account.as_ref())?;
            let store = Arc::new(store);

            let evaluator = EvaluatorConfig {
                tie_break: if highest_cap {
                    TieBreak::HighestCap
                } else {
                    TieBreak::FirstDeclared
                },
                overnight: if same_day {
                    OvernightPolicy::SameDay
                } else {
                    OvernightPolicy::Wraparound
                },
            };
            let config = SimulationConfig {
                start: start.unwrap_or_else(Utc::now),
                step_minutes,
                ticks,
                realtime,
                tick_ms,
                monitor: MonitorConfig {
                    evaluator,
                    account,
                    ..MonitorConfig::default()
                },
            };
            let start = config.start;

            let outcome = run_simulation(Arc::clone(&store), config).await?;
            println!(
                "\nSimulated {} passes from {} to {}: {} budget changes",
                outcome.passes,
                start.format("%a %Y-%m-%d %H:%M UTC"),
                outcome.finished_at.format("%a %Y-%m-%d %H:%M UTC"),
                outcome.changes
            );
            print_log(&outcome.log);
            print_portfolios(&store);
        }
        Commands::Monitor {
            interval_secs,
            once,
            account,
            save,
        } => {
            let account = account.map(AccountId::from);
            let (store, source) = open_store(workspace, account.as_ref())?;
            let store = Arc::new(store);
            let config = MonitorConfig {
                account,
                ..MonitorConfig::default()
            };

            let log = run_live(
                Arc::clone(&store),
                config,
                StdDuration::from_secs(interval_secs.max(1)),
                once,
            )
            .await?;
            print_log(&log);
            print_portfolios(&store);

            if save {
                let path = match source {
                    WorkspaceSource::File(path) => path,
                    WorkspaceSource::Sample => default_workspace_path(),
                };
                save_workspace(&path, &store.snapshot())?;
                println!("Saved workspace to {}", path.display());
            }
        }
        Commands::Report {
            records,
            account,
            range,
            granularity,
            today,
            markdown,
            export,
            output,
        } => {
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            let records = load_records(records.as_deref(), today)?;

            let mut builder = ReportBuilder::new()
                .range(range, today)
                .granularity(granularity);
            if let Some(account) = account {
                builder = builder.account(account);
            }
            let report = builder.build(&records);

            match (export, output) {
                (Some(format), Some(path)) => {
                    report.export_to_file(&path, format)?;
                    println!("Exported {} report to {}", format, path.display());
                }
                (Some(format), None) => println!("{}", report.export_to_string(format)?),
                (None, _) if markdown => println!("{}", report.to_markdown()),
                (None, _) => println!("{}", report.to_ascii()),
            }
        }
        Commands::Sample { dir, today } => {
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            for path in write_sample(&dir, today)? {
                println!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_log(log: &ChangeLog) {
    println!("\nActivity log (newest first, last {}):", log.capacity());
    if log.is_empty() {
        println!("  No budget changes.");
    }
    for line in log.lines() {
        println!("  {line}");
    }
}

fn print_portfolios(store: &InMemoryStore) {
    println!("\nPortfolios:");
    for portfolio in store.snapshot().portfolios {
        println!("  [{}] {}", portfolio.account_id, portfolio);
    }
}
