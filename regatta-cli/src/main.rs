#![deny(missing_docs)]
//! Regatta command-line interface.
//!
//! Runs sailing-school drills and fleet reports against an in-memory school.

use clap::{Args, Parser, Subcommand, ValueEnum};
use regatta_core::{
    Drill, FleetReport, LogEntry, SailingSchool, VecLogbook, render_fleet_markdown,
    render_fleet_text, render_json,
};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "regatta", version, about = "Sailing school fleet CLI")]
struct Cli {
    /// Log vessel transitions at info level (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, env = "REGATTA_FORMAT", default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output", env = "REGATTA_REPORT_OUTPUT")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in two-vessel sea trial.
    Trial {
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Run a drill script (JSON array of orders).
    Drill {
        /// Drill script to run.
        #[arg(short, long)]
        file: PathBuf,
        /// Stop at the first failed order.
        #[arg(long)]
        halt_on_error: bool,
        /// Exit with an error when any order fails.
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Commission a flotilla of default vessels and report it.
    Flotilla {
        /// Number of vessels to commission.
        #[arg(short, long, default_value_t = 3)]
        count: usize,
        #[command(flatten)]
        report: OutputArgs,
    },
}

/// Logbook and fleet state after a drill.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DrillReport {
    logbook: Vec<LogEntry>,
    failures: usize,
    fleet: FleetReport,
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Trial { report } => {
            let drill_report = run_drill(&Drill::sea_trial(), false);
            emit_drill_report(&drill_report, &report).await?;
        }
        Commands::Drill {
            file,
            halt_on_error,
            strict,
            report,
        } => {
            let drill = load_drill(&file).await?;
            let drill_report = run_drill(&drill, halt_on_error);
            emit_drill_report(&drill_report, &report).await?;
            check_strict(&drill_report, strict)?;
        }
        Commands::Flotilla { count, report } => {
            let fleet = commission_flotilla(count)?;
            emit_fleet_report(&fleet, &report).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

#[cfg_attr(test, allow(dead_code))]
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

async fn load_drill(path: &Path) -> CliResult<Drill> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(Drill::from_json(&contents)?)
}

fn run_drill(drill: &Drill, halt_on_error: bool) -> DrillReport {
    let mut school = SailingSchool::default();
    let mut logbook = VecLogbook::new();
    let failures = school.run_drill(drill, &mut logbook, halt_on_error);
    log::info!(
        "drill finished: {} orders logged, {failures} failed",
        logbook.entries().len()
    );
    DrillReport {
        logbook: logbook.into_entries(),
        failures,
        fleet: school.report(),
    }
}

fn commission_flotilla(count: usize) -> CliResult<FleetReport> {
    let mut school = SailingSchool::default();
    school.commission_flotilla(count)?;
    Ok(school.report())
}

fn check_strict(report: &DrillReport, strict: bool) -> CliResult<()> {
    if strict && report.failures > 0 {
        return Err(format!("{} drill orders failed", report.failures).into());
    }
    Ok(())
}

async fn emit_drill_report(report: &DrillReport, output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_drill_text(report),
        OutputFormat::Markdown => render_drill_markdown(report),
        OutputFormat::Json => render_json(report)?,
    };
    emit_output(output, contents).await
}

async fn emit_fleet_report(report: &FleetReport, output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_fleet_text(report),
        OutputFormat::Markdown => render_fleet_markdown(report),
        OutputFormat::Json => render_json(report)?,
    };
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_drill_text(report: &DrillReport) -> String {
    let mut output = String::new();
    if report.logbook.is_empty() {
        let _ = writeln!(output, "Logbook: empty");
    } else {
        let _ = writeln!(output, "Logbook:");
        for entry in &report.logbook {
            let status = if entry.succeeded { "ok" } else { "failed" };
            let _ = writeln!(output, "{:>3}. {} [{status}]", entry.step, entry.order);
            let _ = writeln!(output, "     {}", entry.message);
        }
    }
    let _ = writeln!(output, "Failed orders: {}", report.failures);
    let _ = writeln!(output);
    output.push_str(&render_fleet_text(&report.fleet));
    output
}

fn render_drill_markdown(report: &DrillReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Drill Logbook\n");
    if report.logbook.is_empty() {
        let _ = writeln!(output, "No orders given.\n");
    } else {
        for entry in &report.logbook {
            let mark = if entry.succeeded { "x" } else { " " };
            let _ = writeln!(
                output,
                "- [{mark}] {}. {}: {}",
                entry.step, entry.order, entry.message
            );
        }
        let _ = writeln!(output);
    }
    let _ = writeln!(output, "Failed orders: {}\n", report.failures);
    output.push_str(&render_fleet_markdown(&report.fleet));
    output
}
