//! triage - Emergency Triage Evaluation CLI
//!
//! Reads patient snapshots as JSON and writes triage reports as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Evaluate one request (or an array of requests) from a file
//! triage evaluate --input snapshot.json --pretty
//!
//! # Pipe from a form export
//! cat snapshots.json | triage evaluate
//!
//! # Write a starter configuration, then check an edited one
//! triage config --write triage_config.toml
//! triage config --check triage_config.toml
//! ```
//!
//! # Environment Variables
//!
//! - `TRIAGE_CONFIG`: Path to the configuration TOML
//! - `RUST_LOG`: Logging level (default: info)

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use triage_engine::intake::{parse_requests, IntakeOptions};
use triage_engine::{assess, ReportOptions, TriageConfig, TriageReport};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "triage")]
#[command(about = "Emergency triage severity, deterioration and protocol evaluation")]
#[command(version)]
struct CliArgs {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate patient snapshots and print triage reports
    Evaluate(EvaluateArgs),

    /// Write or check a configuration file
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    /// Request file (JSON object or array); "-" or omitted reads stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Configuration file (overrides TRIAGE_CONFIG and ./triage_config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ConfigArgs {
    /// Write the default configuration to FILE
    #[arg(long, value_name = "FILE")]
    write: Option<PathBuf>,

    /// Load and validate FILE
    #[arg(long, value_name = "FILE")]
    check: Option<PathBuf>,
}

// ============================================================================
// Logging
// ============================================================================

/// Logs go to stderr; stdout carries only reports.
fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ============================================================================
// Subcommands
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<TriageConfig> {
    match path {
        Some(p) => {
            let config = TriageConfig::load_from_file(p)
                .with_context(|| format!("Failed to load config {}", p.display()))?;
            info!(path = %p.display(), facility = %config.facility.name, "Loaded triage config");
            Ok(config)
        }
        None => Ok(TriageConfig::load()),
    }
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn run_evaluate(args: &EvaluateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let raw = read_input(args.input.as_deref())?;

    let requests = parse_requests(&raw).context("Invalid evaluation request")?;
    let batch = raw.trim_start().starts_with('[');

    let intake = IntakeOptions {
        strict_symptoms: config.intake.strict_symptoms,
        today: config.facility.today(),
    };
    let options = ReportOptions::from_config(&config);

    let reports = requests
        .into_iter()
        .enumerate()
        .map(|(i, request)| -> Result<TriageReport> {
            let inputs = request
                .into_inputs(&intake)
                .with_context(|| format!("Request #{} rejected", i + 1))?;
            Ok(assess(&inputs, &options))
        })
        .collect::<Result<Vec<TriageReport>>>()?;

    let urgent = reports.iter().filter(|r| r.requires_immediate_attention()).count();
    info!(evaluated = reports.len(), urgent, "Evaluation complete");

    let pretty = args.pretty || config.output.pretty;
    let output = match (batch, reports.as_slice()) {
        (false, [single]) => to_json(single, pretty)?,
        _ => to_json(&reports, pretty)?,
    };
    println!("{output}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize report")
}

fn run_config(args: &ConfigArgs) -> Result<()> {
    if let Some(path) = &args.write {
        TriageConfig::default()
            .save_to_file(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        return Ok(());
    }

    if let Some(path) = &args.check {
        let (config, warnings) = TriageConfig::load_with_warnings(path)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        for w in &warnings {
            warn!("{}", w);
        }
        if warnings.is_empty() {
            info!(facility = %config.facility.name, "Config OK");
        } else {
            warn!(count = warnings.len(), "Config loaded with warnings");
        }
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    match &args.command {
        Command::Evaluate(evaluate) => run_evaluate(evaluate),
        Command::Config(config) => run_config(config),
    }
}
