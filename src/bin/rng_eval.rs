//! UWB ranging error against ground-truth node positions.
//!
//! Usage: `rng-eval job.log [--deployment DEPT_evb1000_map.csv] [--summary]`

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use testbed_analyzer::analyzer::LogLoader;
use testbed_analyzer::cli::CommonArgs;
use testbed_analyzer::logging::init_logging;
use testbed_analyzer::ranging::{Deployment, evaluate_log};
use testbed_analyzer::{AnalyzerConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "rng-eval")]
#[command(version, about = "Ranging error of UWB measurements against the deployment map", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Deployment CSV with evb1000, NodeId and Coordinates columns
    #[arg(short, long)]
    deployment: Option<PathBuf>,

    /// Print error statistics and failure counts after the measurements
    #[arg(short, long)]
    summary: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.common.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let log_path = cli.common.log_path()?;
    let config = AnalyzerConfig::discover(cli.common.config.as_deref(), log_path)?;
    let format = cli.common.format.unwrap_or(config.format);
    let deployment_path = cli.deployment.clone().unwrap_or(config.deployment_path);

    let deployment = Deployment::load(&deployment_path)
        .with_context(|| format!("Failed to load deployment {}", deployment_path.display()))?;
    if deployment.is_empty() {
        log::warn!("Deployment {} lists no nodes", deployment_path.display());
    }

    let mut out = io::stdout().lock();
    let summary = evaluate_log(LogLoader::open(log_path)?, &deployment, |sample| {
        match format {
            OutputFormat::Text => writeln!(out, "{}", sample)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, sample)?;
                writeln!(out)?;
            }
        }
        Ok(())
    })
    .with_context(|| format!("Ranging evaluation of {} aborted", log_path.display()))?;

    log::info!(
        "Evaluated {} ranging rounds ({} failed)",
        summary.sample_count(),
        summary.failure_count()
    );

    if cli.summary || config.summary {
        let report = summary.report();
        match format {
            OutputFormat::Text => write!(out, "\n{}", report)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut out, &serde_json::json!({ "summary": report }))?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}
