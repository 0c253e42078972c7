//! Packet reception ratio and average RSSI per link from a testbed log.
//!
//! Usage: `connectivity job.log`

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;

use testbed_analyzer::cli::CommonArgs;
use testbed_analyzer::connectivity::analyze_log;
use testbed_analyzer::logging::init_logging;
use testbed_analyzer::{AnalyzerConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "connectivity")]
#[command(version, about = "Per-link packet delivery statistics from a testbed log", long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
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

    let report = analyze_log(log_path).with_context(|| format!("Failed to analyze {}", log_path.display()))?;

    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => write!(out, "{}", report)?,
        OutputFormat::Json => writeln!(out, "{}", report.to_json()?)?,
    }
    out.flush()?;
    Ok(())
}
