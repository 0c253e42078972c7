//! Command-line arguments shared by both binaries.

use clap::Args;
use std::path::{Path, PathBuf};

use crate::config::OutputFormat;

/// Why the log file argument cannot be used. Both cases exit with status 1.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LogFileError {
    #[error("Missing log file.")]
    Missing,
    #[error("Log file not found.")]
    NotFound,
}

#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Testbed log file to analyze
    pub log_file: Option<PathBuf>,

    /// TOML configuration file (defaults to analyzer.toml beside the log)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format, overrides the config file
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommonArgs {
    /// The log path, checked to name an existing regular file.
    pub fn log_path(&self) -> Result<&Path, LogFileError> {
        let path = self.log_file.as_deref().ok_or(LogFileError::Missing)?;
        if !path.is_file() {
            return Err(LogFileError::NotFound);
        }
        Ok(path)
    }
}
