//! Optional TOML configuration shared by both tools.
//!
//! ```toml
//! deployment-path = "DEPT_evb1000_map.csv"
//! format = "json"
//! summary = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AnalyzerError, Result};

/// Deployment table used when nothing else is configured.
pub const DEFAULT_DEPLOYMENT_PATH: &str = "DEPT_evb1000_map.csv";

/// Report rendering on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated text, as printed by the testbed scripts.
    #[default]
    Text,
    /// JSON (one document per report, or one object per line for streams).
    Json,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AnalyzerConfig {
    /// Ground-truth table for `rng-eval`.
    pub deployment_path: PathBuf,
    pub format: OutputFormat,
    /// Print the ranging summary after the per-measurement lines.
    pub summary: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            deployment_path: PathBuf::from(DEFAULT_DEPLOYMENT_PATH),
            format: OutputFormat::Text,
            summary: false,
        }
    }
}

impl AnalyzerConfig {
    /// File name looked up next to the log when no config is given.
    pub const FILE_NAME: &'static str = "analyzer.toml";

    /// Load configuration from a TOML file.
    ///
    /// A relative `deployment-path` is resolved against the directory holding
    /// the config file, so a config can travel with its experiment data.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path).map_err(|e| AnalyzerError::file_read(config_path, e))?;
        let mut config: AnalyzerConfig = toml::from_str(&content)?;

        if config.deployment_path.is_relative() {
            if let Some(dir) = config_path.parent() {
                config.deployment_path = dir.join(&config.deployment_path);
            }
        }
        Ok(config)
    }

    /// Derive the default config path from a log file path.
    ///
    /// Replaces the log filename with `analyzer.toml` in the same directory.
    pub fn config_path_from_log(log_path: &Path) -> PathBuf {
        log_path.parent().unwrap_or(Path::new(".")).join(Self::FILE_NAME)
    }

    /// Pick the configuration for a run: the explicit file if given (which
    /// must exist), else `analyzer.toml` beside the log if present, else the
    /// defaults.
    pub fn discover(explicit: Option<&Path>, log_path: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("Using config {}", path.display());
            return Self::load(path);
        }

        let candidate = Self::config_path_from_log(log_path);
        if candidate.is_file() {
            log::info!("Using config {}", candidate.display());
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_when_keys_missing() {
        let config: AnalyzerConfig = toml::from_str("").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(config.deployment_path, PathBuf::from(DEFAULT_DEPLOYMENT_PATH));
    }

    #[test]
    fn parses_kebab_case_keys() {
        let config: AnalyzerConfig =
            toml::from_str("deployment-path = \"/data/map.csv\"\nformat = \"json\"\nsummary = true\n").unwrap();
        assert_eq!(config.deployment_path, PathBuf::from("/data/map.csv"));
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.summary);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(toml::from_str::<AnalyzerConfig>("format = \"xml\"").is_err());
    }

    #[test]
    fn relative_deployment_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(AnalyzerConfig::FILE_NAME);
        fs::write(&path, "deployment-path = \"map.csv\"\n").unwrap();

        let config = AnalyzerConfig::load(&path).unwrap();
        assert_eq!(config.deployment_path, dir.path().join("map.csv"));
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let log = dir.path().join("job.log");
        let config = AnalyzerConfig::discover(None, &log).unwrap();
        assert_eq!(config, AnalyzerConfig::default());
    }

    #[test]
    fn discover_finds_config_beside_log() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(AnalyzerConfig::FILE_NAME), "summary = true\n").unwrap();
        let config = AnalyzerConfig::discover(None, &dir.path().join("job.log")).unwrap();
        assert!(config.summary);
    }

    #[test]
    fn explicit_config_must_exist() {
        let err = AnalyzerConfig::discover(Some(Path::new("/no/such/analyzer.toml")), Path::new("job.log")).unwrap_err();
        assert!(matches!(err, AnalyzerError::FileRead { .. }));
    }
}
