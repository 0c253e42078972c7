//! Error type shared by the analyzer library.

use std::path::PathBuf;

use thiserror::Error;

use crate::analyzer::types::{NodeId, ShortAddr};

/// Failures raised while loading inputs or evaluating log events.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Failed to read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse deployment table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Failed to encode report: {0}")]
    Json(#[from] serde_json::Error),

    /// A short address seen in the log has no node identifier.
    #[error("ID not found for address {0}")]
    UnknownAddress(ShortAddr),

    /// A node has no usable ground-truth coordinates.
    #[error("No coordinates known for node {0}")]
    MissingCoordinates(NodeId),
}

impl AnalyzerError {
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzerError::FileRead { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
