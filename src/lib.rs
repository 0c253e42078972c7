//! Log analysis for wireless sensor network testbed experiments.
//!
//! Two tools share this crate:
//! - `connectivity`: per-link packet reception ratio and average RSSI from a
//!   testbed connectivity log
//! - `rng-eval`: UWB ranging error against the deployment's ground-truth
//!   node positions
//!
//! ## Module Organization
//!
//! - `analyzer`: log line reading and parsing into events
//! - `connectivity`: address resolution, TX/RX aggregation and reporting
//! - `ranging`: deployment loading, error evaluation and summaries
//! - `common`: geometry, ordered maps and number formatting
//! - `cli`, `config`, `logging`, `error`: plumbing for the binaries

pub mod analyzer;
pub mod cli;
pub mod common;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod logging;
pub mod ranging;

pub use config::{AnalyzerConfig, OutputFormat};
pub use error::{AnalyzerError, Result};
