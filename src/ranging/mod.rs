//! UWB ranging accuracy evaluation.
//!
//! ## Module Organization
//!
//! - `deployment`: ground-truth node table (short address, id, position)
//! - `evaluator`: per-measurement error against the true distance
//! - `summary`: aggregate statistics and failure counts over a run

pub mod deployment;
pub mod evaluator;
pub mod summary;

pub use deployment::{Deployment, parse_coordinates};
pub use evaluator::{RangingEvaluator, RangingSample, evaluate_log};
pub use summary::{RangingSummary, SummaryReport};
