//! Log reading and parsing shared by both tools.
//!
//! Provides functionality for:
//! - Streaming a testbed log line by line
//! - Classifying lines into structured `LogEvent`s

pub mod log_loader;
pub mod log_parser;
pub mod types;

pub use log_loader::LogLoader;
pub use types::{Link, LogEvent, NodeId, RangingFailureReason, ShortAddr};
