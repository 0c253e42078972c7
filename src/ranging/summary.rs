//! Aggregate error statistics over a ranging run.

use average::{Estimate, Max, Mean, Min};
use serde::Serialize;
use std::fmt;

use crate::analyzer::{Link, RangingFailureReason};
use crate::common::OrderedMap;
use crate::common::numeric::{format_float, round2};

use super::evaluator::RangingSample;

struct LinkErrors {
    error: Mean,
}

impl Default for LinkErrors {
    fn default() -> Self {
        Self { error: Mean::new() }
    }
}

/// Running statistics fed by `evaluate_log`.
pub struct RangingSummary {
    error: Mean,
    abs_error: Mean,
    squared_error: Mean,
    min_error: Min,
    max_error: Max,
    links: OrderedMap<Link, LinkErrors>,
    failures: OrderedMap<String, u64>,
}

impl Default for RangingSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl RangingSummary {
    pub fn new() -> Self {
        Self {
            error: Mean::new(),
            abs_error: Mean::new(),
            squared_error: Mean::new(),
            min_error: Min::new(),
            max_error: Max::new(),
            links: OrderedMap::new(),
            failures: OrderedMap::new(),
        }
    }

    pub fn add_sample(&mut self, sample: &RangingSample) {
        let error = sample.error_mm as f64;
        self.error.add(error);
        self.abs_error.add(error.abs());
        self.squared_error.add(error * error);
        self.min_error.add(error);
        self.max_error.add(error);

        let link = Link {
            from: sample.initiator.clone(),
            to: sample.responder.clone(),
        };
        self.links.entry_or_default(link).error.add(error);
    }

    pub fn add_failure(&mut self, reason: &RangingFailureReason) {
        *self.failures.entry_or_default(reason.label().to_string()) += 1;
    }

    pub fn sample_count(&self) -> u64 {
        self.error.len()
    }

    pub fn failure_count(&self) -> u64 {
        self.failures.iter().map(|(_, count)| count).sum()
    }

    /// Freeze the statistics into a printable report.
    pub fn report(&self) -> SummaryReport {
        let errors = (self.sample_count() > 0).then(|| ErrorStats {
            mean: round2(self.error.mean()),
            mean_abs: round2(self.abs_error.mean()),
            rmse: round2(self.squared_error.mean().sqrt()),
            min: self.min_error.min() as i64,
            max: self.max_error.max() as i64,
        });

        SummaryReport {
            successful: self.sample_count(),
            failed: self.failure_count(),
            failures: self
                .failures
                .iter()
                .map(|(reason, count)| FailureCount {
                    reason: reason.clone(),
                    count: *count,
                })
                .collect(),
            errors,
            links: self
                .links
                .iter()
                .map(|(link, stats)| LinkSummary {
                    link: link.to_string(),
                    samples: stats.error.len(),
                    mean_error: round2(stats.error.mean()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorStats {
    pub mean: f64,
    pub mean_abs: f64,
    pub rmse: f64,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureCount {
    pub reason: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSummary {
    pub link: String,
    pub samples: u64,
    pub mean_error: f64,
}

/// Summary of a ranging run, all errors in mm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub successful: u64,
    pub failed: u64,
    pub failures: Vec<FailureCount>,
    /// `None` when no round succeeded.
    pub errors: Option<ErrorStats>,
    pub links: Vec<LinkSummary>,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Successful rounds: {}", self.successful)?;
        writeln!(f, "Failed rounds: {}", self.failed)?;
        for failure in &self.failures {
            writeln!(f, "\t{}: {}", failure.reason, failure.count)?;
        }

        if let Some(errors) = &self.errors {
            writeln!(
                f,
                "Error (mm): mean {} mean abs {} rmse {} min {} max {}",
                format_float(errors.mean),
                format_float(errors.mean_abs),
                format_float(errors.rmse),
                errors.min,
                errors.max
            )?;
        }

        for link in &self.links {
            writeln!(
                f,
                "\t[{}] samples {} mean error {}",
                link.link,
                link.samples,
                format_float(link.mean_error)
            )?;
        }
        Ok(())
    }
}
