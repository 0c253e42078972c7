//! Ranging error against ground truth.

use serde::Serialize;
use std::fmt;
use std::io::BufRead;

use crate::analyzer::log_parser::parse_ranging;
use crate::analyzer::{LogEvent, LogLoader, NodeId, ShortAddr};
use crate::common::geometry::distance_mm;
use crate::error::{AnalyzerError, Result};

use super::deployment::Deployment;
use super::summary::RangingSummary;

/// One successful ranging measurement compared to the true distance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangingSample {
    pub initiator: NodeId,
    pub responder: NodeId,
    /// Distance reported by the initiator, in mm.
    pub measured_mm: u64,
    /// Ground-truth distance, in mm (truncated).
    pub true_mm: i64,
    /// `measured_mm - true_mm`; positive when the radio overestimates.
    pub error_mm: i64,
}

impl fmt::Display for RangingSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ranging error [{}->{}] {} (dist {} true dist {})",
            self.initiator, self.responder, self.error_mm, self.measured_mm, self.true_mm
        )
    }
}

pub struct RangingEvaluator<'a> {
    deployment: &'a Deployment,
}

impl<'a> RangingEvaluator<'a> {
    pub fn new(deployment: &'a Deployment) -> Self {
        Self { deployment }
    }

    /// Compare one measurement with the deployment's ground truth.
    ///
    /// # Returns
    ///
    /// The sample, or `UnknownAddress` / `MissingCoordinates` when either
    /// endpoint cannot be placed. Lookups happen initiator first.
    pub fn evaluate(&self, initiator: &ShortAddr, responder: &ShortAddr, measured_mm: u64) -> Result<RangingSample> {
        let init_id = self.node_for(initiator)?;
        let resp_id = self.node_for(responder)?;

        let init_pos = self
            .deployment
            .coordinates(init_id)
            .ok_or_else(|| AnalyzerError::MissingCoordinates(init_id.clone()))?;
        let resp_pos = self
            .deployment
            .coordinates(resp_id)
            .ok_or_else(|| AnalyzerError::MissingCoordinates(resp_id.clone()))?;

        let true_mm = distance_mm(&init_pos, &resp_pos);
        let error_mm = signed_error(measured_mm, true_mm);

        Ok(RangingSample {
            initiator: init_id.clone(),
            responder: resp_id.clone(),
            measured_mm,
            true_mm,
            error_mm,
        })
    }

    fn node_for(&self, addr: &ShortAddr) -> Result<&'a NodeId> {
        self.deployment
            .node_for(addr)
            .ok_or_else(|| AnalyzerError::UnknownAddress(addr.clone()))
    }
}

/// `measured - truth`, saturated to the `i64` range.
fn signed_error(measured_mm: u64, true_mm: i64) -> i64 {
    let error = i128::from(measured_mm) - i128::from(true_mm);
    i64::try_from(error).unwrap_or_else(|_| {
        log::warn!("Ranging error {} mm exceeds the i64 range, saturating", error);
        if error > 0 { i64::MAX } else { i64::MIN }
    })
}

/// Evaluate every ranging line of a log.
///
/// Each sample is handed to `on_sample` as soon as it is computed, so output
/// produced before a fatal lookup failure is kept. The first unresolvable
/// address or missing coordinate stops the run with an error.
pub fn evaluate_log<R, F>(loader: LogLoader<R>, deployment: &Deployment, mut on_sample: F) -> Result<RangingSummary>
where
    R: BufRead,
    F: FnMut(&RangingSample) -> Result<()>,
{
    let evaluator = RangingEvaluator::new(deployment);
    let mut summary = RangingSummary::new();

    for line in loader {
        match parse_ranging(&line?) {
            Some(LogEvent::RangingOk {
                initiator,
                responder,
                distance_mm,
            }) => {
                let sample = evaluator.evaluate(&initiator, &responder, distance_mm)?;
                log::trace!("{:?}", sample);
                on_sample(&sample)?;
                summary.add_sample(&sample);
            }
            Some(LogEvent::RangingFailure { seqn, reason }) => {
                log::debug!("Ranging round {} failed: {}", seqn, reason.label());
                summary.add_failure(&reason);
            }
            _ => {}
        }
    }

    Ok(summary)
}
