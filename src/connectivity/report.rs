//! Per-link delivery report built from `ConnectivityStats`.

use serde::Serialize;
use std::fmt;

use crate::analyzer::NodeId;
use crate::common::numeric::{format_float, round2};
use crate::error::Result;

use super::aggregator::ConnectivityStats;

/// Delivery figures for one transmitter -> receiver link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkReport {
    pub to: NodeId,
    pub received: u64,
    /// Packet reception ratio in percent, two decimals.
    pub prr: f64,
    /// Average RSSI in dBm, two decimals.
    pub average_rssi: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub node_id: NodeId,
    pub sent: u64,
    pub links: Vec<LinkReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivityReport {
    pub nodes: Vec<NodeReport>,
    pub skipped_tx: u64,
    pub skipped_rx: u64,
}

impl ConnectivityReport {
    /// Build the report for every node that transmitted at least once.
    ///
    /// Nodes and links keep the order in which they first appeared in the log.
    /// Receptions on links whose transmitter never logged a TX are not listed,
    /// since there is no send count to compute a ratio against.
    pub fn from_stats(stats: &ConnectivityStats) -> Self {
        let nodes = stats
            .senders()
            .map(|(node_id, sent)| NodeReport {
                node_id: node_id.clone(),
                sent,
                links: stats
                    .receivers(node_id)
                    .map(|(to, link)| LinkReport {
                        to: to.clone(),
                        received: link.received,
                        prr: round2(link.received as f64 / sent as f64 * 100.0),
                        average_rssi: round2(link.average_rssi()),
                    })
                    .collect(),
            })
            .collect();

        ConnectivityReport {
            nodes,
            skipped_tx: stats.dropped_tx,
            skipped_rx: stats.dropped_rx,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ConnectivityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            writeln!(f, "FROM: {:<5}\t\t# PKT SENT: {}", node.node_id, node.sent)?;
            for link in &node.links {
                writeln!(
                    f,
                    "\tTO: {:<5}\t# PKT RCVD: {}\tPRR: {}%\tAverage RSSI: {}dBm",
                    link.to,
                    link.received,
                    format_float(link.prr),
                    format_float(link.average_rssi)
                )?;
            }
            // Two blank lines between nodes
            write!(f, "\n\n")?;
        }
        Ok(())
    }
}
