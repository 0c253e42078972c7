//! Packet delivery statistics from a testbed connectivity log.
//!
//! The log is scanned twice: the first pass builds the short address to node
//! identifier map from the Rime configuration lines, the second pass counts
//! TX/RX events with that map fully populated, so a reception logged before
//! the receiver's announcement is still attributed correctly.

pub mod address_map;
pub mod aggregator;
pub mod report;

use std::path::Path;

use crate::analyzer::LogLoader;
use crate::error::Result;

pub use address_map::AddressMap;
pub use aggregator::{ConnectivityStats, EventAggregator, LinkStats, aggregate_log};
pub use report::{ConnectivityReport, LinkReport, NodeReport};

/// Run both passes over `log_path` and build the delivery report.
pub fn analyze_log(log_path: &Path) -> Result<ConnectivityReport> {
    log::info!("Resolving addresses in {}", log_path.display());
    let addresses = AddressMap::from_log(LogLoader::open(log_path)?)?;
    if addresses.is_empty() {
        log::warn!("No address announcements found in {}", log_path.display());
    }

    log::info!("Counting TX/RX events");
    let stats = aggregate_log(LogLoader::open(log_path)?, &addresses)?;
    Ok(ConnectivityReport::from_stats(&stats))
}
