//! Second pass: count transmissions and receptions per resolved link.

use std::io::BufRead;

use crate::analyzer::log_parser::parse_traffic;
use crate::analyzer::{LogEvent, LogLoader, NodeId, ShortAddr};
use crate::common::OrderedMap;
use crate::error::Result;

use super::address_map::AddressMap;

/// Reception counters for one directed link.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkStats {
    pub received: u64,
    /// Sum of RSSI values in dBm, divided by `received` for the average.
    pub rssi_sum: i64,
}

impl LinkStats {
    pub fn average_rssi(&self) -> f64 {
        if self.received == 0 {
            return 0.0;
        }
        self.rssi_sum as f64 / self.received as f64
    }
}

/// Aggregated traffic counters for one log.
#[derive(Debug, Default)]
pub struct ConnectivityStats {
    sent: OrderedMap<NodeId, u64>,
    links: OrderedMap<NodeId, OrderedMap<NodeId, LinkStats>>,
    /// TX events dropped because the address was unknown.
    pub dropped_tx: u64,
    /// RX events dropped because at least one address was unknown.
    pub dropped_rx: u64,
}

impl ConnectivityStats {
    pub fn sent(&self, node_id: &NodeId) -> u64 {
        self.sent.get(node_id).copied().unwrap_or(0)
    }

    pub fn link(&self, from: &NodeId, to: &NodeId) -> Option<&LinkStats> {
        self.links.get(from)?.get(to)
    }

    /// Transmitting nodes with their send count, in order of first TX.
    pub fn senders(&self) -> impl Iterator<Item = (&NodeId, u64)> {
        self.sent.iter().map(|(id, count)| (id, *count))
    }

    /// Receivers of `from`, in order of first reception.
    pub fn receivers<'a>(&'a self, from: &NodeId) -> impl Iterator<Item = (&'a NodeId, &'a LinkStats)> + 'a {
        self.links.get(from).into_iter().flat_map(|dest| dest.iter())
    }
}

/// Feeds traffic events into `ConnectivityStats`, resolving addresses on the
/// way.
pub struct EventAggregator<'a> {
    addresses: &'a AddressMap,
    stats: ConnectivityStats,
}

impl<'a> EventAggregator<'a> {
    pub fn new(addresses: &'a AddressMap) -> Self {
        Self {
            addresses,
            stats: ConnectivityStats::default(),
        }
    }

    pub fn handle_line(&mut self, line: &str) {
        if let Some(event) = parse_traffic(line) {
            self.handle_event(event);
        }
    }

    /// Apply one event. Events with an unknown address are reported and
    /// dropped without touching any counter.
    pub fn handle_event(&mut self, event: LogEvent) {
        match event {
            LogEvent::Transmit { addr } => match self.lookup(&addr) {
                Some(tx_id) => *self.stats.sent.entry_or_default(tx_id) += 1,
                None => self.stats.dropped_tx += 1,
            },
            LogEvent::Receive { from, to, rssi } => {
                // Look up both sides so each missing address gets reported
                let from_id = self.lookup(&from);
                let to_id = self.lookup(&to);
                match (from_id, to_id) {
                    (Some(from_id), Some(to_id)) => {
                        let link = self.stats.links.entry_or_default(from_id).entry_or_default(to_id);
                        link.received += 1;
                        link.rssi_sum = link.rssi_sum.saturating_add(rssi);
                    }
                    _ => self.stats.dropped_rx += 1,
                }
            }
            _ => {}
        }
    }

    pub fn finish(self) -> ConnectivityStats {
        self.stats
    }

    fn lookup(&self, addr: &ShortAddr) -> Option<NodeId> {
        let id = self.addresses.resolve(addr).cloned();
        if id.is_none() {
            log::warn!("ID not found for address {}", addr);
        }
        id
    }
}

/// Run the aggregation pass over a whole log.
pub fn aggregate_log<R: BufRead>(loader: LogLoader<R>, addresses: &AddressMap) -> Result<ConnectivityStats> {
    let mut aggregator = EventAggregator::new(addresses);
    for line in loader {
        aggregator.handle_line(&line?);
    }

    let stats = aggregator.finish();
    if stats.dropped_tx > 0 || stats.dropped_rx > 0 {
        log::info!(
            "Skipped {} TX and {} RX events with unresolved addresses",
            stats.dropped_tx,
            stats.dropped_rx
        );
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addresses() -> AddressMap {
        [("0a:0b", "5"), ("0c:0d", "7"), ("0e:0f", "9")]
            .into_iter()
            .map(|(addr, id)| (ShortAddr::new(addr), NodeId::new(id)))
            .collect()
    }

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    #[test]
    fn counts_tx_and_rx_per_link() {
        let addresses = addresses();
        let mut agg = EventAggregator::new(&addresses);
        for line in [
            "TX 0a:0b",
            "TX 0a:0b",
            "TX 0a:0b",
            "RX 0a:0b->0c:0d, RSSI = -60dBm",
            "RX 0a:0b->0c:0d, RSSI = -70dBm",
            "RX 0a:0b->0e:0f, RSSI = -81dBm",
            "unrelated line",
        ] {
            agg.handle_line(line);
        }
        let stats = agg.finish();

        assert_eq!(stats.sent(&id("5")), 3);
        assert_eq!(
            stats.link(&id("5"), &id("7")),
            Some(&LinkStats {
                received: 2,
                rssi_sum: -130
            })
        );
        assert_eq!(stats.link(&id("5"), &id("9")).map(|l| l.received), Some(1));
        let receivers: Vec<_> = stats.receivers(&id("5")).map(|(id, _)| id.as_str()).collect();
        assert_eq!(receivers, vec!["7", "9"]);
    }

    #[test]
    fn unknown_addresses_leave_counters_untouched() {
        let addresses = addresses();
        let mut agg = EventAggregator::new(&addresses);
        agg.handle_line("TX ff:ff");
        agg.handle_line("RX 0a:0b->ff:ff, RSSI = -60dBm");
        agg.handle_line("RX ff:ff->0a:0b, RSSI = -60dBm");
        agg.handle_line("RX ee:ee->ff:ff, RSSI = -60dBm");
        let stats = agg.finish();

        assert_eq!(stats.senders().count(), 0);
        assert_eq!(stats.receivers(&id("5")).count(), 0);
        assert_eq!(stats.dropped_tx, 1);
        assert_eq!(stats.dropped_rx, 3);
    }

    #[test]
    fn rssi_sum_saturates() {
        let addresses = addresses();
        let mut agg = EventAggregator::new(&addresses);
        for _ in 0..2 {
            agg.handle_event(LogEvent::Receive {
                from: ShortAddr::new("0a:0b"),
                to: ShortAddr::new("0c:0d"),
                rssi: i64::MIN,
            });
        }
        let stats = agg.finish();
        assert_eq!(stats.link(&id("5"), &id("7")).map(|l| l.rssi_sum), Some(i64::MIN));
    }

    #[test]
    fn average_rssi_of_empty_link_is_zero() {
        assert_eq!(LinkStats::default().average_rssi(), 0.0);
        let link = LinkStats {
            received: 3,
            rssi_sum: -200,
        };
        assert!((link.average_rssi() - (-66.666_666)).abs() < 1e-4);
    }
}
