//! First pass: map Rime short addresses to testbed node identifiers.

use std::collections::HashMap;
use std::io::BufRead;

use crate::analyzer::log_parser::parse_announcement;
use crate::analyzer::{LogEvent, LogLoader, NodeId, ShortAddr};
use crate::error::Result;

/// Short address to node identifier mapping built from announcement lines.
#[derive(Debug, Default, Clone)]
pub struct AddressMap {
    ids: HashMap<ShortAddr, NodeId>,
}

impl AddressMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a whole log and collect every address announcement.
    ///
    /// Later announcements for the same address overwrite earlier ones, since
    /// addresses can be reassigned when a node is reflashed mid-experiment.
    pub fn from_log<R: BufRead>(loader: LogLoader<R>) -> Result<Self> {
        let mut map = AddressMap::new();
        for line in loader {
            if let Some(LogEvent::AddressAnnouncement { node_id, addr }) = parse_announcement(&line?) {
                map.insert(addr, node_id);
            }
        }
        log::debug!("Resolved {} short addresses", map.len());
        Ok(map)
    }

    pub fn insert(&mut self, addr: ShortAddr, node_id: NodeId) {
        if let Some(previous) = self.ids.insert(addr.clone(), node_id.clone()) {
            if previous != node_id {
                log::debug!("Address {} moved from node {} to node {}", addr, previous, node_id);
            }
        }
    }

    pub fn resolve(&self, addr: &ShortAddr) -> Option<&NodeId> {
        self.ids.get(addr)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<(ShortAddr, NodeId)> for AddressMap {
    fn from_iter<T: IntoIterator<Item = (ShortAddr, NodeId)>>(iter: T) -> Self {
        let mut map = AddressMap::new();
        for (addr, node_id) in iter {
            map.insert(addr, node_id);
        }
        map
    }
}
