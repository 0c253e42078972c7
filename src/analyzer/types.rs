//! Type definitions specific to the analyzer module.

use serde::Serialize;
use std::fmt;

/// Stable testbed-assigned label of a physical device (e.g. `5`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps width/alignment flags working in report columns
        f.pad(&self.0)
    }
}

/// Radio-layer short address as printed by the firmware (e.g. `0a:0b`).
///
/// The same address may be reassigned between sessions, so it is only ever
/// used as a key into an address map and never as a node identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShortAddr(pub String);

impl ShortAddr {
    pub fn new(addr: impl Into<String>) -> Self {
        ShortAddr(addr.into())
    }

    /// Derive the short address from a long device identifier by keeping its
    /// last five characters (`00:00:00:00:00:00:11:0c` -> `11:0c`).
    pub fn from_device_id(device_id: &str) -> Self {
        let count = device_id.chars().count();
        ShortAddr(device_id.chars().skip(count.saturating_sub(5)).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Directed node pair, transmitter first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub from: NodeId,
    pub to: NodeId,
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// Why a ranging round failed on the initiator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RangingFailureReason {
    /// `fail (TX err)` - the init message could not be sent.
    TxError,
    /// `fail (RX err)` - no response arrived before the timeout.
    RxError,
    /// `fail (bad size)` - the response had an unexpected length.
    BadSize,
    /// `fail [src->dst]` - the response came from or went to someone else.
    AddressMismatch { src: String, dst: String },
    /// Any other parenthesised reason.
    Other(String),
}

impl RangingFailureReason {
    /// Short label used when grouping failures in a summary.
    pub fn label(&self) -> &str {
        match self {
            RangingFailureReason::TxError => "TX err",
            RangingFailureReason::RxError => "RX err",
            RangingFailureReason::BadSize => "bad size",
            RangingFailureReason::AddressMismatch { .. } => "address mismatch",
            RangingFailureReason::Other(reason) => reason,
        }
    }
}

/// Parsed log line variants.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    /// Node announced the short address it was configured with.
    AddressAnnouncement { node_id: NodeId, addr: ShortAddr },
    /// Packet transmitted (broadcast) by `addr`.
    Transmit { addr: ShortAddr },
    /// Packet from `from` received by `to` with the given RSSI.
    Receive { from: ShortAddr, to: ShortAddr, rssi: i64 },
    /// Successful two-way ranging round.
    RangingOk {
        initiator: ShortAddr,
        responder: ShortAddr,
        distance_mm: u64,
    },
    /// Failed two-way ranging round.
    RangingFailure { seqn: u32, reason: RangingFailureReason },
}
