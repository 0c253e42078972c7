//! Parse individual log lines and extract structured `LogEvent` data.
//!
//! Supports the following log line formats (matched anywhere in the line, so
//! testbed timestamps and node prefixes are ignored):
//! - Address announcement: `ID:5 5.firefly < b'Rime configured with address 0a:0b'`
//! - Transmission: `TX 0a:0b`
//! - Reception: `RX 0a:0b->0c:0d, RSSI = -60dBm`
//! - Ranging success: `RANGING OK [11:0c->19:15] 169 mm`
//! - Ranging failure: `[12] fail (RX err)` or `[12] fail [190c->1115]`

use regex::{Captures, Regex};
use std::str::FromStr;
use std::sync::LazyLock;

use super::types::{LogEvent, NodeId, RangingFailureReason, ShortAddr};

static ANNOUNCEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r" (?P<node_id>\d+)\.firefly < b'Rime configured with address (?P<addr>\w\w:\w\w)")
        .expect("announcement pattern is valid")
});

static TRANSMIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TX (?P<addr>\w\w:\w\w)").expect("transmit pattern is valid"));

static RECEIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RX (?P<from>\w\w:\w\w)->(?P<to>\w\w:\w\w), RSSI = (?P<rssi>-?\d+)dBm")
        .expect("receive pattern is valid")
});

static RANGING_OK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"RANGING OK \[(?P<init>\w\w:\w\w)->(?P<resp>\w\w:\w\w)\] (?P<dist>\d+) mm")
        .expect("ranging pattern is valid")
});

static RANGING_FAIL_REASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<seqn>\d+)\] fail \((?P<reason>[^)]*)\)").expect("ranging failure pattern is valid")
});

static RANGING_FAIL_ADDR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(?P<seqn>\d+)\] fail \[(?P<src>\w+)->(?P<dst>\w+)\]")
        .expect("ranging mismatch pattern is valid")
});

/// Parse an address announcement line.
///
/// # Returns
///
/// `Some(LogEvent::AddressAnnouncement)` if the line announces a short
/// address, `None` otherwise.
pub fn parse_announcement(line: &str) -> Option<LogEvent> {
    let caps = ANNOUNCEMENT.captures(line)?;
    Some(LogEvent::AddressAnnouncement {
        node_id: NodeId::new(&caps["node_id"]),
        addr: ShortAddr::new(&caps["addr"]),
    })
}

/// Classify a line as transmission or reception.
///
/// Transmission is checked first; a line is only considered a reception if
/// it did not match as a transmission.
pub fn parse_traffic(line: &str) -> Option<LogEvent> {
    if let Some(caps) = TRANSMIT.captures(line) {
        return Some(LogEvent::Transmit {
            addr: ShortAddr::new(&caps["addr"]),
        });
    }

    let caps = RECEIVE.captures(line)?;
    Some(LogEvent::Receive {
        from: ShortAddr::new(&caps["from"]),
        to: ShortAddr::new(&caps["to"]),
        rssi: parse_number(&caps, "rssi", line)?,
    })
}

/// Parse a ranging outcome line (success or failure).
pub fn parse_ranging(line: &str) -> Option<LogEvent> {
    if let Some(caps) = RANGING_OK.captures(line) {
        return Some(LogEvent::RangingOk {
            initiator: ShortAddr::new(&caps["init"]),
            responder: ShortAddr::new(&caps["resp"]),
            distance_mm: parse_number(&caps, "dist", line)?,
        });
    }

    if let Some(caps) = RANGING_FAIL_REASON.captures(line) {
        let reason = match &caps["reason"] {
            "TX err" => RangingFailureReason::TxError,
            "RX err" => RangingFailureReason::RxError,
            "bad size" => RangingFailureReason::BadSize,
            other => RangingFailureReason::Other(other.to_string()),
        };
        return Some(LogEvent::RangingFailure {
            seqn: parse_number(&caps, "seqn", line)?,
            reason,
        });
    }

    let caps = RANGING_FAIL_ADDR.captures(line)?;
    Some(LogEvent::RangingFailure {
        seqn: parse_number(&caps, "seqn", line)?,
        reason: RangingFailureReason::AddressMismatch {
            src: caps["src"].to_string(),
            dst: caps["dst"].to_string(),
        },
    })
}

/// Parse a numeric capture. The patterns only admit digits, so a failure
/// means the value is out of range; the line is reported and skipped.
fn parse_number<T: FromStr>(caps: &Captures<'_>, name: &str, line: &str) -> Option<T> {
    let text = &caps[name];
    match text.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring line with out-of-range {} {}: {}", name, text, line);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_announcement() {
        let line = "1616406331.123 ID:5 5.firefly < b'Rime configured with address 0a:0b'";
        let event = parse_announcement(line).expect("announcement should parse");
        assert_eq!(
            event,
            LogEvent::AddressAnnouncement {
                node_id: NodeId::new("5"),
                addr: ShortAddr::new("0a:0b"),
            }
        );
    }

    #[test]
    fn test_announcement_needs_separated_node_id() {
        assert!(parse_announcement("x5.firefly < b'Rime configured with address 0a:0b'").is_none());
        assert!(parse_announcement("5.firefly < b'Rime configured with address 0a:0b'").is_none());
        assert!(parse_announcement("\t5.firefly < b'Rime configured with address 0a:0b'").is_none());
        assert!(parse_announcement(" 5.firefly < b'Rime configured with address 0a:0b'").is_some());
    }

    #[test]
    fn test_parse_transmit() {
        let line = "2021-03-22 10:00:01 7.firefly < b'TX 0a:0b'";
        assert_eq!(
            parse_traffic(line),
            Some(LogEvent::Transmit {
                addr: ShortAddr::new("0a:0b")
            })
        );
    }

    #[test]
    fn test_parse_receive() {
        let line = "2021-03-22 10:00:01 7.firefly < b'RX 0a:0b->0c:0d, RSSI = -60dBm'";
        assert_eq!(
            parse_traffic(line),
            Some(LogEvent::Receive {
                from: ShortAddr::new("0a:0b"),
                to: ShortAddr::new("0c:0d"),
                rssi: -60,
            })
        );
    }

    #[test]
    fn test_transmit_wins_over_receive() {
        let line = "TX 0a:0b RX 0a:0b->0c:0d, RSSI = -60dBm";
        assert!(matches!(parse_traffic(line), Some(LogEvent::Transmit { .. })));
    }

    #[test]
    fn test_parse_ranging_ok() {
        let line = "[18:00:01.123] RANGING OK [11:0c->19:15] 169 mm";
        assert_eq!(
            parse_ranging(line),
            Some(LogEvent::RangingOk {
                initiator: ShortAddr::new("11:0c"),
                responder: ShortAddr::new("19:15"),
                distance_mm: 169,
            })
        );
    }

    #[test]
    fn test_parse_ranging_failures() {
        assert_eq!(
            parse_ranging("[3] fail (RX err)"),
            Some(LogEvent::RangingFailure {
                seqn: 3,
                reason: RangingFailureReason::RxError
            })
        );
        assert_eq!(
            parse_ranging("[4] fail (TX err)"),
            Some(LogEvent::RangingFailure {
                seqn: 4,
                reason: RangingFailureReason::TxError
            })
        );
        assert_eq!(
            parse_ranging("[9] fail [190c->1115]"),
            Some(LogEvent::RangingFailure {
                seqn: 9,
                reason: RangingFailureReason::AddressMismatch {
                    src: "190c".to_string(),
                    dst: "1115".to_string(),
                },
            })
        );
    }

    #[test]
    fn test_out_of_range_numbers_are_skipped() {
        assert!(parse_traffic("RX 0a:0b->0c:0d, RSSI = -99999999999999999999dBm").is_none());
        assert!(parse_ranging("RANGING OK [11:0c->19:15] 99999999999999999999 mm").is_none());
        assert!(parse_ranging("[99999999999] fail (RX err)").is_none());
    }

    #[test]
    fn test_parse_unparseable_line() {
        let line = "This is not a valid log line";
        assert!(parse_announcement(line).is_none());
        assert!(parse_traffic(line).is_none());
        assert!(parse_ranging(line).is_none());
        assert!(parse_ranging("[1] ranging with 190c ...").is_none());
    }
}
