//! Wire model for cluster scheduling events.
//!
//! The placement driver describes each scheduling operation as one JSON
//! object with a numeric `Code` discriminant and exactly one populated
//! payload field, the one matching the code:
//!
//! ```json
//! {"Code":1,"SplitEvent":{"Region":5,"NewRegionA":6,"NewRegionB":7}}
//! ```
//!
//! [`LogEvent`] mirrors that shape verbatim so any frame with a
//! syntactically valid envelope deserializes, even when the code is
//! unrecognized. Classification into the exhaustive [`ClusterEvent`] union
//! is a separate, fallible step: unknown codes and missing payloads become
//! typed [`EventError`]s instead of being silently dropped.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// Payload of a region split: one region divided into two new regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SplitEvent {
    /// The region that was split.
    pub region: u64,
    /// First region produced by the split.
    pub new_region_a: u64,
    /// Second region produced by the split.
    pub new_region_b: u64,
}

/// Payload of a leadership transfer between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LeaderTransferEvent {
    /// The region whose leadership moved.
    pub region: u64,
    /// Node that gave up leadership.
    pub node_from: u64,
    /// Node that took over leadership.
    pub node_to: u64,
}

/// Payload of a replica addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddReplicaEvent {
    /// The region gaining a replica.
    pub region: u64,
}

/// Payload of a replica removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RemoveReplicaEvent {
    /// The region losing a replica.
    pub region: u64,
}

// ---------------------------------------------------------------------------
// Wire envelope
// ---------------------------------------------------------------------------

/// One cluster scheduling event as it crosses the wire.
///
/// Every payload field is optional at this layer; the invariant that the
/// payload matching `code` is present is checked by [`LogEvent::classify`],
/// not by deserialization. Extra or mismatched payloads are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Feed sequence number assigned by the placement driver. Used by the
    /// poller to advance its replay offset; absent on injected test events.
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Numeric event discriminant. See [`EventCode`] for the known values.
    #[serde(rename = "Code")]
    pub code: u64,

    /// Split payload, present when `code` is 1.
    #[serde(rename = "SplitEvent", default, skip_serializing_if = "Option::is_none")]
    pub split_event: Option<SplitEvent>,

    /// Leader transfer payload, present when `code` is 2.
    #[serde(
        rename = "LeaderTransferEvent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub leader_transfer_event: Option<LeaderTransferEvent>,

    /// Add-replica payload, present when `code` is 3.
    #[serde(
        rename = "AddReplicaEvent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub add_replica_event: Option<AddReplicaEvent>,

    /// Remove-replica payload, present when `code` is 4.
    #[serde(
        rename = "RemoveReplicaEvent",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub remove_replica_event: Option<RemoveReplicaEvent>,
}

impl LogEvent {
    /// Build a split event.
    #[must_use]
    pub const fn split(region: u64, new_region_a: u64, new_region_b: u64) -> Self {
        Self {
            id: None,
            code: EventCode::Split.as_u64(),
            split_event: Some(SplitEvent {
                region,
                new_region_a,
                new_region_b,
            }),
            leader_transfer_event: None,
            add_replica_event: None,
            remove_replica_event: None,
        }
    }

    /// Build a leader transfer event.
    #[must_use]
    pub const fn transfer_leader(region: u64, node_from: u64, node_to: u64) -> Self {
        Self {
            id: None,
            code: EventCode::TransferLeader.as_u64(),
            split_event: None,
            leader_transfer_event: Some(LeaderTransferEvent {
                region,
                node_from,
                node_to,
            }),
            add_replica_event: None,
            remove_replica_event: None,
        }
    }

    /// Build an add-replica event.
    #[must_use]
    pub const fn add_replica(region: u64) -> Self {
        Self {
            id: None,
            code: EventCode::AddReplica.as_u64(),
            split_event: None,
            leader_transfer_event: None,
            add_replica_event: Some(AddReplicaEvent { region }),
            remove_replica_event: None,
        }
    }

    /// Build a remove-replica event.
    #[must_use]
    pub const fn remove_replica(region: u64) -> Self {
        Self {
            id: None,
            code: EventCode::RemoveReplica.as_u64(),
            split_event: None,
            leader_transfer_event: None,
            add_replica_event: None,
            remove_replica_event: Some(RemoveReplicaEvent { region }),
        }
    }

    /// Attach a feed sequence number.
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Classify this wire event into the exhaustive [`ClusterEvent`] union.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownCode`] when `code` is outside the known
    /// set, or [`EventError::MissingPayload`] when the payload matching
    /// `code` is absent.
    pub fn classify(&self) -> Result<ClusterEvent, EventError> {
        ClusterEvent::try_from(self)
    }
}

// ---------------------------------------------------------------------------
// Discriminant and exhaustive union
// ---------------------------------------------------------------------------

/// The known values of the wire `Code` discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EventCode {
    /// A region was split into two new regions.
    Split = 1,
    /// Region leadership moved between nodes.
    TransferLeader = 2,
    /// A replica was added to a region.
    AddReplica = 3,
    /// A replica was removed from a region.
    RemoveReplica = 4,
}

impl EventCode {
    /// The numeric wire value of this discriminant.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        match self {
            Self::Split => 1,
            Self::TransferLeader => 2,
            Self::AddReplica => 3,
            Self::RemoveReplica => 4,
        }
    }
}

impl TryFrom<u64> for EventCode {
    type Error = EventError;

    fn try_from(code: u64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Split),
            2 => Ok(Self::TransferLeader),
            3 => Ok(Self::AddReplica),
            4 => Ok(Self::RemoveReplica),
            other => Err(EventError::UnknownCode(other)),
        }
    }
}

/// A fully-validated cluster scheduling event.
///
/// Unlike [`LogEvent`], every variant carries exactly the fields its kind
/// requires, so downstream dispatch is an exhaustive `match` with no
/// unknown-code gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterEvent {
    /// A region was split into two new regions.
    Split {
        /// The region that was split.
        region: u64,
        /// First region produced by the split.
        new_region_a: u64,
        /// Second region produced by the split.
        new_region_b: u64,
    },
    /// Region leadership moved between nodes.
    TransferLeader {
        /// The region whose leadership moved.
        region: u64,
        /// Node that gave up leadership.
        node_from: u64,
        /// Node that took over leadership.
        node_to: u64,
    },
    /// A replica was added to a region.
    AddReplica {
        /// The region gaining a replica.
        region: u64,
    },
    /// A replica was removed from a region.
    RemoveReplica {
        /// The region losing a replica.
        region: u64,
    },
}

impl ClusterEvent {
    /// The wire discriminant for this event kind.
    #[must_use]
    pub const fn code(self) -> EventCode {
        match self {
            Self::Split { .. } => EventCode::Split,
            Self::TransferLeader { .. } => EventCode::TransferLeader,
            Self::AddReplica { .. } => EventCode::AddReplica,
            Self::RemoveReplica { .. } => EventCode::RemoveReplica,
        }
    }

    /// The region this event refers to.
    #[must_use]
    pub const fn region(self) -> u64 {
        match self {
            Self::Split { region, .. }
            | Self::TransferLeader { region, .. }
            | Self::AddReplica { region }
            | Self::RemoveReplica { region } => region,
        }
    }
}

impl TryFrom<&LogEvent> for ClusterEvent {
    type Error = EventError;

    fn try_from(event: &LogEvent) -> Result<Self, Self::Error> {
        let code = EventCode::try_from(event.code)?;
        let missing = || EventError::MissingPayload {
            code: event.code,
            payload: payload_field(code),
        };
        match code {
            EventCode::Split => event
                .split_event
                .map(|p| Self::Split {
                    region: p.region,
                    new_region_a: p.new_region_a,
                    new_region_b: p.new_region_b,
                })
                .ok_or_else(missing),
            EventCode::TransferLeader => event
                .leader_transfer_event
                .map(|p| Self::TransferLeader {
                    region: p.region,
                    node_from: p.node_from,
                    node_to: p.node_to,
                })
                .ok_or_else(missing),
            EventCode::AddReplica => event
                .add_replica_event
                .map(|p| Self::AddReplica { region: p.region })
                .ok_or_else(missing),
            EventCode::RemoveReplica => event
                .remove_replica_event
                .map(|p| Self::RemoveReplica { region: p.region })
                .ok_or_else(missing),
        }
    }
}

impl From<ClusterEvent> for LogEvent {
    fn from(event: ClusterEvent) -> Self {
        match event {
            ClusterEvent::Split {
                region,
                new_region_a,
                new_region_b,
            } => Self::split(region, new_region_a, new_region_b),
            ClusterEvent::TransferLeader {
                region,
                node_from,
                node_to,
            } => Self::transfer_leader(region, node_from, node_to),
            ClusterEvent::AddReplica { region } => Self::add_replica(region),
            ClusterEvent::RemoveReplica { region } => Self::remove_replica(region),
        }
    }
}

/// The wire field name that should carry the payload for a code.
const fn payload_field(code: EventCode) -> &'static str {
    match code {
        EventCode::Split => "SplitEvent",
        EventCode::TransferLeader => "LeaderTransferEvent",
        EventCode::AddReplica => "AddReplicaEvent",
        EventCode::RemoveReplica => "RemoveReplicaEvent",
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Classification failures for wire events.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The `Code` discriminant is outside the known set.
    #[error("unknown event code {0}")]
    UnknownCode(u64),

    /// The payload matching the `Code` discriminant is absent.
    #[error("event code {code} is missing its {payload} payload")]
    MissingPayload {
        /// The discriminant the event carried.
        code: u64,
        /// The wire field that should have held the payload.
        payload: &'static str,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn split_frame_deserializes_and_classifies() {
        let json = r#"{"Code":1,"SplitEvent":{"Region":5,"NewRegionA":6,"NewRegionB":7}}"#;
        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.code, 1);
        assert_eq!(
            event.classify().unwrap(),
            ClusterEvent::Split {
                region: 5,
                new_region_a: 6,
                new_region_b: 7
            }
        );
    }

    #[test]
    fn transfer_frame_deserializes_and_classifies() {
        let json = r#"{"Code":2,"LeaderTransferEvent":{"Region":3,"NodeFrom":1,"NodeTo":2}}"#;
        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.classify().unwrap(),
            ClusterEvent::TransferLeader {
                region: 3,
                node_from: 1,
                node_to: 2
            }
        );
    }

    #[test]
    fn feed_id_round_trips() {
        let event = LogEvent::add_replica(9).with_id(42);
        let json = serde_json::to_string(&event).unwrap();
        let back: LogEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, Some(42));
        assert_eq!(back.classify().unwrap(), ClusterEvent::AddReplica { region: 9 });
    }

    #[test]
    fn unknown_code_is_a_typed_error() {
        let json = r#"{"Code":9,"SplitEvent":{"Region":1,"NewRegionA":2,"NewRegionB":3}}"#;
        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.classify(), Err(EventError::UnknownCode(9)));
    }

    #[test]
    fn code_beyond_byte_range_still_deserializes() {
        // Codes the feed has not taught us about can be arbitrarily large;
        // they must survive deserialization so the raw frame can be kept.
        let json = r#"{"Code":900}"#;
        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.code, 900);
        assert_eq!(event.classify(), Err(EventError::UnknownCode(900)));
    }

    #[test]
    fn missing_payload_is_a_typed_error() {
        let json = r#"{"Code":2}"#;
        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.classify(),
            Err(EventError::MissingPayload {
                code: 2,
                payload: "LeaderTransferEvent"
            })
        );
    }

    #[test]
    fn mismatched_payload_is_ignored() {
        // A stray payload for another code does not affect classification.
        let json = r#"{"Code":3,"AddReplicaEvent":{"Region":8},"SplitEvent":{"Region":1,"NewRegionA":2,"NewRegionB":3}}"#;
        let event: LogEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.classify().unwrap(), ClusterEvent::AddReplica { region: 8 });
    }

    #[test]
    fn wire_round_trip_preserves_shape() {
        let event = LogEvent::transfer_leader(3, 1, 2);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Code": 2,
                "LeaderTransferEvent": {"Region": 3, "NodeFrom": 1, "NodeTo": 2}
            })
        );
    }
}
