//! Bounded, newest-first store of received events.
//!
//! The log is the client-side history of the live feed: each arriving
//! event is prepended, so index 0 is always the newest entry. Ordering is
//! purely arrival order -- wire events carry no timestamp, so the store
//! stamps each record with a local received-at instant as presentation
//! metadata only. Growth is bounded: when the log is full the oldest
//! entry is evicted from the tail.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::LogEvent;

/// Default retention bound for an [`EventLog`].
pub const DEFAULT_LOG_CAPACITY: usize = 1024;

/// One stored entry: the wire event plus the local arrival instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When this process received the event. Presentation metadata, not
    /// part of the wire protocol.
    pub received_at: DateTime<Utc>,
    /// The event as received.
    pub event: LogEvent,
}

/// An ordered sequence of received events, newest first.
///
/// Single-producer by convention: exactly one task records into a given
/// log. There is no dedup and no ordering key beyond arrival.
#[derive(Debug, Clone)]
pub struct EventLog {
    records: VecDeque<LogRecord>,
    capacity: usize,
}

impl EventLog {
    /// Create an empty log retaining at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one so the log can always hold
    /// the most recent event.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Prepend an event, evicting the oldest entry if the log is full.
    ///
    /// Returns a clone of the stored record so callers can forward it
    /// without re-reading the log.
    pub fn record(&mut self, event: LogEvent) -> LogRecord {
        let record = LogRecord {
            received_at: Utc::now(),
            event,
        };
        self.records.push_front(record.clone());
        while self.records.len() > self.capacity {
            self.records.pop_back();
        }
        record
    }

    /// Iterate over stored records, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    /// The most recently recorded entry, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&LogRecord> {
        self.records.front()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The retention bound this log was created with.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn record_prepends_newest_first() {
        let mut log = EventLog::new(8);
        log.record(LogEvent::add_replica(1));
        log.record(LogEvent::add_replica(2));

        let regions: Vec<u64> = log
            .iter()
            .map(|r| r.event.add_replica_event.unwrap().region)
            .collect();
        assert_eq!(regions, vec![2, 1]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn latest_is_the_last_recorded() {
        let mut log = EventLog::default();
        log.record(LogEvent::split(5, 6, 7));
        let record = log.record(LogEvent::add_replica(9));
        assert_eq!(log.latest(), Some(&record));
    }

    #[test]
    fn capacity_evicts_oldest_from_tail() {
        let mut log = EventLog::new(3);
        for region in 1..=4 {
            log.record(LogEvent::add_replica(region));
        }

        assert_eq!(log.len(), 3);
        let regions: Vec<u64> = log
            .iter()
            .map(|r| r.event.add_replica_event.unwrap().region)
            .collect();
        assert_eq!(regions, vec![4, 3, 2]);
    }

    #[test]
    fn zero_capacity_keeps_the_newest_event() {
        let mut log = EventLog::new(0);
        log.record(LogEvent::add_replica(1));
        log.record(LogEvent::add_replica(2));
        assert_eq!(log.len(), 1);
        assert_eq!(
            log.latest().unwrap().event.add_replica_event.unwrap().region,
            2
        );
    }

    #[test]
    fn unknown_codes_are_still_recorded() {
        let mut log = EventLog::new(8);
        let odd: LogEvent = serde_json::from_str(r#"{"Code":9}"#).unwrap();
        log.record(odd);
        assert_eq!(log.len(), 1);
        assert!(log.latest().unwrap().event.classify().is_err());
    }
}
