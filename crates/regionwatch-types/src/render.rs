//! Pure render dispatch from events to display fragments.
//!
//! Both display surfaces -- the server's HTML list and the viewer's
//! terminal stream -- show one line per event: a leading icon keyed by
//! the event kind plus a formatted headline. Everything here is a pure
//! function of the event, so rendering the same stored sequence twice
//! produces identical output.

use crate::event::{ClusterEvent, LogEvent};

/// Format the one-line headline for a cluster event.
#[must_use]
pub fn headline(event: ClusterEvent) -> String {
    match event {
        ClusterEvent::Split {
            region,
            new_region_a,
            new_region_b,
        } => format!("Split Region{region} into Region{new_region_a} and Region{new_region_b}"),
        ClusterEvent::TransferLeader {
            region,
            node_from,
            node_to,
        } => format!("Transfer leadership of Region{region} from Node{node_from} to Node{node_to}"),
        ClusterEvent::AddReplica { region } => format!("Add Replica for Region{region}"),
        ClusterEvent::RemoveReplica { region } => format!("Remove Replica for Region{region}"),
    }
}

/// Font Awesome icon classes for the HTML surface.
#[must_use]
pub const fn icon_class(event: ClusterEvent) -> &'static str {
    match event {
        ClusterEvent::Split { .. } => "fa-scissors",
        ClusterEvent::TransferLeader { .. } => "fa-exchange",
        ClusterEvent::AddReplica { .. } => "fa-refresh fa-spin",
        ClusterEvent::RemoveReplica { .. } => "fa-trash",
    }
}

/// Single-glyph icon for the terminal surface.
#[must_use]
pub const fn glyph(event: ClusterEvent) -> &'static str {
    match event {
        ClusterEvent::Split { .. } => "✂",
        ClusterEvent::TransferLeader { .. } => "⇄",
        ClusterEvent::AddReplica { .. } => "↻",
        ClusterEvent::RemoveReplica { .. } => "✕",
    }
}

/// Render a wire event to its headline, or `None` when the event does
/// not classify (unknown code or missing payload).
///
/// Unrenderable events stay in the log; the caller decides whether the
/// classification failure is worth surfacing.
#[must_use]
pub fn render(event: &LogEvent) -> Option<String> {
    event.classify().ok().map(headline)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn split_headline_substitutes_fields_verbatim() {
        let event = LogEvent::split(5, 6, 7);
        assert_eq!(
            render(&event).unwrap(),
            "Split Region5 into Region6 and Region7"
        );
    }

    #[test]
    fn transfer_headline_substitutes_fields_verbatim() {
        let event = LogEvent::transfer_leader(3, 1, 2);
        assert_eq!(
            render(&event).unwrap(),
            "Transfer leadership of Region3 from Node1 to Node2"
        );
    }

    #[test]
    fn replica_headlines() {
        assert_eq!(
            render(&LogEvent::add_replica(4)).unwrap(),
            "Add Replica for Region4"
        );
        assert_eq!(
            render(&LogEvent::remove_replica(4)).unwrap(),
            "Remove Replica for Region4"
        );
    }

    #[test]
    fn unknown_code_renders_nothing() {
        let event: LogEvent = serde_json::from_str(r#"{"Code":7}"#).unwrap();
        assert_eq!(render(&event), None);
    }

    #[test]
    fn render_is_idempotent() {
        let event = LogEvent::split(10, 11, 12);
        assert_eq!(render(&event), render(&event));
    }

    #[test]
    fn every_kind_has_an_icon() {
        let events = [
            LogEvent::split(1, 2, 3),
            LogEvent::transfer_leader(1, 2, 3),
            LogEvent::add_replica(1),
            LogEvent::remove_replica(1),
        ];
        let classes: Vec<&str> = events
            .iter()
            .map(|e| icon_class(e.classify().unwrap()))
            .collect();
        assert_eq!(
            classes,
            vec!["fa-scissors", "fa-exchange", "fa-refresh fa-spin", "fa-trash"]
        );
        for event in &events {
            assert!(!glyph(event.classify().unwrap()).is_empty());
        }
    }
}
