//! Operation registry: which Faz handler serves each event type.

use caw_proto::EventType;

/// Handler names known to the Faz service, one per event type.
const HANDLERS: &[(EventType, &str)] = &[
    (EventType::RegisterUser, "RegisterUser"),
    (EventType::Follow, "Follow"),
    (EventType::Profile, "Profile"),
    (EventType::Post, "Caw"),
    (EventType::Read, "Read"),
];

/// Immutable table of `(event type, handler name)` pairs.
///
/// Only used to drive hook and unhook registration; per-call dispatch goes
/// through the event type alone.
#[derive(Debug, Clone, Copy)]
pub struct OperationRegistry {
    entries: &'static [(EventType, &'static str)],
}

impl OperationRegistry {
    /// The Caw registry.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: HANDLERS }
    }

    /// Every registered pair.
    #[must_use]
    pub const fn entries(&self) -> &'static [(EventType, &'static str)] {
        self.entries
    }

    /// Handler name bound to `event`.
    #[must_use]
    pub fn handler_name(&self, event: EventType) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(e, _)| *e == event)
            .map(|(_, name)| *name)
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry has no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for OperationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_event_type_has_exactly_one_handler() {
        let registry = OperationRegistry::new();
        assert_eq!(registry.len(), EventType::ALL.len());

        let events: HashSet<EventType> = registry.entries().iter().map(|(e, _)| *e).collect();
        assert_eq!(events.len(), registry.len());
        for event in EventType::ALL {
            assert!(registry.handler_name(event).is_some(), "{event} has no handler");
        }
    }

    #[test]
    fn post_is_served_by_caw_handler() {
        let registry = OperationRegistry::new();
        assert_eq!(registry.handler_name(EventType::Post), Some("Caw"));
        assert_eq!(registry.handler_name(EventType::RegisterUser), Some("RegisterUser"));
    }

    #[test]
    fn handler_names_are_distinct() {
        let registry = OperationRegistry::default();
        let names: HashSet<&str> = registry.entries().iter().map(|(_, n)| *n).collect();
        assert_eq!(names.len(), registry.len());
        assert!(!registry.is_empty());
    }
}
