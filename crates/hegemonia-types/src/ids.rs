//! Type-safe identifier wrappers for simulation entities.
//!
//! World entities (classes, territories, contradictions) are keyed by
//! *stable string ids* chosen at genesis or by detection rules, so that
//! relationships and parent pointers can reference entities by id alone
//! and snapshots stay human-readable. Event records carry a uuid
//! derived from the producing tick and the event's position in that
//! tick's emission order, never from a clock, so identical runs yield
//! identical event logs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around a stable [`String`] id.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
        )]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub String);

        impl $name {
            /// Create an identifier from any string-like value.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// View the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_string_id! {
    /// Unique identifier for a social class.
    ClassId
}

define_string_id! {
    /// Unique identifier for a territory (material node in the world graph).
    TerritoryId
}

define_string_id! {
    /// Unique identifier for a tracked contradiction.
    ContradictionId
}

/// Unique identifier for an event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventId(pub Uuid);

impl EventId {
    /// Identifier of a not-yet-emitted event; the tick driver assigns
    /// the final id when it collects the tick's events.
    pub const fn unassigned() -> Self {
        Self(Uuid::nil())
    }

    /// Deterministic identifier from the producing tick and the event's
    /// position in that tick's emission order.
    pub const fn for_tick(tick: u64, position: u64) -> Self {
        Self(Uuid::from_u64_pair(tick, position))
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl core::fmt::Display for EventId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_roundtrip_serde() {
        let original = ClassId::new("periphery-proletariat");
        let json = serde_json::to_string(&original).ok();
        assert!(json.is_some());
        let restored: Result<ClassId, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(original));
    }

    #[test]
    fn string_id_display_is_transparent() {
        let id = TerritoryId::new("cobalt-belt");
        assert_eq!(id.to_string(), "cobalt-belt");
        assert_eq!(id.as_str(), "cobalt-belt");
    }

    #[test]
    fn event_ids_are_a_pure_function_of_tick_and_position() {
        assert_eq!(EventId::for_tick(3, 1), EventId::for_tick(3, 1));
        assert_ne!(EventId::for_tick(3, 1), EventId::for_tick(3, 2));
        assert_ne!(EventId::for_tick(3, 1), EventId::for_tick(4, 1));
        assert_ne!(EventId::for_tick(3, 1), EventId::unassigned());
    }
}
