//! The closed set of immutable event records the core emits.
//!
//! Every payload is a typed variant rather than loose JSON so events can
//! be diffed, replayed, and filtered without re-parsing. The record's
//! `event_type` is always derived from its payload at construction; the
//! two can never disagree.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    EventType, IntensityLevel, PercolationPhase, PolicyStance, ResolutionMethodKind,
};
use crate::ids::{ClassId, ContradictionId, EventId};

/// Typed payload for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EventDetails {
    /// Deaths removed part of a class's population.
    PopulationAttrition {
        /// The class that suffered attrition.
        class_id: ClassId,
        /// Number of deaths this tick.
        deaths: u64,
        /// Population remaining after the deaths.
        remaining: u64,
        /// The mortality rate applied, in [0, 1].
        rate: f64,
    },
    /// A class's population reached zero; the class is permanently
    /// deactivated.
    ClassDied {
        /// The extinguished class.
        class_id: ClassId,
        /// Cause of death.
        cause: String,
        /// Wealth stranded at extinction.
        stranded_wealth: f64,
    },
    /// Consciousness crossed the awakening threshold from below.
    MassAwakening {
        /// The awakening class.
        class_id: ClassId,
        /// Consciousness after the crossing.
        consciousness: f64,
        /// The threshold crossed.
        threshold: f64,
    },
    /// The solidarity network changed percolation phase.
    PhaseTransition {
        /// Phase before this tick.
        previous: PercolationPhase,
        /// Phase after this tick.
        current: PercolationPhase,
        /// Number of connected components in the solidarity sub-graph.
        component_count: usize,
        /// Largest component size over total nodes.
        largest_component_ratio: f64,
        /// Whether the network is resilient (giant component with strong
        /// average ties).
        resilient: bool,
    },
    /// The bourgeois decision heuristic changed stance.
    PolicyShift {
        /// Stance before this tick.
        previous: PolicyStance,
        /// Stance chosen this tick.
        current: PolicyStance,
        /// Pool ratio the heuristic observed.
        pool_ratio: f64,
        /// Average edge tension the heuristic observed.
        average_tension: f64,
    },
    /// A new contradiction entered the registry.
    ContradictionDetected {
        /// The new contradiction.
        contradiction_id: ContradictionId,
        /// Entity ids of the opposed parties.
        participants: Vec<String>,
        /// Intensity band at detection.
        intensity: IntensityLevel,
    },
    /// A contradiction's intensity band rose.
    ContradictionIntensified {
        /// The intensifying contradiction.
        contradiction_id: ContradictionId,
        /// The new intensity band.
        intensity: IntensityLevel,
        /// The continuous intensity value.
        value: f64,
    },
    /// A contradiction resolved through one of its methods.
    ContradictionResolved {
        /// The resolved contradiction.
        contradiction_id: ContradictionId,
        /// The method applied.
        method: ResolutionMethodKind,
    },
    /// A contradiction transformed; its terminal entry may have seeded a
    /// successor.
    ContradictionTransformed {
        /// The transformed contradiction.
        contradiction_id: ContradictionId,
        /// Successor contradiction seeded by the transformation, if any.
        successor: Option<ContradictionId>,
    },
}

impl EventDetails {
    /// The event category this payload belongs to.
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::PopulationAttrition { .. } => EventType::PopulationAttrition,
            Self::ClassDied { .. } => EventType::ClassDied,
            Self::MassAwakening { .. } => EventType::MassAwakening,
            Self::PhaseTransition { .. } => EventType::PhaseTransition,
            Self::PolicyShift { .. } => EventType::PolicyShift,
            Self::ContradictionDetected { .. } => EventType::ContradictionDetected,
            Self::ContradictionIntensified { .. } => EventType::ContradictionIntensified,
            Self::ContradictionResolved { .. } => EventType::ContradictionResolved,
            Self::ContradictionTransformed { .. } => EventType::ContradictionTransformed,
        }
    }
}

/// An immutable event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Event {
    /// Event identifier, unassigned until the tick driver collects the
    /// event; unique within a run once assigned.
    pub id: EventId,
    /// The tick that produced this event.
    pub tick: u64,
    /// The category of event, derived from the payload.
    pub event_type: EventType,
    /// The typed payload.
    pub details: EventDetails,
}

impl Event {
    /// Create an event for the given tick; the category is derived from
    /// the payload, and the id stays unassigned until the driver stamps
    /// it with the event's emission position.
    pub fn new(tick: u64, details: EventDetails) -> Self {
        Self {
            id: EventId::unassigned(),
            tick,
            event_type: details.event_type(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_derived_from_payload() {
        let event = Event::new(
            7,
            EventDetails::MassAwakening {
                class_id: ClassId::new("workers"),
                consciousness: 0.72,
                threshold: 0.7,
            },
        );
        assert_eq!(event.event_type, EventType::MassAwakening);
        assert_eq!(event.tick, 7);
    }

    #[test]
    fn events_roundtrip_serde() {
        let event = Event::new(
            3,
            EventDetails::PolicyShift {
                previous: PolicyStance::NoChange,
                current: PolicyStance::Austerity,
                pool_ratio: 0.2,
                average_tension: 0.4,
            },
        );
        let json = serde_json::to_string(&event).ok();
        assert!(json.is_some());
        let restored: Result<Event, _> = serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(event));
    }
}
