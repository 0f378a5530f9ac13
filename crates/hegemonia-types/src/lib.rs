//! Shared type definitions for the Hegemonia simulation core.
//!
//! This crate is the single source of truth for all types used across the
//! Hegemonia workspace. Types defined here flow to the external dashboard
//! boundary via `ts-rs` bindings.
//!
//! # Modules
//!
//! - [`ids`] -- Stable string ids for world entities, deterministic event ids
//! - [`enums`] -- Closed sets (roles, edge kinds, stances, phases, events)
//! - [`ideology`] -- Two-component ideology profile and legacy scalar
//! - [`structs`] -- Entity structs and the per-tick world snapshot
//! - [`contradiction`] -- Contradiction data model (metrics, methods,
//!   effects, tagged transform conditions)
//! - [`events`] -- The closed immutable event-record set

pub mod contradiction;
pub mod enums;
pub mod events;
pub mod ideology;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use contradiction::{
    Contradiction, Effect, IntensityMetric, ResolutionMethod, TransformCondition,
};
pub use enums::{
    Antagonism, ClassRole, ContradictionScope, ContradictionState, EdgeKind, EventType,
    IntensityLevel, PercolationPhase, PolicyStance, ResolutionMethodKind, SectorType,
};
pub use events::{Event, EventDetails};
pub use ideology::Ideology;
pub use ids::{ClassId, ContradictionId, EventId, TerritoryId};
pub use structs::{
    GlobalEconomy, Relationship, SocialClass, StateError, Territory, WorldState,
};
