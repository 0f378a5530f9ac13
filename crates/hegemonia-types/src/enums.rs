//! Enumeration types for the Hegemonia simulation.
//!
//! All closed sets used across the workspace: class roles, edge kinds,
//! territory sectors, policy stances, percolation phases, contradiction
//! classifications, and the event-type set.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Class roles
// ---------------------------------------------------------------------------

/// The structural position a social class occupies in the world system.
///
/// Roles determine subsistence defaults and which systems act on the
/// class each tick. The set is closed: scenario files may name classes
/// freely, but every class maps to exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ClassRole {
    /// Workers in the periphery producing value under direct extraction.
    PeripheryProletariat,
    /// Core workers whose wages exceed the value they produce, funded by
    /// imperial rent.
    LaborAristocracy,
    /// Periphery bourgeoisie administering extraction on behalf of the
    /// core in exchange for subsidies.
    CompradorBourgeoisie,
    /// The beneficiary class at the center of the rent circuit.
    CoreBourgeoisie,
    /// Small proprietors squeezed between capital and labor.
    PettyBourgeoisie,
    /// Smallholders working territory outside the wage relation.
    Peasantry,
    /// Classes expelled from production entirely.
    Lumpen,
}

impl ClassRole {
    /// Role-defaulted subsistence multiplier: the ratio of a class's
    /// reproduction cost to the base subsistence cost.
    pub const fn default_subsistence_multiplier(self) -> f64 {
        match self {
            Self::PeripheryProletariat => 1.5,
            Self::LaborAristocracy => 5.0,
            Self::CompradorBourgeoisie => 10.0,
            Self::CoreBourgeoisie => 20.0,
            Self::PettyBourgeoisie => 3.0,
            Self::Peasantry => 1.2,
            Self::Lumpen => 1.0,
        }
    }

    /// Role-defaulted subsistence threshold: the per-capita wealth level
    /// below which acquiescence starts eroding.
    pub const fn default_subsistence_threshold(self) -> f64 {
        match self {
            Self::PeripheryProletariat | Self::Lumpen => 1.0,
            Self::Peasantry => 1.2,
            Self::PettyBourgeoisie => 2.0,
            Self::LaborAristocracy => 4.0,
            Self::CompradorBourgeoisie => 8.0,
            Self::CoreBourgeoisie => 15.0,
        }
    }

    /// Whether the role lives primarily from extracted value rather than
    /// its own production.
    pub const fn is_beneficiary(self) -> bool {
        matches!(self, Self::CoreBourgeoisie | Self::CompradorBourgeoisie)
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// The kind of a relationship edge between entities.
///
/// Value flows along the edge from source to target. Tenancy edges point
/// from a class to a territory; all other kinds connect two classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EdgeKind {
    /// Surplus extraction from a producing class to a beneficiary.
    Exploitation,
    /// Transfer from periphery administrators into the imperial rent pool.
    Tribute,
    /// Super-wage payments out of the rent pool to a core workforce.
    Wages,
    /// Rent-pool subsidy propping up a client class, optionally capped.
    ClientStateSubsidy,
    /// Consciousness transmission channel between classes.
    Solidarity,
    /// A class working a territory.
    Tenancy,
    /// Coercive pressure applied by one class to another.
    Repression,
}

impl EdgeKind {
    /// Whether this edge kind carries a material value flow each tick.
    pub const fn carries_value(self) -> bool {
        matches!(
            self,
            Self::Exploitation | Self::Tribute | Self::Wages | Self::ClientStateSubsidy
        )
    }
}

// ---------------------------------------------------------------------------
// Territories
// ---------------------------------------------------------------------------

/// The economic sector a territory belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum SectorType {
    /// Food and fiber production.
    Agrarian,
    /// Mining and raw-material extraction.
    Extractive,
    /// Manufacturing.
    Industrial,
    /// Non-material services.
    Services,
}

// ---------------------------------------------------------------------------
// Policy stances
// ---------------------------------------------------------------------------

/// The bourgeois decision heuristic's current posture, recomputed each
/// tick from the rent-pool ratio and average edge tension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PolicyStance {
    /// Pool nearly drained: structural crisis.
    Crisis,
    /// Pool low, tension high: raise repression.
    IronFist,
    /// Pool low, tension manageable: cut super-wages.
    Austerity,
    /// Pool flush, tension low: raise super-wages to buy quiescence.
    Bribery,
    /// No adjustment this tick.
    NoChange,
}

// ---------------------------------------------------------------------------
// Percolation phases
// ---------------------------------------------------------------------------

/// Classification of the solidarity network by its giant-component ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PercolationPhase {
    /// No meaningful connectivity: largest component below the gaseous
    /// ceiling.
    Gaseous,
    /// Clusters forming but no giant component yet.
    Transitional,
    /// A giant component spans the network.
    Liquid,
}

// ---------------------------------------------------------------------------
// Contradictions
// ---------------------------------------------------------------------------

/// Discrete intensity bands for a contradiction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum IntensityLevel {
    /// Intensity value below 0.25.
    Low,
    /// Intensity value in [0.25, 0.5).
    Medium,
    /// Intensity value in [0.5, 0.75).
    High,
    /// Intensity value at or above 0.75.
    Critical,
}

impl IntensityLevel {
    /// Band a continuous intensity value in [0, 1] into a level.
    pub fn from_value(value: f64) -> Self {
        if value >= 0.75 {
            Self::Critical
        } else if value >= 0.5 {
            Self::High
        } else if value >= 0.25 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Lifecycle state of a contradiction.
///
/// Transitions run Latent -> Active -> Escalating -> Resolving and
/// terminate in either Resolved or Transformed. Terminal states are
/// never left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ContradictionState {
    /// Detected but not yet shaping behavior.
    Latent,
    /// Actively shaping the entities involved.
    Active,
    /// Intensity rising toward a rupture.
    Escalating,
    /// A resolution condition has been met; a method is being applied.
    Resolving,
    /// Terminal: resolved through one of its methods.
    Resolved,
    /// Terminal: transformed into a different contradiction.
    Transformed,
}

impl ContradictionState {
    /// Whether this state is terminal.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Transformed)
    }
}

/// Whether a contradiction expresses a universal dynamic of the mode of
/// production or a particular local configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ContradictionScope {
    /// Inherent to the system as such.
    Universal,
    /// Specific to the entities involved.
    Particular,
}

/// Whether the opposed interests admit a non-antagonistic settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Antagonism {
    /// Irreconcilable; resolution changes the structure.
    Antagonistic,
    /// Reconcilable within the existing structure.
    NonAntagonistic,
}

/// Named resolution methods a contradiction may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum ResolutionMethodKind {
    /// Concessions within the existing structure.
    Reform,
    /// Coercive containment; seeds follow-on contradictions.
    Suppression,
    /// Structural overthrow.
    Revolution,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The closed set of event categories the core emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum EventType {
    /// Deaths removed part of a class's population this tick.
    PopulationAttrition,
    /// A class's population reached zero and it was deactivated.
    ClassDied,
    /// A class's consciousness crossed the awakening threshold.
    MassAwakening,
    /// The solidarity network changed percolation phase.
    PhaseTransition,
    /// The bourgeois decision heuristic changed stance.
    PolicyShift,
    /// A new contradiction entered the registry.
    ContradictionDetected,
    /// A contradiction's intensity band rose.
    ContradictionIntensified,
    /// A contradiction reached the Resolved terminal state.
    ContradictionResolved,
    /// A contradiction reached the Transformed terminal state.
    ContradictionTransformed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_match_design_table() {
        assert!((ClassRole::PeripheryProletariat.default_subsistence_multiplier() - 1.5).abs() < 1e-12);
        assert!((ClassRole::LaborAristocracy.default_subsistence_multiplier() - 5.0).abs() < 1e-12);
        assert!((ClassRole::CompradorBourgeoisie.default_subsistence_multiplier() - 10.0).abs() < 1e-12);
        assert!((ClassRole::CoreBourgeoisie.default_subsistence_multiplier() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn intensity_banding_boundaries() {
        assert_eq!(IntensityLevel::from_value(0.0), IntensityLevel::Low);
        assert_eq!(IntensityLevel::from_value(0.25), IntensityLevel::Medium);
        assert_eq!(IntensityLevel::from_value(0.5), IntensityLevel::High);
        assert_eq!(IntensityLevel::from_value(0.75), IntensityLevel::Critical);
        assert_eq!(IntensityLevel::from_value(1.0), IntensityLevel::Critical);
    }

    #[test]
    fn terminal_states() {
        assert!(ContradictionState::Resolved.is_terminal());
        assert!(ContradictionState::Transformed.is_terminal());
        assert!(!ContradictionState::Escalating.is_terminal());
    }

    #[test]
    fn value_carrying_edges() {
        assert!(EdgeKind::Exploitation.carries_value());
        assert!(EdgeKind::Wages.carries_value());
        assert!(!EdgeKind::Solidarity.carries_value());
        assert!(!EdgeKind::Tenancy.carries_value());
    }
}
