//! The contradiction data model.
//!
//! A contradiction is a structured, stateful conflict between entities.
//! Its intensity is recomputed each tick from a named world metric, its
//! transformation conditions are tagged variants evaluated by a small
//! interpreter (never closures, so they serialize, diff, and replay), and
//! the principal/child hierarchy is an index-based parent pointer into
//! the registry rather than a live reference.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{
    Antagonism, ContradictionScope, ContradictionState, EdgeKind, IntensityLevel,
    PercolationPhase, ResolutionMethodKind,
};
use crate::ids::{ClassId, ContradictionId};

/// The world metric a contradiction's intensity tracks.
///
/// The engine evaluates the metric against the current snapshot each
/// tick; the result (in [0, 1]) becomes the contradiction's continuous
/// intensity value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum IntensityMetric {
    /// Mean tension across exploitation edges.
    MeanExploitationTension,
    /// Depletion of the imperial rent pool: `1 - pool_ratio`.
    RentPoolDepletion,
    /// Erosion of the super-wage rate relative to a recorded baseline:
    /// `max(0, 1 - current_rate / baseline_rate)`.
    WageErosion {
        /// The super-wage rate when the contradiction was detected.
        baseline_rate: f64,
    },
}

/// A named resolution method with its effect list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResolutionMethod {
    /// Which method this is.
    pub kind: ResolutionMethodKind,
    /// Effects applied to targets when the method is selected.
    pub effects: Vec<Effect>,
}

/// A state mutation applied when a resolution method fires.
///
/// Targets are referenced by id; a missing target is logged and skipped,
/// never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Effect {
    /// Move a fraction of one class's wealth to another.
    TransferWealth {
        /// Class losing wealth.
        from: ClassId,
        /// Class gaining wealth.
        to: ClassId,
        /// Fraction of the source's wealth, in [0, 1].
        fraction: f64,
    },
    /// Add (or with a negative amount, remove) wealth, floored at zero.
    AdjustWealth {
        /// Target class.
        class: ClassId,
        /// Signed wealth delta.
        amount: f64,
    },
    /// Shift a class's consciousness, clamped to [0, 1].
    ShiftConsciousness {
        /// Target class.
        class: ClassId,
        /// Signed consciousness delta.
        delta: f64,
    },
    /// Shift a class's organizational capacity, clamped to [0, 1].
    AdjustOrganization {
        /// Target class.
        class: ClassId,
        /// Signed organization delta.
        delta: f64,
    },
    /// Shift the repression a class faces, clamped to [0, 1].
    AdjustRepressionFaced {
        /// Target class.
        class: ClassId,
        /// Signed repression delta.
        delta: f64,
    },
    /// Shift the global super-wage rate, floored at zero.
    AdjustWageRate {
        /// Signed rate delta.
        delta: f64,
    },
    /// Shift the system-wide repression level, clamped to [0, 1].
    AdjustRepressionLevel {
        /// Signed level delta.
        delta: f64,
    },
    /// Vent accumulated tension on all edges of a kind.
    ReleaseTension {
        /// Which edges to vent.
        kind: EdgeKind,
        /// Tension removed from each edge, floored at zero.
        amount: f64,
    },
}

/// A named predicate over the world snapshot.
///
/// Transformation fires when *all* of a contradiction's conditions hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum TransformCondition {
    /// A class's consciousness is strictly above a bound.
    ConsciousnessAbove {
        /// The class observed.
        class: ClassId,
        /// The exclusive lower bound.
        bound: f64,
    },
    /// Mean tension on edges of a kind is strictly above a bound.
    TensionAbove {
        /// Which edges are averaged.
        kind: EdgeKind,
        /// The exclusive lower bound.
        bound: f64,
    },
    /// The rent-pool ratio is strictly below a bound.
    PoolRatioBelow {
        /// The exclusive upper bound.
        bound: f64,
    },
    /// The solidarity network has reached a phase.
    PhaseReached {
        /// The phase required.
        phase: PercolationPhase,
    },
}

/// A tracked contradiction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Contradiction {
    /// Stable string identifier, unique among non-terminal entries.
    pub id: ContradictionId,
    /// Entity ids of the opposed parties.
    pub participants: Vec<String>,
    /// Universal or particular.
    pub scope: ContradictionScope,
    /// Antagonistic or reconcilable.
    pub antagonism: Antagonism,
    /// The metric driving intensity.
    pub metric: IntensityMetric,
    /// Continuous intensity in [0, 1], recomputed each tick.
    pub intensity_value: f64,
    /// Discrete intensity band derived from the value.
    pub intensity: IntensityLevel,
    /// Lifecycle state.
    pub state: ContradictionState,
    /// Intensity value at or below which the contradiction resolves.
    pub resolution_bound: f64,
    /// Resolution methods on offer, in preference order.
    pub methods: Vec<ResolutionMethod>,
    /// Conjunction of predicates that transforms the contradiction.
    pub transform_conditions: Vec<TransformCondition>,
    /// Principal contradiction this one descends from, if any.
    pub parent: Option<ContradictionId>,
    /// Tick at which detection created this entry.
    pub detected_at_tick: u64,
    /// Ticks spent in the current state.
    pub ticks_in_state: u64,
}

impl Contradiction {
    /// Create a latent contradiction at the given tick.
    pub fn new(
        id: impl Into<ContradictionId>,
        participants: Vec<String>,
        scope: ContradictionScope,
        antagonism: Antagonism,
        metric: IntensityMetric,
        detected_at_tick: u64,
    ) -> Self {
        Self {
            id: id.into(),
            participants,
            scope,
            antagonism,
            metric,
            intensity_value: 0.0,
            intensity: IntensityLevel::Low,
            state: ContradictionState::Latent,
            resolution_bound: 0.1,
            methods: Vec::new(),
            transform_conditions: Vec::new(),
            parent: None,
            detected_at_tick,
            ticks_in_state: 0,
        }
    }

    /// Set the resolution bound (builder-style).
    #[must_use]
    pub const fn with_resolution_bound(mut self, bound: f64) -> Self {
        self.resolution_bound = bound;
        self
    }

    /// Add a resolution method (builder-style).
    #[must_use]
    pub fn with_method(mut self, method: ResolutionMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a transformation condition (builder-style).
    #[must_use]
    pub fn with_transform_condition(mut self, condition: TransformCondition) -> Self {
        self.transform_conditions.push(condition);
        self
    }

    /// Set the parent pointer (builder-style).
    #[must_use]
    pub fn with_parent(mut self, parent: ContradictionId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Move to a new lifecycle state, resetting the state-age counter.
    /// Terminal states are never left; a transition out of one is ignored.
    pub fn transition_to(&mut self, state: ContradictionState) {
        if self.state.is_terminal() {
            return;
        }
        if self.state != state {
            self.state = state;
            self.ticks_in_state = 0;
        }
    }

    /// Update the intensity value and its derived band, clamping into
    /// [0, 1]. Returns true when the band rose.
    pub fn update_intensity(&mut self, value: f64) -> bool {
        let previous = self.intensity;
        self.intensity_value = value.clamp(0.0, 1.0);
        self.intensity = IntensityLevel::from_value(self.intensity_value);
        self.intensity > previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capital_labor() -> Contradiction {
        Contradiction::new(
            "capital-labor",
            vec!["workers".into(), "owners".into()],
            ContradictionScope::Universal,
            Antagonism::Antagonistic,
            IntensityMetric::MeanExploitationTension,
            0,
        )
    }

    #[test]
    fn new_contradictions_start_latent() {
        let c = capital_labor();
        assert_eq!(c.state, ContradictionState::Latent);
        assert_eq!(c.intensity, IntensityLevel::Low);
    }

    #[test]
    fn terminal_states_are_sticky() {
        let mut c = capital_labor();
        c.transition_to(ContradictionState::Active);
        c.transition_to(ContradictionState::Resolved);
        c.transition_to(ContradictionState::Active);
        assert_eq!(c.state, ContradictionState::Resolved);
    }

    #[test]
    fn intensity_update_reports_band_rise() {
        let mut c = capital_labor();
        assert!(c.update_intensity(0.6));
        assert_eq!(c.intensity, IntensityLevel::High);
        assert!(!c.update_intensity(0.55));
        assert!(c.update_intensity(0.8));
        assert_eq!(c.intensity, IntensityLevel::Critical);
    }

    #[test]
    fn intensity_value_is_clamped() {
        let mut c = capital_labor();
        let _ = c.update_intensity(3.0);
        assert!((c.intensity_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn state_change_resets_state_age() {
        let mut c = capital_labor();
        c.ticks_in_state = 12;
        c.transition_to(ContradictionState::Active);
        assert_eq!(c.ticks_in_state, 0);
    }
}
