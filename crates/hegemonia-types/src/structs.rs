//! Core entity structs: social classes, relationships, territories, the
//! global economy, and the per-tick world snapshot.
//!
//! Field ownership follows the one-writer rule: each tick, every field is
//! mutated by exactly one system. Cross-entity reads always use the
//! prior-tick value, which the systems snapshot before writing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::contradiction::Contradiction;
use crate::enums::{ClassRole, EdgeKind, PercolationPhase, PolicyStance, SectorType};
use crate::events::Event;
use crate::ideology::Ideology;
use crate::ids::{ClassId, ContradictionId, TerritoryId};

/// Errors raised when a snapshot violates its documented invariants.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// A class carries negative wealth.
    #[error("class {class_id} has negative wealth {wealth}")]
    NegativeWealth {
        /// The offending class.
        class_id: ClassId,
        /// The observed wealth.
        wealth: f64,
    },

    /// A bounded attribute left [0, 1].
    #[error("class {class_id} attribute {attribute} out of [0,1]: {value}")]
    OutOfBounds {
        /// The offending class.
        class_id: ClassId,
        /// Name of the bounded attribute.
        attribute: &'static str,
        /// The observed value.
        value: f64,
    },

    /// A relationship endpoint references no known entity.
    #[error("relationship {kind:?} references unknown entity {entity}")]
    DanglingEndpoint {
        /// Edge kind of the offending relationship.
        kind: EdgeKind,
        /// The unknown endpoint id.
        entity: String,
    },
}

// ---------------------------------------------------------------------------
// SocialClass
// ---------------------------------------------------------------------------

/// A social class: the atomic political-economic actor.
///
/// Wealth and population are never negative; bounded attributes stay in
/// [0, 1]. A class whose population reaches zero is deactivated
/// permanently by the vitality system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct SocialClass {
    /// Stable string identifier.
    pub id: ClassId,
    /// Structural role in the world system.
    pub role: ClassRole,
    /// Accumulated wealth. Owned by the subsistence system; production
    /// adds to it before extraction reads it.
    pub wealth: f64,
    /// Headcount. Owned by the vitality system.
    pub population: u64,
    /// Two-component ideology profile. Owned by the solidarity system.
    pub ideology: Ideology,
    /// Organizational capacity in [0, 1].
    pub organization: f64,
    /// Repression this class faces, in [0, 1].
    pub repression_faced: f64,
    /// Per-capita wealth level at which acquiescence sits at 0.5.
    pub subsistence_threshold: f64,
    /// Multiplier on the base per-tick subsistence cost.
    pub subsistence_multiplier: f64,
    /// Derived probability the class acquiesces, in [0, 1].
    pub p_acquiescence: f64,
    /// Derived probability the class revolts, in [0, 1].
    pub p_revolution: f64,
    /// Whether the class still participates in the simulation.
    pub active: bool,
    /// Value produced last production pass; the wage base the extraction
    /// system reads on the following tick.
    pub value_produced: f64,
    /// Wage income received this tick (super-wages and subsidies).
    pub wage_income: f64,
    /// Wage income received the previous tick; the baseline for the
    /// loss-aversion agitation term.
    pub previous_wage_income: f64,
}

impl SocialClass {
    /// Create a class with role-defaulted subsistence parameters and a
    /// neutral ideology.
    pub fn new(id: impl Into<ClassId>, role: ClassRole, wealth: f64, population: u64) -> Self {
        Self {
            id: id.into(),
            role,
            wealth: wealth.max(0.0),
            population,
            ideology: Ideology::neutral(),
            organization: 0.1,
            repression_faced: 0.0,
            subsistence_threshold: role.default_subsistence_threshold(),
            subsistence_multiplier: role.default_subsistence_multiplier(),
            p_acquiescence: 0.5,
            p_revolution: 0.0,
            active: true,
            value_produced: 0.0,
            wage_income: 0.0,
            previous_wage_income: 0.0,
        }
    }

    /// Set the ideology profile (builder-style, used at genesis).
    #[must_use]
    pub const fn with_ideology(mut self, ideology: Ideology) -> Self {
        self.ideology = ideology;
        self
    }

    /// Override the subsistence multiplier (builder-style).
    #[must_use]
    pub const fn with_subsistence_multiplier(mut self, multiplier: f64) -> Self {
        self.subsistence_multiplier = multiplier;
        self
    }

    /// Override organizational capacity (builder-style, clamped).
    #[must_use]
    pub fn with_organization(mut self, organization: f64) -> Self {
        self.organization = organization.clamp(0.0, 1.0);
        self
    }

    /// Wealth per head, or 0 for an empty class.
    pub fn wealth_per_capita(&self) -> f64 {
        if self.population == 0 {
            0.0
        } else {
            self.wealth / self.population as f64
        }
    }

    /// Per-capita subsistence needs at the given base cost.
    pub fn per_capita_needs(&self, base_cost: f64) -> f64 {
        base_cost * self.subsistence_multiplier
    }

    /// Deduct up to `amount` from wealth, flooring at zero. Returns the
    /// amount actually deducted.
    pub fn deduct_wealth(&mut self, amount: f64) -> f64 {
        let taken = amount.max(0.0).min(self.wealth);
        self.wealth -= taken;
        taken
    }

    /// Add to wealth (negative amounts are ignored).
    pub fn credit_wealth(&mut self, amount: f64) {
        if amount > 0.0 {
            self.wealth += amount;
        }
    }

    /// Validate the class's bounded-field invariants.
    pub fn validate(&self) -> Result<(), StateError> {
        if self.wealth < 0.0 {
            return Err(StateError::NegativeWealth {
                class_id: self.id.clone(),
                wealth: self.wealth,
            });
        }
        for (attribute, value) in [
            ("class_consciousness", self.ideology.class_consciousness),
            ("national_identity", self.ideology.national_identity),
            ("organization", self.organization),
            ("repression_faced", self.repression_faced),
            ("p_acquiescence", self.p_acquiescence),
            ("p_revolution", self.p_revolution),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StateError::OutOfBounds {
                    class_id: self.id.clone(),
                    attribute,
                    value,
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Relationship
// ---------------------------------------------------------------------------

/// A directed edge between two entities.
///
/// Value flows from source to target. Endpoints are stable string ids:
/// classes for most kinds, a territory target for tenancy edges. Edges
/// are created at genesis or by systems and never silently removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Relationship {
    /// Source entity id.
    pub source_id: String,
    /// Target entity id.
    pub target_id: String,
    /// What the edge carries.
    pub kind: EdgeKind,
    /// Value transferred along the edge this tick. Never negative.
    pub value_flow: f64,
    /// Accumulated antagonism on the edge, in [0, 1].
    pub tension: f64,
    /// Transmission strength for solidarity edges, in [0, 1].
    pub solidarity_strength: f64,
    /// Optional per-tick cap on subsidy flows.
    pub subsidy_cap: Option<f64>,
}

impl Relationship {
    /// Create an edge with zeroed flow, tension, and strength.
    pub fn new(kind: EdgeKind, source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            kind,
            value_flow: 0.0,
            tension: 0.0,
            solidarity_strength: 0.0,
            subsidy_cap: None,
        }
    }

    /// Set the solidarity transmission strength (builder-style, clamped).
    #[must_use]
    pub fn with_solidarity_strength(mut self, strength: f64) -> Self {
        self.solidarity_strength = strength.clamp(0.0, 1.0);
        self
    }

    /// Set the subsidy cap (builder-style).
    #[must_use]
    pub const fn with_subsidy_cap(mut self, cap: f64) -> Self {
        self.subsidy_cap = Some(cap);
        self
    }

    /// Accrue tension, saturating into [0, 1].
    pub fn accrue_tension(&mut self, delta: f64) {
        self.tension = (self.tension + delta).clamp(0.0, 1.0);
    }
}

// ---------------------------------------------------------------------------
// Territory
// ---------------------------------------------------------------------------

/// A material territory worked by tenant classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Territory {
    /// Stable string identifier.
    pub id: TerritoryId,
    /// Economic sector.
    pub sector: SectorType,
    /// Current biological capacity, in [0, max_biocapacity].
    pub biocapacity: f64,
    /// Ceiling on biocapacity.
    pub max_biocapacity: f64,
    /// Fraction of max capacity regenerated per tick.
    pub regeneration_rate: f64,
    /// Extraction load this tick, recomputed from active tenants and
    /// capped at 1.0. Owned by the production system.
    pub extraction_intensity: f64,
}

impl Territory {
    /// Create a territory at full biocapacity.
    pub fn new(
        id: impl Into<TerritoryId>,
        sector: SectorType,
        max_biocapacity: f64,
        regeneration_rate: f64,
    ) -> Self {
        let max = max_biocapacity.max(0.0);
        Self {
            id: id.into(),
            sector,
            biocapacity: max,
            max_biocapacity: max,
            regeneration_rate,
            extraction_intensity: 0.0,
        }
    }

    /// Current biocapacity as a fraction of the maximum, or 0 for a
    /// degenerate territory.
    pub fn biocapacity_ratio(&self) -> f64 {
        if self.max_biocapacity <= 0.0 {
            0.0
        } else {
            self.biocapacity / self.max_biocapacity
        }
    }
}

// ---------------------------------------------------------------------------
// GlobalEconomy
// ---------------------------------------------------------------------------

/// World-level economic aggregates. One per [`WorldState`], threaded
/// through every system call; never a process-wide singleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GlobalEconomy {
    /// Pooled imperial rent available for super-wages and subsidies.
    pub imperial_rent_pool: f64,
    /// The pool's genesis level; denominator of the decision heuristic's
    /// pool ratio.
    pub initial_rent_pool: f64,
    /// Current super-wage rate paid per labor-aristocrat head.
    pub current_super_wage_rate: f64,
    /// System-wide repression level, in [0, 1].
    pub current_repression_level: f64,
}

impl GlobalEconomy {
    /// Create an economy with the pool at its genesis level.
    pub fn new(initial_rent_pool: f64, super_wage_rate: f64) -> Self {
        let pool = initial_rent_pool.max(0.0);
        Self {
            imperial_rent_pool: pool,
            initial_rent_pool: pool,
            current_super_wage_rate: super_wage_rate.max(0.0),
            current_repression_level: 0.0,
        }
    }

    /// Pool level as a fraction of genesis, or 0 for a zero-seed pool.
    pub fn pool_ratio(&self) -> f64 {
        if self.initial_rent_pool <= 0.0 {
            0.0
        } else {
            self.imperial_rent_pool / self.initial_rent_pool
        }
    }

    /// Withdraw up to `amount` from the pool; returns the amount
    /// actually withdrawn.
    pub fn withdraw(&mut self, amount: f64) -> f64 {
        let taken = amount.max(0.0).min(self.imperial_rent_pool);
        self.imperial_rent_pool -= taken;
        taken
    }

    /// Deposit into the pool (negative amounts are ignored).
    pub fn deposit(&mut self, amount: f64) {
        if amount > 0.0 {
            self.imperial_rent_pool += amount;
        }
    }
}

// ---------------------------------------------------------------------------
// WorldState
// ---------------------------------------------------------------------------

/// The complete simulation state for one tick.
///
/// `run_tick` consumes a snapshot by reference and returns a new one;
/// nothing inside is shared across tick boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WorldState {
    /// Monotonic tick counter.
    pub tick: u64,
    /// All social classes, keyed by id.
    pub classes: BTreeMap<ClassId, SocialClass>,
    /// All relationship edges, in stable creation order.
    pub relationships: Vec<Relationship>,
    /// All territories, keyed by id.
    pub territories: BTreeMap<TerritoryId, Territory>,
    /// The singleton global economy for this world.
    pub economy: GlobalEconomy,
    /// Registry of all contradictions, terminal ones included.
    pub contradictions: BTreeMap<ContradictionId, Contradiction>,
    /// Percolation phase observed by the last topology pass.
    pub phase: PercolationPhase,
    /// Stance chosen by the last bourgeois decision pass.
    pub stance: PolicyStance,
    /// Events emitted over the life of this world.
    pub event_log: Vec<Event>,
}

impl WorldState {
    /// Create an empty world at tick 0 around the given economy.
    pub const fn new(economy: GlobalEconomy) -> Self {
        Self {
            tick: 0,
            classes: BTreeMap::new(),
            relationships: Vec::new(),
            territories: BTreeMap::new(),
            economy,
            contradictions: BTreeMap::new(),
            phase: PercolationPhase::Gaseous,
            stance: PolicyStance::NoChange,
            event_log: Vec::new(),
        }
    }

    /// Insert a class, replacing any previous class with the same id.
    pub fn insert_class(&mut self, class: SocialClass) {
        self.classes.insert(class.id.clone(), class);
    }

    /// Insert a territory, replacing any previous one with the same id.
    pub fn insert_territory(&mut self, territory: Territory) {
        self.territories.insert(territory.id.clone(), territory);
    }

    /// Append a relationship edge.
    pub fn add_relationship(&mut self, relationship: Relationship) {
        self.relationships.push(relationship);
    }

    /// Look up a class by id.
    pub fn class(&self, id: &ClassId) -> Option<&SocialClass> {
        self.classes.get(id)
    }

    /// Look up a class mutably by id.
    pub fn class_mut(&mut self, id: &ClassId) -> Option<&mut SocialClass> {
        self.classes.get_mut(id)
    }

    /// Iterate over active classes in id order.
    pub fn active_classes(&self) -> impl Iterator<Item = &SocialClass> {
        self.classes.values().filter(|c| c.active)
    }

    /// Iterate over relationships of one kind in creation order.
    pub fn relationships_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Relationship> {
        self.relationships.iter().filter(move |r| r.kind == kind)
    }

    /// Total population across active classes.
    pub fn total_population(&self) -> u64 {
        self.active_classes().map(|c| c.population).sum()
    }

    /// Validate the snapshot's documented invariants: non-negative
    /// wealth/population, bounded attributes, no dangling class
    /// endpoints on class-to-class edges.
    pub fn validate(&self) -> Result<(), StateError> {
        for class in self.classes.values() {
            class.validate()?;
        }
        for rel in &self.relationships {
            let source_known = self.classes.contains_key(&ClassId::new(rel.source_id.clone()));
            if !source_known {
                return Err(StateError::DanglingEndpoint {
                    kind: rel.kind,
                    entity: rel.source_id.clone(),
                });
            }
            let target_known = if rel.kind == EdgeKind::Tenancy {
                self.territories
                    .contains_key(&TerritoryId::new(rel.target_id.clone()))
            } else {
                self.classes.contains_key(&ClassId::new(rel.target_id.clone()))
            };
            if !target_known {
                return Err(StateError::DanglingEndpoint {
                    kind: rel.kind,
                    entity: rel.target_id.clone(),
                });
            }
        }
        Ok(())
    }
}
