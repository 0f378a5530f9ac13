//! Tunable parameters for the per-tick steppers.
//!
//! Each system takes its parameter struct by reference, so tests can
//! override single knobs without touching the rest. The core's
//! `SimulationConfig` embeds these structs directly under its YAML
//! sections; every field therefore carries a serde default.

use serde::{Deserialize, Serialize};

/// Parameters for the subsistence and extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EconomyParams {
    /// Extraction coefficient applied to the wage base of exploitation
    /// edges.
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Per-capita subsistence cost before the class multiplier.
    #[serde(default = "default_base_subsistence_cost")]
    pub base_subsistence_cost: f64,

    /// Output per working head at full biocapacity.
    #[serde(default = "default_base_productivity")]
    pub base_productivity: f64,

    /// Fraction of source wealth drawn along each tribute edge per tick.
    #[serde(default = "default_tribute_rate")]
    pub tribute_rate: f64,

    /// Per-capita subsidy requested along client-state edges per tick.
    #[serde(default = "default_subsidy_rate")]
    pub subsidy_rate: f64,

    /// Share of every extraction flow captured by the rent pool; the
    /// remainder is credited to the extracting class.
    #[serde(default = "default_pool_capture_share")]
    pub pool_capture_share: f64,

    /// Per-tick decline applied to the profit multiplier.
    #[serde(default = "default_trpf_coefficient")]
    pub trpf_coefficient: f64,

    /// Floor the profit multiplier never drops below.
    #[serde(default = "default_trpf_floor")]
    pub trpf_floor: f64,

    /// Fraction of the rent pool that evaporates per tick.
    #[serde(default = "default_rent_pool_decay_rate")]
    pub rent_pool_decay_rate: f64,

    /// Tension accrued per unit extraction share on an edge.
    #[serde(default = "default_tension_accrual_rate")]
    pub tension_accrual_rate: f64,

    /// Pool ratio below which the stance is always `Crisis`.
    #[serde(default = "default_crisis_pool_ratio")]
    pub crisis_pool_ratio: f64,

    /// Pool ratio below which the stance is `Austerity` or `IronFist`.
    #[serde(default = "default_austerity_pool_ratio")]
    pub austerity_pool_ratio: f64,

    /// Pool ratio at or above which `Bribery` becomes available.
    #[serde(default = "default_bribery_pool_ratio")]
    pub bribery_pool_ratio: f64,

    /// Average tension above which a depleted pool triggers `IronFist`
    /// rather than `Austerity`.
    #[serde(default = "default_iron_fist_tension_threshold")]
    pub iron_fist_tension_threshold: f64,

    /// Average tension below which a full pool triggers `Bribery`.
    #[serde(default = "default_bribery_tension_threshold")]
    pub bribery_tension_threshold: f64,

    /// Multiplier applied to the super-wage rate each `Crisis` tick.
    #[serde(default = "default_crisis_wage_factor")]
    pub crisis_wage_factor: f64,

    /// Multiplier applied to the super-wage rate each `Austerity` tick.
    #[serde(default = "default_austerity_wage_factor")]
    pub austerity_wage_factor: f64,

    /// Multiplier applied to the super-wage rate each `Bribery` tick.
    #[serde(default = "default_bribery_wage_factor")]
    pub bribery_wage_factor: f64,

    /// Repression added per `Crisis` or `IronFist` tick, saturating at 1.
    #[serde(default = "default_repression_step")]
    pub repression_step: f64,
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            base_subsistence_cost: default_base_subsistence_cost(),
            base_productivity: default_base_productivity(),
            tribute_rate: default_tribute_rate(),
            subsidy_rate: default_subsidy_rate(),
            pool_capture_share: default_pool_capture_share(),
            trpf_coefficient: default_trpf_coefficient(),
            trpf_floor: default_trpf_floor(),
            rent_pool_decay_rate: default_rent_pool_decay_rate(),
            tension_accrual_rate: default_tension_accrual_rate(),
            crisis_pool_ratio: default_crisis_pool_ratio(),
            austerity_pool_ratio: default_austerity_pool_ratio(),
            bribery_pool_ratio: default_bribery_pool_ratio(),
            iron_fist_tension_threshold: default_iron_fist_tension_threshold(),
            bribery_tension_threshold: default_bribery_tension_threshold(),
            crisis_wage_factor: default_crisis_wage_factor(),
            austerity_wage_factor: default_austerity_wage_factor(),
            bribery_wage_factor: default_bribery_wage_factor(),
            repression_step: default_repression_step(),
        }
    }
}

/// Parameters for the solidarity and consciousness pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsciousnessParams {
    /// Base drift coefficient on the exploitation-rate term.
    #[serde(default = "default_drift_k")]
    pub drift_k: f64,

    /// Damping coefficient on the repression term.
    #[serde(default = "default_drift_lambda")]
    pub drift_lambda: f64,

    /// Consciousness a source must exceed to transmit solidarity.
    #[serde(default = "default_activation_threshold")]
    pub activation_threshold: f64,

    /// Consciousness level whose upward crossing emits a mass-awakening
    /// event.
    #[serde(default = "default_awakening_threshold")]
    pub awakening_threshold: f64,
}

impl Default for ConsciousnessParams {
    fn default() -> Self {
        Self {
            drift_k: default_drift_k(),
            drift_lambda: default_drift_lambda(),
            activation_threshold: default_activation_threshold(),
            awakening_threshold: default_awakening_threshold(),
        }
    }
}

/// Parameters for the territorial metabolism pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetabolismParams {
    /// Scales how strongly extraction intensity depletes biocapacity.
    #[serde(default = "default_entropy_factor")]
    pub entropy_factor: f64,
}

impl Default for MetabolismParams {
    fn default() -> Self {
        Self {
            entropy_factor: default_entropy_factor(),
        }
    }
}

/// Parameters for the solidarity-network topology monitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyParams {
    /// Largest-component ratio below which the network is gaseous.
    #[serde(default = "default_gaseous_ceiling")]
    pub gaseous_ceiling: f64,

    /// Largest-component ratio at or above which the network is liquid.
    #[serde(default = "default_liquid_floor")]
    pub liquid_floor: f64,

    /// Mean tie strength the giant component needs to count as
    /// resilient.
    #[serde(default = "default_resilience_strength_floor")]
    pub resilience_strength_floor: f64,
}

impl Default for TopologyParams {
    fn default() -> Self {
        Self {
            gaseous_ceiling: default_gaseous_ceiling(),
            liquid_floor: default_liquid_floor(),
            resilience_strength_floor: default_resilience_strength_floor(),
        }
    }
}

fn default_alpha() -> f64 {
    0.3
}

fn default_base_subsistence_cost() -> f64 {
    1.0
}

fn default_base_productivity() -> f64 {
    2.0
}

fn default_tribute_rate() -> f64 {
    0.05
}

fn default_subsidy_rate() -> f64 {
    0.5
}

fn default_pool_capture_share() -> f64 {
    0.4
}

fn default_trpf_coefficient() -> f64 {
    0.0005
}

fn default_trpf_floor() -> f64 {
    0.1
}

fn default_rent_pool_decay_rate() -> f64 {
    0.01
}

fn default_tension_accrual_rate() -> f64 {
    0.05
}

fn default_crisis_pool_ratio() -> f64 {
    0.1
}

fn default_austerity_pool_ratio() -> f64 {
    0.3
}

fn default_bribery_pool_ratio() -> f64 {
    0.7
}

fn default_iron_fist_tension_threshold() -> f64 {
    0.6
}

fn default_bribery_tension_threshold() -> f64 {
    0.3
}

fn default_crisis_wage_factor() -> f64 {
    0.5
}

fn default_austerity_wage_factor() -> f64 {
    0.8
}

fn default_bribery_wage_factor() -> f64 {
    1.1
}

fn default_repression_step() -> f64 {
    0.1
}

fn default_drift_k() -> f64 {
    0.05
}

fn default_drift_lambda() -> f64 {
    0.1
}

fn default_activation_threshold() -> f64 {
    0.3
}

fn default_awakening_threshold() -> f64 {
    0.7
}

fn default_entropy_factor() -> f64 {
    0.05
}

fn default_gaseous_ceiling() -> f64 {
    0.1
}

fn default_liquid_floor() -> f64 {
    0.5
}

fn default_resilience_strength_floor() -> f64 {
    0.4
}
