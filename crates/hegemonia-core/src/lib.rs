//! Simulation core: configuration, scenario genesis, the tick driver,
//! resolution advisors, and the contradiction engine.
//!
//! The core owns everything that strings the systems together. A
//! caller builds a [`SimulationConfig`], a genesis [`WorldState`] (the
//! [`scenario`] module ships the imperial-circuit genesis), and a
//! [`TickContext`], then folds [`run_tick`] over the snapshots.
//!
//! [`WorldState`]: hegemonia_types::WorldState

pub mod config;
pub mod contradiction;
pub mod decision;
pub mod scenario;
pub mod tick;

pub use config::{ConfigError, ContradictionParams, LoggingConfig, SimulationConfig, WorldConfig};
pub use decision::{FixedAdvisor, HeuristicAdvisor, ResolutionAdvisor};
pub use tick::{TickContext, TickError, TickOutcome, TickSummary, run_tick};
