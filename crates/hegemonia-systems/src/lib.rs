//! The per-tick steppers of the Hegemonia core.
//!
//! Each system is a free function over `&mut WorldState` plus its
//! parameter struct, returning the events it emitted. The driver in
//! `hegemonia-core` calls them in a fixed order each tick:
//!
//! 1. [`subsistence`] -- costs, extraction flows, policy stance
//! 2. [`production`] -- tenancy output and extraction intensity
//! 3. [`metabolism`] -- territorial regeneration and depletion
//! 4. [`vitality`] -- inequality-amplified mortality
//! 5. [`solidarity`] -- consciousness drift and transmission
//! 6. [`topology`] -- percolation phase of the solidarity network
//!
//! Every field of the world is written by exactly one system, and
//! cross-entity reads see the prior tick's values, so the order of
//! iteration within a pass never leaks into the results.

pub mod config;
pub mod metabolism;
pub mod production;
pub mod solidarity;
pub mod subsistence;
pub mod topology;
pub mod vitality;

pub use config::{ConsciousnessParams, EconomyParams, MetabolismParams, TopologyParams};
