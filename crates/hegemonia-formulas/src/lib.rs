//! Closed-form economic and behavioral formulas for the Hegemonia core.
//!
//! Every function here is pure and total over its documented domain:
//! no state, no I/O, no configuration reads. Coefficients arrive as
//! arguments so the same library serves every scenario. Range
//! saturation (probabilities, bounded attributes) clamps silently;
//! mathematically undefined inputs surface as [`FormulaError`].
//!
//! # Modules
//!
//! - [`rent`] -- imperial rent, labor-aristocracy ratio
//! - [`consciousness`] -- drift, loss aversion, solidarity transmission
//! - [`survival`] -- acquiescence/revolution probabilities, mortality
//! - [`profit`] -- TRPF multiplier, pool decay, profit-rate formulas

pub mod consciousness;
pub mod error;
pub mod profit;
pub mod rent;
pub mod survival;

pub use consciousness::{
    LOSS_AVERSION, SOLIDARITY_ACTIVATION_THRESHOLD, consciousness_drift, loss_aversion,
    solidarity_transmission,
};
pub use error::FormulaError;
pub use profit::{organic_composition, rate_of_profit, rent_pool_decay, trpf_multiplier};
pub use rent::{imperial_rent, is_labor_aristocracy, labor_aristocracy_ratio};
pub use survival::{
    REPRESSION_EPSILON, acquiescence_probability, crossover_threshold, mortality_rate,
    revolution_probability,
};
