//! Survival probabilities and mortality.

/// Division guard for the revolution probability's denominator.
pub const REPRESSION_EPSILON: f64 = 1e-6;

/// Probability a class acquiesces, as a logistic of wealth above its
/// subsistence threshold.
///
/// Exactly 0.5 when wealth sits at the threshold; saturates toward 0
/// and 1 away from it. Always in [0, 1].
pub fn acquiescence_probability(wealth: f64, subsistence_threshold: f64) -> f64 {
    1.0 / (1.0 + (-(wealth - subsistence_threshold)).exp())
}

/// Probability a class revolts: cohesion against repression.
///
/// `clamp(cohesion / (repression + epsilon), 0, 1)`; the epsilon keeps
/// an unrepressed class well-defined.
pub fn revolution_probability(cohesion: f64, repression: f64) -> f64 {
    (cohesion / (repression + REPRESSION_EPSILON)).clamp(0.0, 1.0)
}

/// Wealth level at which acquiescence and revolution probabilities
/// intersect.
///
/// At the revolution-probability extremes the logistic has no finite
/// preimage, so the crossover saturates: 0 when revolt is impossible,
/// 1 when revolt is certain. Otherwise the intersection is solved via
/// the inverse logistic and clamped to be non-negative.
pub fn crossover_threshold(subsistence_threshold: f64, cohesion: f64, repression: f64) -> f64 {
    let p = revolution_probability(cohesion, repression);
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }
    (subsistence_threshold + (p / (1.0 - p)).ln()).max(0.0)
}

/// Per-tick mortality rate from subsistence coverage and inequality.
///
/// Coverage is wealth per capita over per-capita needs. The survival
/// threshold rises with inequality (`1 + inequality`): an unequal world
/// demands more coverage to survive. The deficit below that threshold
/// scales into a rate by `0.5 + inequality`, clamped to [0, 1]. A class
/// with no needs never dies of want.
pub fn mortality_rate(wealth_per_capita: f64, subsistence_needs: f64, inequality: f64) -> f64 {
    if subsistence_needs <= 0.0 {
        return 0.0;
    }
    let coverage = wealth_per_capita / subsistence_needs;
    let threshold = 1.0 + inequality;
    let deficit = (threshold - coverage).max(0.0);
    (deficit * (0.5 + inequality)).clamp(0.0, 1.0)
}
