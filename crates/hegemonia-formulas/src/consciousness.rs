//! Consciousness drift and solidarity transmission.

use crate::error::FormulaError;

/// Prospect-theory loss-aversion coefficient (Kahneman-Tversky).
pub const LOSS_AVERSION: f64 = 2.25;

/// Default activation threshold for solidarity transmission.
pub const SOLIDARITY_ACTIVATION_THRESHOLD: f64 = 0.3;

/// Asymmetric valuation of gains and losses.
///
/// Identity for gains; losses are amplified by [`LOSS_AVERSION`].
pub fn loss_aversion(x: f64) -> f64 {
    if x >= 0.0 { x } else { x * LOSS_AVERSION }
}

/// Per-tick consciousness drift from material conditions.
///
/// The base term is `k * (1 - wage / value_produced) - lambda * repression`:
/// consciousness rises when a class is paid less than the value it
/// produces and is pushed down by repression.
///
/// A wage *cut* adds an agitation term of `|wage_change| * 2.25` (losses
/// loom larger than gains). Where the cut lands depends on solidarity:
/// with positive solidarity pressure the agitation is revolutionary
/// (added, scaled by `min(1, pressure)`); in isolation it curdles
/// reactionary (subtracted). Rising or flat wages never agitate.
///
/// The returned drift is unclamped; the caller owns the [0, 1] clamp on
/// the consciousness it applies the drift to.
///
/// # Errors
///
/// Returns [`FormulaError::InvalidArgument`] when `value_produced` is
/// zero or negative.
#[allow(clippy::too_many_arguments)]
pub fn consciousness_drift(
    k: f64,
    wage: f64,
    value_produced: f64,
    lambda: f64,
    repression: f64,
    wage_change: f64,
    solidarity_pressure: f64,
) -> Result<f64, FormulaError> {
    if value_produced <= 0.0 {
        return Err(FormulaError::InvalidArgument {
            formula: "consciousness_drift",
            reason: format!("value_produced must be positive, got {value_produced}"),
        });
    }

    let mut drift = k * (1.0 - wage / value_produced) - lambda * repression;

    if wage_change < 0.0 {
        let agitation = wage_change.abs() * LOSS_AVERSION;
        if solidarity_pressure > 0.0 {
            drift += agitation * solidarity_pressure.min(1.0);
        } else {
            drift -= agitation;
        }
    }

    Ok(drift)
}

/// Solidarity transmitted from a source to a target class.
///
/// `strength * (source - target)` when the source's consciousness
/// strictly exceeds `activation_threshold`; a source below the threshold
/// transmits nothing. Note the difference term can be negative: a
/// conscious source still anchors a more conscious target downward
/// toward itself.
pub fn solidarity_transmission(
    source_consciousness: f64,
    target_consciousness: f64,
    strength: f64,
    activation_threshold: f64,
) -> f64 {
    if source_consciousness > activation_threshold {
        strength * (source_consciousness - target_consciousness)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loss_aversion_is_identity_for_gains() {
        assert!((loss_aversion(3.0) - 3.0).abs() < 1e-12);
        assert!(loss_aversion(0.0).abs() < 1e-12);
    }

    #[test]
    fn loss_aversion_amplifies_losses() {
        assert!((loss_aversion(-2.0) + 4.5).abs() < 1e-12);
    }

    #[test]
    fn underpaid_class_drifts_upward() {
        let drift = consciousness_drift(0.1, 40.0, 100.0, 0.05, 0.0, 0.0, 0.0);
        assert!(drift.is_ok_and(|d| d > 0.0));
    }

    #[test]
    fn repression_pushes_drift_down() {
        let free = consciousness_drift(0.1, 40.0, 100.0, 0.05, 0.0, 0.0, 0.0).unwrap_or(0.0);
        let repressed = consciousness_drift(0.1, 40.0, 100.0, 0.05, 1.0, 0.0, 0.0).unwrap_or(0.0);
        assert!(repressed < free);
    }

    #[test]
    fn wage_cut_with_solidarity_is_revolutionary() {
        let calm = consciousness_drift(0.1, 40.0, 100.0, 0.0, 0.0, 0.0, 0.5).unwrap_or(0.0);
        let agitated = consciousness_drift(0.1, 40.0, 100.0, 0.0, 0.0, -1.0, 0.5).unwrap_or(0.0);
        // agitation = 1.0 * 2.25, scaled by pressure 0.5
        assert!((agitated - calm - 1.125).abs() < 1e-9);
    }

    #[test]
    fn wage_cut_in_isolation_is_reactionary() {
        let calm = consciousness_drift(0.1, 40.0, 100.0, 0.0, 0.0, 0.0, 0.0).unwrap_or(0.0);
        let agitated = consciousness_drift(0.1, 40.0, 100.0, 0.0, 0.0, -1.0, 0.0).unwrap_or(0.0);
        assert!((calm - agitated - 2.25).abs() < 1e-9);
    }

    #[test]
    fn rising_wages_never_agitate() {
        let flat = consciousness_drift(0.1, 40.0, 100.0, 0.0, 0.0, 0.0, 0.5).unwrap_or(0.0);
        let rising = consciousness_drift(0.1, 40.0, 100.0, 0.0, 0.0, 2.0, 0.5).unwrap_or(0.0);
        assert!((flat - rising).abs() < 1e-12);
    }

    #[test]
    fn solidarity_pressure_saturates_at_one() {
        let at_one = consciousness_drift(0.1, 40.0, 100.0, 0.0, 0.0, -1.0, 1.0).unwrap_or(0.0);
        let above = consciousness_drift(0.1, 40.0, 100.0, 0.0, 0.0, -1.0, 7.0).unwrap_or(0.0);
        assert!((at_one - above).abs() < 1e-12);
    }

    #[test]
    fn drift_rejects_non_positive_value() {
        assert!(consciousness_drift(0.1, 40.0, 0.0, 0.05, 0.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn transmission_requires_activation() {
        let below = solidarity_transmission(0.3, 0.1, 0.5, SOLIDARITY_ACTIVATION_THRESHOLD);
        assert!(below.abs() < 1e-12);
        let above = solidarity_transmission(0.31, 0.1, 0.5, SOLIDARITY_ACTIVATION_THRESHOLD);
        assert!((above - 0.105).abs() < 1e-9);
    }

    #[test]
    fn transmission_scales_with_gap_and_strength() {
        let t = solidarity_transmission(0.8, 0.2, 0.5, SOLIDARITY_ACTIVATION_THRESHOLD);
        assert!((t - 0.3).abs() < 1e-12);
    }
}
