//! Imperial rent and labor-aristocracy formulas.

use crate::error::FormulaError;

/// Imperial rent extracted from a workforce.
///
/// `alpha * wages * (1 - consciousness)`, clamped to be non-negative.
/// A fully conscious workforce (`consciousness = 1`) yields exactly zero
/// rent; extraction is maximal at zero consciousness.
pub fn imperial_rent(alpha: f64, wages: f64, consciousness: f64) -> f64 {
    (alpha * wages * (1.0 - consciousness)).max(0.0)
}

/// Ratio of core wages to the value the core workforce produces.
///
/// # Errors
///
/// Returns [`FormulaError::InvalidArgument`] when `value_produced` is
/// zero or negative; the ratio is undefined there and is never silently
/// defaulted.
pub fn labor_aristocracy_ratio(core_wages: f64, value_produced: f64) -> Result<f64, FormulaError> {
    if value_produced <= 0.0 {
        return Err(FormulaError::InvalidArgument {
            formula: "labor_aristocracy_ratio",
            reason: format!("value_produced must be positive, got {value_produced}"),
        });
    }
    Ok(core_wages / value_produced)
}

/// Whether a workforce is a labor aristocracy: wages strictly exceed the
/// value produced, the gap funded by imperial rent.
///
/// # Errors
///
/// Propagates [`FormulaError::InvalidArgument`] from the ratio.
pub fn is_labor_aristocracy(core_wages: f64, value_produced: f64) -> Result<bool, FormulaError> {
    Ok(labor_aristocracy_ratio(core_wages, value_produced)? > 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rent_is_zero_at_full_consciousness() {
        assert!(imperial_rent(0.5, 100.0, 1.0).abs() < 1e-12);
    }

    #[test]
    fn rent_is_maximal_at_zero_consciousness() {
        let max = imperial_rent(0.5, 100.0, 0.0);
        assert!((max - 50.0).abs() < 1e-12);
        for step in 1..=10 {
            let psi = f64::from(step) / 10.0;
            assert!(imperial_rent(0.5, 100.0, psi) <= max);
        }
    }

    #[test]
    fn rent_is_non_increasing_in_consciousness() {
        let mut previous = f64::INFINITY;
        for step in 0..=100 {
            let psi = f64::from(step) / 100.0;
            let rent = imperial_rent(0.3, 80.0, psi);
            assert!(rent <= previous + 1e-12);
            previous = rent;
        }
    }

    #[test]
    fn rent_never_negative() {
        // Consciousness above 1 would flip the sign; the clamp holds.
        assert!(imperial_rent(0.5, 100.0, 1.5).abs() < 1e-12);
    }

    #[test]
    fn aristocracy_requires_strict_excess() {
        assert_eq!(is_labor_aristocracy(100.0, 100.0).ok(), Some(false));
        assert_eq!(is_labor_aristocracy(100.001, 100.0).ok(), Some(true));
    }

    #[test]
    fn ratio_rejects_non_positive_value() {
        assert!(labor_aristocracy_ratio(100.0, 0.0).is_err());
        assert!(labor_aristocracy_ratio(100.0, -5.0).is_err());
    }
}
