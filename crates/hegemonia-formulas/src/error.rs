//! Errors for mathematically undefined formula inputs.

/// Errors that a formula can raise.
///
/// Only mathematically undefined inputs (zero or negative denominators
/// where the formula has no defined fallback) surface as errors. Range
/// saturation is handled by clamping inside the formulas and is never a
/// fault.
#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    /// An input made the formula undefined.
    #[error("invalid argument for {formula}: {reason}")]
    InvalidArgument {
        /// The formula that rejected its input.
        formula: &'static str,
        /// Why the input is undefined.
        reason: String,
    },
}
