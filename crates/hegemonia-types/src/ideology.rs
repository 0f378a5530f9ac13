//! Multi-dimensional ideology profile and its legacy scalar conversion.
//!
//! The two-component profile is authoritative. Earlier snapshots encoded
//! ideology as a single scalar in [-1, 1]; both conversions are kept as
//! explicit, pure functions so neither representation is ever inferred by
//! mutating the other. The conversion is documented lossy: a profile with
//! both components non-zero collapses onto its net alignment, and the
//! inverse can only reconstruct a profile with one non-zero component.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Clamp a value into [0, 1].
fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// A class's ideological profile.
///
/// Both components are bounded to [0, 1]; constructors and mutators clamp
/// rather than error (saturation, not a fault).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Ideology {
    /// Revolutionary awareness of the class's structural position.
    pub class_consciousness: f64,
    /// Identification with the imperial national project.
    pub national_identity: f64,
}

impl Ideology {
    /// Create a profile, clamping both components into [0, 1].
    pub fn new(class_consciousness: f64, national_identity: f64) -> Self {
        Self {
            class_consciousness: clamp01(class_consciousness),
            national_identity: clamp01(national_identity),
        }
    }

    /// Neutral profile with both components at zero.
    pub const fn neutral() -> Self {
        Self {
            class_consciousness: 0.0,
            national_identity: 0.0,
        }
    }

    /// Shift class consciousness by `delta`, clamping into [0, 1].
    pub fn shift_consciousness(&mut self, delta: f64) {
        self.class_consciousness = clamp01(self.class_consciousness + delta);
    }

    /// Shift national identity by `delta`, clamping into [0, 1].
    pub fn shift_national_identity(&mut self, delta: f64) {
        self.national_identity = clamp01(self.national_identity + delta);
    }

    /// Collapse the profile to the legacy scalar in [-1, 1].
    ///
    /// Defined as `class_consciousness - national_identity`: positive
    /// values lean revolutionary, negative values lean chauvinist. Lossy:
    /// (0.8, 0.3) and (0.5, 0.0) both map to 0.5.
    pub fn to_legacy_scalar(self) -> f64 {
        (self.class_consciousness - self.national_identity).clamp(-1.0, 1.0)
    }

    /// Reconstruct a profile from the legacy scalar.
    ///
    /// The scalar's magnitude lands on a single component: non-negative
    /// scalars become pure class consciousness, negative scalars pure
    /// national identity. This is the documented inverse of the lossy
    /// collapse, not a bijection.
    pub fn from_legacy_scalar(scalar: f64) -> Self {
        let s = scalar.clamp(-1.0, 1.0);
        if s >= 0.0 {
            Self {
                class_consciousness: s,
                national_identity: 0.0,
            }
        } else {
            Self {
                class_consciousness: 0.0,
                national_identity: -s,
            }
        }
    }
}

impl Default for Ideology {
    fn default() -> Self {
        Self::neutral()
    }
}
