//! Resolution advisors: the seam where a policy chooses among a
//! contradiction's resolution methods.
//!
//! The engine consults an advisor when an escalating contradiction
//! ruptures. Advisors only pick a method kind; the engine validates the
//! pick against the methods actually on offer and applies the effects.

use hegemonia_types::{Contradiction, IntensityLevel, ResolutionMethodKind};

/// Chooses a resolution method for a rupturing contradiction.
///
/// `available` lists the method kinds the contradiction offers, in
/// preference order, with kinds the world cannot sustain already
/// filtered out (a revolution with no revolutionary class is not on the
/// table). Returning `None` or a kind outside `available` falls back to
/// the first available method.
pub trait ResolutionAdvisor {
    /// Pick a method kind for this contradiction.
    fn choose_method(
        &self,
        contradiction: &Contradiction,
        available: &[ResolutionMethodKind],
    ) -> Option<ResolutionMethodKind>;
}

/// The default advisor: intensity-banded preference.
///
/// Critical contradictions go for rupture (revolution, then
/// suppression); high intensity is contained (suppression first);
/// anything milder is reformed away if reform is on offer.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicAdvisor;

impl ResolutionAdvisor for HeuristicAdvisor {
    fn choose_method(
        &self,
        contradiction: &Contradiction,
        available: &[ResolutionMethodKind],
    ) -> Option<ResolutionMethodKind> {
        let preference: [ResolutionMethodKind; 3] = match contradiction.intensity {
            IntensityLevel::Critical => [
                ResolutionMethodKind::Revolution,
                ResolutionMethodKind::Suppression,
                ResolutionMethodKind::Reform,
            ],
            IntensityLevel::High => [
                ResolutionMethodKind::Suppression,
                ResolutionMethodKind::Reform,
                ResolutionMethodKind::Revolution,
            ],
            IntensityLevel::Low | IntensityLevel::Medium => [
                ResolutionMethodKind::Reform,
                ResolutionMethodKind::Suppression,
                ResolutionMethodKind::Revolution,
            ],
        };
        preference
            .into_iter()
            .find(|kind| available.contains(kind))
            .or_else(|| available.first().copied())
    }
}

/// An advisor that always proposes one kind; used by tests and scripted
/// experiments.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvisor(pub ResolutionMethodKind);

impl ResolutionAdvisor for FixedAdvisor {
    fn choose_method(
        &self,
        _contradiction: &Contradiction,
        _available: &[ResolutionMethodKind],
    ) -> Option<ResolutionMethodKind> {
        Some(self.0)
    }
}
