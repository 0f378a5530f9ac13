//! Territorial metabolism: regeneration against extraction.
//!
//! Each territory regains a fixed fraction of its maximum biocapacity
//! per tick and loses capacity in proportion to the extraction load the
//! production pass recorded. The result is clamped into
//! `[0, max_biocapacity]`, so neither runaway growth nor negative
//! capacity is possible.

use hegemonia_types::WorldState;

use crate::config::MetabolismParams;

/// Run the metabolism pass.
pub fn run(state: &mut WorldState, params: &MetabolismParams) {
    for territory in state.territories.values_mut() {
        let regeneration = territory.regeneration_rate * territory.max_biocapacity;
        let depletion =
            territory.extraction_intensity * territory.biocapacity * params.entropy_factor;
        territory.biocapacity = (territory.biocapacity + regeneration - depletion)
            .clamp(0.0, territory.max_biocapacity);
    }
}
