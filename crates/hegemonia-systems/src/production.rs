//! Production over tenancy edges.
//!
//! Each active tenant class works its territory, producing output per
//! head in proportion to the territory's remaining biocapacity. The
//! pass owns
//! `value_produced` (the next tick's wage base) and each territory's
//! `extraction_intensity`; both are recomputed from scratch every tick.

use std::collections::BTreeMap;

use hegemonia_types::{ClassId, EdgeKind, TerritoryId, WorldState};
use tracing::warn;

use crate::config::EconomyParams;

/// Run the production pass.
pub fn run(state: &mut WorldState, params: &EconomyParams) {
    for class in state.classes.values_mut().filter(|c| c.active) {
        class.value_produced = 0.0;
    }

    let mut load: BTreeMap<TerritoryId, f64> = BTreeMap::new();

    for index in 0..state.relationships.len() {
        let Some(edge) = state.relationships.get(index) else {
            break;
        };
        if edge.kind != EdgeKind::Tenancy {
            continue;
        }
        let tenant_id = ClassId::new(edge.source_id.clone());
        let territory_id = TerritoryId::new(edge.target_id.clone());

        let Some(tenant) = state.class(&tenant_id).filter(|c| c.active) else {
            continue;
        };
        let heads = tenant.population as f64;
        let Some(territory) = state.territories.get(&territory_id) else {
            warn!(
                territory = territory_id.as_str(),
                "tenancy edge targets unknown territory, skipping"
            );
            continue;
        };

        let output = params.base_productivity * territory.biocapacity_ratio() * heads;
        if let Some(tenant) = state.class_mut(&tenant_id) {
            tenant.value_produced += output;
            tenant.credit_wealth(output);
        }
        *load.entry(territory_id).or_insert(0.0) += output;
        if let Some(edge) = state.relationships.get_mut(index) {
            edge.value_flow = output;
        }
    }

    for territory in state.territories.values_mut() {
        let total = load.get(&territory.id).copied().unwrap_or(0.0);
        territory.extraction_intensity = if territory.max_biocapacity > 0.0 {
            (total / territory.max_biocapacity).min(1.0)
        } else {
            0.0
        };
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hegemonia_types::{
        ClassRole, GlobalEconomy, Relationship, SectorType, SocialClass, Territory,
    };

    use super::*;

    fn tenancy_world() -> WorldState {
        let mut state = WorldState::new(GlobalEconomy::new(100.0, 2.0));
        state.insert_class(SocialClass::new(
            "workers",
            ClassRole::PeripheryProletariat,
            10.0,
            1,
        ));
        state.insert_territory(Territory::new("delta", SectorType::Agrarian, 200.0, 0.02));
        state.add_relationship(Relationship::new(EdgeKind::Tenancy, "workers", "delta"));
        state
    }

    #[test]
    fn output_scales_with_biocapacity_ratio() {
        let mut state = tenancy_world();
        run(&mut state, &EconomyParams::default());
        let workers = state.class(&ClassId::new("workers")).unwrap();
        assert!((workers.value_produced - 2.0).abs() < 1e-9);
        assert!((workers.wealth - 12.0).abs() < 1e-9);

        // A half-degraded territory halves the output.
        let mut state = tenancy_world();
        state
            .territories
            .get_mut(&TerritoryId::new("delta"))
            .unwrap()
            .biocapacity = 100.0;
        run(&mut state, &EconomyParams::default());
        let workers = state.class(&ClassId::new("workers")).unwrap();
        assert!((workers.value_produced - 1.0).abs() < 1e-9);
    }

    #[test]
    fn intensity_is_total_load_over_max_capacity() {
        let mut state = tenancy_world();
        state.insert_class(SocialClass::new("peasants", ClassRole::Peasantry, 10.0, 1));
        state.add_relationship(Relationship::new(EdgeKind::Tenancy, "peasants", "delta"));
        run(&mut state, &EconomyParams::default());

        let territory = state.territories.get(&TerritoryId::new("delta")).unwrap();
        assert!((territory.extraction_intensity - 4.0 / 200.0).abs() < 1e-9);
    }

    #[test]
    fn untenanted_territory_resets_to_zero_intensity() {
        let mut state = tenancy_world();
        state
            .territories
            .get_mut(&TerritoryId::new("delta"))
            .unwrap()
            .extraction_intensity = 0.5;
        state.class_mut(&ClassId::new("workers")).unwrap().active = false;
        run(&mut state, &EconomyParams::default());

        let territory = state.territories.get(&TerritoryId::new("delta")).unwrap();
        assert!(territory.extraction_intensity.abs() < 1e-12);
    }

    #[test]
    fn stale_wage_base_is_cleared_even_without_tenancy() {
        let mut state = tenancy_world();
        state.relationships.clear();
        state.class_mut(&ClassId::new("workers")).unwrap().value_produced = 5.0;
        run(&mut state, &EconomyParams::default());
        let workers = state.class(&ClassId::new("workers")).unwrap();
        assert!(workers.value_produced.abs() < 1e-12);
    }
}
