//! Scenario genesis: the imperial circuit.
//!
//! One periphery working class and a peasantry work the territories; an
//! exploitation edge drains the workers toward the core bourgeoisie,
//! tribute and subsidy edges tie the comprador layer into the circuit,
//! and super-wages from the rent pool buy the labor aristocracy's
//! quiescence. Solidarity edges between the periphery classes seed the
//! network the topology pass watches.

use hegemonia_types::{
    ClassRole, EdgeKind, GlobalEconomy, Ideology, Relationship, SectorType, SocialClass, Territory,
    WorldState,
};

use crate::config::SimulationConfig;

/// Build the imperial-circuit genesis world from configuration.
pub fn imperial_circuit(config: &SimulationConfig) -> WorldState {
    let economy = GlobalEconomy::new(
        config.world.initial_rent_pool,
        config.world.super_wage_rate,
    );
    let mut state = WorldState::new(economy);

    state.insert_class(
        SocialClass::new(
            "periphery-proletariat",
            ClassRole::PeripheryProletariat,
            3000.0,
            1000,
        )
        .with_ideology(Ideology::new(0.1, 0.1))
        .with_organization(0.2),
    );
    state.insert_class(
        SocialClass::new("peasantry", ClassRole::Peasantry, 1600.0, 800)
            .with_ideology(Ideology::new(0.05, 0.2)),
    );
    state.insert_class(
        SocialClass::new("labor-aristocracy", ClassRole::LaborAristocracy, 2000.0, 200)
            .with_ideology(Ideology::new(0.05, 0.6)),
    );
    state.insert_class(
        SocialClass::new(
            "comprador-bourgeoisie",
            ClassRole::CompradorBourgeoisie,
            600.0,
            20,
        )
        .with_ideology(Ideology::new(0.0, 0.5)),
    );
    state.insert_class(
        SocialClass::new("core-bourgeoisie", ClassRole::CoreBourgeoisie, 1000.0, 10)
            .with_ideology(Ideology::new(0.0, 0.8)),
    );

    state.insert_territory(Territory::new(
        "cobalt-belt",
        SectorType::Extractive,
        200.0,
        0.02,
    ));
    state.insert_territory(Territory::new(
        "river-delta",
        SectorType::Agrarian,
        300.0,
        0.03,
    ));

    // Material base.
    state.add_relationship(Relationship::new(
        EdgeKind::Tenancy,
        "periphery-proletariat",
        "cobalt-belt",
    ));
    state.add_relationship(Relationship::new(
        EdgeKind::Tenancy,
        "peasantry",
        "river-delta",
    ));

    // The rent circuit.
    state.add_relationship(Relationship::new(
        EdgeKind::Exploitation,
        "periphery-proletariat",
        "core-bourgeoisie",
    ));
    state.add_relationship(Relationship::new(
        EdgeKind::Exploitation,
        "peasantry",
        "comprador-bourgeoisie",
    ));
    state.add_relationship(Relationship::new(
        EdgeKind::Tribute,
        "comprador-bourgeoisie",
        "core-bourgeoisie",
    ));
    state.add_relationship(Relationship::new(
        EdgeKind::Wages,
        "core-bourgeoisie",
        "labor-aristocracy",
    ));
    state.add_relationship(
        Relationship::new(
            EdgeKind::ClientStateSubsidy,
            "core-bourgeoisie",
            "comprador-bourgeoisie",
        )
        .with_subsidy_cap(10.0),
    );

    // The political superstructure.
    state.add_relationship(Relationship::new(
        EdgeKind::Repression,
        "core-bourgeoisie",
        "periphery-proletariat",
    ));
    state.add_relationship(
        Relationship::new(EdgeKind::Solidarity, "periphery-proletariat", "peasantry")
            .with_solidarity_strength(0.4),
    );
    state.add_relationship(
        Relationship::new(EdgeKind::Solidarity, "peasantry", "periphery-proletariat")
            .with_solidarity_strength(0.3),
    );

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_world_is_valid() {
        let state = imperial_circuit(&SimulationConfig::default());
        assert!(state.validate().is_ok());
        assert_eq!(state.classes.len(), 5);
        assert_eq!(state.territories.len(), 2);
        assert_eq!(state.tick, 0);
    }

    #[test]
    fn genesis_economy_comes_from_config() {
        let mut config = SimulationConfig::default();
        config.world.initial_rent_pool = 750.0;
        config.world.super_wage_rate = 3.0;
        let state = imperial_circuit(&config);
        assert!((state.economy.imperial_rent_pool - 750.0).abs() < 1e-12);
        assert!((state.economy.current_super_wage_rate - 3.0).abs() < 1e-12);
    }

    #[test]
    fn every_beneficiary_sits_downstream_of_extraction() {
        let state = imperial_circuit(&SimulationConfig::default());
        let targets: Vec<&str> = state
            .relationships_of_kind(EdgeKind::Exploitation)
            .chain(state.relationships_of_kind(EdgeKind::Tribute))
            .map(|edge| edge.target_id.as_str())
            .collect();
        assert!(targets.contains(&"core-bourgeoisie"));
        assert!(targets.contains(&"comprador-bourgeoisie"));
    }
}
