//! Population vitality: mortality from subsistence shortfall.
//!
//! Mortality is driven by per-capita wealth against per-capita needs,
//! amplified by population-weighted inequality across active classes.
//! Deaths remove population only; wealth stays with the class, and a
//! class whose population reaches zero is deactivated permanently.

use hegemonia_types::{ClassId, Event, EventDetails, WorldState};
use tracing::info;

use hegemonia_formulas::mortality_rate;

use crate::config::EconomyParams;

/// Run the vitality pass.
pub fn run(state: &mut WorldState, params: &EconomyParams) -> Vec<Event> {
    let mut events = Vec::new();
    let inequality = weighted_gini(state);
    let tick = state.tick;

    let ids: Vec<ClassId> = state.active_classes().map(|c| c.id.clone()).collect();
    for id in ids {
        let Some(class) = state.class_mut(&id) else {
            continue;
        };
        let needs = class.per_capita_needs(params.base_subsistence_cost);
        let rate = mortality_rate(class.wealth_per_capita(), needs, inequality);
        let deaths = death_count(class.population, rate);
        if deaths == 0 {
            continue;
        }

        class.population = class.population.saturating_sub(deaths);
        let remaining = class.population;
        events.push(Event::new(
            tick,
            EventDetails::PopulationAttrition {
                class_id: id.clone(),
                deaths,
                remaining,
                rate,
            },
        ));

        if remaining == 0 {
            class.active = false;
            let stranded_wealth = class.wealth;
            info!(class = id.as_str(), stranded_wealth, "class extinguished");
            events.push(Event::new(
                tick,
                EventDetails::ClassDied {
                    class_id: id,
                    cause: "extinction".to_owned(),
                    stranded_wealth,
                },
            ));
        }
    }

    events
}

/// Deaths this tick: the floor of population times the mortality rate.
///
/// The rate is clamped to [0, 1] first, so the product never exceeds
/// the population and the narrowing cast is exact.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn death_count(population: u64, rate: f64) -> u64 {
    let raw = (population as f64 * rate.clamp(0.0, 1.0)).floor();
    if raw >= population as f64 {
        population
    } else {
        raw.max(0.0) as u64
    }
}

/// Population-weighted Gini coefficient over per-capita wealth of
/// active classes. Empty worlds and zero-mean distributions read as 0.
fn weighted_gini(state: &WorldState) -> f64 {
    let cohorts: Vec<(f64, f64)> = state
        .active_classes()
        .filter(|c| c.population > 0)
        .map(|c| (c.wealth_per_capita(), c.population as f64))
        .collect();

    let total: f64 = cohorts.iter().map(|(_, p)| p).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let mean: f64 = cohorts.iter().map(|(x, p)| x * p).sum::<f64>() / total;
    if mean <= 0.0 {
        return 0.0;
    }

    let mut spread = 0.0;
    for (xi, pi) in &cohorts {
        for (xj, pj) in &cohorts {
            spread += pi * pj * (xi - xj).abs();
        }
    }
    (spread / (2.0 * total * total * mean)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hegemonia_types::{ClassRole, GlobalEconomy, SocialClass};

    use super::*;

    fn world() -> WorldState {
        WorldState::new(GlobalEconomy::new(100.0, 2.0))
    }

    #[test]
    fn well_fed_equal_world_has_no_attrition() {
        let mut state = world();
        state.insert_class(SocialClass::new(
            "workers",
            ClassRole::PeripheryProletariat,
            1000.0,
            100,
        ));
        let events = run(&mut state, &EconomyParams::default());
        assert!(events.is_empty());
        assert_eq!(state.class(&ClassId::new("workers")).unwrap().population, 100);
    }

    #[test]
    fn zero_needs_class_never_attrites() {
        let mut state = world();
        state.insert_class(
            SocialClass::new("rentiers", ClassRole::CoreBourgeoisie, 0.0, 10)
                .with_subsistence_multiplier(0.0),
        );
        let events = run(&mut state, &EconomyParams::default());
        assert!(events.is_empty());
    }

    #[test]
    fn destitute_class_loses_population_but_not_wealth() {
        let mut state = world();
        state.insert_class(SocialClass::new(
            "workers",
            ClassRole::PeripheryProletariat,
            30.0,
            100,
        ));
        let events = run(&mut state, &EconomyParams::default());

        let workers = state.class(&ClassId::new("workers")).unwrap();
        assert!(workers.population < 100);
        assert!((workers.wealth - 30.0).abs() < 1e-12);
        assert!(matches!(
            events.first().map(|e| &e.details),
            Some(EventDetails::PopulationAttrition { .. })
        ));
    }

    #[test]
    fn extreme_inequality_at_exact_coverage_wipes_a_class_in_one_tick() {
        // Coverage exactly 1.0 with inequality >= 0.8 pushes the rate to
        // its 1.0 clamp: deficit 0.8 * amplification 1.3.
        let mut state = world();
        let mut poor = SocialClass::new("workers", ClassRole::PeripheryProletariat, 150.0, 100);
        poor.subsistence_multiplier = 1.5;
        state.insert_class(poor);
        state.insert_class(
            SocialClass::new("owners", ClassRole::CoreBourgeoisie, 1_000_000.0, 1)
                .with_subsistence_multiplier(0.0),
        );

        let events = run(&mut state, &EconomyParams::default());

        let workers = state.class(&ClassId::new("workers")).unwrap();
        assert_eq!(workers.population, 0);
        assert!(!workers.active);
        assert!(events.iter().any(|e| matches!(
            e.details,
            EventDetails::ClassDied { ref cause, .. } if cause == "extinction"
        )));
    }

    #[test]
    fn dead_class_stays_dead() {
        let mut state = world();
        let mut ghosts = SocialClass::new("ghosts", ClassRole::Lumpen, 0.0, 0);
        ghosts.active = false;
        state.insert_class(ghosts);
        let events = run(&mut state, &EconomyParams::default());
        assert!(events.is_empty());
    }

    #[test]
    fn gini_is_zero_for_one_class_and_high_for_polarized_wealth() {
        let mut state = world();
        state.insert_class(SocialClass::new(
            "workers",
            ClassRole::PeripheryProletariat,
            100.0,
            100,
        ));
        assert!(weighted_gini(&state).abs() < 1e-12);

        state.insert_class(SocialClass::new("owners", ClassRole::CoreBourgeoisie, 1_000_000.0, 1));
        assert!(weighted_gini(&state) > 0.8);
    }
}
