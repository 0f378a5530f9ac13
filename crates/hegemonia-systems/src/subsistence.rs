//! Subsistence, extraction, and the bourgeois decision heuristic.
//!
//! Runs first each tick. Order within the pass:
//!
//! 1. roll wage baselines forward and deduct subsistence costs
//! 2. decay the imperial rent pool
//! 3. move value along extraction and distribution edges
//! 4. choose and apply the policy stance
//!
//! Extraction reads each source's `value_produced` from the previous
//! production pass, so the wage base is the prior tick's output, never
//! wealth already drained this tick.

use hegemonia_formulas::{imperial_rent, rent_pool_decay, trpf_multiplier};
use hegemonia_types::{
    ClassId, EdgeKind, Event, EventDetails, PolicyStance, WorldState,
};
use tracing::{debug, warn};

use crate::config::EconomyParams;

/// Run the subsistence and extraction pass.
pub fn run(state: &mut WorldState, params: &EconomyParams) -> Vec<Event> {
    let mut events = Vec::new();

    for class in state.classes.values_mut().filter(|c| c.active) {
        class.previous_wage_income = class.wage_income;
        class.wage_income = 0.0;
        let cost = class.per_capita_needs(params.base_subsistence_cost) * class.population as f64;
        let _ = class.deduct_wealth(cost);
    }

    state.economy.imperial_rent_pool =
        rent_pool_decay(state.economy.imperial_rent_pool, params.rent_pool_decay_rate);

    let trpf = trpf_multiplier(state.tick, params.trpf_coefficient, params.trpf_floor);

    for index in 0..state.relationships.len() {
        let Some(edge) = state.relationships.get(index) else {
            break;
        };
        let kind = edge.kind;
        if !kind.carries_value() {
            continue;
        }
        let source_id = ClassId::new(edge.source_id.clone());
        let target_id = ClassId::new(edge.target_id.clone());

        match kind {
            EdgeKind::Exploitation => {
                extract(state, params, index, &source_id, &target_id, trpf);
            }
            EdgeKind::Tribute => {
                collect_tribute(state, params, index, &source_id, trpf);
            }
            EdgeKind::Wages => {
                pay_super_wages(state, index, &target_id);
            }
            EdgeKind::ClientStateSubsidy => {
                pay_subsidy(state, params, index, &target_id);
            }
            EdgeKind::Solidarity | EdgeKind::Tenancy | EdgeKind::Repression => {}
        }
    }

    let pool_ratio = state.economy.pool_ratio();
    let average_tension = average_extraction_tension(state);
    let stance = choose_stance(pool_ratio, average_tension, params);
    apply_stance(state, stance, params);

    if stance != state.stance {
        debug!(?stance, previous = ?state.stance, pool_ratio, "policy stance shifted");
        events.push(Event::new(
            state.tick,
            EventDetails::PolicyShift {
                previous: state.stance,
                current: stance,
                pool_ratio,
                average_tension,
            },
        ));
        state.stance = stance;
    }

    events
}

/// Draw imperial rent along one exploitation edge.
///
/// The gross draw is the rent formula over the source's prior-tick wage
/// base, scaled by the profit multiplier; the pool captures its share
/// and the extracting class keeps the rest.
fn extract(
    state: &mut WorldState,
    params: &EconomyParams,
    index: usize,
    source_id: &ClassId,
    target_id: &ClassId,
    trpf: f64,
) {
    let Some(source) = state.class(source_id) else {
        warn!(source = source_id.as_str(), "exploitation edge has unknown source, skipping");
        return;
    };
    if !source.active {
        return;
    }
    let wage_base = source.value_produced;
    let consciousness = source.ideology.class_consciousness;
    let gross = imperial_rent(params.alpha, wage_base, consciousness) * trpf;

    let taken = match state.class_mut(source_id) {
        Some(class) => class.deduct_wealth(gross),
        None => return,
    };
    let to_pool = taken * params.pool_capture_share.clamp(0.0, 1.0);
    state.economy.deposit(to_pool);

    if let Some(target) = state.class_mut(target_id) {
        target.credit_wealth(taken - to_pool);
    } else {
        warn!(target = target_id.as_str(), "exploitation edge has unknown target, rent stranded");
        state.economy.deposit(taken - to_pool);
    }

    if let Some(edge) = state.relationships.get_mut(index) {
        edge.value_flow = taken;
        if wage_base > 0.0 && taken > 0.0 {
            edge.accrue_tension(params.tension_accrual_rate * (taken / wage_base));
        }
    }
}

/// Draw tribute along one edge into the rent pool.
///
/// The draw is the rent formula over the source's current hoard (the
/// tributary base), damped by its consciousness and the profit
/// multiplier.
fn collect_tribute(
    state: &mut WorldState,
    params: &EconomyParams,
    index: usize,
    source_id: &ClassId,
    trpf: f64,
) {
    let Some(source) = state.class(source_id) else {
        warn!(source = source_id.as_str(), "tribute edge has unknown source, skipping");
        return;
    };
    if !source.active {
        return;
    }
    let wealth_before = source.wealth;
    let consciousness = source.ideology.class_consciousness;
    let gross = imperial_rent(params.tribute_rate, wealth_before, consciousness) * trpf;

    let taken = match state.class_mut(source_id) {
        Some(class) => class.deduct_wealth(gross),
        None => return,
    };
    state.economy.deposit(taken);

    if let Some(edge) = state.relationships.get_mut(index) {
        edge.value_flow = taken;
        if wealth_before > 0.0 && taken > 0.0 {
            edge.accrue_tension(params.tension_accrual_rate * (taken / wealth_before));
        }
    }
}

/// Pay super-wages from the pool to the edge's target class.
fn pay_super_wages(state: &mut WorldState, index: usize, target_id: &ClassId) {
    let Some(target) = state.class(target_id) else {
        warn!(target = target_id.as_str(), "wage edge has unknown target, skipping");
        return;
    };
    if !target.active {
        return;
    }
    let requested = state.economy.current_super_wage_rate * target.population as f64;
    let paid = state.economy.withdraw(requested);
    if let Some(target) = state.class_mut(target_id) {
        target.credit_wealth(paid);
        target.wage_income += paid;
    }
    if let Some(edge) = state.relationships.get_mut(index) {
        edge.value_flow = paid;
    }
}

/// Pay a capped client-state subsidy from the pool.
fn pay_subsidy(state: &mut WorldState, params: &EconomyParams, index: usize, target_id: &ClassId) {
    let Some(target) = state.class(target_id) else {
        warn!(target = target_id.as_str(), "subsidy edge has unknown target, skipping");
        return;
    };
    if !target.active {
        return;
    }
    let mut requested = params.subsidy_rate * target.population as f64;
    if let Some(edge) = state.relationships.get(index)
        && let Some(cap) = edge.subsidy_cap
    {
        requested = requested.min(cap.max(0.0));
    }
    let paid = state.economy.withdraw(requested);
    if let Some(target) = state.class_mut(target_id) {
        target.credit_wealth(paid);
        target.wage_income += paid;
    }
    if let Some(edge) = state.relationships.get_mut(index) {
        edge.value_flow = paid;
    }
}

/// Mean tension over extraction edges (exploitation and tribute), or 0
/// when none exist.
fn average_extraction_tension(state: &WorldState) -> f64 {
    let mut sum = 0.0;
    let mut count: u32 = 0;
    for edge in &state.relationships {
        if matches!(edge.kind, EdgeKind::Exploitation | EdgeKind::Tribute) {
            sum += edge.tension;
            count = count.saturating_add(1);
        }
    }
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

/// The bourgeois decision heuristic over pool ratio and average tension.
fn choose_stance(pool_ratio: f64, average_tension: f64, params: &EconomyParams) -> PolicyStance {
    if pool_ratio < params.crisis_pool_ratio {
        PolicyStance::Crisis
    } else if pool_ratio < params.austerity_pool_ratio {
        if average_tension > params.iron_fist_tension_threshold {
            PolicyStance::IronFist
        } else {
            PolicyStance::Austerity
        }
    } else if pool_ratio >= params.bribery_pool_ratio
        && average_tension < params.bribery_tension_threshold
    {
        PolicyStance::Bribery
    } else {
        PolicyStance::NoChange
    }
}

/// Apply a stance's levers: the super-wage rate and the system-wide
/// repression level.
fn apply_stance(state: &mut WorldState, stance: PolicyStance, params: &EconomyParams) {
    let economy = &mut state.economy;
    match stance {
        PolicyStance::Crisis => {
            economy.current_super_wage_rate *= params.crisis_wage_factor;
            economy.current_repression_level =
                (economy.current_repression_level + params.repression_step).clamp(0.0, 1.0);
        }
        PolicyStance::IronFist => {
            economy.current_repression_level =
                (economy.current_repression_level + params.repression_step).clamp(0.0, 1.0);
        }
        PolicyStance::Austerity => {
            economy.current_super_wage_rate *= params.austerity_wage_factor;
        }
        PolicyStance::Bribery => {
            economy.current_super_wage_rate *= params.bribery_wage_factor;
        }
        PolicyStance::NoChange => {}
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hegemonia_types::{ClassRole, GlobalEconomy, Ideology, Relationship, SocialClass};

    use super::*;

    fn extraction_world() -> WorldState {
        let mut state = WorldState::new(GlobalEconomy::new(500.0, 2.0));
        state.tick = 1;
        let mut workers =
            SocialClass::new("workers", ClassRole::PeripheryProletariat, 100.0, 1);
        workers.value_produced = 2.0;
        state.insert_class(workers);
        state.insert_class(
            SocialClass::new("owners", ClassRole::CoreBourgeoisie, 50.0, 1)
                .with_subsistence_multiplier(0.0),
        );
        state.add_relationship(Relationship::new(EdgeKind::Exploitation, "workers", "owners"));
        state
    }

    fn params() -> EconomyParams {
        EconomyParams {
            rent_pool_decay_rate: 0.0,
            trpf_coefficient: 0.0,
            ..EconomyParams::default()
        }
    }

    #[test]
    fn extraction_moves_rent_from_wage_base() {
        let mut state = extraction_world();
        let params = params();
        let _ = run(&mut state, &params);

        // Gross rent: alpha 0.3 * wage base 2.0 * (1 - consciousness 0).
        let edge = state.relationships.first().unwrap();
        assert!((edge.value_flow - 0.6).abs() < 1e-9);
        assert!(edge.tension > 0.0);

        // Pool captures its share; the owner keeps the rest net of a
        // zero subsistence cost.
        let owner = state.class(&ClassId::new("owners")).unwrap();
        assert!((owner.wealth - (50.0 + 0.6 * 0.6)).abs() < 1e-9);
        assert!((state.economy.imperial_rent_pool - (500.0 + 0.6 * 0.4)).abs() < 1e-9);
    }

    #[test]
    fn subsistence_cost_scales_with_population_and_multiplier() {
        let mut state = extraction_world();
        state.class_mut(&ClassId::new("workers")).unwrap().population = 10;
        let params = params();
        let _ = run(&mut state, &params);

        // 10 heads * base 1.0 * multiplier 1.5, plus the rent draw.
        let workers = state.class(&ClassId::new("workers")).unwrap();
        assert!((workers.wealth - (100.0 - 15.0 - 0.6)).abs() < 1e-9);
    }

    #[test]
    fn super_wages_flow_from_pool_and_count_as_wage_income() {
        let mut state = WorldState::new(GlobalEconomy::new(100.0, 2.0));
        state.tick = 1;
        state.insert_class(
            SocialClass::new("aristocracy", ClassRole::LaborAristocracy, 10.0, 3)
                .with_subsistence_multiplier(0.0),
        );
        state.insert_class(SocialClass::new("owners", ClassRole::CoreBourgeoisie, 0.0, 1));
        state.add_relationship(Relationship::new(EdgeKind::Wages, "owners", "aristocracy"));

        let _ = run(&mut state, &params());

        let aristocracy = state.class(&ClassId::new("aristocracy")).unwrap();
        assert!((aristocracy.wage_income - 6.0).abs() < 1e-9);
        assert!((state.economy.imperial_rent_pool - 94.0).abs() < 1e-9);
    }

    #[test]
    fn tribute_applies_the_rent_formula_to_the_hoard() {
        let mut state = WorldState::new(GlobalEconomy::new(100.0, 2.0));
        state.tick = 1;
        state.insert_class(
            SocialClass::new("comprador", ClassRole::CompradorBourgeoisie, 200.0, 1)
                .with_subsistence_multiplier(0.0)
                .with_ideology(Ideology::new(0.5, 0.0)),
        );
        state.insert_class(
            SocialClass::new("metropole", ClassRole::CoreBourgeoisie, 0.0, 1)
                .with_subsistence_multiplier(0.0),
        );
        state.add_relationship(Relationship::new(EdgeKind::Tribute, "comprador", "metropole"));

        let _ = run(&mut state, &params());

        // Rate 0.05 over a 200 hoard, halved by consciousness 0.5.
        let edge = state.relationships.first().unwrap();
        assert!((edge.value_flow - 5.0).abs() < 1e-9);
        assert!((state.economy.imperial_rent_pool - 105.0).abs() < 1e-9);
        let comprador = state.class(&ClassId::new("comprador")).unwrap();
        assert!((comprador.wealth - 195.0).abs() < 1e-9);
    }

    #[test]
    fn subsidy_respects_cap() {
        let mut state = WorldState::new(GlobalEconomy::new(100.0, 2.0));
        state.tick = 1;
        state.insert_class(
            SocialClass::new("clients", ClassRole::CompradorBourgeoisie, 10.0, 100)
                .with_subsistence_multiplier(0.0),
        );
        state.insert_class(SocialClass::new("owners", ClassRole::CoreBourgeoisie, 0.0, 1));
        state.add_relationship(
            Relationship::new(EdgeKind::ClientStateSubsidy, "owners", "clients")
                .with_subsidy_cap(5.0),
        );

        let _ = run(&mut state, &params());

        // Uncapped request would be 0.5 * 100 heads = 50.
        let clients = state.class(&ClassId::new("clients")).unwrap();
        assert!((clients.wage_income - 5.0).abs() < 1e-9);
    }

    #[test]
    fn empty_pool_forces_crisis_stance() {
        let mut state = extraction_world();
        state.economy.imperial_rent_pool = 0.0;
        let events = run(&mut state, &params());

        assert_eq!(state.stance, PolicyStance::Crisis);
        assert!(state.economy.current_repression_level > 0.0);
        assert!((state.economy.current_super_wage_rate - 1.0).abs() < 1e-9);
        assert!(events.iter().any(|e| matches!(
            e.details,
            EventDetails::PolicyShift { current: PolicyStance::Crisis, .. }
        )));
    }

    #[test]
    fn depleted_pool_with_high_tension_means_iron_fist() {
        let mut state = extraction_world();
        state.economy.imperial_rent_pool = 100.0;
        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.9;
        }
        let _ = run(&mut state, &params());
        assert_eq!(state.stance, PolicyStance::IronFist);
    }

    #[test]
    fn full_pool_with_low_tension_means_bribery() {
        let mut state = extraction_world();
        let _ = run(&mut state, &params());
        assert_eq!(state.stance, PolicyStance::Bribery);
        assert!(state.economy.current_super_wage_rate > 2.0);
    }

    #[test]
    fn inactive_source_is_skipped() {
        let mut state = extraction_world();
        state.class_mut(&ClassId::new("workers")).unwrap().active = false;
        let _ = run(&mut state, &params());
        let edge = state.relationships.first().unwrap();
        assert!(edge.value_flow.abs() < 1e-12);
    }

    #[test]
    fn wage_baseline_rolls_forward() {
        let mut state = extraction_world();
        state.class_mut(&ClassId::new("workers")).unwrap().wage_income = 3.0;
        let _ = run(&mut state, &params());
        let workers = state.class(&ClassId::new("workers")).unwrap();
        assert!((workers.previous_wage_income - 3.0).abs() < 1e-12);
        assert!(workers.wage_income.abs() < 1e-12);
    }
}
