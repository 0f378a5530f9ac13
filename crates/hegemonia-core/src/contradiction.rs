//! The contradiction engine: detection, lifecycle, and resolution.
//!
//! Runs last each tick, after the topology pass, so detection rules and
//! transformation conditions see the tick's final phase and stance.
//! Lifecycle transitions follow the intensity value through
//! Latent -> Active -> Escalating -> Resolving into a terminal state;
//! terminal entries stay in the registry as history, are never stepped
//! again, and do not block a later re-detection of the same conflict.
//!
//! Resolution is the advisor's call. The engine filters the offered
//! methods first (revolution is only on the table while a participant
//! class sits below its acquiescence/revolution crossover), validates
//! the advisor's pick, and applies the chosen method's effects. A
//! suppression pick displaces the conflict instead of ending it: a
//! latent child contradiction is seeded with a parent pointer back to
//! the suppressed entry.

use hegemonia_formulas::crossover_threshold;
use hegemonia_types::{
    Antagonism, ClassId, Contradiction, ContradictionId, ContradictionScope, ContradictionState,
    EdgeKind, Effect, Event, EventDetails, IntensityMetric, PolicyStance, ResolutionMethod,
    ResolutionMethodKind, TransformCondition, WorldState,
};
use tracing::{debug, info, warn};

use crate::config::ContradictionParams;
use crate::decision::ResolutionAdvisor;

/// Registry id of the capital-labor contradiction.
pub const CAPITAL_LABOR: &str = "capital-labor";
/// Registry id of the core-periphery drain contradiction.
pub const CORE_PERIPHERY_DRAIN: &str = "core-periphery-drain";
/// Registry id of the super-wage erosion contradiction.
pub const SUPER_WAGE_EROSION: &str = "super-wage-erosion";

/// Run the contradiction engine for one tick.
pub fn run(
    state: &mut WorldState,
    params: &ContradictionParams,
    advisor: &dyn ResolutionAdvisor,
) -> Vec<Event> {
    let mut events = Vec::new();

    // Entries detected this tick are registered latent and first
    // stepped on the following tick.
    let ids: Vec<ContradictionId> = state
        .contradictions
        .iter()
        .filter(|(_, c)| !c.state.is_terminal())
        .map(|(id, _)| id.clone())
        .collect();

    let detected = detect(state, params);
    register(state, detected, &mut events);

    let mut seeded = Vec::new();
    for id in ids {
        let Some(mut contradiction) = state.contradictions.remove(&id) else {
            continue;
        };
        step(&mut contradiction, state, params, advisor, &mut events, &mut seeded);
        state.contradictions.insert(id, contradiction);
    }
    register(state, seeded, &mut events);

    events
}

/// Advance one non-terminal contradiction by one tick.
fn step(
    contradiction: &mut Contradiction,
    state: &mut WorldState,
    params: &ContradictionParams,
    advisor: &dyn ResolutionAdvisor,
    events: &mut Vec<Event>,
    seeded: &mut Vec<Contradiction>,
) {
    let tick = state.tick;
    let value = evaluate_metric(state, &contradiction.metric);
    let band_rose = contradiction.update_intensity(value);
    contradiction.ticks_in_state = contradiction.ticks_in_state.saturating_add(1);

    if band_rose {
        events.push(Event::new(
            tick,
            EventDetails::ContradictionIntensified {
                contradiction_id: contradiction.id.clone(),
                intensity: contradiction.intensity,
                value: contradiction.intensity_value,
            },
        ));
    }

    if !contradiction.transform_conditions.is_empty()
        && contradiction
            .transform_conditions
            .iter()
            .all(|condition| holds(state, condition))
    {
        transform(contradiction, tick, events, seeded);
        return;
    }

    match contradiction.state {
        ContradictionState::Latent => {
            if contradiction.intensity_value >= params.activation_intensity {
                contradiction.transition_to(ContradictionState::Active);
            }
        }
        ContradictionState::Active => {
            if contradiction.intensity_value >= params.escalation_intensity {
                contradiction.transition_to(ContradictionState::Escalating);
            } else if contradiction.intensity_value <= contradiction.resolution_bound {
                contradiction.transition_to(ContradictionState::Resolving);
            }
        }
        ContradictionState::Escalating => {
            if contradiction.intensity_value >= params.rupture_intensity {
                resolve(contradiction, state, advisor, events, seeded);
            } else if contradiction.intensity_value < params.escalation_intensity {
                contradiction.transition_to(ContradictionState::Active);
            }
        }
        ContradictionState::Resolving => {
            if contradiction.intensity_value <= contradiction.resolution_bound {
                resolve(contradiction, state, advisor, events, seeded);
            } else {
                // The conflict rebounded before winding down.
                contradiction.transition_to(ContradictionState::Active);
            }
        }
        ContradictionState::Resolved | ContradictionState::Transformed => {}
    }
}

/// Terminate a contradiction through transformation, seeding its
/// successor.
fn transform(
    contradiction: &mut Contradiction,
    tick: u64,
    events: &mut Vec<Event>,
    seeded: &mut Vec<Contradiction>,
) {
    let successor_id = ContradictionId::new(format!("{}-renewed-{tick}", contradiction.id));
    let successor = Contradiction::new(
        successor_id.clone(),
        contradiction.participants.clone(),
        contradiction.scope,
        Antagonism::Antagonistic,
        contradiction.metric.clone(),
        tick,
    )
    .with_parent(contradiction.id.clone());
    let successor = contradiction
        .methods
        .iter()
        .cloned()
        .fold(successor, Contradiction::with_method);

    info!(
        contradiction = contradiction.id.as_str(),
        successor = successor_id.as_str(),
        "contradiction transformed"
    );
    contradiction.transition_to(ContradictionState::Transformed);
    events.push(Event::new(
        tick,
        EventDetails::ContradictionTransformed {
            contradiction_id: contradiction.id.clone(),
            successor: Some(successor_id),
        },
    ));
    seeded.push(successor);
}

/// Resolve a contradiction through an advisor-chosen method.
///
/// With no sustainable method on offer the contradiction falls back to
/// the active state instead of terminating.
fn resolve(
    contradiction: &mut Contradiction,
    state: &mut WorldState,
    advisor: &dyn ResolutionAdvisor,
    events: &mut Vec<Event>,
    seeded: &mut Vec<Contradiction>,
) {
    let tick = state.tick;
    let available = available_kinds(contradiction, state);
    let chosen = advisor
        .choose_method(contradiction, &available)
        .filter(|kind| available.contains(kind))
        .or_else(|| available.first().copied());
    let Some(kind) = chosen else {
        debug!(
            contradiction = contradiction.id.as_str(),
            "no sustainable resolution method, conflict persists"
        );
        contradiction.transition_to(ContradictionState::Active);
        return;
    };

    let effects: Vec<Effect> = contradiction
        .methods
        .iter()
        .find(|method| method.kind == kind)
        .map(|method| method.effects.clone())
        .unwrap_or_default();
    for effect in &effects {
        apply_effect(state, effect);
    }

    if kind == ResolutionMethodKind::Suppression {
        let child_id = ContradictionId::new(format!("{}-displaced-{tick}", contradiction.id));
        let child = Contradiction::new(
            child_id,
            contradiction.participants.clone(),
            ContradictionScope::Particular,
            contradiction.antagonism,
            contradiction.metric.clone(),
            tick,
        )
        .with_parent(contradiction.id.clone());
        let child = contradiction
            .methods
            .iter()
            .cloned()
            .fold(child, Contradiction::with_method);
        seeded.push(child);
    }

    info!(
        contradiction = contradiction.id.as_str(),
        method = ?kind,
        "contradiction resolved"
    );
    contradiction.transition_to(ContradictionState::Resolving);
    contradiction.transition_to(ContradictionState::Resolved);
    events.push(Event::new(
        tick,
        EventDetails::ContradictionResolved {
            contradiction_id: contradiction.id.clone(),
            method: kind,
        },
    ));
}

/// Method kinds the world can currently sustain, in offer order.
///
/// Revolution requires at least one participant class whose per-capita
/// wealth has sunk below its acquiescence/revolution crossover.
fn available_kinds(contradiction: &Contradiction, state: &WorldState) -> Vec<ResolutionMethodKind> {
    contradiction
        .methods
        .iter()
        .map(|method| method.kind)
        .filter(|kind| {
            *kind != ResolutionMethodKind::Revolution || revolution_viable(contradiction, state)
        })
        .collect()
}

fn revolution_viable(contradiction: &Contradiction, state: &WorldState) -> bool {
    contradiction.participants.iter().any(|participant| {
        state
            .class(&ClassId::new(participant.clone()))
            .filter(|class| class.active)
            .is_some_and(|class| {
                let repression = (class.repression_faced + state.economy.current_repression_level)
                    .clamp(0.0, 1.0);
                let cohesion = class.organization * class.ideology.class_consciousness;
                let crossover =
                    crossover_threshold(class.subsistence_threshold, cohesion, repression);
                class.wealth_per_capita() < crossover
            })
    })
}

/// Evaluate a contradiction's intensity metric against the snapshot.
fn evaluate_metric(state: &WorldState, metric: &IntensityMetric) -> f64 {
    match metric {
        IntensityMetric::MeanExploitationTension => {
            mean_tension(state, EdgeKind::Exploitation)
        }
        IntensityMetric::RentPoolDepletion => (1.0 - state.economy.pool_ratio()).clamp(0.0, 1.0),
        IntensityMetric::WageErosion { baseline_rate } => {
            if *baseline_rate <= 0.0 {
                0.0
            } else {
                (1.0 - state.economy.current_super_wage_rate / baseline_rate).max(0.0)
            }
        }
    }
}

/// Whether a transformation predicate holds against the snapshot.
fn holds(state: &WorldState, condition: &TransformCondition) -> bool {
    match condition {
        TransformCondition::ConsciousnessAbove { class, bound } => state
            .class(class)
            .is_some_and(|c| c.ideology.class_consciousness > *bound),
        TransformCondition::TensionAbove { kind, bound } => mean_tension(state, *kind) > *bound,
        TransformCondition::PoolRatioBelow { bound } => state.economy.pool_ratio() < *bound,
        TransformCondition::PhaseReached { phase } => state.phase == *phase,
    }
}

fn mean_tension(state: &WorldState, kind: EdgeKind) -> f64 {
    let mut sum = 0.0;
    let mut count: u32 = 0;
    for edge in state.relationships_of_kind(kind) {
        sum += edge.tension;
        count = count.saturating_add(1);
    }
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}

/// Apply one resolution effect. Missing targets are logged and skipped.
fn apply_effect(state: &mut WorldState, effect: &Effect) {
    match effect {
        Effect::TransferWealth { from, to, fraction } => {
            let amount = match state.class(from) {
                Some(class) => class.wealth * fraction.clamp(0.0, 1.0),
                None => {
                    warn!(class = from.as_str(), "transfer source missing, effect skipped");
                    return;
                }
            };
            let taken = state
                .class_mut(from)
                .map_or(0.0, |class| class.deduct_wealth(amount));
            if let Some(class) = state.class_mut(to) {
                class.credit_wealth(taken);
            } else {
                warn!(class = to.as_str(), "transfer target missing, wealth stranded");
            }
        }
        Effect::AdjustWealth { class, amount } => {
            if let Some(target) = state.class_mut(class) {
                if *amount >= 0.0 {
                    target.credit_wealth(*amount);
                } else {
                    let _ = target.deduct_wealth(-amount);
                }
            } else {
                warn!(class = class.as_str(), "wealth adjustment target missing, effect skipped");
            }
        }
        Effect::ShiftConsciousness { class, delta } => {
            if let Some(target) = state.class_mut(class) {
                target.ideology.shift_consciousness(*delta);
            } else {
                warn!(class = class.as_str(), "consciousness target missing, effect skipped");
            }
        }
        Effect::AdjustOrganization { class, delta } => {
            if let Some(target) = state.class_mut(class) {
                target.organization = (target.organization + delta).clamp(0.0, 1.0);
            } else {
                warn!(class = class.as_str(), "organization target missing, effect skipped");
            }
        }
        Effect::AdjustRepressionFaced { class, delta } => {
            if let Some(target) = state.class_mut(class) {
                target.repression_faced = (target.repression_faced + delta).clamp(0.0, 1.0);
            } else {
                warn!(class = class.as_str(), "repression target missing, effect skipped");
            }
        }
        Effect::AdjustWageRate { delta } => {
            state.economy.current_super_wage_rate =
                (state.economy.current_super_wage_rate + delta).max(0.0);
        }
        Effect::AdjustRepressionLevel { delta } => {
            state.economy.current_repression_level =
                (state.economy.current_repression_level + delta).clamp(0.0, 1.0);
        }
        Effect::ReleaseTension { kind, amount } => {
            let vent = amount.max(0.0);
            for edge in state
                .relationships
                .iter_mut()
                .filter(|edge| edge.kind == *kind)
            {
                edge.tension = (edge.tension - vent).max(0.0);
            }
        }
    }
}

/// Detection rules: structural conflicts read off the snapshot.
///
/// A conflict is only blocked while a live entry tracks its metric;
/// resolved and transformed entries are history, and the same conflict
/// can flare up again under a tick-suffixed id.
fn detect(state: &WorldState, params: &ContradictionParams) -> Vec<Contradiction> {
    let mut found = Vec::new();

    if !conflict_open(state, |m| matches!(m, IntensityMetric::MeanExploitationTension))
        && mean_tension(state, EdgeKind::Exploitation) > params.detect_exploitation_tension
        && let Some(edge) = state
            .relationships_of_kind(EdgeKind::Exploitation)
            .max_by(|a, b| a.tension.total_cmp(&b.tension))
    {
        let exploited = ClassId::new(edge.source_id.clone());
        let beneficiary = ClassId::new(edge.target_id.clone());
        found.push(capital_labor(
            free_id(state, CAPITAL_LABOR),
            state.tick,
            &exploited,
            &beneficiary,
        ));
    }

    if !conflict_open(state, |m| matches!(m, IntensityMetric::RentPoolDepletion))
        && state.economy.initial_rent_pool > 0.0
        && state.economy.pool_ratio() < params.detect_drain_pool_ratio
    {
        found.push(core_periphery_drain(free_id(state, CORE_PERIPHERY_DRAIN), state));
    }

    if !conflict_open(state, |m| matches!(m, IntensityMetric::WageErosion { .. }))
        && matches!(state.stance, PolicyStance::Austerity | PolicyStance::Crisis)
    {
        let bribed: Vec<ClassId> = state
            .active_classes()
            .filter(|class| is_bribed(class))
            .map(|class| class.id.clone())
            .collect();
        if !bribed.is_empty() {
            found.push(super_wage_erosion(free_id(state, SUPER_WAGE_EROSION), state, bribed));
        }
    }

    found
}

/// Whether a non-terminal registry entry (including displaced children
/// and renewed successors) already tracks a matching metric.
fn conflict_open(state: &WorldState, matches: impl Fn(&IntensityMetric) -> bool) -> bool {
    state
        .contradictions
        .values()
        .any(|c| !c.state.is_terminal() && matches(&c.metric))
}

/// Registry id for a re-detectable conflict: the base name while it is
/// free, the base suffixed with the detection tick once terminal
/// history occupies it.
fn free_id(state: &WorldState, base: &str) -> ContradictionId {
    let id = ContradictionId::new(base);
    if state.contradictions.contains_key(&id) {
        ContradictionId::new(format!("{base}-{}", state.tick))
    } else {
        id
    }
}

/// Whether a class lives on super-wages: wages above the value it
/// produces, or the structural labor-aristocracy role with no production
/// of its own.
fn is_bribed(class: &hegemonia_types::SocialClass) -> bool {
    if class.value_produced > 0.0 {
        hegemonia_formulas::is_labor_aristocracy(class.wage_income, class.value_produced)
            .unwrap_or(false)
    } else {
        class.role == hegemonia_types::ClassRole::LaborAristocracy
    }
}

fn capital_labor(
    id: ContradictionId,
    tick: u64,
    exploited: &ClassId,
    beneficiary: &ClassId,
) -> Contradiction {
    Contradiction::new(
        id,
        vec![exploited.as_str().to_owned(), beneficiary.as_str().to_owned()],
        ContradictionScope::Universal,
        Antagonism::Antagonistic,
        IntensityMetric::MeanExploitationTension,
        tick,
    )
    .with_method(ResolutionMethod {
        kind: ResolutionMethodKind::Reform,
        effects: vec![
            Effect::AdjustWageRate { delta: 0.5 },
            Effect::ReleaseTension {
                kind: EdgeKind::Exploitation,
                amount: 0.3,
            },
        ],
    })
    .with_method(ResolutionMethod {
        kind: ResolutionMethodKind::Suppression,
        effects: vec![
            Effect::AdjustRepressionLevel { delta: 0.2 },
            Effect::AdjustRepressionFaced {
                class: exploited.clone(),
                delta: 0.2,
            },
            Effect::ReleaseTension {
                kind: EdgeKind::Exploitation,
                amount: 0.2,
            },
        ],
    })
    .with_method(ResolutionMethod {
        kind: ResolutionMethodKind::Revolution,
        effects: vec![
            Effect::TransferWealth {
                from: beneficiary.clone(),
                to: exploited.clone(),
                fraction: 0.5,
            },
            Effect::AdjustOrganization {
                class: exploited.clone(),
                delta: 0.3,
            },
            Effect::AdjustRepressionLevel { delta: -0.3 },
            Effect::ReleaseTension {
                kind: EdgeKind::Exploitation,
                amount: 1.0,
            },
        ],
    })
    .with_transform_condition(TransformCondition::ConsciousnessAbove {
        class: exploited.clone(),
        bound: 0.8,
    })
    .with_transform_condition(TransformCondition::PhaseReached {
        phase: hegemonia_types::PercolationPhase::Liquid,
    })
}

fn core_periphery_drain(id: ContradictionId, state: &WorldState) -> Contradiction {
    let participants: Vec<String> = state
        .active_classes()
        .map(|class| class.id.as_str().to_owned())
        .collect();
    Contradiction::new(
        id,
        participants,
        ContradictionScope::Universal,
        Antagonism::Antagonistic,
        IntensityMetric::RentPoolDepletion,
        state.tick,
    )
    .with_method(ResolutionMethod {
        kind: ResolutionMethodKind::Reform,
        effects: vec![Effect::AdjustWageRate { delta: -0.2 }],
    })
    .with_method(ResolutionMethod {
        kind: ResolutionMethodKind::Suppression,
        effects: vec![Effect::AdjustRepressionLevel { delta: 0.2 }],
    })
    .with_transform_condition(TransformCondition::PoolRatioBelow { bound: 0.05 })
}

fn super_wage_erosion(
    id: ContradictionId,
    state: &WorldState,
    bribed: Vec<ClassId>,
) -> Contradiction {
    let first = bribed.first().cloned().unwrap_or_else(|| ClassId::new("labor-aristocracy"));
    let suppression_effects = bribed
        .iter()
        .map(|class| Effect::AdjustRepressionFaced {
            class: class.clone(),
            delta: 0.1,
        })
        .collect();
    Contradiction::new(
        id,
        bribed.iter().map(|id| id.as_str().to_owned()).collect(),
        ContradictionScope::Particular,
        Antagonism::NonAntagonistic,
        IntensityMetric::WageErosion {
            baseline_rate: state.economy.current_super_wage_rate,
        },
        state.tick,
    )
    .with_method(ResolutionMethod {
        kind: ResolutionMethodKind::Reform,
        effects: vec![Effect::AdjustWageRate { delta: 0.5 }],
    })
    .with_method(ResolutionMethod {
        kind: ResolutionMethodKind::Suppression,
        effects: suppression_effects,
    })
    .with_transform_condition(TransformCondition::ConsciousnessAbove {
        class: first,
        bound: 0.6,
    })
}

/// Insert new contradictions into the registry, refusing id collisions.
fn register(state: &mut WorldState, detected: Vec<Contradiction>, events: &mut Vec<Event>) {
    let tick = state.tick;
    for mut contradiction in detected {
        if state.contradictions.contains_key(&contradiction.id) {
            warn!(
                contradiction = contradiction.id.as_str(),
                "registry already holds this id, new entry refused"
            );
            continue;
        }
        let value = evaluate_metric(state, &contradiction.metric);
        let _ = contradiction.update_intensity(value);
        debug!(
            contradiction = contradiction.id.as_str(),
            intensity = contradiction.intensity_value,
            "contradiction detected"
        );
        events.push(Event::new(
            tick,
            EventDetails::ContradictionDetected {
                contradiction_id: contradiction.id.clone(),
                participants: contradiction.participants.clone(),
                intensity: contradiction.intensity,
            },
        ));
        state
            .contradictions
            .insert(contradiction.id.clone(), contradiction);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hegemonia_types::{ClassRole, GlobalEconomy, Ideology, Relationship, SocialClass};

    use crate::decision::{FixedAdvisor, HeuristicAdvisor};

    use super::*;

    fn tense_world(tension: f64) -> WorldState {
        let mut state = WorldState::new(GlobalEconomy::new(500.0, 2.0));
        state.tick = 5;
        state.insert_class(SocialClass::new(
            "workers",
            ClassRole::PeripheryProletariat,
            100.0,
            100,
        ));
        state.insert_class(SocialClass::new("owners", ClassRole::CoreBourgeoisie, 900.0, 10));
        let mut edge = Relationship::new(EdgeKind::Exploitation, "workers", "owners");
        edge.tension = tension;
        state.add_relationship(edge);
        state
    }

    fn id(raw: &str) -> ContradictionId {
        ContradictionId::new(raw)
    }

    #[test]
    fn tension_above_threshold_detects_capital_labor() {
        let mut state = tense_world(0.4);
        let events = run(&mut state, &ContradictionParams::default(), &HeuristicAdvisor);

        let c = state.contradictions.get(&id(CAPITAL_LABOR)).unwrap();
        assert_eq!(c.participants, vec!["workers".to_owned(), "owners".to_owned()]);
        assert!(events.iter().any(|e| matches!(
            e.details,
            EventDetails::ContradictionDetected { .. }
        )));
    }

    #[test]
    fn calm_world_detects_nothing() {
        let mut state = tense_world(0.05);
        let events = run(&mut state, &ContradictionParams::default(), &HeuristicAdvisor);
        assert!(state.contradictions.is_empty());
        assert!(events.is_empty());
    }

    #[test]
    fn lifecycle_climbs_with_intensity() {
        let mut state = tense_world(0.4);
        let params = ContradictionParams::default();
        let _ = run(&mut state, &params, &HeuristicAdvisor);
        // Detection tick leaves the entry latent; the next step sees a
        // medium intensity and activates it.
        let _ = run(&mut state, &params, &HeuristicAdvisor);
        assert_eq!(
            state.contradictions.get(&id(CAPITAL_LABOR)).unwrap().state,
            ContradictionState::Active
        );

        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.6;
        }
        let _ = run(&mut state, &params, &HeuristicAdvisor);
        assert_eq!(
            state.contradictions.get(&id(CAPITAL_LABOR)).unwrap().state,
            ContradictionState::Escalating
        );
    }

    #[test]
    fn rupture_with_suppression_seeds_a_displaced_child() {
        let mut state = tense_world(0.4);
        let params = ContradictionParams::default();
        let advisor = FixedAdvisor(ResolutionMethodKind::Suppression);
        let _ = run(&mut state, &params, &advisor);
        let _ = run(&mut state, &params, &advisor);
        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.6;
        }
        let _ = run(&mut state, &params, &advisor);
        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.9;
        }
        let events = run(&mut state, &params, &advisor);

        let parent = state.contradictions.get(&id(CAPITAL_LABOR)).unwrap();
        assert_eq!(parent.state, ContradictionState::Resolved);
        assert!(events.iter().any(|e| matches!(
            e.details,
            EventDetails::ContradictionResolved {
                method: ResolutionMethodKind::Suppression,
                ..
            }
        )));

        // Suppression raised repression and seeded a latent child
        // pointing back at the parent.
        assert!(state.economy.current_repression_level > 0.0);
        let child = state
            .contradictions
            .values()
            .find(|c| c.parent.as_deref_id() == Some(CAPITAL_LABOR));
        let child = child.unwrap();
        assert_eq!(child.state, ContradictionState::Latent);
        assert_eq!(child.scope, ContradictionScope::Particular);
    }

    #[test]
    fn revolution_requires_an_immiserated_participant() {
        let mut state = tense_world(0.4);
        // Well-fed workers: revolution is filtered from the offer.
        let c = capital_labor(id(CAPITAL_LABOR), 0, &ClassId::new("workers"), &ClassId::new("owners"));
        let kinds = available_kinds(&c, &state);
        assert!(!kinds.contains(&ResolutionMethodKind::Revolution));

        // Destitute, organized, conscious workers put it back on the
        // table.
        let workers = state.class_mut(&ClassId::new("workers")).unwrap();
        workers.wealth = 0.0;
        workers.organization = 0.8;
        workers.ideology = Ideology::new(0.9, 0.0);
        let kinds = available_kinds(&c, &state);
        assert!(kinds.contains(&ResolutionMethodKind::Revolution));
    }

    #[test]
    fn revolution_transfers_wealth_and_vents_tension() {
        let mut state = tense_world(0.4);
        {
            let workers = state.class_mut(&ClassId::new("workers")).unwrap();
            workers.wealth = 0.0;
            workers.organization = 0.8;
            workers.ideology = Ideology::new(0.9, 0.0);
        }
        let params = ContradictionParams::default();
        let advisor = FixedAdvisor(ResolutionMethodKind::Revolution);
        let _ = run(&mut state, &params, &advisor);
        let _ = run(&mut state, &params, &advisor);
        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.6;
        }
        let _ = run(&mut state, &params, &advisor);
        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.9;
        }
        let _ = run(&mut state, &params, &advisor);

        assert!((state.class(&ClassId::new("workers")).unwrap().wealth - 450.0).abs() < 1e-9);
        assert!((state.class(&ClassId::new("owners")).unwrap().wealth - 450.0).abs() < 1e-9);
        assert!(state.relationships.first().unwrap().tension.abs() < 1e-12);
    }

    #[test]
    fn pool_depletion_detects_drain_and_transforms_at_the_floor() {
        let mut state = tense_world(0.0);
        state.economy.imperial_rent_pool = 100.0;
        let params = ContradictionParams::default();
        let _ = run(&mut state, &params, &HeuristicAdvisor);
        assert!(state.contradictions.contains_key(&id(CORE_PERIPHERY_DRAIN)));

        state.economy.imperial_rent_pool = 1.0;
        let events = run(&mut state, &params, &HeuristicAdvisor);
        let drain = state.contradictions.get(&id(CORE_PERIPHERY_DRAIN)).unwrap();
        assert_eq!(drain.state, ContradictionState::Transformed);
        assert!(events.iter().any(|e| matches!(
            e.details,
            EventDetails::ContradictionTransformed { successor: Some(_), .. }
        )));
        // The successor entered the registry as latent.
        assert!(state
            .contradictions
            .values()
            .any(|c| c.parent.as_deref_id() == Some(CORE_PERIPHERY_DRAIN)
                && c.state == ContradictionState::Latent));
    }

    #[test]
    fn resolution_reopens_detection_under_a_fresh_id() {
        let mut state = tense_world(0.4);
        let params = ContradictionParams::default();
        let advisor = FixedAdvisor(ResolutionMethodKind::Reform);
        let _ = run(&mut state, &params, &advisor);
        let _ = run(&mut state, &params, &advisor);
        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.6;
        }
        let _ = run(&mut state, &params, &advisor);
        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.9;
        }
        let _ = run(&mut state, &params, &advisor);
        assert_eq!(
            state.contradictions.get(&id(CAPITAL_LABOR)).unwrap().state,
            ContradictionState::Resolved
        );

        // Tension climbs back past the threshold: the terminal entry is
        // history, not a block, and the conflict re-enters the registry
        // under a tick-suffixed id.
        if let Some(edge) = state.relationships.first_mut() {
            edge.tension = 0.9;
        }
        let events = run(&mut state, &params, &advisor);
        assert!(events.iter().any(|e| matches!(
            e.details,
            EventDetails::ContradictionDetected { .. }
        )));
        let reopened = state
            .contradictions
            .values()
            .find(|c| !c.state.is_terminal() && c.metric == IntensityMetric::MeanExploitationTension)
            .unwrap();
        assert_ne!(reopened.id, id(CAPITAL_LABOR));
        assert!(reopened.id.as_str().starts_with(CAPITAL_LABOR));
    }

    #[test]
    fn live_conflict_blocks_a_duplicate_detection() {
        let mut state = tense_world(0.4);
        let params = ContradictionParams::default();
        let _ = run(&mut state, &params, &HeuristicAdvisor);
        let _ = run(&mut state, &params, &HeuristicAdvisor);
        assert_eq!(state.contradictions.len(), 1);
    }

    #[test]
    fn austerity_with_a_bribed_class_detects_wage_erosion() {
        let mut state = tense_world(0.0);
        state.stance = PolicyStance::Austerity;
        state.insert_class(SocialClass::new(
            "aristocracy",
            ClassRole::LaborAristocracy,
            500.0,
            50,
        ));
        let _ = run(&mut state, &ContradictionParams::default(), &HeuristicAdvisor);

        let c = state.contradictions.get(&id(SUPER_WAGE_EROSION)).unwrap();
        assert_eq!(c.participants, vec!["aristocracy".to_owned()]);
        assert!(matches!(
            c.metric,
            IntensityMetric::WageErosion { baseline_rate } if (baseline_rate - 2.0).abs() < 1e-12
        ));
    }

    trait AsDerefId {
        fn as_deref_id(&self) -> Option<&str>;
    }

    impl AsDerefId for Option<ContradictionId> {
        fn as_deref_id(&self) -> Option<&str> {
            self.as_ref().map(ContradictionId::as_str)
        }
    }
}
