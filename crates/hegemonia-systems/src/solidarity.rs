//! Consciousness drift, solidarity transmission, and the derived
//! survival probabilities.
//!
//! All cross-class reads in this pass use a snapshot of consciousness
//! taken before any writes, so the order classes are visited in never
//! changes the outcome. Classes that produced nothing last tick get no
//! material drift signal; transmission and the derived probabilities
//! still apply to them.

use std::collections::BTreeMap;

use hegemonia_formulas::{
    acquiescence_probability, consciousness_drift, revolution_probability, solidarity_transmission,
};
use hegemonia_types::{ClassId, EdgeKind, Event, EventDetails, WorldState};
use tracing::warn;

use crate::config::ConsciousnessParams;

/// Run the solidarity and consciousness pass.
pub fn run(state: &mut WorldState, params: &ConsciousnessParams) -> Vec<Event> {
    let mut events = Vec::new();
    let tick = state.tick;

    let prior: BTreeMap<ClassId, f64> = state
        .classes
        .values()
        .map(|c| (c.id.clone(), c.ideology.class_consciousness))
        .collect();

    // Incoming solidarity pressure per class, from sources whose
    // prior-tick consciousness clears the activation threshold.
    let mut pressure: BTreeMap<ClassId, f64> = BTreeMap::new();
    for edge in state.relationships_of_kind(EdgeKind::Solidarity) {
        if edge.solidarity_strength <= 0.0 {
            continue;
        }
        let source = ClassId::new(edge.source_id.clone());
        if prior
            .get(&source)
            .is_some_and(|&c| c > params.activation_threshold)
        {
            *pressure
                .entry(ClassId::new(edge.target_id.clone()))
                .or_insert(0.0) += edge.solidarity_strength;
        }
    }

    let system_repression = state.economy.current_repression_level;
    let ids: Vec<ClassId> = state.active_classes().map(|c| c.id.clone()).collect();

    for id in &ids {
        let Some(class) = state.classes.get_mut(id) else {
            continue;
        };
        if class.value_produced <= 0.0 {
            continue;
        }
        let repression = (class.repression_faced + system_repression).clamp(0.0, 1.0);
        let wage_change = class.wage_income - class.previous_wage_income;
        let solidarity_pressure = pressure.get(id).copied().unwrap_or(0.0);

        match consciousness_drift(
            params.drift_k,
            class.wage_income,
            class.value_produced,
            params.drift_lambda,
            repression,
            wage_change,
            solidarity_pressure,
        ) {
            Ok(drift) => class.ideology.shift_consciousness(drift),
            Err(error) => {
                warn!(class = id.as_str(), %error, "skipping consciousness drift");
            }
        }
    }

    // Transmission over prior-tick values, applied after every drift.
    let mut transmitted: Vec<(ClassId, f64)> = Vec::new();
    for edge in state.relationships_of_kind(EdgeKind::Solidarity) {
        if edge.solidarity_strength <= 0.0 {
            continue;
        }
        let source = ClassId::new(edge.source_id.clone());
        let target = ClassId::new(edge.target_id.clone());
        let (Some(&source_c), Some(&target_c)) = (prior.get(&source), prior.get(&target)) else {
            warn!(
                source = source.as_str(),
                target = target.as_str(),
                "solidarity edge has unknown endpoint, skipping"
            );
            continue;
        };
        let delta = solidarity_transmission(
            source_c,
            target_c,
            edge.solidarity_strength,
            params.activation_threshold,
        );
        if delta != 0.0 {
            transmitted.push((target, delta));
        }
    }
    for (target, delta) in transmitted {
        if let Some(class) = state.classes.get_mut(&target) {
            class.ideology.shift_consciousness(delta);
        }
    }

    // Derived probabilities, and awakening detection against the
    // snapshot.
    for id in &ids {
        let Some(class) = state.classes.get_mut(id) else {
            continue;
        };
        class.p_acquiescence =
            acquiescence_probability(class.wealth_per_capita(), class.subsistence_threshold);
        let repression = (class.repression_faced + system_repression).clamp(0.0, 1.0);
        let cohesion = class.organization * class.ideology.class_consciousness;
        class.p_revolution = revolution_probability(cohesion, repression);

        let before = prior.get(id).copied().unwrap_or(0.0);
        let after = class.ideology.class_consciousness;
        if before < params.awakening_threshold && after >= params.awakening_threshold {
            events.push(Event::new(
                tick,
                EventDetails::MassAwakening {
                    class_id: id.clone(),
                    consciousness: after,
                    threshold: params.awakening_threshold,
                },
            ));
        }
    }

    events
}
