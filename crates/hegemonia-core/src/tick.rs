//! The tick driver.
//!
//! `run_tick` takes the previous snapshot by reference and returns a
//! fresh one; the caller owns the succession of snapshots. Systems run
//! in a fixed order, the contradiction engine last so it observes the
//! tick's final phase and stance, and the snapshot is validated before
//! it is handed back.

use hegemonia_events::EventBus;
use hegemonia_formulas::rate_of_profit;
use hegemonia_types::{
    EdgeKind, Event, EventId, PercolationPhase, PolicyStance, StateError, WorldState,
};
use hegemonia_systems::{metabolism, production, solidarity, subsistence, topology, vitality};
use tracing::debug;

use crate::config::SimulationConfig;
use crate::contradiction;
use crate::decision::ResolutionAdvisor;

/// Errors a tick can fail with.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The stepped snapshot violated a world invariant.
    #[error("tick produced an invalid snapshot: {source}")]
    InvalidState {
        /// The violated invariant.
        #[from]
        source: StateError,
    },
}

/// Everything a tick needs besides the snapshot itself.
pub struct TickContext {
    /// Simulation configuration.
    pub config: SimulationConfig,
    /// Resolution advisor consulted by the contradiction engine.
    pub advisor: Box<dyn ResolutionAdvisor>,
    /// Bus the tick's events are published on.
    pub bus: EventBus,
}

impl TickContext {
    /// Create a context around a configuration and an advisor.
    pub fn new(config: SimulationConfig, advisor: Box<dyn ResolutionAdvisor>) -> Self {
        Self {
            config,
            advisor,
            bus: EventBus::new(),
        }
    }
}

/// One tick's headline numbers, for logging and experiment harnesses.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSummary {
    /// The tick these numbers describe.
    pub tick: u64,
    /// Total population across active classes.
    pub total_population: u64,
    /// Total wealth across active classes.
    pub total_wealth: f64,
    /// Rent pool as a fraction of its genesis level.
    pub pool_ratio: f64,
    /// Diagnostic rate of profit: extraction flows over capital
    /// advanced (pool plus distribution flows).
    pub rate_of_profit: f64,
    /// Percolation phase after the topology pass.
    pub phase: PercolationPhase,
    /// Policy stance after the decision pass.
    pub stance: PolicyStance,
    /// Non-terminal contradictions in the registry.
    pub active_contradictions: usize,
    /// Events emitted this tick.
    pub events_emitted: usize,
}

/// The result of one tick.
pub struct TickOutcome {
    /// The next snapshot.
    pub state: WorldState,
    /// Events emitted this tick, in emission order.
    pub events: Vec<Event>,
    /// Headline numbers.
    pub summary: TickSummary,
}

/// Advance the world by one tick.
///
/// # Errors
///
/// Returns [`TickError::InvalidState`] if the stepped snapshot fails
/// validation; the input snapshot is untouched either way.
pub fn run_tick(state: &WorldState, ctx: &mut TickContext) -> Result<TickOutcome, TickError> {
    let mut next = state.clone();
    next.tick = next.tick.saturating_add(1);
    debug!(tick = next.tick, "tick start");

    let mut events = subsistence::run(&mut next, &ctx.config.economy);
    production::run(&mut next, &ctx.config.economy);
    metabolism::run(&mut next, &ctx.config.metabolism);
    events.extend(vitality::run(&mut next, &ctx.config.economy));
    events.extend(solidarity::run(&mut next, &ctx.config.consciousness));
    events.extend(topology::run(&mut next, &ctx.config.topology));
    events.extend(contradiction::run(
        &mut next,
        &ctx.config.contradiction,
        ctx.advisor.as_ref(),
    ));

    next.validate()?;

    // Ids are a pure function of the tick and emission position, so
    // identical runs produce identical event logs.
    for (position, event) in events.iter_mut().enumerate() {
        event.id = EventId::for_tick(next.tick, u64::try_from(position).unwrap_or(u64::MAX));
    }

    ctx.bus.publish_batch(&events);
    next.event_log.extend(events.iter().cloned());

    let summary = summarize(&next, events.len());
    Ok(TickOutcome {
        state: next,
        events,
        summary,
    })
}

fn summarize(state: &WorldState, events_emitted: usize) -> TickSummary {
    let extracted: f64 = state
        .relationships_of_kind(EdgeKind::Exploitation)
        .chain(state.relationships_of_kind(EdgeKind::Tribute))
        .map(|edge| edge.value_flow)
        .sum();
    let distributed: f64 = state
        .relationships_of_kind(EdgeKind::Wages)
        .chain(state.relationships_of_kind(EdgeKind::ClientStateSubsidy))
        .map(|edge| edge.value_flow)
        .sum();

    TickSummary {
        tick: state.tick,
        total_population: state.total_population(),
        total_wealth: state.active_classes().map(|c| c.wealth).sum(),
        pool_ratio: state.economy.pool_ratio(),
        rate_of_profit: rate_of_profit(extracted, state.economy.imperial_rent_pool, distributed),
        phase: state.phase,
        stance: state.stance,
        active_contradictions: state
            .contradictions
            .values()
            .filter(|c| !c.state.is_terminal())
            .count(),
        events_emitted,
    }
}
