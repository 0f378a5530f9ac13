//! Simulation engine binary.
//!
//! Entry point that wires configuration, genesis, and the tick loop
//! together:
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `hegemonia-config.yaml` if present
//! 3. Build the imperial-circuit genesis world
//! 4. Subscribe a bus listener for class deaths and phase transitions
//! 5. Fold the tick driver over the snapshots for the configured run
//! 6. Log the closing state of the world

mod error;

use std::path::Path;

use hegemonia_core::{HeuristicAdvisor, SimulationConfig, TickContext, run_tick, scenario};
use hegemonia_types::EventType;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Path the engine looks for its configuration at.
const CONFIG_PATH: &str = "hegemonia-config.yaml";

fn main() -> Result<(), EngineError> {
    let config = load_config()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .with_target(true)
        .init();

    info!(
        world_name = config.world.name,
        max_ticks = config.world.max_ticks,
        initial_rent_pool = config.world.initial_rent_pool,
        "hegemonia-engine starting"
    );

    let mut state = scenario::imperial_circuit(&config);
    let summary_interval = config.logging.summary_interval.max(1);
    let max_ticks = config.world.max_ticks;
    let mut ctx = TickContext::new(config, Box::new(HeuristicAdvisor));

    ctx.bus.subscribe(
        EventType::ClassDied,
        Box::new(|event| {
            warn!(tick = event.tick, details = ?event.details, "a class has died");
        }),
    );
    ctx.bus.subscribe(
        EventType::PhaseTransition,
        Box::new(|event| {
            info!(tick = event.tick, details = ?event.details, "solidarity network phase transition");
        }),
    );

    for _ in 0..max_ticks {
        let outcome = run_tick(&state, &mut ctx)?;
        state = outcome.state;

        let summary = &outcome.summary;
        if summary.tick % summary_interval == 0 {
            info!(
                tick = summary.tick,
                population = summary.total_population,
                wealth = summary.total_wealth,
                pool_ratio = summary.pool_ratio,
                rate_of_profit = summary.rate_of_profit,
                phase = ?summary.phase,
                stance = ?summary.stance,
                contradictions = summary.active_contradictions,
                "tick summary"
            );
        }

        if state.total_population() == 0 {
            warn!(tick = summary.tick, "every class is extinct, stopping early");
            break;
        }
    }

    info!(
        tick = state.tick,
        population = state.total_population(),
        phase = ?state.phase,
        stance = ?state.stance,
        events = state.event_log.len(),
        "simulation complete"
    );
    Ok(())
}

/// Load configuration from `hegemonia-config.yaml`, falling back to
/// defaults when the file does not exist.
fn load_config() -> Result<SimulationConfig, EngineError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok(SimulationConfig::from_file(path)?)
    } else {
        Ok(SimulationConfig::default())
    }
}
