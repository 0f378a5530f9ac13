//! Percolation monitor over the solidarity sub-graph.
//!
//! Projects active classes and their positive-strength solidarity edges
//! into a [`SocialGraph`], measures the largest connected component
//! against the active class count, and classifies the network into a
//! percolation phase. A phase change emits a transition event carrying
//! the component census and a resilience flag.

use std::collections::BTreeSet;

use hegemonia_graph::{EdgeFilter, GraphEdge, GraphNode, NODE_KIND_CLASS, NodeFilter, SocialGraph};
use hegemonia_types::{EdgeKind, Event, EventDetails, PercolationPhase, WorldState};
use tracing::{debug, warn};

use crate::config::TopologyParams;

/// Run the topology pass.
pub fn run(state: &mut WorldState, params: &TopologyParams) -> Vec<Event> {
    let mut events = Vec::new();

    let mut graph = SocialGraph::new();
    for class in state.active_classes() {
        // Active class ids are unique by construction.
        let _ = graph.add_node(GraphNode::new(class.id.as_str(), NODE_KIND_CLASS));
    }
    for edge in state.relationships_of_kind(EdgeKind::Solidarity) {
        if edge.solidarity_strength <= 0.0 {
            continue;
        }
        if graph
            .add_edge(GraphEdge::new(
                edge.source_id.clone(),
                edge.target_id.clone(),
                "Solidarity",
            ))
            .is_err()
        {
            warn!(
                source = edge.source_id.as_str(),
                target = edge.target_id.as_str(),
                "solidarity edge endpoint inactive or unknown, excluded from topology"
            );
        }
    }

    let components = graph.connected_components(&NodeFilter::any(), &EdgeFilter::any());
    let component_count = components.len();
    let node_count = graph.node_count();
    let largest = components.first().map_or(0, Vec::len);
    let largest_component_ratio = if node_count == 0 {
        0.0
    } else {
        largest as f64 / node_count as f64
    };

    let phase = classify(largest_component_ratio, params);
    let resilient = phase == PercolationPhase::Liquid
        && giant_component_mean_strength(state, components.first())
            >= params.resilience_strength_floor;

    if phase != state.phase {
        debug!(
            ?phase,
            previous = ?state.phase,
            largest_component_ratio,
            component_count,
            "percolation phase transition"
        );
        events.push(Event::new(
            state.tick,
            EventDetails::PhaseTransition {
                previous: state.phase,
                current: phase,
                component_count,
                largest_component_ratio,
                resilient,
            },
        ));
        state.phase = phase;
    }

    events
}

/// Classify a largest-component ratio into a percolation phase.
fn classify(ratio: f64, params: &TopologyParams) -> PercolationPhase {
    if ratio < params.gaseous_ceiling {
        PercolationPhase::Gaseous
    } else if ratio < params.liquid_floor {
        PercolationPhase::Transitional
    } else {
        PercolationPhase::Liquid
    }
}

/// Mean solidarity strength of edges with both endpoints inside the
/// giant component, or 0 when the component has no internal edges.
fn giant_component_mean_strength(state: &WorldState, giant: Option<&Vec<String>>) -> f64 {
    let Some(giant) = giant else {
        return 0.0;
    };
    let members: BTreeSet<&str> = giant.iter().map(String::as_str).collect();

    let mut sum = 0.0;
    let mut count: u32 = 0;
    for edge in state.relationships_of_kind(EdgeKind::Solidarity) {
        if edge.solidarity_strength > 0.0
            && members.contains(edge.source_id.as_str())
            && members.contains(edge.target_id.as_str())
        {
            sum += edge.solidarity_strength;
            count = count.saturating_add(1);
        }
    }
    if count == 0 { 0.0 } else { sum / f64::from(count) }
}
