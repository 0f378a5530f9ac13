//! Lossless conversion between [`WorldState`] and the social graph.
//!
//! Classes and territories become nodes whose attribute maps are their
//! serialized fields; relationships become edges the same way. World
//! aggregates with no node of their own (tick counter, global economy,
//! percolation phase, policy stance, the contradiction registry, and the
//! event log) travel as graph-level metadata, so the round trip
//! reproduces every field of the snapshot exactly.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use hegemonia_types::{
    Contradiction, ContradictionId, Event, GlobalEconomy, PercolationPhase, PolicyStance,
    Relationship, SocialClass, Territory, WorldState,
};

use crate::error::GraphError;
use crate::graph::{GraphEdge, GraphNode, SocialGraph};

/// Node kind label for social classes.
pub const NODE_KIND_CLASS: &str = "class";
/// Node kind label for territories.
pub const NODE_KIND_TERRITORY: &str = "territory";

/// Metadata key for the tick counter.
pub const META_TICK: &str = "tick";
/// Metadata key for the global economy.
pub const META_ECONOMY: &str = "economy";
/// Metadata key for the percolation phase.
pub const META_PHASE: &str = "phase";
/// Metadata key for the policy stance.
pub const META_STANCE: &str = "stance";
/// Metadata key for the contradiction registry.
pub const META_CONTRADICTIONS: &str = "contradictions";
/// Metadata key for the event log.
pub const META_EVENT_LOG: &str = "event_log";

/// Serialize an entity into a flat attribute map.
fn to_attributes<T: Serialize>(entity: &T) -> Result<BTreeMap<String, Value>, GraphError> {
    match serde_json::to_value(entity).map_err(|source| GraphError::Encode { source })? {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Ok(BTreeMap::from([("value".to_owned(), other)])),
    }
}

/// Reconstruct an entity from a flat attribute map.
fn from_attributes<T: serde::de::DeserializeOwned>(
    entity: &str,
    attributes: &BTreeMap<String, Value>,
) -> Result<T, GraphError> {
    let object = Value::Object(attributes.clone().into_iter().collect());
    serde_json::from_value(object).map_err(|source| GraphError::Decode {
        entity: entity.to_owned(),
        source,
    })
}

/// Read and decode a required metadata key.
fn metadata_value<T: serde::de::DeserializeOwned>(
    graph: &SocialGraph,
    key: &'static str,
) -> Result<T, GraphError> {
    let value = graph
        .metadata
        .get(key)
        .ok_or(GraphError::MissingMetadata(key))?;
    serde_json::from_value(value.clone()).map_err(|source| GraphError::Decode {
        entity: key.to_owned(),
        source,
    })
}

/// Convert a world snapshot into its graph form.
///
/// # Errors
///
/// Returns [`GraphError`] if any entity fails to serialize, or if the
/// snapshot contains duplicate ids or dangling edge endpoints.
pub fn to_graph(state: &WorldState) -> Result<SocialGraph, GraphError> {
    let mut graph = SocialGraph::new();

    for class in state.classes.values() {
        graph.add_node(GraphNode {
            id: class.id.as_str().to_owned(),
            kind: NODE_KIND_CLASS.to_owned(),
            attributes: to_attributes(class)?,
        })?;
    }
    for territory in state.territories.values() {
        graph.add_node(GraphNode {
            id: territory.id.as_str().to_owned(),
            kind: NODE_KIND_TERRITORY.to_owned(),
            attributes: to_attributes(territory)?,
        })?;
    }
    for relationship in &state.relationships {
        let kind_label = match serde_json::to_value(relationship.kind)
            .map_err(|source| GraphError::Encode { source })?
        {
            Value::String(s) => s,
            other => other.to_string(),
        };
        graph.add_edge(GraphEdge {
            source: relationship.source_id.clone(),
            target: relationship.target_id.clone(),
            kind: kind_label,
            attributes: to_attributes(relationship)?,
        })?;
    }

    graph.metadata.insert(
        META_TICK.to_owned(),
        serde_json::to_value(state.tick).map_err(|source| GraphError::Encode { source })?,
    );
    graph.metadata.insert(
        META_ECONOMY.to_owned(),
        serde_json::to_value(&state.economy).map_err(|source| GraphError::Encode { source })?,
    );
    graph.metadata.insert(
        META_PHASE.to_owned(),
        serde_json::to_value(state.phase).map_err(|source| GraphError::Encode { source })?,
    );
    graph.metadata.insert(
        META_STANCE.to_owned(),
        serde_json::to_value(state.stance).map_err(|source| GraphError::Encode { source })?,
    );
    graph.metadata.insert(
        META_CONTRADICTIONS.to_owned(),
        serde_json::to_value(&state.contradictions)
            .map_err(|source| GraphError::Encode { source })?,
    );
    graph.metadata.insert(
        META_EVENT_LOG.to_owned(),
        serde_json::to_value(&state.event_log).map_err(|source| GraphError::Encode { source })?,
    );

    Ok(graph)
}

/// Reconstruct a world snapshot from its graph form.
///
/// # Errors
///
/// Returns [`GraphError`] on unknown node kinds, missing metadata, or
/// decode failures.
pub fn from_graph(graph: &SocialGraph) -> Result<WorldState, GraphError> {
    let economy: GlobalEconomy = metadata_value(graph, META_ECONOMY)?;
    let mut state = WorldState::new(economy);

    state.tick = metadata_value(graph, META_TICK)?;
    let phase: PercolationPhase = metadata_value(graph, META_PHASE)?;
    state.phase = phase;
    let stance: PolicyStance = metadata_value(graph, META_STANCE)?;
    state.stance = stance;
    let contradictions: BTreeMap<ContradictionId, Contradiction> =
        metadata_value(graph, META_CONTRADICTIONS)?;
    state.contradictions = contradictions;
    let event_log: Vec<Event> = metadata_value(graph, META_EVENT_LOG)?;
    state.event_log = event_log;

    for node in graph.nodes() {
        match node.kind.as_str() {
            NODE_KIND_CLASS => {
                let class: SocialClass = from_attributes(&node.id, &node.attributes)?;
                state.insert_class(class);
            }
            NODE_KIND_TERRITORY => {
                let territory: Territory = from_attributes(&node.id, &node.attributes)?;
                state.insert_territory(territory);
            }
            other => {
                return Err(GraphError::UnknownNodeKind {
                    kind: other.to_owned(),
                    node_id: node.id.clone(),
                });
            }
        }
    }

    for edge in graph.edges() {
        let relationship: Relationship =
            from_attributes(&format!("{}->{}", edge.source, edge.target), &edge.attributes)?;
        state.add_relationship(relationship);
    }

    Ok(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use hegemonia_types::{
        ClassRole, EdgeKind, EventDetails, GlobalEconomy, Ideology, Relationship, SectorType,
        SocialClass, Territory, WorldState,
    };

    use super::*;

    fn sample_state() -> WorldState {
        let mut state = WorldState::new(GlobalEconomy::new(500.0, 2.0));
        state.tick = 42;
        state.insert_class(
            SocialClass::new("periphery-workers", ClassRole::PeripheryProletariat, 80.0, 1000)
                .with_ideology(Ideology::new(0.2, 0.1)),
        );
        state.insert_class(SocialClass::new(
            "core-owners",
            ClassRole::CoreBourgeoisie,
            900.0,
            10,
        ));
        state.insert_territory(Territory::new("cobalt-belt", SectorType::Extractive, 200.0, 0.02));
        state.add_relationship(
            Relationship::new(EdgeKind::Exploitation, "periphery-workers", "core-owners"),
        );
        state.add_relationship(Relationship::new(
            EdgeKind::Tenancy,
            "periphery-workers",
            "cobalt-belt",
        ));
        state.event_log.push(hegemonia_types::Event::new(
            41,
            EventDetails::MassAwakening {
                class_id: "periphery-workers".into(),
                consciousness: 0.71,
                threshold: 0.7,
            },
        ));
        state
    }

    #[test]
    fn roundtrip_reproduces_every_field() {
        let state = sample_state();
        let graph = to_graph(&state);
        assert!(graph.is_ok());
        let restored = graph.and_then(|g| from_graph(&g));
        assert_eq!(restored.ok(), Some(state));
    }

    #[test]
    fn graph_form_has_expected_shape() {
        let state = sample_state();
        let graph = to_graph(&state).expect("to_graph");
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.metadata.contains_key(META_ECONOMY));
        assert!(graph.node("cobalt-belt").is_some_and(|n| n.kind == NODE_KIND_TERRITORY));
    }

    #[test]
    fn edge_kind_labels_are_readable() {
        let state = sample_state();
        let graph = to_graph(&state).expect("to_graph");
        let kinds: Vec<&str> = graph.edges().map(|e| e.kind.as_str()).collect();
        assert_eq!(kinds, vec!["Exploitation", "Tenancy"]);
    }

    #[test]
    fn missing_metadata_is_an_error() {
        let state = sample_state();
        let mut graph = to_graph(&state).expect("to_graph");
        graph.metadata.remove(META_ECONOMY);
        assert!(from_graph(&graph).is_err());
    }
}
