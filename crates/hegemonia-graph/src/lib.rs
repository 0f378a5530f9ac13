//! Backend-agnostic social graph and the `WorldState` graph bridge.
//!
//! This crate is the boundary other components (persistence, embedding
//! store, dashboard) consume: immutable node/edge records with flexible
//! attribute maps, filter and traversal queries, connected components,
//! and lossless snapshot conversion. Nothing here depends on running a
//! simulation.
//!
//! # Modules
//!
//! - [`graph`] -- records, filters, traversal, components
//! - [`bridge`] -- `to_graph` / `from_graph` snapshot conversion

pub mod bridge;
pub mod error;
pub mod graph;

pub use bridge::{
    META_CONTRADICTIONS, META_ECONOMY, META_EVENT_LOG, META_PHASE, META_STANCE, META_TICK,
    NODE_KIND_CLASS, NODE_KIND_TERRITORY, from_graph, to_graph,
};
pub use error::GraphError;
pub use graph::{
    EdgeFilter, GraphEdge, GraphNode, NodeFilter, SocialGraph, TraversalQuery, TraversalResult,
};
