//! The backend-agnostic social graph.
//!
//! Nodes and edges are immutable records with flexible attribute maps,
//! keyed and labeled by plain strings so consumers of the boundary never
//! depend on the core's entity types. The container is an arena keyed by
//! stable string ids; edges reference nodes by id only, so there is no
//! cyclic ownership to manage.
//!
//! All collections are ordered (`BTreeMap`, insertion-ordered `Vec`) and
//! every query walks them in that order, keeping results deterministic.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GraphError;

/// An immutable node record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Stable string identifier.
    pub id: String,
    /// Free-form kind label (e.g. `"class"`, `"territory"`).
    pub kind: String,
    /// Flexible attribute map.
    pub attributes: BTreeMap<String, Value>,
}

impl GraphNode {
    /// Create a node with an empty attribute map.
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Read a numeric attribute, if present and numeric.
    pub fn numeric_attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(Value::as_f64)
    }
}

/// An immutable edge record. Direction runs source to target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source node id.
    pub source: String,
    /// Target node id.
    pub target: String,
    /// Free-form kind label (e.g. `"Exploitation"`, `"Solidarity"`).
    pub kind: String,
    /// Flexible attribute map.
    pub attributes: BTreeMap<String, Value>,
}

impl GraphEdge {
    /// Create an edge with an empty attribute map.
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind: kind.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Read a numeric attribute, if present and numeric.
    pub fn numeric_attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(Value::as_f64)
    }
}

/// Predicate over nodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeFilter {
    /// Accept only these kind labels (`None` accepts all).
    pub kinds: Option<BTreeSet<String>>,
    /// Require a numeric attribute to be at least this value.
    pub numeric_at_least: Option<(String, f64)>,
}

impl NodeFilter {
    /// A filter accepting every node.
    pub const fn any() -> Self {
        Self {
            kinds: None,
            numeric_at_least: None,
        }
    }

    /// A filter accepting a single kind label.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        let mut kinds = BTreeSet::new();
        kinds.insert(kind.into());
        Self {
            kinds: Some(kinds),
            numeric_at_least: None,
        }
    }

    /// Whether the node passes this filter.
    pub fn matches(&self, node: &GraphNode) -> bool {
        if let Some(kinds) = &self.kinds
            && !kinds.contains(&node.kind)
        {
            return false;
        }
        if let Some((key, min)) = &self.numeric_at_least {
            return node.numeric_attribute(key).is_some_and(|v| v >= *min);
        }
        true
    }
}

/// Predicate over edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeFilter {
    /// Accept only these kind labels (`None` accepts all).
    pub kinds: Option<BTreeSet<String>>,
    /// Require a numeric attribute to be at least this value.
    pub numeric_at_least: Option<(String, f64)>,
}

impl EdgeFilter {
    /// A filter accepting every edge.
    pub const fn any() -> Self {
        Self {
            kinds: None,
            numeric_at_least: None,
        }
    }

    /// A filter accepting a single kind label.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        let mut kinds = BTreeSet::new();
        kinds.insert(kind.into());
        Self {
            kinds: Some(kinds),
            numeric_at_least: None,
        }
    }

    /// Additionally require a numeric attribute minimum (builder-style).
    #[must_use]
    pub fn with_numeric_at_least(mut self, key: impl Into<String>, min: f64) -> Self {
        self.numeric_at_least = Some((key.into(), min));
        self
    }

    /// Whether the edge passes this filter.
    pub fn matches(&self, edge: &GraphEdge) -> bool {
        if let Some(kinds) = &self.kinds
            && !kinds.contains(&edge.kind)
        {
            return false;
        }
        if let Some((key, min)) = &self.numeric_at_least {
            return edge.numeric_attribute(key).is_some_and(|v| v >= *min);
        }
        true
    }
}

/// A breadth-first traversal request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalQuery {
    /// Node id to start from.
    pub start: String,
    /// Edges the traversal may cross.
    pub edge_filter: EdgeFilter,
    /// Maximum depth from the start (`None` is unbounded).
    pub max_depth: Option<usize>,
    /// Whether edges are crossed in both directions.
    pub undirected: bool,
}

/// The result of a traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalResult {
    /// Node ids in breadth-first visit order, start included.
    pub visited: Vec<String>,
    /// Depth of each visited node from the start.
    pub depths: BTreeMap<String, usize>,
}

/// The graph container: an arena of nodes and edges keyed by string id,
/// with graph-level metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialGraph {
    /// All nodes, keyed by id.
    nodes: BTreeMap<String, GraphNode>,
    /// All edges, in insertion order.
    edges: Vec<GraphEdge>,
    /// Graph-level metadata (world aggregates, economy, registries).
    pub metadata: BTreeMap<String, Value>,
}

impl SocialGraph {
    /// Create an empty graph.
    pub const fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Add a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if the id already exists.
    pub fn add_node(&mut self, node: GraphNode) -> Result<(), GraphError> {
        if self.nodes.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Add an edge. Both endpoints must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownEndpoint`] if either endpoint is
    /// missing.
    pub fn add_edge(&mut self, edge: GraphEdge) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(GraphError::UnknownEndpoint(edge.source));
        }
        if !self.nodes.contains_key(&edge.target) {
            return Err(GraphError::UnknownEndpoint(edge.target));
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterate over all nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// Iterate over all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter()
    }

    /// Nodes passing a filter, in id order.
    pub fn filter_nodes<'a>(
        &'a self,
        filter: &'a NodeFilter,
    ) -> impl Iterator<Item = &'a GraphNode> {
        self.nodes.values().filter(move |n| filter.matches(n))
    }

    /// Edges passing a filter, in insertion order.
    pub fn filter_edges<'a>(
        &'a self,
        filter: &'a EdgeFilter,
    ) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| filter.matches(e))
    }

    /// Neighbors reachable from a node across edges passing the filter.
    ///
    /// With `undirected`, inbound edges are crossed in reverse as well.
    pub fn neighbors<'a>(
        &'a self,
        id: &str,
        filter: &EdgeFilter,
        undirected: bool,
    ) -> Vec<&'a str> {
        let mut out = Vec::new();
        for edge in self.edges.iter().filter(|e| filter.matches(e)) {
            if edge.source == id {
                out.push(edge.target.as_str());
            } else if undirected && edge.target == id {
                out.push(edge.source.as_str());
            }
        }
        out
    }

    /// Breadth-first traversal from a start node.
    ///
    /// An unknown start yields an empty result rather than an error; the
    /// query is a question, not an assertion.
    pub fn traverse(&self, query: &TraversalQuery) -> TraversalResult {
        let mut visited = Vec::new();
        let mut depths = BTreeMap::new();

        if !self.nodes.contains_key(&query.start) {
            return TraversalResult { visited, depths };
        }

        let mut queue = VecDeque::new();
        queue.push_back((query.start.clone(), 0usize));
        depths.insert(query.start.clone(), 0);

        while let Some((id, depth)) = queue.pop_front() {
            visited.push(id.clone());
            if query.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            let next_depth = depth.saturating_add(1);
            for neighbor in self.neighbors(&id, &query.edge_filter, query.undirected) {
                if !depths.contains_key(neighbor) {
                    depths.insert(neighbor.to_owned(), next_depth);
                    queue.push_back((neighbor.to_owned(), next_depth));
                }
            }
        }

        TraversalResult { visited, depths }
    }

    /// Connected components of the sub-graph induced by the filters,
    /// treating edges as undirected.
    ///
    /// Components are returned largest-first (ties broken by the id of
    /// the smallest member), each sorted by node id.
    pub fn connected_components(
        &self,
        node_filter: &NodeFilter,
        edge_filter: &EdgeFilter,
    ) -> Vec<Vec<String>> {
        let members: BTreeSet<&str> = self
            .filter_nodes(node_filter)
            .map(|n| n.id.as_str())
            .collect();

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut components = Vec::new();

        for &start in &members {
            if seen.contains(start) {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            queue.push_back(start);
            seen.insert(start);

            while let Some(id) = queue.pop_front() {
                component.push(id.to_owned());
                for neighbor in self.neighbors(id, edge_filter, true) {
                    if members.contains(neighbor) && seen.insert(neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }

            component.sort();
            components.push(component);
        }

        components.sort_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| a.first().cmp(&b.first()))
        });
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_plus_isolate() -> SocialGraph {
        let mut g = SocialGraph::new();
        for id in ["a", "b", "c", "d"] {
            let _ = g.add_node(GraphNode::new(id, "class"));
        }
        let _ = g.add_edge(GraphEdge::new("a", "b", "Solidarity"));
        let _ = g.add_edge(GraphEdge::new("b", "c", "Solidarity"));
        let _ = g.add_edge(GraphEdge::new("a", "d", "Exploitation"));
        g
    }

    #[test]
    fn duplicate_nodes_rejected() {
        let mut g = SocialGraph::new();
        let _ = g.add_node(GraphNode::new("a", "class"));
        assert!(g.add_node(GraphNode::new("a", "class")).is_err());
    }

    #[test]
    fn edges_require_endpoints() {
        let mut g = SocialGraph::new();
        let _ = g.add_node(GraphNode::new("a", "class"));
        assert!(g.add_edge(GraphEdge::new("a", "ghost", "Solidarity")).is_err());
    }

    #[test]
    fn kind_filter_partitions_edges() {
        let g = triangle_plus_isolate();
        let filter = EdgeFilter::of_kind("Solidarity");
        assert_eq!(g.filter_edges(&filter).count(), 2);
    }

    #[test]
    fn numeric_filter_requires_attribute() {
        let mut g = SocialGraph::new();
        let _ = g.add_node(GraphNode::new("a", "class"));
        let _ = g.add_node(GraphNode::new("b", "class"));
        let mut edge = GraphEdge::new("a", "b", "Solidarity");
        edge.attributes
            .insert("strength".to_owned(), serde_json::json!(0.4));
        let _ = g.add_edge(edge);

        let pass = EdgeFilter::of_kind("Solidarity").with_numeric_at_least("strength", 0.3);
        let fail = EdgeFilter::of_kind("Solidarity").with_numeric_at_least("strength", 0.5);
        assert_eq!(g.filter_edges(&pass).count(), 1);
        assert_eq!(g.filter_edges(&fail).count(), 0);
    }

    #[test]
    fn traversal_respects_edge_filter_and_depth() {
        let g = triangle_plus_isolate();
        let result = g.traverse(&TraversalQuery {
            start: "a".to_owned(),
            edge_filter: EdgeFilter::of_kind("Solidarity"),
            max_depth: Some(1),
            undirected: true,
        });
        // Depth 1 over solidarity edges reaches b but not c or d.
        assert_eq!(result.visited, vec!["a".to_owned(), "b".to_owned()]);
        assert_eq!(result.depths.get("b"), Some(&1));
        assert!(!result.depths.contains_key("c"));
    }

    #[test]
    fn traversal_from_unknown_start_is_empty() {
        let g = triangle_plus_isolate();
        let result = g.traverse(&TraversalQuery {
            start: "ghost".to_owned(),
            edge_filter: EdgeFilter::any(),
            max_depth: None,
            undirected: true,
        });
        assert!(result.visited.is_empty());
    }

    #[test]
    fn components_over_solidarity_subgraph() {
        let g = triangle_plus_isolate();
        let components =
            g.connected_components(&NodeFilter::any(), &EdgeFilter::of_kind("Solidarity"));
        // {a,b,c} connected by solidarity; d is isolated in that sub-graph.
        assert_eq!(components.len(), 2);
        assert_eq!(
            components.first().map(Vec::len),
            Some(3),
            "largest component first"
        );
        assert_eq!(components.get(1).map(Vec::len), Some(1));
    }

    #[test]
    fn components_are_deterministic() {
        let g = triangle_plus_isolate();
        let a = g.connected_components(&NodeFilter::any(), &EdgeFilter::any());
        let b = g.connected_components(&NodeFilter::any(), &EdgeFilter::any());
        assert_eq!(a, b);
    }
}
