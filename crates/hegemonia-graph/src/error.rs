//! Errors for graph construction and the snapshot bridge.

/// Errors that can occur building or converting a social graph.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// A node with the same id already exists.
    #[error("duplicate node id {0}")]
    DuplicateNode(String),

    /// An edge references a node that does not exist.
    #[error("edge endpoint {0} not found in graph")]
    UnknownEndpoint(String),

    /// A node carries a kind the bridge does not recognize.
    #[error("unknown node kind {kind} on node {node_id}")]
    UnknownNodeKind {
        /// The unrecognized kind label.
        kind: String,
        /// The node carrying it.
        node_id: String,
    },

    /// A required graph-level metadata key is missing.
    #[error("missing graph metadata key {0}")]
    MissingMetadata(&'static str),

    /// Serializing an entity into attribute form failed.
    #[error("failed to encode entity into graph attributes: {source}")]
    Encode {
        /// The underlying serialization error.
        source: serde_json::Error,
    },

    /// Reconstructing an entity from attribute form failed.
    #[error("failed to decode entity {entity} from graph attributes: {source}")]
    Decode {
        /// The entity id being reconstructed.
        entity: String,
        /// The underlying deserialization error.
        source: serde_json::Error,
    },
}
