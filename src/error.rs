use thiserror::Error;

/// Errors that can occur while parsing a serialized workflow graph.
///
/// Parsing is all-or-nothing: any of these aborts the whole graph, no
/// partial model is returned.
#[derive(Error, Debug, Clone)]
pub enum GraphError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParseError(String),

    #[error("Node at position {position} is missing required field '{field}'")]
    MissingNodeField { position: usize, field: &'static str },

    #[error("Node id {node_id} appears more than once in the graph")]
    DuplicateNodeId { node_id: u64 },

    #[error("Link entry at position {position} is malformed: {message}")]
    MalformedLink { position: usize, message: String },

    #[error("Link {link_id} references unknown {endpoint} node {node_id}")]
    DanglingLink {
        link_id: i64,
        endpoint: &'static str,
        node_id: u64,
    },
}

/// Errors that can occur while translating a graph into a call plan.
#[derive(Error, Debug, Clone)]
pub enum TranslateError {
    #[error(
        "Conflicting bindings for input slot {slot} of node {node_id}: links from node {first_source} and node {second_source} both target it"
    )]
    ConflictingBinding {
        node_id: u64,
        slot: u32,
        first_source: u64,
        second_source: u64,
    },

    #[error("Link {link_id} targets node {node_id}, which is not part of the graph")]
    UnknownTarget { link_id: i64, node_id: u64 },
}

/// Errors that can occur when saving or loading an analysis artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("{0}")]
    Generic(String),
}
