//! The canonical in-memory model of a workflow graph.
//!
//! A [`WorkflowGraph`] is the validated, immutable form that every later
//! stage (asset extraction, translation) operates on. It is produced either
//! from the editor's serialized JSON via [`WorkflowGraph::from_json`] or from
//! any custom format through the [`IntoGraph`] trait in [`source`].

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

pub mod source;

pub use source::IntoGraph;

/// A single declared output slot of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSlot {
    pub name: String,
    pub kind: Option<String>,
}

/// One node of a workflow graph, immutable once parsed.
///
/// Widget values are the node's configuration scalars exactly as the editor
/// serialized them; nothing here interprets them. Node types that serialize
/// their widgets as a name-to-value object carry them in
/// `named_widget_values` instead, already named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: u64,
    pub node_type: String,
    pub widget_values: Vec<serde_json::Value>,
    #[serde(default)]
    pub named_widget_values: BTreeMap<String, serde_json::Value>,
    pub outputs: Vec<OutputSlot>,
}

/// A directed data dependency between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub source: u64,
    pub source_slot: u32,
    pub target: u64,
    pub target_slot: u32,
    pub kind: Option<String>,
}

/// The complete, validated definition of a workflow graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl WorkflowGraph {
    /// Parses a graph from the editor's serialized JSON format.
    pub fn from_json(text: &str) -> Result<Self, GraphError> {
        let raw: source::RawWorkflow = serde_json::from_str(text)
            .map_err(|e| GraphError::JsonParseError(e.to_string()))?;
        raw.into_graph()
    }

    /// Looks up a node by its id.
    pub fn node(&self, id: u64) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Checks the structural invariants: unique node ids and no link that
    /// references a node outside the graph.
    ///
    /// Graphs built through [`IntoGraph`] are already validated; this exists
    /// for graphs assembled by hand.
    pub fn validate(&self) -> Result<(), GraphError> {
        let mut ids: HashSet<u64> = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !ids.insert(node.id) {
                return Err(GraphError::DuplicateNodeId { node_id: node.id });
            }
        }
        for link in &self.links {
            if !ids.contains(&link.source) {
                return Err(GraphError::DanglingLink {
                    link_id: link.id,
                    endpoint: "source",
                    node_id: link.source,
                });
            }
            if !ids.contains(&link.target) {
                return Err(GraphError::DanglingLink {
                    link_id: link.id,
                    endpoint: "target",
                    node_id: link.target,
                });
            }
        }
        Ok(())
    }
}
