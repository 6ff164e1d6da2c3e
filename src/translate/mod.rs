//! Graph-to-call-plan translation.
//!
//! Converts a parsed graph into the flat node-id-keyed structure a
//! generation backend accepts: per node, its operation type, the widget
//! values promoted to named inputs via the schema registry, and the upstream
//! bindings carried by the graph's links.

use crate::error::TranslateError;
use crate::graph::WorkflowGraph;
use crate::schema::SchemaRegistry;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

/// A reference to an upstream node's output slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpstreamBinding {
    pub source: u64,
    pub slot: u32,
}

/// One node of the flattened call plan. Created once per translation run
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallPlanNode {
    pub id: u64,
    pub op_type: String,
    /// Widget values promoted to named inputs by the schema registry.
    pub named_inputs: BTreeMap<String, serde_json::Value>,
    /// Widget values no schema parameter claimed, preserved positionally.
    pub positional_overflow: Vec<serde_json::Value>,
    /// Input slot index -> upstream source, at most one binding per slot.
    pub upstream: BTreeMap<u32, UpstreamBinding>,
}

/// A non-fatal translation finding, carried alongside the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslateWarning {
    /// The node supplied more widget values than its schema names. The
    /// extras are preserved in the node's positional overflow.
    SchemaMismatch {
        node_id: u64,
        declared: usize,
        supplied: usize,
    },
}

impl fmt::Display for TranslateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslateWarning::SchemaMismatch {
                node_id,
                declared,
                supplied,
            } => write!(
                f,
                "Node {} supplies {} widget values but its schema names {}; extras kept as positional overflow",
                node_id, supplied, declared
            ),
        }
    }
}

/// The result of translating one graph: every node keyed by id, plus any
/// warnings gathered along the way.
#[derive(Debug, Clone, Default)]
pub struct CallPlan {
    pub nodes: AHashMap<u64, CallPlanNode>,
    pub warnings: Vec<TranslateWarning>,
}

impl CallPlan {
    /// Renders the backend wire shape: a node-id-keyed mapping of operation
    /// type and inputs. Linked inputs are keyed `input_<slot>` and encoded
    /// as `[source id, source slot]` pairs, the form the backend's
    /// submission endpoint expects.
    pub fn to_submission(&self) -> serde_json::Value {
        let mut root = serde_json::Map::new();
        let mut entries: Vec<(&u64, &CallPlanNode)> = self.nodes.iter().collect();
        entries.sort_by_key(|(id, _)| **id);
        for (id, node) in entries {
            let mut inputs = serde_json::Map::new();
            for (name, value) in &node.named_inputs {
                inputs.insert(name.clone(), value.clone());
            }
            for (slot, binding) in &node.upstream {
                inputs.insert(
                    format!("input_{}", slot),
                    serde_json::json!([binding.source.to_string(), binding.slot]),
                );
            }
            let mut entry = serde_json::Map::new();
            entry.insert(
                "class_type".to_string(),
                serde_json::Value::String(node.op_type.clone()),
            );
            entry.insert("inputs".to_string(), serde_json::Value::Object(inputs));
            root.insert(id.to_string(), serde_json::Value::Object(entry));
        }
        serde_json::Value::Object(root)
    }
}

/// Translates workflow graphs against a schema registry.
pub struct Translator<'a> {
    schemas: &'a SchemaRegistry,
}

impl<'a> Translator<'a> {
    pub fn new(schemas: &'a SchemaRegistry) -> Self {
        Self { schemas }
    }

    /// Translates one graph into a call plan.
    ///
    /// Fails closed on the first conflicting link binding; a second link
    /// targeting an already-bound (node, slot) pair is ambiguous, and
    /// first-writer-wins is explicitly rejected.
    pub fn translate(&self, graph: &WorkflowGraph) -> Result<CallPlan, TranslateError> {
        let mut nodes: AHashMap<u64, CallPlanNode> = AHashMap::with_capacity(graph.nodes.len());
        let mut warnings = Vec::new();

        for node in &graph.nodes {
            let mut named_inputs = BTreeMap::new();
            let mut positional_overflow = Vec::new();

            match self.schemas.get(&node.node_type) {
                Some(params) => {
                    // Lenient zip: missing trailing widgets are omitted,
                    // never defaulted or fabricated.
                    let mut claimed = vec![false; node.widget_values.len()];
                    for param in params {
                        if let Some(value) = node.widget_values.get(param.widget) {
                            named_inputs.insert(param.name.clone(), value.clone());
                            claimed[param.widget] = true;
                        }
                    }
                    for (index, value) in node.widget_values.iter().enumerate() {
                        if !claimed[index] {
                            positional_overflow.push(value.clone());
                        }
                    }
                    if !positional_overflow.is_empty() {
                        warnings.push(TranslateWarning::SchemaMismatch {
                            node_id: node.id,
                            declared: params.len(),
                            supplied: node.widget_values.len(),
                        });
                    }
                }
                None => {
                    // Unknown type: a first-class outcome, not an error. All
                    // widget values survive positionally.
                    positional_overflow = node.widget_values.clone();
                }
            }

            // Object-shaped widgets arrive already named; no schema needed.
            for (name, value) in &node.named_widget_values {
                named_inputs.insert(name.clone(), value.clone());
            }

            nodes.insert(
                node.id,
                CallPlanNode {
                    id: node.id,
                    op_type: node.node_type.clone(),
                    named_inputs,
                    positional_overflow,
                    upstream: BTreeMap::new(),
                },
            );
        }

        for link in &graph.links {
            let target = nodes
                .get_mut(&link.target)
                .ok_or(TranslateError::UnknownTarget {
                    link_id: link.id,
                    node_id: link.target,
                })?;
            match target.upstream.entry(link.target_slot) {
                Entry::Vacant(slot) => {
                    slot.insert(UpstreamBinding {
                        source: link.source,
                        slot: link.source_slot,
                    });
                }
                Entry::Occupied(existing) => {
                    return Err(TranslateError::ConflictingBinding {
                        node_id: link.target,
                        slot: link.target_slot,
                        first_source: existing.get().source,
                        second_source: link.source,
                    });
                }
            }
        }

        Ok(CallPlan { nodes, warnings })
    }
}
