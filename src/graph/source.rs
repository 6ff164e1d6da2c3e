//! Deserialization structs for the editor's serialized graph format, plus
//! the [`IntoGraph`] conversion trait for custom formats.

use super::{Link, Node, OutputSlot, WorkflowGraph};
use crate::error::GraphError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A trait for custom data models that can be converted into a validated
/// [`WorkflowGraph`].
///
/// Implement this on your own deserialization structs to let the rest of the
/// crate operate on graphs from any source format. Conversions must be
/// all-or-nothing: return a [`GraphError`] rather than a partial graph.
pub trait IntoGraph {
    /// Consumes the object and converts it into a validated workflow graph.
    fn into_graph(self) -> Result<WorkflowGraph, GraphError>;
}

/// Top-level structure of the editor's JSON export.
///
/// Links are serialized as positional arrays, so they are captured as raw
/// values here and decoded field-by-field during conversion.
#[derive(Debug, Deserialize)]
pub struct RawWorkflow {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub links: Vec<serde_json::Value>,
}

/// One node as serialized by the editor.
///
/// API-format exports use `class_type` where editor exports use `type`; both
/// are accepted.
#[derive(Debug, Deserialize)]
pub struct RawNode {
    pub id: Option<u64>,
    #[serde(rename = "type", alias = "class_type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub widgets_values: RawWidgetValues,
    #[serde(default)]
    pub outputs: Vec<RawOutput>,
}

/// Widget values as the editor serializes them.
///
/// Most node types use a positional array, but some (video combiners,
/// notably) serialize their widgets as a name-to-value object instead. Both
/// shapes are accepted; object-shaped widgets stay named rather than being
/// forced into an artificial positional order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawWidgetValues {
    Positional(Vec<serde_json::Value>),
    Named(BTreeMap<String, serde_json::Value>),
}

impl Default for RawWidgetValues {
    fn default() -> Self {
        RawWidgetValues::Positional(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
pub struct RawOutput {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl IntoGraph for RawWorkflow {
    fn into_graph(self) -> Result<WorkflowGraph, GraphError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for (position, raw) in self.nodes.into_iter().enumerate() {
            let id = raw.id.ok_or(GraphError::MissingNodeField {
                position,
                field: "id",
            })?;
            let node_type = match raw.node_type {
                Some(t) if !t.is_empty() => t,
                _ => {
                    return Err(GraphError::MissingNodeField {
                        position,
                        field: "type",
                    });
                }
            };
            let (widget_values, named_widget_values) = match raw.widgets_values {
                RawWidgetValues::Positional(values) => (values, BTreeMap::new()),
                RawWidgetValues::Named(values) => (Vec::new(), values),
            };
            nodes.push(Node {
                id,
                node_type,
                widget_values,
                named_widget_values,
                outputs: raw
                    .outputs
                    .into_iter()
                    .map(|o| OutputSlot {
                        name: o.name,
                        kind: o.kind,
                    })
                    .collect(),
            });
        }

        let mut links = Vec::with_capacity(self.links.len());
        for (position, raw) in self.links.into_iter().enumerate() {
            links.push(parse_link(position, &raw)?);
        }

        let graph = WorkflowGraph { nodes, links };
        graph.validate()?;
        Ok(graph)
    }
}

/// Decodes one `[id, source, source_slot, target, target_slot, kind]` array.
fn parse_link(position: usize, raw: &serde_json::Value) -> Result<Link, GraphError> {
    let fields = raw
        .as_array()
        .ok_or_else(|| GraphError::MalformedLink {
            position,
            message: "expected an array".to_string(),
        })?;
    if fields.len() < 5 {
        return Err(GraphError::MalformedLink {
            position,
            message: format!("expected at least 5 elements, found {}", fields.len()),
        });
    }

    let int = |index: usize, field: &str| -> Result<i64, GraphError> {
        fields[index]
            .as_i64()
            .ok_or_else(|| GraphError::MalformedLink {
                position,
                message: format!("element {} ({}) is not an integer", index, field),
            })
    };
    let node_id = |index: usize, field: &str| -> Result<u64, GraphError> {
        fields[index]
            .as_u64()
            .ok_or_else(|| GraphError::MalformedLink {
                position,
                message: format!("element {} ({}) is not a node id", index, field),
            })
    };
    let slot = |index: usize, field: &str| -> Result<u32, GraphError> {
        fields[index]
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| GraphError::MalformedLink {
                position,
                message: format!("element {} ({}) is not a valid slot index", index, field),
            })
    };

    Ok(Link {
        id: int(0, "link id")?,
        source: node_id(1, "source node")?,
        source_slot: slot(2, "source slot")?,
        target: node_id(3, "target node")?,
        target_slot: slot(4, "target slot")?,
        kind: fields
            .get(5)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
    })
}
