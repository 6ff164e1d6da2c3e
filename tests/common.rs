//! Common test utilities for building workflow graphs and asset references.
use serde_json::json;
use tehai::prelude::*;

/// Builds a node with positional widgets and no declared outputs.
#[allow(dead_code)]
pub fn node(id: u64, node_type: &str, widget_values: Vec<serde_json::Value>) -> Node {
    Node {
        id,
        node_type: node_type.to_string(),
        widget_values,
        named_widget_values: std::collections::BTreeMap::new(),
        outputs: vec![],
    }
}

/// Builds a link with no value-kind tag.
#[allow(dead_code)]
pub fn link(id: i64, source: u64, source_slot: u32, target: u64, target_slot: u32) -> Link {
    Link {
        id,
        source,
        source_slot,
        target,
        target_slot,
        kind: None,
    }
}

/// Builds an asset reference directly, bypassing extraction.
#[allow(dead_code)]
pub fn reference(node_id: u64, node_type: &str, filename: &str, role: AssetRole) -> AssetReference {
    AssetReference {
        node_id,
        node_type: node_type.to_string(),
        filename: filename.to_string(),
        role,
    }
}

/// A small but realistic graph: checkpoint loader, VAE loader, LoRA loader,
/// prompt encoder, and an unregistered sampler node wired to all of them.
#[allow(dead_code)]
pub fn create_loader_graph() -> WorkflowGraph {
    WorkflowGraph {
        nodes: vec![
            node(1, "CheckpointLoaderSimple", vec![json!("sd_xl_base_1.0.safetensors")]),
            node(2, "VAELoader", vec![json!("sdxl_vae.safetensors")]),
            node(3, "LoraLoader", vec![json!("wan-thiccum-v3.safetensors"), json!(0.95), json!(1.0)]),
            node(4, "CLIPTextEncode", vec![json!("a lighthouse at dusk")]),
            node(5, "MysterySampler", vec![json!(20), json!("euler")]),
        ],
        links: vec![
            link(1, 1, 0, 3, 0),
            link(2, 2, 0, 5, 1),
            link(3, 3, 0, 5, 0),
            link(4, 4, 0, 5, 2),
        ],
    }
}

/// The same kind of graph as the editor would serialize it.
#[allow(dead_code)]
pub fn loader_workflow_json() -> String {
    json!({
        "nodes": [
            {
                "id": 1,
                "type": "CheckpointLoaderSimple",
                "widgets_values": ["sd_xl_base_1.0.safetensors"],
                "outputs": [{"name": "MODEL", "type": "MODEL"}]
            },
            {
                "id": 2,
                "type": "VAELoader",
                "widgets_values": ["sdxl_vae.safetensors"],
                "outputs": [{"name": "VAE", "type": "VAE"}]
            },
            {
                "id": 3,
                "type": "LoraLoader",
                "widgets_values": ["wan-thiccum-v3.safetensors", 0.95, 1.0]
            },
            {
                "id": 4,
                "type": "CLIPTextEncode",
                "widgets_values": ["a lighthouse at dusk"]
            },
            {
                "id": 5,
                "type": "MysterySampler",
                "widgets_values": [20, "euler"]
            }
        ],
        "links": [
            [1, 1, 0, 3, 0, "MODEL"],
            [2, 2, 0, 5, 1, "VAE"],
            [3, 3, 0, 5, 0, "MODEL"],
            [4, 4, 0, 5, 2, "CONDITIONING"]
        ]
    })
    .to_string()
}

/// A second workflow sharing one file with the first, for cross-graph
/// dedup tests.
#[allow(dead_code)]
pub fn upscale_workflow_json() -> String {
    json!({
        "nodes": [
            {
                "id": 10,
                "type": "CheckpointLoaderSimple",
                "widgets_values": ["sd_xl_base_1.0.safetensors"]
            },
            {
                "id": 11,
                "type": "UpscaleModelLoader",
                "widgets_values": ["RealESRGAN_x4plus.pth"]
            },
            {
                "id": 12,
                "type": "LoraLoader",
                "widgets_values": ["mystery_lora_final.safetensors", 1.0, 1.0]
            }
        ],
        "links": []
    })
    .to_string()
}
