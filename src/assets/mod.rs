//! Asset reference extraction.
//!
//! Walks a parsed graph for known "loader" node types and pulls out the
//! model filename each one is configured with. The loader table is data, so
//! custom loader packs are a registration away.

use crate::graph::WorkflowGraph;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The declared role of an asset, which decides the destination directory a
/// fetched file is staged into.
///
/// The enum ordering is part of the dedup contract: when the same file is
/// referenced under two roles, the smaller variant wins deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AssetRole {
    Checkpoint,
    Unet,
    Vae,
    Lora,
    Clip,
    ClipVision,
    Upscale,
    Interpolation,
    Unknown,
}

impl AssetRole {
    /// The models subdirectory this role is staged into.
    pub fn directory(&self) -> &'static str {
        match self {
            AssetRole::Checkpoint => "checkpoints",
            AssetRole::Unet => "diffusion_models",
            AssetRole::Vae => "vae",
            AssetRole::Lora => "loras",
            AssetRole::Clip => "clip",
            AssetRole::ClipVision => "clip_vision",
            AssetRole::Upscale => "upscale_models",
            AssetRole::Interpolation => "interpolation",
            AssetRole::Unknown => "misc",
        }
    }

    /// Best-effort role detection from a filename, used when a loader was
    /// registered without a concrete role.
    pub fn from_filename(filename: &str) -> AssetRole {
        let lower = filename.to_ascii_lowercase();
        if lower.contains("vae") {
            AssetRole::Vae
        } else if lower.contains("lora") {
            AssetRole::Lora
        } else if lower.contains("clip_vision") {
            AssetRole::ClipVision
        } else if lower.contains("clip") {
            AssetRole::Clip
        } else if lower.contains("rife") {
            AssetRole::Interpolation
        } else if lower.contains("esrgan") || lower.contains("upscale") || lower.ends_with(".pth") {
            AssetRole::Upscale
        } else if lower.contains("unet") || lower.ends_with(".gguf") {
            AssetRole::Unet
        } else if lower.ends_with(".safetensors") || lower.ends_with(".ckpt") {
            AssetRole::Checkpoint
        } else {
            AssetRole::Unknown
        }
    }
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetRole::Checkpoint => "checkpoint",
            AssetRole::Unet => "unet",
            AssetRole::Vae => "vae",
            AssetRole::Lora => "lora",
            AssetRole::Clip => "clip",
            AssetRole::ClipVision => "clip-vision",
            AssetRole::Upscale => "upscale",
            AssetRole::Interpolation => "interpolation",
            AssetRole::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// A model file required by one loader node. Derived from the graph,
/// read-only after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetReference {
    pub node_id: u64,
    pub node_type: String,
    pub filename: String,
    pub role: AssetRole,
}

/// How one loader node type declares the asset it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderSpec {
    pub role: AssetRole,
    /// Index of the widget value holding the filename.
    pub widget: usize,
}

/// Registry of node types considered model loaders.
#[derive(Debug, Clone, Default)]
pub struct LoaderRegistry {
    map: AHashMap<String, LoaderSpec>,
}

impl LoaderRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the common loader node types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        let defaults: &[(&str, AssetRole)] = &[
            ("CheckpointLoader", AssetRole::Checkpoint),
            ("CheckpointLoaderSimple", AssetRole::Checkpoint),
            ("VAELoader", AssetRole::Vae),
            ("CLIPLoader", AssetRole::Clip),
            ("CLIPVisionLoader", AssetRole::ClipVision),
            ("UpscaleModelLoader", AssetRole::Upscale),
            ("LoraLoader", AssetRole::Lora),
            ("UnetLoader", AssetRole::Unet),
            ("UnetLoaderGGUF", AssetRole::Unet),
            ("UnetLoaderGGUFDisTorchMultiGPU", AssetRole::Unet),
            ("CLIPLoaderGGUFMultiGPU", AssetRole::Clip),
            ("DownloadAndLoadFlorence2Model", AssetRole::Unknown),
        ];
        for (node_type, role) in defaults {
            registry.register(node_type, *role, 0);
        }
        registry
    }

    pub fn register(&mut self, node_type: &str, role: AssetRole, widget: usize) {
        self.map
            .insert(node_type.to_string(), LoaderSpec { role, widget });
    }

    pub fn get(&self, node_type: &str) -> Option<&LoaderSpec> {
        self.map.get(node_type)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Extracts every asset reference from a graph, in node order.
///
/// A loader whose designated widget holds no non-empty string is a
/// legitimate "not configured" state and is skipped, not errored.
pub fn extract_assets(graph: &WorkflowGraph, loaders: &LoaderRegistry) -> Vec<AssetReference> {
    let mut references = Vec::new();
    for node in &graph.nodes {
        let Some(spec) = loaders.get(&node.node_type) else {
            continue;
        };
        let filename = match node.widget_values.get(spec.widget).and_then(|v| v.as_str()) {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => continue,
        };
        let role = if spec.role == AssetRole::Unknown {
            AssetRole::from_filename(&filename)
        } else {
            spec.role
        };
        references.push(AssetReference {
            node_id: node.id,
            node_type: node.node_type.clone(),
            filename,
            role,
        });
    }
    references
}
