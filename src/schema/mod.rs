//! The node-type schema registry.
//!
//! A schema names the positional widget values of a node type, so the
//! translator can turn `widgets_values[i]` into a named input. Adding a node
//! type is a data change here, not a code change anywhere else; types with
//! no schema entry pass through the translator with their widget values
//! preserved positionally.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// One named parameter backed by a positional widget value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub widget: usize,
}

/// Maps node type tags to the ordered parameter list their widget values
/// represent.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    map: AHashMap<String, Vec<ParamSpec>>,
}

/// Master macro that defines the built-in widget schemas as a flat table.
macro_rules! schema_table {
    ( $registry:expr; $( $node_type:expr => [ $( $param:expr ),* $(,)? ] ),* $(,)? ) => {
        $( $registry.register($node_type, &[ $( $param ),* ]); )*
    };
}

impl SchemaRegistry {
    /// Creates a registry with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a registry preloaded with the widget schemas of the common
    /// node types found in generation workflows.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        schema_table! { registry;
            "LoadImage" => ["image"],
            "SaveImage" => ["filename_prefix"],
            "mxSlider" => ["value"],
            "mxSlider2D" => ["value_x", "value_y"],
            "RandomNoise" => ["noise_seed"],
            "KSamplerSelect" => ["sampler_name"],
            "BasicScheduler" => ["scheduler", "steps", "denoise"],
            "CheckpointLoaderSimple" => ["ckpt_name"],
            "VAELoader" => ["vae_name"],
            "CLIPVisionLoader" => ["clip_name"],
            "UpscaleModelLoader" => ["model_name"],
            "LoraLoader" => ["lora_name", "strength_model", "strength_clip"],
            "UnetLoaderGGUFDisTorchMultiGPU" => ["unet_name", "device", "virtual_vram_gb", "use_other_vram"],
            "CLIPLoaderGGUFMultiGPU" => ["clip_name", "type", "device"],
            "CLIPTextEncode" => ["text"],
            "CLIPVisionEncode" => ["crop"],
            "WanImageToVideo" => ["width", "height", "length", "batch_size"],
            "VHS_VideoCombine" => [
                "frame_rate", "loop_count", "filename_prefix", "format", "pingpong",
                "save_output", "pix_fmt", "crf", "save_metadata", "trim_to_audio",
            ],
        }
        registry
    }

    /// Registers a dense schema: parameter `i` reads widget index `i`.
    pub fn register(&mut self, node_type: &str, params: &[&str]) {
        let specs = params
            .iter()
            .enumerate()
            .map(|(widget, name)| ParamSpec {
                name: (*name).to_string(),
                widget,
            })
            .collect();
        self.map.insert(node_type.to_string(), specs);
    }

    /// Registers a schema with explicit widget indices, for node types whose
    /// serialized widgets are not contiguous.
    pub fn register_sparse(&mut self, node_type: &str, params: Vec<ParamSpec>) {
        self.map.insert(node_type.to_string(), params);
    }

    /// Returns the parameter list for a node type, if one is registered.
    pub fn get(&self, node_type: &str) -> Option<&[ParamSpec]> {
        self.map.get(node_type).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
