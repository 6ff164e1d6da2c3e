//! Asset classification and source resolution.
//!
//! Given an extracted [`AssetReference`], the resolver decides where the
//! file can probably be fetched from. The ladder is: exact catalog hit
//! (authoritative), filename-shape pattern, vendor keyword heuristic, and
//! finally a plain unclassified fallback that still carries the filename so
//! nothing is ever dropped.

use crate::assets::AssetReference;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a fetch candidate came from, in descending confidence order.
///
/// The derived `Ord` is the confidence ranking.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum OriginKind {
    /// Exact filename hit in the fixed catalog.
    FixedCatalog,
    /// Repository identifier inferred from the filename's shape.
    PatternInferred,
    /// No rule matched; the filename is kept verbatim as a search term.
    Unclassified,
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OriginKind::FixedCatalog => "catalog",
            OriginKind::PatternInferred => "inferred",
            OriginKind::Unclassified => "unclassified",
        };
        write!(f, "{}", name)
    }
}

/// One ranked possibility for fetching an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCandidate {
    pub filename: String,
    pub kind: OriginKind,
    /// Repository identifier, present for catalog and pattern candidates.
    pub repo: Option<String>,
    /// Search term for unclassified candidates, the filename verbatim.
    pub search_term: Option<String>,
    /// The vendor token that matched, when the keyword heuristic fired.
    pub hint: Option<String>,
}

impl SourceCandidate {
    /// True when the candidate names a concrete repository to fetch from.
    pub fn is_resolved(&self) -> bool {
        self.repo.is_some()
    }
}

/// The fixed filename-to-repository table.
///
/// Registration order is part of the contract: a second entry for the same
/// filename is rejected, so the first-registered repository wins
/// deterministically.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<(String, String)>,
    index: AHashMap<String, usize>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a catalog preloaded with the well-known model files.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::empty();
        let defaults: &[(&str, &str)] = &[
            ("sd_xl_base_1.0.safetensors", "stabilityai/stable-diffusion-xl-base-1.0"),
            ("sd_xl_refiner_1.0.safetensors", "stabilityai/stable-diffusion-xl-refiner-1.0"),
            ("sdxl_vae.safetensors", "madebyollin/sdxl-vae-fp16-fix"),
            ("clip_vision_h.safetensors", "h94/IP-Adapter"),
            ("v1-5-pruned-emaonly.safetensors", "runwayml/stable-diffusion-v1-5"),
            ("vae-ft-mse-840000-ema-pruned.safetensors", "stabilityai/sd-vae-ft-mse-original"),
            ("vae-ft-mse-840000-ema-pruned.ckpt", "stabilityai/sd-vae-ft-mse-original"),
            ("RealESRGAN_x4plus.pth", "xinntao/realesrgan"),
            ("RealESRGAN_x4plus_anime_6B.pth", "xinntao/realesrgan"),
            ("rife47.pth", "Fannovel16/RIFE"),
            ("wan2.1-i2v-14b-720p-Q5_K_M.gguf", "city96/Wan2.1-I2V-14B-720P-gguf"),
            ("umt5-xxl-encoder-Q5_K_M.gguf", "city96/umt5-xxl-encoder-gguf"),
            ("wan_2.1_vae.safetensors", "Wan-AI/Wan2.1-I2V-14B-720P"),
        ];
        for (filename, repo) in defaults {
            catalog.register(filename, repo);
        }
        catalog
    }

    /// Registers a filename-to-repository entry. Returns `false` when the
    /// filename was already registered; the existing entry is kept.
    pub fn register(&mut self, filename: &str, repo: &str) -> bool {
        if self.index.contains_key(filename) {
            return false;
        }
        self.index.insert(filename.to_string(), self.entries.len());
        self.entries.push((filename.to_string(), repo.to_string()));
        true
    }

    pub fn lookup(&self, filename: &str) -> Option<&str> {
        self.index
            .get(filename)
            .map(|&i| self.entries[i].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classifies asset references into ranked source candidates.
#[derive(Debug, Clone)]
pub struct Resolver {
    catalog: Catalog,
    vendor_tokens: Vec<String>,
    keyword_tokens: Vec<String>,
}

impl Resolver {
    /// Creates a resolver over the given catalog with the default vendor and
    /// keyword token lists.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            vendor_tokens: ["florence", "rife", "umt5", "esrgan"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            keyword_tokens: ["civitai", "civit", "wan", "realistic"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Replaces the bare-name vendor token list.
    pub fn with_vendor_tokens(mut self, tokens: &[&str]) -> Self {
        self.vendor_tokens = tokens.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Replaces the keyword heuristic token list.
    pub fn with_keyword_tokens(mut self, tokens: &[&str]) -> Self {
        self.keyword_tokens = tokens.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Produces the ranked candidate list for one asset reference, highest
    /// confidence first. Always returns at least one candidate.
    pub fn resolve(&self, reference: &AssetReference) -> Vec<SourceCandidate> {
        let filename = reference.filename.as_str();

        // 1. Exact catalog entries are authoritative.
        if let Some(repo) = self.catalog.lookup(filename) {
            return vec![SourceCandidate {
                filename: filename.to_string(),
                kind: OriginKind::FixedCatalog,
                repo: Some(repo.to_string()),
                search_term: None,
                hint: None,
            }];
        }

        // 2. Filename-shape patterns.
        if is_repo_identifier(filename) || self.is_vendor_bare_name(filename) {
            return vec![SourceCandidate {
                filename: filename.to_string(),
                kind: OriginKind::PatternInferred,
                repo: Some(filename.to_string()),
                search_term: None,
                hint: None,
            }];
        }

        // 3. Keyword heuristic: searchable, but never treated as resolved.
        let lower = filename.to_ascii_lowercase();
        if let Some(token) = self
            .keyword_tokens
            .iter()
            .find(|token| lower.contains(token.as_str()))
        {
            return vec![SourceCandidate {
                filename: filename.to_string(),
                kind: OriginKind::Unclassified,
                repo: None,
                search_term: Some(filename.to_string()),
                hint: Some(token.clone()),
            }];
        }

        // 4. Nothing matched; preserve the filename for manual follow-up.
        vec![SourceCandidate {
            filename: filename.to_string(),
            kind: OriginKind::Unclassified,
            repo: None,
            search_term: Some(filename.to_string()),
            hint: None,
        }]
    }

    /// A bare name with no path separator or extension that carries a known
    /// vendor token is treated as a repository identifier itself.
    fn is_vendor_bare_name(&self, name: &str) -> bool {
        if name.contains('/') || name.contains('.') {
            return false;
        }
        let lower = name.to_ascii_lowercase();
        self.vendor_tokens
            .iter()
            .any(|token| lower.contains(token.as_str()))
    }
}

/// Checks the `owner/repository` two-segment shape.
fn is_repo_identifier(name: &str) -> bool {
    let mut segments = name.split('/');
    let (Some(owner), Some(repo), None) = (segments.next(), segments.next(), segments.next())
    else {
        return false;
    };
    let valid_owner = !owner.is_empty()
        && owner
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    let valid_repo = !repo.is_empty()
        && repo
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    // A repo segment that looks like a model file is a path, not a repo id.
    let file_like = ["safetensors", "ckpt", "pth", "gguf", "bin"]
        .iter()
        .any(|ext| repo.to_ascii_lowercase().ends_with(&format!(".{}", ext)));
    valid_owner && valid_repo && !file_like
}
