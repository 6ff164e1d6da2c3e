use super::FetchPlan;
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A submission payload rendered for one graph, kept as wire-format JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PayloadEntry {
    /// Caller-chosen label, typically the source filename.
    pub label: String,
    pub json: String,
}

/// A finished analysis run: the merged fetch plan plus the submission
/// payload of every successfully translated graph.
///
/// Serializable so an analysis can be cached or handed to another process
/// without re-reading the workflows.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AnalysisArtifact {
    pub plan: FetchPlan,
    pub payloads: Vec<PayloadEntry>,
}

impl AnalysisArtifact {
    pub fn new(plan: FetchPlan, payloads: Vec<PayloadEntry>) -> Self {
        Self { plan, payloads }
    }

    /// Saves the artifact to a file using the bincode format.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let bytes = encode_to_vec(self, standard())
            .map_err(|e| ArtifactError::Generic(format!("Serialization failed: {}", e)))?;
        fs::write(path, bytes).map_err(|e| {
            ArtifactError::Generic(format!("Could not write '{}': {}", path.display(), e))
        })
    }

    /// Loads an artifact from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            ArtifactError::Generic(format!("Could not read '{}': {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }

    /// Deserializes an artifact from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| ArtifactError::Generic(format!("Deserialization failed: {}", e)))
    }
}
