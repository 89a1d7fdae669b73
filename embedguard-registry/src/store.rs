//! Vector storage collaborator.
//!
//! The integrity core only consumes "a mapping from id to vector"; this
//! module provides the abstraction plus a JSON matrix implementation.

use std::io::ErrorKind;
use std::path::Path;

use embedguard_core::VectorSet;
use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// Loads and saves embedding artifacts.
///
/// Implementations must give every id the same positional meaning in every
/// artifact they load, so that a candidate can be compared to a baseline.
pub trait VectorStore {
    /// Load the artifact at `path`.
    ///
    /// # Errors
    /// Returns [`RegistryError::ArtifactNotFound`] if `path` does not exist.
    fn load(&self, path: &Path) -> Result<VectorSet, RegistryError>;

    /// Persist `vectors` at `path`.
    ///
    /// # Errors
    /// Returns [`RegistryError::ArtifactExists`] if `path` exists and
    /// `overwrite` is `false`.
    fn save(&self, path: &Path, vectors: &VectorSet, overwrite: bool) -> Result<(), RegistryError>;
}

/// On-disk shape: a row-major matrix under the `embedding` key.
#[derive(Serialize, Deserialize)]
struct EmbeddingFile {
    embedding: Vec<Vec<f32>>,
}

/// Stores an artifact as `{"embedding": [[f32, ...], ...]}` where the row
/// index is the token id.
///
/// Rows must share one dimension, ids must be contiguous from zero, and
/// components must be finite (JSON has no NaN or infinity).
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonVectorStore;

impl JsonVectorStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl VectorStore for JsonVectorStore {
    fn load(&self, path: &Path) -> Result<VectorSet, RegistryError> {
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RegistryError::ArtifactNotFound { path: path.to_path_buf() });
            }
            Err(e) => return Err(e.into()),
        };
        let file: EmbeddingFile = serde_json::from_slice(&raw)
            .map_err(|source| RegistryError::Json { path: path.to_path_buf(), source })?;

        let vectors = VectorSet::from_rows(file.embedding);
        check_dimensions(&vectors)?;
        tracing::debug!(
            path = %path.display(),
            rows = vectors.len(),
            dim = vectors.dimension().unwrap_or(0),
            "artifact loaded"
        );
        Ok(vectors)
    }

    fn save(&self, path: &Path, vectors: &VectorSet, overwrite: bool) -> Result<(), RegistryError> {
        if !overwrite && path.exists() {
            return Err(RegistryError::ArtifactExists { path: path.to_path_buf() });
        }
        check_dimensions(vectors)?;

        let mut embedding = Vec::with_capacity(vectors.len());
        for (expected, (id, vector)) in (0u32..).zip(vectors) {
            if id.get() != expected {
                return Err(RegistryError::NonContiguousIds { id });
            }
            if !vector.as_slice().iter().all(|c| c.is_finite()) {
                return Err(RegistryError::NonFinite { id });
            }
            embedding.push(vector.as_slice().to_vec());
        }

        let json = serde_json::to_vec(&EmbeddingFile { embedding })
            .map_err(|source| RegistryError::Json { path: path.to_path_buf(), source })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), rows = vectors.len(), "artifact saved");
        Ok(())
    }
}

fn check_dimensions(vectors: &VectorSet) -> Result<(), RegistryError> {
    let mut rows = vectors.iter();
    let Some((_, first)) = rows.next() else {
        return Ok(());
    };
    let expected = first.len();
    for (id, vector) in rows {
        if vector.len() != expected {
            return Err(RegistryError::RaggedVectors { id, expected, found: vector.len() });
        }
    }
    Ok(())
}
