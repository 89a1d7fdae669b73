//! Persisted snapshot of a trusted baseline.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, SubsecRound, Utc};
use embedguard_core::{Digest, TokenId};
use serde::{Deserialize, Serialize};

use crate::RegistryError;

/// A trusted baseline exported for later verification without the
/// original artifact.
///
/// ```json
/// { "created_at": "2025-01-01T00:00:00Z", "entries": { "0": "<hex>", ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct BaselineManifest {
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    /// Trusted digest per entry id.
    pub entries: BTreeMap<TokenId, Digest>,
}

impl BaselineManifest {
    /// Wraps a digest table, stamped with the current time.
    #[must_use]
    pub fn new(entries: BTreeMap<TokenId, Digest>) -> Self {
        Self { created_at: Utc::now().trunc_subsecs(0), entries }
    }

    /// Reads a manifest from `path`.
    ///
    /// # Errors
    /// Returns [`RegistryError::BaselineNotFound`] if `path` does not exist,
    /// [`RegistryError::Json`] if it is malformed, or [`RegistryError::Io`].
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(RegistryError::BaselineNotFound { path: path.to_path_buf() });
            }
            Err(e) => return Err(e.into()),
        };
        let manifest: Self = serde_json::from_slice(&raw)
            .map_err(|source| RegistryError::Json { path: path.to_path_buf(), source })?;
        tracing::debug!(path = %path.display(), entries = manifest.entries.len(), "baseline manifest loaded");
        Ok(manifest)
    }

    /// Writes the manifest to `path` as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`RegistryError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|source| RegistryError::Json { path: path.to_path_buf(), source })?;
        std::fs::write(path, json)?;
        tracing::info!(path = %path.display(), entries = self.entries.len(), "baseline manifest saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_manifest_is_baseline_not_found() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("nope.json");
        match BaselineManifest::load(&path) {
            Err(RegistryError::BaselineNotFound { path: p }) => assert_eq!(p, path),
            other => panic!("expected BaselineNotFound, got {other:?}"),
        }
    }

    #[test]
    fn save_then_load_preserves_entries() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("baseline.json");
        let mut entries = BTreeMap::new();
        entries.insert(TokenId(0), Digest::new([0x11; 32]));
        entries.insert(TokenId(7), Digest::new([0xfe; 32]));
        let manifest = BaselineManifest::new(entries);

        manifest.save(&path).unwrap_or_else(|e| panic!("save: {e}"));
        let loaded = BaselineManifest::load(&path).unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(loaded, manifest);
    }

    #[test]
    fn entries_serialize_as_hex_keyed_by_id() {
        let mut entries = BTreeMap::new();
        entries.insert(TokenId(3), Digest::new([0xab; 32]));
        let manifest = BaselineManifest::new(entries);
        let json = serde_json::to_value(&manifest).unwrap_or_default();
        assert_eq!(json["entries"]["3"], serde_json::Value::String("ab".repeat(32)));
    }

    #[test]
    fn malformed_manifest_is_json_error() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let path = dir.path().join("bad.json");
        std::fs::write(&path, b"{\"entries\": {\"0\": \"not-hex\"}}")
            .unwrap_or_else(|e| panic!("write: {e}"));
        assert!(matches!(BaselineManifest::load(&path), Err(RegistryError::Json { .. })));
    }
}
