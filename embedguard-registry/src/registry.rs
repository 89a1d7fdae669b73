//! The trusted digest baseline and the verification protocol.

use std::collections::BTreeMap;

use embedguard_core::{digest, Digest, TokenId, Vector, VectorSet, VerdictMap};

use crate::manifest::BaselineManifest;
use crate::RegistryError;

/// Owns the mapping from entry id to trusted [`Digest`].
///
/// `register` is the only way to change what "intact" means for an id.
/// `verify` never mutates the baseline and is deterministic: the same
/// candidate against the same baseline always yields the same verdicts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityRegistry {
    baseline: BTreeMap<TokenId, Digest>,
}

impl IntegrityRegistry {
    /// Creates a registry with an empty baseline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a registry from a previously exported manifest.
    #[must_use]
    pub fn from_manifest(manifest: BaselineManifest) -> Self {
        Self { baseline: manifest.entries }
    }

    /// Exports the current baseline.
    #[must_use]
    pub fn manifest(&self) -> BaselineManifest {
        BaselineManifest::new(self.baseline.clone())
    }

    /// Hashes every supplied vector and stores it as the trusted digest for
    /// its id.
    ///
    /// New ids extend the baseline; existing ids are re-baselined. When the
    /// same id appears more than once, the last occurrence wins.
    pub fn register<'a, I>(&mut self, trusted: I)
    where
        I: IntoIterator<Item = (TokenId, &'a Vector)>,
    {
        let mut added = 0usize;
        let mut replaced = 0usize;
        for (id, vector) in trusted {
            let trusted_digest = digest(vector);
            match self.baseline.insert(id, trusted_digest) {
                Some(previous) if previous != trusted_digest => {
                    replaced += 1;
                    tracing::debug!(%id, %previous, digest = %trusted_digest, "re-baselined entry");
                }
                Some(_) => {}
                None => added += 1,
            }
        }
        tracing::info!(added, replaced, total = self.baseline.len(), "trusted digests registered");
    }

    /// Checks every baseline entry against `candidate`.
    ///
    /// The returned map has exactly the baseline's ids. Candidate entries
    /// that are not in the baseline are ignored. An empty baseline yields an
    /// empty map.
    ///
    /// # Errors
    /// Returns [`RegistryError::MissingEntry`] naming the lowest baseline id
    /// that `candidate` lacks. No partial verdicts are produced.
    pub fn verify(&self, candidate: &VectorSet) -> Result<VerdictMap, RegistryError> {
        let mut verdicts = VerdictMap::new();
        for (&id, trusted) in &self.baseline {
            let vector = candidate.get(id).ok_or(RegistryError::MissingEntry { id })?;
            let current = digest(vector);
            let intact = current == *trusted;
            if !intact {
                tracing::warn!(%id, trusted = %trusted, current = %current, "digest mismatch");
            }
            verdicts.insert(id, intact);
        }

        tracing::info!(
            checked = verdicts.len(),
            tampered = verdicts.len() - verdicts.intact_count(),
            "verification complete"
        );
        Ok(verdicts)
    }

    /// Baseline ids that `candidate` does not contain, ascending.
    #[must_use]
    pub fn missing_ids(&self, candidate: &VectorSet) -> Vec<TokenId> {
        self.baseline.keys().copied().filter(|id| !candidate.contains(*id)).collect()
    }

    /// The trusted digest registered for `id`, if any.
    #[must_use]
    pub fn trusted_digest(&self, id: TokenId) -> Option<Digest> {
        self.baseline.get(&id).copied()
    }

    #[must_use]
    pub fn contains(&self, id: TokenId) -> bool {
        self.baseline.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }
}
