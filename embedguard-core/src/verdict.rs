use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::TokenId;

/// Per-entry outcome of a single verification: `true` means intact.
///
/// Produced fresh by every verification and keyed by exactly the ids that
/// were in the trusted baseline at the time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerdictMap(BTreeMap<TokenId, bool>);

impl VerdictMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the verdict for `id`.
    pub fn insert(&mut self, id: TokenId, intact: bool) {
        self.0.insert(id, intact);
    }

    /// Returns the verdict for `id`, or `None` if `id` was not checked.
    #[must_use]
    pub fn is_intact(&self, id: TokenId) -> Option<bool> {
        self.0.get(&id).copied()
    }

    /// Returns `true` if every checked entry is intact (vacuously for empty maps).
    #[must_use]
    pub fn all_intact(&self) -> bool {
        self.0.values().all(|intact| *intact)
    }

    /// Ids whose verdict is `false`, ascending.
    #[must_use]
    pub fn tampered_ids(&self) -> Vec<TokenId> {
        self.0
            .iter()
            .filter(|(_, intact)| !**intact)
            .map(|(id, _)| *id)
            .collect()
    }

    #[must_use]
    pub fn intact_count(&self) -> usize {
        self.0.values().filter(|intact| **intact).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenId, bool)> + '_ {
        self.0.iter().map(|(id, intact)| (*id, *intact))
    }
}

impl FromIterator<(TokenId, bool)> for VerdictMap {
    fn from_iter<T: IntoIterator<Item = (TokenId, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
