//! Caller-supplied token name lookup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::id::TokenId;
use crate::verdict::VerdictMap;

/// Insertion-ordered mapping from human-readable token name to [`TokenId`].
///
/// Used only to translate ids into names for reporting; the integrity core
/// never persists it. Serialized as a JSON object `{"name": id, ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary(IndexMap<String, TokenId>);

impl Vocabulary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a token. A replaced name keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, id: TokenId) -> Option<TokenId> {
        self.0.insert(name.into(), id)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<TokenId> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TokenId)> {
        self.0.iter().map(|(name, id)| (name.as_str(), *id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names whose id has a `false` verdict, in vocabulary order.
    ///
    /// Names whose id is absent from `verdicts` are excluded.
    #[must_use]
    pub fn violated_names(&self, verdicts: &VerdictMap) -> Vec<String> {
        self.0
            .iter()
            .filter(|(_, id)| verdicts.is_intact(**id) == Some(false))
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, TokenId)> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = (S, TokenId)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(name, id)| (name.into(), id)).collect())
    }
}
