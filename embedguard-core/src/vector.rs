use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::TokenId;

/// A fixed-length embedding vector of `f32` components.
///
/// The canonical byte encoding is each component's IEEE-754 bit pattern in
/// little-endian order, concatenated in element order. No normalization is
/// applied: `-0.0` and `0.0` encode differently, as do distinct NaN payloads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vector(Vec<f32>);

impl Vector {
    /// Wraps a list of components.
    #[must_use]
    pub fn new(components: Vec<f32>) -> Self {
        Self(components)
    }

    /// Number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Mutable access for collaborators that rewrite rows in place.
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.0
    }

    /// Returns the canonical byte encoding (`4 * len` bytes).
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        self.0.iter().flat_map(|c| c.to_le_bytes()).collect()
    }

    /// Euclidean distance to `other`, over the shorter of the two lengths.
    #[must_use]
    pub fn l2_distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| {
                let d = f64::from(*a) - f64::from(*b);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<f32> {
        self.0
    }
}

impl From<Vec<f32>> for Vector {
    fn from(components: Vec<f32>) -> Self {
        Self(components)
    }
}

impl<const N: usize> From<[f32; N]> for Vector {
    fn from(components: [f32; N]) -> Self {
        Self(components.to_vec())
    }
}

/// An ordered mapping from [`TokenId`] to [`Vector`].
///
/// This is the only shape the integrity core consumes from vector storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VectorSet {
    entries: BTreeMap<TokenId, Vector>,
}

impl VectorSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from a row-major matrix, using the row index as id.
    ///
    /// Rows beyond `u32::MAX` are ignored.
    #[must_use]
    pub fn from_rows<I, V>(rows: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Vector>,
    {
        let entries = (0..=u32::MAX)
            .map(TokenId)
            .zip(rows.into_iter().map(Into::into))
            .collect();
        Self { entries }
    }

    /// Inserts a vector, replacing and returning any previous one for `id`.
    pub fn insert(&mut self, id: TokenId, vector: impl Into<Vector>) -> Option<Vector> {
        self.entries.insert(id, vector.into())
    }

    #[must_use]
    pub fn get(&self, id: TokenId) -> Option<&Vector> {
        self.entries.get(&id)
    }

    pub fn get_mut(&mut self, id: TokenId) -> Option<&mut Vector> {
        self.entries.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: TokenId) -> bool {
        self.entries.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (TokenId, &Vector)> {
        self.entries.iter().map(|(id, v)| (*id, v))
    }

    /// Common length of every vector, or `None` if the set is empty or ragged.
    #[must_use]
    pub fn dimension(&self) -> Option<usize> {
        let mut lens = self.entries.values().map(Vector::len);
        let first = lens.next()?;
        lens.all(|len| len == first).then_some(first)
    }

    /// Returns `true` if ids are exactly `0..len` with no gaps.
    #[must_use]
    pub fn is_dense(&self) -> bool {
        self.entries
            .keys()
            .zip(0u32..)
            .all(|(id, expected)| id.0 == expected)
    }
}

impl FromIterator<(TokenId, Vector)> for VectorSet {
    /// Later entries for the same id overwrite earlier ones.
    fn from_iter<T: IntoIterator<Item = (TokenId, Vector)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a VectorSet {
    type Item = (TokenId, &'a Vector);
    type IntoIter = std::iter::Map<
        std::collections::btree_map::Iter<'a, TokenId, Vector>,
        fn((&'a TokenId, &'a Vector)) -> (TokenId, &'a Vector),
    >;

    fn into_iter(self) -> Self::IntoIter {
        let copy_id: fn((&'a TokenId, &'a Vector)) -> (TokenId, &'a Vector) = |(id, v)| (*id, v);
        self.entries.iter().map(copy_id)
    }
}
