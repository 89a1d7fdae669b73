//! SHA-256 fingerprinting of vectors.
//!
//! `D(v) = SHA-256(le(v[0]) || le(v[1]) || ... || le(v[n-1]))`
//!
//! Components are fed as little-endian IEEE-754 binary32, so the digest of a
//! vector is identical on every host regardless of native byte order.

use sha2::{Digest as _, Sha256};

use crate::id::Digest;
use crate::vector::Vector;

/// Computes the digest of a vector's canonical byte encoding.
///
/// # Complexity
/// O(n) in the number of components.
#[must_use]
pub fn digest(vector: &Vector) -> Digest {
    digest_components(vector.as_slice())
}

/// Computes the digest of a raw component slice.
///
/// Equivalent to [`digest`] on a [`Vector`] holding the same components.
#[must_use]
pub fn digest_components(components: &[f32]) -> Digest {
    let mut hasher = Sha256::new();
    for component in components {
        hasher.update(component.to_le_bytes());
    }
    Digest::new(hasher.finalize().into())
}
