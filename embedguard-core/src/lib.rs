//! Core types for embedding integrity verification.
//!
//! Defines the vector model consumed from storage collaborators, the
//! SHA-256 [`digest`] over a vector's canonical encoding, and the verdict
//! and vocabulary types exchanged between the registry and the auditor.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod hasher;
pub mod id;
pub mod vector;
pub mod verdict;
pub mod vocab;

pub use error::CoreError;
pub use hasher::{digest, digest_components};
pub use id::{Digest, TokenId, DIGEST_LEN};
pub use vector::{Vector, VectorSet};
pub use verdict::VerdictMap;
pub use vocab::Vocabulary;
