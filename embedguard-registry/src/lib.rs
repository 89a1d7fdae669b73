//! Trusted digest baseline and verification protocol for embedding artifacts.
//!
//! An [`IntegrityRegistry`] records the SHA-256 digest of every trusted
//! vector and later checks a candidate artifact entry by entry, producing a
//! [`VerdictMap`](embedguard_core::VerdictMap). Storage and discovery of
//! artifacts live behind [`VectorStore`] and [`latest_candidate`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod discover;
pub mod error;
pub mod manifest;
pub mod registry;
pub mod shared;
pub mod store;

pub use discover::latest_candidate;
pub use error::RegistryError;
pub use manifest::BaselineManifest;
pub use registry::IntegrityRegistry;
pub use shared::SharedRegistry;
pub use store::{JsonVectorStore, VectorStore};
