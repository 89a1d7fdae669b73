//! Error types for the registry crate.

use std::path::PathBuf;

use embedguard_core::TokenId;

/// Errors that can occur while building a baseline, loading artifacts or
/// verifying candidates.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The candidate set lacks an entry that is present in the baseline.
    #[error("candidate is missing baseline entry {id}")]
    MissingEntry { id: TokenId },

    /// No trusted baseline is available, so nothing can be verified.
    #[error("trusted baseline not found at {path}")]
    BaselineNotFound { path: PathBuf },

    /// No candidate artifact matched the discovery pattern.
    #[error("no candidate artifact matching '{pattern}' in {dir}")]
    NoCandidateArtifact { dir: PathBuf, pattern: String },

    /// The candidate discovery pattern is not a valid glob.
    #[error("invalid candidate pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// An artifact path does not exist.
    #[error("artifact not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    /// Refused to replace an existing artifact.
    #[error("artifact already exists: {path} (pass overwrite to replace it)")]
    ArtifactExists { path: PathBuf },

    /// Rows of an artifact do not share one dimension.
    #[error("row {id} has {found} components, expected {expected}")]
    RaggedVectors { id: TokenId, expected: usize, found: usize },

    /// A row-major artifact cannot hold a set whose ids have gaps.
    #[error("ids must be contiguous from 0; found gap before {id}")]
    NonContiguousIds { id: TokenId },

    /// The JSON artifact format cannot represent NaN or infinity.
    #[error("row {id} contains a non-finite component")]
    NonFinite { id: TokenId },

    /// A file could not be parsed or serialized.
    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
