//! Error types for the auditor crate.

use std::path::PathBuf;

/// Failures to read or persist the audit log.
///
/// None of these may be ignored: a violation that was detected but not
/// recorded is itself a security gap.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuditError {
    /// The existing log could not be read.
    #[error("failed to read audit log {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The updated log could not be written.
    #[error("failed to write audit log {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The existing log is not a valid list of audit records.
    #[error("audit log {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The log could not be encoded.
    #[error("failed to serialize audit log: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A previous writer panicked while holding the log lock.
    #[error("audit log lock poisoned")]
    LockPoisoned,
}
