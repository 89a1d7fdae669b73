//! Append-only audit trail for embedding integrity violations.
//!
//! When verification finds tampered entries, the caller hands the verdicts,
//! a vocabulary and the artifact identifier to an [`AuditLogger`], which
//! appends one [`AuditRecord`] to the persisted log. Persistence failures
//! propagate as [`AuditError`]; they are never swallowed.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod logger;
pub mod record;
pub mod store;

pub use error::AuditError;
pub use logger::AuditLogger;
pub use record::{AuditRecord, TIMESTAMP_FORMAT};
pub use store::{InMemoryLogStore, JsonFileLogStore, LogStore};
