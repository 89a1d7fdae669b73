//! Append-only recording of integrity violations.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use embedguard_core::{VerdictMap, Vocabulary};

use crate::store::{JsonFileLogStore, LogStore};
use crate::{AuditError, AuditRecord};

/// Records integrity violations into a persisted, append-only log.
///
/// Each append is a load, append, persist sequence over the whole log.
/// The sequence is serialized per logger instance; writers in other
/// processes targeting the same log must coordinate externally.
#[derive(Debug)]
pub struct AuditLogger<S: LogStore = JsonFileLogStore> {
    store: S,
    write_lock: Mutex<()>,
}

impl AuditLogger<JsonFileLogStore> {
    /// Create a logger writing a JSON log at `path`.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self::new(JsonFileLogStore::new(path))
    }
}

impl<S: LogStore> AuditLogger<S> {
    /// Create a logger over an arbitrary store.
    pub fn new(store: S) -> Self {
        Self { store, write_lock: Mutex::new(()) }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Record a violation for `artifact`, stamped with the current UTC time.
    ///
    /// See [`record_violation_at`](Self::record_violation_at).
    ///
    /// # Errors
    /// Returns an [`AuditError`] if the log cannot be read or persisted.
    pub fn record_violation(
        &self,
        verdicts: &VerdictMap,
        vocabulary: &Vocabulary,
        artifact: &str,
    ) -> Result<AuditRecord, AuditError> {
        self.record_violation_at(verdicts, vocabulary, artifact, Utc::now())
    }

    /// Record a violation for `artifact` at an explicit time.
    ///
    /// The violated token set is every vocabulary name whose id has a
    /// `false` verdict; names whose id was not verified are left out. The
    /// record is built completely before the log is touched, then appended.
    /// A record is written even when no named token failed, since the caller
    /// has already decided that a violation occurred.
    ///
    /// # Errors
    /// Returns [`AuditError::Read`] or [`AuditError::Corrupt`] if the
    /// existing history cannot be loaded and [`AuditError::Write`] if the
    /// updated history cannot be persisted. Nothing is appended on error.
    pub fn record_violation_at(
        &self,
        verdicts: &VerdictMap,
        vocabulary: &Vocabulary,
        artifact: &str,
        now: DateTime<Utc>,
    ) -> Result<AuditRecord, AuditError> {
        let record = AuditRecord::new(now, artifact, vocabulary.violated_names(verdicts));
        let total = self.append(record.clone())?;

        tracing::warn!(
            artifact,
            violated = ?record.violated_tokens,
            total_records = total,
            "integrity violation recorded"
        );
        Ok(record)
    }

    /// Full persisted history, oldest first.
    ///
    /// # Errors
    /// Returns [`AuditError::Read`] or [`AuditError::Corrupt`].
    pub fn history(&self) -> Result<Vec<AuditRecord>, AuditError> {
        self.store.read()
    }

    fn append(&self, record: AuditRecord) -> Result<usize, AuditError> {
        let _guard = self.write_lock.lock().map_err(|_| AuditError::LockPoisoned)?;
        let mut records = self.store.read()?;
        records.push(record);
        self.store.write(&records)?;
        Ok(records.len())
    }
}
