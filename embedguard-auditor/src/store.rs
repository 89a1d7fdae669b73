//! Persistence collaborators for the audit log.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::{AuditError, AuditRecord};

/// Reads and fully overwrites a persisted audit log.
///
/// The logger performs load, append and persist through this trait; an
/// implementation only has to make a single `write` durable.
pub trait LogStore: Send + Sync {
    /// Return the full history. A log that does not exist yet is empty.
    ///
    /// # Errors
    /// Returns [`AuditError::Read`] or [`AuditError::Corrupt`].
    fn read(&self) -> Result<Vec<AuditRecord>, AuditError>;

    /// Replace the persisted history with `records`.
    ///
    /// # Errors
    /// Returns [`AuditError::Write`] if the log cannot be persisted.
    fn write(&self, records: &[AuditRecord]) -> Result<(), AuditError>;
}

/// A JSON array of records in a single file, pretty-printed with two-space
/// indentation.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the log, so
/// a crash mid-write leaves the previous history intact.
#[derive(Debug, Clone)]
pub struct JsonFileLogStore {
    path: PathBuf,
}

impl JsonFileLogStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(ToOwned::to_owned).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_error(&self, source: std::io::Error) -> AuditError {
        AuditError::Write { path: self.path.clone(), source }
    }
}

impl LogStore for JsonFileLogStore {
    fn read(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(AuditError::Read { path: self.path.clone(), source }),
        };
        serde_json::from_slice(&raw)
            .map_err(|source| AuditError::Corrupt { path: self.path.clone(), source })
    }

    fn write(&self, records: &[AuditRecord]) -> Result<(), AuditError> {
        let json = serde_json::to_vec_pretty(records).map_err(AuditError::Serialize)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_error(e))?;
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, json).map_err(|e| self.write_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.write_error(e))
    }
}

/// Keeps the log in process memory. Useful for tests and for callers that
/// forward records elsewhere.
#[derive(Debug, Default)]
pub struct InMemoryLogStore {
    records: Mutex<Vec<AuditRecord>>,
}

impl InMemoryLogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogStore for InMemoryLogStore {
    fn read(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self.records.lock().map_err(|_| AuditError::LockPoisoned)?;
        Ok(records.clone())
    }

    fn write(&self, records: &[AuditRecord]) -> Result<(), AuditError> {
        let mut stored = self.records.lock().map_err(|_| AuditError::LockPoisoned)?;
        records.clone_into(&mut stored);
        Ok(())
    }
}
