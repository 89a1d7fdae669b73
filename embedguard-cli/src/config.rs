//! File locations and vocabulary loading.

use std::io::ErrorKind;
use std::path::PathBuf;

use embedguard_core::{TokenId, Vocabulary};

use crate::CliError;

/// Default location of the trusted base artifact.
pub const DEFAULT_BASE_PATH: &str = "embeddings/base_embeddings.json";
/// Default directory searched for candidate artifacts.
pub const DEFAULT_CANDIDATE_DIR: &str = "embeddings";
/// Default file name glob for candidate artifacts.
pub const DEFAULT_CANDIDATE_PATTERN: &str = "tampered_embeddings_*.json";
/// Default audit log location.
pub const DEFAULT_AUDIT_LOG_PATH: &str = "embeddings/audit_log.json";
/// Default vocabulary location.
pub const DEFAULT_VOCAB_PATH: &str = "embeddings/vocab.json";

/// Tokens used when no vocabulary file is present.
const DEFAULT_TOKENS: [&str; 7] = ["python", "java", "ai", "language", "snake", "model", "code"];

/// Where the CLI reads and writes its files.
///
/// Every path is explicit; nothing is resolved from process-wide state
/// after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GuardConfig {
    /// Trusted base artifact.
    pub base_path: PathBuf,
    /// Directory searched for candidate artifacts.
    pub candidate_dir: PathBuf,
    /// File name glob selecting candidate artifacts.
    pub candidate_pattern: String,
    /// Persisted audit log.
    pub audit_log_path: PathBuf,
    /// JSON object mapping token name to id.
    pub vocab_path: PathBuf,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BASE_PATH),
            candidate_dir: PathBuf::from(DEFAULT_CANDIDATE_DIR),
            candidate_pattern: DEFAULT_CANDIDATE_PATTERN.to_owned(),
            audit_log_path: PathBuf::from(DEFAULT_AUDIT_LOG_PATH),
            vocab_path: PathBuf::from(DEFAULT_VOCAB_PATH),
        }
    }
}

impl GuardConfig {
    /// A config rooted at `dir`, using the default file names inside it.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            base_path: dir.join("base_embeddings.json"),
            candidate_dir: dir.clone(),
            candidate_pattern: DEFAULT_CANDIDATE_PATTERN.to_owned(),
            audit_log_path: dir.join("audit_log.json"),
            vocab_path: dir.join("vocab.json"),
        }
    }

    /// Load the vocabulary from `vocab_path`, falling back to
    /// [`default_vocabulary`] if the file does not exist.
    ///
    /// # Errors
    /// Returns [`CliError::Vocabulary`] if the file is malformed,
    /// [`CliError::EmptyVocabulary`] if it has no entries, or
    /// [`CliError::Io`] if it cannot be read.
    pub fn load_vocabulary(&self) -> Result<Vocabulary, CliError> {
        let vocabulary = match std::fs::read(&self.vocab_path) {
            Ok(raw) => serde_json::from_slice(&raw)
                .map_err(|source| CliError::Vocabulary { path: self.vocab_path.clone(), source })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.vocab_path.display(), "no vocabulary file, using built-in tokens");
                default_vocabulary()
            }
            Err(e) => return Err(e.into()),
        };

        if vocabulary.is_empty() {
            return Err(CliError::EmptyVocabulary);
        }
        Ok(vocabulary)
    }
}

/// The built-in seven-token vocabulary, ids `0..7` in declaration order.
#[must_use]
pub fn default_vocabulary() -> Vocabulary {
    (0u32..).zip(DEFAULT_TOKENS).map(|(id, name)| (name, TokenId(id))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vocabulary_ids_follow_declaration_order() {
        let vocab = default_vocabulary();
        assert_eq!(vocab.len(), 7);
        assert_eq!(vocab.get("python"), Some(TokenId(0)));
        assert_eq!(vocab.get("java"), Some(TokenId(1)));
        assert_eq!(vocab.get("code"), Some(TokenId(6)));
    }

    #[test]
    fn missing_vocab_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let config = GuardConfig::in_dir(dir.path());
        let vocab = config.load_vocabulary().unwrap_or_else(|e| panic!("load: {e}"));
        assert_eq!(vocab, default_vocabulary());
    }

    #[test]
    fn vocab_file_is_loaded_in_order() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let config = GuardConfig::in_dir(dir.path());
        std::fs::write(&config.vocab_path, r#"{"zeta": 1, "alpha": 0}"#)
            .unwrap_or_else(|e| panic!("write: {e}"));
        let vocab = config.load_vocabulary().unwrap_or_else(|e| panic!("load: {e}"));
        let names: Vec<&str> = vocab.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn empty_or_malformed_vocab_is_rejected() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
        let config = GuardConfig::in_dir(dir.path());

        std::fs::write(&config.vocab_path, "{}").unwrap_or_else(|e| panic!("write: {e}"));
        assert!(matches!(config.load_vocabulary(), Err(CliError::EmptyVocabulary)));

        std::fs::write(&config.vocab_path, "[1, 2]").unwrap_or_else(|e| panic!("write: {e}"));
        assert!(matches!(config.load_vocabulary(), Err(CliError::Vocabulary { .. })));
    }
}
