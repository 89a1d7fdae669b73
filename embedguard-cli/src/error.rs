//! Error and exit code types for the CLI.

use std::path::PathBuf;
use std::process::ExitCode;

use embedguard_auditor::AuditError;
use embedguard_registry::RegistryError;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CliExitCode {
    /// Command completed; for `check`, every entry is intact.
    Success = 0,
    /// The command could not run to completion.
    Failure = 1,
    /// Verification found tampered entries. Downstream use must abort.
    Violation = 2,
}

impl From<CliExitCode> for ExitCode {
    fn from(code: CliExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Errors surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CliError {
    /// An error from baseline registration, verification or artifact storage.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The audit log could not be read or written.
    #[error("audit log failure: {0}")]
    Audit(#[from] AuditError),

    /// The vocabulary file is not a JSON object of `name: id` pairs.
    #[error("invalid vocabulary file {path}: {source}")]
    Vocabulary {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The vocabulary has no entries, so there is nothing to build or report.
    #[error("vocabulary is empty")]
    EmptyVocabulary,

    /// The named token is not in the vocabulary.
    #[error("unknown token '{name}'")]
    UnknownToken { name: String },

    /// The baseline artifact exists but holds no entries.
    #[error("trusted baseline {path} has no entries; refusing to treat it as verified")]
    EmptyBaseline { path: PathBuf },

    /// Gaussian noise parameters were rejected.
    #[error("invalid noise parameters: {0}")]
    InvalidNoise(#[from] rand_distr::NormalError),

    /// The candidate pattern cannot name a file for `tamper` to write.
    #[error("candidate pattern '{pattern}' must contain exactly one '*' and no other glob syntax")]
    UnusableCandidatePattern { pattern: String },

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Exit code reported for this error.
    #[must_use]
    pub fn exit_code(&self) -> CliExitCode {
        CliExitCode::Failure
    }
}
