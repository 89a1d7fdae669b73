//! Verify a candidate artifact against the trusted baseline.

use std::fmt;
use std::path::PathBuf;

use embedguard_auditor::{AuditLogger, AuditRecord};
use embedguard_core::{TokenId, VerdictMap};
use embedguard_registry::{
    latest_candidate, BaselineManifest, IntegrityRegistry, JsonVectorStore, VectorStore,
};

use crate::cli::CheckArgs;
use crate::commands::trusted_registry;
use crate::config::GuardConfig;
use crate::CliError;

/// Per-token line of a check report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Intact,
    Tampered,
    /// The token's id is not in the baseline, so it was not checked.
    Unknown,
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenStatus::Intact => "INTACT",
            TokenStatus::Tampered => "TAMPERED",
            TokenStatus::Unknown => "UNKNOWN",
        })
    }
}

/// What `check` found.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The verified artifact.
    pub artifact: PathBuf,
    /// Raw verdicts for every baseline id.
    pub verdicts: VerdictMap,
    /// One entry per vocabulary token, in vocabulary order.
    pub tokens: Vec<(String, TokenId, TokenStatus)>,
    /// The audit record written for a violation, if any.
    pub audit: Option<AuditRecord>,
}

impl CheckReport {
    /// `true` if no baseline entry failed verification.
    #[must_use]
    pub fn is_intact(&self) -> bool {
        self.verdicts.all_intact()
    }

    /// Names of vocabulary tokens that failed verification.
    #[must_use]
    pub fn tampered_tokens(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|(_, _, status)| *status == TokenStatus::Tampered)
            .map(|(name, _, _)| name.as_str())
            .collect()
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "integrity check of {}", self.artifact.display())?;
        for (name, _, status) in &self.tokens {
            writeln!(f, "{name:10} -> {status}")?;
        }
        let tampered = self.verdicts.len() - self.verdicts.intact_count();
        if tampered == 0 {
            write!(f, "all {} entries verified; safe to proceed", self.verdicts.len())
        } else {
            write!(f, "{tampered} of {} entries TAMPERED", self.verdicts.len())
        }
    }
}

/// Builds the baseline, selects and verifies the candidate, and appends an
/// audit record if any entry was tampered.
///
/// A tampered artifact is reported through [`CheckReport::is_intact`]
/// rather than an error, after the audit record has been persisted.
///
/// # Errors
/// Returns `RegistryError::BaselineNotFound` if no baseline exists,
/// [`CliError::EmptyBaseline`] if it is empty,
/// `RegistryError::NoCandidateArtifact` if no candidate can be found,
/// `RegistryError::MissingEntry` if the candidate is incomplete, and
/// [`CliError::Audit`] if a violation could not be recorded.
pub fn run(config: &GuardConfig, args: &CheckArgs) -> Result<CheckReport, CliError> {
    let vocabulary = config.load_vocabulary()?;
    let store = JsonVectorStore::new();

    let (registry, baseline_path) = match &args.manifest {
        Some(path) => (IntegrityRegistry::from_manifest(BaselineManifest::load(path)?), path.clone()),
        None => (trusted_registry(&config.base_path)?, config.base_path.clone()),
    };
    if registry.is_empty() {
        return Err(CliError::EmptyBaseline { path: baseline_path });
    }
    tracing::info!(entries = registry.len(), baseline = %baseline_path.display(), "trusted digests registered");

    let artifact = match &args.candidate {
        Some(path) => path.clone(),
        None => latest_candidate(&config.candidate_dir, &config.candidate_pattern)?,
    };
    tracing::info!(artifact = %artifact.display(), "verifying candidate");

    let candidate = store.load(&artifact)?;
    let verdicts = registry.verify(&candidate)?;

    let tokens = vocabulary
        .iter()
        .map(|(name, id)| {
            let status = match verdicts.is_intact(id) {
                Some(true) => TokenStatus::Intact,
                Some(false) => TokenStatus::Tampered,
                None => TokenStatus::Unknown,
            };
            (name.to_owned(), id, status)
        })
        .collect();

    let audit = if verdicts.all_intact() {
        None
    } else {
        let logger = AuditLogger::at_path(&config.audit_log_path);
        let artifact_id = artifact.display().to_string();
        Some(logger.record_violation(&verdicts, &vocabulary, &artifact_id)?)
    };

    Ok(CheckReport { artifact, verdicts, tokens, audit })
}
