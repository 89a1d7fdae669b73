//! Command handlers.
//!
//! Handlers return an [`Outcome`] instead of printing, so the binary owns
//! stdout and tests can inspect results directly.

use std::fmt;
use std::path::Path;

use embedguard_registry::{IntegrityRegistry, JsonVectorStore, RegistryError, VectorStore};

use crate::cli::{BaselineCommand, Command};
use crate::config::GuardConfig;
use crate::error::{CliError, CliExitCode};

pub mod baseline;
pub mod check;
pub mod digest;
pub mod init;
pub mod tamper;

pub use check::{CheckReport, TokenStatus};

/// Result of a successfully executed command.
#[derive(Debug)]
#[non_exhaustive]
pub enum Outcome {
    /// Informational output.
    Message(String),
    /// Result of `check`; may still carry a violation.
    Check(CheckReport),
}

impl Outcome {
    /// Exit code for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> CliExitCode {
        match self {
            Outcome::Check(report) if !report.is_intact() => CliExitCode::Violation,
            _ => CliExitCode::Success,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Message(text) => f.write_str(text),
            Outcome::Check(report) => fmt::Display::fmt(report, f),
        }
    }
}

/// Run `command` against `config`.
///
/// # Errors
/// Propagates the handler's [`CliError`].
pub fn execute(config: &GuardConfig, command: &Command) -> Result<Outcome, CliError> {
    match command {
        Command::Init(args) => init::run(config, args),
        Command::Tamper(args) => tamper::run(config, args),
        Command::Check(args) => check::run(config, args).map(Outcome::Check),
        Command::Digest(args) => digest::run(config, args),
        Command::Baseline { action: BaselineCommand::Export { out } } => baseline::export(config, out),
    }
}

/// Hashes the base artifact at `path` into a fresh registry.
///
/// A missing base artifact is reported as [`RegistryError::BaselineNotFound`].
pub(crate) fn trusted_registry(path: &Path) -> Result<IntegrityRegistry, CliError> {
    let base = JsonVectorStore::new().load(path).map_err(|e| match e {
        RegistryError::ArtifactNotFound { path } => RegistryError::BaselineNotFound { path },
        other => other,
    })?;
    let mut registry = IntegrityRegistry::new();
    registry.register(&base);
    Ok(registry)
}
