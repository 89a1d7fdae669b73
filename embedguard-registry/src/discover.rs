//! Candidate artifact discovery.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use globset::Glob;

use crate::RegistryError;

/// Returns the most recently modified file in `dir` whose file name matches
/// the glob `pattern`.
///
/// Ties on modification time are broken by file name so the choice is
/// stable. A missing directory counts as "no candidates".
///
/// # Errors
/// Returns [`RegistryError::NoCandidateArtifact`] if nothing matches,
/// [`RegistryError::InvalidPattern`] for a malformed glob, or
/// [`RegistryError::Io`] if the directory cannot be listed.
pub fn latest_candidate(dir: &Path, pattern: &str) -> Result<PathBuf, RegistryError> {
    let matcher = Glob::new(pattern)
        .map_err(|source| RegistryError::InvalidPattern { pattern: pattern.to_owned(), source })?
        .compile_matcher();
    let no_candidate =
        || RegistryError::NoCandidateArtifact { dir: dir.to_path_buf(), pattern: pattern.to_owned() };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(no_candidate()),
        Err(e) => return Err(e.into()),
    };

    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry?;
        if !matcher.is_match(entry.file_name()) {
            continue;
        }
        let metadata = entry.metadata()?;
        if !metadata.is_file() {
            continue;
        }
        let key = (metadata.modified()?, entry.path());
        if best.as_ref().is_none_or(|current| key > *current) {
            best = Some(key);
        }
    }

    let (_, path) = best.ok_or_else(no_candidate)?;
    tracing::debug!(path = %path.display(), "selected candidate artifact");
    Ok(path)
}
