use std::path::Path;

use crate::commands::{trusted_registry, Outcome};
use crate::config::GuardConfig;
use crate::CliError;

/// Hashes the base artifact and writes its trusted digests to `out`.
///
/// # Errors
/// Returns [`RegistryError::BaselineNotFound`](embedguard_registry::RegistryError::BaselineNotFound)
/// if the base artifact is missing, or an I/O error if the manifest cannot
/// be written.
pub fn export(config: &GuardConfig, out: &Path) -> Result<Outcome, CliError> {
    let registry = trusted_registry(&config.base_path)?;
    registry.manifest().save(out)?;

    Ok(Outcome::Message(format!(
        "exported {} trusted digests to {}",
        registry.len(),
        out.display()
    )))
}
