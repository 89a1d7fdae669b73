use embedguard_core::{digest, TokenId};
use embedguard_registry::{JsonVectorStore, RegistryError, VectorStore};

use crate::cli::DigestArgs;
use crate::commands::Outcome;
use crate::config::GuardConfig;
use crate::CliError;

/// Prints `id<TAB>digest` for each entry of an artifact.
///
/// # Errors
/// Returns [`RegistryError::MissingEntry`] if `--id` names an absent entry,
/// or any error from loading the artifact.
pub fn run(config: &GuardConfig, args: &DigestArgs) -> Result<Outcome, CliError> {
    let path = args.artifact.as_ref().unwrap_or(&config.base_path);
    let vectors = JsonVectorStore::new().load(path)?;

    let text = match args.id.map(TokenId) {
        Some(id) => {
            let vector = vectors.get(id).ok_or(RegistryError::MissingEntry { id })?;
            format!("{id}\t{}", digest(vector))
        }
        None => vectors
            .iter()
            .map(|(id, vector)| format!("{id}\t{}", digest(vector)))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(Outcome::Message(text))
}
