use embedguard_core::VectorSet;
use embedguard_registry::{JsonVectorStore, VectorStore};

use crate::cli::InitArgs;
use crate::commands::Outcome;
use crate::config::GuardConfig;
use crate::noise::GaussianNoise;
use crate::CliError;

const INIT_STD: f64 = 0.02;

/// Creates the base artifact: one N(0, 0.02) row per id up to the largest
/// vocabulary id.
///
/// # Errors
/// Returns [`CliError::Registry`] if the artifact exists and `--force` was
/// not given, or if it cannot be written.
pub fn run(config: &GuardConfig, args: &InitArgs) -> Result<Outcome, CliError> {
    let vocabulary = config.load_vocabulary()?;
    let rows = vocabulary.iter().map(|(_, id)| id.get()).max().map_or(0, |max| max.saturating_add(1));

    let mut noise = GaussianNoise::seeded(args.seed);
    let sampled = (0..rows)
        .map(|_| noise.vector(args.dim, 0.0, INIT_STD))
        .collect::<Result<Vec<_>, _>>()?;
    let base = VectorSet::from_rows(sampled);

    JsonVectorStore::new().save(&config.base_path, &base, args.force)?;
    tracing::info!(path = %config.base_path.display(), rows, dim = args.dim, "base artifact created");

    Ok(Outcome::Message(format!(
        "created base artifact {} ({rows} x {})",
        config.base_path.display(),
        args.dim
    )))
}
