use chrono::Utc;
use embedguard_registry::{JsonVectorStore, RegistryError, VectorStore};

use crate::cli::TamperArgs;
use crate::commands::Outcome;
use crate::config::GuardConfig;
use crate::noise::GaussianNoise;
use crate::CliError;

const PREVIEW_LEN: usize = 5;

/// Characters that would make the expanded name a glob rather than a file name.
const RESERVED: &[char] = &['?', '[', ']', '{', '}', '\\', '/'];

/// Loads the base artifact, adds N(0, `scale`²) noise to every component of
/// one token's vector, and saves the result as a new candidate named from
/// the configured candidate pattern. Existing files are never overwritten.
///
/// # Errors
/// Returns [`CliError::UnknownToken`] if the token is not in the
/// vocabulary, [`CliError::UnusableCandidatePattern`] if no file name can be
/// derived from the pattern, [`CliError::InvalidNoise`] for a negative or
/// NaN scale, or a [`CliError::Registry`] error if the base cannot be
/// loaded or the candidate cannot be written.
pub fn run(config: &GuardConfig, args: &TamperArgs) -> Result<Outcome, CliError> {
    let file_name = candidate_file_name(&config.candidate_pattern, Utc::now().timestamp())?;
    let vocabulary = config.load_vocabulary()?;
    let id = vocabulary
        .get(&args.token)
        .ok_or_else(|| CliError::UnknownToken { name: args.token.clone() })?;

    let store = JsonVectorStore::new();
    let mut vectors = store.load(&config.base_path)?;
    let row = vectors.get_mut(id).ok_or(RegistryError::MissingEntry { id })?;
    let original = row.clone();

    let mut noise = args.seed.map_or_else(GaussianNoise::from_entropy, GaussianNoise::seeded);
    noise.perturb(row.as_mut_slice(), args.scale)?;
    let tampered = row.clone();

    let path = config.candidate_dir.join(file_name);
    store.save(&path, &vectors, false)?;

    let distance = original.l2_distance(&tampered);
    tracing::info!(token = %args.token, %id, path = %path.display(), distance, "tampered artifact written");

    let lines = [
        format!("original '{}': {:?}", args.token, preview(original.as_slice())),
        format!("tampered '{}': {:?}", args.token, preview(tampered.as_slice())),
        format!("saved tampered artifact: {}", path.display()),
        format!("L2 distance after tampering: {distance:.6}"),
    ];
    Ok(Outcome::Message(lines.join("\n")))
}

/// Expands the single `*` in `pattern` to `stamp`, giving a name that
/// `check` discovers with the same pattern.
pub(crate) fn candidate_file_name(pattern: &str, stamp: i64) -> Result<String, CliError> {
    let unusable = || CliError::UnusableCandidatePattern { pattern: pattern.to_owned() };
    if pattern.contains(RESERVED) {
        return Err(unusable());
    }
    match pattern.split_once('*') {
        Some((prefix, suffix)) if !suffix.contains('*') => Ok(format!("{prefix}{stamp}{suffix}")),
        _ => Err(unusable()),
    }
}

fn preview(components: &[f32]) -> &[f32] {
    &components[..components.len().min(PREVIEW_LEN)]
}
