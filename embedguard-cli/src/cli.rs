//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{
    GuardConfig, DEFAULT_AUDIT_LOG_PATH, DEFAULT_BASE_PATH, DEFAULT_CANDIDATE_DIR,
    DEFAULT_CANDIDATE_PATTERN, DEFAULT_VOCAB_PATH,
};

/// Verify that embedding artifacts match a trusted baseline.
#[derive(Debug, Parser)]
#[command(name = "embedguard")]
#[command(version)]
#[command(about = "Detect tampering in embedding artifacts against a trusted baseline")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub paths: PathArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// File locations shared by every command.
#[derive(Debug, Clone, Args)]
pub struct PathArgs {
    /// Trusted base artifact
    #[arg(long, env = "EMBEDGUARD_BASE", default_value = DEFAULT_BASE_PATH, global = true)]
    pub base: PathBuf,

    /// Directory searched for candidate artifacts
    #[arg(long, env = "EMBEDGUARD_CANDIDATE_DIR", default_value = DEFAULT_CANDIDATE_DIR, global = true)]
    pub candidate_dir: PathBuf,

    /// File name glob selecting candidate artifacts
    #[arg(long, env = "EMBEDGUARD_CANDIDATE_PATTERN", default_value = DEFAULT_CANDIDATE_PATTERN, global = true)]
    pub candidate_pattern: String,

    /// Audit log receiving violation records
    #[arg(long, env = "EMBEDGUARD_AUDIT_LOG", default_value = DEFAULT_AUDIT_LOG_PATH, global = true)]
    pub audit_log: PathBuf,

    /// JSON object mapping token names to ids
    #[arg(long, env = "EMBEDGUARD_VOCAB", default_value = DEFAULT_VOCAB_PATH, global = true)]
    pub vocab: PathBuf,
}

impl From<PathArgs> for GuardConfig {
    fn from(args: PathArgs) -> Self {
        let mut config = GuardConfig::default();
        config.base_path = args.base;
        config.candidate_dir = args.candidate_dir;
        config.candidate_pattern = args.candidate_pattern;
        config.audit_log_path = args.audit_log;
        config.vocab_path = args.vocab;
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create the trusted base artifact from the vocabulary
    Init(InitArgs),
    /// Write a copy of the base artifact with one token's vector perturbed
    Tamper(TamperArgs),
    /// Verify a candidate artifact and record any violation
    Check(CheckArgs),
    /// Print per-entry digests of an artifact
    Digest(DigestArgs),
    /// Trusted baseline manifest commands
    Baseline {
        #[command(subcommand)]
        action: BaselineCommand,
    },
}

#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Components per vector
    #[arg(long, default_value_t = 32)]
    pub dim: usize,

    /// Seed for the initial N(0, 0.02) values
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Replace an existing base artifact
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Args)]
pub struct TamperArgs {
    /// Token whose vector is perturbed
    #[arg(long)]
    pub token: String,

    /// Standard deviation of the added noise
    #[arg(long, default_value_t = 0.5)]
    pub scale: f64,

    /// Seed for the noise; random if omitted
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Artifact to verify; defaults to the newest match in the candidate directory
    #[arg(long)]
    pub candidate: Option<PathBuf>,

    /// Verify against an exported manifest instead of the base artifact
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

#[derive(Debug, Clone, Args)]
pub struct DigestArgs {
    /// Artifact to hash; defaults to the base artifact
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// Only print this entry
    #[arg(long)]
    pub id: Option<u32>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum BaselineCommand {
    /// Hash the base artifact and write the trusted digests to a manifest
    Export {
        /// Manifest destination
        #[arg(long)]
        out: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_paths_apply_after_subcommand() {
        let cli = Cli::try_parse_from([
            "embedguard",
            "check",
            "--base",
            "/tmp/b.json",
            "--candidate",
            "/tmp/c.json",
        ])
        .unwrap_or_else(|e| panic!("parse failed: {e}"));
        assert_eq!(cli.paths.base, PathBuf::from("/tmp/b.json"));
        match cli.command {
            Command::Check(args) => assert_eq!(args.candidate, Some(PathBuf::from("/tmp/c.json"))),
            other => panic!("expected check, got {other:?}"),
        }
    }

    #[test]
    fn path_args_convert_into_config() {
        let cli = Cli::try_parse_from(["embedguard", "--audit-log", "log.json", "digest"])
            .unwrap_or_else(|e| panic!("parse failed: {e}"));
        let config = GuardConfig::from(cli.paths);
        assert_eq!(config.audit_log_path, PathBuf::from("log.json"));
    }

    #[test]
    fn path_args_read_environment_overrides() {
        let command = Cli::command();
        let expected = [
            ("base", "EMBEDGUARD_BASE"),
            ("candidate_dir", "EMBEDGUARD_CANDIDATE_DIR"),
            ("candidate_pattern", "EMBEDGUARD_CANDIDATE_PATTERN"),
            ("audit_log", "EMBEDGUARD_AUDIT_LOG"),
            ("vocab", "EMBEDGUARD_VOCAB"),
        ];
        for (id, var) in expected {
            let arg = command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .unwrap_or_else(|| panic!("no argument '{id}'"));
            assert_eq!(arg.get_env(), Some(std::ffi::OsStr::new(var)), "argument '{id}'");
        }
    }
}
