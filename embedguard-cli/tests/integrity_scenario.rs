//! Integration tests: register a trusted baseline, verify a candidate, and
//! audit the violation, both through the library crates directly and
//! through the CLI command handlers.

use std::path::PathBuf;

use embedguard_auditor::AuditLogger;
use embedguard_cli::cli::{BaselineCommand, CheckArgs, Command, DigestArgs, InitArgs, TamperArgs};
use embedguard_cli::{execute, CliError, CliExitCode, GuardConfig, Outcome, TokenStatus};
use embedguard_core::{digest, TokenId, VectorSet, Vocabulary};
use embedguard_registry::{IntegrityRegistry, JsonVectorStore, RegistryError, VectorStore};

fn check(candidate: Option<PathBuf>, manifest: Option<PathBuf>) -> Command {
    Command::Check(CheckArgs { candidate, manifest })
}

fn init() -> Command {
    Command::Init(InitArgs { dim: 8, seed: 42, force: false })
}

/// python -> 0 intact, java -> 1 tampered, recorded against "x.bin".
#[test]
fn tampered_java_entry_is_detected_and_audited() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log_path = dir.path().join("audit_log.json");

    let baseline = VectorSet::from_rows(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
    let mut registry = IntegrityRegistry::new();
    registry.register(&baseline);

    let candidate = VectorSet::from_rows(vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.1, 0.0]]);
    let verdicts = registry.verify(&candidate).expect("verify");
    assert_eq!(verdicts.is_intact(TokenId(0)), Some(true));
    assert_eq!(verdicts.is_intact(TokenId(1)), Some(false));

    let vocabulary: Vocabulary =
        [("python", TokenId(0)), ("java", TokenId(1))].into_iter().collect();
    let logger = AuditLogger::at_path(&log_path);
    logger.record_violation(&verdicts, &vocabulary, "x.bin").expect("record");

    let history = logger.history().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].artifact, "x.bin");
    assert_eq!(history[0].violated_tokens, vec!["java".to_owned()]);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&log_path).expect("read log")).expect("json");
    assert_eq!(raw[0]["embedding_file"], "x.bin");
    assert_eq!(raw[0]["violated_tokens"][0], "java");
    assert_eq!(raw[0]["timestamp"].as_str().map(str::len), Some(19));
}

#[test]
fn init_tamper_check_flow_fails_fast_and_logs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());

    execute(&config, &init()).expect("init");
    let tamper = Command::Tamper(TamperArgs { token: "snake".to_owned(), scale: 0.5, seed: Some(7) });
    execute(&config, &tamper).expect("tamper");

    let outcome = execute(&config, &check(None, None)).expect("check");
    assert_eq!(outcome.exit_code(), CliExitCode::Violation);
    let Outcome::Check(report) = outcome else { panic!("expected a check report") };

    assert_eq!(report.tampered_tokens(), vec!["snake"]);
    assert!(report
        .tokens
        .iter()
        .filter(|(name, _, _)| name != "snake")
        .all(|(_, _, status)| *status == TokenStatus::Intact));

    let audit = report.audit.expect("violation must be audited");
    assert_eq!(audit.violated_tokens, vec!["snake".to_owned()]);

    let history = AuditLogger::at_path(&config.audit_log_path).history().expect("history");
    assert_eq!(history, vec![audit]);
}

#[test]
fn unmodified_candidate_passes_without_audit() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    execute(&config, &init()).expect("init");

    let outcome = execute(&config, &check(Some(config.base_path.clone()), None)).expect("check");
    assert_eq!(outcome.exit_code(), CliExitCode::Success);
    let Outcome::Check(report) = outcome else { panic!("expected a check report") };
    assert!(report.audit.is_none());
    assert!(!config.audit_log_path.exists(), "no violation, no log");
}

#[test]
fn missing_baseline_never_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    let result = execute(&config, &check(None, None));
    assert!(matches!(result, Err(CliError::Registry(RegistryError::BaselineNotFound { .. }))));
}

#[test]
fn missing_candidate_never_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    execute(&config, &init()).expect("init");

    let result = execute(&config, &check(None, None));
    assert!(matches!(
        result,
        Err(CliError::Registry(RegistryError::NoCandidateArtifact { .. }))
    ));
}

#[test]
fn truncated_candidate_is_missing_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    execute(&config, &init()).expect("init");

    let store = JsonVectorStore::new();
    let base = store.load(&config.base_path).expect("load base");
    let truncated: VectorSet = base.iter().take(3).map(|(id, v)| (id, v.clone())).collect();
    let candidate_path = dir.path().join("tampered_embeddings_truncated.json");
    store.save(&candidate_path, &truncated, false).expect("save candidate");

    let result = execute(&config, &check(Some(candidate_path), None));
    assert!(matches!(
        result,
        Err(CliError::Registry(RegistryError::MissingEntry { id })) if id == TokenId(3)
    ));
    assert!(!config.audit_log_path.exists());
}

#[test]
fn exported_manifest_detects_tampering_without_base() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    let manifest_path = dir.path().join("baseline.json");

    execute(&config, &init()).expect("init");
    let export = Command::Baseline { action: BaselineCommand::Export { out: manifest_path.clone() } };
    execute(&config, &export).expect("export");

    let store = JsonVectorStore::new();
    let mut candidate = store.load(&config.base_path).expect("load base");
    if let Some(row) = candidate.get_mut(TokenId(0)) {
        row.as_mut_slice()[0] += 1.0;
    }
    let candidate_path = dir.path().join("candidate.json");
    store.save(&candidate_path, &candidate, false).expect("save candidate");
    std::fs::remove_file(&config.base_path).expect("remove base");

    let outcome =
        execute(&config, &check(Some(candidate_path), Some(manifest_path))).expect("check");
    let Outcome::Check(report) = outcome else { panic!("expected a check report") };
    assert_eq!(report.tampered_tokens(), vec!["python"]);
}

#[test]
fn init_refuses_to_overwrite_base() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    execute(&config, &init()).expect("init");
    assert!(matches!(
        execute(&config, &init()),
        Err(CliError::Registry(RegistryError::ArtifactExists { .. }))
    ));
}

#[test]
fn digest_lists_every_entry_of_the_base() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    execute(&config, &init()).expect("init");
    let base = JsonVectorStore::new().load(&config.base_path).expect("load base");

    let outcome =
        execute(&config, &Command::Digest(DigestArgs { artifact: None, id: None })).expect("digest");
    let Outcome::Message(text) = outcome else { panic!("expected a message") };
    let expected: Vec<String> =
        base.iter().map(|(id, vector)| format!("{id}\t{}", digest(vector))).collect();
    assert_eq!(text.lines().collect::<Vec<_>>(), expected);
    assert_eq!(expected.len(), 7);

    let single = execute(&config, &Command::Digest(DigestArgs { artifact: None, id: Some(3) }))
        .expect("digest --id 3");
    assert_eq!(single.to_string(), expected[3]);
}

#[test]
fn digest_of_absent_id_is_missing_entry() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    execute(&config, &init()).expect("init");

    let result = execute(&config, &Command::Digest(DigestArgs { artifact: None, id: Some(99) }));
    assert!(matches!(
        result,
        Err(CliError::Registry(RegistryError::MissingEntry { id })) if id == TokenId(99)
    ));
}

#[test]
fn empty_baseline_never_passes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    std::fs::write(&config.base_path, r#"{"embedding": []}"#).expect("write base");
    std::fs::write(dir.path().join("tampered_embeddings_1.json"), r#"{"embedding": []}"#)
        .expect("write candidate");

    let result = execute(&config, &check(None, None));
    assert!(matches!(result, Err(CliError::EmptyBaseline { ref path }) if *path == config.base_path));
    assert!(!config.audit_log_path.exists(), "nothing verified, nothing logged");
}

#[test]
fn tamper_names_candidates_from_the_configured_pattern() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = GuardConfig::in_dir(dir.path());
    config.candidate_pattern = "suspect-*.emb.json".to_owned();
    execute(&config, &init()).expect("init");

    let tamper = Command::Tamper(TamperArgs { token: "java".to_owned(), scale: 0.5, seed: Some(3) });
    execute(&config, &tamper).expect("tamper");

    let written: Vec<String> = std::fs::read_dir(dir.path())
        .expect("read dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("suspect-"))
        .collect();
    assert_eq!(written.len(), 1);
    assert!(written[0].ends_with(".emb.json"));

    let outcome = execute(&config, &check(None, None)).expect("check");
    let Outcome::Check(report) = outcome else { panic!("expected a check report") };
    assert_eq!(report.tampered_tokens(), vec!["java"]);
    assert!(report.artifact.ends_with(&written[0]));
}

#[test]
fn tamper_rejects_patterns_it_cannot_expand() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = GuardConfig::in_dir(dir.path());
    config.candidate_pattern = "candidate.json".to_owned();
    execute(&config, &init()).expect("init");

    let tamper = Command::Tamper(TamperArgs { token: "java".to_owned(), scale: 0.5, seed: Some(3) });
    assert!(matches!(
        execute(&config, &tamper),
        Err(CliError::UnusableCandidatePattern { .. })
    ));
}

#[test]
fn tamper_rejects_negative_scale() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = GuardConfig::in_dir(dir.path());
    execute(&config, &init()).expect("init");

    let tamper = Command::Tamper(TamperArgs { token: "java".to_owned(), scale: -1.0, seed: Some(3) });
    assert!(matches!(execute(&config, &tamper), Err(CliError::InvalidNoise(_))));
}
