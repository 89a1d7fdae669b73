//! Entry point for the `embedguard` binary.

use std::process::ExitCode;

use clap::Parser;
use embedguard_cli::cli::Cli;
use embedguard_cli::{execute, GuardConfig, Outcome};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt().with_env_filter(filter).with_target(true).with_writer(std::io::stderr).init();

    let config = GuardConfig::from(cli.paths);
    match execute(&config, &cli.command) {
        Ok(outcome) => {
            println!("{outcome}");
            if let Outcome::Check(report) = &outcome {
                if !report.is_intact() {
                    eprintln!(
                        "EMBEDDING INTEGRITY VIOLATION DETECTED\ntampered tokens: {:?}\naborting use of {}",
                        report.tampered_tokens(),
                        report.artifact.display()
                    );
                }
            }
            outcome.exit_code().into()
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            e.exit_code().into()
        }
    }
}
