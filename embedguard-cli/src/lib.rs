//! Command-line front end for embedding integrity verification.
//!
//! Wires the vector store, [`IntegrityRegistry`](embedguard_registry::IntegrityRegistry)
//! and [`AuditLogger`](embedguard_auditor::AuditLogger) together. All paths
//! come from a [`GuardConfig`]; handlers return an [`Outcome`] and never
//! print.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod noise;

pub use commands::{execute, CheckReport, Outcome, TokenStatus};
pub use config::{default_vocabulary, GuardConfig};
pub use error::{CliError, CliExitCode};
