//! Mixdesk Analyzer
//!
//! Command-line front end: configuration loading and the subcommands
//! behind the `mixdesk-analyzer` binary.

pub mod commands;
pub mod config;
pub mod error;

pub use config::AnalyzerConfig;
pub use error::{AnalyzerError, Result};
