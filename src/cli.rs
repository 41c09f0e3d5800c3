//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `commit-scout`.
#[derive(Debug, Parser)]
#[command(name = "commit-scout", version, about = "Search commit history in plain language")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search commits matching a natural-language query.
    Search {
        /// What to look for, in plain language.
        query: String,
        /// Repository to search on GitHub, as owner/name.
        #[arg(long, default_value = "torvalds/linux")]
        repo: String,
        /// Analyze a local git log file instead of querying GitHub.
        #[arg(long, value_name = "PATH", conflicts_with = "sample")]
        log_file: Option<PathBuf>,
        /// Analyze the built-in sample git log.
        #[arg(long)]
        sample: bool,
        /// API key for this run, overriding the store and environment.
        #[arg(long, value_name = "KEY")]
        api_key: Option<String>,
    },
    /// Persist an API key in the local key store.
    SetKey {
        /// The key to store.
        key: String,
    },
    /// Show which credential source a search would use.
    KeyStatus,
}
