//! CLI module - Command-line interface for the movie service
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Filmes - movie catalogue web service
#[derive(Parser)]
#[command(name = "filmes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the config file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server (default)
    #[command(alias = "daemon")]
    Serve,

    /// Create default config file
    Init,

    /// Print stored movies
    #[command(alias = "ls")]
    List {
        /// Number of movies to skip
        #[arg(long, default_value_t = 0)]
        skip: u64,
        /// Maximum number of movies to print
        #[arg(long, default_value_t = 10)]
        take: u64,
    },
}

pub use commands::*;
