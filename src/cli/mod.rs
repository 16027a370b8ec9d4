//! CLI module - command-line interface for Filmoteca
//!
//! Argument parsing with clap; each subcommand lives in `commands`.

mod commands;

use clap::{Parser, Subcommand};

/// Filmoteca - personal movie and series catalog backed by TMDb
#[derive(Parser)]
#[command(name = "filmoteca")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web", alias = "daemon")]
    Serve,

    /// Import the seasons and episodes of a stored series
    Ingest {
        /// Title ID of the series
        title_id: i32,
    },

    /// List stored titles
    #[command(alias = "ls")]
    List {
        /// Only series
        #[arg(long)]
        series: bool,
    },

    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Store the TMDb API key
    SetTmdbKey {
        /// API key; an empty string clears it
        key: String,
    },

    /// Create a default config file
    Init,
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Create a user
    Add { username: String, password: String },
    /// Delete a user
    #[command(alias = "rm")]
    Remove { username: String },
    /// List users
    #[command(alias = "ls")]
    List,
    /// Set a new password
    Passwd { username: String, password: String },
}

pub use commands::*;
