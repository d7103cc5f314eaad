//! Command-line interface for swiss_tournament.

use clap::{Parser, Subcommand};

/// Swiss Tournament - player registry, results and next-round pairings
#[derive(Parser, Debug)]
#[command(name = "swiss_tournament")]
#[command(about = "Manage a Swiss-system tournament", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file (optional)
    #[arg(short, long, default_value = "tournament.toml", global = true)]
    pub config: std::path::PathBuf,

    /// Database path, overriding config file and environment
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create or upgrade the database schema
    Init,

    /// Delete players and their scores (or only the score rows with --matches-only)
    Reset {
        /// Delete score rows only; players stay registered but are left out of
        /// standings, and pairings are refused until a full reset
        #[arg(long)]
        matches_only: bool,
    },

    /// Register a new player
    Register {
        /// Player's full name (need not be unique)
        name: String,
    },

    /// Print the number of registered players
    Count,

    /// Print players ordered by wins
    Standings {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Record the outcome of a single match
    Report {
        /// Id of the player who won
        winner: i32,

        /// Id of the player who lost
        loser: i32,
    },

    /// Print the pairings for the next round
    Pairings {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}
