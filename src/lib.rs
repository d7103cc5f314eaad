//! Swiss Tournament library - player registry, match results and pairings
//!
//! A thin data-access layer over a SQLite store. Every operation opens its
//! own connection, runs a statement or a short transaction, and closes it.
//!
//! # Architecture
//!
//! - **Store**: [`TournamentRepository`] owns the players and scores tables
//! - **Pairing**: [`pair_adjacent`] turns ordered standings into matches
//! - **Config**: [`StoreConfig`] locates the store (TOML file + environment)
//!
//! # Example
//!
//! ```no_run
//! use swiss_tournament::{StoreConfig, TournamentRepository};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = StoreConfig::load("tournament.toml")?;
//! let repo = TournamentRepository::new(config.database_url().clone())?;
//! repo.initialize()?;
//!
//! let alice = repo.register_player("Alice".to_string())?;
//! let bob = repo.register_player("Bob".to_string())?;
//! repo.report_match(*alice.id(), *bob.id())?;
//!
//! for pairing in repo.swiss_pairings()? {
//!     println!("{} vs {}", pairing.name1(), pairing.name2());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod pairing;

// Crate-level exports - Configuration
pub use config::{ConfigError, DATABASE_URL_ENV, DEFAULT_DATABASE_URL, StoreConfig};

// Crate-level exports - Persistence
pub use db::{
    DbError, NewPlayer, NewScore, Pairing, Player, Score, Standing, TournamentError,
    TournamentRepository,
};

// Crate-level exports - Pairing
pub use pairing::pair_adjacent;
