//! Persistence layer for players and their scores.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

pub use error::{DbError, TournamentError};
pub use models::{NewPlayer, NewScore, Pairing, Player, Score, Standing};
pub use repository::TournamentRepository;

/// Schema migrations compiled into the binary.
pub(crate) const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");
