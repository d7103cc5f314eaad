//! Database and tournament error types.

use derive_more::{Display, Error, From};
use tracing::instrument;

/// Store fault with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DbError {
    /// Creates a new database error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

/// Failure of a tournament operation.
///
/// Store faults are wrapped in [`TournamentError::Db`]; the other variants
/// are rejections raised before anything is written.
#[derive(Debug, Clone, Display, From)]
pub enum TournamentError {
    /// The underlying store failed.
    #[display("{}", _0)]
    #[from]
    Db(DbError),

    /// Pairings were requested with an odd number of registered players.
    #[display("Cannot pair an odd number of players ({})", _0)]
    OddPlayerCount(usize),

    /// A match was reported with the same player as winner and loser.
    #[display("Player {} cannot play against themselves", _0)]
    SelfMatch(i32),

    /// A match referenced an unregistered player or one without a score row.
    #[display("Unknown player id {}", _0)]
    UnknownPlayer(i32),

    /// Pairings were requested while some registered players have no score
    /// row, so they would be left out of the round.
    #[display("{} registered players have no score; reset the tournament first", _0)]
    UnscoredPlayers(usize),
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<diesel::result::Error> for TournamentError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::Db(DbError::from(err))
    }
}
