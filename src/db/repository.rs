//! Database repository for tournament players, scores and pairings.

use diesel::prelude::*;
use diesel_migrations::MigrationHarness;
use tracing::{debug, info, instrument, warn};

use crate::db::{
    DbError, MIGRATIONS, NewPlayer, NewScore, Pairing, Player, Score, Standing, TournamentError,
    schema,
};
use crate::pairing::pair_adjacent;

/// Database repository for tournament operations.
///
/// Holds only the store location. Every operation opens its own connection,
/// commits and drops it before returning.
#[derive(Debug, Clone)]
pub struct TournamentRepository {
    db_path: String,
}

impl TournamentRepository {
    /// Creates a new repository connected to the database at the given path.
    ///
    /// Use `":memory:"` only for single-call experiments: each operation opens
    /// a fresh connection, so an in-memory store does not survive between calls.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the path is empty.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn new(db_path: String) -> Result<Self, DbError> {
        if db_path.trim().is_empty() {
            return Err(DbError::new("Database path must not be empty"));
        }
        info!(path = %db_path, "Creating TournamentRepository");
        Ok(Self { db_path })
    }

    /// Returns the configured store location.
    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, DbError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| DbError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Applies any pending schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if the store is unreachable or a migration fails.
    #[instrument(skip(self))]
    pub fn initialize(&self) -> Result<(), DbError> {
        debug!("Running pending migrations");
        let mut conn = self.connection()?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| DbError::new(format!("Migration failed: {}", e)))?;

        info!(count = applied.len(), "Migrations applied");
        Ok(())
    }

    /// Removes every score row. Players stay registered.
    ///
    /// Leaves players without scores until [`Self::delete_players`] runs too.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_matches(&self) -> Result<usize, DbError> {
        debug!("Deleting all scores");
        let mut conn = self.connection()?;

        let removed = diesel::delete(schema::scores::table).execute(&mut conn)?;

        info!(removed, "Scores deleted");
        Ok(removed)
    }

    /// Removes every player row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn delete_players(&self) -> Result<usize, DbError> {
        debug!("Deleting all players");
        let mut conn = self.connection()?;

        let removed = diesel::delete(schema::players::table).execute(&mut conn)?;

        info!(removed, "Players deleted");
        Ok(removed)
    }

    /// Clears scores and players in a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs; nothing is deleted then.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), DbError> {
        debug!("Resetting tournament");
        let mut conn = self.connection()?;

        let (scores, players) = conn.transaction::<_, DbError, _>(|conn| {
            let scores = diesel::delete(schema::scores::table).execute(conn)?;
            let players = diesel::delete(schema::players::table).execute(conn)?;
            Ok((scores, players))
        })?;

        info!(scores, players, "Tournament reset");
        Ok(())
    }

    /// Returns the number of registered players.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn count_players(&self) -> Result<i64, DbError> {
        debug!("Counting players");
        let mut conn = self.connection()?;

        let count = schema::players::table
            .count()
            .get_result::<i64>(&mut conn)?;

        debug!(count, "Players counted");
        Ok(count)
    }

    /// Registers a player together with a zeroed score row.
    ///
    /// Both inserts share one transaction. Names are stored as given and need
    /// not be unique.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs; neither row is kept then.
    #[instrument(skip(self))]
    pub fn register_player(&self, name: String) -> Result<Player, DbError> {
        debug!(name = %name, "Registering player");
        let mut conn = self.connection()?;

        let new_player = NewPlayer::new(name);

        let player = conn.transaction::<_, DbError, _>(|conn| {
            let player = diesel::insert_into(schema::players::table)
                .values(&new_player)
                .returning(Player::as_returning())
                .get_result(conn)?;

            diesel::insert_into(schema::scores::table)
                .values(&NewScore::fresh(*player.id()))
                .execute(conn)?;

            Ok(player)
        })?;

        info!(player_id = player.id(), name = %player.name(), "Player registered");
        Ok(player)
    }

    /// Gets a player by id. Returns `None` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_player(&self, id: i32) -> Result<Option<Player>, DbError> {
        debug!(player_id = id, "Looking up player");
        let mut conn = self.connection()?;

        let player = schema::players::table
            .find(id)
            .select(Player::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(player)
    }

    /// Gets the win/loss counters of a player. Returns `None` if the player
    /// has no score row.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn get_score(&self, player: i32) -> Result<Option<Score>, DbError> {
        debug!(player_id = player, "Looking up score");
        let mut conn = self.connection()?;

        let score = schema::scores::table
            .find(player)
            .select(Score::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(score)
    }

    /// Lists every player with wins and matches played.
    ///
    /// Ordered by wins descending, then by id ascending, so ties come out in
    /// registration order and repeated calls agree. Players whose score row
    /// was removed by [`Self::delete_matches`] are not listed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn player_standings(&self) -> Result<Vec<Standing>, DbError> {
        debug!("Loading standings");
        let mut conn = self.connection()?;

        let standings = load_standings(&mut conn)?;

        info!(count = standings.len(), "Standings loaded");
        Ok(standings)
    }

    /// Records one match: the winner gains a win, the loser a loss.
    ///
    /// Both counters change in one transaction or not at all. Each id must
    /// name a registered player that still has a score row.
    ///
    /// # Errors
    ///
    /// - [`TournamentError::SelfMatch`] if `winner == loser`.
    /// - [`TournamentError::UnknownPlayer`] if either id is not a registered
    ///   player or has no score row.
    /// - [`TournamentError::Db`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn report_match(&self, winner: i32, loser: i32) -> Result<(), TournamentError> {
        debug!(winner, loser, "Reporting match");

        if winner == loser {
            warn!(player_id = winner, "Rejected match against self");
            return Err(TournamentError::SelfMatch(winner));
        }

        let mut conn = self.connection()?;

        conn.transaction::<_, TournamentError, _>(|conn| {
            for player in [winner, loser] {
                let registered = diesel::select(diesel::dsl::exists(
                    schema::players::table.find(player),
                ))
                .get_result::<bool>(conn)?;
                if !registered {
                    return Err(TournamentError::UnknownPlayer(player));
                }
            }

            let updated = diesel::update(schema::scores::table.find(winner))
                .set(schema::scores::wins.eq(schema::scores::wins + 1))
                .execute(conn)?;
            if updated == 0 {
                return Err(TournamentError::UnknownPlayer(winner));
            }

            let updated = diesel::update(schema::scores::table.find(loser))
                .set(schema::scores::losses.eq(schema::scores::losses + 1))
                .execute(conn)?;
            if updated == 0 {
                return Err(TournamentError::UnknownPlayer(loser));
            }

            Ok(())
        })
        .inspect_err(|e| warn!(error = %e, "Match not recorded"))?;

        info!(winner, loser, "Match recorded");
        Ok(())
    }

    /// Computes next-round pairings from the current standings.
    ///
    /// Adjacent players in standings order meet: first with second, third
    /// with fourth, and so on. Earlier meetings are not taken into account.
    /// The player count and the standings are read in one transaction.
    ///
    /// # Errors
    ///
    /// - [`TournamentError::UnscoredPlayers`] if some registered players have
    ///   no score row, as left behind by [`Self::delete_matches`].
    /// - [`TournamentError::OddPlayerCount`] if an odd number of players is
    ///   registered.
    /// - [`TournamentError::Db`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn swiss_pairings(&self) -> Result<Vec<Pairing>, TournamentError> {
        debug!("Computing swiss pairings");
        let mut conn = self.connection()?;

        let (registered, standings) = conn.transaction::<_, DbError, _>(|conn| {
            let registered = schema::players::table.count().get_result::<i64>(conn)?;
            let standings = load_standings(conn)?;
            Ok((registered, standings))
        })?;

        let unscored = usize::try_from(registered)
            .unwrap_or(0)
            .saturating_sub(standings.len());
        if unscored > 0 {
            warn!(registered, scored = standings.len(), "Players without scores");
            return Err(TournamentError::UnscoredPlayers(unscored));
        }

        let pairings = pair_adjacent(&standings)
            .inspect_err(|e| warn!(error = %e, "Pairings unavailable"))?;

        info!(count = pairings.len(), "Pairings computed");
        Ok(pairings)
    }
}

/// Loads standings on an open connection, ordered by wins then id.
fn load_standings(conn: &mut SqliteConnection) -> Result<Vec<Standing>, DbError> {
    let rows = schema::scores::table
        .inner_join(schema::players::table)
        .select((
            schema::players::id,
            schema::players::name,
            schema::scores::wins,
            schema::scores::losses,
        ))
        .order((schema::scores::wins.desc(), schema::players::id.asc()))
        .load::<(i32, String, i32, i32)>(conn)?;

    Ok(rows
        .into_iter()
        .map(|(id, name, wins, losses)| Standing::new(id, name, wins, wins + losses))
        .collect())
}
