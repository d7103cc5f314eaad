//! Next-round pairing of ordered standings.

use tracing::{debug, instrument};

use crate::db::{Pairing, Standing, TournamentError};

/// Pairs adjacent entries of an ordered standings list.
///
/// Odd ranks (1st, 3rd, ...) are zipped with even ranks (2nd, 4th, ...), so
/// entry `2i` meets entry `2i + 1`. The first id of each pairing is always
/// the higher-ranked player.
///
/// # Errors
///
/// Returns [`TournamentError::OddPlayerCount`] when the list has an odd
/// length; nobody is dropped silently.
#[instrument(skip(standings), fields(players = standings.len()))]
pub fn pair_adjacent(standings: &[Standing]) -> Result<Vec<Pairing>, TournamentError> {
    if standings.len() % 2 != 0 {
        return Err(TournamentError::OddPlayerCount(standings.len()));
    }

    let higher = standings.iter().step_by(2);
    let lower = standings.iter().skip(1).step_by(2);

    let pairings: Vec<Pairing> = higher
        .zip(lower)
        .map(|(first, second)| {
            Pairing::new(
                *first.id(),
                first.name().clone(),
                *second.id(),
                second.name().clone(),
            )
        })
        .collect();

    debug!(pairings = pairings.len(), "Adjacent players paired");
    Ok(pairings)
}
