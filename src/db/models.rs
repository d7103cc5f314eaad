//! Database models and report rows.

use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;
use serde::Serialize;

use crate::db::schema;

/// Registered player.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Getters, Serialize)]
#[diesel(table_name = schema::players)]
pub struct Player {
    id: i32,
    name: String,
}

/// Insertable player model; the store assigns the id.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::players)]
pub struct NewPlayer {
    name: String,
}

/// Win/loss counters of a single player.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::scores)]
pub struct Score {
    player: i32,
    wins: i32,
    losses: i32,
}

/// Insertable score row, created together with its player.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::scores)]
pub struct NewScore {
    player: i32,
    wins: i32,
    losses: i32,
}

impl NewScore {
    /// Zeroed counters for a freshly registered player.
    pub fn fresh(player: i32) -> Self {
        Self::new(player, 0, 0)
    }
}

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, new)]
pub struct Standing {
    /// Player id.
    id: i32,
    /// Player name as registered.
    name: String,
    /// Matches won.
    wins: i32,
    /// Matches played (wins + losses).
    matches: i32,
}

/// Two players meeting in the next round.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, new)]
pub struct Pairing {
    /// Id of the higher-ranked player.
    id1: i32,
    /// Name of the higher-ranked player.
    name1: String,
    /// Id of the lower-ranked player.
    id2: i32,
    /// Name of the lower-ranked player.
    name2: String,
}

impl Pairing {
    /// Returns true if the given player takes part in this pairing.
    pub fn involves(&self, player: i32) -> bool {
        self.id1 == player || self.id2 == player
    }
}
