//! BracketEvent: one purchasable bracket and its format.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bracket event.
pub type BracketEventId = Uuid;
/// Owning division.
pub type DivisionId = Uuid;
/// Owning squad. The bye player is derived from this.
pub type SquadId = Uuid;

fn default_players_per_match() -> u32 {
    2
}

fn default_games_per_bracket() -> u32 {
    3
}

/// A purchasable single-elimination side-game tied to a division/squad.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketEvent {
    pub id: BracketEventId,
    pub division_id: DivisionId,
    pub squad_id: SquadId,
    #[serde(default = "default_players_per_match")]
    pub players_per_match: u32,
    #[serde(default = "default_games_per_bracket")]
    pub games_per_bracket: u32,
    /// Fee per entry, in minor currency units.
    #[serde(default)]
    pub fee: u64,
}

impl BracketEvent {
    /// Create an event with the default format (2 players per match, 3 games => 8 seats).
    pub fn new(division_id: DivisionId, squad_id: SquadId, fee: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            division_id,
            squad_id,
            players_per_match: default_players_per_match(),
            games_per_bracket: default_games_per_bracket(),
            fee,
        }
    }

    /// Same event with a different format.
    pub fn with_format(self, players_per_match: u32, games_per_bracket: u32) -> Self {
        Self {
            players_per_match,
            games_per_bracket,
            ..self
        }
    }

    /// Replace only the parts of the format that are given; the rest keep their current values.
    pub fn override_format(self, players_per_match: Option<u32>, games_per_bracket: Option<u32>) -> Self {
        Self {
            players_per_match: players_per_match.unwrap_or(self.players_per_match),
            games_per_bracket: games_per_bracket.unwrap_or(self.games_per_bracket),
            ..self
        }
    }

    /// Seats per bracket instance: `players_per_match ^ games_per_bracket`.
    ///
    /// Saturates at `u64::MAX`, which plans zero brackets for any realistic entry total.
    pub fn capacity(&self) -> u64 {
        u64::from(self.players_per_match).saturating_pow(self.games_per_bracket)
    }
}
