//! Entries, raw per-player rows, and draw tokens.

use crate::models::event::BracketEventId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player.
pub type PlayerId = Uuid;

/// Unique identifier for an entry (one player in one bracket event).
pub type EntryId = Uuid;

/// Brackets a player bought for one event, as entered in the data-entry grid.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub event_id: BracketEventId,
    pub num_brackets: u32,
}

/// One grid row: a player and what they bought across bracket events.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntryRow {
    pub player_id: PlayerId,
    pub purchases: Vec<Purchase>,
}

impl PlayerEntryRow {
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            purchases: Vec::new(),
        }
    }

    /// Add a purchase for `event_id` (builder style).
    pub fn buy(mut self, event_id: BracketEventId, num_brackets: u32) -> Self {
        self.purchases.push(Purchase {
            event_id,
            num_brackets,
        });
        self
    }
}

/// A player's entry into one bracket event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub event_id: BracketEventId,
    pub player_id: PlayerId,
    /// Entries bought; each one is an independent token in the draw.
    pub num_purchased: u32,
    /// In minor currency units.
    pub fee_per_entry: u64,
}

impl Entry {
    pub fn new(event_id: BracketEventId, player_id: PlayerId, num_purchased: u32, fee_per_entry: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            player_id,
            num_purchased,
            fee_per_entry,
        }
    }
}

/// Something that occupies one seat.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Token {
    Player(PlayerId),
    /// The synthetic placeholder filling the one incomplete bracket.
    Bye(PlayerId),
}

impl Token {
    pub fn player_id(&self) -> PlayerId {
        match *self {
            Token::Player(id) | Token::Bye(id) => id,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Token::Bye(_))
    }
}
