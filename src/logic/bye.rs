//! Bye provider: the placeholder player that fills the one incomplete bracket.

use crate::models::{BracketEvent, PlayerId, SquadId, Token};
use uuid::Uuid;

/// Stable bye player id for a squad. Same squad, same id, across every re-draw.
pub fn bye_player_id(squad_id: SquadId) -> PlayerId {
    Uuid::new_v5(&squad_id, b"bracket-bye")
}

/// Hands out the bye token at most once per draw.
#[derive(Debug)]
pub struct ByeProvider {
    token: Option<Token>,
}

impl ByeProvider {
    /// Provider for `event`; empty unless the plan uses a bye.
    pub fn new(event: &BracketEvent, uses_bye: bool) -> Self {
        Self {
            token: uses_bye.then(|| Token::Bye(bye_player_id(event.squad_id))),
        }
    }

    /// The bye token, the first time only.
    pub fn take(&mut self) -> Option<Token> {
        self.token.take()
    }
}
