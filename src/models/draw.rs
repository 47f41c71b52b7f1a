//! Planning counters, drawn brackets, refunds and DrawError.

use crate::models::entry::{EntryId, PlayerId};
use crate::models::event::BracketEventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur while drawing brackets.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DrawError {
    /// More tokens needed than exist (refunds, or seats to fill). Accounting bug.
    Infeasible { needed: u64, available: u64 },
    /// A player holds more entries than there will be brackets, so a self-match is unavoidable.
    TooManyEntriesForPlayer {
        event_id: BracketEventId,
        player_id: PlayerId,
        entries: u32,
        brackets: u64,
    },
    /// Two entries for the same player in one event.
    DuplicateEntry(PlayerId),
    /// An entry for another bracket event was passed in.
    WrongEvent {
        expected: BracketEventId,
        found: BracketEventId,
    },
    /// Some entries will be refunded and the organizer has not acknowledged it.
    RefundsNotAcknowledged,
}

impl std::fmt::Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::Infeasible { needed, available } => write!(
                f,
                "Accounting error: {} entries needed but only {} available",
                needed, available
            ),
            DrawError::TooManyEntriesForPlayer {
                player_id,
                entries,
                brackets,
                ..
            } => write!(
                f,
                "Player {} has {} entries but only {} brackets can be drawn; reduce their entries",
                player_id, entries, brackets
            ),
            DrawError::DuplicateEntry(id) => write!(f, "Player {} has more than one entry", id),
            DrawError::WrongEvent { expected, found } => {
                write!(f, "Entry belongs to bracket {} instead of {}", found, expected)
            }
            DrawError::RefundsNotAcknowledged => {
                write!(f, "Some entries will be refunded; acknowledge refunds before drawing")
            }
        }
    }
}

impl std::error::Error for DrawError {}

/// Output of the capacity planner for one event.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CapacityPlan {
    pub total_entries: u64,
    pub capacity: u64,
    pub full_bracket_count: u64,
    /// 0 or 1.
    pub bye_bracket_count: u64,
    pub refundable_count: u64,
}

impl CapacityPlan {
    /// Bracket instances the draw will produce.
    pub fn bracket_count(&self) -> u64 {
        self.full_bracket_count + self.bye_bracket_count
    }

    /// Real tokens that end up seated.
    pub fn placed_count(&self) -> u64 {
        self.total_entries - self.refundable_count
    }

    pub fn uses_bye(&self) -> bool {
        self.bye_bracket_count == 1
    }
}

/// Live counters for the entry grid, recomputed on every edit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    pub total_entries: u64,
    pub full_bracket_count: u64,
    pub bye_bracket_count: u64,
    pub refundable_count: u64,
    pub has_any_refund: bool,
    /// Players who would get at least one entry refunded.
    pub players_with_refunds: usize,
}

impl Counters {
    /// Whether the "draw" action may proceed.
    pub fn can_finalize(&self, refunds_acknowledged: bool) -> bool {
        !self.has_any_refund || refunds_acknowledged
    }

    /// Same as [`Counters::can_finalize`], as a `Result` for `?` chains.
    pub fn check_finalize(&self, refunds_acknowledged: bool) -> Result<(), DrawError> {
        if self.can_finalize(refunds_acknowledged) {
            Ok(())
        } else {
            Err(DrawError::RefundsNotAcknowledged)
        }
    }
}

/// Unique identifier for a drawn bracket.
pub type BracketInstanceId = Uuid;

/// One seat in a drawn bracket.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub instance_id: BracketInstanceId,
    /// 0..capacity-1, unique within the instance.
    pub seed: u32,
    pub player_id: PlayerId,
    pub is_bye: bool,
}

/// A drawn bracket: exactly `capacity` seats, no real player twice.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketInstance {
    pub id: BracketInstanceId,
    pub event_id: BracketEventId,
    /// Ordinal in creation order.
    pub index: u32,
    pub seats: Vec<Seat>,
}

impl BracketInstance {
    pub fn has_bye(&self) -> bool {
        self.seats.iter().any(|s| s.is_bye)
    }
}

/// Entries of one player that could not be placed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RefundRecord {
    pub entry_id: EntryId,
    pub player_id: PlayerId,
    pub num_refunded: u32,
    /// `num_refunded * fee_per_entry`, minor currency units, saturating at `u64::MAX`.
    pub amount: u64,
}

/// Immutable outcome of one committed draw.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    pub event_id: BracketEventId,
    pub drawn_at: DateTime<Utc>,
    pub plan: CapacityPlan,
    pub instances: Vec<BracketInstance>,
    /// Only entries with at least one refunded token.
    pub refunds: Vec<RefundRecord>,
    pub bye_player: Option<PlayerId>,
}

impl DrawResult {
    /// No instances were drawn (no entries, or everything refunded).
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// All seats across instances, in instance then seed order.
    pub fn seat_rows(&self) -> impl Iterator<Item = &Seat> + '_ {
        self.instances.iter().flat_map(|i| i.seats.iter())
    }

    /// Real player tokens seated (bye excluded).
    pub fn placed_tokens(&self) -> u64 {
        self.seat_rows().filter(|s| !s.is_bye).count() as u64
    }

    pub fn total_refunded(&self) -> u64 {
        self.refunds.iter().map(|r| u64::from(r.num_refunded)).sum()
    }

    /// Saturates at `u64::MAX`.
    pub fn total_refund_amount(&self) -> u64 {
        self.refunds
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.amount))
    }
}
