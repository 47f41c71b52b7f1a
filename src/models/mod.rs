//! Data structures for bracket draws: events, entries, plans, drawn brackets.

mod draw;
mod entry;
mod event;

pub use draw::{
    BracketInstance, BracketInstanceId, CapacityPlan, Counters, DrawError, DrawResult, RefundRecord,
    Seat,
};
pub use entry::{Entry, EntryId, PlayerEntryRow, PlayerId, Purchase, Token};
pub use event::{BracketEvent, BracketEventId, DivisionId, SquadId};
