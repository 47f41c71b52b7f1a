//! Bracket draw engine: plans brackets from purchased entries, refunds what cannot be
//! placed, and seeds every other entry so no bracket holds the same player twice.

pub mod logic;
pub mod models;

pub use logic::{
    allocate_refunds, bye_player_id, collect_entries, draw_brackets, entry_tokens, live_counters,
    plan_capacity, project_draw, total_entries, ByeProvider,
};
pub use models::{
    BracketEvent, BracketEventId, BracketInstance, BracketInstanceId, CapacityPlan, Counters,
    DivisionId, DrawError, DrawResult, Entry, EntryId, PlayerEntryRow, PlayerId, Purchase,
    RefundRecord, Seat, SquadId, Token,
};
