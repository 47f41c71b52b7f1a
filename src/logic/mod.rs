//! Bracket draw logic: aggregation, capacity planning, refunds, byes, the draw, projection.

mod aggregate;
mod bye;
mod capacity;
mod draw;
mod project;
mod refunds;

pub use aggregate::{collect_entries, entry_tokens, total_entries};
pub use bye::{bye_player_id, ByeProvider};
pub use capacity::plan_capacity;
pub use draw::draw_brackets;
pub use project::{live_counters, project_draw};
pub use refunds::allocate_refunds;
