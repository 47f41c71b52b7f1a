//! Result projection: drawn bins -> persistable records, entries -> live counters.

use crate::logic::aggregate::total_entries;
use crate::logic::capacity::plan_capacity;
use crate::logic::refunds::allocate_refunds;
use crate::models::{
    BracketEvent, BracketInstance, CapacityPlan, Counters, DrawResult, Entry, PlayerId,
    RefundRecord, Seat, Token,
};
use chrono::Utc;
use std::collections::HashSet;
use uuid::Uuid;

/// Turn drawn bins into bracket instances (index in bin order) and seats (seed in bin order).
pub fn project_draw(
    event: &BracketEvent,
    plan: CapacityPlan,
    bins: Vec<Vec<Token>>,
    refunds: Vec<RefundRecord>,
    bye_player: Option<PlayerId>,
) -> DrawResult {
    let instances = bins
        .into_iter()
        .enumerate()
        .map(|(index, tokens)| {
            let id = Uuid::new_v4();
            let seats = tokens
                .into_iter()
                .enumerate()
                .map(|(seed, token)| Seat {
                    instance_id: id,
                    seed: seed as u32,
                    player_id: token.player_id(),
                    is_bye: token.is_bye(),
                })
                .collect();
            BracketInstance {
                id,
                event_id: event.id,
                index: index as u32,
                seats,
            }
        })
        .collect();

    DrawResult {
        event_id: event.id,
        drawn_at: Utc::now(),
        plan,
        instances,
        refunds,
        bye_player,
    }
}

/// Counters for the entry grid. Never draws and never fails.
///
/// Entries with zero purchases are ignored. `players_with_refunds` counts distinct players
/// in the same deterministic allocation the commit uses.
pub fn live_counters(entries: &[Entry], capacity: u64) -> Counters {
    let plan = plan_capacity(total_entries(entries), capacity);
    let players_with_refunds = if plan.refundable_count == 0 {
        0
    } else {
        allocate_refunds(entries, plan.refundable_count)
            .map(|records| {
                records
                    .iter()
                    .map(|r| r.player_id)
                    .collect::<HashSet<_>>()
                    .len()
            })
            .unwrap_or(0)
    };
    Counters {
        total_entries: plan.total_entries,
        full_bracket_count: plan.full_bracket_count,
        bye_bracket_count: plan.bye_bracket_count,
        refundable_count: plan.refundable_count,
        has_any_refund: plan.refundable_count > 0,
        players_with_refunds,
    }
}
