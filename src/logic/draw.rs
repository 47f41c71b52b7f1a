//! Draw engine: seat every placeable token so that no bracket holds the same player twice.

use crate::logic::aggregate::{total_entries, validate_entries};
use crate::logic::bye::ByeProvider;
use crate::logic::capacity::plan_capacity;
use crate::logic::project::project_draw;
use crate::logic::refunds::allocate_refunds;
use crate::models::{BracketEvent, DrawError, DrawResult, Entry, PlayerId, RefundRecord, Token};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

/// Commit a draw for `event`: plan, refund the remainder, seat everyone, project records.
///
/// Either everything succeeds or nothing is returned; the caller persists the result.
/// Zero entries (or everything refunded) gives an empty result, not an error.
pub fn draw_brackets<R: Rng + ?Sized>(
    event: &BracketEvent,
    entries: &[Entry],
    rng: &mut R,
) -> Result<DrawResult, DrawError> {
    validate_entries(event, entries)?;

    let plan = plan_capacity(total_entries(entries), event.capacity());
    log::debug!(
        "Bracket {}: {} entries, {} full, {} bye, {} refundable",
        event.id,
        plan.total_entries,
        plan.full_bracket_count,
        plan.bye_bracket_count,
        plan.refundable_count
    );

    let refunds = allocate_refunds(entries, plan.refundable_count)?;
    let counts = counts_after_refunds(entries, &refunds);
    let brackets = plan.bracket_count();

    if brackets == 0 {
        log::info!(
            "Bracket {}: nothing to draw ({} entries refunded)",
            event.id,
            plan.refundable_count
        );
        return Ok(project_draw(event, plan, Vec::new(), refunds, None));
    }

    check_feasible(event, &counts, brackets)?;

    let mut byes = ByeProvider::new(event, plan.uses_bye());
    let bye = byes.take();
    let bins = assign_bins(&counts, brackets as usize, event.capacity() as usize, bye, rng)?;

    log::info!(
        "Bracket {}: drew {} bracket(s), bye used: {}, {} entries refunded",
        event.id,
        bins.len(),
        bye.is_some(),
        plan.refundable_count
    );
    Ok(project_draw(event, plan, bins, refunds, bye.map(|t| t.player_id())))
}

/// Tokens left per player once refunds are taken out.
fn counts_after_refunds(entries: &[Entry], refunds: &[RefundRecord]) -> Vec<(PlayerId, u32)> {
    let refunded: HashMap<_, _> = refunds.iter().map(|r| (r.entry_id, r.num_refunded)).collect();
    entries
        .iter()
        .map(|e| {
            let back = refunded.get(&e.id).copied().unwrap_or(0);
            (e.player_id, e.num_purchased - back)
        })
        .filter(|(_, n)| *n > 0)
        .collect()
}

/// A player can be seated at most once per bracket.
fn check_feasible(event: &BracketEvent, counts: &[(PlayerId, u32)], brackets: u64) -> Result<(), DrawError> {
    match counts.iter().max_by_key(|(_, n)| *n) {
        Some(&(player_id, entries)) if u64::from(entries) > brackets => {
            log::warn!(
                "Bracket {}: player {} has {} entries for {} bracket(s)",
                event.id,
                player_id,
                entries,
                brackets
            );
            Err(DrawError::TooManyEntriesForPlayer {
                event_id: event.id,
                player_id,
                entries,
                brackets,
            })
        }
        _ => Ok(()),
    }
}

/// Distribute tokens over `bin_count` bins of `capacity` seats.
///
/// 1. Put the bye (if any) in a random bin.
/// 2. Players go in descending count order; each gets `count` distinct bins, preferring
///    the emptiest ones, with ties broken by a fresh shuffle per player.
/// 3. Shuffle each bin to produce seed order.
///
/// Filling the emptiest bins first always succeeds when no player has more tokens than
/// there are bins and the tokens exactly fill the seats.
fn assign_bins<R: Rng + ?Sized>(
    counts: &[(PlayerId, u32)],
    bin_count: usize,
    capacity: usize,
    bye: Option<Token>,
    rng: &mut R,
) -> Result<Vec<Vec<Token>>, DrawError> {
    let mut bins: Vec<Vec<Token>> = (0..bin_count).map(|_| Vec::with_capacity(capacity)).collect();
    if let Some(token) = bye {
        let b = rng.gen_range(0..bin_count);
        bins[b].push(token);
    }

    let mut players = counts.to_vec();
    players.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut order: Vec<usize> = (0..bin_count).collect();
    for (player_id, count) in players {
        order.shuffle(rng);
        order.sort_by_key(|&b| bins[b].len());
        for &b in order.iter().take(count as usize) {
            bins[b].push(Token::Player(player_id));
        }
    }

    let seated: usize = bins.iter().map(Vec::len).sum();
    if bins.iter().any(|b| b.len() != capacity) {
        return Err(DrawError::Infeasible {
            needed: (bin_count * capacity) as u64,
            available: seated as u64,
        });
    }

    for bin in &mut bins {
        bin.shuffle(rng);
    }
    Ok(bins)
}
