//! Entry aggregation: grid rows -> entries for one event -> token multiset.

use crate::models::{BracketEvent, DrawError, Entry, PlayerEntryRow, PlayerId};
use std::collections::HashSet;

/// Build the entries of `event` from the raw grid rows.
///
/// Purchases of zero brackets are skipped, as if absent. A player with two non-zero
/// purchases for the same event (two rows, or two purchases in one row) is rejected.
pub fn collect_entries(event: &BracketEvent, rows: &[PlayerEntryRow]) -> Result<Vec<Entry>, DrawError> {
    let mut seen: HashSet<PlayerId> = HashSet::new();
    let mut entries = Vec::new();
    for row in rows {
        for purchase in row.purchases.iter().filter(|p| p.event_id == event.id) {
            if purchase.num_brackets == 0 {
                continue;
            }
            if !seen.insert(row.player_id) {
                return Err(DrawError::DuplicateEntry(row.player_id));
            }
            entries.push(Entry::new(
                event.id,
                row.player_id,
                purchase.num_brackets,
                event.fee,
            ));
        }
    }
    Ok(entries)
}

/// Sum of purchased entries.
pub fn total_entries(entries: &[Entry]) -> u64 {
    entries.iter().map(|e| u64::from(e.num_purchased)).sum()
}

/// Flatten entries into one token per purchased entry.
pub fn entry_tokens(entries: &[Entry]) -> Vec<PlayerId> {
    entries
        .iter()
        .flat_map(|e| std::iter::repeat(e.player_id).take(e.num_purchased as usize))
        .collect()
}

/// Check a commit snapshot: every entry belongs to `event` and no player appears twice.
pub(crate) fn validate_entries(event: &BracketEvent, entries: &[Entry]) -> Result<(), DrawError> {
    let mut seen: HashSet<PlayerId> = HashSet::new();
    for e in entries.iter().filter(|e| e.num_purchased > 0) {
        if e.event_id != event.id {
            return Err(DrawError::WrongEvent {
                expected: event.id,
                found: e.event_id,
            });
        }
        if !seen.insert(e.player_id) {
            return Err(DrawError::DuplicateEntry(e.player_id));
        }
    }
    Ok(())
}
