//! Refund allocation: pick which tokens are rejected when a remainder cannot be bracketed.

use crate::models::{DrawError, Entry, PlayerId, RefundRecord};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Take exactly `refundable` tokens back, one at a time from whoever currently holds the most.
///
/// Ties go to the lower player id. Returns one record per entry with a non-zero refund,
/// in input order. Fails with `Infeasible` when there are fewer tokens than `refundable`.
pub fn allocate_refunds(entries: &[Entry], refundable: u64) -> Result<Vec<RefundRecord>, DrawError> {
    let available: u64 = entries.iter().map(|e| u64::from(e.num_purchased)).sum();
    if refundable > available {
        return Err(DrawError::Infeasible {
            needed: refundable,
            available,
        });
    }

    let mut refunded = vec![0u32; entries.len()];
    let mut heap: BinaryHeap<(u32, Reverse<PlayerId>, usize)> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.num_purchased > 0)
        .map(|(i, e)| (e.num_purchased, Reverse(e.player_id), i))
        .collect();

    for _ in 0..refundable {
        let Some((remaining, player, i)) = heap.pop() else {
            return Err(DrawError::Infeasible {
                needed: refundable,
                available,
            });
        };
        refunded[i] += 1;
        if remaining > 1 {
            heap.push((remaining - 1, player, i));
        }
    }

    let records = entries
        .iter()
        .zip(refunded)
        .filter(|(_, n)| *n > 0)
        .map(|(e, n)| RefundRecord {
            entry_id: e.id,
            player_id: e.player_id,
            num_refunded: n,
            amount: u64::from(n).saturating_mul(e.fee_per_entry),
        })
        .collect();
    Ok(records)
}
