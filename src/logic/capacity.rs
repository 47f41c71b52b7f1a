//! Capacity planning: how many brackets fit, whether a bye is used, how much is refunded.

use crate::models::CapacityPlan;

/// Plan brackets for `total_entries` tokens and seats-per-bracket `capacity`.
///
/// Pure and infallible. A remainder of exactly `capacity - 1` is completed with one bye;
/// any other non-zero remainder is refunded.
pub fn plan_capacity(total_entries: u64, capacity: u64) -> CapacityPlan {
    if capacity == 0 {
        return CapacityPlan {
            total_entries,
            capacity,
            refundable_count: total_entries,
            ..CapacityPlan::default()
        };
    }
    let full_bracket_count = total_entries / capacity;
    let remainder = total_entries % capacity;

    let (bye_bracket_count, refundable_count) = if remainder == 0 {
        (0, 0)
    } else if remainder == capacity - 1 {
        (1, 0)
    } else {
        (0, remainder)
    };

    CapacityPlan {
        total_entries,
        capacity,
        full_bracket_count,
        bye_bracket_count,
        refundable_count,
    }
}
