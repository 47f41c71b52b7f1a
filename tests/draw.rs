//! Integration tests for the draw engine: conservation, exact capacity, no self-match.

use bracket_draw::{
    bye_player_id, draw_brackets, BracketEvent, DrawError, DrawResult, Entry, PlayerId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use uuid::Uuid;

fn event() -> BracketEvent {
    BracketEvent::new(Uuid::new_v4(), Uuid::new_v4(), 500)
}

fn entries_for(event: &BracketEvent, counts: &[u32]) -> Vec<Entry> {
    counts
        .iter()
        .map(|&n| Entry::new(event.id, Uuid::new_v4(), n, event.fee))
        .collect()
}

/// Checks every invariant a committed draw must satisfy.
fn assert_valid(event: &BracketEvent, entries: &[Entry], result: &DrawResult) {
    let capacity = event.capacity() as usize;
    let total: u64 = entries.iter().map(|e| u64::from(e.num_purchased)).sum();

    assert_eq!(total, result.placed_tokens() + result.total_refunded());
    assert_eq!(result.instances.len() as u64, result.plan.bracket_count());

    for (i, instance) in result.instances.iter().enumerate() {
        assert_eq!(instance.index as usize, i);
        assert_eq!(instance.event_id, event.id);
        assert_eq!(instance.seats.len(), capacity);
        let seeds: HashSet<u32> = instance.seats.iter().map(|s| s.seed).collect();
        assert_eq!(seeds.len(), capacity);
        assert!(seeds.iter().all(|&s| (s as usize) < capacity));
        let players: HashSet<PlayerId> = instance.seats.iter().map(|s| s.player_id).collect();
        assert_eq!(players.len(), capacity, "player seated twice in one bracket");
        assert!(instance.seats.iter().all(|s| s.instance_id == instance.id));
    }

    let byes = result.seat_rows().filter(|s| s.is_bye).count();
    assert_eq!(byes as u64, result.plan.bye_bracket_count);

    for entry in entries {
        let seated = result
            .seat_rows()
            .filter(|s| !s.is_bye && s.player_id == entry.player_id)
            .count() as u32;
        let refunded = result
            .refunds
            .iter()
            .find(|r| r.entry_id == entry.id)
            .map(|r| r.num_refunded)
            .unwrap_or(0);
        assert_eq!(seated + refunded, entry.num_purchased);
    }
}

#[test]
fn eight_players_fill_one_bracket() {
    let e = event();
    let entries = entries_for(&e, &[1; 8]);
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(result.instances.len(), 1);
    assert!(result.refunds.is_empty());
    assert_eq!(result.bye_player, None);
    assert_valid(&e, &entries, &result);
}

#[test]
fn seven_players_get_a_bye() {
    let e = event();
    let entries = entries_for(&e, &[1; 7]);
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(result.instances.len(), 1);
    assert!(result.instances[0].has_bye());
    assert_eq!(result.bye_player, Some(bye_player_id(e.squad_id)));
    assert!(result.refunds.is_empty());
    assert_valid(&e, &entries, &result);
}

#[test]
fn small_remainder_is_fully_refunded() {
    let e = event();
    let entries = entries_for(&e, &[2, 2, 2]);
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(3)).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.total_refunded(), 6);
    assert_eq!(result.total_refund_amount(), 3000);
    assert_valid(&e, &entries, &result);
}

#[test]
fn no_entries_is_an_empty_draw() {
    let e = event();
    let result = draw_brackets(&e, &[], &mut StdRng::seed_from_u64(0)).unwrap();
    assert!(result.is_empty());
    assert!(result.refunds.is_empty());
    assert_eq!(result.plan.total_entries, 0);
}

#[test]
fn single_player_cannot_fill_a_bracket() {
    let e = event();
    let entries = entries_for(&e, &[8]);
    let player = entries[0].player_id;
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(0));
    assert_eq!(
        result,
        Err(DrawError::TooManyEntriesForPlayer {
            event_id: e.id,
            player_id: player,
            entries: 8,
            brackets: 1,
        })
    );
}

#[test]
fn too_many_entries_for_two_brackets() {
    let e = event();
    let entries = entries_for(&e, &[9, 7]);
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(0));
    assert!(matches!(
        result,
        Err(DrawError::TooManyEntriesForPlayer {
            entries: 9,
            brackets: 2,
            ..
        })
    ));
}

#[test]
fn refunds_can_make_a_draw_feasible() {
    // 4 + 7 = 11 -> one bracket, three refunded, all from the big holder
    let e = event();
    let entries = entries_for(&e, &[4, 1, 1, 1, 1, 1, 1, 1]);
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(result.refunds.len(), 1);
    assert_eq!(result.refunds[0].entry_id, entries[0].id);
    assert_eq!(result.refunds[0].num_refunded, 3);
    assert_valid(&e, &entries, &result);
}

#[test]
fn entries_from_another_event_are_rejected() {
    let e = event();
    let other = event();
    let entries = entries_for(&other, &[1; 8]);
    assert!(matches!(
        draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(0)),
        Err(DrawError::WrongEvent { .. })
    ));
}

#[test]
fn duplicate_player_is_rejected() {
    let e = event();
    let player = Uuid::new_v4();
    let entries = vec![
        Entry::new(e.id, player, 1, e.fee),
        Entry::new(e.id, player, 1, e.fee),
    ];
    assert_eq!(
        draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(0)),
        Err(DrawError::DuplicateEntry(player))
    );
}

#[test]
fn invariants_hold_across_seeds() {
    let e = event();
    let shapes: [&[u32]; 6] = [
        &[3, 3, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1],
        &[4, 4, 4, 4, 4, 4, 4, 3],
        &[2; 12],
        &[4, 4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        &[3, 3, 3, 2, 2, 2, 2, 2, 2, 1, 1],
        &[1; 31],
    ];
    for counts in shapes {
        let entries = entries_for(&e, counts);
        for seed in 0..50 {
            let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(seed)).unwrap();
            assert_valid(&e, &entries, &result);
        }
    }
}

#[test]
fn players_with_max_entries_appear_in_every_bracket() {
    let e = event();
    // 3 brackets, 8 players holding 3 entries each
    let entries = entries_for(&e, &[3; 8]);
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(result.instances.len(), 3);
    for instance in &result.instances {
        for entry in &entries {
            assert!(instance.seats.iter().any(|s| s.player_id == entry.player_id));
        }
    }
    assert_valid(&e, &entries, &result);
}

#[test]
fn other_formats_are_respected() {
    let e = event().with_format(2, 2);
    let entries = entries_for(&e, &[2, 2, 1, 1, 1]);
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(9)).unwrap();
    // 7 entries, capacity 4 -> one full, one with a bye
    assert_eq!(result.plan.full_bracket_count, 1);
    assert_eq!(result.plan.bye_bracket_count, 1);
    assert_valid(&e, &entries, &result);
}

#[test]
fn redraws_may_differ_but_stay_valid() {
    let e = event();
    let entries = entries_for(&e, &[2; 16]);
    let first = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(1)).unwrap();
    let second = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_valid(&e, &entries, &first);
    assert_valid(&e, &entries, &second);
    assert_ne!(first.instances[0].id, second.instances[0].id);
}

#[test]
fn total_refund_amount_saturates() {
    let e = BracketEvent::new(Uuid::new_v4(), Uuid::new_v4(), u64::MAX);
    let entries = entries_for(&e, &[2, 2, 2]);
    let result = draw_brackets(&e, &entries, &mut StdRng::seed_from_u64(4)).unwrap();
    assert_eq!(result.total_refunded(), 6);
    assert!(result.refunds.iter().all(|r| r.amount == u64::MAX));
    assert_eq!(result.total_refund_amount(), u64::MAX);
}
