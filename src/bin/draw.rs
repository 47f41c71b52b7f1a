//! Command-line harness: reads one bracket event's entries from CSV, prints counters and the draw as JSON.
//! Run with: cargo run --bin draw -- entries.csv [--plan-only] [--ack-refunds]
//! CSV columns: player_id (uuid), entries.
//! Override the format with env: BRACKET_PLAYERS_PER_MATCH, BRACKET_GAMES, BRACKET_FEE.
//! Set DRAW_SEED to replay a draw.

use bracket_draw::{
    collect_entries, draw_brackets, live_counters, BracketEvent, PlayerEntryRow, PlayerId,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::error::Error;
use uuid::Uuid;

#[derive(Deserialize)]
struct CsvRow {
    player_id: PlayerId,
    entries: u32,
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn read_rows(path: &str, event: &BracketEvent) -> Result<Vec<PlayerEntryRow>, Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let row: CsvRow = record?;
        rows.push(PlayerEntryRow::new(row.player_id).buy(event.id, row.entries));
    }
    Ok(rows)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let path = match args.iter().find(|a| !a.starts_with("--")) {
        Some(p) => p.clone(),
        None => {
            eprintln!("usage: draw <entries.csv> [--plan-only] [--ack-refunds]");
            std::process::exit(2);
        }
    };
    let plan_only = args.iter().any(|a| a == "--plan-only");
    let ack_refunds = args.iter().any(|a| a == "--ack-refunds");

    let fee = env_parse("BRACKET_FEE").unwrap_or(0);
    let event = BracketEvent::new(Uuid::new_v4(), Uuid::new_v4(), fee).override_format(
        env_parse("BRACKET_PLAYERS_PER_MATCH"),
        env_parse("BRACKET_GAMES"),
    );
    log::info!(
        "Bracket {} with {} seats, fee {}",
        event.id,
        event.capacity(),
        event.fee
    );

    let rows = read_rows(&path, &event)?;
    let entries = collect_entries(&event, &rows)?;
    let counters = live_counters(&entries, event.capacity());
    if plan_only {
        println!("{}", serde_json::to_string_pretty(&counters)?);
        return Ok(());
    }
    counters.check_finalize(ack_refunds)?;

    let result = match env_parse::<u64>("DRAW_SEED") {
        Some(seed) => {
            log::info!("Drawing with seed {}", seed);
            draw_brackets(&event, &entries, &mut StdRng::seed_from_u64(seed))?
        }
        None => draw_brackets(&event, &entries, &mut rand::thread_rng())?,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "counters": counters,
            "draw": result,
        }))?
    );
    Ok(())
}
