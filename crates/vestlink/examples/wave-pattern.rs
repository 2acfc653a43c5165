//! Sweeps a wave of vibration down both vest panels, then a front/back
//! alternation, against a locally running bHaptics Player.
//!
//! Run with:
//!   cargo run --example wave-pattern

use vestlink::client::{play, PatternStep};
use vestlink::proto::{ALL_POSITIONS, GRID_ROWS};
use vestlink::{Panel, Player};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let player = Player::new();
    player.initialize()?;

    for position in ALL_POSITIONS {
        eprintln!(
            "{position}: {}",
            if player.is_device_connected(position) {
                "connected"
            } else {
                "-"
            }
        );
    }

    // Wave: step i lights row i, full intensity front, half back.
    let wave: Vec<PatternStep> = (0..GRID_ROWS)
        .map(|row| {
            let mut step = PatternStep::empty();
            step.set_row(Panel::Front, row, 100);
            step.set_row(Panel::Back, row, 50);
            step
        })
        .collect();

    eprintln!("Running wave pattern...");
    play(&player, &wave, 500)?;

    // Alternation: everything front, then everything back.
    let mut front = PatternStep::empty();
    let mut back = PatternStep::empty();
    for row in 0..GRID_ROWS {
        front.set_row(Panel::Front, row, 100);
        back.set_row(Panel::Back, row, 100);
    }

    eprintln!("Running alternating pattern...");
    play(&player, &[front, back, front, back], 400)?;

    player.stop_all();
    Ok(())
}
