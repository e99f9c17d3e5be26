//! Random-playout harness. Drives a session with random moves, gate
//! toggles, and turn ends, asserting engine invariants after every
//! operation, then prints a JSON summary of the run.

use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use game_core::{CellKind, Direction, EnemyKind, Game, GameState, GateGroup, Pos, Rules, layout};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    turns: u32,
    /// Path to a maze layout file; the built-in layout when omitted
    #[arg(short, long)]
    layout: Option<String>,
}

#[derive(Serialize)]
struct EnemyReport {
    kind: EnemyKind,
    pos: Pos,
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    turns_played: u32,
    moves_issued: u32,
    toggles_issued: u32,
    outcome: &'static str,
    player: Pos,
    open_gate: Option<GateGroup>,
    enemies: Vec<EnemyReport>,
    final_snapshot_hash: u64,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn assert_invariants(state: &GameState) {
    let player_cell = state.grid.cell_at(state.player).expect("player in bounds");
    assert!(player_cell != CellKind::Wall, "Invariant failed: player inside wall");
    for enemy in state.enemies.values() {
        let cell = state.grid.cell_at(enemy.pos).expect("enemy in bounds");
        assert!(cell != CellKind::Wall, "Invariant failed: enemy inside wall");
    }
    let open = (0..GateGroup::GLYPHS.len() as u8)
        .filter(|&id| state.gates.is_open(GateGroup(id)))
        .count();
    assert!(open <= 1, "Invariant failed: {open} gate groups open at once");
}

fn main() -> Result<()> {
    let args = Args::parse();

    let layout_text = match &args.layout {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read layout file: {path}"))?,
        None => layout::DEFAULT_LAYOUT.to_string(),
    };

    println!("Starting playout on seed {} for max {} turns...", args.seed, args.turns);
    let mut game = Game::new(args.seed, &layout_text, Rules::default())
        .context("Failed to parse layout")?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut turns_played = 0;
    let mut moves_issued = 0;
    let mut toggles_issued = 0;

    while turns_played < args.turns {
        let moves_this_turn = rng.next_u64() % 4;
        for _ in 0..moves_this_turn {
            if rng.next_u64() % 5 == 0 {
                let id = (rng.next_u64() % GateGroup::GLYPHS.len() as u64) as u8;
                game.toggle_gate(GateGroup(id));
                toggles_issued += 1;
                assert_invariants(game.state());
            }
            game.player_move(choose(&mut rng, &Direction::ALL));
            moves_issued += 1;
            assert_invariants(game.state());
            if game.state().game_won {
                break;
            }
        }

        if game.state().game_won {
            break;
        }

        let before = game.state().turn_count;
        game.end_turn();
        turns_played += 1;
        assert_invariants(game.state());
        assert_eq!(game.state().turn_count, before + 1, "Invariant failed: turn did not advance");
        assert_eq!(game.state().in_turn_moves, 0, "Invariant failed: move counter not cleared");

        if game.state().game_over || game.state().game_won {
            break;
        }
    }

    let outcome = if game.state().game_won {
        "won"
    } else if game.state().game_over {
        "lost"
    } else {
        "budget"
    };

    let summary = RunSummary {
        seed: args.seed,
        turns_played,
        moves_issued,
        toggles_issued,
        outcome,
        player: game.state().player,
        open_gate: game.state().gates.open_group(),
        enemies: game
            .state()
            .enemies
            .values()
            .map(|enemy| EnemyReport { kind: enemy.kind(), pos: enemy.pos })
            .collect(),
        final_snapshot_hash: game.snapshot_hash(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
