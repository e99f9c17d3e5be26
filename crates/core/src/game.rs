//! Turn sequencing and the public engine operations.
//!
//! Every operation is a pure function from a state snapshot to a new
//! snapshot. Disallowed actions (moving into a wall, toggling a gate after
//! victory under strict rules) return the state unchanged rather than
//! failing; callers that need feedback diff the states. The only fallible
//! operation is `new_game`, which can reject a malformed layout.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::layout::{self, ParsedLayout};
use crate::state::{EnemyBehavior, GameState};
use crate::types::*;

mod enemies;
pub mod pathfinding;
pub mod visibility;

pub fn new_game(layout_text: &str, rules: Rules) -> Result<GameState, LayoutError> {
    let parsed = layout::parse_layout(layout_text)?;
    Ok(GameState::from_layout(&parsed, rules))
}

/// Move the player one cell. Movement and turn advancement are decoupled:
/// any number of moves may precede an `end_turn`. Reaching the exit wins
/// immediately, without waiting for the turn to end.
pub fn apply_player_move(state: &GameState, direction: Direction) -> GameState {
    if state.game_won {
        return state.clone();
    }
    let dest = state.player.step(direction);
    if !state.is_walkable(dest) {
        return state.clone();
    }
    let mut next = state.clone();
    next.player = dest;
    next.in_turn_moves += 1;
    if dest == next.exit {
        next.game_won = true;
    }
    next
}

/// Advance all enemies from the pre-turn snapshot, then evaluate terminal
/// conditions: collision with an enemy before reaching the exit. The
/// in-turn move counter resets and the turn counter increments regardless
/// of the outcome.
pub fn end_turn(state: &GameState, rng: &mut ChaCha8Rng) -> GameState {
    if state.game_won {
        return state.clone();
    }
    let mut next = state.clone();
    enemies::advance_enemies(&mut next, rng);
    if next.enemies.values().any(|enemy| enemy.pos == next.player) {
        next.game_over = true;
    } else if next.player == next.exit {
        next.game_won = true;
    }
    next.in_turn_moves = 0;
    next.turn_count += 1;
    next
}

/// Toggle a gate group under the exclusivity rule. Independent of turn
/// advancement and still available after a loss; availability after a win
/// is governed by `Rules::gate_toggles_after_win`.
pub fn toggle_gate(state: &GameState, group: GateGroup) -> GameState {
    if state.game_won && !state.rules.gate_toggles_after_win {
        return state.clone();
    }
    let mut next = state.clone();
    next.gates.toggle(group);
    next
}

/// Set a chaser's pursuit flag. Unknown ids and wanderers are silent
/// no-ops, consistent with the engine-wide rejected-action semantics.
pub fn set_enemy_active(state: &GameState, id: EnemyId, active: bool) -> GameState {
    match state.enemies.get(id).map(|enemy| enemy.behavior) {
        Some(EnemyBehavior::Chaser { active: current }) if current != active => {
            let mut next = state.clone();
            next.enemies[id].behavior = EnemyBehavior::Chaser { active };
            next
        }
        _ => state.clone(),
    }
}

/// Owning facade over the pure operations: holds the seed, the injected
/// RNG, the parsed layout for resets, and the current snapshot.
pub struct Game {
    seed: u64,
    rng: ChaCha8Rng,
    parsed: ParsedLayout,
    state: GameState,
}

impl Game {
    pub fn new(seed: u64, layout_text: &str, rules: Rules) -> Result<Self, LayoutError> {
        let parsed = layout::parse_layout(layout_text)?;
        let state = GameState::from_layout(&parsed, rules);
        Ok(Self { seed, rng: ChaCha8Rng::seed_from_u64(seed), parsed, state })
    }

    /// Session over the canonical layout with default rules.
    pub fn new_default(seed: u64) -> Self {
        Self::new(seed, layout::DEFAULT_LAYOUT, Rules::default())
            .expect("canonical layout is well-formed")
    }

    pub fn player_move(&mut self, direction: Direction) {
        self.state = apply_player_move(&self.state, direction);
    }

    pub fn end_turn(&mut self) {
        self.state = end_turn(&self.state, &mut self.rng);
    }

    pub fn toggle_gate(&mut self, group: GateGroup) {
        self.state = toggle_gate(&self.state, group);
    }

    pub fn set_enemy_active(&mut self, id: EnemyId, active: bool) {
        self.state = set_enemy_active(&self.state, id, active);
    }

    /// Discard the session and start over: parser-derived enemy placement,
    /// all gates closed, counters zeroed, RNG reseeded from the original
    /// seed so a reset run replays like a fresh one.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.state = GameState::from_layout(&self.parsed, self.state.rules);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Order-stable digest of the observable session state, for
    /// determinism tests and tooling.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.state.turn_count);
        hasher.write_u32(self.state.in_turn_moves);
        hasher.write_i32(self.state.player.x);
        hasher.write_i32(self.state.player.y);
        hasher.write_u8(self.state.game_over as u8);
        hasher.write_u8(self.state.game_won as u8);
        hasher.write_u8(self.state.gates.open_group().map_or(u8::MAX, |group| group.0));

        for enemy in self.state.enemies.values() {
            hasher.write_i32(enemy.pos.x);
            hasher.write_i32(enemy.pos.y);
            match enemy.behavior {
                EnemyBehavior::Wanderer { last_move } => {
                    hasher.write_u8(0);
                    hasher.write_u8(last_move.map_or(4, |dir| dir as u8));
                }
                EnemyBehavior::Chaser { active } => {
                    hasher.write_u8(1);
                    hasher.write_u8(active as u8);
                }
            }
        }

        hasher.finish()
    }
}
