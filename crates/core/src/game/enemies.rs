//! Per-turn enemy behavior policies.
//!
//! Every enemy is advanced independently from the same pre-turn snapshot of
//! the player position; enemies react to walls, gates, and the player, not
//! to each other, and may share cells.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use super::pathfinding::step_toward;
use super::visibility::has_line_of_sight;
use crate::state::{EnemyBehavior, GameState};
use crate::types::{CellKind, Direction, Pos};

/// Relative likelihood of stepping into an open gate cell versus plain
/// floor when a wanderer picks among candidates.
const OPEN_GATE_WEIGHT: u64 = 3;

/// Advance all enemies by their per-turn sub-step budget. `state` is the
/// post-player-phase snapshot being built by `end_turn`; the player does
/// not move while this runs.
pub(super) fn advance_enemies(state: &mut GameState, rng: &mut ChaCha8Rng) {
    let player = state.player;
    let ids: Vec<_> = state.enemies.keys().collect();

    for id in ids {
        let enemy = state.enemies[id];
        match enemy.behavior {
            EnemyBehavior::Wanderer { last_move } => {
                let budget = enemy.moves_per_turn();
                let (pos, last_move) =
                    wander(state, rng, enemy.pos, last_move, player, budget);
                let enemy = &mut state.enemies[id];
                enemy.pos = pos;
                enemy.behavior = EnemyBehavior::Wanderer { last_move };
            }
            EnemyBehavior::Chaser { active } => {
                // Pursuit starts the turn the chaser first sees the player;
                // it only ends through an explicit deactivation request.
                let active = active || has_line_of_sight(state, enemy.pos, player);
                let budget = EnemyBehavior::Chaser { active }.moves_per_turn();
                let pos = chase(state, enemy.pos, player, budget);
                let enemy = &mut state.enemies[id];
                enemy.pos = pos;
                enemy.behavior = EnemyBehavior::Chaser { active };
            }
        }
    }
}

/// Randomized local exploration over the behavior's sub-step budget, never
/// reversing the previous move unless the reversal is the only walkable
/// option, with open-gate directions weighted over plain floor. Halts on
/// reaching the player so a collision is never stepped over inside one turn.
fn wander(
    state: &GameState,
    rng: &mut ChaCha8Rng,
    start: Pos,
    mut last_move: Option<Direction>,
    player: Pos,
    budget: u32,
) -> (Pos, Option<Direction>) {
    let mut pos = start;

    for _ in 0..budget {
        if pos == player {
            break;
        }
        let candidates: Vec<Direction> =
            Direction::ALL.into_iter().filter(|&d| state.is_walkable(pos.step(d))).collect();
        if candidates.is_empty() {
            break;
        }

        let reverse = last_move.map(Direction::opposite);
        let forward: Vec<Direction> =
            candidates.iter().copied().filter(|&d| Some(d) != reverse).collect();
        let pool = if forward.is_empty() { candidates } else { forward };

        let direction = weighted_pick(state, rng, pos, &pool);
        pos = pos.step(direction);
        last_move = Some(direction);
    }

    (pos, last_move)
}

fn weighted_pick(
    state: &GameState,
    rng: &mut ChaCha8Rng,
    from: Pos,
    pool: &[Direction],
) -> Direction {
    let weights: Vec<u64> = pool
        .iter()
        .map(|&d| if is_open_gate(state, from.step(d)) { OPEN_GATE_WEIGHT } else { 1 })
        .collect();
    let total: u64 = weights.iter().sum();
    let mut roll = rng.next_u64() % total;
    for (&direction, &weight) in pool.iter().zip(&weights) {
        if roll < weight {
            return direction;
        }
        roll -= weight;
    }
    pool[pool.len() - 1]
}

fn is_open_gate(state: &GameState, pos: Pos) -> bool {
    matches!(state.grid.cell_at(pos), Some(CellKind::Gate(group)) if state.gates.is_open(group))
}

/// Path-following pursuit over the behavior's sub-step budget, each step
/// along a shortest walkable path, stopping early on reaching the player
/// or losing all routes. A zero budget leaves the chaser in place.
fn chase(state: &GameState, start: Pos, player: Pos, budget: u32) -> Pos {
    let mut pos = start;
    for _ in 0..budget {
        if pos == player {
            break;
        }
        match step_toward(state, pos, player) {
            Some(direction) => pos = pos.step(direction),
            None => break,
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::layout::parse_layout;
    use crate::state::Enemy;
    use crate::types::{GateGroup, Rules};

    fn state_of(text: &str) -> GameState {
        GameState::from_layout(&parse_layout(text).expect("layout"), Rules::default())
    }

    fn single_enemy(state: &GameState) -> Enemy {
        state.enemies.values().copied().next().expect("one enemy")
    }

    #[test]
    fn wanderer_in_corridor_sweeps_and_bounces_back_to_center() {
        // Seven walkable corridor cells with the wanderer at the center and
        // the player sealed behind a wall. Whichever end it heads for
        // first, six sub-steps with one bounce return it to the center:
        // three out, bounce, three back.
        let mut state = state_of("###########\n#S#   W  E#\n###########");
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for turn in 0..20 {
            advance_enemies(&mut state, &mut rng);
            let enemy = single_enemy(&state);
            assert_eq!(enemy.pos, Pos { x: 6, y: 1 }, "drifted on turn {turn}");
        }
    }

    #[test]
    fn weighted_pick_favors_open_gate_branches() {
        // Four-way junction at (2,2): the branch up enters the open gate,
        // the other three are plain floor.
        let mut state = state_of("#####\n#S$ #\n#   #\n# E #\n#####");
        state.gates.toggle(GateGroup(0));
        let junction = Pos { x: 2, y: 2 };
        let pool: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|&d| state.is_walkable(junction.step(d)))
            .collect();
        assert_eq!(pool.len(), 4);
        assert_eq!(pool[0], Direction::Up);

        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut counts = [0u32; 4];
        for _ in 0..600 {
            let direction = weighted_pick(&state, &mut rng, junction, &pool);
            let slot = pool.iter().position(|&d| d == direction).expect("from pool");
            counts[slot] += 1;
        }

        // The gate branch carries weight 3 against 1 per floor branch, so
        // of 600 draws it should land near 300 with each floor branch near
        // 100. Twice-as-often is a wide margin for a seeded stream.
        let gate_draws = counts[0];
        for &floor_draws in &counts[1..] {
            assert!(
                gate_draws > 2 * floor_draws,
                "gate drawn {gate_draws} times vs floor {floor_draws}"
            );
        }
    }

    #[test]
    fn wanderer_takes_reversal_when_it_is_the_only_option() {
        // Two-cell pocket: every sub-step after the first is a forced
        // reversal, so the wanderer oscillates instead of stalling.
        let mut state = state_of("####\n#S##\n##W#\n##E#\n####");
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        advance_enemies(&mut state, &mut rng);
        // Six sub-steps between two cells end where they started.
        let enemy = single_enemy(&state);
        assert_eq!(enemy.pos, Pos { x: 2, y: 2 });
        assert_eq!(
            enemy.behavior,
            EnemyBehavior::Wanderer { last_move: Some(Direction::Up) }
        );
    }

    #[test]
    fn boxed_in_wanderer_halts_for_the_turn() {
        let mut state = state_of("#####\n#S#W#\n#####\n#E###\n#####");
        let before = single_enemy(&state).pos;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        advance_enemies(&mut state, &mut rng);
        assert_eq!(single_enemy(&state).pos, before);
        assert_eq!(
            single_enemy(&state).behavior,
            EnemyBehavior::Wanderer { last_move: None }
        );
    }

    #[test]
    fn inactive_chaser_without_sight_never_moves() {
        let mut state = state_of(
            "#######\n\
             #S#   #\n\
             ###C###\n\
             #E#   #\n\
             #######",
        );
        let before = single_enemy(&state).pos;
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..10 {
            advance_enemies(&mut state, &mut rng);
        }
        assert_eq!(single_enemy(&state).pos, before);
        assert_eq!(single_enemy(&state).behavior, EnemyBehavior::Chaser { active: false });
    }

    #[test]
    fn chaser_activates_on_sight_and_closes_distance() {
        let mut state = state_of("#########\n#S     C#\n####E####");
        state.player = Pos { x: 1, y: 1 };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        advance_enemies(&mut state, &mut rng);
        let enemy = single_enemy(&state);
        assert_eq!(enemy.behavior, EnemyBehavior::Chaser { active: true });
        assert_eq!(enemy.pos, Pos { x: 4, y: 1 }, "three sub-steps toward the player");
        advance_enemies(&mut state, &mut rng);
        assert_eq!(single_enemy(&state).pos, state.player, "caught up and stopped");
    }

    #[test]
    fn chaser_routes_around_obstacles() {
        let mut state = state_of(
            "#######\n\
             #S   C#\n\
             # ### #\n\
             #     #\n\
             ###E###",
        );
        state.player = Pos { x: 1, y: 3 };
        // No straight sight line to (1,3); the chaser stays put until the
        // player is visible along the bottom row opening.
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        advance_enemies(&mut state, &mut rng);
        assert_eq!(single_enemy(&state).behavior, EnemyBehavior::Chaser { active: false });

        // Force activation; the path-aware policy then rounds the wall
        // block instead of wedging against it.
        let id = state.enemies.keys().next().expect("id");
        state.enemies[id].behavior = EnemyBehavior::Chaser { active: true };
        advance_enemies(&mut state, &mut rng);
        let pos = single_enemy(&state).pos;
        assert_eq!(pos, Pos { x: 4, y: 3 }, "descended through the side corridor");
    }
}
