//! Single-step pathfinding over the currently-walkable grid.
//!
//! The search is breadth-first, so the returned direction always starts a
//! shortest path under the gate state in force when it runs. Ties between
//! equal-length first steps are broken by the fixed order up, down, left,
//! right.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use crate::state::GameState;
use crate::types::{Direction, Pos};

/// First step of a shortest walkable path from `from` to `to`, or `None`
/// when no path exists or the two cells coincide. Visits each cell at most
/// once, so the search is bounded by the grid area.
pub fn step_toward(state: &GameState, from: Pos, to: Pos) -> Option<Direction> {
    if from == to || !state.is_walkable(to) {
        return None;
    }

    let mut visited = BTreeSet::new();
    let mut first_step: BTreeMap<Pos, Direction> = BTreeMap::new();
    let mut queue = VecDeque::new();
    visited.insert(from);
    queue.push_back(from);

    while let Some(current) = queue.pop_front() {
        for direction in Direction::ALL {
            let next = current.step(direction);
            if !state.is_walkable(next) || !visited.insert(next) {
                continue;
            }
            let step = first_step.get(&current).copied().unwrap_or(direction);
            if next == to {
                return Some(step);
            }
            first_step.insert(next, step);
            queue.push_back(next);
        }
    }

    None
}
