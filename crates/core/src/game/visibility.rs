//! Straight-line sight tests between cells, used to trigger chaser
//! pursuit. Kept separate from movement so sight rules stay deterministic.

use crate::state::GameState;
use crate::types::{CellKind, Pos};

/// Whether an unobstructed straight rasterized line connects `from` and
/// `to`. Walls and closed gates obstruct; the endpoints themselves are
/// never tested. The midpoint stepping rule is symmetric, so swapping the
/// endpoints cannot change the outcome.
pub fn has_line_of_sight(state: &GameState, from: Pos, to: Pos) -> bool {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_dist_x = dx.abs();
    let total_dist_y = dy.abs();

    let mut x = from.x;
    let mut y = from.y;
    let mut current_step_x = 0;
    let mut current_step_y = 0;

    while current_step_x < total_dist_x || current_step_y < total_dist_y {
        let lhs = (1 + 2 * current_step_x) * total_dist_y;
        let rhs = (1 + 2 * current_step_y) * total_dist_x;

        if lhs == rhs {
            // The line crosses a cell corner exactly; step diagonally past
            // both adjacent cells.
            x += sx;
            y += sy;
            current_step_x += 1;
            current_step_y += 1;
        } else if lhs < rhs {
            x += sx;
            current_step_x += 1;
        } else {
            y += sy;
            current_step_y += 1;
        }

        if x == to.x && y == to.y {
            break;
        }
        if blocks_sight(state, Pos { x, y }) {
            return false;
        }
    }
    true
}

fn blocks_sight(state: &GameState, pos: Pos) -> bool {
    match state.grid.cell_at(pos) {
        None | Some(CellKind::Wall) => true,
        Some(CellKind::Gate(group)) => !state.gates.is_open(group),
        Some(_) => false,
    }
}
