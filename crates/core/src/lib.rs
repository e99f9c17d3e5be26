pub mod game;
pub mod layout;
pub mod state;
pub mod types;

pub use game::pathfinding::step_toward;
pub use game::visibility::has_line_of_sight;
pub use game::{Game, apply_player_move, end_turn, new_game, set_enemy_active, toggle_gate};
pub use layout::{DEFAULT_LAYOUT, EnemySpawn, ParsedLayout, parse_layout};
pub use state::{Enemy, EnemyBehavior, GameState, GateRegistry, Grid};
pub use types::*;
