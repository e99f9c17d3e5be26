//! Frame-level dispatch from captured input to engine operations. Kept
//! free of macroquad window calls so it can be exercised in tests.

use game_core::{Direction, EnemyBehavior, EnemyId, Game, GateGroup};
use macroquad::prelude::KeyCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppAction {
    Move(Direction),
    EndTurn,
    ToggleGate(GateGroup),
    ToggleEnemy(EnemyId),
    Reset,
}

pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up | KeyCode::W => Some(Direction::Up),
        KeyCode::Down | KeyCode::S => Some(Direction::Down),
        KeyCode::Left | KeyCode::A => Some(Direction::Left),
        KeyCode::Right | KeyCode::D => Some(Direction::Right),
        _ => None,
    }
}

pub fn action_for_key(key: KeyCode) -> Option<AppAction> {
    if let Some(direction) = direction_for_key(key) {
        return Some(AppAction::Move(direction));
    }
    match key {
        KeyCode::Space | KeyCode::Enter => Some(AppAction::EndTurn),
        KeyCode::Key1 => Some(AppAction::ToggleGate(GateGroup(0))),
        KeyCode::Key2 => Some(AppAction::ToggleGate(GateGroup(1))),
        KeyCode::Key3 => Some(AppAction::ToggleGate(GateGroup(2))),
        KeyCode::Key4 => Some(AppAction::ToggleGate(GateGroup(3))),
        KeyCode::Key5 => Some(AppAction::ToggleGate(GateGroup(4))),
        KeyCode::R => Some(AppAction::Reset),
        _ => None,
    }
}

#[derive(Default)]
pub struct AppState;

impl AppState {
    pub fn new() -> Self {
        Self
    }

    /// Apply one frame's worth of actions. Once the game has ended only a
    /// reset is accepted; the overlay owns the screen until then.
    pub fn tick(&mut self, game: &mut Game, actions: &[AppAction]) {
        for &action in actions {
            let terminal = game.state().game_over || game.state().game_won;
            if terminal && action != AppAction::Reset {
                continue;
            }
            match action {
                AppAction::Move(direction) => game.player_move(direction),
                AppAction::EndTurn => game.end_turn(),
                AppAction::ToggleGate(group) => game.toggle_gate(group),
                AppAction::ToggleEnemy(id) => {
                    if let Some(EnemyBehavior::Chaser { active }) =
                        game.state().enemies.get(id).map(|enemy| enemy.behavior)
                    {
                        game.set_enemy_active(id, !active);
                    }
                }
                AppAction::Reset => game.reset(),
            }
        }
    }
}
