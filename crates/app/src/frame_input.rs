//! Keyboard and mouse collection for one rendered frame.

use game_core::GameState;
use macroquad::prelude::{
    KeyCode, MouseButton, is_key_pressed, is_mouse_button_pressed, mouse_position,
};

use crate::app_loop::{AppAction, action_for_key};
use crate::ui_render;

const ACTION_KEYS: [KeyCode; 16] = [
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::W,
    KeyCode::A,
    KeyCode::S,
    KeyCode::D,
    KeyCode::Space,
    KeyCode::Enter,
    KeyCode::Key1,
    KeyCode::Key2,
    KeyCode::Key3,
    KeyCode::Key4,
    KeyCode::Key5,
    KeyCode::R,
];

pub fn capture_frame_input(state: &GameState) -> Vec<AppAction> {
    let mut actions = Vec::new();

    for key in ACTION_KEYS {
        if is_key_pressed(key)
            && let Some(action) = action_for_key(key)
        {
            actions.push(action);
        }
    }

    // Clicking an enemy toggles its pursuit.
    if is_mouse_button_pressed(MouseButton::Left) {
        let (mx, my) = mouse_position();
        if let Some(pos) = ui_render::cell_under_cursor(state, mx, my)
            && let Some(enemy) = state.enemies.values().find(|enemy| enemy.pos == pos)
        {
            actions.push(AppAction::ToggleEnemy(enemy.id));
        }
    }

    actions
}
