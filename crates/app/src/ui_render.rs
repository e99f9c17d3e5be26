//! Read-only drawing of the game state: grid, entities, gate panel,
//! counters, and terminal overlays. Never mutates the state it renders.

use game_core::{CellKind, EnemyBehavior, GameState, GateGroup, Pos};
use macroquad::prelude::*;

pub const TILE: f32 = 24.0;
pub const MARGIN: f32 = 16.0;

pub fn cell_under_cursor(state: &GameState, mx: f32, my: f32) -> Option<Pos> {
    let x = ((mx - MARGIN) / TILE).floor() as i32;
    let y = ((my - MARGIN) / TILE).floor() as i32;
    let pos = Pos { x, y };
    state.grid.in_bounds(pos).then_some(pos)
}

pub fn draw(state: &GameState) {
    draw_grid(state);
    draw_entities(state);
    draw_panel(state);
    if state.game_over {
        draw_overlay("Game Over", "Caught by an enemy. Press R to try again.", RED);
    } else if state.game_won {
        draw_overlay("Victory!", "You reached the exit. Press R to play again.", GREEN);
    }
}

fn tile_origin(pos: Pos) -> (f32, f32) {
    (MARGIN + pos.x as f32 * TILE, MARGIN + pos.y as f32 * TILE)
}

fn draw_grid(state: &GameState) {
    for y in 0..state.grid.height as i32 {
        for x in 0..state.grid.width as i32 {
            let pos = Pos { x, y };
            let Some(cell) = state.grid.cell_at(pos) else {
                continue;
            };
            let color = match cell {
                CellKind::Wall => DARKGRAY,
                CellKind::Floor => Color::new(0.16, 0.16, 0.20, 1.0),
                CellKind::Start => SKYBLUE,
                CellKind::Exit => GREEN,
                CellKind::Gate(group) if state.gates.is_open(group) => LIME,
                CellKind::Gate(_) => GOLD,
            };
            let (px, py) = tile_origin(pos);
            draw_rectangle(px, py, TILE - 1.0, TILE - 1.0, color);
            if let CellKind::Gate(group) = cell {
                draw_text(&group.glyph().to_string(), px + 7.0, py + TILE - 7.0, 18.0, BLACK);
            }
        }
    }
}

fn draw_entities(state: &GameState) {
    let radius = TILE * 0.38;
    for enemy in state.enemies.values() {
        let color = match enemy.behavior {
            EnemyBehavior::Wanderer { .. } => ORANGE,
            EnemyBehavior::Chaser { active: true } => RED,
            EnemyBehavior::Chaser { active: false } => MAROON,
        };
        let (px, py) = tile_origin(enemy.pos);
        draw_circle(px + TILE / 2.0, py + TILE / 2.0, radius, color);
    }
    let (px, py) = tile_origin(state.player);
    draw_circle(px + TILE / 2.0, py + TILE / 2.0, radius, BLUE);
}

fn draw_panel(state: &GameState) {
    let x = MARGIN * 2.0 + state.grid.width as f32 * TILE;
    let mut y = MARGIN + 16.0;
    let mut line = |text: &str, color: Color| {
        draw_text(text, x, y, 20.0, color);
        y += 24.0;
    };

    line(&format!("Turn {}", state.turn_count), WHITE);
    line(&format!("Moves this turn: {}", state.in_turn_moves), WHITE);
    match state.gates.open_group() {
        Some(group) => line(&format!("Open gate: {}", group.glyph()), LIME),
        None => line("All gates closed", GRAY),
    }
    line("", WHITE);
    line("Arrows/WASD move", GRAY);
    line("Space ends the turn", GRAY);
    line("1-5 toggle gates", GRAY);
    line("Click a chaser to toggle pursuit", GRAY);
    line("R resets", GRAY);
    line("", WHITE);
    line("Player: blue", BLUE);
    line("Wanderer: orange", ORANGE);
    line("Chaser: red when hunting", RED);
    for id in 0..5u8 {
        let group = GateGroup(id);
        let status = if state.gates.is_open(group) { "open" } else { "closed" };
        line(&format!("Gate {} ({}): {status}", id + 1, group.glyph()), GOLD);
    }
}

fn draw_overlay(title: &str, detail: &str, color: Color) {
    let w = screen_width();
    let h = screen_height();
    draw_rectangle(0.0, 0.0, w, h, Color::new(0.0, 0.0, 0.0, 0.6));
    let title_size = 48.0;
    let title_dims = measure_text(title, None, title_size as u16, 1.0);
    draw_text(title, (w - title_dims.width) / 2.0, h / 2.0 - 16.0, title_size, color);
    let detail_dims = measure_text(detail, None, 20, 1.0);
    draw_text(detail, (w - detail_dims.width) / 2.0, h / 2.0 + 20.0, 20.0, WHITE);
}
