use app::app_loop::AppState;
use app::{frame_input, ui_render};
use game_core::Game;
use macroquad::miniquad::date;
use macroquad::prelude::*;

#[macroquad::main("Gate Maze")]
async fn main() {
    let seed = date::now().to_bits();
    let mut game = Game::new_default(seed);
    let mut app = AppState::new();

    loop {
        let actions = frame_input::capture_frame_input(game.state());
        app.tick(&mut game, &actions);

        clear_background(BLACK);
        ui_render::draw(game.state());
        next_frame().await
    }
}
