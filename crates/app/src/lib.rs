pub mod app_loop;
pub mod frame_input;
pub mod ui_render;
