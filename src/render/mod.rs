//! Scene and HUD drawing
//!
//! The simulation never draws. Each frame the host hands `draw_frame` a
//! `Surface`, the small set of Canvas2D-shaped primitives the game needs;
//! the wasm adapter lives in `canvas`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, GameStatus};

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Drawing primitives the game needs from its host surface.
pub trait Surface {
    fn fill_rect(&mut self, color: &str, x: f32, y: f32, w: f32, h: f32);
    fn stroke_rect(&mut self, color: &str, line_width: f32, x: f32, y: f32, w: f32, h: f32);
    fn fill_text(&mut self, color: &str, font: &str, align: TextAlign, text: &str, x: f32, y: f32);
    /// Start drawing in world space shifted left/up by (dx, dy).
    fn push_translate(&mut self, dx: f32, dy: f32);
    /// Return to screen space.
    fn pop_translate(&mut self);
}

const SKY: &str = "#87CEEB";
const EARTH: &str = "#654321";
const ENEMY_RED: &str = "#B22222";
const POTION_PINK: &str = "#FF69B4";
const PLAYER_ORANGE: &str = "#FF5733";
const TROUGH: &str = "#555";
const HP_LOW: &str = "#DD2222";
const HP_OK: &str = "#22DD22";
const COOLDOWN_BLUE: &str = "#2288FF";
const GAME_OVER_WASH: &str = "#330000";

/// Draw one frame for the current status.
pub fn draw_frame(state: &GameState, settings: &Settings, surface: &mut impl Surface) {
    match state.status {
        GameStatus::Playing => draw_game(state, settings, surface),
        GameStatus::GameOver => draw_game_over(state, surface),
    }
}

fn draw_game(state: &GameState, settings: &Settings, surface: &mut impl Surface) {
    surface.fill_rect(SKY, 0.0, 0.0, state.viewport.x, state.viewport.y);

    // World space: everything shifts left by the camera offset
    surface.push_translate(state.camera.x, 0.0);

    for p in state.world.platforms() {
        surface.fill_rect(EARTH, p.pos.x, p.pos.y, p.size.x, p.size.y);
    }

    for e in state.world.enemies() {
        if e.alive {
            surface.fill_rect(ENEMY_RED, e.pos.x, e.pos.y, e.size.x, e.size.y);
        }
    }

    for p in state.world.pickups() {
        surface.fill_rect(POTION_PINK, p.pos.x, p.pos.y, p.size.x, p.size.y);
        // White cross detail
        surface.fill_rect(
            "white",
            p.pos.x + p.size.x / 2.0 - 2.0,
            p.pos.y + 5.0,
            4.0,
            p.size.y - 10.0,
        );
        surface.fill_rect(
            "white",
            p.pos.x + 5.0,
            p.pos.y + p.size.y / 2.0 - 2.0,
            p.size.x - 10.0,
            4.0,
        );
    }

    if player_visible(state, settings) {
        let player = &state.player;
        surface.fill_rect(
            PLAYER_ORANGE,
            player.pos.x,
            player.pos.y,
            player.size.x,
            player.size.y,
        );
    }

    surface.pop_translate();

    draw_hud(state, surface);
}

/// The invincible player blinks on a 6-tick cadence unless the player
/// asked for reduced flashing.
fn player_visible(state: &GameState, settings: &Settings) -> bool {
    if !state.player.invincible || settings.reduced_flash {
        return true;
    }
    (state.player.invincible_ticks / BLINK_PERIOD_TICKS) % 2 == 0
}

fn draw_hud(state: &GameState, surface: &mut impl Surface) {
    surface.fill_text(
        "white",
        "30px Arial",
        TextAlign::Left,
        &format!("Score: {}", state.score),
        20.0,
        40.0,
    );

    draw_health_bar(state, surface);
    draw_double_jump_bar(state, surface);
}

fn draw_health_bar(state: &GameState, surface: &mut impl Surface) {
    let bar_w = 150.0;
    let bar_h = 25.0;
    let bar_x = state.viewport.x - bar_w - 20.0;
    let bar_y = 20.0;

    surface.fill_rect(TROUGH, bar_x, bar_y, bar_w, bar_h);

    let hp_fraction = state.player.hp as f32 / state.player.max_hp as f32;
    let color = if hp_fraction < 0.3 { HP_LOW } else { HP_OK };
    surface.fill_rect(color, bar_x, bar_y, bar_w * hp_fraction, bar_h);

    surface.stroke_rect("white", 2.0, bar_x, bar_y, bar_w, bar_h);
}

fn draw_double_jump_bar(state: &GameState, surface: &mut impl Surface) {
    let bar_w = 150.0;
    let bar_h = 15.0;
    let bar_x = state.viewport.x - bar_w - 20.0;
    let bar_y = 60.0;

    surface.fill_rect(TROUGH, bar_x, bar_y, bar_w, bar_h);

    let remaining = state.player.double_jump_cooldown as f32;
    let recharged = 1.0 - remaining / DOUBLE_JUMP_COOLDOWN_TICKS as f32;
    surface.fill_rect(COOLDOWN_BLUE, bar_x, bar_y, bar_w * recharged, bar_h);

    surface.stroke_rect("white", 1.0, bar_x, bar_y, bar_w, bar_h);

    surface.fill_text(
        "white",
        "12px Arial",
        TextAlign::Center,
        "Double Jump",
        bar_x + bar_w / 2.0,
        bar_y - 5.0,
    );

    if state.player.double_jump_cooldown > 0 {
        // Ticks to seconds at the nominal 60Hz refresh
        let seconds = state.player.double_jump_cooldown as f32 / 60.0;
        surface.fill_text(
            "white",
            "12px Arial",
            TextAlign::Center,
            &format!("{seconds:.1}s"),
            bar_x + bar_w / 2.0,
            bar_y + bar_h + 12.0,
        );
    }
}

fn draw_game_over(state: &GameState, surface: &mut impl Surface) {
    surface.fill_rect(GAME_OVER_WASH, 0.0, 0.0, state.viewport.x, state.viewport.y);

    surface.fill_text(
        "white",
        "50px Arial",
        TextAlign::Center,
        "Game Over",
        state.viewport.x / 2.0,
        state.viewport.y / 3.0,
    );
    surface.fill_text(
        "white",
        "30px Arial",
        TextAlign::Center,
        &format!("Score: {}", state.score),
        state.viewport.x / 2.0,
        state.viewport.y / 2.0,
    );
    surface.fill_text(
        "white",
        "24px Arial",
        TextAlign::Center,
        "Tap to restart the game",
        state.viewport.x / 2.0,
        state.viewport.y * 0.7,
    );
}

/// Screen-space FPS readout, drawn by the host when enabled in settings.
pub fn draw_fps(fps: u32, surface: &mut impl Surface) {
    surface.fill_text(
        "white",
        "12px Arial",
        TextAlign::Left,
        &format!("{fps} fps"),
        20.0,
        60.0,
    );
}
