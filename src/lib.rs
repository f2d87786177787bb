//! Canyon Dash - an endless side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `world`: Procedural platform/enemy/pickup stream
//! - `render`: Drawing-surface abstraction and scene/HUD drawing
//! - `input`: Input record populated by the host, read by the sim
//! - `settings`: User preferences

pub mod input;
pub mod render;
pub mod settings;
pub mod sim;
pub mod world;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Downward acceleration, px per tick squared (y grows downward)
    pub const GRAVITY: f32 = 0.6;
    /// Horizontal run speed, px per tick
    pub const MOVE_SPEED: f32 = 5.0;
    /// Jump impulse, px per tick (negative = up)
    pub const JUMP_FORCE: f32 = -14.0;
    /// Double jump impulse relative to a ground jump
    pub const DOUBLE_JUMP_SCALE: f32 = 0.8;
    /// Upward bounce after stomping an enemy
    pub const STOMP_BOUNCE: f32 = JUMP_FORCE / 1.5;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 100.0;
    pub const PLAYER_MAX_HP: i32 = 3;
    /// Invincibility window after taking a hit, in ticks
    pub const INVINCIBILITY_TICKS: u32 = 90;
    /// Blink period of the invincible player, in ticks
    pub const BLINK_PERIOD_TICKS: u32 = 6;
    /// Minimum ticks between double jumps
    pub const DOUBLE_JUMP_COOLDOWN_TICKS: u32 = 180;

    /// Platform stream
    pub const PLATFORM_HEIGHT: f32 = 20.0;
    pub const MIN_GAP: f32 = 100.0;
    pub const MAX_GAP: f32 = 250.0;
    pub const MIN_PLATFORM_WIDTH: f32 = 150.0;
    pub const MAX_PLATFORM_WIDTH: f32 = 400.0;
    /// Per-platform vertical drift bounds, px
    pub const DRIFT_Y_MIN: f32 = -50.0;
    pub const DRIFT_Y_MAX: f32 = 120.0;
    /// Platform altitude band as fractions of the viewport height
    pub const MIN_Y_FRACTION: f32 = 0.4;
    pub const MAX_Y_FRACTION: f32 = 0.9;
    pub const START_Y_FRACTION: f32 = 0.75;
    pub const START_PLATFORM_X: f32 = -100.0;
    pub const START_PLATFORM_WIDTH: f32 = 800.0;
    /// The stream stays this many viewport widths ahead of the camera
    pub const LOOKAHEAD_FACTOR: f32 = 1.5;

    /// Enemies and pickups
    pub const ENEMY_SIZE: f32 = 25.0;
    pub const ENEMY_SPEED: f32 = 1.5;
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.4;
    pub const PICKUP_SIZE: f32 = 20.0;
    /// Gap between a pickup and its platform top
    pub const PICKUP_CLEARANCE: f32 = 5.0;
    pub const PICKUP_SPAWN_CHANCE: f64 = 0.2;

    /// Scoring
    pub const SCORE_PLATFORM: u32 = 10;
    pub const SCORE_STOMP: u32 = 50;
    pub const SCORE_PICKUP: u32 = 25;
}

/// Overlap test for two axis-aligned boxes given as top-left corner + size.
/// Edge-touching boxes do not overlap.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
