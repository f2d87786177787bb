//! Game state and core simulation types

use glam::Vec2;

use crate::consts::*;
use crate::world::{NullWorld, World, WorldGenerator};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Active run
    Playing,
    /// Run ended; any tap restarts
    GameOver,
}

/// The player-controlled character
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub hp: i32,
    pub max_hp: i32,
    pub on_ground: bool,
    pub invincible: bool,
    /// Ticks of invincibility remaining
    pub invincible_ticks: u32,
    /// Armed on takeoff from the ground, spent by the mid-air jump
    pub can_double_jump: bool,
    pub double_jump_used: bool,
    /// Ticks until the double jump recharges
    pub double_jump_cooldown: u32,
}

impl Player {
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            hp: PLAYER_MAX_HP,
            max_hp: PLAYER_MAX_HP,
            on_ground: false,
            invincible: false,
            invincible_ticks: 0,
            can_double_jump: false,
            double_jump_used: false,
            double_jump_cooldown: 0,
        }
    }

    /// Bottom edge of the bounding box
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Apply a hit. Ignored while the invincibility window is open;
    /// otherwise opens a fresh window.
    pub fn take_damage(&mut self, amount: i32) {
        if self.invincible {
            return;
        }
        self.hp -= amount;
        self.invincible = true;
        self.invincible_ticks = INVINCIBILITY_TICKS;
    }
}

/// Horizontal-only scrolling camera. Never moves backward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera {
    pub x: f32,
}

impl Camera {
    /// Track the player once they pass the one-third viewport mark.
    pub fn follow(&mut self, player_x: f32, viewport_w: f32) {
        let target = player_x - viewport_w / 3.0;
        if target > self.x {
            self.x = target;
        }
    }
}

/// Complete state of one run, owned by the simulation loop
#[derive(Debug)]
pub struct GameState {
    /// Canvas size in CSS pixels
    pub viewport: Vec2,
    pub status: GameStatus,
    pub score: u32,
    pub player: Player,
    pub camera: Camera,
    pub world: Box<dyn World>,
    /// Seed of the current run (for log correlation)
    pub seed: u64,
}

impl GameState {
    /// Start a fresh run. A generator construction failure degrades to an
    /// empty world rather than aborting: the run becomes an infinite fall
    /// until the next restart.
    pub fn new(viewport: Vec2, seed: u64) -> Self {
        let world: Box<dyn World> = match WorldGenerator::new(viewport.y, seed) {
            Ok(generator) => Box::new(generator),
            Err(err) => {
                log::error!("world generator unavailable, starting empty: {err}");
                Box::new(NullWorld)
            }
        };

        Self {
            viewport,
            status: GameStatus::Playing,
            score: 0,
            player: Player::spawn(),
            camera: Camera::default(),
            world,
            seed,
        }
    }

    /// Full restart with a new seed (tap after game over).
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(self.viewport, seed);
    }

    /// A window resize is a full reset against the new viewport.
    pub fn resize(&mut self, viewport: Vec2, seed: u64) {
        *self = Self::new(viewport, seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_defaults() {
        let player = Player::spawn();
        assert_eq!(player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(player.size, Vec2::new(30.0, 50.0));
        assert_eq!(player.hp, 3);
        assert!(!player.on_ground);
        assert!(!player.can_double_jump);
        assert_eq!(player.double_jump_cooldown, 0);
    }

    #[test]
    fn test_damage_opens_invincibility_window() {
        let mut player = Player::spawn();
        player.take_damage(1);
        assert_eq!(player.hp, 2);
        assert!(player.invincible);
        assert_eq!(player.invincible_ticks, INVINCIBILITY_TICKS);

        // A second hit inside the window is absorbed
        player.take_damage(1);
        assert_eq!(player.hp, 2);
    }

    #[test]
    fn test_camera_never_retreats() {
        let mut camera = Camera::default();
        camera.follow(500.0, 900.0);
        assert_eq!(camera.x, 200.0);

        camera.follow(100.0, 900.0);
        assert_eq!(camera.x, 200.0);

        camera.follow(600.0, 900.0);
        assert_eq!(camera.x, 300.0);
    }

    #[test]
    fn test_camera_waits_for_one_third_mark() {
        let mut camera = Camera::default();
        camera.follow(250.0, 900.0);
        assert_eq!(camera.x, 0.0);
    }

    #[test]
    fn test_new_run_defaults() {
        let state = GameState::new(Vec2::new(800.0, 600.0), 42);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.world.platforms().len(), 1);
    }

    #[test]
    fn test_bad_viewport_degrades_to_empty_world() {
        let state = GameState::new(Vec2::new(800.0, f32::NAN), 42);
        assert_eq!(state.status, GameStatus::Playing);
        assert!(state.world.platforms().is_empty());
    }

    #[test]
    fn test_reset_restores_initial_values() {
        let mut state = GameState::new(Vec2::new(800.0, 600.0), 42);
        state.score = 500;
        state.player.pos.x = 4_000.0;
        state.camera.x = 3_700.0;
        state.status = GameStatus::GameOver;

        state.reset(43);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.viewport, Vec2::new(800.0, 600.0));
        assert_eq!(state.seed, 43);
    }
}
