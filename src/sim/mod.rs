//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, fixed per-tick constants
//! - Seeded RNG only (owned by the world generator)
//! - Stable iteration order (generation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use state::{Camera, GameState, GameStatus, Player};
pub use tick::tick;
