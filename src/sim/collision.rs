//! Collision classification for the platformer
//!
//! Everything is axis-aligned boxes, tested after integration against the
//! player's already-moved position.

use crate::aabb_overlap;
use crate::sim::state::Player;
use crate::world::{Enemy, Platform};

/// True when the falling player's bottom edge sits inside the platform's
/// landing band. The band reaches `vel.y` below the platform top, so it
/// widens with fall speed; a fall fast enough to step across band and
/// platform in one tick passes through undetected. That matches the
/// original tuning, where fall speeds stay well below platform thickness.
pub fn lands_on(player: &Player, platform: &Platform) -> bool {
    let bottom = player.bottom();
    player.vel.y > 0.0
        && player.pos.x < platform.pos.x + platform.size.x
        && player.pos.x + player.size.x > platform.pos.x
        && bottom > platform.pos.y
        && bottom < platform.pos.y + platform.size.y + player.vel.y
}

/// Full box overlap between player and enemy.
#[inline]
pub fn hits_enemy(player: &Player, enemy: &Enemy) -> bool {
    aabb_overlap(player.pos, player.size, enemy.pos, enemy.size)
}

/// A hit counts as a stomp iff the player is falling and their feet are
/// above the enemy's vertical midpoint. Anything else is a body hit.
#[inline]
pub fn is_stomp(player: &Player, enemy: &Enemy) -> bool {
    player.vel.y > 0.0 && player.bottom() < enemy.pos.y + enemy.size.y / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn platform_at(x: f32, y: f32) -> Platform {
        Platform {
            pos: Vec2::new(x, y),
            size: Vec2::new(200.0, 20.0),
            scored: false,
        }
    }

    fn enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            pos: Vec2::new(x, y),
            size: Vec2::splat(25.0),
            vx: 1.5,
            patrol_min_x: x,
            patrol_max_x: x + 100.0,
            alive: true,
        }
    }

    fn falling_player(x: f32, y: f32, vy: f32) -> Player {
        let mut player = Player::spawn();
        player.pos = Vec2::new(x, y);
        player.vel = Vec2::new(0.0, vy);
        player
    }

    #[test]
    fn test_lands_when_bottom_enters_band() {
        let platform = platform_at(100.0, 300.0);
        // Bottom at 305, falling at 10: inside (300, 330)
        let player = falling_player(150.0, 255.0, 10.0);
        assert!(lands_on(&player, &platform));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let platform = platform_at(100.0, 300.0);
        let player = falling_player(150.0, 255.0, -5.0);
        assert!(!lands_on(&player, &platform));
    }

    #[test]
    fn test_no_landing_above_platform_top() {
        let platform = platform_at(100.0, 300.0);
        // Bottom at 295, band starts strictly below 300
        let player = falling_player(150.0, 245.0, 10.0);
        assert!(!lands_on(&player, &platform));
    }

    #[test]
    fn test_no_landing_outside_horizontal_span() {
        let platform = platform_at(100.0, 300.0);
        let player = falling_player(40.0, 255.0, 10.0);
        assert!(!lands_on(&player, &platform));
    }

    #[test]
    fn test_fast_fall_tunnels_past_band() {
        let platform = platform_at(100.0, 300.0);
        // A single 500px step left the bottom edge at 850, beyond the
        // widened band (300, 820): the landing is skipped entirely.
        let player = falling_player(150.0, 800.0, 500.0);
        assert!(!lands_on(&player, &platform));
    }

    #[test]
    fn test_stomp_requires_falling() {
        let enemy = enemy_at(100.0, 300.0);
        let mut player = falling_player(100.0, 255.0, 5.0);
        // Bottom 305, midpoint 312.5
        assert!(is_stomp(&player, &enemy));

        player.vel.y = -5.0;
        assert!(!is_stomp(&player, &enemy));
    }

    #[test]
    fn test_stomp_requires_feet_above_midpoint() {
        let enemy = enemy_at(100.0, 300.0);
        // Bottom 315, below the midpoint at 312.5
        let player = falling_player(100.0, 265.0, 5.0);
        assert!(!is_stomp(&player, &enemy));

        // Bottom exactly at the midpoint is not a stomp
        let player = falling_player(100.0, 262.5, 5.0);
        assert!(!is_stomp(&player, &enemy));
    }

    #[test]
    fn test_hits_enemy_edge_touch_is_miss() {
        let enemy = enemy_at(100.0, 300.0);
        let player = falling_player(70.0, 300.0, 0.0);
        assert!(!hits_enemy(&player, &enemy));

        let player = falling_player(80.0, 300.0, 0.0);
        assert!(hits_enemy(&player, &enemy));
    }
}
