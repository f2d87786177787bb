//! Endless platform stream generation
//!
//! Platforms are appended ahead of the camera and recycled once they fall
//! behind it. Enemy and pickup spawns ride along with each new platform,
//! rolled independently. The generator owns a seeded PCG stream, so a run
//! is fully reproducible from its seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Enemy, Pickup, Platform, World, WorldError};
use crate::consts::*;

#[derive(Debug)]
pub struct WorldGenerator {
    platforms: Vec<Platform>,
    enemies: Vec<Enemy>,
    pickups: Vec<Pickup>,
    /// Frontier: rightmost generated x. The next platform starts past here.
    last_end_x: f32,
    /// Altitude of the newest platform, drifted per spawn
    last_y: f32,
    /// Altitude clamp band, derived from the viewport height
    min_y: f32,
    max_y: f32,
    rng: Pcg32,
}

impl WorldGenerator {
    /// Seed the stream with the wide start platform. The player spawns on
    /// it, so it never grants the landing bonus.
    pub fn new(viewport_h: f32, seed: u64) -> Result<Self, WorldError> {
        if !viewport_h.is_finite() || viewport_h <= 0.0 {
            return Err(WorldError::InvalidViewport { height: viewport_h });
        }

        let start = Platform {
            pos: Vec2::new(START_PLATFORM_X, viewport_h * START_Y_FRACTION),
            size: Vec2::new(START_PLATFORM_WIDTH, PLATFORM_HEIGHT * 2.0),
            scored: true,
        };
        let last_end_x = start.right();
        let last_y = start.pos.y;

        Ok(Self {
            platforms: vec![start],
            enemies: Vec::new(),
            pickups: Vec::new(),
            last_end_x,
            last_y,
            min_y: viewport_h * MIN_Y_FRACTION,
            max_y: viewport_h * MAX_Y_FRACTION,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    /// Append one platform at the frontier, rolling its enemy and pickup.
    fn push_platform(&mut self) {
        let gap = self.rng.random_range(MIN_GAP..MAX_GAP);
        let width = self.rng.random_range(MIN_PLATFORM_WIDTH..MAX_PLATFORM_WIDTH);
        let drift = self.rng.random_range(DRIFT_Y_MIN..DRIFT_Y_MAX);
        let y = (self.last_y + drift).clamp(self.min_y, self.max_y);
        let x = self.last_end_x + gap;

        self.platforms.push(Platform {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, PLATFORM_HEIGHT),
            scored: false,
        });

        // No hazards or pickups left of the origin
        if x > 0.0 {
            if self.rng.random_bool(ENEMY_SPAWN_CHANCE) {
                self.enemies.push(Enemy {
                    pos: Vec2::new(x + width / 2.0 - ENEMY_SIZE / 2.0, y - ENEMY_SIZE),
                    size: Vec2::splat(ENEMY_SIZE),
                    vx: ENEMY_SPEED,
                    patrol_min_x: x,
                    patrol_max_x: x + width - ENEMY_SIZE,
                    alive: true,
                });
            }
            if self.rng.random_bool(PICKUP_SPAWN_CHANCE) {
                self.pickups.push(Pickup {
                    pos: Vec2::new(
                        x + width / 2.0 - PICKUP_SIZE / 2.0,
                        y - PICKUP_SIZE - PICKUP_CLEARANCE,
                    ),
                    size: Vec2::splat(PICKUP_SIZE),
                });
            }
        }

        self.last_end_x = x + width;
        self.last_y = y;
    }
}

impl World for WorldGenerator {
    fn extend(&mut self, camera_x: f32, viewport_w: f32) {
        while self.last_end_x < camera_x + viewport_w * LOOKAHEAD_FACTOR {
            self.push_platform();
        }

        self.platforms.retain(|p| p.right() > camera_x);
        self.enemies.retain(|e| e.alive && e.right() > camera_x);
        self.pickups.retain(|p| p.right() > camera_x);
    }

    fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    fn platforms_mut(&mut self) -> &mut [Platform] {
        &mut self.platforms
    }

    fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    fn consume_pickup(&mut self, index: usize) {
        if index < self.pickups.len() {
            self.pickups.remove(index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEW_H: f32 = 600.0;
    const VIEW_W: f32 = 800.0;

    #[test]
    fn test_new_seeds_start_platform() {
        let world = WorldGenerator::new(VIEW_H, 1).unwrap();
        assert_eq!(world.platforms.len(), 1);

        let start = &world.platforms[0];
        assert_eq!(start.pos, Vec2::new(START_PLATFORM_X, VIEW_H * START_Y_FRACTION));
        assert_eq!(start.size, Vec2::new(START_PLATFORM_WIDTH, PLATFORM_HEIGHT * 2.0));
        assert!(start.scored, "spawn platform must never grant score");

        assert_eq!(world.last_end_x, start.right());
        assert!(world.enemies.is_empty());
        assert!(world.pickups.is_empty());
    }

    #[test]
    fn test_new_rejects_bad_viewport() {
        assert!(matches!(
            WorldGenerator::new(0.0, 1),
            Err(WorldError::InvalidViewport { .. })
        ));
        assert!(WorldGenerator::new(-600.0, 1).is_err());
        assert!(WorldGenerator::new(f32::NAN, 1).is_err());
        assert!(WorldGenerator::new(f32::INFINITY, 1).is_err());
    }

    #[test]
    fn test_extend_covers_lookahead() {
        let mut world = WorldGenerator::new(VIEW_H, 7).unwrap();
        world.extend(0.0, VIEW_W);
        assert!(world.last_end_x >= VIEW_W * LOOKAHEAD_FACTOR);
    }

    #[test]
    fn test_extend_is_idempotent() {
        let mut world = WorldGenerator::new(VIEW_H, 7).unwrap();
        world.extend(0.0, VIEW_W);
        let count = world.platforms.len();
        world.extend(0.0, VIEW_W);
        assert_eq!(world.platforms.len(), count);
    }

    #[test]
    fn test_generated_geometry_within_bounds() {
        let mut world = WorldGenerator::new(VIEW_H, 99).unwrap();
        // Camera at the origin keeps the whole stream around for inspection
        world.extend(0.0, 10_000.0);

        // The seeded start platform has its own fixed geometry; the bounds
        // apply to everything generated after it.
        let mut prev_end = world.platforms[0].right();
        for p in &world.platforms[1..] {
            // Recovered by subtraction, so allow for f32 rounding
            let gap = p.pos.x - prev_end;
            assert!(
                gap >= MIN_GAP - 0.01 && gap <= MAX_GAP + 0.01,
                "gap {gap} out of bounds"
            );
            assert!(
                (MIN_PLATFORM_WIDTH..MAX_PLATFORM_WIDTH).contains(&p.size.x),
                "width {} out of bounds",
                p.size.x
            );
            assert!(p.pos.y >= VIEW_H * MIN_Y_FRACTION);
            assert!(p.pos.y <= VIEW_H * MAX_Y_FRACTION);
            prev_end = p.right();
        }
    }

    #[test]
    fn test_enemies_anchored_to_platforms() {
        let mut world = WorldGenerator::new(VIEW_H, 3).unwrap();
        world.extend(0.0, 20_000.0);
        assert!(
            !world.enemies.is_empty(),
            "a 30000px stream without a single enemy roll is effectively impossible"
        );

        for e in &world.enemies {
            let host = world
                .platforms
                .iter()
                .find(|p| p.pos.x == e.patrol_min_x)
                .expect("every enemy sits on a generated platform");
            assert_eq!(e.patrol_max_x, host.pos.x + host.size.x - ENEMY_SIZE);
            assert_eq!(e.pos.y, host.pos.y - ENEMY_SIZE);
            assert_eq!(e.vx, ENEMY_SPEED);
            assert!(e.alive);
        }
    }

    #[test]
    fn test_pickups_hover_above_platforms() {
        let mut world = WorldGenerator::new(VIEW_H, 5).unwrap();
        world.extend(0.0, 20_000.0);
        assert!(
            !world.pickups.is_empty(),
            "a 30000px stream without a single pickup roll is effectively impossible"
        );

        for p in &world.pickups {
            let hosted = world.platforms.iter().any(|plat| {
                p.pos.x == plat.pos.x + plat.size.x / 2.0 - PICKUP_SIZE / 2.0
                    && p.pos.y == plat.pos.y - PICKUP_SIZE - PICKUP_CLEARANCE
            });
            assert!(hosted, "pickup not centered above any platform");
        }
    }

    #[test]
    fn test_prune_drops_entities_behind_camera() {
        let mut world = WorldGenerator::new(VIEW_H, 11).unwrap();
        world.extend(0.0, VIEW_W);

        let camera_x = 3_000.0;
        world.extend(camera_x, VIEW_W);

        assert!(world.platforms.iter().all(|p| p.right() > camera_x));
        assert!(world.enemies.iter().all(|e| e.right() > camera_x));
        assert!(world.pickups.iter().all(|p| p.right() > camera_x));
    }

    #[test]
    fn test_prune_drops_dead_enemies() {
        let mut world = WorldGenerator::new(VIEW_H, 3).unwrap();
        world.extend(0.0, 20_000.0);
        assert!(!world.enemies.is_empty());

        for e in &mut world.enemies {
            e.alive = false;
        }
        world.extend(0.0, 20_000.0);
        assert!(world.enemies.is_empty());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = WorldGenerator::new(VIEW_H, 1234).unwrap();
        let mut b = WorldGenerator::new(VIEW_H, 1234).unwrap();
        a.extend(4_000.0, VIEW_W);
        b.extend(4_000.0, VIEW_W);

        assert_eq!(a.platforms, b.platforms);
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.pickups, b.pickups);
    }

    #[test]
    fn test_consume_pickup_out_of_range_is_noop() {
        let mut world = WorldGenerator::new(VIEW_H, 5).unwrap();
        world.extend(0.0, 20_000.0);
        let count = world.pickups.len();
        world.consume_pickup(count + 10);
        assert_eq!(world.pickups.len(), count);

        world.consume_pickup(0);
        assert_eq!(world.pickups.len(), count - 1);
    }

    proptest! {
        #[test]
        fn prop_extend_always_covers_lookahead(
            seed in any::<u64>(),
            camera_x in 0.0f32..50_000.0,
        ) {
            let mut world = WorldGenerator::new(VIEW_H, seed).unwrap();
            world.extend(camera_x, VIEW_W);
            prop_assert!(world.last_end_x >= camera_x + VIEW_W * LOOKAHEAD_FACTOR);
        }

        #[test]
        fn prop_altitudes_stay_in_band(seed in any::<u64>()) {
            let mut world = WorldGenerator::new(VIEW_H, seed).unwrap();
            world.extend(20_000.0, VIEW_W);
            for p in world.platforms() {
                prop_assert!(p.pos.y >= VIEW_H * MIN_Y_FRACTION);
                prop_assert!(p.pos.y <= VIEW_H * MAX_Y_FRACTION);
            }
        }
    }
}
