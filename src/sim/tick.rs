//! Per-tick simulation step
//!
//! One call per display frame, no fixed-timestep accumulation: the physics
//! constants are tuned per tick. Phases run in a fixed order so collision
//! outcomes are reproducible:
//! input, integration, platforms, enemy patrol, enemy contact, pickups,
//! camera, terminal check, timers, world extension.

use crate::aabb_overlap;
use crate::consts::*;
use crate::input::InputState;

use super::collision;
use super::state::{GameState, GameStatus};

/// Advance the game by one tick. Does nothing once the run has ended; the
/// host restarts via `GameState::reset`.
pub fn tick(state: &mut GameState, input: &mut InputState) {
    if state.status != GameStatus::Playing {
        return;
    }

    apply_input(state, input);
    integrate(state);
    resolve_platforms(state);
    patrol_enemies(state);
    resolve_enemies(state);
    resolve_pickups(state);
    state.camera.follow(state.player.pos.x, state.viewport.x);
    check_terminal(state);
    run_timers(state);
    state.world.extend(state.camera.x, state.viewport.x);
}

/// Map held directions to horizontal velocity and consume the jump edge.
fn apply_input(state: &mut GameState, input: &mut InputState) {
    let player = &mut state.player;

    // Left wins when both directions are held
    player.vel.x = if input.left {
        -MOVE_SPEED
    } else if input.right {
        MOVE_SPEED
    } else {
        0.0
    };

    if input.jump_pressed {
        if player.on_ground {
            player.vel.y = JUMP_FORCE;
            player.on_ground = false;
            player.can_double_jump = true;
            player.double_jump_used = false;
        } else if player.can_double_jump
            && !player.double_jump_used
            && player.double_jump_cooldown == 0
        {
            player.vel.y = JUMP_FORCE * DOUBLE_JUMP_SCALE;
            player.double_jump_used = true;
            player.double_jump_cooldown = DOUBLE_JUMP_COOLDOWN_TICKS;
        }
        // The edge is consumed whether or not a jump fired
        input.jump_pressed = false;
    }
}

/// Semi-implicit Euler, one step per tick.
fn integrate(state: &mut GameState) {
    let player = &mut state.player;
    player.vel.y += GRAVITY;
    player.pos += player.vel;
}

fn resolve_platforms(state: &mut GameState) {
    state.player.on_ground = false;

    // Generation order; the first overlapping platform takes the landing
    // and zeroes vy, which makes every later band test fail.
    for platform in state.world.platforms_mut() {
        if collision::lands_on(&state.player, platform) {
            state.player.pos.y = platform.pos.y - state.player.size.y;
            state.player.vel.y = 0.0;
            state.player.on_ground = true;
            state.player.can_double_jump = true;
            state.player.double_jump_used = false;

            if !platform.scored {
                platform.scored = true;
                state.score += SCORE_PLATFORM;
            }
        }
    }
}

fn patrol_enemies(state: &mut GameState) {
    for enemy in state.world.enemies_mut() {
        if enemy.alive {
            enemy.patrol();
        }
    }
}

fn resolve_enemies(state: &mut GameState) {
    // The whole phase is skipped during the invincibility window
    if state.player.invincible {
        return;
    }

    // Each overlapping enemy is judged on its own: a stomp bounce flips vy
    // upward, so a second overlap in the same tick lands as a body hit.
    for enemy in state.world.enemies_mut() {
        if !enemy.alive || !collision::hits_enemy(&state.player, enemy) {
            continue;
        }

        if collision::is_stomp(&state.player, enemy) {
            enemy.alive = false;
            state.player.vel.y = STOMP_BOUNCE;
            state.score += SCORE_STOMP;
        } else {
            state.player.take_damage(1);
        }
    }
}

fn resolve_pickups(state: &mut GameState) {
    // A pickup only disappears when it actually heals; at full health it
    // stays where it is.
    let mut index = 0;
    while index < state.world.pickups().len() {
        let pickup = &state.world.pickups()[index];
        let touching = aabb_overlap(
            state.player.pos,
            state.player.size,
            pickup.pos,
            pickup.size,
        );

        if touching && state.player.hp < state.player.max_hp {
            state.player.hp = (state.player.hp + 1).min(state.player.max_hp);
            state.world.consume_pickup(index);
            state.score += SCORE_PICKUP;
        } else {
            index += 1;
        }
    }
}

fn check_terminal(state: &mut GameState) {
    // Falling out of the world ends the run outright
    if state.player.pos.y > state.viewport.y {
        state.player.hp = 0;
        state.status = GameStatus::GameOver;
    }

    if state.player.hp <= 0 {
        state.status = GameStatus::GameOver;
    }
}

fn run_timers(state: &mut GameState) {
    let player = &mut state.player;

    if player.double_jump_cooldown > 0 {
        player.double_jump_cooldown -= 1;
    }

    if player.invincible {
        player.invincible_ticks = player.invincible_ticks.saturating_sub(1);
        if player.invincible_ticks == 0 {
            player.invincible = false;
        }
    }
}
