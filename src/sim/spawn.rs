//! Entity spawners and inter-arrival delay sampling
//!
//! Pickup spawns are paced by exponential delays so they feel irregular
//! rather than metronomic; each kind carries its own mean and clamp range.
//! Hazards instead run on a fixed cadence scaled by difficulty (handled in
//! the tick) and are aimed at the player's position at spawn time.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Effect, Hazard, Pickup, Star, WorldState};
use crate::consts::*;

/// Draw an exponential inter-arrival delay with the given mean, clamped
/// into `[min, max]`. The uniform sample is guarded away from zero so the
/// log never blows up.
pub fn next_delay(rng: &mut Pcg32, mean: f32, min: f32, max: f32) -> f32 {
    let u = rng.random::<f32>().max(1e-6);
    (-u.ln() * mean).clamp(min, max)
}

/// Delay until the next star spawn
pub fn star_delay(rng: &mut Pcg32) -> f32 {
    next_delay(rng, 11.0, 6.0, 18.0)
}

/// Delay until the next pickup spawn of the given kind
pub fn effect_delay(rng: &mut Pcg32, effect: Effect) -> f32 {
    let (mean, min, max) = match effect {
        Effect::Shield => (22.0, 12.0, 38.0),
        Effect::SpeedBoost => (30.0, 16.0, 48.0),
        Effect::Double => (70.0, 45.0, 120.0),
        Effect::Slow => (55.0, 35.0, 100.0),
        Effect::Magnet => (60.0, 35.0, 110.0),
        Effect::Shrink => (50.0, 28.0, 95.0),
    };
    next_delay(rng, mean, min, max)
}

/// Spawn a hazard just outside a random field edge, roughly aimed at the
/// player. The aim is taken once at spawn; hazards never home afterward.
pub fn spawn_hazard(state: &mut WorldState) {
    let (w, h) = (state.config.width, state.config.height);
    let size = state.rng.random_range(18.0..44.0);

    let pos = match state.rng.random_range(0..4) {
        0 => Vec2::new(state.rng.random_range(0.0..w), -size),
        1 => Vec2::new(w + size, state.rng.random_range(0.0..h)),
        2 => Vec2::new(state.rng.random_range(0.0..w), h + size),
        _ => Vec2::new(-size, state.rng.random_range(0.0..h)),
    };

    let aim = (state.player.pos - pos).normalize_or_zero();
    let ramp = 1.0 + (state.difficulty_ramp - 1.0) * RAMP_SPEED_DAMPING;
    let speed =
        state.rng.random_range(140.0..220.0) * ramp * state.difficulty.enemy_speed_mult();
    let jitter = Vec2::new(
        state.rng.random_range(-25.0..25.0),
        state.rng.random_range(-25.0..25.0),
    );

    state.hazards.push(Hazard {
        pos,
        size: Vec2::splat(size),
        vel: aim * speed + jitter,
        rot: state.rng.random_range(0.0..TAU),
        rot_vel: state.rng.random_range(-2.0..2.0),
    });
}

/// Spawn a currency star inside the field margins
pub fn spawn_star(state: &mut WorldState) {
    let pos = margin_point(state);
    state.stars.push(Star {
        pos,
        radius: STAR_RADIUS,
        spin: state.rng.random_range(0.0..TAU),
        pulse: state.rng.random_range(0.0..TAU),
    });
}

/// Spawn a timed pickup of the given kind inside the field margins
pub fn spawn_pickup(state: &mut WorldState, effect: Effect) {
    let pos = margin_point(state);
    state.pickups.push(Pickup {
        effect,
        pos,
        radius: effect.pickup_radius(),
        pulse: state.rng.random_range(0.0..TAU),
        life: effect.pickup_life(),
    });
}

/// Uniform point inside the pickup margins, never flush against an edge
fn margin_point(state: &mut WorldState) -> Vec2 {
    Vec2::new(
        state
            .rng
            .random_range(PICKUP_MARGIN..state.config.width - PICKUP_MARGIN),
        state
            .rng
            .random_range(PICKUP_MARGIN..state.config.height - PICKUP_MARGIN),
    )
}
