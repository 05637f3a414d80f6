//! The per-frame update
//!
//! One tick advances the whole world: clock and difficulty ramp, status
//! timers, score, player movement, spawn countdowns, entity motion, pickup
//! collection, and the shield-gated hazard collision that ends the run.
//! The host clamps `dt` (see `consts::MAX_FRAME_DT`) so a stalled frame
//! cannot turn into a giant simulation jump.

use rand::Rng;

use super::collision::{circle_circle, circle_rect};
use super::input::TickInput;
use super::spawn;
use super::state::{Effect, GameEvent, WorldState};
use crate::consts::*;

/// Advance the world by `dt` seconds. A no-op unless a run is actively
/// playing; the start screen, pause, and game-over states all freeze the
/// world as-is.
pub fn tick(state: &mut WorldState, input: &TickInput, dt: f32) {
    if !state.running || state.paused || state.game_over {
        return;
    }

    state.elapsed += dt;
    state.difficulty_ramp = 1.0 + state.elapsed / RAMP_PERIOD;

    state.player.effects.tick(dt);
    state.player.radius = if state.player.effects.active(Effect::Shrink) {
        state.player.base_radius * SHRINK_SCALE
    } else {
        state.player.base_radius
    };

    let score_mult = if state.player.effects.active(Effect::Double) {
        2.0
    } else {
        1.0
    };
    state.score += dt * SCORE_RATE * state.difficulty.score_mult() * score_mult;

    move_player(state, input, dt);
    run_spawners(state, dt);
    advance_hazards(state, dt);
    collect_stars(state, dt, score_mult);
    collect_pickups(state, dt);

    // Shield makes the player untouchable; otherwise the first hazard
    // overlap ends the run.
    if !state.player.effects.active(Effect::Shield) {
        let hit = state
            .hazards
            .iter()
            .any(|hz| circle_rect(state.player.pos, state.player.radius, hz.pos, hz.size));
        if hit {
            state.end_run();
        }
    }
}

/// Integrate fused input and clamp the player into the field
fn move_player(state: &mut WorldState, input: &TickInput, dt: f32) {
    let sprint = if input.keys.sprint { SPRINT_MULT } else { 1.0 };
    let boost = if state.player.effects.active(Effect::SpeedBoost) {
        BOOST_MULT
    } else {
        1.0
    };
    let speed = state.player.base_speed * sprint * boost;

    let dir = input.direction();
    if dir != glam::Vec2::ZERO {
        state.player.pos += dir * speed * dt;
    }

    let r = state.player.radius;
    state.player.pos.x = state.player.pos.x.clamp(r, state.config.width - r);
    state.player.pos.y = state.player.pos.y.clamp(r, state.config.height - r);
}

/// Tick every spawn countdown and fire the ones that expired
fn run_spawners(state: &mut WorldState, dt: f32) {
    state.spawn_timers.hazard -= dt;
    if state.spawn_timers.hazard <= 0.0 {
        spawn::spawn_hazard(state);
        if state.difficulty == super::state::Difficulty::Hard
            && state.rng.random_bool(HARD_EXTRA_HAZARD_CHANCE)
        {
            spawn::spawn_hazard(state);
        }
        // Hazard cadence is difficulty-scaled, not exponential
        state.spawn_timers.hazard = HAZARD_INTERVAL / state.difficulty.spawn_mult();
    }

    state.spawn_timers.star -= dt;
    if state.spawn_timers.star <= 0.0 {
        spawn::spawn_star(state);
        if state.rng.random_bool(STAR_PAIR_CHANCE) {
            spawn::spawn_star(state);
        }
        state.spawn_timers.star = spawn::star_delay(&mut state.rng);
    }

    for effect in Effect::ALL {
        state.spawn_timers.effect[effect as usize] -= dt;
        if state.spawn_timers.effect[effect as usize] <= 0.0 {
            spawn::spawn_pickup(state, effect);
            let pair = effect.pair_chance();
            if pair > 0.0 && state.rng.random_bool(pair) {
                spawn::spawn_pickup(state, effect);
            }
            state.spawn_timers.effect[effect as usize] =
                spawn::effect_delay(&mut state.rng, effect);
        }
    }
}

/// Move hazards, slowed while slow-motion is active, and apply the
/// optional off-field cull policy.
fn advance_hazards(state: &mut WorldState, dt: f32) {
    let time_scale = if state.player.effects.active(Effect::Slow) {
        SLOW_FACTOR
    } else {
        1.0
    };
    for hz in &mut state.hazards {
        hz.pos += hz.vel * dt * time_scale;
        hz.rot += hz.rot_vel * dt * time_scale;
    }

    if let Some(margin) = state.config.hazard_cull_margin {
        let (w, h) = (state.config.width, state.config.height);
        state.hazards.retain(|hz| {
            hz.pos.x + hz.size.x >= -margin
                && hz.pos.y + hz.size.y >= -margin
                && hz.pos.x <= w + margin
                && hz.pos.y <= h + margin
        });
    }
}

/// Animate stars, apply magnet attraction, and collect overlapping ones
fn collect_stars(state: &mut WorldState, dt: f32, score_mult: f32) {
    let player_pos = state.player.pos;
    let player_r = state.player.radius;
    let magnet_on = state.player.effects.active(Effect::Magnet);

    let mut collected = 0u32;
    state.stars.retain_mut(|star| {
        star.spin += dt * 2.0;
        star.pulse += dt * 6.0;

        if magnet_on {
            let delta = player_pos - star.pos;
            let mut d = delta.length();
            if d <= 0.0 {
                d = 1.0;
            }
            if d < MAGNET_RADIUS {
                let pull = (1.0 - d / MAGNET_RADIUS) * MAGNET_PULL;
                star.pos += delta / d * pull * dt;
            }
        }

        if circle_circle(player_pos, player_r, star.pos, star.radius) {
            collected += 1;
            false
        } else {
            true
        }
    });

    if collected > 0 {
        state.score += collected as f32 * STAR_SCORE * score_mult;
        state.run_stars += collected;
        state.add_wallet_stars(collected);
    }
}

/// Animate pickups and resolve each one: collected, expired, or kept.
/// Collection wins when both happen on the same tick.
fn collect_pickups(state: &mut WorldState, dt: f32) {
    let player_pos = state.player.pos;
    let player_r = state.player.radius;

    let mut granted = Vec::new();
    state.pickups.retain_mut(|pickup| {
        pickup.pulse += dt * 4.0;
        pickup.life -= dt;

        if circle_circle(player_pos, player_r, pickup.pos, pickup.radius) {
            granted.push(pickup.effect);
            false
        } else {
            pickup.life > 0.0
        }
    });

    for effect in granted {
        state.player.effects.grant(effect);
        state.events.push(GameEvent::EffectStarted(effect));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Difficulty, Hazard, Pickup, Star, WorldConfig};
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 0.1;

    fn started(seed: u64) -> WorldState {
        let mut state = WorldState::new(WorldConfig::default(), seed);
        state.start();
        state
    }

    /// A shield long enough that no test run ever loses it
    fn make_untouchable(state: &mut WorldState) {
        state.player.effects.shield = 1e9;
    }

    fn star_at(pos: Vec2) -> Star {
        Star {
            pos,
            radius: STAR_RADIUS,
            spin: 0.0,
            pulse: 0.0,
        }
    }

    #[test]
    fn test_tick_is_noop_before_start() {
        let mut state = WorldState::new(WorldConfig::default(), 3);
        let input = TickInput::default();

        tick(&mut state, &input, DT);

        assert_eq!(state.elapsed, 0.0);
        assert_eq!(state.score, 0.0);
        assert!(state.hazards.is_empty());
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_tick_is_noop_while_paused_or_over() {
        let mut state = started(3);
        tick(&mut state, &TickInput::default(), DT);
        let elapsed = state.elapsed;
        let hazard_count = state.hazards.len();

        state.toggle_pause();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.elapsed, elapsed);
        assert_eq!(state.hazards.len(), hazard_count);

        state.toggle_pause();
        state.end_run();
        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.elapsed, elapsed);
    }

    #[test]
    fn test_score_accrues_at_base_rate() {
        let mut state = started(3);
        make_untouchable(&mut state);

        for _ in 0..50 {
            tick(&mut state, &TickInput::default(), DT);
        }

        // 5 s at 10 points/s on normal difficulty, no pickups in reach
        assert!((state.elapsed - 5.0).abs() < 1e-3);
        assert!((state.score - 50.0).abs() < 0.1);
        assert!((state.difficulty_ramp - (1.0 + 5.0 / 18.0)).abs() < 1e-3);

        // Hazard cadence on normal is 0.9 s, first one fires immediately
        assert!((5..=6).contains(&state.hazards.len()));
    }

    #[test]
    fn test_score_never_decreases() {
        let mut state = started(11);
        make_untouchable(&mut state);

        let mut last = state.score;
        for _ in 0..300 {
            tick(&mut state, &TickInput::default(), 0.016);
            assert!(state.score >= last);
            last = state.score;
        }
    }

    #[test]
    fn test_star_collection_pays_double_while_doubled() {
        let dt = 0.001;

        let mut plain = started(5);
        plain.stars.push(star_at(plain.player.pos));
        tick(&mut plain, &TickInput::default(), dt);
        let plain_gain = plain.score;

        let mut doubled = started(5);
        doubled.stars.push(star_at(doubled.player.pos));
        doubled.player.effects.grant(Effect::Double);
        tick(&mut doubled, &TickInput::default(), dt);
        let doubled_gain = doubled.score;

        let expected_plain = dt * SCORE_RATE + STAR_SCORE;
        let expected_doubled = 2.0 * expected_plain;
        assert!((plain_gain - expected_plain).abs() < 1e-3);
        assert!((doubled_gain - expected_doubled).abs() < 1e-3);

        // Currency is not doubled, only score
        assert_eq!(plain.run_stars, 1);
        assert_eq!(doubled.run_stars, 1);
        assert_eq!(doubled.wallet_stars, 1);
        assert!(doubled
            .take_events()
            .contains(&GameEvent::WalletCredited(1)));
    }

    #[test]
    fn test_shield_blocks_hazard_collision() {
        let mut state = started(5);
        state.player.effects.grant(Effect::Shield);

        // Hazard sitting right on the player, not moving
        state.hazards.push(Hazard {
            pos: state.player.pos - Vec2::splat(10.0),
            size: Vec2::splat(20.0),
            vel: Vec2::ZERO,
            rot: 0.0,
            rot_vel: 0.0,
        });

        tick(&mut state, &TickInput::default(), 0.001);
        assert!(!state.game_over);

        // Shield gone, same overlap: run ends
        state.player.effects.shield = 0.0;
        tick(&mut state, &TickInput::default(), 0.001);
        assert!(state.game_over);
        assert!(!state.running);
    }

    #[test]
    fn test_barely_touching_hazard_ends_run() {
        let mut state = started(5);
        let player = state.player.pos;

        // Box edge one pixel inside the player's radius
        state.hazards.push(Hazard {
            pos: Vec2::new(player.x + state.player.radius - 1.0, player.y - 10.0),
            size: Vec2::splat(20.0),
            vel: Vec2::ZERO,
            rot: 0.0,
            rot_vel: 0.0,
        });

        tick(&mut state, &TickInput::default(), 0.001);
        assert!(state.game_over);
        assert!(state
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
    }

    #[test]
    fn test_pickup_expires_within_one_tick_of_its_life() {
        let dt = 0.01;
        let mut state = started(5);
        make_untouchable(&mut state);

        state.pickups.push(Pickup {
            effect: Effect::Shield,
            pos: Vec2::new(60.0, 60.0),
            radius: 16.0,
            pulse: 0.0,
            life: 5.0,
        });

        let mut removed_at = None;
        for _ in 0..1000 {
            tick(&mut state, &TickInput::default(), dt);
            if state.pickups.is_empty() {
                removed_at = Some(state.elapsed);
                break;
            }
        }

        // Gone exactly once, in the tick where life crossed zero, and
        // never collected along the way
        let removed_at = removed_at.expect("pickup never expired");
        assert!(removed_at >= 5.0 - 1e-3 && removed_at <= 5.0 + dt + 1e-3);
        assert!(!state
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::EffectStarted(_))));
    }

    #[test]
    fn test_collection_wins_over_expiry_on_the_same_tick() {
        let mut state = started(5);
        state.pickups.push(Pickup {
            effect: Effect::Magnet,
            pos: state.player.pos,
            radius: 16.0,
            pulse: 0.0,
            life: 0.005,
        });

        tick(&mut state, &TickInput::default(), 0.01);

        assert!(state.pickups.is_empty());
        assert!(state.player.effects.active(Effect::Magnet));
        assert!(state
            .take_events()
            .contains(&GameEvent::EffectStarted(Effect::Magnet)));
    }

    #[test]
    fn test_magnet_pull_fades_to_zero_at_its_radius() {
        let mut state = started(5);
        make_untouchable(&mut state);
        state.player.effects.grant(Effect::Magnet);

        let at_edge = state.player.pos + Vec2::new(MAGNET_RADIUS, 0.0);
        let nearby = state.player.pos + Vec2::new(100.0, 0.0);
        state.stars.push(star_at(at_edge));
        state.stars.push(star_at(nearby));

        tick(&mut state, &TickInput::default(), 0.016);

        // Star exactly at the magnet radius does not move
        assert_eq!(state.stars[0].pos, at_edge);
        // Star inside the radius is pulled toward the player
        let pulled = state.stars[1].pos.distance(state.player.pos);
        assert!(pulled < 100.0);
    }

    #[test]
    fn test_shrink_reduces_effective_radius_only_while_active() {
        let mut state = started(5);
        make_untouchable(&mut state);

        state.player.effects.grant(Effect::Shrink);
        tick(&mut state, &TickInput::default(), 0.016);
        assert!((state.player.radius - state.player.base_radius * SHRINK_SCALE).abs() < 1e-6);

        state.player.effects.shrink = 0.0;
        tick(&mut state, &TickInput::default(), 0.016);
        assert!((state.player.radius - state.player.base_radius).abs() < 1e-6);
    }

    #[test]
    fn test_slow_motion_scales_hazard_motion() {
        let mut state = started(5);
        make_untouchable(&mut state);
        state.player.effects.grant(Effect::Slow);

        state.hazards.insert(
            0,
            Hazard {
                pos: Vec2::new(0.0, 0.0),
                size: Vec2::splat(20.0),
                vel: Vec2::new(100.0, 0.0),
                rot: 0.0,
                rot_vel: 1.0,
            },
        );

        tick(&mut state, &TickInput::default(), DT);

        let hz = &state.hazards[0];
        assert!((hz.pos.x - 100.0 * DT * SLOW_FACTOR).abs() < 1e-4);
        assert!((hz.rot - 1.0 * DT * SLOW_FACTOR).abs() < 1e-4);
    }

    #[test]
    fn test_sprint_and_boost_compound() {
        let distance_for = |boost: bool, sprint: bool| {
            let mut state = started(5);
            make_untouchable(&mut state);
            if boost {
                state.player.effects.grant(Effect::SpeedBoost);
            }
            let input = TickInput {
                keys: crate::sim::KeyState {
                    right: true,
                    sprint,
                    ..Default::default()
                },
                ..Default::default()
            };
            let before = state.player.pos.x;
            tick(&mut state, &input, DT);
            state.player.pos.x - before
        };

        let base = distance_for(false, false);
        assert!((base - PLAYER_SPEED * DT).abs() < 1e-3);
        assert!((distance_for(false, true) - base * SPRINT_MULT).abs() < 1e-3);
        assert!((distance_for(true, false) - base * BOOST_MULT).abs() < 1e-3);
        assert!((distance_for(true, true) - base * SPRINT_MULT * BOOST_MULT).abs() < 1e-2);
    }

    #[test]
    fn test_hard_outspawns_easy_over_equal_time() {
        let count_hazards = |difficulty: Difficulty| {
            let mut state = started(21);
            make_untouchable(&mut state);
            state.set_difficulty(difficulty);
            for _ in 0..600 {
                tick(&mut state, &TickInput::default(), 0.033);
            }
            state.hazards.len()
        };

        assert!(count_hazards(Difficulty::Hard) > count_hazards(Difficulty::Easy));
    }

    #[test]
    fn test_cull_policy_drops_far_hazards() {
        let config = WorldConfig {
            hazard_cull_margin: Some(100.0),
            ..Default::default()
        };
        let mut state = WorldState::new(config, 5);
        state.start();
        make_untouchable(&mut state);

        state.hazards.push(Hazard {
            pos: Vec2::new(-500.0, -500.0),
            size: Vec2::splat(20.0),
            vel: Vec2::ZERO,
            rot: 0.0,
            rot_vel: 0.0,
        });

        tick(&mut state, &TickInput::default(), 0.016);

        let (w, h) = (state.config.width, state.config.height);
        assert!(state.hazards.iter().all(|hz| {
            hz.pos.x + hz.size.x >= -100.0
                && hz.pos.y + hz.size.y >= -100.0
                && hz.pos.x <= w + 100.0
                && hz.pos.y <= h + 100.0
        }));
    }

    proptest! {
        #[test]
        fn test_player_stays_in_bounds(
            moves in prop::collection::vec(
                (-1.0f32..1.0, -1.0f32..1.0, any::<bool>(), 0.001f32..0.033),
                1..150,
            )
        ) {
            let mut state = started(77);
            make_untouchable(&mut state);

            for (ax, ay, sprint, dt) in moves {
                let input = TickInput {
                    keys: crate::sim::KeyState { sprint, ..Default::default() },
                    gamepad: crate::sim::GamepadAxes::from_raw(ax, ay),
                };
                tick(&mut state, &input, dt);

                let r = state.player.radius;
                prop_assert!(state.player.pos.x >= r - 1e-3);
                prop_assert!(state.player.pos.x <= state.config.width - r + 1e-3);
                prop_assert!(state.player.pos.y >= r - 1e-3);
                prop_assert!(state.player.pos.y <= state.config.height - r + 1e-3);
            }
        }
    }
}
