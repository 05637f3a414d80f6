//! Star Dodge - a top-down arcade survival game
//!
//! Core modules:
//! - `sim`: the simulation core (spawning, collisions, status effects, the per-frame tick)
//! - `shop`: character/backdrop catalogs and purchase logic
//! - `progress`: persistent progression (best score, wallet, unlocks, cosmetics)
//!
//! Rendering is intentionally not part of this crate; the host page paints
//! from the state snapshot after each tick.

pub mod progress;
pub mod shop;
pub mod sim;

pub use progress::Progress;
pub use shop::{BACKDROPS, CHARACTERS};

/// Game configuration constants
pub mod consts {
    /// Upper bound on per-frame delta time (seconds). A stalled frame
    /// (tab backgrounded, GC pause) must not turn into a huge simulation jump.
    pub const MAX_FRAME_DT: f32 = 0.033;

    /// Default play field extent in CSS pixels
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 14.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    /// Speed multiplier while the sprint key is held
    pub const SPRINT_MULT: f32 = 1.45;
    /// Speed multiplier while a jetpack boost is active
    pub const BOOST_MULT: f32 = 1.6;
    /// Radius scale while shrunk
    pub const SHRINK_SCALE: f32 = 0.65;

    /// Score gained per second of survival (before multipliers)
    pub const SCORE_RATE: f32 = 10.0;
    /// Score gained per collected star (before multipliers)
    pub const STAR_SCORE: f32 = 50.0;

    /// Seconds of play per +1.0 of difficulty ramp
    pub const RAMP_PERIOD: f32 = 18.0;
    /// How much of the ramp bleeds into hazard speed
    pub const RAMP_SPEED_DAMPING: f32 = 0.18;

    /// Base seconds between hazard spawns (divided by the preset spawn multiplier)
    pub const HAZARD_INTERVAL: f32 = 0.9;
    /// Chance of a second simultaneous hazard on hard difficulty
    pub const HARD_EXTRA_HAZARD_CHANCE: f64 = 0.1;

    /// Hazard motion time scale while slow-motion is active
    pub const SLOW_FACTOR: f32 = 0.45;

    /// Magnet effect reach (pixels from player center)
    pub const MAGNET_RADIUS: f32 = 220.0;
    /// Magnet pull speed at zero distance (pixels/s, fades to 0 at the edge)
    pub const MAGNET_PULL: f32 = 520.0;

    /// Inset margin keeping pickups away from the field edges
    pub const PICKUP_MARGIN: f32 = 60.0;
    /// Star pickup radius
    pub const STAR_RADIUS: f32 = 12.0;
    /// Chance that a star spawn brings a second star
    pub const STAR_PAIR_CHANCE: f64 = 0.1;
}
