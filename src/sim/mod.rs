//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform
//! dependencies: no DOM, no storage, no rendering. The host drives it once
//! per animation frame with a clamped delta time and drains the event queue
//! afterward.

pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{circle_circle, circle_rect};
pub use input::{GamepadAxes, KeyState, TickInput, GAMEPAD_DEADZONE};
pub use state::{
    Difficulty, Effect, EffectTimers, GameEvent, Hazard, Pickup, Player, SpawnTimers, Star,
    WorldConfig, WorldState,
};
pub use tick::tick;
