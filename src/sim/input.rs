//! Input snapshots and keyboard/gamepad fusion
//!
//! The host captures key transitions and polls the gamepad once per frame;
//! the tick only ever sees these plain snapshots. Whichever source has the
//! stronger magnitude that frame steers the player.

use glam::Vec2;

/// Stick magnitude below which both axes read as zero
pub const GAMEPAD_DEADZONE: f32 = 0.18;

/// Currently-held movement keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Sprint modifier (shift)
    pub sprint: bool,
}

impl KeyState {
    /// Apply a key transition. `key` is a lowercased `KeyboardEvent.key`
    /// value; returns false for keys the simulation does not handle.
    pub fn set(&mut self, key: &str, held: bool) -> bool {
        match key {
            "a" => self.left = held,
            "d" => self.right = held,
            "w" => self.up = held,
            "s" => self.down = held,
            "shift" => self.sprint = held,
            _ => return false,
        }
        true
    }

    /// Raw keyboard intent, one unit per held axis direction
    pub fn intent(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        v
    }
}

/// One frame's gamepad stick reading
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadAxes {
    pub x: f32,
    pub y: f32,
}

impl GamepadAxes {
    /// Snapshot raw stick axes, zeroing the pair when the combined
    /// magnitude sits under the deadzone.
    pub fn from_raw(x: f32, y: f32) -> Self {
        if Vec2::new(x, y).length() < GAMEPAD_DEADZONE {
            Self::default()
        } else {
            Self { x, y }
        }
    }

    pub fn as_vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Everything the tick reads from the outside world in one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub keys: KeyState,
    pub gamepad: GamepadAxes,
}

impl TickInput {
    /// Fused movement direction.
    ///
    /// The analog stick wins when its magnitude beats the keyboard's;
    /// keyboard intent is normalized so diagonals are not faster. Returns
    /// zero when nothing is held.
    pub fn direction(&self) -> Vec2 {
        let keys = self.keys.intent();
        let pad = self.gamepad.as_vec();

        let km = keys.length();
        let gm = pad.length();

        if gm > km {
            pad
        } else if km > 0.0 {
            keys / km
        } else {
            Vec2::ZERO
        }
    }
}
