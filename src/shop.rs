//! Character, backdrop, and colour catalogs plus purchase logic
//!
//! Cosmetics never touch the simulation: a character is a shape id, a
//! backdrop a scene id, and a colour a palette id the renderer maps to hex.

use crate::progress::Progress;
use crate::sim::WorldState;

/// A purchasable player shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Character {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u32,
    pub symbol: &'static str,
}

pub const CHARACTERS: [Character; 12] = [
    Character { id: "orb", name: "Orb", cost: 0, symbol: "●" },
    Character { id: "triangle", name: "Triangle", cost: 0, symbol: "▲" },
    Character { id: "diamond", name: "Diamond", cost: 0, symbol: "◆" },
    Character { id: "hex", name: "Hex", cost: 0, symbol: "⬡" },
    Character { id: "shuriken", name: "Shuriken", cost: 20, symbol: "✦" },
    Character { id: "ghost", name: "Ghost", cost: 30, symbol: "👻" },
    Character { id: "rocket", name: "Rocket", cost: 40, symbol: "🚀" },
    Character { id: "ufo", name: "UFO", cost: 45, symbol: "🛸" },
    Character { id: "football", name: "Football", cost: 50, symbol: "⚽" },
    Character { id: "basketball", name: "Basketball", cost: 55, symbol: "🏀" },
    Character { id: "golfball", name: "Golf Ball", cost: 60, symbol: "⛳" },
    Character { id: "diasword", name: "Diamond Sword", cost: 70, symbol: "🗡" },
];

/// Shapes everyone starts with
pub const DEFAULT_CHARACTERS: [&str; 4] = ["orb", "triangle", "diamond", "hex"];

/// Look up a character, falling back to the first entry for unknown ids
pub fn character(id: &str) -> &'static Character {
    CHARACTERS.iter().find(|c| c.id == id).unwrap_or(&CHARACTERS[0])
}

/// A purchasable backdrop scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backdrop {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: u32,
}

pub const BACKDROPS: [Backdrop; 5] = [
    Backdrop { id: "default", name: "Default", cost: 0 },
    Backdrop { id: "deepOcean", name: "Deep Ocean", cost: 25 },
    Backdrop { id: "midnight", name: "Midnight Sky", cost: 20 },
    Backdrop { id: "nebula", name: "Soft Nebula", cost: 30 },
    Backdrop { id: "void", name: "Subtle Void", cost: 15 },
];

pub const DEFAULT_BACKDROPS: [&str; 1] = ["default"];

pub fn backdrop(id: &str) -> &'static Backdrop {
    BACKDROPS.iter().find(|b| b.id == id).unwrap_or(&BACKDROPS[0])
}

/// The selectable palette for the four standard shapes
pub const COLOURS: [(&str, &str); 7] = [
    ("red", "#ff4d4d"),
    ("orange", "#ff9c3a"),
    ("yellow", "#ffd966"),
    ("green", "#7dff7a"),
    ("blue", "#7cf7ff"),
    ("purple", "#a98bff"),
    ("pink", "#ff7ad9"),
];

/// Shapes that take the selected palette colour; the premium shapes carry
/// their own fixed tint.
const STANDARD_SHAPES: [&str; 4] = ["orb", "triangle", "diamond", "hex"];

pub fn colour_hex(id: &str) -> &'static str {
    COLOURS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, hex)| *hex)
        .unwrap_or("#7cf7ff")
}

/// Hex colour the renderer should paint the player with
pub fn player_colour_hex(shape: &str, colour: &str) -> &'static str {
    if STANDARD_SHAPES.contains(&shape) {
        return colour_hex(colour);
    }
    match shape {
        "shuriken" => "#cfd8ff",
        "ghost" => "#aee8ff",
        "rocket" => "#ff6a7d",
        "ufo" => "#b9ffcc",
        "football" => "#d4a574",
        "basketball" => "#ff9c3a",
        "golfball" => "#e8ecff",
        "diasword" => "#7cf7ff",
        _ => colour_hex("blue"),
    }
}

/// Hazards are tinted the opposite of the player's palette colour so they
/// always read as a threat.
pub fn hazard_colour_hex(colour: &str) -> &'static str {
    let opposite = match colour {
        "red" => "blue",
        "blue" => "red",
        "orange" | "yellow" => "purple",
        "purple" => "orange",
        "green" => "pink",
        "pink" => "green",
        _ => "red",
    };
    colour_hex(opposite)
}

/// What came of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Unlocked,
    AlreadyOwned,
    NotEnoughStars,
}

/// Buy a character: debits the session wallet and records the unlock. The
/// caller is responsible for persisting `progress` afterward.
pub fn purchase_character(
    progress: &mut Progress,
    world: &mut WorldState,
    id: &str,
) -> PurchaseOutcome {
    let item = character(id);
    if progress.is_character_unlocked(item.id) {
        return PurchaseOutcome::AlreadyOwned;
    }
    if world.wallet_stars < item.cost {
        return PurchaseOutcome::NotEnoughStars;
    }

    world.spend_wallet_stars(item.cost);
    progress.unlock_character(item.id);
    progress.wallet_stars = world.wallet_stars;
    PurchaseOutcome::Unlocked
}

/// Buy a backdrop; same contract as [`purchase_character`]
pub fn purchase_backdrop(
    progress: &mut Progress,
    world: &mut WorldState,
    id: &str,
) -> PurchaseOutcome {
    let item = backdrop(id);
    if progress.is_backdrop_unlocked(item.id) {
        return PurchaseOutcome::AlreadyOwned;
    }
    if world.wallet_stars < item.cost {
        return PurchaseOutcome::NotEnoughStars;
    }

    world.spend_wallet_stars(item.cost);
    progress.unlock_backdrop(item.id);
    progress.wallet_stars = world.wallet_stars;
    PurchaseOutcome::Unlocked
}
