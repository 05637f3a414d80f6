//! World state and core simulation types
//!
//! One `WorldState` value owns everything a run mutates: the player, the
//! entity populations, the spawn countdowns, the RNG, and the event queue
//! the host drains after each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spawn;
use crate::consts::*;

/// Difficulty presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier on hazard speed
    pub fn enemy_speed_mult(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.85,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.2,
        }
    }

    /// Multiplier on hazard spawn cadence (higher = more frequent)
    pub fn spawn_mult(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.8,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.25,
        }
    }

    /// Multiplier on survival score rate
    pub fn score_mult(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.9,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.15,
        }
    }
}

/// The six timed player status effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Shield,
    SpeedBoost,
    Double,
    Slow,
    Magnet,
    Shrink,
}

impl Effect {
    pub const ALL: [Effect; 6] = [
        Effect::Shield,
        Effect::SpeedBoost,
        Effect::Double,
        Effect::Slow,
        Effect::Magnet,
        Effect::Shrink,
    ];

    /// Seconds of effect granted when the matching pickup is collected
    pub fn duration(self) -> f32 {
        match self {
            Effect::Shield => 5.0,
            Effect::SpeedBoost => 7.0,
            Effect::Double => 10.0,
            Effect::Slow => 7.0,
            Effect::Magnet => 10.0,
            Effect::Shrink => 8.0,
        }
    }

    /// Seconds the pickup stays on the field before despawning
    pub fn pickup_life(self) -> f32 {
        match self {
            Effect::Shield | Effect::SpeedBoost => 5.0,
            _ => 7.0,
        }
    }

    pub fn pickup_radius(self) -> f32 {
        match self {
            Effect::SpeedBoost => 18.0,
            _ => 16.0,
        }
    }

    /// Chance that a scheduled spawn brings a second pickup of the same
    /// kind. The rare powerups never spawn in pairs.
    pub fn pair_chance(self) -> f64 {
        match self {
            Effect::Shield => 0.04,
            Effect::SpeedBoost => 0.03,
            _ => 0.0,
        }
    }
}

/// Countdown timers for the active status effects. A timer at or below
/// zero means the effect is inactive; timers never gate each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct EffectTimers {
    pub shield: f32,
    pub speed_boost: f32,
    pub double: f32,
    pub slow: f32,
    pub magnet: f32,
    pub shrink: f32,
}

impl EffectTimers {
    /// Decay every running timer by `dt`
    pub fn tick(&mut self, dt: f32) {
        for effect in Effect::ALL {
            let t = self.get_mut(effect);
            if *t > 0.0 {
                *t -= dt;
            }
        }
    }

    /// Start (or restart) an effect at its full duration
    pub fn grant(&mut self, effect: Effect) {
        *self.get_mut(effect) = effect.duration();
    }

    pub fn active(&self, effect: Effect) -> bool {
        self.get(effect) > 0.0
    }

    pub fn get(&self, effect: Effect) -> f32 {
        match effect {
            Effect::Shield => self.shield,
            Effect::SpeedBoost => self.speed_boost,
            Effect::Double => self.double,
            Effect::Slow => self.slow,
            Effect::Magnet => self.magnet,
            Effect::Shrink => self.shrink,
        }
    }

    fn get_mut(&mut self, effect: Effect) -> &mut f32 {
        match effect {
            Effect::Shield => &mut self.shield,
            Effect::SpeedBoost => &mut self.speed_boost,
            Effect::Double => &mut self.double,
            Effect::Slow => &mut self.slow,
            Effect::Magnet => &mut self.magnet,
            Effect::Shrink => &mut self.shrink,
        }
    }
}

/// A moving obstacle. Touching it without a shield ends the run.
///
/// `pos` is the top-left corner of the unrotated bounding box; `rot` and
/// `rot_vel` drive the rendered spin only and never affect collision.
#[derive(Debug, Clone)]
pub struct Hazard {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub rot: f32,
    pub rot_vel: f32,
}

/// A currency star. Stars never despawn on their own, only on collection.
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub radius: f32,
    pub spin: f32,
    pub pulse: f32,
}

/// A timed pickup granting one status effect. Removed on collection or
/// when `life` runs out, whichever comes first.
#[derive(Debug, Clone)]
pub struct Pickup {
    pub effect: Effect,
    pub pos: Vec2,
    pub radius: f32,
    pub pulse: f32,
    pub life: f32,
}

/// The player-controlled shape
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub base_radius: f32,
    /// Effective radius; `base_radius` scaled down while shrunk
    pub radius: f32,
    pub base_speed: f32,
    pub effects: EffectTimers,
    /// Cosmetic shape id, render-only
    pub shape: String,
    /// Cosmetic colour id, render-only
    pub colour: String,
}

impl Player {
    pub fn new(pos: Vec2, shape: &str, colour: &str) -> Self {
        Self {
            pos,
            base_radius: PLAYER_RADIUS,
            radius: PLAYER_RADIUS,
            base_speed: PLAYER_SPEED,
            effects: EffectTimers::default(),
            shape: shape.to_string(),
            colour: colour.to_string(),
        }
    }
}

/// Per-kind spawn countdowns. Each fires when it crosses zero and is then
/// reset: hazards to a fixed cadence scaled by difficulty, pickups to a
/// fresh exponential sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpawnTimers {
    pub hazard: f32,
    pub star: f32,
    pub effect: [f32; 6],
}

/// Notifications for the host, drained once per frame.
///
/// This is the only seam between the simulation and presentation/storage:
/// the tick never touches the DOM or LocalStorage itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Stars were added to the wallet (star collection)
    WalletCredited(u32),
    /// Stars were spent (shop purchase); the amount actually deducted
    WalletDebited(u32),
    /// A pickup granted its status effect
    EffectStarted(Effect),
    /// The run ended on a hazard collision
    GameOver { score: u32, best: u32, new_best: bool },
}

/// Play-field extent and optional policies
#[derive(Debug, Clone, Copy)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// When set, hazards farther than this many pixels outside the field
    /// are dropped. Off by default: missed hazards fly on forever, and a
    /// run ends long before that matters.
    pub hazard_cull_margin: Option<f32>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            hazard_cull_margin: None,
        }
    }
}

/// Complete game state for one session. Exclusively owned and mutated by
/// the tick; the host reads it afterward.
#[derive(Debug, Clone)]
pub struct WorldState {
    pub config: WorldConfig,
    pub rng: Pcg32,

    /// Run clock in seconds; drives the difficulty ramp
    pub elapsed: f32,
    pub running: bool,
    pub paused: bool,
    pub game_over: bool,
    /// Whether any run has been started this session (gates pause)
    pub started_once: bool,

    pub score: f32,
    pub best: u32,
    /// Persistent currency, mirrored to storage by the host
    pub wallet_stars: u32,
    /// Currency collected during the current run
    pub run_stars: u32,

    pub difficulty: Difficulty,
    /// Continuous time ramp, `1 + elapsed / 18`
    pub difficulty_ramp: f32,

    pub player: Player,
    pub hazards: Vec<Hazard>,
    pub stars: Vec<Star>,
    pub pickups: Vec<Pickup>,
    pub spawn_timers: SpawnTimers,

    pub events: Vec<GameEvent>,
}

impl WorldState {
    /// Create a fresh session on the start screen
    pub fn new(config: WorldConfig, seed: u64) -> Self {
        let center = Vec2::new(config.width / 2.0, config.height / 2.0);
        let mut state = Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            elapsed: 0.0,
            running: false,
            paused: false,
            game_over: false,
            started_once: false,
            score: 0.0,
            best: 0,
            wallet_stars: 0,
            run_stars: 0,
            difficulty: Difficulty::Normal,
            difficulty_ramp: 1.0,
            player: Player::new(center, "orb", "blue"),
            hazards: Vec::new(),
            stars: Vec::new(),
            pickups: Vec::new(),
            spawn_timers: SpawnTimers::default(),
            events: Vec::new(),
        };
        state.reset(true);
        state
    }

    /// Wipe the current run. With `to_start_screen` the session returns to
    /// the idle start screen; otherwise the next tick begins a new run.
    pub fn reset(&mut self, to_start_screen: bool) {
        self.paused = false;
        self.game_over = false;

        self.elapsed = 0.0;
        self.difficulty_ramp = 1.0;
        self.score = 0.0;
        self.run_stars = 0;

        self.hazards.clear();
        self.stars.clear();
        self.pickups.clear();

        // First hazard fires on the first tick; pickups wait a sampled delay
        self.spawn_timers.hazard = 0.0;
        self.spawn_timers.star = spawn::star_delay(&mut self.rng);
        for effect in Effect::ALL {
            self.spawn_timers.effect[effect as usize] = spawn::effect_delay(&mut self.rng, effect);
        }

        self.player.pos = Vec2::new(self.config.width / 2.0, self.config.height / 2.0);
        self.player.effects = EffectTimers::default();
        self.player.radius = self.player.base_radius;

        self.running = !to_start_screen;
    }

    /// Begin (or resume into) a run. No-op while on the game-over screen;
    /// the host must `reset` first.
    pub fn start(&mut self) {
        if self.game_over {
            return;
        }
        self.running = true;
        self.started_once = true;
        self.paused = false;
    }

    /// Toggle pause. Only meaningful once a run has started and before it
    /// has ended.
    pub fn toggle_pause(&mut self) {
        if self.started_once && !self.game_over {
            self.paused = !self.paused;
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Credit collected currency and notify the host
    pub fn add_wallet_stars(&mut self, amount: u32) {
        self.wallet_stars += amount;
        self.events.push(GameEvent::WalletCredited(amount));
    }

    /// Spend currency, clamping at an empty wallet. The emitted event
    /// carries the amount actually deducted.
    pub fn spend_wallet_stars(&mut self, amount: u32) {
        let spent = amount.min(self.wallet_stars);
        self.wallet_stars -= spent;
        self.events.push(GameEvent::WalletDebited(spent));
    }

    /// End the current run: record a new best if the score improved and
    /// emit the game-over notification.
    pub fn end_run(&mut self) {
        self.running = false;
        self.game_over = true;

        let score = self.score as u32;
        let new_best = score > self.best;
        if new_best {
            self.best = score;
        }
        self.events.push(GameEvent::GameOver {
            score,
            best: self.best,
            new_best,
        });
    }

    /// Drain the pending notifications for the host
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
