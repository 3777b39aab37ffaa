//! CandyVerse game state and derived values.

use std::collections::BTreeMap;

use crate::game::content::{self, Effect, UpgradeDef};

/// Simulation rate. Every timing constant in the game is counted in ticks.
pub const TICKS_PER_SEC: u32 = 10;

/// Virtual pixel size of one terminal cell. Companion movement runs in a
/// pixel-like space so the movement constants keep their original meaning;
/// rendering divides back down to cells.
pub const CELL_PX_W: f64 = 8.0;
pub const CELL_PX_H: f64 = 16.0;

// ── RNG ────────────────────────────────────────────────────────

/// Xorshift32. Small, seedable, and serialized with the save so a restored
/// game continues the same sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        Self {
            // xorshift has a fixed point at zero
            state: if seed == 0 { 0x9e37_79b9 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u32() >> 8) as f64 / (1u32 << 24) as f64
    }

    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    pub fn pick_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        self.next_u32() as usize % len.max(1)
    }

    /// Raw state for the save blob.
    pub fn seed(&self) -> u32 {
        self.state
    }
}

// ── Layout ─────────────────────────────────────────────────────

/// Walkable-area margins in virtual pixels, per device layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceMode {
    Phone,
    Tablet,
    Laptop,
}

impl DeviceMode {
    pub fn all() -> &'static [DeviceMode] {
        &[DeviceMode::Phone, DeviceMode::Tablet, DeviceMode::Laptop]
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeviceMode::Phone => "Phone",
            DeviceMode::Tablet => "Tablet",
            DeviceMode::Laptop => "Laptop",
        }
    }

    pub fn margins(&self) -> Margins {
        match self {
            DeviceMode::Phone => Margins {
                x: 40.0,
                top: 180.0,
                bottom: 200.0,
            },
            DeviceMode::Tablet => Margins {
                x: 80.0,
                top: 160.0,
                bottom: 180.0,
            },
            DeviceMode::Laptop => Margins {
                x: 140.0,
                top: 160.0,
                bottom: 180.0,
            },
        }
    }

    pub fn index(&self) -> usize {
        match self {
            DeviceMode::Phone => 0,
            DeviceMode::Tablet => 1,
            DeviceMode::Laptop => 2,
        }
    }

    pub fn from_index(idx: usize) -> DeviceMode {
        match idx {
            1 => DeviceMode::Tablet,
            2 => DeviceMode::Laptop,
            _ => DeviceMode::Phone,
        }
    }

    /// Infer a layout from the terminal width, used for fresh states until
    /// the player picks one explicitly.
    pub fn infer(cols: u16) -> DeviceMode {
        if cols < 60 {
            DeviceMode::Phone
        } else if cols < 100 {
            DeviceMode::Tablet
        } else {
            DeviceMode::Laptop
        }
    }
}

/// Screen size in virtual pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self {
            width: cols as f64 * CELL_PX_W,
            height: rows as f64 * CELL_PX_H,
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // Placeholder until the first frame reports real dimensions
        Viewport {
            width: 640.0,
            height: 800.0,
        }
    }
}

// ── Entities ───────────────────────────────────────────────────

/// Ambient NPC spawned by certain purchases. Wanders between random targets
/// and occasionally speaks.
#[derive(Clone, Debug, PartialEq)]
pub struct Companion {
    pub id: u64,
    pub name: String,
    /// Cosmetic only.
    pub age: u32,
    pub emoji: String,
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
    /// Transient speech bubble. Not persisted — its clear timer lives in the
    /// session effect queue.
    pub speech: Option<String>,
    /// Bumped on every new speech line; a scheduled clear only fires if the
    /// sequence still matches (last write wins).
    pub speech_seq: u32,
}

/// Floating "+N" particle rising from the core after a tap.
#[derive(Clone, Debug)]
pub struct Floater {
    pub text: String,
    /// Column offset from the core's center.
    pub col_offset: i16,
    /// Remaining lifetime in ticks.
    pub life: u32,
    pub max_life: u32,
}

// ── GameState ──────────────────────────────────────────────────

/// The entire save, plus a handful of transient presentation fields.
pub struct GameState {
    /// Spendable candy.
    pub candy: f64,
    /// Monotonic total ever earned. Drives unlocks; survives ascension.
    pub lifetime_candy: f64,
    /// Manual taps on the core.
    pub clicks: u64,
    /// Upgrade id → owned count.
    pub upgrades: BTreeMap<String, u32>,
    /// Append-only achievement ids.
    pub unlocked_achievements: Vec<String>,
    pub prestige_level: u32,
    pub companions: Vec<Companion>,
    pub next_companion_id: u64,
    pub player_name: String,
    pub skin: String,
    pub device_mode: DeviceMode,
    /// Epoch millis of the last persisted snapshot.
    pub last_saved_ms: f64,
    /// One-way flag set when onboarding completes.
    pub onboarded: bool,
    pub rng: SimpleRng,

    // Transient presentation state, never saved.
    pub viewport: Viewport,
    /// True until the player picks a device mode or a save supplies one.
    pub device_mode_inferred: bool,
    pub floaters: Vec<Floater>,
    pub anim_frame: u32,
    pub click_flash: u32,
    pub purchase_flash: u32,
}

impl GameState {
    pub fn new(seed: u32, now_ms: f64) -> Self {
        let mut rng = SimpleRng::new(seed);
        let player_name =
            content::PLAYER_NAMES[rng.pick_index(content::PLAYER_NAMES.len())].to_string();
        Self {
            candy: 0.0,
            lifetime_candy: 0.0,
            clicks: 0,
            upgrades: BTreeMap::new(),
            unlocked_achievements: Vec::new(),
            prestige_level: 0,
            companions: Vec::new(),
            next_companion_id: 1,
            player_name,
            skin: content::DEFAULT_SKIN.to_string(),
            device_mode: DeviceMode::Phone,
            last_saved_ms: now_ms,
            onboarded: false,
            rng,
            viewport: Viewport::default(),
            device_mode_inferred: true,
            floaters: Vec::new(),
            anim_frame: 0,
            click_flash: 0,
            purchase_flash: 0,
        }
    }

    pub fn owned(&self, id: &str) -> u32 {
        self.upgrades.get(id).copied().unwrap_or(0)
    }

    pub fn total_upgrade_count(&self) -> u32 {
        self.upgrades.values().sum()
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.unlocked_achievements.iter().any(|a| a == id)
    }

    /// Permanent ascension bonus: +10% per prestige level.
    pub fn prestige_multiplier(&self) -> f64 {
        1.0 + self.prestige_level as f64 * 0.1
    }

    /// Candy per second from all production upgrades, prestige-scaled.
    pub fn production_rate(&self) -> f64 {
        let base: f64 = content::UPGRADES
            .iter()
            .map(|def| match def.effect {
                Effect::PerSecond(v) => self.owned(def.id) as f64 * v,
                Effect::PerClick(_) => 0.0,
            })
            .sum();
        base * self.prestige_multiplier()
    }

    /// Candy per manual tap, prestige-scaled. Starts at 1.
    pub fn click_value(&self) -> f64 {
        let base: f64 = 1.0
            + content::UPGRADES
                .iter()
                .map(|def| match def.effect {
                    Effect::PerClick(v) => self.owned(def.id) as f64 * v,
                    Effect::PerSecond(_) => 0.0,
                })
                .sum::<f64>();
        base * self.prestige_multiplier()
    }

    /// Cost of the next copy: floor(base × mult^owned).
    pub fn upgrade_cost(&self, def: &UpgradeDef) -> f64 {
        (def.base_cost * def.cost_multiplier.powi(self.owned(def.id) as i32)).floor()
    }

    /// Whether an upgrade's lifetime-candy unlock threshold has been met.
    pub fn upgrade_unlocked(&self, def: &UpgradeDef) -> bool {
        self.lifetime_candy >= def.unlock_at
    }

    pub fn can_ascend(&self) -> bool {
        self.total_upgrade_count() >= 500 || self.lifetime_candy >= 10_000_000.0
    }
}
