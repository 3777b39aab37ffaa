//! Static game content: upgrades, achievements, milestones, and flavor text
//! pools. Balance changes happen here, not in the engine.

use crate::game::state::GameState;

pub const DEFAULT_SKIN: &str = "🍬";

/// Taps required to finish the warning stage of onboarding.
pub const WARNING_TAPS: u32 = 20;

/// Intro prompt typed out one character per tick.
pub const PROMPT_TEXT: &str = "Are You Ready To Save The Universe?";

// ── Upgrades ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Adds passive candy per second per copy owned.
    PerSecond(f64),
    /// Adds candy per manual tap per copy owned.
    PerClick(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Shop,
    Magic,
    Stats,
}

pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub base_cost: f64,
    pub cost_multiplier: f64,
    pub effect: Effect,
    pub emoji: &'static str,
    /// Whether buying one spawns a wandering companion.
    pub summons_companion: bool,
    /// Lifetime-candy threshold before the upgrade is purchasable; listed as
    /// a mystery row until then. Zero means always available.
    pub unlock_at: f64,
    pub category: Category,
}

pub static UPGRADES: &[UpgradeDef] = &[
    UpgradeDef {
        id: "mana_needle",
        name: "Mana Needle",
        description: "Stitches raw sugar into being",
        base_cost: 15.0,
        cost_multiplier: 1.15,
        effect: Effect::PerSecond(0.1),
        emoji: "🧵",
        summons_companion: false,
        unlock_at: 0.0,
        category: Category::Shop,
    },
    UpgradeDef {
        id: "sugar_gauntlet",
        name: "Sugar Gauntlet",
        description: "Each tap lands harder",
        base_cost: 50.0,
        cost_multiplier: 1.3,
        effect: Effect::PerClick(1.0),
        emoji: "🧤",
        summons_companion: false,
        unlock_at: 0.0,
        category: Category::Shop,
    },
    UpgradeDef {
        id: "magic_wand",
        name: "Magic Wand",
        description: "Channels ambient sweetness",
        base_cost: 80.0,
        cost_multiplier: 1.3,
        effect: Effect::PerSecond(0.5),
        emoji: "🪄",
        summons_companion: false,
        unlock_at: 0.0,
        category: Category::Shop,
    },
    UpgradeDef {
        id: "sugar_pixie",
        name: "Sugar Pixie",
        description: "A tiny helper with a big appetite",
        base_cost: 100.0,
        cost_multiplier: 1.15,
        effect: Effect::PerSecond(1.0),
        emoji: "🧚",
        summons_companion: true,
        unlock_at: 0.0,
        category: Category::Magic,
    },
    UpgradeDef {
        id: "peppermint_fairy",
        name: "Peppermint Fairy",
        description: "Cool breeze, fast hands",
        base_cost: 1200.0,
        cost_multiplier: 1.15,
        effect: Effect::PerSecond(10.0),
        emoji: "🧚🏼‍♂️",
        summons_companion: true,
        unlock_at: 500.0,
        category: Category::Magic,
    },
    UpgradeDef {
        id: "candy_fairy",
        name: "Candy Fairy",
        description: "Spins floss out of moonlight",
        base_cost: 15_000.0,
        cost_multiplier: 1.2,
        effect: Effect::PerSecond(20.0),
        emoji: "🧚🏼‍♀️",
        summons_companion: true,
        unlock_at: 5_000.0,
        category: Category::Magic,
    },
    UpgradeDef {
        id: "sovereign_fairy",
        name: "Sovereign Fairy",
        description: "Royalty among the swarm",
        base_cost: 100_000.0,
        cost_multiplier: 1.25,
        effect: Effect::PerSecond(40.0),
        emoji: "🧚🏿‍♀️",
        summons_companion: true,
        unlock_at: 25_000.0,
        category: Category::Magic,
    },
    UpgradeDef {
        id: "crystal_archmage",
        name: "Candy Wizard",
        description: "Transmutes doubt into dessert",
        base_cost: 500_000.0,
        cost_multiplier: 1.2,
        effect: Effect::PerSecond(450.0),
        emoji: "🧙‍♂️",
        summons_companion: true,
        unlock_at: 100_000.0,
        category: Category::Magic,
    },
    UpgradeDef {
        id: "dragon_vault",
        name: "Dragon Vault",
        description: "Hoards compound interest",
        base_cost: 2_000_000.0,
        cost_multiplier: 1.15,
        effect: Effect::PerSecond(1400.0),
        emoji: "🐉",
        summons_companion: false,
        unlock_at: 0.0,
        category: Category::Shop,
    },
    UpgradeDef {
        id: "ant_infestation",
        name: "Candy Ants",
        description: "A million tiny logistics experts",
        base_cost: 10_000_000.0,
        cost_multiplier: 1.5,
        effect: Effect::PerSecond(6500.0),
        emoji: "🐜",
        summons_companion: true,
        unlock_at: 500_000.0,
        category: Category::Magic,
    },
    UpgradeDef {
        id: "empire_monolith",
        name: "Empire Monolith",
        description: "Industrial-scale confection",
        base_cost: 50_000_000.0,
        cost_multiplier: 2.0,
        effect: Effect::PerSecond(25_000.0),
        emoji: "🏢",
        summons_companion: false,
        unlock_at: 2_000_000.0,
        category: Category::Stats,
    },
    UpgradeDef {
        id: "sugar_supercomputer",
        name: "Sugar AI",
        description: "Optimizes the universe for taste",
        base_cost: 250_000_000.0,
        cost_multiplier: 2.5,
        effect: Effect::PerSecond(500_000.0),
        emoji: "💻",
        summons_companion: false,
        unlock_at: 10_000_000.0,
        category: Category::Stats,
    },
    UpgradeDef {
        id: "philosophers_stone",
        name: "Philosopher's Stone",
        description: "The recipe at the bottom of everything",
        base_cost: 1_000_000_000.0,
        cost_multiplier: 1.15,
        effect: Effect::PerSecond(2_000_000.0),
        emoji: "💎",
        summons_companion: false,
        unlock_at: 0.0,
        category: Category::Shop,
    },
];

pub fn upgrade(id: &str) -> Option<&'static UpgradeDef> {
    UPGRADES.iter().find(|u| u.id == id)
}

// ── Achievements ───────────────────────────────────────────────

/// Achievement predicates read the whole state, so any field can gate one.
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub emoji: &'static str,
    pub unlocked: fn(&GameState) -> bool,
}

pub static ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef {
        id: "first_click",
        name: "Awakened",
        description: "Tap the core once",
        emoji: "🌟",
        unlocked: |s| s.clicks >= 1,
    },
    AchievementDef {
        id: "pixie_friend",
        name: "Pixie Friend",
        description: "Summon a sugar pixie",
        emoji: "🧚",
        unlocked: |s| s.owned("sugar_pixie") >= 1,
    },
    AchievementDef {
        id: "fairy_master",
        name: "Fairy Tale",
        description: "Keep a peppermint and a candy fairy",
        emoji: "✨",
        unlocked: |s| s.owned("peppermint_fairy") >= 1 && s.owned("candy_fairy") >= 1,
    },
    AchievementDef {
        id: "sovereign_presence",
        name: "Sovereign Presence",
        description: "Host fairy royalty",
        emoji: "👑",
        unlocked: |s| s.owned("sovereign_fairy") >= 1,
    },
    AchievementDef {
        id: "ant_tamer",
        name: "Lord of the Ants",
        description: "Recruit the candy ants",
        emoji: "🐜",
        unlocked: |s| s.owned("ant_infestation") >= 1,
    },
    AchievementDef {
        id: "click_100",
        name: "Wand Master",
        description: "Tap the core 100 times",
        emoji: "🦾",
        unlocked: |s| s.clicks >= 100,
    },
    AchievementDef {
        id: "cookies_1m",
        name: "Grand Enchanter",
        description: "Earn 1,000,000 candy in total",
        emoji: "🍭",
        unlocked: |s| s.lifetime_candy >= 1_000_000.0,
    },
    AchievementDef {
        id: "skin_collector",
        name: "Skin Switcher",
        description: "Change the core's look",
        emoji: "👗",
        unlocked: |s| s.skin != DEFAULT_SKIN,
    },
];

// ── Milestones ─────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
    Taps,
    Lifetime,
}

pub struct MilestoneDef {
    pub threshold: f64,
    pub metric: Metric,
    pub message: &'static str,
}

/// Session banners, announced at most once per session each, in declaration
/// order when several trip on the same tick.
pub static MILESTONES: &[MilestoneDef] = &[
    MilestoneDef {
        threshold: 100.0,
        metric: Metric::Taps,
        message: "COSMIC SENSORS: ANOMALY DETECTED. SUGAR LEVELS RISING.",
    },
    MilestoneDef {
        threshold: 1000.0,
        metric: Metric::Lifetime,
        message: "U ARE CLOSE TO DEFEATING THE GOBLINS AND SAVING THE UNIVERSE.",
    },
    MilestoneDef {
        threshold: 1000.0,
        metric: Metric::Taps,
        message: "COSMIC DATA: THE VOID IS TREMBLING. REALITY RE-WEAVING IN PROGRESS...",
    },
    MilestoneDef {
        threshold: 5000.0,
        metric: Metric::Lifetime,
        message: "SYSTEM ALERT: THE SOUR DIMENSION IS IN FULL RETREAT.",
    },
    MilestoneDef {
        threshold: 10_000.0,
        metric: Metric::Lifetime,
        message: "ENERGY UPDATE: THE COSMIC ENGINE IS PURRING. UNIVERSE STABILIZING.",
    },
    MilestoneDef {
        threshold: 50_000.0,
        metric: Metric::Lifetime,
        message: "GOBLIN COMMANDER DETECTED. PREPARING SUGAR BOMBARDMENT...",
    },
    MilestoneDef {
        threshold: 100_000.0,
        metric: Metric::Lifetime,
        message: "SECTOR SECURED: THE GOBLINS HAVE FLED TO THE 5TH DIMENSION.",
    },
    MilestoneDef {
        threshold: 1_000_000.0,
        metric: Metric::Lifetime,
        message: "CONFECTIONARY GOD DETECTED: THE UNIVERSE IS SAFE UNDER YOUR RULE.",
    },
];

// ── Flavor pools ───────────────────────────────────────────────

pub static PLAYER_NAMES: &[&str] = &[
    "Cosmic Restorer",
    "Sugar Savior",
    "Candy Alchemist",
    "Star Confectioner",
    "Void Sweetener",
    "Caramel Knight",
    "Nebula Baker",
    "Gumdrop Sage",
    "Licorice Paladin",
    "The Sweetness Guardian",
];

pub static COMPANION_NAMES: &[&str] = &[
    "Astra", "Bonbon", "Clover", "Dewdrop", "Ember", "Fizz", "Glimmer", "Honey", "Iris", "Juniper",
    "Kiwi", "Lumen", "Maple", "Nimbus", "Opal", "Pip", "Quill", "Rosette", "Sprout", "Twinkle",
    "Umbra", "Velvet", "Fern",
];

/// Idle chatter. `{name}` is replaced with the speaker's own name.
pub static COMPANION_PHRASES: &[&str] = &[
    "The sugar winds are kind today.",
    "I dreamt of marshmallow clouds again.",
    "{name} reporting: all sweet on this front!",
    "Do you hear the caramel humming?",
    "My wings are sticky and I love it.",
    "The goblins fear your wand, you know.",
    "I counted the stars. All of them taste pink.",
    "{name} says hello!",
    "Somewhere, a gumdrop is being born.",
    "The void is quieter when you're here.",
    "I once raced a peppermint comet. I lost.",
    "Keep tapping. The universe notices.",
    "{name} found a crumb of stardust!",
    "Sweetness is a renewable resource.",
];

/// Two-line exchanges between companions that bump into each other.
pub static SOCIAL_CONVERSATIONS: &[&[&str]] = &[
    &["Did you see the new candy moon?", "It's gorgeous! Half nougat, I hear."],
    &["I'm exhausted from all the flying.", "Rest on the frosting ridge, it's soft."],
    &["The core is glowing brighter today.", "That's our restorer's doing!"],
    &["Do goblins even like candy?", "They like stealing it, that's all."],
    &["Race you to the taffy fields!", "You're on, slowpoke!"],
    &["I found a cave made of rock candy.", "Take me there after the shift!"],
    &["Have you ever tasted void salt?", "Once. Never again."],
    &["The ants unionized, did you hear?", "Good for them, honestly."],
    &["My wings ache in this weather.", "Warm them by the cocoa springs."],
    &["Is the universe really saved?", "A little more every day."],
];

/// Fortune-cookie lines for the oracle panel.
pub static ORACLE_PHRASES: &[&str] = &[
    "The universe bends toward sweetness.",
    "A tap delayed is a candy denied.",
    "Beware the sour dimension's flattery.",
    "Your wand remembers every click.",
    "Fairies gossip, but kindly.",
    "The monolith dreams in spreadsheets.",
    "Prestige is just practice, remembered.",
    "Somewhere a goblin regrets everything.",
    "The dragon counts your candy too.",
    "Stars are candy that got promoted.",
    "Patience compounds faster than interest.",
    "The ants know the shortest path.",
    "A new skin, a new you.",
    "Even supercomputers crave dessert.",
    "The void is only unsweetened space.",
    "Your next click matters most.",
    "Moonlight is fairy floss, uncollected.",
    "Great empires start with fifteen candy.",
    "Listen: the cosmic engine purrs.",
    "Saving universes is thirsty work.",
    "The stone knows the final recipe.",
];

/// Cosmetic skins for the core.
pub static SKINS: &[&str] = &[
    "🍬", "🍭", "🍩", "🍫", "🧁", "🍪", "🍮", "🍨", "🍯", "🍒", "🍓", "🍑", "🌌", "✨",
];
