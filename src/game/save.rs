//! Persistence: one JSON blob in localStorage under a fixed key.
//!
//! Saves are written through on every mutation and tick batch. Every storage
//! failure is non-fatal: a warning on the console and the session carries on
//! in memory. Unknown fields in old blobs are ignored and missing fields
//! default, so the format evolves without a version number.

use serde::{Deserialize, Serialize};

use crate::game::state::{Companion, DeviceMode, GameState, SimpleRng};

pub const STORAGE_KEY: &str = "candy_crusher_restored_save";

/// Minimum away time before offline earnings are granted.
const OFFLINE_MIN_SECS: f64 = 10.0;

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct CompanionSave {
    pub id: u64,
    pub name: String,
    pub age: u32,
    pub emoji: String,
    pub x: f64,
    pub y: f64,
    pub target_x: f64,
    pub target_y: f64,
}

#[derive(Serialize, Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct SaveData {
    pub candy: f64,
    pub lifetime_candy: f64,
    pub clicks: u64,
    pub upgrades: std::collections::BTreeMap<String, u32>,
    pub unlocked_achievements: Vec<String>,
    pub prestige_level: u32,
    pub companions: Vec<CompanionSave>,
    pub next_companion_id: u64,
    pub player_name: String,
    pub skin: String,
    pub device_mode: u8,
    pub last_saved_ms: f64,
    pub onboarded: bool,
    pub rng_state: u32,
}

/// Snapshot the persistent slice of the state. Speech bubbles and other
/// transients stay behind.
#[cfg(any(target_arch = "wasm32", test))]
pub fn extract_save(state: &GameState) -> SaveData {
    SaveData {
        candy: state.candy,
        lifetime_candy: state.lifetime_candy,
        clicks: state.clicks,
        upgrades: state.upgrades.clone(),
        unlocked_achievements: state.unlocked_achievements.clone(),
        prestige_level: state.prestige_level,
        companions: state
            .companions
            .iter()
            .map(|c| CompanionSave {
                id: c.id,
                name: c.name.clone(),
                age: c.age,
                emoji: c.emoji.clone(),
                x: c.x,
                y: c.y,
                target_x: c.target_x,
                target_y: c.target_y,
            })
            .collect(),
        next_companion_id: state.next_companion_id,
        player_name: state.player_name.clone(),
        skin: state.skin.clone(),
        device_mode: state.device_mode.index() as u8,
        last_saved_ms: state.last_saved_ms,
        onboarded: state.onboarded,
        rng_state: state.rng.seed(),
    }
}

/// Overlay a save on a fresh state. Companions return silent; their speech
/// timers did not survive the page unload.
#[cfg(any(target_arch = "wasm32", test))]
pub fn apply_save(state: &mut GameState, save: SaveData) {
    state.candy = save.candy;
    state.lifetime_candy = save.lifetime_candy;
    state.clicks = save.clicks;
    state.upgrades = save.upgrades;
    state.unlocked_achievements = save.unlocked_achievements;
    state.prestige_level = save.prestige_level;
    state.companions = save
        .companions
        .into_iter()
        .map(|c| Companion {
            id: c.id,
            name: c.name,
            age: c.age,
            emoji: c.emoji,
            x: c.x,
            y: c.y,
            target_x: c.target_x,
            target_y: c.target_y,
            speech: None,
            speech_seq: 0,
        })
        .collect();
    state.next_companion_id = save.next_companion_id.max(1);
    if !save.player_name.is_empty() {
        state.player_name = save.player_name;
    }
    if !save.skin.is_empty() {
        state.skin = save.skin;
    }
    state.device_mode = DeviceMode::from_index(save.device_mode as usize);
    state.device_mode_inferred = false;
    state.last_saved_ms = save.last_saved_ms;
    state.onboarded = save.onboarded;
    if save.rng_state != 0 {
        state.rng = SimpleRng::new(save.rng_state);
    }
}

/// What an absence earned, for the welcome-back overlay.
#[derive(Clone, Debug, PartialEq)]
pub struct OfflineReport {
    pub earned: f64,
    pub away: String,
}

/// Grant offline earnings against the production rate at load time, then
/// refresh the save timestamp so re-loading cannot double-grant.
///
/// Sessions that never finished onboarding earn nothing and keep their
/// original timestamp.
pub fn apply_offline(state: &mut GameState, now_ms: f64) -> Option<OfflineReport> {
    if !state.onboarded {
        return None;
    }
    let elapsed_secs = ((now_ms - state.last_saved_ms) / 1000.0).max(0.0);
    state.last_saved_ms = now_ms;

    let rate = state.production_rate();
    if elapsed_secs <= OFFLINE_MIN_SECS || rate <= 0.0 {
        return None;
    }

    let earned = (rate * elapsed_secs).floor();
    state.candy += earned;
    state.lifetime_candy += earned;
    Some(OfflineReport {
        earned,
        away: super::logic::format_duration(elapsed_secs as u64),
    })
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::*;
    use web_sys::console;

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Persist the current state. Failures log and are otherwise ignored.
    pub fn save_game(state: &GameState) {
        let save = extract_save(state);
        let json = match serde_json::to_string(&save) {
            Ok(json) => json,
            Err(err) => {
                console::warn_1(&format!("save serialize failed: {err}").into());
                return;
            }
        };
        let Some(storage) = storage() else { return };
        if storage.set_item(STORAGE_KEY, &json).is_err() {
            console::warn_1(&"save write failed; continuing in memory".into());
        }
    }

    /// Load into `state`. Returns false when no usable save exists; a corrupt
    /// blob is discarded so the next write starts clean.
    pub fn load_game(state: &mut GameState) -> bool {
        let Some(storage) = storage() else {
            return false;
        };
        let Ok(Some(json)) = storage.get_item(STORAGE_KEY) else {
            return false;
        };
        match serde_json::from_str::<SaveData>(&json) {
            Ok(save) => {
                apply_save(state, save);
                true
            }
            Err(err) => {
                console::warn_1(&format!("save parse failed, discarding: {err}").into());
                let _ = storage.remove_item(STORAGE_KEY);
                false
            }
        }
    }

    pub fn delete_save() {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::{delete_save, load_game, save_game};
