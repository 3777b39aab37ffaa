//! Session orchestration: onboarding phases, tab navigation, input dispatch,
//! the tick pump, and scheduled-effect application.

pub mod actions;
pub mod companion;
pub mod content;
pub mod logic;
pub mod render;
pub mod save;
pub mod schedule;
pub mod state;

#[cfg(test)]
mod simulator;

use crate::audio::{AudioService, SoundCue};
use crate::input::InputEvent;
use crate::game::logic::PurchaseOutcome;
use crate::game::save::OfflineReport;
use crate::game::schedule::{Effect, EffectQueue};
use crate::game::state::{DeviceMode, GameState, Viewport};

const NAME_MAX_CHARS: usize = 20;

/// Onboarding state machine. Audio must be unlocked by a gesture before any
/// cue can play, so the gate always comes first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first user gesture.
    AudioGate,
    /// The intro prompt types itself out; `ready` once fully shown.
    TypingPrompt { shown: usize, ready: bool },
    /// The malfunction screen: pulse the button `WARNING_TAPS` times.
    WarningPulse { taps: u32 },
    /// Normal play.
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Core,
    Shop,
    Magic,
    Stats,
    Fun,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Core, Tab::Shop, Tab::Magic, Tab::Stats, Tab::Fun]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Core => "Core",
            Tab::Shop => "Shop",
            Tab::Magic => "Magic",
            Tab::Stats => "Stats",
            Tab::Fun => "Fun",
        }
    }

    pub fn action_id(&self) -> u16 {
        match self {
            Tab::Core => actions::TAB_CORE,
            Tab::Shop => actions::TAB_SHOP,
            Tab::Magic => actions::TAB_MAGIC,
            Tab::Stats => actions::TAB_STATS,
            Tab::Fun => actions::TAB_FUN,
        }
    }
}

pub struct CandyGame {
    pub state: GameState,
    pub phase: Phase,
    pub tab: Tab,
    /// Ticks since boot; the base for every scheduled effect.
    pub total_ticks: u64,
    /// Wall-clock millis at boot. Combined with ticks this gives the logic a
    /// monotonic clock without touching `Date.now()` outside the shell.
    epoch_ms: f64,
    fx: EffectQueue,
    pub audio: AudioService,
    seen_milestones: Vec<bool>,
    pub banner: Option<&'static str>,
    pub offline_report: Option<OfflineReport>,
    pub confirming_ascend: bool,
    pub confirming_surrender: bool,
    /// Between confirmation and the reset landing.
    pub ascending: bool,
    pub ascend_flash: bool,
    pub surrendering: bool,
    pub welcome: bool,
    pub editing_name: bool,
    pub oracle_index: usize,
}

impl CandyGame {
    pub fn new(seed: u32, now_ms: f64) -> Self {
        Self {
            state: GameState::new(seed, now_ms),
            phase: Phase::AudioGate,
            tab: Tab::Core,
            total_ticks: 0,
            epoch_ms: now_ms,
            fx: EffectQueue::new(),
            audio: AudioService::new(),
            seen_milestones: vec![false; content::MILESTONES.len()],
            banner: None,
            offline_report: None,
            confirming_ascend: false,
            confirming_surrender: false,
            ascending: false,
            ascend_flash: false,
            surrendering: false,
            welcome: false,
            editing_name: false,
            oracle_index: 0,
        }
    }

    /// Create a session, restoring any persisted save. A returning player
    /// skips onboarding and gets offline earnings credited immediately.
    pub fn boot(now_ms: f64) -> Self {
        let seed = (now_ms as u64 as u32) ^ 0xc0ff_ee11;
        #[allow(unused_mut)]
        let mut game = Self::new(seed, now_ms);
        #[cfg(target_arch = "wasm32")]
        {
            if save::load_game(&mut game.state) && game.state.onboarded {
                game.phase = Phase::Active;
                game.offline_report = save::apply_offline(&mut game.state, now_ms);
                save::save_game(&game.state);
            }
        }
        game
    }

    /// The logic clock: boot epoch plus elapsed ticks. Wall time is read
    /// only at boot and in the shell's frame callback.
    pub fn now_ms(&self) -> f64 {
        self.epoch_ms + self.total_ticks as f64 * 100.0
    }

    /// Write-through persistence. Every call stamps the save time.
    fn persist(&mut self) {
        self.state.last_saved_ms = self.now_ms();
        #[cfg(target_arch = "wasm32")]
        save::save_game(&self.state);
    }

    /// Track the terminal size; companion space is derived from it. Until
    /// onboarding ends, the device layout follows the terminal width.
    pub fn set_viewport(&mut self, cols: u16, rows: u16) {
        self.state.viewport = Viewport::from_cells(cols, rows);
        if self.state.device_mode_inferred && !self.state.onboarded {
            self.state.device_mode = DeviceMode::infer(cols);
        }
    }

    pub fn handle_input(&mut self, event: InputEvent) {
        match self.phase {
            Phase::AudioGate => {
                // Any gesture unlocks audio and starts the intro.
                self.audio.play(SoundCue::Typewriter);
                self.phase = Phase::TypingPrompt {
                    shown: 0,
                    ready: false,
                };
            }
            Phase::TypingPrompt { ready, .. } => {
                if ready && event == InputEvent::Click(actions::INTRO_YES) {
                    self.audio.play(SoundCue::OminousTypewriter);
                    self.phase = Phase::WarningPulse { taps: 0 };
                }
            }
            Phase::WarningPulse { taps } => {
                if event == InputEvent::Click(actions::WARNING_PULSE) {
                    let taps = taps + 1;
                    if taps >= content::WARNING_TAPS {
                        self.complete_awakening();
                    } else {
                        self.audio.play(SoundCue::Typewriter);
                        self.phase = Phase::WarningPulse { taps };
                    }
                }
            }
            Phase::Active => self.handle_active(event),
        }
    }

    fn complete_awakening(&mut self) {
        self.audio.play(SoundCue::Chime);
        self.state.onboarded = true;
        self.phase = Phase::Active;
        self.welcome = true;
        self.fx.schedule(
            self.total_ticks + schedule::WELCOME_TICKS,
            Effect::HideWelcome,
        );
        self.persist();
    }

    fn handle_active(&mut self, event: InputEvent) {
        if self.ascending || self.surrendering {
            return;
        }

        if self.editing_name {
            match event {
                InputEvent::Key(c) => {
                    if !c.is_control() && self.state.player_name.chars().count() < NAME_MAX_CHARS {
                        self.state.player_name.push(c);
                    }
                }
                InputEvent::Backspace => {
                    self.state.player_name.pop();
                }
                InputEvent::Escape | InputEvent::Click(_) => {
                    self.editing_name = false;
                    if self.state.player_name.is_empty() {
                        self.state.player_name = "Nameless Hero".to_string();
                    }
                    self.persist();
                }
            }
            return;
        }

        let id = match event {
            InputEvent::Click(id) => id,
            InputEvent::Escape => {
                self.confirming_ascend = false;
                self.confirming_surrender = false;
                return;
            }
            _ => return,
        };

        match id {
            actions::TAP_CORE => {
                let cue = if self.state.click_flash > 0 {
                    SoundCue::TapRim
                } else {
                    SoundCue::Tap
                };
                self.audio.play(cue);
                logic::tap(&mut self.state);
                self.persist();
            }
            actions::TAB_CORE => self.tab = Tab::Core,
            actions::TAB_SHOP => self.tab = Tab::Shop,
            actions::TAB_MAGIC => self.tab = Tab::Magic,
            actions::TAB_STATS => self.tab = Tab::Stats,
            actions::TAB_FUN => self.tab = Tab::Fun,
            actions::ASCEND => {
                if self.state.can_ascend() {
                    self.confirming_ascend = true;
                }
            }
            actions::CONFIRM_ASCEND => {
                self.confirming_ascend = false;
                self.ascending = true;
                self.audio.play(SoundCue::OminousTypewriter);
                self.fx.schedule(
                    self.total_ticks + schedule::ASCEND_DELAY_TICKS,
                    Effect::CompleteAscension,
                );
            }
            actions::CANCEL_ASCEND => self.confirming_ascend = false,
            actions::SURRENDER => self.confirming_surrender = true,
            actions::CONFIRM_SURRENDER => {
                self.confirming_surrender = false;
                self.surrendering = true;
                self.audio.play(SoundCue::OminousTypewriter);
                self.fx.schedule(
                    self.total_ticks + schedule::SURRENDER_DELAY_TICKS,
                    Effect::CompleteSurrender,
                );
            }
            actions::CANCEL_SURRENDER => self.confirming_surrender = false,
            actions::NEXT_ORACLE => {
                self.oracle_index = (self.oracle_index + 1) % content::ORACLE_PHRASES.len();
                self.audio.play(SoundCue::UiBlip);
            }
            actions::EDIT_NAME => self.editing_name = true,
            actions::DISMISS_OFFLINE => {
                self.offline_report = None;
                self.audio.play(SoundCue::UiBlip);
            }
            actions::DISMISS_BANNER => {
                self.banner = None;
                self.audio.play(SoundCue::UiBlip);
            }
            // Dialog bodies register this to swallow the tap.
            actions::NOOP => {}
            id if (actions::BUY_UPGRADE_BASE
                ..actions::BUY_UPGRADE_BASE + content::UPGRADES.len() as u16)
                .contains(&id) =>
            {
                let def = &content::UPGRADES[(id - actions::BUY_UPGRADE_BASE) as usize];
                match logic::purchase(&mut self.state, def.id, &mut self.fx, self.total_ticks) {
                    PurchaseOutcome::Bought { summoned } => {
                        self.audio.play(SoundCue::UiBlip);
                        if summoned {
                            self.audio.play(SoundCue::FairyArpeggio);
                        }
                        self.persist();
                    }
                    PurchaseOutcome::TooExpensive
                    | PurchaseOutcome::Locked
                    | PurchaseOutcome::UnknownUpgrade => {}
                }
            }
            id if (actions::SET_MODE_BASE..actions::SET_MODE_BASE + 3).contains(&id) => {
                self.state.device_mode =
                    DeviceMode::from_index((id - actions::SET_MODE_BASE) as usize);
                self.state.device_mode_inferred = false;
                self.audio.play(SoundCue::UiBlip);
                self.persist();
            }
            id if (actions::SET_SKIN_BASE..actions::SET_SKIN_BASE + content::SKINS.len() as u16)
                .contains(&id) =>
            {
                self.state.skin =
                    content::SKINS[(id - actions::SET_SKIN_BASE) as usize].to_string();
                self.audio.play(SoundCue::Chime);
                self.persist();
            }
            id if id >= actions::COMPANION_BASE => {
                self.tap_companion((id - actions::COMPANION_BASE) as usize);
            }
            _ => {}
        }
    }

    /// Tapping a companion dismisses its bubble, or prompts a fresh greeting
    /// if it was quiet.
    fn tap_companion(&mut self, index: usize) {
        let Some(c) = self.state.companions.get_mut(index) else {
            return;
        };
        if c.speech.is_some() {
            c.speech = None;
            c.speech_seq += 1;
            self.audio.play(SoundCue::UiBlip);
        } else {
            c.speech = Some(format!("Hello, I'm {}... and {} years old!", c.name, c.age));
            c.speech_seq += 1;
            let clear = Effect::ClearSpeech {
                companion: c.id,
                seq: c.speech_seq,
            };
            self.fx
                .schedule(self.total_ticks + schedule::GREETING_TICKS, clear);
            self.audio.play(SoundCue::FairyArpeggio);
        }
    }

    /// Advance the session by a batch of ticks from the fixed-step clock.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        self.total_ticks += delta_ticks as u64;

        match self.phase {
            Phase::TypingPrompt { shown, ready } if !ready => {
                let len = content::PROMPT_TEXT.chars().count();
                let shown = (shown + delta_ticks as usize).min(len);
                if shown > 0 {
                    self.audio.play(SoundCue::Typewriter);
                }
                self.phase = Phase::TypingPrompt {
                    shown,
                    ready: shown == len,
                };
            }
            Phase::Active => {
                let events =
                    logic::tick(&mut self.state, delta_ticks, self.total_ticks, &mut self.fx);
                if events.achievements_unlocked > 0 {
                    self.audio.play(SoundCue::Chime);
                }
                self.check_milestones();
                self.persist();
            }
            _ => {}
        }

        for effect in self.fx.drain_due(self.total_ticks) {
            self.apply_effect(effect);
        }
    }

    /// Announce at most one newly crossed milestone per batch; the rest
    /// follow on later ticks so banners never pile up.
    fn check_milestones(&mut self) {
        for (i, m) in content::MILESTONES.iter().enumerate() {
            if self.seen_milestones[i] {
                continue;
            }
            let value = match m.metric {
                content::Metric::Taps => self.state.clicks as f64,
                content::Metric::Lifetime => self.state.lifetime_candy,
            };
            if value >= m.threshold {
                self.seen_milestones[i] = true;
                self.banner = Some(m.message);
                self.audio.play(SoundCue::Chime);
                self.fx.schedule(
                    self.total_ticks + schedule::BANNER_TICKS,
                    Effect::DismissBanner,
                );
                break;
            }
        }
    }

    fn apply_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ClearSpeech { companion, seq } => {
                if let Some(c) = self.state.companions.iter_mut().find(|c| c.id == companion) {
                    // A newer line owns the bubble now; leave it alone.
                    if c.speech_seq == seq {
                        c.speech = None;
                    }
                }
            }
            Effect::Reply { companion, text } => {
                if let Some(c) = self.state.companions.iter_mut().find(|c| c.id == companion) {
                    c.speech = Some(text);
                    c.speech_seq += 1;
                    self.fx.schedule(
                        self.total_ticks + schedule::SPEECH_TICKS,
                        Effect::ClearSpeech {
                            companion,
                            seq: c.speech_seq,
                        },
                    );
                }
            }
            Effect::DismissBanner => self.banner = None,
            Effect::CompleteAscension => {
                if logic::ascend(&mut self.state) {
                    self.ascend_flash = true;
                    self.fx.schedule(
                        self.total_ticks + schedule::ASCEND_FLASH_TICKS,
                        Effect::EndAscensionFlash,
                    );
                    self.tab = Tab::Core;
                }
                self.ascending = false;
                self.persist();
            }
            Effect::EndAscensionFlash => self.ascend_flash = false,
            Effect::CompleteSurrender => self.surrender_now(),
            Effect::HideWelcome => self.welcome = false,
        }
    }

    /// Full wipe: delete the save and start over with a new identity. The
    /// intro replays, but the audio gate stays unlocked.
    fn surrender_now(&mut self) {
        #[cfg(target_arch = "wasm32")]
        save::delete_save();

        let seed = self.state.rng.next_u32();
        let viewport = self.state.viewport;
        self.state = GameState::new(seed, self.now_ms());
        self.state.viewport = viewport;

        self.fx.clear();
        self.seen_milestones = vec![false; content::MILESTONES.len()];
        self.banner = None;
        self.offline_report = None;
        self.confirming_ascend = false;
        self.confirming_surrender = false;
        self.ascending = false;
        self.ascend_flash = false;
        self.surrendering = false;
        self.welcome = false;
        self.editing_name = false;
        self.oracle_index = 0;
        self.tab = Tab::Core;
        self.phase = Phase::TypingPrompt {
            shown: 0,
            ready: false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booted() -> CandyGame {
        let mut game = CandyGame::new(42, 0.0);
        game.set_viewport(80, 50);
        game
    }

    /// Drive a fresh session through the whole onboarding flow.
    fn onboard(game: &mut CandyGame) {
        game.handle_input(InputEvent::Click(actions::AWAKEN_AUDIO));
        // Let the prompt finish typing
        game.tick(content::PROMPT_TEXT.chars().count() as u32 + 5);
        game.handle_input(InputEvent::Click(actions::INTRO_YES));
        for _ in 0..content::WARNING_TAPS {
            game.handle_input(InputEvent::Click(actions::WARNING_PULSE));
        }
    }

    #[test]
    fn onboarding_walks_all_phases() {
        let mut game = booted();
        assert_eq!(game.phase, Phase::AudioGate);

        game.handle_input(InputEvent::Click(actions::AWAKEN_AUDIO));
        assert!(matches!(game.phase, Phase::TypingPrompt { .. }));

        // The yes button is inert until the prompt finishes typing
        game.handle_input(InputEvent::Click(actions::INTRO_YES));
        assert!(matches!(game.phase, Phase::TypingPrompt { .. }));

        game.tick(content::PROMPT_TEXT.chars().count() as u32 + 5);
        assert!(matches!(game.phase, Phase::TypingPrompt { ready: true, .. }));

        game.handle_input(InputEvent::Click(actions::INTRO_YES));
        assert!(matches!(game.phase, Phase::WarningPulse { taps: 0 }));

        for _ in 0..content::WARNING_TAPS - 1 {
            game.handle_input(InputEvent::Click(actions::WARNING_PULSE));
        }
        assert!(matches!(game.phase, Phase::WarningPulse { taps: 19 }));
        assert!(!game.state.onboarded);

        game.handle_input(InputEvent::Click(actions::WARNING_PULSE));
        assert_eq!(game.phase, Phase::Active);
        assert!(game.state.onboarded);
        assert!(game.welcome);

        // Welcome hides on schedule
        game.tick(schedule::WELCOME_TICKS as u32 + 1);
        assert!(!game.welcome);
    }

    #[test]
    fn core_taps_earn_and_flash() {
        let mut game = booted();
        onboard(&mut game);
        game.handle_input(InputEvent::Click(actions::TAP_CORE));
        game.handle_input(InputEvent::Click(actions::TAP_CORE));
        assert_eq!(game.state.clicks, 2);
        assert_eq!(game.state.candy, 2.0);
        // Second rapid tap takes the rim sound
        assert!(game.audio.played.contains(&SoundCue::TapRim));
    }

    #[test]
    fn milestone_banner_appears_and_self_dismisses() {
        let mut game = booted();
        onboard(&mut game);
        game.state.clicks = 100;
        game.tick(1);
        assert_eq!(
            game.banner,
            Some("COSMIC SENSORS: ANOMALY DETECTED. SUGAR LEVELS RISING.")
        );
        game.tick(schedule::BANNER_TICKS as u32 + 1);
        assert_eq!(game.banner, None);

        // Crossing it again does not re-announce
        game.tick(1);
        assert_eq!(game.banner, None);
    }

    #[test]
    fn milestones_announce_one_at_a_time() {
        let mut game = booted();
        onboard(&mut game);
        game.state.clicks = 2000;
        game.state.lifetime_candy = 6000.0;
        game.tick(1);
        let first = game.banner;
        assert!(first.is_some());
        game.tick(schedule::BANNER_TICKS as u32 + 1);
        game.tick(1);
        assert!(game.banner.is_some());
        assert_ne!(game.banner, first);
    }

    #[test]
    fn buy_through_click_dispatch() {
        let mut game = booted();
        onboard(&mut game);
        game.state.candy = 200.0;
        game.state.lifetime_candy = 200.0;
        // sugar_pixie is UPGRADES[3]
        game.handle_input(InputEvent::Click(actions::BUY_UPGRADE_BASE + 3));
        assert_eq!(game.state.owned("sugar_pixie"), 1);
        assert_eq!(game.state.companions.len(), 1);
        assert!(game.audio.played.contains(&SoundCue::FairyArpeggio));
    }

    #[test]
    fn ascension_confirms_then_lands_after_delay() {
        let mut game = booted();
        onboard(&mut game);
        game.state.lifetime_candy = 10_000_000.0;
        game.state.candy = 500.0;

        game.handle_input(InputEvent::Click(actions::ASCEND));
        assert!(game.confirming_ascend);
        game.handle_input(InputEvent::Click(actions::CONFIRM_ASCEND));
        assert!(game.ascending);
        // Input is frozen during the transition
        game.handle_input(InputEvent::Click(actions::TAP_CORE));
        assert_eq!(game.state.clicks, 0);

        game.tick(schedule::ASCEND_DELAY_TICKS as u32 + 1);
        assert!(!game.ascending);
        assert!(game.ascend_flash);
        assert_eq!(game.state.prestige_level, 1);
        assert_eq!(game.state.candy, 0.0);
        assert_eq!(game.state.lifetime_candy, 10_000_000.0);

        game.tick(schedule::ASCEND_FLASH_TICKS as u32 + 1);
        assert!(!game.ascend_flash);
    }

    #[test]
    fn ascend_button_inert_below_threshold() {
        let mut game = booted();
        onboard(&mut game);
        game.handle_input(InputEvent::Click(actions::ASCEND));
        assert!(!game.confirming_ascend);
    }

    #[test]
    fn surrender_wipes_to_a_new_intro() {
        let mut game = booted();
        onboard(&mut game);
        game.state.candy = 999.0;
        game.state.clicks = 50;

        game.handle_input(InputEvent::Click(actions::SURRENDER));
        game.handle_input(InputEvent::Click(actions::CONFIRM_SURRENDER));
        assert!(game.surrendering);
        game.tick(schedule::SURRENDER_DELAY_TICKS as u32 + 1);

        assert!(matches!(game.phase, Phase::TypingPrompt { shown: 0, .. }));
        assert_eq!(game.state.candy, 0.0);
        assert_eq!(game.state.clicks, 0);
        assert!(!game.state.onboarded);
    }

    #[test]
    fn escape_cancels_confirmations() {
        let mut game = booted();
        onboard(&mut game);
        game.handle_input(InputEvent::Click(actions::SURRENDER));
        assert!(game.confirming_surrender);
        game.handle_input(InputEvent::Escape);
        assert!(!game.confirming_surrender);
    }

    #[test]
    fn rename_caps_length_and_persists_on_escape() {
        let mut game = booted();
        onboard(&mut game);
        game.handle_input(InputEvent::Click(actions::EDIT_NAME));
        assert!(game.editing_name);
        for _ in 0..NAME_MAX_CHARS {
            game.handle_input(InputEvent::Backspace);
        }
        for c in "Supercalifragilistically".chars() {
            game.handle_input(InputEvent::Key(c));
        }
        assert_eq!(game.state.player_name.chars().count(), NAME_MAX_CHARS);
        game.handle_input(InputEvent::Escape);
        assert!(!game.editing_name);
    }

    #[test]
    fn empty_rename_falls_back() {
        let mut game = booted();
        onboard(&mut game);
        game.handle_input(InputEvent::Click(actions::EDIT_NAME));
        for _ in 0..NAME_MAX_CHARS + 5 {
            game.handle_input(InputEvent::Backspace);
        }
        game.handle_input(InputEvent::Escape);
        assert_eq!(game.state.player_name, "Nameless Hero");
    }

    #[test]
    fn skin_change_unlocks_achievement_next_tick() {
        let mut game = booted();
        onboard(&mut game);
        game.handle_input(InputEvent::Click(actions::SET_SKIN_BASE + 1)); // 🍭
        assert_eq!(game.state.skin, "🍭");
        game.tick(1);
        assert!(game.state.has_achievement("skin_collector"));
    }

    #[test]
    fn device_mode_click_overrides_inference() {
        let mut game = booted();
        onboard(&mut game);
        game.handle_input(InputEvent::Click(actions::SET_MODE_BASE + 2));
        assert_eq!(game.state.device_mode, DeviceMode::Laptop);
        assert!(!game.state.device_mode_inferred);
        // Viewport changes no longer flip the mode
        game.set_viewport(40, 60);
        assert_eq!(game.state.device_mode, DeviceMode::Laptop);
    }

    #[test]
    fn tapping_quiet_companion_greets_then_clears() {
        let mut game = booted();
        onboard(&mut game);
        game.state.candy = 200.0;
        game.state.lifetime_candy = 200.0;
        game.handle_input(InputEvent::Click(actions::BUY_UPGRADE_BASE + 3));
        // Park the companion on a long walk so it cannot arrive (and speak)
        // while the scheduled clear is in flight
        game.state.companions[0].x = 100.0;
        game.state.companions[0].y = 600.0;
        game.state.companions[0].target_x = 540.0;
        game.state.companions[0].target_y = 600.0;

        // Dismiss the spawn greeting, then ask for another
        game.handle_input(InputEvent::Click(actions::COMPANION_BASE));
        assert_eq!(game.state.companions[0].speech, None);
        game.handle_input(InputEvent::Click(actions::COMPANION_BASE));
        assert!(game.state.companions[0].speech.is_some());

        game.tick(schedule::GREETING_TICKS as u32 + 1);
        assert_eq!(game.state.companions[0].speech, None);
    }

    #[test]
    fn stale_speech_clear_does_not_eat_newer_line() {
        let mut game = booted();
        onboard(&mut game);
        game.state.candy = 200.0;
        game.state.lifetime_candy = 200.0;
        game.handle_input(InputEvent::Click(actions::BUY_UPGRADE_BASE + 3));
        game.state.companions[0].x = 100.0;
        game.state.companions[0].y = 600.0;
        game.state.companions[0].target_x = 540.0;
        game.state.companions[0].target_y = 600.0;

        // Replace the greeting right before its clear would fire
        game.tick(schedule::GREETING_TICKS as u32 - 5);
        game.handle_input(InputEvent::Click(actions::COMPANION_BASE)); // dismiss
        game.handle_input(InputEvent::Click(actions::COMPANION_BASE)); // new greeting
        game.tick(20); // old clear's due tick passes
        assert!(
            game.state.companions[0].speech.is_some(),
            "stale clear wiped the newer bubble"
        );
    }

    #[test]
    fn high_companion_indices_stay_clear_of_overlay_actions() {
        let mut game = booted();
        onboard(&mut game);
        for i in 0..101u64 {
            game.state.companions.push(crate::game::state::Companion {
                id: i + 1,
                name: format!("Fairy {i}"),
                age: 100,
                emoji: "🧚".into(),
                x: 100.0,
                y: 600.0,
                target_x: 540.0,
                target_y: 600.0,
                speech: None,
                speech_seq: 0,
            });
        }
        game.state.next_companion_id = 102;
        game.offline_report = Some(OfflineReport {
            earned: 9.0,
            away: "11s".into(),
        });
        game.banner = Some("SUGAR LEVELS RISING");

        // Companions 100 and 101 greet; no overlay gets dismissed
        game.handle_input(InputEvent::Click(actions::COMPANION_BASE + 100));
        game.handle_input(InputEvent::Click(actions::COMPANION_BASE + 101));
        assert!(game.state.companions[100].speech.is_some());
        assert!(game.offline_report.is_some());
        assert!(game.banner.is_some());
    }

    #[test]
    fn offline_overlay_dismisses() {
        let mut game = booted();
        game.offline_report = Some(OfflineReport {
            earned: 250.0,
            away: "2m 5s".into(),
        });
        game.phase = Phase::Active;
        game.state.onboarded = true;
        game.handle_input(InputEvent::Click(actions::DISMISS_OFFLINE));
        assert_eq!(game.offline_report, None);
    }

    #[test]
    fn oracle_cycles_through_phrases() {
        let mut game = booted();
        onboard(&mut game);
        for _ in 0..content::ORACLE_PHRASES.len() {
            game.handle_input(InputEvent::Click(actions::NEXT_ORACLE));
        }
        assert_eq!(game.oracle_index, 0);
    }

    #[test]
    fn logic_clock_advances_with_ticks_only() {
        let mut game = CandyGame::new(1, 5_000.0);
        assert_eq!(game.now_ms(), 5_000.0);
        game.tick(30);
        assert_eq!(game.now_ms(), 8_000.0);
    }
}
