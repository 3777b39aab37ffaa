//! Fire-and-forget sound cues.
//!
//! Cues are keyed by event kind and synthesized through the Web Audio API as
//! short oscillator + gain envelopes. Audio never feeds back into game state.
//! On non-wasm targets the service records cues so tests can assert which
//! sounds an interaction produced.

/// Every sound the game can make.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    /// Core tap: bright transient plus a low body thump.
    Tap,
    /// Rim variant for rapid taps.
    TapRim,
    /// One typewriter keystroke during the intro prompt.
    Typewriter,
    /// Harsher typewriter with a low thud (warning / surrender).
    OminousTypewriter,
    /// Generic UI confirmation blip.
    UiBlip,
    /// Two-note success chime (achievements, milestones, skins).
    Chime,
    /// Rising four-note arpeggio when a companion appears.
    FairyArpeggio,
}

pub struct AudioService {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<web_sys::AudioContext>,
    /// Cues played this session, recorded for assertions.
    #[cfg(not(target_arch = "wasm32"))]
    pub played: Vec<SoundCue>,
}

impl AudioService {
    pub fn new() -> Self {
        Self {
            #[cfg(target_arch = "wasm32")]
            ctx: None,
            #[cfg(not(target_arch = "wasm32"))]
            played: Vec::new(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&mut self, cue: SoundCue) {
        self.played.push(cue);
    }

    /// Synthesize a cue. The context is created lazily on first use, which
    /// must happen inside a user gesture per browser autoplay policy — the
    /// onboarding audio gate guarantees that ordering.
    #[cfg(target_arch = "wasm32")]
    pub fn play(&mut self, cue: SoundCue) {
        if self.ctx.is_none() {
            self.ctx = web_sys::AudioContext::new().ok();
        }
        let Some(ctx) = &self.ctx else { return };
        let _ = ctx.resume();

        use web_sys::OscillatorType::{Sine, Square, Triangle};
        match cue {
            SoundCue::Tap => {
                tone(ctx, Sine, 3200.0, Some(1600.0), 0.2, 0.0, 0.02);
                tone(ctx, Triangle, 120.0, Some(80.0), 0.15, 0.0, 0.05);
            }
            SoundCue::TapRim => {
                tone(ctx, Sine, 4500.0, None, 0.15, 0.0, 0.015);
            }
            SoundCue::Typewriter => {
                tone(ctx, Sine, 1800.0, Some(800.0), 0.04, 0.0, 0.03);
            }
            SoundCue::OminousTypewriter => {
                tone(ctx, Square, 1800.0, Some(800.0), 0.05, 0.0, 0.03);
                tone(ctx, Sine, 60.0, None, 0.05, 0.0, 0.1);
            }
            SoundCue::UiBlip => {
                tone(ctx, Sine, 880.0, Some(440.0), 0.1, 0.0, 0.08);
            }
            SoundCue::Chime => {
                tone(ctx, Sine, 659.25, None, 0.1, 0.0, 0.3);
                tone(ctx, Sine, 830.61, None, 0.1, 0.05, 0.3);
            }
            SoundCue::FairyArpeggio => {
                for (i, freq) in [880.0, 1100.0, 1320.0, 1760.0].into_iter().enumerate() {
                    tone(ctx, Sine, freq, None, 0.08, i as f64 * 0.06, 0.15);
                }
            }
        }
    }
}

/// One oscillator voice with an exponential decay envelope, optionally
/// sweeping pitch. All Web Audio failures are ignored; audio is
/// fire-and-forget.
#[cfg(target_arch = "wasm32")]
fn tone(
    ctx: &web_sys::AudioContext,
    shape: web_sys::OscillatorType,
    freq: f32,
    sweep_to: Option<f32>,
    gain: f32,
    delay: f64,
    duration: f64,
) {
    let Ok(osc) = ctx.create_oscillator() else {
        return;
    };
    let Ok(amp) = ctx.create_gain() else {
        return;
    };

    osc.set_type(shape);
    let start = ctx.current_time() + delay;
    let _ = osc.frequency().set_value_at_time(freq, start);
    if let Some(target) = sweep_to {
        let _ = osc
            .frequency()
            .exponential_ramp_to_value_at_time(target, start + duration * 0.6);
    }
    let _ = amp.gain().set_value_at_time(gain, start);
    let _ = amp
        .gain()
        .exponential_ramp_to_value_at_time(0.001, start + duration);

    if osc.connect_with_audio_node(&amp).is_err() {
        return;
    }
    if amp.connect_with_audio_node(&ctx.destination()).is_err() {
        return;
    }
    let _ = osc.start_with_when(start);
    let _ = osc.stop_with_when(start + duration + 0.05);
}
