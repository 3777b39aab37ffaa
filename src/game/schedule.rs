//! One-shot delayed effects.
//!
//! Everything the original UI would have deferred with a timer — speech
//! bubbles clearing, banners dismissing, the ascension flash — goes through a
//! single priority queue keyed by tick, so the simulation stays deterministic
//! and survives frame-rate changes.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Ticks a speech bubble stays up before clearing.
pub const SPEECH_TICKS: u64 = 60;
/// Delay before the second half of a social exchange.
pub const REPLY_DELAY_TICKS: u64 = 20;
/// How long a manually-triggered greeting stays up.
pub const GREETING_TICKS: u64 = 50;
/// Milestone banner lifetime.
pub const BANNER_TICKS: u64 = 60;
/// Delay between confirming ascension and the reset landing.
pub const ASCEND_DELAY_TICKS: u64 = 15;
/// Post-reset flash duration.
pub const ASCEND_FLASH_TICKS: u64 = 10;
/// Delay between confirming surrender and the wipe.
pub const SURRENDER_DELAY_TICKS: u64 = 20;
/// How long the post-onboarding welcome stays up.
pub const WELCOME_TICKS: u64 = 30;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Effect {
    /// Clear a companion's speech, but only if `seq` still matches (a newer
    /// line supersedes the pending clear).
    ClearSpeech { companion: u64, seq: u32 },
    /// Deliver the reply half of a social exchange.
    Reply { companion: u64, text: String },
    DismissBanner,
    CompleteAscension,
    EndAscensionFlash,
    CompleteSurrender,
    HideWelcome,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    due: u64,
    /// Insertion order; breaks ties so same-tick effects fire FIFO.
    seq: u64,
    effect: Effect,
}

/// Min-heap of pending effects, ordered by due tick.
pub struct EffectQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    next_seq: u64,
}

impl EffectQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, due: u64, effect: Effect) {
        self.heap.push(Reverse(Entry {
            due,
            seq: self.next_seq,
            effect,
        }));
        self.next_seq += 1;
    }

    /// Pop every effect due at or before `now`, in (due, insertion) order.
    pub fn drain_due(&mut self, now: u64) -> Vec<Effect> {
        let mut out = Vec::new();
        while self.heap.peek().map_or(false, |Reverse(e)| e.due <= now) {
            if let Some(Reverse(e)) = self.heap.pop() {
                out.push(e.effect);
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
