//! Fixed-timestep game clock using an accumulator.
//!
//! `draw_web()` fires at ~60fps with a variable delta. `GameTime` folds that
//! into a fixed number of discrete ticks per second so the simulation stays
//! deterministic and testable without wall-clock waits.

pub struct GameTime {
    /// Milliseconds per tick (100ms = 10 ticks/sec).
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks.
    accumulator: f64,
    /// Total elapsed ticks since creation.
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None on the first frame.
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec as f64,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp (`Date.now()` or similar) once per frame.
    /// Returns the number of whole ticks to process this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            // Clamp to avoid a spiral of death after a backgrounded tab
            Some(prev) => (now_ms - prev).clamp(0.0, 500.0),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
