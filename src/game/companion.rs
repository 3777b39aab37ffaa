//! Companion wandering in virtual pixel space.
//!
//! Companions pick random targets inside the device margins, walk toward
//! them at a fixed step, and are kept out of a central exclusion circle so
//! they never cover the tappable core.

use crate::game::state::{Companion, Margins, SimpleRng, Viewport};

/// Pixels moved per tick.
pub const STEP: f64 = 1.6;
/// Distance at which a companion counts as arrived.
pub const ARRIVE_DIST: f64 = 10.0;
/// Rejection-sampling cap before falling back to a corner.
const MAX_TARGET_ATTEMPTS: u32 = 1000;

/// Radius of the keep-out circle around the screen center.
pub fn exclusion_radius(vp: &Viewport) -> f64 {
    0.35 * vp.width.min(vp.height)
}

fn dist_to_center(x: f64, y: f64, vp: &Viewport) -> f64 {
    let dx = x - vp.width / 2.0;
    let dy = y - vp.height / 2.0;
    (dx * dx + dy * dy).sqrt()
}

/// Pick a wander target inside the margins and outside the exclusion circle.
///
/// Rejection-samples the margin box; if the box is so small (or so covered by
/// the circle) that sampling keeps failing, falls back to the top-left margin
/// corner, which is the point farthest from the center the margins allow.
pub fn safe_target(rng: &mut SimpleRng, vp: &Viewport, m: &Margins) -> (f64, f64) {
    let x_span = (vp.width - 2.0 * m.x).max(0.0);
    let y_span = (vp.height - m.top - m.bottom).max(0.0);
    let radius = exclusion_radius(vp);

    for _ in 0..MAX_TARGET_ATTEMPTS {
        let x = m.x + rng.next_f64() * x_span;
        let y = m.top + rng.next_f64() * y_span;
        if dist_to_center(x, y, vp) >= radius {
            return (x, y);
        }
    }
    (m.x, m.top)
}

/// Advance one companion one tick. Returns `true` when it has arrived at its
/// target (the caller then assigns a new one and may trigger speech).
pub fn advance(c: &mut Companion, vp: &Viewport, m: &Margins) -> bool {
    let dx = c.target_x - c.x;
    let dy = c.target_y - c.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < ARRIVE_DIST {
        return true;
    }

    let mut nx = c.x + dx / dist * STEP;
    let mut ny = c.y + dy / dist * STEP;

    // Push out of the exclusion circle rather than walking through it.
    let radius = exclusion_radius(vp);
    let center_dist = dist_to_center(nx, ny, vp);
    if center_dist < radius {
        let angle = (ny - vp.height / 2.0).atan2(nx - vp.width / 2.0);
        nx = vp.width / 2.0 + angle.cos() * radius;
        ny = vp.height / 2.0 + angle.sin() * radius;
    }

    // Clamp into the walkable band. Guard the upper bound so a degenerate
    // viewport cannot produce an inverted clamp range.
    c.x = nx.clamp(m.x, (vp.width - m.x).max(m.x));
    c.y = ny.clamp(m.top, (vp.height - m.bottom).max(m.top));
    false
}
