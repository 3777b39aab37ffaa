//! Input normalization and click-target plumbing.
//!
//! Keyboard, mouse and touch all funnel into [`InputEvent`]. Clickable
//! regions are registered during render as rectangles with a semantic action
//! ID and hit-tested when a pointer event arrives.

use ratzilla::ratatui::layout::Rect;

/// All input events, normalized from keyboard, mouse, and touch sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key press.
    Key(char),
    /// Backspace (used by the rename field).
    Backspace,
    /// Escape (dismisses dialogs / editing modes).
    Escape,
    /// A tap on a registered target, identified by a semantic action ID
    /// (see `game::actions`).
    Click(u16),
}

/// A tappable region in terminal cell coordinates.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the render loop (which registers targets every frame) and
/// the pointer handler (which hit-tests against them).
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Register a full-width target on one row of `area`. Rows outside the
    /// area are ignored, which makes clipped list rows safe to register.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.targets.push(ClickTarget {
                rect: Rect::new(area.x, row, area.width, 1),
                action_id,
            });
        }
    }

    /// Register targets for a horizontal tab bar.
    ///
    /// `tab_widths` holds `(display_width, action_id)` per padded label.
    /// Each target covers its label plus half of the adjacent separators; the
    /// first and last tabs extend to the edges so the bar has no dead zones.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts: Vec<u16> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for i in 0..n {
            let (_, action_id) = tab_widths[i];

            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + tab_widths[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };

            let right = if i == n - 1 {
                total_width
            } else {
                let cur_end = starts[i] + tab_widths[i].0;
                cur_end + (starts[i + 1] - cur_end) / 2
            };

            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Hit-test a cell coordinate. Later-registered targets win on overlap,
    /// matching UI layering (overlays are registered last, on top).
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            if col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height {
                Some(t.action_id)
            } else {
                None
            }
        })
    }
}

/// Whether a terminal width should use the stacked narrow layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Convert a pixel Y coordinate (relative to the grid's top edge) to a row.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    if grid_height <= 0.0 || terminal_rows == 0 || click_y < 0.0 {
        return None;
    }
    let row = (click_y / (grid_height / terminal_rows as f64)) as u16;
    if row >= terminal_rows {
        return None;
    }
    Some(row)
}

/// Convert a pixel X coordinate (relative to the grid's left edge) to a column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    if grid_width <= 0.0 || terminal_cols == 0 || click_x < 0.0 {
        return None;
    }
    let col = (click_x / (grid_width / terminal_cols as f64)) as u16;
    if col >= terminal_cols {
        return None;
    }
    Some(col)
}
