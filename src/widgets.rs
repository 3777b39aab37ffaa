//! Reusable clickable UI components.
//!
//! Each component couples rendering with click-target registration so a
//! tappable row can never drift away from its visual position.
//!
//! - [`TabBar`] — horizontal tab navigation.
//! - [`ClickableList`] — vertical list with per-row click targets.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// A horizontal tab bar: one row of styled labels joined by a separator,
/// with click targets matching the rendered label positions (display widths,
/// not char counts, so emoji-bearing labels stay accurate).
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let mut spans: Vec<Span> = Vec::new();
        let sep_width = Line::from(self.separator).width() as u16;
        let mut tab_widths: Vec<(u16, u16)> = Vec::new();

        for (i, (label, style, action_id)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            tab_widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);

        cs.register_tab_targets(
            &tab_widths,
            sep_width,
            area.x,
            area.y,
            area.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Builder pairing rendered [`Line`]s with click actions.
///
/// Lines are annotated as clickable when added; one
/// [`register_targets`](ClickableList::register_targets) call after layout
/// registers every target at the row the line actually landed on, so
/// inserting a header never desynchronizes the targets below it.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total rendered height in visual rows when wrapped to `width`.
    /// Used to decide whether a list overflows its panel.
    pub fn visual_height(&self, width: u16) -> u16 {
        if width == 0 {
            return self.lines.len() as u16;
        }
        Paragraph::new(self.lines.clone())
            .wrap(Wrap { trim: false })
            .line_count(width) as u16
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines.
    ///
    /// * `top_offset` / `bottom_offset` — rows consumed by borders.
    /// * `scroll` — vertical scroll offset in visual rows.
    /// * `inner_width` — content width for wrap math; pass `0` when the
    ///   widget does not wrap (one logical line = one visual row).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        if inner_width == 0 {
            for &(line_idx, action_id) in &self.actions {
                if line_idx < scroll {
                    continue;
                }
                let row = content_y + (line_idx - scroll);
                if row >= content_end {
                    continue;
                }
                cs.add_row_target(area, row, action_id);
            }
            return;
        }

        // Wrap-aware path: each logical line may span several visual rows.
        let w = inner_width as usize;
        let mut visual_starts: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut visual_heights: Vec<u16> = Vec::with_capacity(self.lines.len());
        let mut cumulative: u16 = 0;
        for line in &self.lines {
            visual_starts.push(cumulative);
            let lw = line.width();
            let h = if lw <= w { 1 } else { lw.div_ceil(w) as u16 };
            visual_heights.push(h);
            cumulative += h;
        }

        for &(line_idx, action_id) in &self.actions {
            let li = line_idx as usize;
            if li >= self.lines.len() {
                continue;
            }
            for r in 0..visual_heights[li] {
                let vr = visual_starts[li] + r;
                if vr < scroll {
                    continue;
                }
                let screen_row = content_y + (vr - scroll);
                if screen_row >= content_end {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ClickState;

    #[test]
    fn clickable_rows_land_after_headers() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("header"));
        cl.push_clickable(Line::from("item 0"), 10);
        cl.push_clickable(Line::from("item 1"), 11);

        // Bordered area: top_offset=1, bottom_offset=1
        let area = Rect::new(0, 5, 80, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 7), Some(10));
        assert_eq!(cs.hit_test(10, 8), Some(11));
        assert_eq!(cs.hit_test(10, 6), None); // header row
    }

    #[test]
    fn scrolled_rows_do_not_register() {
        let mut cl = ClickableList::new();
        for i in 0..4 {
            cl.push_clickable(Line::from(format!("item {i}")), 100 + i as u16);
        }

        let area = Rect::new(0, 10, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 1, 2, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(10, 10), Some(102));
        assert_eq!(cs.hit_test(10, 11), Some(103));
    }

    #[test]
    fn rows_clip_at_panel_bottom() {
        let mut cl = ClickableList::new();
        for i in 0..20 {
            cl.push_clickable(Line::from(format!("item {i}")), 50 + i as u16);
        }

        // 3 content rows inside a bordered height-5 panel
        let area = Rect::new(0, 0, 80, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 3);
        assert_eq!(cs.hit_test(10, 3), Some(52));
        assert_eq!(cs.hit_test(10, 4), None);
    }

    #[test]
    fn wrapped_line_is_clickable_on_every_visual_row() {
        let mut cl = ClickableList::new();
        // 30 chars wrap to 3 rows at width 10
        cl.push_clickable(Line::from("123456789012345678901234567890"), 42);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 0), Some(42));
        assert_eq!(cs.hit_test(5, 1), Some(42));
        assert_eq!(cs.hit_test(5, 2), Some(42));
        assert_eq!(cs.hit_test(5, 3), None);
    }

    #[test]
    fn wrapped_header_pushes_targets_down() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("12345678901234567890")); // 2 rows at width 10
        cl.push_clickable(Line::from("item0"), 10);

        let area = Rect::new(0, 0, 12, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(5, 2), Some(10));
        assert_eq!(cs.hit_test(5, 0), None);
        assert_eq!(cs.hit_test(5, 1), None);
    }

    #[test]
    fn visual_height_counts_wrapped_rows() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("short"));
        cl.push(Line::from("123456789012345678901234567890")); // 3 rows at width 10
        assert_eq!(cl.visual_height(10), 4);
        assert_eq!(cl.visual_height(80), 2);
        // Zero width degrades to the logical line count
        assert_eq!(cl.visual_height(0), 2);
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl: ClickableList = ClickableList::new();
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 80, 10), &mut cs, 1, 1, 0, 0);
        assert_eq!(cs.targets.len(), 0);
        assert_eq!(cl.len(), 0);
    }
}
