//! Rendering for every phase, plus click-target registration.
//!
//! Targets are registered in paint order; overlays go last so they win the
//! hit-test over anything they cover.

use ratzilla::ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::game::content::{self, Category, Effect};
use crate::game::logic::format_number;
use crate::game::state::GameState;
use crate::game::{actions, CandyGame, Phase, Tab};
use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

const ACCENT: Color = Color::Magenta;
const DIM: Color = Color::DarkGray;

pub fn render(game: &CandyGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    match game.phase {
        Phase::AudioGate => render_audio_gate(f, area, cs),
        Phase::TypingPrompt { shown, ready } => render_typing(f, area, cs, shown, ready),
        Phase::WarningPulse { taps } => render_warning(f, area, cs, taps),
        Phase::Active => render_active(game, f, area, cs),
    }
}

// ── Onboarding screens ─────────────────────────────────────────

fn render_audio_gate(f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "C A N D Y V E R S E",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("tap anywhere to", Style::default().fg(DIM))),
        Line::from(Span::styled(
            "AWAKEN SYSTEM",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        )),
    ];
    let block = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Double));
    f.render_widget(block, area);
    // The whole screen is the gate
    cs.add_click_target(area, actions::AWAKEN_AUDIO);
}

fn render_typing(f: &mut Frame, area: Rect, cs: &mut ClickState, shown: usize, ready: bool) {
    let typed: String = content::PROMPT_TEXT.chars().take(shown).collect();
    let cursor = if ready { "" } else { "▌" };

    let mut lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{typed}{cursor}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if ready {
        lines.push(Line::from(Span::styled(
            "  YES — I AM READY  ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }
    // The button is the last line, wherever the prompt layout put it.
    let button_row = area.y + lines.len() as u16 - 1;
    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(paragraph, area);

    if ready && button_row < area.y + area.height {
        let button = Rect::new(area.x, button_row, area.width, 1);
        cs.add_click_target(button, actions::INTRO_YES);
    }
}

fn render_warning(f: &mut Frame, area: Rect, cs: &mut ClickState, taps: u32) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "WARNING WARNING",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::RAPID_BLINK),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "MALFUNCTION DETECTED. PULSE 20 TIMES TO REVIVE.",
            Style::default().fg(Color::Red),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{taps}/{}", content::WARNING_TAPS),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  R E V I V E  ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Red)));
    f.render_widget(paragraph, area);
    // Generous target: anywhere on screen counts as a pulse
    cs.add_click_target(area, actions::WARNING_PULSE);
}

// ── Active play ────────────────────────────────────────────────

fn render_active(game: &CandyGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let [header, tabs, content] =
        Layout::vertical([Constraint::Length(3), Constraint::Length(1), Constraint::Min(0)])
            .areas(area);

    render_header(&game.state, f, header);
    render_tabs(game, f, tabs, cs);

    match game.tab {
        Tab::Core => render_core(game, f, content, cs),
        Tab::Shop => render_upgrades(game, f, content, cs, Category::Shop, "Sweet Shop"),
        Tab::Magic => render_upgrades(game, f, content, cs, Category::Magic, "Granny's Magic"),
        Tab::Stats => render_stats(game, f, content, cs),
        Tab::Fun => render_fun(game, f, content, cs),
    }

    render_overlays(game, f, area, cs);
}

fn render_header(state: &GameState, f: &mut Frame, area: Rect) {
    let rate = state.production_rate();
    let mut title = vec![Span::styled(
        format!(" {} ", state.player_name),
        Style::default().fg(DIM),
    )];
    if state.prestige_level > 0 {
        title.push(Span::styled(
            format!("★{} ", state.prestige_level),
            Style::default().fg(Color::Yellow),
        ));
    }

    let body = Line::from(vec![
        Span::styled(
            format!("{} {}", state.skin, format_number(state.candy)),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}/s", format_number(rate)),
            Style::default().fg(Color::Green),
        ),
    ]);

    let paragraph = Paragraph::new(body).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Line::from(title)),
    );
    f.render_widget(paragraph, area);
}

fn render_tabs(game: &CandyGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let sep = if is_narrow_layout(area.width) { "|" } else { " | " };
    let mut bar = TabBar::new(sep);
    for tab in Tab::all() {
        let style = if *tab == game.tab {
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM)
        };
        bar = bar.tab(tab.label(), style, tab.action_id());
    }
    bar.render(f, area, cs);
}

/// The core tab: the tappable candy, floaters rising off it, and companions
/// wandering the margins.
fn render_core(game: &CandyGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let state = &game.state;
    f.render_widget(Block::default().borders(Borders::ALL), area);
    if area.width < 6 || area.height < 6 {
        return;
    }
    let inner = Rect::new(area.x + 1, area.y + 1, area.width - 2, area.height - 2);

    // The candy sits dead center; the tap zone is a chunky rect around it so
    // fat fingers land.
    let core_w = (inner.width / 3).max(5);
    let core_h = (inner.height / 3).max(3);
    let core = Rect::new(
        inner.x + (inner.width - core_w) / 2,
        inner.y + (inner.height - core_h) / 2,
        core_w,
        core_h,
    );

    let pulse = if state.click_flash > 0 || state.anim_frame % 20 < 10 {
        Modifier::BOLD
    } else {
        Modifier::empty()
    };
    let candy = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}  ", state.skin),
            Style::default().add_modifier(pulse),
        )),
        Line::from(Span::styled("tap!", Style::default().fg(DIM))),
    ])
    .alignment(Alignment::Center);
    f.render_widget(candy, core);
    cs.add_click_target(core, actions::TAP_CORE);

    // Floaters drift up from the core as they age.
    for floater in &state.floaters {
        let age = floater.max_life.saturating_sub(floater.life);
        let row = core.y.saturating_sub(age as u16 + 1);
        if row <= inner.y {
            continue;
        }
        let col = (core.x + core.width / 2) as i32 + floater.col_offset as i32;
        let col = col.clamp(inner.x as i32, (inner.x + inner.width) as i32 - 1) as u16;
        let w = (floater.text.chars().count() as u16).min(inner.x + inner.width - col);
        if w == 0 {
            continue;
        }
        let rect = Rect::new(col, row, w, 1);
        f.render_widget(
            Paragraph::new(Span::styled(
                floater.text.clone(),
                Style::default().fg(Color::Green),
            )),
            rect,
        );
    }

    render_companions(game, f, inner, cs);
}

/// Map companions from virtual pixel space into content cells.
fn render_companions(game: &CandyGame, f: &mut Frame, inner: Rect, cs: &mut ClickState) {
    let state = &game.state;
    let vp = state.viewport;
    if vp.width <= 0.0 || vp.height <= 0.0 {
        return;
    }

    for (i, c) in state.companions.iter().enumerate() {
        let col = inner.x + ((c.x / vp.width) * inner.width as f64) as u16;
        let row = inner.y + ((c.y / vp.height) * inner.height as f64) as u16;
        let col = col.min(inner.x + inner.width.saturating_sub(2));
        let row = row.min(inner.y + inner.height.saturating_sub(1));

        let cell = Rect::new(col, row, 2.min(inner.x + inner.width - col), 1);
        f.render_widget(Paragraph::new(c.emoji.as_str()), cell);
        if let Some(action) = u16::try_from(i)
            .ok()
            .and_then(|i| actions::COMPANION_BASE.checked_add(i))
        {
            cs.add_click_target(cell, action);
        }

        if let Some(speech) = &c.speech {
            let max = (inner.width / 2).max(10) as usize;
            let text: String = if speech.chars().count() > max {
                let mut t: String = speech.chars().take(max.saturating_sub(1)).collect();
                t.push('…');
                t
            } else {
                speech.clone()
            };
            let w = text.chars().count() as u16 + 2;
            let bubble_row = row.saturating_sub(1).max(inner.y);
            let bubble_col = if col + w > inner.x + inner.width {
                (inner.x + inner.width).saturating_sub(w)
            } else {
                col
            };
            let rect = Rect::new(bubble_col, bubble_row, w.min(inner.width), 1);
            f.render_widget(Clear, rect);
            f.render_widget(
                Paragraph::new(Span::styled(
                    format!(" {text} "),
                    Style::default().fg(Color::Black).bg(Color::White),
                )),
                rect,
            );
        }
    }
}

/// Shop and Magic tabs share a layout: a clickable row per upgrade, with
/// still-locked entries shown as mysteries. Description rows are dropped
/// when the wrapped list would overflow the panel.
fn render_upgrades(
    game: &CandyGame,
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
    category: Category,
    title: &str,
) {
    let inner_w = area.width.saturating_sub(2);
    let inner_h = area.height.saturating_sub(2);

    let mut list = upgrade_list(&game.state, category, true);
    if list.visual_height(inner_w) > inner_h {
        list = upgrade_list(&game.state, category, false);
    }

    list.register_targets(area, cs, 1, 1, 0, inner_w);
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let paragraph = Paragraph::new(list.into_lines())
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(paragraph, area);
}

fn upgrade_list(state: &GameState, category: Category, verbose: bool) -> ClickableList<'static> {
    let mut list = ClickableList::new();

    for (i, def) in content::UPGRADES.iter().enumerate() {
        if def.category != category {
            continue;
        }
        if !state.upgrade_unlocked(def) {
            list.push(Line::from(Span::styled(
                format!(
                    "  ??? unlocks at {} lifetime candy",
                    format_number(def.unlock_at)
                ),
                Style::default().fg(DIM),
            )));
            continue;
        }

        let cost = state.upgrade_cost(def);
        let affordable = state.candy >= cost;
        let owned = state.owned(def.id);
        let effect = match def.effect {
            Effect::PerSecond(v) => format!("+{}/s", format_number(v)),
            Effect::PerClick(v) => format!("+{}/tap", format_number(v)),
        };
        let style = if affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(DIM)
        };
        list.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!("{} {} ", def.emoji, def.name),
                    style.add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("x{owned} "), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{} ", effect), Style::default().fg(Color::Green)),
                Span::styled(format!("— {} candy", format_number(cost)), style),
            ]),
            actions::BUY_UPGRADE_BASE + i as u16,
        );
        if verbose {
            list.push(Line::from(Span::styled(
                format!("    {}", def.description),
                Style::default().fg(DIM),
            )));
        }
    }
    list
}

fn render_stats(game: &CandyGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let state = &game.state;
    let mut list = ClickableList::new();

    list.push(Line::from(Span::styled(
        "Statistics",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    list.push(Line::from(format!(
        "  lifetime candy  {}",
        format_number(state.lifetime_candy)
    )));
    list.push(Line::from(format!("  core taps       {}", state.clicks)));
    list.push(Line::from(format!(
        "  upgrades owned  {}",
        state.total_upgrade_count()
    )));
    list.push(Line::from(format!(
        "  companions      {}",
        state.companions.len()
    )));
    list.push(Line::from(format!(
        "  prestige        ★{}  (+{}%)",
        state.prestige_level,
        state.prestige_level * 10
    )));
    list.push(Line::from(""));

    // Heavy industry lives on this tab too.
    for (i, def) in content::UPGRADES.iter().enumerate() {
        if def.category != Category::Stats {
            continue;
        }
        if !state.upgrade_unlocked(def) {
            list.push(Line::from(Span::styled(
                format!("  ??? unlocks at {} lifetime candy", format_number(def.unlock_at)),
                Style::default().fg(DIM),
            )));
            continue;
        }
        let cost = state.upgrade_cost(def);
        list.push_clickable(
            Line::from(format!(
                "{} {} x{} — {} candy",
                def.emoji,
                def.name,
                state.owned(def.id),
                format_number(cost)
            )),
            actions::BUY_UPGRADE_BASE + i as u16,
        );
    }
    list.push(Line::from(""));

    list.push(Line::from(Span::styled(
        "Achievements",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for def in content::ACHIEVEMENTS {
        if state.has_achievement(def.id) {
            list.push(Line::from(Span::styled(
                format!("  {} {} — {}", def.emoji, def.name, def.description),
                Style::default().fg(Color::Yellow),
            )));
        } else {
            list.push(Line::from(Span::styled("  🔒 ???", Style::default().fg(DIM))));
        }
    }
    list.push(Line::from(""));

    if state.can_ascend() {
        list.push_clickable(
            Line::from(Span::styled(
                "  ☄ ASCEND — reset for a permanent +10% ",
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            actions::ASCEND,
        );
    } else {
        list.push(Line::from(Span::styled(
            "  ☄ ascension needs 500 upgrades or 10M lifetime candy",
            Style::default().fg(DIM),
        )));
    }

    list.register_targets(area, cs, 1, 1, 0, 0);
    let block = Block::default().borders(Borders::ALL).title("Stats");
    let paragraph = Paragraph::new(list.into_lines()).block(block);
    f.render_widget(paragraph, area);
}

fn render_fun(game: &CandyGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let state = &game.state;
    let mut list = ClickableList::new();

    list.push(Line::from(Span::styled(
        "The Oracle",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    list.push_clickable(
        Line::from(Span::styled(
            format!("  🔮 \"{}\"", content::ORACLE_PHRASES[game.oracle_index]),
            Style::default().fg(Color::Cyan),
        )),
        actions::NEXT_ORACLE,
    );
    list.push(Line::from(""));

    let name_line = if game.editing_name {
        format!("  ✏ {}▌", state.player_name)
    } else {
        format!("  ✏ {} (tap to rename)", state.player_name)
    };
    list.push_clickable(Line::from(name_line), actions::EDIT_NAME);
    list.push(Line::from(""));

    list.push(Line::from(Span::styled(
        "Device",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (i, mode) in crate::game::state::DeviceMode::all().iter().enumerate() {
        let marker = if *mode == state.device_mode { "●" } else { "○" };
        list.push_clickable(
            Line::from(format!("  {marker} {}", mode.name())),
            actions::SET_MODE_BASE + i as u16,
        );
    }
    list.push(Line::from(""));

    list.push(Line::from(Span::styled(
        "Core skins",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (i, skin) in content::SKINS.iter().enumerate() {
        let marker = if *skin == state.skin { "●" } else { " " };
        list.push_clickable(
            Line::from(format!("  {marker} {skin}")),
            actions::SET_SKIN_BASE + i as u16,
        );
    }
    list.push(Line::from(""));

    list.push_clickable(
        Line::from(Span::styled(
            "  💀 SURRENDER THE UNIVERSE ",
            Style::default().fg(Color::Red),
        )),
        actions::SURRENDER,
    );

    list.register_targets(area, cs, 1, 1, 0, 0);
    let block = Block::default().borders(Borders::ALL).title("Fun");
    let paragraph = Paragraph::new(list.into_lines()).block(block);
    f.render_widget(paragraph, area);
}

// ── Overlays ───────────────────────────────────────────────────

fn render_overlays(game: &CandyGame, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    if let Some(report) = &game.offline_report {
        dialog(
            f,
            area,
            cs,
            "Welcome back!",
            &[
                format!("You were away {}.", report.away),
                format!("The fairies kept working: +{} candy", format_number(report.earned)),
            ],
            &[("  SWEET  ", actions::DISMISS_OFFLINE)],
        );
        return;
    }

    if game.confirming_ascend {
        dialog(
            f,
            area,
            cs,
            "Ascend?",
            &[
                "Candy, upgrades and companions reset.".to_string(),
                "Your sweetness echoes: permanent +10% forever.".to_string(),
            ],
            &[("  ASCEND  ", actions::CONFIRM_ASCEND), ("  STAY  ", actions::CANCEL_ASCEND)],
        );
        return;
    }

    if game.confirming_surrender {
        dialog(
            f,
            area,
            cs,
            "Surrender the universe?",
            &[
                "The save is erased. Everything. Even the prestige.".to_string(),
                "The goblins win this one.".to_string(),
            ],
            &[
                ("  SURRENDER  ", actions::CONFIRM_SURRENDER),
                ("  KEEP FIGHTING  ", actions::CANCEL_SURRENDER),
            ],
        );
        return;
    }

    if game.ascending || game.ascend_flash {
        let text = if game.ascending { "ASCENDING…" } else { "✦ REBORN ✦" };
        splash(f, area, text, Color::Yellow);
        return;
    }
    if game.surrendering {
        splash(f, area, "ABANDONED", Color::Red);
        return;
    }

    if let Some(message) = game.banner {
        let rect = Rect::new(area.x, area.y, area.width, 3.min(area.height));
        f.render_widget(Clear, rect);
        let banner = Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(banner, rect);
        cs.add_click_target(rect, actions::DISMISS_BANNER);
    }

    if game.welcome {
        let rect = centered_rect(area, 40, 3);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("Welcome, {}!", game.state.player_name),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL)),
            rect,
        );
    }
}

/// Modal dialog with a message and one or two buttons on the last row.
fn dialog(
    f: &mut Frame,
    area: Rect,
    cs: &mut ClickState,
    title: &str,
    body: &[String],
    buttons: &[(&str, u16)],
) {
    let h = (body.len() as u16 + 5).min(area.height);
    let w = area.width.saturating_sub(4).min(54).max(20);
    let rect = centered_rect(area, w, h);
    f.render_widget(Clear, rect);

    let mut lines: Vec<Line> = body
        .iter()
        .map(|s| Line::from(s.as_str()))
        .collect();
    lines.push(Line::from(""));
    let mut spans: Vec<Span> = Vec::new();
    for (i, (label, _)) in buttons.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            *label,
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD),
        ));
    }
    lines.push(Line::from(spans));
    let line_count = lines.len() as u16;

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(title.to_string()),
        );
    f.render_widget(paragraph, rect);

    // Swallow stray taps under the dialog with an inert target; only the
    // button row acts. The row tracks where the last line actually rendered.
    cs.add_click_target(rect, actions::NOOP);
    let button_row = rect.y + line_count;
    if button_row >= rect.y + rect.height.saturating_sub(1) {
        return;
    }
    match buttons {
        [(_, only)] => {
            cs.add_click_target(Rect::new(rect.x, button_row, rect.width, 1), *only);
        }
        [(_, left), (_, right), ..] => {
            let half = rect.width / 2;
            cs.add_click_target(Rect::new(rect.x, button_row, half, 1), *left);
            cs.add_click_target(
                Rect::new(rect.x + half, button_row, rect.width - half, 1),
                *right,
            );
        }
        [] => {}
    }
}

fn splash(f: &mut Frame, area: Rect, text: &str, color: Color) {
    let rect = centered_rect(area, (text.chars().count() as u16 + 8).min(area.width), 3);
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color))),
        rect,
    );
}

fn centered_rect(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width);
    let h = h.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
