mod audio;
mod game;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use game::state::TICKS_PER_SEC;
use game::CandyGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use time::GameTime;

/// Query the grid container's bounding rect and convert pixel coordinates to
/// a cell. DomBackend creates a `<div>` grid container inside `<body>`.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let click_x = mouse_x as f64 - rect.left();
    let click_y = mouse_y as f64 - rect.top();

    let col = pixel_x_to_col(click_x, rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(click_y, rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(CandyGame::boot(js_sys::Date::now())));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let game_time = Rc::new(RefCell::new(GameTime::new(TICKS_PER_SEC)));
    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    // Mouse/touch handler: pixel → cell → registered action
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.kind != MouseEventKind::ButtonDown(MouseButton::Left) {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }

            let (col, row) = (mouse_event.col, mouse_event.row);
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(action) = action {
                game.borrow_mut().handle_input(InputEvent::Click(action));
            }
        }
    });

    // Keyboard handler (mostly for the rename field and dialog escapes)
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let input = match key_event.code {
                KeyCode::Char(c) => Some(InputEvent::Key(c)),
                KeyCode::Backspace => Some(InputEvent::Backspace),
                KeyCode::Esc => Some(InputEvent::Escape),
                _ => None,
            };
            if let Some(input) = input {
                game.borrow_mut().handle_input(input);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut g = game.borrow_mut();
            let size = f.area();

            // Pump the fixed-step clock before drawing
            let ticks = game_time.borrow_mut().update(js_sys::Date::now());
            g.tick(ticks);

            let mut cs = click_state.borrow_mut();
            cs.terminal_cols = size.width;
            cs.terminal_rows = size.height;
            cs.clear_targets();
            g.set_viewport(size.width, size.height);

            game::render::render(&g, f, size, &mut cs);
        }
    });

    Ok(())
}
