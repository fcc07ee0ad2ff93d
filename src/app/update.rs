use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;

use crate::app::AppState;
use crate::ui;

const TICK: Duration = Duration::from_millis(100);

/// Draw, poll the retrieval, and feed terminal events into `app` until it stops running.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    while app.running {
        app.poll_source();

        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) => handle_key(app, key),
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }
    }
    tracing::info!("leaving event loop");
    Ok(())
}

/// Resolve a key press through the keymap and apply it.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if let Some(action) = app.keymap.resolve(&key) {
        app.handle_action(action);
    }
}

pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.scroll(1),
        MouseEventKind::ScrollUp => app.scroll(-1),
        _ => {}
    }
}
