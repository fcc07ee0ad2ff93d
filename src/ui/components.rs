//! Shared UI components (header, status bar, notices, modal helpers).
//!
//! Small building blocks reused by the root renderer.
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode, KeyAction, ModalState};
use crate::source::LoadState;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Compute a centered rectangle of the given size inside `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the title bar with counts and the most used keys.
pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let p = Paragraph::new(format!(
        "User Management  users:{}  Enter: details; d/Delete: remove; Esc: close; ?: help; q: quit",
        app.users().len()
    ))
    .block(
        Block::default()
            .title("user-roster")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

/// Render the bottom status bar with mode, load state and position.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode() {
        InputMode::Table => "TABLE",
        InputMode::Detail => "DETAIL",
        InputMode::Modal => "MODAL",
    };
    let state = match app.store.state() {
        LoadState::Pending => "loading",
        LoadState::Failed(_) => "failed",
        LoadState::Ready(_) => "ready",
    };
    let total = app.users().len();
    let row = if total == 0 { 0 } else { app.cursor + 1 };
    let msg = format!("mode: {mode}  state: {state}  row:{row}/{total}  rows/page:{}", app.rows_per_page);
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Render the pending indicator shown until the retrieval resolves.
pub fn render_pending(f: &mut Frame, area: Rect, app: &AppState) {
    let frame = (app.started_at.elapsed().as_millis() / 120) as usize % SPINNER.len();
    let text = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("{} Loading users...", SPINNER[frame]),
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            app.store.label().to_string(),
            Style::default().fg(app.theme.muted),
        )),
    ];
    let p = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, area);
}

/// Render the error notice that replaces the table when retrieval failed.
pub fn render_error_notice(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let text = vec![
        Line::from(Span::styled(
            "Failed to load users",
            Style::default()
                .fg(app.theme.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(app.theme.text),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Press q to quit.",
            Style::default().fg(app.theme.muted),
        )),
    ];
    let p = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Error")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.error)),
    );
    f.render_widget(p, area);
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let max_w = area.width.saturating_sub(6).max(30);
    let min_w = 60u16.min(max_w);
    let approx_lines = (message.len() as u16 / (min_w.saturating_sub(4).max(10))).max(1)
        + message.lines().count() as u16;
    let max_h = area.height.saturating_sub(6).max(5);
    let height = (approx_lines + 4).min(max_h).max(5);
    let rect = centered_rect(min_w, height, area);
    let p = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the help modal listing the current key bindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let entries = [
        ("Move", vec![KeyAction::MoveUp, KeyAction::MoveDown]),
        ("Scroll a page", vec![KeyAction::PageUp, KeyAction::PageDown]),
        ("Open details", vec![KeyAction::Select]),
        ("Remove user", vec![KeyAction::Remove]),
        ("Close", vec![KeyAction::Close]),
        ("Open map (in details)", vec![KeyAction::OpenMap]),
        ("Help", vec![KeyAction::OpenHelp]),
        ("Quit", vec![KeyAction::Quit]),
    ];
    let key_style = Style::default().add_modifier(Modifier::ITALIC);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled("Keys", Style::default().add_modifier(Modifier::BOLD))),
        Line::raw(""),
    ];
    for (label, actions) in entries {
        let keys: Vec<String> = actions
            .into_iter()
            .flat_map(|a| app.keymap.keys_for(a))
            .collect();
        lines.push(Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(keys.join(" / "), key_style),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled("Mouse", Style::default().add_modifier(Modifier::BOLD))));
    lines.push(Line::raw("Click a row to open it, its [x] cell to remove it."));
    lines.push(Line::raw("Click [x] or outside the details to close them."));
    lines.push(Line::raw("Move keys and the wheel scroll long details."));
    lines.push(Line::raw(""));
    lines.push(Line::raw("Removal only changes the local list."));

    let width = 64u16.min(area.width.saturating_sub(4)).max(30u16.min(area.width));
    let height = (lines.len() as u16 + 2).min(area.height);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Dispatch the active modal to its renderer.
pub fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::Info { message }) => render_info_modal(f, area, app, message),
        Some(ModalState::Help) => render_help_modal(f, area, app),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(100, 30, area), Rect::new(0, 0, 80, 24));
    }
}
