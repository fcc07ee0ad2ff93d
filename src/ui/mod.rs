pub mod components;
pub mod detail;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::AppState;
use crate::source::LoadState;

/// Draw the whole screen from `app`.
///
/// Exactly one of the pending indicator, the error notice, or the table (with
/// the detail overlay on top) fills the body. Hit maps for mouse handling are
/// refreshed on the way.
pub fn render(f: &mut Frame, app: &mut AppState) {
    let area = f.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4), Constraint::Length(1)].as_ref())
        .split(area);

    components::render_header(f, root[0], app);

    match app.store.state() {
        LoadState::Pending => {
            app.table_hits = Default::default();
            components::render_pending(f, root[1], app);
        }
        LoadState::Failed(msg) => {
            app.table_hits = Default::default();
            components::render_error_notice(f, root[1], app, msg);
        }
        LoadState::Ready(users) => {
            app.table_hits = table::render_user_table(f, root[1], users, app.cursor, &app.theme);
            // Body height minus borders and header.
            app.rows_per_page = usize::from(root[1].height.saturating_sub(3)).max(1);
        }
    }

    components::render_status_bar(f, root[2], app);

    app.detail_hits =
        detail::render_user_detail(f, area, &app.selection, app.detail_scroll, &app.theme);
    if let Some(hits) = &app.detail_hits {
        app.detail_scroll = app.detail_scroll.min(hits.max_scroll);
    }

    if app.modal.is_some() {
        components::render_modal(f, area, app);
    }
}
