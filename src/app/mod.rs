//! Application state types and entry glue.
//!
//! `AppState` is the root composer: it owns the user store, the current
//! selection, and the table cursor, and turns table events, key actions and
//! mouse clicks into state changes. Rendering reads it back every tick.
//!
pub mod keymap;
pub mod theme;
pub mod update;

use std::time::Instant;

use crate::launch;
use crate::model::{User, UserId};
use crate::source::{LoadState, UserStore};
use crate::ui::detail::DetailHitMap;
use crate::ui::table::{TableEvent, TableHitMap};

pub use keymap::{KeyAction, Keymap};
pub use theme::Theme;

/// Which record, if any, the detail overlay shows.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Selected(User),
}

impl Selection {
    pub fn user(&self) -> Option<&User> {
        match self {
            Selection::Selected(u) => Some(u),
            Selection::None => None,
        }
    }

    pub fn id(&self) -> Option<UserId> {
        self.user().map(|u| u.id)
    }

    /// Whether the detail overlay is open.
    pub fn is_open(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

/// Where key presses go.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Table,
    Detail,
    Modal,
}

/// Dialogs drawn on top of everything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Info { message: String },
    Help,
}

pub struct AppState {
    pub started_at: Instant,
    pub store: UserStore,
    pub selection: Selection,
    pub cursor: usize,
    pub rows_per_page: usize,
    pub theme: Theme,
    pub keymap: Keymap,
    pub modal: Option<ModalState>,
    pub table_hits: TableHitMap,
    pub detail_hits: Option<DetailHitMap>,
    /// First visible line of the detail overlay body.
    pub detail_scroll: u16,
    pub running: bool,
}

impl AppState {
    pub fn new(store: UserStore, theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            store,
            selection: Selection::None,
            cursor: 0,
            rows_per_page: 10,
            theme,
            keymap,
            modal: None,
            table_hits: TableHitMap::default(),
            detail_hits: None,
            detail_scroll: 0,
            running: true,
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.modal.is_some() {
            InputMode::Modal
        } else if self.selection.is_open() {
            InputMode::Detail
        } else {
            InputMode::Table
        }
    }

    pub fn users(&self) -> &[User] {
        self.store.users()
    }

    pub fn cursor_user(&self) -> Option<&User> {
        self.users().get(self.cursor)
    }

    /// Pick up the retrieval outcome if it arrived.
    pub fn poll_source(&mut self) {
        if self.store.poll() {
            self.cursor = 0;
            if let LoadState::Failed(msg) = self.store.state() {
                tracing::error!(error = %msg, "showing retrieval error");
            }
        }
    }

    /// Apply a select or remove coming from the table.
    pub fn dispatch(&mut self, event: TableEvent) {
        match event {
            TableEvent::Select(id) => {
                let Some(idx) = self.users().iter().position(|u| u.id == id) else {
                    return;
                };
                self.cursor = idx;
                self.selection = Selection::Selected(self.users()[idx].clone());
                self.detail_scroll = 0;
                tracing::debug!(id, "opened details");
            }
            TableEvent::Remove(id) => {
                if self.store.remove(id).is_none() {
                    return;
                }
                // A selection must never outlive its record.
                if self.selection.id() == Some(id) {
                    self.selection = Selection::None;
                }
                self.clamp_cursor();
            }
        }
    }

    pub fn close_detail(&mut self) {
        self.selection = Selection::None;
        self.detail_hits = None;
        self.detail_scroll = 0;
    }

    /// Scroll the detail body; stops at the last line drawn.
    pub fn scroll_detail(&mut self, delta: isize) {
        let max = self.detail_hits.map_or(0, |h| h.max_scroll);
        self.detail_scroll = usize::from(self.detail_scroll)
            .saturating_add_signed(delta)
            .min(usize::from(max)) as u16;
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.users().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn page(&mut self, forward: bool) {
        let rpp = self.rows_per_page.max(1) as isize;
        self.move_cursor(if forward { rpp } else { -rpp });
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.users().len().saturating_sub(1));
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.modal = Some(ModalState::Info {
            message: message.into(),
        });
    }

    pub fn open_selected_map(&mut self) {
        let Some(url) = self.selection.user().map(|u| u.address.geo.map_url()) else {
            return;
        };
        tracing::info!(%url, "opening map");
        if let Err(e) = launch::open_url(&url) {
            self.show_info(format!("Could not open a browser: {e}\n\n{url}"));
        }
    }

    /// React to a resolved key action according to the current mode.
    pub fn handle_action(&mut self, action: KeyAction) {
        if action == KeyAction::Quit {
            self.running = false;
            return;
        }
        match self.input_mode() {
            InputMode::Modal => {
                if matches!(action, KeyAction::Close | KeyAction::Select | KeyAction::OpenHelp) {
                    self.modal = None;
                }
            }
            InputMode::Detail => match action {
                KeyAction::Close => self.close_detail(),
                KeyAction::MoveUp => self.scroll_detail(-1),
                KeyAction::MoveDown => self.scroll_detail(1),
                KeyAction::PageUp => self.scroll_detail(-(self.rows_per_page as isize)),
                KeyAction::PageDown => self.scroll_detail(self.rows_per_page as isize),
                KeyAction::OpenMap => self.open_selected_map(),
                KeyAction::OpenHelp => self.modal = Some(ModalState::Help),
                _ => {}
            },
            InputMode::Table => match action {
                KeyAction::MoveUp => self.move_cursor(-1),
                KeyAction::MoveDown => self.move_cursor(1),
                KeyAction::PageUp => self.page(false),
                KeyAction::PageDown => self.page(true),
                KeyAction::Select => {
                    if let Some(id) = self.cursor_user().map(|u| u.id) {
                        self.dispatch(TableEvent::Select(id));
                    }
                }
                KeyAction::Remove => {
                    if let Some(id) = self.cursor_user().map(|u| u.id) {
                        self.dispatch(TableEvent::Remove(id));
                    }
                }
                KeyAction::OpenHelp => self.modal = Some(ModalState::Help),
                KeyAction::Close | KeyAction::OpenMap | KeyAction::Ignore | KeyAction::Quit => {}
            },
        }
    }

    /// Left click at a screen cell.
    pub fn click(&mut self, column: u16, row: u16) {
        match self.input_mode() {
            InputMode::Modal => self.modal = None,
            InputMode::Detail => {
                let close = match &self.detail_hits {
                    Some(hits) => hits.closes_on(column, row),
                    None => true,
                };
                if close {
                    self.close_detail();
                }
            }
            InputMode::Table => {
                if let Some(event) = self.table_hits.hit(column, row) {
                    self.dispatch(event);
                }
            }
        }
    }

    /// Mouse wheel: positive scrolls down.
    pub fn scroll(&mut self, delta: isize) {
        match self.input_mode() {
            InputMode::Table => self.move_cursor(delta),
            InputMode::Detail => self.scroll_detail(delta),
            InputMode::Modal => {}
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::tests::mk_user;

    fn mk_app(users: Vec<User>) -> AppState {
        AppState::new(UserStore::from_outcome(Ok(users)), Theme::dark(), Keymap::default())
    }

    #[test]
    fn select_opens_detail_with_that_record() {
        let mut app = mk_app(vec![mk_user(1, "Ann"), mk_user(2, "Bo")]);
        app.dispatch(TableEvent::Select(2));
        assert_eq!(app.selection.id(), Some(2));
        assert_eq!(app.cursor, 1);
        assert_eq!(app.input_mode(), InputMode::Detail);
        app.handle_action(KeyAction::Close);
        assert_eq!(app.selection, Selection::None);
        assert_eq!(app.input_mode(), InputMode::Table);
    }

    #[test]
    fn removing_selected_record_clears_selection() {
        let mut app = mk_app(vec![mk_user(1, "Ann"), mk_user(2, "Bo")]);
        app.dispatch(TableEvent::Select(1));
        app.dispatch(TableEvent::Remove(1));
        assert_eq!(app.selection, Selection::None);
        let ids: Vec<_> = app.users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn removing_other_record_keeps_selection() {
        let mut app = mk_app(vec![mk_user(1, "Ann"), mk_user(2, "Bo")]);
        app.dispatch(TableEvent::Select(1));
        app.dispatch(TableEvent::Remove(2));
        assert_eq!(app.selection.id(), Some(1));
    }

    #[test]
    fn cursor_stays_in_bounds_after_removing_last_row() {
        let mut app = mk_app(vec![mk_user(1, "Ann"), mk_user(2, "Bo")]);
        app.handle_action(KeyAction::MoveDown);
        assert_eq!(app.cursor, 1);
        app.handle_action(KeyAction::Remove);
        assert_eq!(app.cursor, 0);
        app.handle_action(KeyAction::Remove);
        assert!(app.users().is_empty());
        assert_eq!(app.cursor, 0);
        // Nothing left: select and remove are no-ops.
        app.handle_action(KeyAction::Select);
        app.handle_action(KeyAction::Remove);
        assert_eq!(app.selection, Selection::None);
    }

    #[test]
    fn keys_in_detail_mode_do_not_touch_the_table() {
        let mut app = mk_app(vec![mk_user(1, "Ann"), mk_user(2, "Bo")]);
        app.handle_action(KeyAction::Select);
        app.handle_action(KeyAction::Remove);
        app.handle_action(KeyAction::MoveDown);
        assert_eq!(app.users().len(), 2);
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selection.id(), Some(1));
    }

    #[test]
    fn detail_scroll_is_bounded_by_drawn_overlay() {
        let mut app = mk_app(vec![mk_user(1, "Ann")]);
        app.handle_action(KeyAction::Select);
        // Nothing drawn yet: no room to scroll.
        app.handle_action(KeyAction::MoveDown);
        assert_eq!(app.detail_scroll, 0);

        app.detail_hits = Some(DetailHitMap {
            overlay: ratatui::layout::Rect::new(0, 0, 40, 10),
            close: ratatui::layout::Rect::new(35, 0, 3, 1),
            max_scroll: 3,
        });
        app.handle_action(KeyAction::MoveDown);
        app.handle_action(KeyAction::MoveDown);
        assert_eq!(app.detail_scroll, 2);
        app.handle_action(KeyAction::PageDown);
        assert_eq!(app.detail_scroll, 3);
        app.handle_action(KeyAction::MoveUp);
        assert_eq!(app.detail_scroll, 2);
        assert_eq!(app.cursor, 0);

        app.handle_action(KeyAction::Close);
        assert_eq!(app.detail_scroll, 0);
    }

    #[test]
    fn help_modal_swallows_keys_until_closed() {
        let mut app = mk_app(vec![mk_user(1, "Ann")]);
        app.handle_action(KeyAction::OpenHelp);
        assert_eq!(app.input_mode(), InputMode::Modal);
        app.handle_action(KeyAction::Remove);
        assert_eq!(app.users().len(), 1);
        app.handle_action(KeyAction::Close);
        assert_eq!(app.input_mode(), InputMode::Table);
    }

    #[test]
    fn quit_stops_from_any_mode() {
        let mut app = mk_app(vec![mk_user(1, "Ann")]);
        app.handle_action(KeyAction::Select);
        app.handle_action(KeyAction::Quit);
        assert!(!app.running);
    }

    #[test]
    fn page_moves_by_rows_per_page_and_clamps() {
        let users = (1..=25).map(|i| mk_user(i, "User")).collect();
        let mut app = mk_app(users);
        app.rows_per_page = 10;
        app.page(true);
        assert_eq!(app.cursor, 10);
        app.page(true);
        app.page(true);
        assert_eq!(app.cursor, 24);
        app.page(false);
        assert_eq!(app.cursor, 14);
        app.move_cursor(-100);
        assert_eq!(app.cursor, 0);
    }
}
