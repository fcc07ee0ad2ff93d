//! Users table: one row per record with a `[x]` cell for removal.
//!
//! Rendering is a pure function of the records, the cursor and the theme.
//! It reports back a [`TableHitMap`] so mouse clicks can be mapped onto the
//! row and cell that was drawn there.
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use crate::app::Theme;
use crate::model::{User, UserId};

const COLUMN_SPACING: u16 = 1;
const REMOVE_LABEL: &str = "[x]";

/// What a click on the table asks for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TableEvent {
    Select(UserId),
    Remove(UserId),
}

/// Screen geometry of the last drawn table body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableHitMap {
    body: Rect,
    remove_x: u16,
    remove_width: u16,
    row_ids: Vec<UserId>,
}

impl TableHitMap {
    /// Map a click to an event. The removal cell only ever yields `Remove`.
    pub fn hit(&self, column: u16, row: u16) -> Option<TableEvent> {
        let b = self.body;
        if column < b.x || column >= b.x + b.width || row < b.y || row >= b.y + b.height {
            return None;
        }
        let id = *self.row_ids.get(usize::from(row - b.y))?;
        if column >= self.remove_x && column < self.remove_x + self.remove_width {
            Some(TableEvent::Remove(id))
        } else {
            Some(TableEvent::Select(id))
        }
    }

    /// Number of rows currently on screen.
    pub fn len(&self) -> usize {
        self.row_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_ids.is_empty()
    }

    /// Screen position of the removal cell for the `n`th visible row.
    pub fn remove_cell(&self, n: usize) -> Option<(u16, u16)> {
        (n < self.row_ids.len()).then(|| (self.remove_x, self.body.y + n as u16))
    }

    /// Screen position of the first cell of the `n`th visible row.
    pub fn row_cell(&self, n: usize) -> Option<(u16, u16)> {
        (n < self.row_ids.len()).then(|| (self.body.x, self.body.y + n as u16))
    }
}

const HEADERS: [&str; 7] = ["NAME", "EMAIL", "ADDRESS", "PHONE", "WEBSITE", "COMPANY", ""];

/// Display width of the widest value in a column, header included.
fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> u16 {
    values
        .map(|v| Span::raw(v).width())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or_default()
        .try_into()
        .unwrap_or(u16::MAX)
}

/// Name and email are sized to their longest value over the whole
/// collection so they never get cut; the remaining width is shared.
fn widths(users: &[User]) -> [Constraint; 7] {
    [
        Constraint::Length(column_width(HEADERS[0], users.iter().map(|u| u.name.as_str()))),
        Constraint::Length(column_width(HEADERS[1], users.iter().map(|u| u.email.as_str()))),
        Constraint::Fill(3),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Fill(2),
        Constraint::Length(REMOVE_LABEL.len() as u16),
    ]
}

/// First row index of the page containing `cursor`.
pub fn page_start(cursor: usize, rows_per_page: usize) -> usize {
    let rpp = rows_per_page.max(1);
    (cursor / rpp) * rpp
}

/// Render the table page containing `cursor` and return its hit map.
pub fn render_user_table(
    f: &mut Frame,
    area: Rect,
    users: &[User],
    cursor: usize,
    theme: &Theme,
) -> TableHitMap {
    let block = Block::default()
        .title(format!("Users ({})", users.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    // One line of the inner area goes to the header.
    let body = Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let rows_per_page = usize::from(body.height).max(1);

    let start = page_start(cursor, rows_per_page).min(users.len());
    let end = (start + rows_per_page).min(users.len());
    let slice = &users[start..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let style = if start + i == cursor {
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        };
        Row::new(vec![
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
            Cell::from(u.address_summary()),
            Cell::from(u.phone.clone()),
            Cell::from(u.website.clone()),
            Cell::from(u.company.name.clone()),
            Cell::from(REMOVE_LABEL).style(Style::default().fg(theme.error)),
        ])
        .style(style)
    });

    let header = Row::new(HEADERS)
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD));

    let widths = widths(users);
    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .flex(Flex::Legacy);
    f.render_widget(table, area);

    // Same split the table performs internally, so clicks line up with cells.
    let columns = Layout::horizontal(widths)
        .flex(Flex::Legacy)
        .spacing(COLUMN_SPACING)
        .split(Rect { height: 1, ..body });
    let remove = columns.last().copied().unwrap_or_default();

    TableHitMap {
        body: Rect {
            height: slice.len() as u16,
            ..body
        },
        remove_x: remove.x,
        remove_width: remove.width,
        row_ids: slice.iter().map(|u| u.id).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(ids: Vec<UserId>) -> TableHitMap {
        TableHitMap {
            body: Rect::new(1, 3, 60, ids.len() as u16),
            remove_x: 56,
            remove_width: 3,
            row_ids: ids,
        }
    }

    #[test]
    fn click_on_row_selects_it() {
        let h = hits(vec![7, 8, 9]);
        assert_eq!(h.hit(2, 4), Some(TableEvent::Select(8)));
    }

    #[test]
    fn click_on_remove_cell_never_selects() {
        let h = hits(vec![7, 8, 9]);
        for x in 56..59 {
            assert_eq!(h.hit(x, 5), Some(TableEvent::Remove(9)));
        }
        assert_eq!(h.hit(59, 5), Some(TableEvent::Select(9)));
    }

    #[test]
    fn clicks_outside_body_are_ignored() {
        let h = hits(vec![7]);
        assert_eq!(h.hit(0, 3), None);
        assert_eq!(h.hit(2, 2), None);
        assert_eq!(h.hit(2, 4), None);
        assert_eq!(TableHitMap::default().hit(0, 0), None);
    }

    #[test]
    fn name_and_email_columns_fit_longest_value() {
        let mut long = crate::source::tests::mk_user(1, "Nicholas Runolfsdottir V");
        long.email = "Julianne.OConner@kory.org".into();
        let short = crate::source::tests::mk_user(2, "Al");
        let w = widths(&[long, short]);
        assert_eq!(w[0], Constraint::Length(24));
        assert_eq!(w[1], Constraint::Length(25));

        let empty = widths(&[]);
        assert_eq!(empty[0], Constraint::Length(4));
        assert_eq!(empty[1], Constraint::Length(5));
    }

    #[test]
    fn page_start_snaps_to_page() {
        assert_eq!(page_start(0, 10), 0);
        assert_eq!(page_start(9, 10), 0);
        assert_eq!(page_start(10, 10), 10);
        assert_eq!(page_start(5, 0), 5);
    }
}
