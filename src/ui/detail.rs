//! Detail overlay for the selected user.
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{Selection, Theme};
use crate::model::User;

use super::components::centered_rect;

const CLOSE_LABEL: &str = "[x]";

/// Screen geometry of the drawn overlay.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DetailHitMap {
    pub overlay: Rect,
    pub close: Rect,
    /// How far the body can scroll before its last line reaches the bottom.
    pub max_scroll: u16,
}

impl DetailHitMap {
    /// A click on the close control or anywhere outside the overlay closes it.
    pub fn closes_on(&self, column: u16, row: u16) -> bool {
        contains(self.close, column, row) || !contains(self.overlay, column, row)
    }
}

fn contains(r: Rect, column: u16, row: u16) -> bool {
    column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
}

fn section(title: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &'static str, value: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(theme.muted)),
        Span::styled(value.to_string(), Style::default().fg(theme.text)),
    ])
}

/// Every attribute of `user`, grouped into contact, address and company.
pub fn detail_lines(user: &User, theme: &Theme) -> Vec<Line<'static>> {
    let a = &user.address;
    let c = &user.company;
    let mut heading = vec![Span::styled(
        user.name.clone(),
        Style::default().fg(theme.header_fg).add_modifier(Modifier::BOLD),
    )];
    if !user.username.is_empty() {
        heading.push(Span::styled(
            format!("  @{}", user.username),
            Style::default().fg(theme.muted),
        ));
    }
    vec![
        Line::from(heading),
        Line::default(),
        section("Contact Information", theme),
        field("Email", &user.email, theme),
        field("Phone", &user.phone, theme),
        field("Website", &user.website, theme),
        Line::default(),
        section("Address", theme),
        Line::from(Span::styled(
            format!("{}, {}", a.street, a.suite),
            Style::default().fg(theme.text),
        )),
        Line::from(Span::styled(
            format!("{}, {}", a.city, a.zipcode),
            Style::default().fg(theme.text),
        )),
        Line::from(vec![
            Span::styled("Map: ", Style::default().fg(theme.muted)),
            Span::styled(
                a.geo.map_url(),
                Style::default()
                    .fg(theme.link)
                    .add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled("  (o to open)", Style::default().fg(theme.muted)),
        ]),
        Line::default(),
        section("Company", theme),
        field("Name", &c.name, theme),
        field("Catch Phrase", &c.catch_phrase, theme),
        field("Business", &c.bs, theme),
    ]
}

/// Draw the overlay for `selection`, or nothing when no record is selected.
///
/// The overlay grows to fit the wrapped body. When the screen is too short for
/// that, the body is shown from line `scroll` (clamped to what is left).
pub fn render_user_detail(
    f: &mut Frame,
    area: Rect,
    selection: &Selection,
    scroll: u16,
    theme: &Theme,
) -> Option<DetailHitMap> {
    let user = selection.user()?;

    let width = 72u16.min(area.width.saturating_sub(4)).max(20u16.min(area.width));
    let p = Paragraph::new(detail_lines(user, theme)).wrap(Wrap { trim: false });
    let body_lines = u16::try_from(p.line_count(width.saturating_sub(2))).unwrap_or(u16::MAX);
    let height = body_lines.saturating_add(2).min(area.height);
    let rect = centered_rect(width, height, area);

    let max_scroll = body_lines.saturating_sub(height.saturating_sub(2));
    let title = if max_scroll > 0 {
        "User details (scroll)"
    } else {
        "User details"
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let p = p.block(block).scroll((scroll.min(max_scroll), 0));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);

    let close = Rect {
        x: (rect.x + rect.width).saturating_sub(CLOSE_LABEL.len() as u16 + 2),
        y: rect.y,
        width: (CLOSE_LABEL.len() as u16).min(rect.width),
        height: 1u16.min(rect.height),
    };
    f.render_widget(
        Paragraph::new(CLOSE_LABEL).style(Style::default().fg(theme.error)),
        close,
    );

    Some(DetailHitMap {
        overlay: rect,
        close,
        max_scroll,
    })
}
