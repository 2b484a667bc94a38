//! Role selection screen rendering.

use crate::app::{App, Role};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the role selection screen.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Two cards side by side, User Mode and Admin Mode, with the one under the
/// cursor highlighted.
pub fn render_roles(app: &App, area: Rect, buf: &mut Buffer) {
    let content = super::centered_rect(72, 14, area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Length(7), // Cards
            Constraint::Min(0),    // Key hints
        ])
        .split(content);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "🏭 Tiles Warehouse",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Select your access mode",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center);
    Widget::render(title, rows[0], buf);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_card(
        "👁️ User Mode",
        "View inventory only",
        "press 'u'",
        app.role_cursor == Role::User,
        Color::Cyan,
        cards[0],
        buf,
    );
    render_card(
        "🔐 Admin Mode",
        "Full access with password",
        "press 'a'",
        app.role_cursor == Role::Admin,
        Color::Magenta,
        cards[1],
        buf,
    );

    let hints = Paragraph::new(Line::from(Span::styled(
        "←/→ choose   Enter select   q quit",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center);
    Widget::render(hints, rows[2], buf);
}

fn render_card(
    title: &str,
    description: &str,
    key_hint: &str,
    highlighted: bool,
    accent: Color,
    area: Rect,
    buf: &mut Buffer,
) {
    let border_style = if highlighted {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let paragraph = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(description.to_string()),
        Line::from(Span::styled(
            key_hint.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    Widget::render(paragraph, area, buf);
}
