//! Modal dialogs: admin login prompt and delete confirmation.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Render the admin password prompt over `area`.
///
/// # Details
/// The typed password is masked with one bullet per character.
pub fn render_login(app: &App, area: Rect, buf: &mut Buffer) {
    let dialog = super::centered_rect(56, 9, area);
    Widget::render(Clear, dialog, buf);

    let masked = "•".repeat(app.password_input.chars().count());
    let lines = vec![
        Line::from(Span::styled(
            "Enter admin password to access edit, create, and delete features",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::Yellow)),
            Span::styled(masked, Style::default().fg(Color::White)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: Unlock Admin   Esc: Cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title("🔐 Admin Authentication")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );

    Widget::render(paragraph, dialog, buf);
}

/// Render the yes/no prompt for the tile awaiting deletion.
pub fn render_confirm_delete(app: &App, area: Rect, buf: &mut Buffer) {
    let dialog = super::centered_rect(50, 7, area);
    Widget::render(Clear, dialog, buf);

    let name = app
        .pending_delete
        .as_ref()
        .map(|tile| tile.name.as_str())
        .unwrap_or_default();

    let lines = vec![
        Line::from("Are you sure you want to delete this item?"),
        Line::from(Span::styled(
            name.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y: delete   n/Esc: keep",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title("🗑️ Delete Tile")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );

    Widget::render(paragraph, dialog, buf);
}
