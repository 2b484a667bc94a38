//! Header and read-only banner rendering.

use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Render the inventory screen header.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Shows the item count, the time of the last successful sync and whether
/// admin mode is unlocked.
pub fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let last_sync = app
        .last_synced
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "never".to_string());

    let badge = if app.is_admin {
        Span::styled(
            " 🔓 Admin Mode (o: logout) ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(" 🔒 Admin Login (l) ", Style::default().fg(Color::Magenta))
    };

    let lines = vec![
        Line::from(Span::styled(
            "Manage and track your tile inventory efficiently",
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled("Total Items: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                app.tiles.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Last sync: ", Style::default().fg(Color::Cyan)),
            Span::styled(last_sync, Style::default().fg(Color::White)),
            Span::raw("   "),
            badge,
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title("🏭 Tiles Warehouse Management")
            .borders(Borders::ALL),
    );

    Widget::render(paragraph, area, buf);
}

/// Render the notice shown to non-admins while the inventory has rows.
pub fn render_banner(area: Rect, buf: &mut Buffer) {
    let line = Line::from(vec![
        Span::raw("You are in "),
        Span::styled("Read-Only Mode", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(". Press 'l' to log in with admin credentials to create, update, or delete items."),
    ]);

    let paragraph = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    Widget::render(paragraph, area, buf);
}
