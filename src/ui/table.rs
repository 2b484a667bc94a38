//! Inventory table rendering.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

/// Render the inventory table.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Columns: Name, Brand, Size, Boxes, Price. Values are shown exactly as the
/// backend sent them. An empty inventory shows a placeholder message instead.
pub fn render_table(app: &App, area: Rect, buf: &mut Buffer) {
    let title = format!("📋 Inventory List ({} items, 'r' to refresh)", app.tiles.len());
    let block = Block::default().title(title).borders(Borders::ALL);

    if app.tiles.is_empty() {
        let subtext = if app.is_admin {
            "Add your first tile to get started"
        } else {
            "Check back later for available items"
        };
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from("📦 No tiles in inventory yet"),
            Line::from(subtext).style(Style::default().fg(Color::Gray)),
        ])
        .alignment(Alignment::Center)
        .block(block);
        Widget::render(paragraph, area, buf);
        return;
    }

    let header = Row::new(["Name", "Brand", "Size", "Boxes", "Price"]).style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .tiles
        .iter()
        .map(|tile| {
            Row::new(vec![
                Cell::from(tile.name.as_str()),
                Cell::from(tile.brand.as_str()),
                Cell::from(tile.size.as_str()),
                Cell::from(tile.count_of_boxes.as_str()),
                Cell::from(format!("₹{}", tile.price)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(22),
        Constraint::Percentage(16),
        Constraint::Percentage(12),
        Constraint::Percentage(20),
    ];

    let highlight = if app.mode == UiMode::Browse {
        Style::default()
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(highlight)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_index.min(app.tiles.len() - 1)));

    StatefulWidget::render(table, area, buf, &mut state);
}
