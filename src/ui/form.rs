//! Tile form rendering.
//!
//! Only drawn for admins. Doubles as the "Add New Tile" and "Update Tile" form.

use crate::app::{App, FormField, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const LABEL_WIDTH: usize = 11;

/// Render the tile form.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// One line per field with the focused field highlighted while the form has
/// focus. Empty fields show their placeholder.
pub fn render_form(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Form;

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|&field| {
            let focused = is_active && field == app.focused_field;
            let value = app.field_value(field);
            let label_style = if focused {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };

            let mut spans = vec![
                Span::styled(if focused { "▶ " } else { "  " }, label_style),
                Span::styled(format!("{:<LABEL_WIDTH$}", field.label()), label_style),
                Span::raw(" "),
            ];
            if value.is_empty() && !focused {
                spans.push(Span::styled(
                    field.placeholder(),
                    Style::default().fg(Color::DarkGray),
                ));
            } else {
                spans.push(Span::styled(value, Style::default().fg(Color::White)));
            }
            if focused {
                spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect();

    let hint = match (is_active, app.is_edit) {
        (true, true) => "Enter: Update Tile   Tab/↑↓: move   Esc: cancel edit",
        (true, false) => "Enter: Add Tile   Tab/↑↓: move   Esc: back to table",
        (false, true) => "Editing - press 'c' to cancel",
        (false, false) => "Press 'n' to fill in a new tile",
    };
    lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Gray))));

    let title = if app.is_edit {
        "✏️ Update Tile"
    } else {
        "➕ Add New Tile"
    };

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(if is_active {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            }),
    );

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Role;
    use crate::ui::tests::buffer_text;
    use serde_json::json;

    fn unlocked() -> App {
        let mut app = App::new("pw");
        app.select_role(Role::Admin);
        app.password_input = "pw".to_string();
        app.submit_login();
        app
    }

    #[test]
    fn test_form_shows_placeholders_and_values() {
        let mut app = unlocked();
        app.begin_new();
        app.push_field_char('Z');
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        render_form(&app, area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Add New Tile"));
        assert!(text.contains("Z_"));
        assert!(text.contains("e.g., 60x60"));
    }

    #[test]
    fn test_form_title_when_editing() {
        let mut app = unlocked();
        app.apply_listing(Ok(json!([{"id": 1, "name": "Onyx"}])));
        app.edit_selected();
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        render_form(&app, area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Update Tile"));
        assert!(text.contains("Onyx"));
    }
}
