//! Status bar rendering.

use crate::app::{App, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Key help for the current screen and mode.
pub fn help_text(app: &App) -> &'static str {
    if app.selected_role.is_none() {
        return "u: user mode   a: admin mode   q: quit";
    }
    match app.mode {
        UiMode::Browse if app.is_admin => {
            "↑↓ select  n new  e edit  d delete  c cancel  r refresh  o logout  b back  q quit"
        }
        UiMode::Browse => "↑↓ select  r refresh  l admin login  b back  q quit",
        UiMode::Form => "type to edit  Tab next field  Enter save  Esc leave form",
        UiMode::Login => "type password  Enter unlock  Esc cancel",
        UiMode::ConfirmDelete => "y confirm delete  n keep",
    }
}

/// Render the status bar.
///
/// # Details
/// Key help sits in the border; the body shows the latest status message.
pub fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let text = app.status_message.as_deref().unwrap_or("Ready");
    let paragraph = Paragraph::new(Line::from(text))
        .block(Block::default().title(help_text(app)).borders(Borders::ALL));
    Widget::render(paragraph, area, buf);
}
