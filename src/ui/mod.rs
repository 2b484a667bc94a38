//! UI components module.
//!
//! Contains ratatui widgets for the role screen and the inventory screen.

pub mod form;
pub mod header;
pub mod modal;
pub mod roles;
pub mod status;
pub mod table;

pub use form::render_form;
pub use header::{render_banner, render_header};
pub use modal::{render_confirm_delete, render_login};
pub use roles::render_roles;
pub use status::render_status;
pub use table::render_table;

use ratatui::layout::Rect;

/// Rectangle of at most `width` x `height` centered inside `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    /// Flatten a buffer into one string per row.
    pub(crate) fn buffer_lines(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    pub(crate) fn buffer_text(buf: &Buffer) -> String {
        buffer_lines(buf).join("\n")
    }

    #[test]
    fn test_centered_rect() {
        let outer = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(50, 10, outer), Rect::new(25, 15, 50, 10));
        // Clamped to the outer area.
        assert_eq!(centered_rect(200, 80, outer), outer);
    }
}
