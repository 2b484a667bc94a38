//! Keyboard handling.
//!
//! Translates crossterm key presses into [`App`] operations for whichever
//! screen or mode is active.

use crate::app::{App, Role, UiMode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What the event loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply a key press to the application state.
///
/// # Arguments
/// * `app` - Application state
/// * `key` - Key event from crossterm
///
/// # Returns
/// * `Flow` - Whether to keep running
pub fn handle_key(app: &mut App, key: KeyEvent) -> Flow {
    if key.kind != KeyEventKind::Press {
        return Flow::Continue;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Flow::Quit;
    }

    if app.selected_role.is_none() {
        return handle_role_screen(app, key.code);
    }

    match app.mode {
        UiMode::Browse => return handle_browse(app, key.code),
        UiMode::Form => handle_form(app, key.code),
        UiMode::Login => handle_login(app, key.code),
        UiMode::ConfirmDelete => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.decline_delete(),
            _ => {}
        },
    }
    Flow::Continue
}

fn handle_role_screen(app: &mut App, code: KeyCode) -> Flow {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('u') | KeyCode::Char('U') => app.select_role(Role::User),
        KeyCode::Char('a') | KeyCode::Char('A') => app.select_role(Role::Admin),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
            app.toggle_role_cursor()
        }
        KeyCode::Enter => app.select_role(app.role_cursor),
        _ => {}
    }
    Flow::Continue
}

fn handle_browse(app: &mut App, code: KeyCode) -> Flow {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Flow::Quit,
        KeyCode::Up | KeyCode::Char('k') => app.move_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_down(),
        KeyCode::Char('r') => {
            app.refresh();
            app.set_status("Refreshing...");
        }
        KeyCode::Char('n') => app.begin_new(),
        KeyCode::Char('e') | KeyCode::Enter => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Char('c') => app.cancel_edit(),
        KeyCode::Char('l') => app.open_login(),
        KeyCode::Char('o') => app.logout(),
        KeyCode::Char('b') | KeyCode::Esc => app.back_to_roles(),
        _ => {}
    }
    Flow::Continue
}

fn handle_form(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.leave_form(),
        KeyCode::Enter => app.submit(),
        KeyCode::Tab | KeyCode::Down => app.focus_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.focus_prev_field(),
        KeyCode::Backspace => app.pop_field_char(),
        KeyCode::Char(c) => app.push_field_char(c),
        _ => {}
    }
}

fn handle_login(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.close_login(),
        KeyCode::Enter => {
            app.submit_login();
        }
        KeyCode::Backspace => app.pop_password_char(),
        KeyCode::Char(c) => app.push_password_char(c),
        _ => {}
    }
}
