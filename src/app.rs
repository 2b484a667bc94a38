//! Application state management.
//!
//! Owns the tile list, the role/admin gate, the form draft and the UI mode.
//! Nothing here touches the network: operations queue [`Request`]s that the
//! event loop drains with [`App::take_requests`] and hands to the dispatcher.

use crate::sync::{AppEvent, Request, WriteOp};
use crate::tiles::{ApiError, Tile, tiles_from_listing};
use chrono::{DateTime, Local};
use serde_json::Value;

/// Coarse access mode chosen on the first screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Read-only browsing
    User,
    /// Read-write, once the admin password has been entered
    Admin,
}

/// Which part of the inventory screen has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Table navigation
    Browse,
    /// Typing into the tile form
    Form,
    /// Admin password prompt
    Login,
    /// Waiting for a yes/no on a pending delete
    ConfirmDelete,
}

/// Editable fields of the tile form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Brand,
    Size,
    CountOfBoxes,
    Price,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 5] = [
        FormField::Name,
        FormField::Brand,
        FormField::Size,
        FormField::CountOfBoxes,
        FormField::Price,
    ];

    /// Form label.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Tile Name",
            FormField::Brand => "Brand",
            FormField::Size => "Size (cm)",
            FormField::CountOfBoxes => "Boxes",
            FormField::Price => "Price (₹)",
        }
    }

    /// Hint shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Enter tile name",
            FormField::Brand => "Enter brand name",
            FormField::Size => "e.g., 60x60",
            FormField::CountOfBoxes => "Quantity",
            FormField::Price => "Enter price",
        }
    }

    /// Next field, wrapping to the first.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous field, wrapping to the last.
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Tiles from the most recent listing, in backend order
    pub tiles: Vec<Tile>,
    /// Highlighted row in `tiles`
    pub selected_index: usize,
    /// Role picked on the first screen, `None` while it is showing
    pub selected_role: Option<Role>,
    /// Role highlighted on the role selection screen
    pub role_cursor: Role,
    /// Whether the admin password has been entered this session
    pub is_admin: bool,
    /// Current UI mode
    pub mode: UiMode,
    /// Text typed into the login prompt
    pub password_input: String,
    /// Tile being created or edited
    pub draft: Tile,
    /// Whether `draft` is an existing tile being updated
    pub is_edit: bool,
    /// Form field receiving keystrokes
    pub focused_field: FormField,
    /// Tile awaiting delete confirmation
    pub pending_delete: Option<Tile>,
    /// Status message to display
    pub status_message: Option<String>,
    /// When the last listing was applied successfully
    pub last_synced: Option<DateTime<Local>>,
    admin_password: String,
    requests: Vec<Request>,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `admin_password` - Secret that unlocks admin mode
    pub fn new(admin_password: impl Into<String>) -> Self {
        Self {
            tiles: Vec::new(),
            selected_index: 0,
            selected_role: None,
            role_cursor: Role::User,
            is_admin: false,
            mode: UiMode::Browse,
            password_input: String::new(),
            draft: Tile::default(),
            is_edit: false,
            focused_field: FormField::Name,
            pending_delete: None,
            status_message: None,
            last_synced: None,
            admin_password: admin_password.into(),
            requests: Vec::new(),
        }
    }

    /// Drain the requests queued since the last call, oldest first.
    pub fn take_requests(&mut self) -> Vec<Request> {
        std::mem::take(&mut self.requests)
    }

    fn issue(&mut self, request: Request) {
        tracing::debug!(?request, "request issued");
        self.requests.push(request);
    }

    /// Set status message.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    // ---- role & auth gate -------------------------------------------------

    /// Move the role selection cursor to the other role.
    pub fn toggle_role_cursor(&mut self) {
        self.role_cursor = match self.role_cursor {
            Role::User => Role::Admin,
            Role::Admin => Role::User,
        };
    }

    /// Leave the role selection screen as `role`.
    ///
    /// # Details
    /// `User` lands directly in read-only browsing. `Admin` lands in the
    /// same screen, still locked, with the login prompt open.
    pub fn select_role(&mut self, role: Role) {
        self.selected_role = Some(role);
        self.role_cursor = role;
        self.mode = UiMode::Browse;
        match role {
            Role::User => self.is_admin = false,
            Role::Admin => self.open_login(),
        }
        tracing::info!(?role, "role selected");
    }

    /// Show the admin password prompt.
    pub fn open_login(&mut self) {
        self.mode = UiMode::Login;
    }

    /// Dismiss the password prompt, discarding what was typed.
    pub fn close_login(&mut self) {
        self.password_input.clear();
        if self.mode == UiMode::Login {
            self.mode = UiMode::Browse;
        }
    }

    /// Append a character to the password prompt.
    pub fn push_password_char(&mut self, ch: char) {
        if self.mode == UiMode::Login {
            self.password_input.push(ch);
        }
    }

    /// Remove the last character of the password prompt.
    pub fn pop_password_char(&mut self) {
        if self.mode == UiMode::Login {
            self.password_input.pop();
        }
    }

    /// Check the typed password.
    ///
    /// # Returns
    /// * `bool` - True if admin mode is now unlocked
    ///
    /// # Details
    /// The input is cleared either way. On mismatch the prompt stays open.
    pub fn submit_login(&mut self) -> bool {
        let matched = self.password_input == self.admin_password;
        self.password_input.clear();
        if matched {
            self.is_admin = true;
            self.mode = UiMode::Browse;
            self.set_status("Admin mode unlocked");
            tracing::info!("admin login succeeded");
        } else {
            self.set_status("Incorrect password!");
            tracing::warn!("admin login rejected");
        }
        matched
    }

    /// Return to the role selection screen, dropping admin status.
    pub fn back_to_roles(&mut self) {
        self.selected_role = None;
        self.is_admin = false;
        self.password_input.clear();
        self.pending_delete = None;
        self.mode = UiMode::Browse;
        self.status_message = None;
    }

    /// Drop admin status and any draft, staying on the inventory screen.
    pub fn logout(&mut self) {
        self.is_admin = false;
        self.pending_delete = None;
        self.reset_form();
        self.mode = UiMode::Browse;
        self.set_status("Logged out of admin mode");
        tracing::info!("admin logout");
    }

    /// Gate for every mutating action.
    ///
    /// Returns false, reports access denied and reopens the login prompt
    /// unless admin mode is unlocked.
    fn require_admin(&mut self, action: &str) -> bool {
        if self.is_admin {
            return true;
        }
        tracing::warn!(action, "admin access required");
        self.set_status(format!("Admin access required to {}!", action));
        self.open_login();
        false
    }

    // ---- inventory sync ---------------------------------------------------

    /// Queue a full reload of the tile list.
    pub fn refresh(&mut self) {
        self.issue(Request::ListAll);
    }

    /// Feed a background event into the state.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::PollTick => self.refresh(),
            AppEvent::TilesLoaded(result) => self.apply_listing(result),
            AppEvent::WriteFinished(op, Ok(())) => self.write_succeeded(op),
            AppEvent::WriteFinished(op, Err(e)) => {
                tracing::error!(%op, error = %e, "write failed");
                self.set_status(format!("Failed to {}: {}", op, e));
            }
        }
    }

    /// Replace the tile list wholesale with a listing result.
    ///
    /// # Details
    /// Any failure (transport, server, or shape) empties the list rather
    /// than keeping stale rows.
    pub fn apply_listing(&mut self, result: Result<Value, ApiError>) {
        match result.and_then(tiles_from_listing) {
            Ok(tiles) => {
                tracing::debug!(count = tiles.len(), "tiles loaded");
                self.tiles = tiles;
                self.last_synced = Some(Local::now());
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load tiles");
                self.tiles.clear();
            }
        }
        self.selected_index = self
            .selected_index
            .min(self.tiles.len().saturating_sub(1));
    }

    fn write_succeeded(&mut self, op: WriteOp) {
        tracing::info!(%op, "write succeeded");
        self.refresh();
        match op {
            WriteOp::Create | WriteOp::Update(_) => {
                self.reset_form();
                self.set_status("Tile saved");
            }
            WriteOp::Delete(_) => self.set_status("Tile deleted"),
        }
    }

    // ---- create / update / delete -----------------------------------------

    /// Focus the form for a new tile.
    pub fn begin_new(&mut self) {
        if !self.require_admin("add tiles") {
            return;
        }
        if self.is_edit {
            self.reset_form();
        }
        self.focused_field = FormField::Name;
        self.mode = UiMode::Form;
    }

    /// Load the selected row into the form for updating.
    pub fn edit_selected(&mut self) {
        if !self.require_admin("edit") {
            return;
        }
        let Some(tile) = self.selected_tile().cloned() else {
            return;
        };
        self.draft = tile;
        self.is_edit = true;
        self.focused_field = FormField::Name;
        self.mode = UiMode::Form;
    }

    /// Ask for confirmation before deleting the selected row.
    pub fn request_delete_selected(&mut self) {
        if !self.require_admin("delete") {
            return;
        }
        let Some(tile) = self.selected_tile().cloned() else {
            return;
        };
        if tile.id.is_none() {
            self.set_status("Cannot delete a tile without an id");
            return;
        }
        self.pending_delete = Some(tile);
        self.mode = UiMode::ConfirmDelete;
    }

    /// Delete the tile awaiting confirmation.
    pub fn confirm_delete(&mut self) {
        let pending = self.pending_delete.take();
        if self.mode == UiMode::ConfirmDelete {
            self.mode = UiMode::Browse;
        }
        if !self.require_admin("delete") {
            return;
        }
        if let Some(id) = pending.and_then(|tile| tile.id) {
            self.issue(Request::Delete(id));
        }
    }

    /// Abandon the pending delete without a request.
    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
        if self.mode == UiMode::ConfirmDelete {
            self.mode = UiMode::Browse;
        }
    }

    /// Save the draft: update when editing, create otherwise.
    ///
    /// # Details
    /// Field contents are sent exactly as typed. The draft stays in place
    /// until the write succeeds.
    pub fn submit(&mut self) {
        if !self.require_admin("save tiles") {
            return;
        }
        if self.is_edit {
            match self.draft.id.clone() {
                Some(id) => self.issue(Request::Update(id, self.draft.clone())),
                None => {
                    tracing::warn!("edit draft has no id, not submitting");
                    self.set_status("Cannot update a tile without an id");
                    return;
                }
            }
        } else {
            self.issue(Request::Create(self.draft.clone()));
        }
        self.set_status("Saving...");
    }

    /// Discard the draft without a request.
    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Give keyboard focus back to the table.
    ///
    /// # Details
    /// An edit in progress is cancelled; a new-tile draft is kept.
    pub fn leave_form(&mut self) {
        if self.is_edit {
            self.cancel_edit();
        }
        self.mode = UiMode::Browse;
    }

    fn reset_form(&mut self) {
        self.draft = Tile::default();
        self.is_edit = false;
        self.focused_field = FormField::Name;
        if self.mode == UiMode::Form {
            self.mode = UiMode::Browse;
        }
    }

    // ---- form editing -----------------------------------------------------

    /// Current text of a draft field.
    pub fn field_value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Brand => &self.draft.brand,
            FormField::Size => &self.draft.size,
            FormField::CountOfBoxes => &self.draft.count_of_boxes,
            FormField::Price => &self.draft.price,
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.draft.name,
            FormField::Brand => &mut self.draft.brand,
            FormField::Size => &mut self.draft.size,
            FormField::CountOfBoxes => &mut self.draft.count_of_boxes,
            FormField::Price => &mut self.draft.price,
        }
    }

    /// Type a character into the focused field.
    pub fn push_field_char(&mut self, ch: char) {
        if self.mode == UiMode::Form {
            let field = self.focused_field;
            self.field_mut(field).push(ch);
        }
    }

    /// Delete the last character of the focused field.
    pub fn pop_field_char(&mut self) {
        if self.mode == UiMode::Form {
            let field = self.focused_field;
            self.field_mut(field).pop();
        }
    }

    /// Move focus to the next form field.
    pub fn focus_next_field(&mut self) {
        self.focused_field = self.focused_field.next();
    }

    /// Move focus to the previous form field.
    pub fn focus_prev_field(&mut self) {
        self.focused_field = self.focused_field.prev();
    }

    // ---- table navigation -------------------------------------------------

    /// Get the highlighted tile.
    pub fn selected_tile(&self) -> Option<&Tile> {
        self.tiles.get(self.selected_index)
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        if self.tiles.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.tiles.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        if self.tiles.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.tiles.len();
    }
}
