//! Tiles Warehouse TUI - terminal inventory manager for a tiles REST backend.
//!
//! Main entry point and event loop for the application.

mod app;
mod config;
mod input;
mod logging;
mod sync;
mod tiles;
mod ui;

use app::{App, UiMode};
use config::Config;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use input::Flow;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use sync::{AppEvent, Dispatcher, Poller};
use tiles::TileClient;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration, installs logging, starts the poller and runs the
/// event loop until the user quits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load(None)?;
    logging::init(&config.log_file_path()?, &config.log_level)?;
    tracing::info!(api_url = %config.api_url, "starting tiles-tui");

    let client = Arc::new(TileClient::new(&config)?);
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(client, events_tx.clone());

    let mut app = App::new(config.admin_password.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // The poller lives exactly as long as the event loop.
    let poller = Poller::start(config.poll_interval(), events_tx);
    let result = run_app(&mut terminal, &mut app, &dispatcher, &mut events_rx).await;
    drop(poller);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "event loop failed");
    }
    tracing::info!("tiles-tui exited");
    result
}

/// Render the complete UI.
///
/// # Arguments
/// * `f` - Frame to render to
/// * `app` - Application state
///
/// # Details
/// Shows the role selection screen until a role is chosen, then the
/// inventory screen with any open modal drawn on top.
fn render_ui(f: &mut ratatui::Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Screen
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    if app.selected_role.is_none() {
        ui::render_roles(app, chunks[0], f.buffer_mut());
        ui::render_status(app, chunks[1], f.buffer_mut());
        return;
    }

    let middle = if app.is_admin {
        Constraint::Length(8) // Form
    } else if !app.tiles.is_empty() {
        Constraint::Length(3) // Read-only banner
    } else {
        Constraint::Length(0)
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            middle,
            Constraint::Min(0), // Table
        ])
        .split(chunks[0]);

    ui::render_header(app, sections[0], f.buffer_mut());
    if app.is_admin {
        ui::render_form(app, sections[1], f.buffer_mut());
    } else if !app.tiles.is_empty() {
        ui::render_banner(sections[1], f.buffer_mut());
    }
    ui::render_table(app, sections[2], f.buffer_mut());
    ui::render_status(app, chunks[1], f.buffer_mut());

    match app.mode {
        UiMode::Login => ui::render_login(app, area, f.buffer_mut()),
        UiMode::ConfirmDelete => ui::render_confirm_delete(app, area, f.buffer_mut()),
        UiMode::Browse | UiMode::Form => {}
    }
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `dispatcher` - Runs the requests the app queues
/// * `events` - Results and poll ticks from background tasks
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Each pass drains background events, dispatches queued requests, redraws,
/// then waits briefly for a key press.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher<TileClient>,
    events: &mut UnboundedReceiver<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        while let Ok(event) = events.try_recv() {
            app.handle_event(event);
        }
        for request in app.take_requests() {
            // Detached: completion is reported back through `events`.
            drop(dispatcher.dispatch(request));
        }

        terminal.draw(|f| render_ui(f, app))?;

        // Use non-blocking event polling with timeout to keep UI responsive
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && input::handle_key(app, key) == Flow::Quit
        {
            break;
        }
    }

    Ok(())
}
