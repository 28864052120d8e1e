// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, timer ticks)
// - Feeding listing controller completions back into the app
// - Rendering the UI

pub mod app;
pub mod components;
pub mod scroll;
pub mod views;

use crate::catalog::{cards_endpoint, CardApi, ControllerEvent, ListingController};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use anyhow::{Context, Result};
use app::{App, Focus};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, starts the listing, runs the event loop and
/// restores the terminal when the user quits.
pub async fn run_tui(config: Config, api: Arc<dyn CardApi>, log_buffer: LogBuffer) -> Result<()> {
    let (controller, controller_rx) = ListingController::new(
        api,
        cards_endpoint(&config.api_url),
        config.catalog.controller_options(),
    );
    let mut app = App::new(controller, Theme::by_name(&config.theme), log_buffer);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.controller.initialize();
    let result = run_event_loop(&mut terminal, &mut app, controller_rx).await;
    app.controller.dispose();

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with `tokio::select!`:
/// 1. Terminal input (keys, mouse wheel)
/// 2. Timer ticks (spinner animation, toast expiry)
/// 3. Listing controller completions (fetch results, debounce timer)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut controller_rx: mpsc::UnboundedReceiver<ControllerEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(120));
    let mut input = EventStream::new();

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key_event))) => handle_key_event(app, key_event),
                Some(Ok(Event::Mouse(mouse_event))) => handle_mouse_event(app, mouse_event),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e).context("Failed to read terminal input"),
                None => break,
            },

            _ = tick_interval.tick() => app.tick_animation(),

            Some(event) = controller_rx.recv() => app.handle_controller_event(event),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: global keys, then the focused panel
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    match app.focus {
        Focus::Filters => app.handle_filter_key(key_event),
        Focus::Grid => handle_grid_key(app, &key_event),
    }
}

/// Keys that work regardless of focus - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        _ => return false,
    }
    true
}

fn handle_grid_key(app: &mut App, key_event: &KeyEvent) {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('r') if ctrl => app.reset_filters(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('R') => app.reset_filters(),
        KeyCode::Char('m') => app.show_my_cards = !app.show_my_cards,
        KeyCode::Char('l') => app.show_logs = !app.show_logs,
        KeyCode::Char('[') if app.show_logs => app.logs_panel.scroll_up(),
        KeyCode::Char(']') if app.show_logs => app.logs_panel.scroll_down(),
        KeyCode::Char('f') | KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        KeyCode::Home => app.move_cursor(isize::MIN),
        KeyCode::End => app.move_cursor(isize::MAX),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_highlighted_card(),
        _ => {}
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    match mouse_event.kind {
        MouseEventKind::ScrollUp => app.move_cursor(-3),
        MouseEventKind::ScrollDown => app.move_cursor(3),
        _ => {}
    }
}
