// TUI application state
//
// The App owns the listing controller and the per-panel view state. Input
// handlers call into the App; the App turns input into controller calls and
// controller effects into view changes.

use super::components::{CardGrid, FilterIntent, FilterPanel, LogsPanel, Toast};
use crate::catalog::{Card, ControllerEvent, FilterSet, ListingController, ViewEffect};
use crate::logging::LogBuffer;
use crate::theme::Theme;
use crossterm::event::KeyEvent;
use std::time::Instant;

const SPINNER: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Which panel receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Grid,
    Filters,
}

/// Main application state for the TUI
pub struct App {
    pub controller: ListingController,
    pub theme: Theme,

    /// Log buffer for the logs panel
    pub log_buffer: LogBuffer,

    pub focus: Focus,
    pub grid: CardGrid,
    pub filter_panel: FilterPanel,
    pub logs_panel: LogsPanel,

    /// Right pane shows the user's cards instead of the card detail
    pub show_my_cards: bool,
    pub show_logs: bool,

    pub toast: Option<Toast>,
    pub should_quit: bool,

    animation_frame: usize,
    start_time: Instant,
}

impl App {
    pub fn new(controller: ListingController, theme: Theme, log_buffer: LogBuffer) -> Self {
        let mut filter_panel = FilterPanel::new();
        filter_panel.sync_from(controller.filters());

        Self {
            controller,
            theme,
            log_buffer,
            focus: Focus::default(),
            grid: CardGrid::new(),
            filter_panel,
            logs_panel: LogsPanel::new(),
            show_my_cards: false,
            show_logs: false,
            toast: None,
            should_quit: false,
            animation_frame: 0,
            start_time: Instant::now(),
        }
    }

    // ─── Controller plumbing ────────────────────────────────

    /// Feed a completion back to the controller and act on its effects
    pub fn handle_controller_event(&mut self, event: ControllerEvent) {
        self.controller.handle_event(event);
        self.apply_effects();
    }

    pub fn apply_effects(&mut self) {
        for effect in self.controller.drain_effects() {
            match effect {
                ViewEffect::ScrollToTop => self.grid.reset(),
                ViewEffect::Notify(message) => self.toast = Some(Toast::error(message)),
            }
        }
    }

    // ─── Grid ───────────────────────────────────────────────

    pub fn highlighted_card(&self) -> Option<&Card> {
        self.controller.cards().get(self.grid.cursor())
    }

    /// Move the grid cursor and report the new position to the controller
    pub fn move_cursor(&mut self, delta: isize) {
        let total = self.controller.cards().len();
        if self.grid.move_by(delta, total) && self.controller.on_scroll(self.grid.metrics()) {
            tracing::debug!(cursor = self.grid.cursor(), "Scrolled near the end, loading more");
        }
    }

    pub fn page_down(&mut self) {
        self.move_cursor(self.grid.page_size());
    }

    pub fn page_up(&mut self) {
        self.move_cursor(-self.grid.page_size());
    }

    /// Add the highlighted card to the user's cards, or remove it
    pub fn toggle_highlighted_card(&mut self) {
        let Some(card) = self.highlighted_card().cloned() else {
            return;
        };
        let remove = self.controller.is_user_card(&card.id);
        let message = if remove {
            format!("Removed {} from my cards", card.name)
        } else {
            format!("Added {} to my cards", card.name)
        };
        self.controller.set_user_card(card, remove);
        self.show_toast(message);
    }

    // ─── Filters ────────────────────────────────────────────

    /// Reload the current filters from the first page
    pub fn reload(&mut self) {
        self.controller.apply_filter(&FilterSet::new(), false);
    }

    pub fn reset_filters(&mut self) {
        self.controller.reset_filters();
        self.filter_panel.sync_from(self.controller.filters());
    }

    pub fn handle_filter_key(&mut self, key: KeyEvent) {
        let disabled = self.controller.is_loading();
        let intent = self
            .filter_panel
            .handle_key(key, self.controller.filters(), disabled);

        match intent {
            FilterIntent::Apply { filter, delayed } => {
                self.controller.apply_filter(&filter, delayed)
            }
            FilterIntent::Reset => self.reset_filters(),
            FilterIntent::Blur => self.focus = Focus::Grid,
            FilterIntent::None => {}
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Grid => Focus::Filters,
            Focus::Filters => Focus::Grid,
        };
    }

    // ─── Chrome ─────────────────────────────────────────────

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::info(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// Uptime as HH:MM:SS
    pub fn uptime(&self) -> String {
        let seconds = self.start_time.elapsed().as_secs();
        format!(
            "{:02}:{:02}:{:02}",
            seconds / 3600,
            (seconds % 3600) / 60,
            seconds % 60
        )
    }
}
