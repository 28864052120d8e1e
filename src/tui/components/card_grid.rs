//! Card grid component
//!
//! One row per loaded card with a cursor. Cards already in the user's
//! selection carry a marker. While the first page is loading the grid shows
//! a spinner, and an empty settled listing shows "No Data Found".

use super::scrollbar::render_scrollbar;
use crate::catalog::{Card, LoadingState, ScrollMetrics, UserCardSelection};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const OWNED_MARKER: &str = "★";

/// Cursor and viewport over the loaded cards
pub struct CardGrid {
    cursor: usize,
    scroll: ScrollState,
}

impl CardGrid {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            scroll: ScrollState::manual(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor by `delta` rows, clamped to the loaded cards
    ///
    /// Returns true when the cursor actually moved.
    pub fn move_by(&mut self, delta: isize, total: usize) -> bool {
        if total == 0 {
            return false;
        }
        let last = total - 1;
        let target = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta as usize).min(last)
        };
        if target == self.cursor {
            return false;
        }
        self.cursor = target;
        self.scroll.ensure_visible(self.cursor);
        true
    }

    pub fn page_size(&self) -> isize {
        self.scroll.viewport().max(1) as isize
    }

    /// Back to the first card (the list was replaced)
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.scroll.scroll_to_top();
    }

    /// Sync with the current list length and visible rows (call each frame)
    pub fn sync(&mut self, total: usize, viewport: usize) {
        self.scroll.update_dimensions(total, viewport);
        if total == 0 {
            self.cursor = 0;
        } else if self.cursor >= total {
            self.cursor = total - 1;
        }
        self.scroll.ensure_visible(self.cursor);
    }

    /// Current position for the listing controller
    pub fn metrics(&self) -> ScrollMetrics {
        self.scroll.metrics()
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, view: GridView<'_>, theme: &Theme) {
        let border_color = if view.focused {
            theme.highlight
        } else {
            theme.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(" Cards ");

        if view.cards.is_empty() {
            self.sync(0, 0);
            let message = if view.loading == LoadingState::LoadingInitial {
                format!("{} Loading cards", view.spinner)
            } else {
                "No Data Found".to_string()
            };
            let inner = block.inner(area);
            f.render_widget(block, area);
            let [_, middle, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(inner);
            f.render_widget(
                Paragraph::new(message)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.muted)),
                middle,
            );
            return;
        }

        let inner = block.inner(area);
        f.render_widget(block, area);

        // Reserve the last line for the loading-more indicator
        let loading_more = view.loading == LoadingState::LoadingMore;
        let [list_area, footer_area] = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(u16::from(loading_more)),
        ])
        .areas(inner);

        self.sync(view.cards.len(), list_area.height as usize);
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = view.cards[start..end]
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let index = start + i;
                let owned = view.selection.contains(&card.id);
                let marker = if owned { OWNED_MARKER } else { " " };
                let set = card
                    .set_name()
                    .map(|s| format!("  ({})", s))
                    .unwrap_or_default();

                let line = Line::from(vec![
                    Span::styled(format!("{} ", marker), Style::default().fg(theme.owned)),
                    Span::raw(card.name.clone()),
                    Span::styled(set, Style::default().fg(theme.muted)),
                ]);

                let style = if index == self.cursor {
                    Style::default()
                        .fg(theme.selection_fg)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.foreground)
                };
                ListItem::new(line).style(style)
            })
            .collect();

        f.render_widget(List::new(items), list_area);
        render_scrollbar(f, area, &self.scroll);

        if loading_more {
            f.render_widget(
                Paragraph::new(format!("{} Loading more", view.spinner))
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(theme.muted)),
                footer_area,
            );
        }
    }
}

impl Default for CardGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// Data the grid draws from, borrowed for one frame
pub struct GridView<'a> {
    pub cards: &'a [Card],
    pub selection: &'a UserCardSelection,
    pub loading: LoadingState,
    pub spinner: char,
    pub focused: bool,
}
