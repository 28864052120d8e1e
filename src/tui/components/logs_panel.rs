//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer, color-coded by level. Follows
//! new entries unless the user scrolled up.

use super::scrollbar::render_scrollbar;
use crate::logging::LogEntry;
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use tracing::Level;

pub struct LogsPanel {
    scroll: ScrollState,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll.scroll_up();
    }

    pub fn scroll_down(&mut self) {
        self.scroll.scroll_down();
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
        let viewport = area.height.saturating_sub(2) as usize;
        self.scroll.update_dimensions(entries.len(), viewport);
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = entries[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(entry.display_line())
                    .style(Style::default().fg(level_color(entry.level, theme)))
            })
            .collect();

        let title = if self.scroll.auto_follow {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(title),
        );
        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn level_color(level: Level, theme: &Theme) -> ratatui::style::Color {
    match level {
        Level::ERROR => theme.error,
        Level::WARN => theme.warn,
        Level::INFO => theme.foreground,
        _ => theme.muted,
    }
}
