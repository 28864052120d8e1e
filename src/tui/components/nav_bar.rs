// Nav bar component
//
// App title, loading spinner, total card count and the my-cards count,
// with the global key hints on the right.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let controller = &app.controller;
    let indicator = if controller.is_loading() {
        format!(" {}", app.spinner_char())
    } else {
        String::new()
    };

    let title_text = format!(
        " deckview{} ──── {} cards │ ★ {} mine",
        indicator,
        controller.pagination().total_count,
        controller.selection().len()
    );

    let hints = Line::from(" r reload  R reset  m mine  l logs  q quit ").right_aligned();

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(hints),
        );

    f.render_widget(title, area);
}
