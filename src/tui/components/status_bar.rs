// Status bar component
//
// Loaded/total counts, current page cursor, loading state and uptime.

use crate::catalog::LoadingState;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let controller = &app.controller;
    let pagination = controller.pagination();

    let state = match pagination.loading {
        LoadingState::Idle if controller.has_pending_debounce() => "waiting",
        LoadingState::Idle if pagination.has_more => "idle",
        LoadingState::Idle => "all loaded",
        LoadingState::LoadingInitial => "loading",
        LoadingState::LoadingMore => "loading more",
    };

    let page = controller
        .filters()
        .page()
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());

    let text = format!(
        " {} │ {}/{} loaded │ page {} │ {}",
        app.uptime(),
        controller.cards().len(),
        pagination.total_count,
        page,
        state,
    );

    let status = Paragraph::new(text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
