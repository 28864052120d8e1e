// Views module - screen-level rendering
//
// Layout, top to bottom: nav bar, content, optional logs panel, status bar.
// Content, left to right: filter panel, card grid, and a right pane showing
// either the highlighted card or the user's cards. Narrow terminals drop the
// right pane first, then the filter panel.

use super::app::{App, Focus};
use super::components::{card_detail, my_cards_panel, nav_bar, status_bar, GridView};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

const FILTER_WIDTH: u16 = 26;
const LOGS_HEIGHT: u16 = 8;

/// Which optional content panes fit at a given width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Panes {
    filters: bool,
    side: bool,
}

impl Panes {
    fn for_width(width: u16) -> Self {
        Self {
            filters: width >= 60,
            side: width >= 100,
        }
    }
}

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(
        Style::default()
            .bg(app.theme.background)
            .fg(app.theme.foreground),
    );
    f.render_widget(bg_block, f.area());

    let mut constraints = vec![Constraint::Length(3), Constraint::Min(6)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(2));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    nav_bar::render(f, chunks[0], app);
    draw_content(f, chunks[1], app);
    if app.show_logs {
        let entries = app.log_buffer.tail(LOGS_HEIGHT as usize * 8);
        app.logs_panel.render(f, chunks[2], &entries, &app.theme);
    }
    status_bar::render(f, chunks[chunks.len() - 1], app);

    if let Some(ref toast) = app.toast {
        toast.render(f, f.area(), &app.theme);
    }
    app.clear_expired_toast();
}

fn draw_content(f: &mut Frame, area: Rect, app: &mut App) {
    let panes = Panes::for_width(area.width);

    let mut constraints = Vec::new();
    if panes.filters {
        constraints.push(Constraint::Length(FILTER_WIDTH));
    }
    constraints.push(Constraint::Min(30));
    if panes.side {
        constraints.push(Constraint::Percentage(35));
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    if panes.filters {
        app.filter_panel.render(
            f,
            chunks[next],
            app.controller.filters(),
            &app.theme,
            app.focus == Focus::Filters,
            app.controller.is_loading(),
        );
        next += 1;
    }

    let view = GridView {
        cards: app.controller.cards(),
        selection: app.controller.selection(),
        loading: app.controller.loading_state(),
        spinner: app.spinner_char(),
        focused: app.focus == Focus::Grid,
    };
    app.grid.render(f, chunks[next], view, &app.theme);
    next += 1;

    if panes.side {
        if app.show_my_cards {
            my_cards_panel::render(f, chunks[next], app.controller.selection(), &app.theme);
        } else {
            let card = app.highlighted_card();
            let owned = card.is_some_and(|c| app.controller.is_user_card(&c.id));
            card_detail::render(f, chunks[next], card, owned, &app.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panes_collapse_with_width() {
        assert_eq!(
            Panes::for_width(140),
            Panes {
                filters: true,
                side: true
            }
        );
        assert_eq!(
            Panes::for_width(80),
            Panes {
                filters: true,
                side: false
            }
        );
        assert_eq!(
            Panes::for_width(40),
            Panes {
                filters: false,
                side: false
            }
        );
    }
}
