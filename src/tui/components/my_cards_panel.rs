// My cards panel
//
// Lists the user's selected cards in id order.

use crate::catalog::UserCardSelection;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, selection: &UserCardSelection, theme: &Theme) {
    let title = format!(" My cards ({}) ", selection.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.owned))
        .title(title);

    if selection.is_empty() {
        let hint = ListItem::new("Press Space on a card to add it")
            .style(Style::default().fg(theme.muted));
        f.render_widget(List::new(vec![hint]).block(block), area);
        return;
    }

    let items: Vec<ListItem> = selection
        .iter()
        .map(|card| ListItem::new(card.name.clone()).style(Style::default().fg(theme.foreground)))
        .collect();

    f.render_widget(List::new(items).block(block), area);
}
