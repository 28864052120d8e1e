// Card detail pane
//
// Shows the highlighted card: name, image URL, "Card info" and "Set Name",
// plus the add/remove hint for the user's selection.

use crate::catalog::Card;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, card: Option<&Card>, owned: bool, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Card ");

    let Some(card) = card else {
        f.render_widget(block, area);
        return;
    };

    let label = Style::default()
        .fg(theme.accent)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            card.name.clone(),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.image_url_or_placeholder().to_string(),
            Style::default().fg(theme.muted),
        )),
        Line::default(),
    ];

    if let Some(text) = card.text.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::from(vec![
            Span::styled("Card info: ", label),
            Span::raw(text.to_string()),
        ]));
    }
    if let Some(set) = card.set_name() {
        lines.push(Line::from(vec![
            Span::styled("Set Name: ", label),
            Span::raw(set.to_string()),
        ]));
    }

    lines.push(Line::default());
    let action = if owned {
        "[Space] Remove from my cards"
    } else {
        "[Space] Add to my cards"
    };
    lines.push(Line::from(Span::styled(
        action,
        Style::default().fg(theme.highlight),
    )));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme.foreground))
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(paragraph, area);
}
