//! Filter panel component
//!
//! Edits the listing filters. `orderBy`, `types` and `pageSize` cycle
//! through fixed choices and apply immediately; the name filter is free text
//! and applies after the quiet period. The panel never talks to the
//! controller itself: key handling returns a [`FilterIntent`] for the app to
//! carry out, and the whole panel ignores edits while a load is running.

use crate::catalog::query::{NAME, ORDER_BY, PAGE_SIZE, TYPES};
use crate::catalog::{FilterSet, FilterValue};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const ORDER_BY_CHOICES: &[&str] = &["name", "cost", "power", "health", "rarity"];
const TYPES_CHOICES: &[&str] = &["creature", "action", "item", "support"];
const PAGE_SIZE_CHOICES: &[i64] = &[10, 20, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    OrderBy,
    Types,
    PageSize,
    Name,
}

impl FilterField {
    const ALL: [FilterField; 4] = [
        FilterField::OrderBy,
        FilterField::Types,
        FilterField::PageSize,
        FilterField::Name,
    ];

    fn label(self) -> &'static str {
        match self {
            FilterField::OrderBy => "Order by",
            FilterField::Types => "Type",
            FilterField::PageSize => "Page size",
            FilterField::Name => "Name",
        }
    }

    fn key(self) -> &'static str {
        match self {
            FilterField::OrderBy => ORDER_BY,
            FilterField::Types => TYPES,
            FilterField::PageSize => PAGE_SIZE,
            FilterField::Name => NAME,
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }
}

/// What the app should do after a key reached the panel
#[derive(Debug, Clone, PartialEq)]
pub enum FilterIntent {
    None,
    Apply { filter: FilterSet, delayed: bool },
    Reset,
    /// Leave the panel
    Blur,
}

#[derive(Debug, Default)]
pub struct FilterPanel {
    field: FilterField,
    name: String,
}

impl FilterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self) -> FilterField {
        self.field
    }

    pub fn name_input(&self) -> &str {
        &self.name
    }

    /// Pick up the name filter after the filters were replaced from outside
    pub fn sync_from(&mut self, filters: &FilterSet) {
        self.name = filters
            .get(NAME)
            .map(|v| v.to_string())
            .unwrap_or_default();
    }

    pub fn handle_key(&mut self, key: KeyEvent, current: &FilterSet, disabled: bool) -> FilterIntent {
        match key.code {
            KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => return FilterIntent::Blur,
            KeyCode::Up => {
                self.step_field(-1);
                return FilterIntent::None;
            }
            KeyCode::Down => {
                self.step_field(1);
                return FilterIntent::None;
            }
            _ => {}
        }

        if disabled {
            return FilterIntent::None;
        }

        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return FilterIntent::Reset;
        }

        match (self.field, key.code) {
            (FilterField::Name, KeyCode::Char(c))
                if !key.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                self.name.push(c);
                self.name_intent(true)
            }
            (FilterField::Name, KeyCode::Backspace) => {
                if self.name.pop().is_none() {
                    return FilterIntent::None;
                }
                self.name_intent(true)
            }
            (FilterField::Name, KeyCode::Enter) => self.name_intent(false),
            (FilterField::Name, _) => FilterIntent::None,
            (field, KeyCode::Left) => cycle_intent(field, current, -1),
            (field, KeyCode::Right | KeyCode::Enter) => cycle_intent(field, current, 1),
            // Outside the name field, R resets like it does on the grid
            (_, KeyCode::Char('R')) => FilterIntent::Reset,
            _ => FilterIntent::None,
        }
    }

    fn step_field(&mut self, step: isize) {
        let len = FilterField::ALL.len() as isize;
        let next = (self.field.index() as isize + step).rem_euclid(len);
        self.field = FilterField::ALL[next as usize];
    }

    fn name_intent(&self, delayed: bool) -> FilterIntent {
        FilterIntent::Apply {
            filter: FilterSet::new().with(NAME, self.name.as_str()),
            delayed,
        }
    }

    pub fn render(
        &self,
        f: &mut Frame,
        area: Rect,
        filters: &FilterSet,
        theme: &Theme,
        focused: bool,
        disabled: bool,
    ) {
        let border_color = if focused { theme.highlight } else { theme.border };
        let title = if disabled { " Filters (loading) " } else { " Filters " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border_color))
            .title(title);

        let value_style = if disabled {
            Style::default().fg(theme.muted)
        } else {
            Style::default().fg(theme.foreground)
        };

        let mut lines = Vec::new();
        for field in FilterField::ALL {
            let value = match field {
                FilterField::Name => format!("{}_", self.name),
                _ => filters
                    .get(field.key())
                    .map(|v| format!("‹ {} ›", v))
                    .unwrap_or_else(|| "‹ - ›".to_string()),
            };

            let label_style = if focused && field == self.field {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.accent)
            };

            lines.push(Line::from(Span::styled(field.label(), label_style)));
            lines.push(Line::from(Span::styled(format!("  {}", value), value_style)));
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "←/→ change  ^R reset",
            Style::default().fg(theme.muted),
        )));

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Step a discrete filter to its neighbouring choice and apply it now
fn cycle_intent(field: FilterField, current: &FilterSet, step: isize) -> FilterIntent {
    let value = match field {
        FilterField::OrderBy => cycle_text(ORDER_BY_CHOICES, current.get(ORDER_BY), step),
        FilterField::Types => cycle_text(TYPES_CHOICES, current.get(TYPES), step),
        FilterField::PageSize => cycle_number(PAGE_SIZE_CHOICES, current.get(PAGE_SIZE), step),
        FilterField::Name => return FilterIntent::None,
    };
    FilterIntent::Apply {
        filter: FilterSet::new().with(field.key(), value),
        delayed: false,
    }
}

fn cycle_text(choices: &[&str], current: Option<&FilterValue>, step: isize) -> FilterValue {
    let position = current.and_then(|v| {
        let text = v.to_string();
        choices.iter().position(|c| *c == text)
    });
    FilterValue::from(choices[step_index(position, choices.len(), step)])
}

fn cycle_number(choices: &[i64], current: Option<&FilterValue>, step: isize) -> FilterValue {
    let position = current
        .and_then(FilterValue::as_number)
        .and_then(|n| choices.iter().position(|c| *c == n));
    FilterValue::from(choices[step_index(position, choices.len(), step)])
}

/// Neighbouring index with wrap-around; an unknown value starts at the first choice
fn step_index(position: Option<usize>, len: usize, step: isize) -> usize {
    match position {
        Some(i) => (i as isize + step).rem_euclid(len as isize) as usize,
        None => 0,
    }
}
