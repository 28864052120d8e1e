// Theme system for the TUI
//
// A theme is a flat set of resolved colors. Named themes are built in;
// unknown names fall back to the default dark theme.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Names accepted by [`Theme::by_name`], in display order
pub const THEME_NAMES: &[&str] = &["Deck Dark", "Deck Light", "Terminal"];

/// Complete resolved theme ready for use in the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Terminal Colors ─────────────────────────────────────
    pub background: Color,
    pub foreground: Color,

    // ─── UI Element Colors ───────────────────────────────────
    pub title: Color,
    pub border: Color,
    pub highlight: Color,
    pub status_bar: Color,
    pub accent: Color,
    pub error: Color,
    pub warn: Color,

    // ─── Selection Colors ────────────────────────────────────
    pub selection: Color,
    pub selection_fg: Color,

    /// Cards already in the user's selection
    pub owned: Color,

    // ─── Secondary/Muted Text ────────────────────────────────
    pub muted: Color,

    // ─── Border Style ────────────────────────────────────────
    pub border_type: BorderType,
}

impl Default for Theme {
    fn default() -> Self {
        Self::deck_dark()
    }
}

impl Theme {
    /// Load theme by name (case-insensitive, `_` and `-` match spaces)
    pub fn by_name(name: &str) -> Self {
        let normalized = name.trim().to_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "deck light" => Self::deck_light(),
            "terminal" => Self::terminal(),
            "deck dark" => Self::deck_dark(),
            _ => {
                tracing::debug!("Unknown theme '{}', using default", name);
                Self::deck_dark()
            }
        }
    }

    pub fn deck_dark() -> Self {
        Self {
            name: "Deck Dark".to_string(),
            background: Color::Rgb(0x1b, 0x1d, 0x23),
            foreground: Color::Rgb(0xd8, 0xdc, 0xe4),
            title: Color::Rgb(0xe5, 0xc0, 0x7b),
            border: Color::Rgb(0x4b, 0x52, 0x63),
            highlight: Color::Rgb(0x61, 0xaf, 0xef),
            status_bar: Color::Rgb(0x98, 0xc3, 0x79),
            accent: Color::Rgb(0xc6, 0x78, 0xdd),
            error: Color::Rgb(0xe0, 0x6c, 0x75),
            warn: Color::Rgb(0xd1, 0x9a, 0x66),
            selection: Color::Rgb(0x3e, 0x44, 0x51),
            selection_fg: Color::Rgb(0xff, 0xff, 0xff),
            owned: Color::Rgb(0x98, 0xc3, 0x79),
            muted: Color::Rgb(0x7f, 0x84, 0x8e),
            border_type: BorderType::Rounded,
        }
    }

    pub fn deck_light() -> Self {
        Self {
            name: "Deck Light".to_string(),
            background: Color::Rgb(0xfa, 0xfa, 0xfa),
            foreground: Color::Rgb(0x38, 0x3a, 0x42),
            title: Color::Rgb(0x98, 0x68, 0x01),
            border: Color::Rgb(0xa0, 0xa1, 0xa7),
            highlight: Color::Rgb(0x40, 0x78, 0xf2),
            status_bar: Color::Rgb(0x50, 0xa1, 0x4f),
            accent: Color::Rgb(0xa6, 0x26, 0xa4),
            error: Color::Rgb(0xe4, 0x56, 0x49),
            warn: Color::Rgb(0xc1, 0x84, 0x01),
            selection: Color::Rgb(0xd0, 0xd7, 0xe5),
            selection_fg: Color::Rgb(0x00, 0x00, 0x00),
            owned: Color::Rgb(0x50, 0xa1, 0x4f),
            muted: Color::Rgb(0x69, 0x6c, 0x77),
            border_type: BorderType::Rounded,
        }
    }

    /// Uses the terminal's own ANSI palette
    pub fn terminal() -> Self {
        Self {
            name: "Terminal".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            title: Color::Cyan,
            border: Color::Gray,
            highlight: Color::Yellow,
            status_bar: Color::Green,
            accent: Color::Magenta,
            error: Color::Red,
            warn: Color::Yellow,
            selection: Color::Blue,
            selection_fg: Color::White,
            owned: Color::Green,
            muted: Color::DarkGray,
            border_type: BorderType::Plain,
        }
    }
}
