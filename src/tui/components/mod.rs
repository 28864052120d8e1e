// Components module - reusable UI building blocks
//
// Shell components are rendered on every frame:
// - Nav bar: title, spinner, total and my-cards counts
// - Status bar: loaded/total, page cursor, loading state
// - Logs panel: tail of the log buffer (toggled)
//
// Content components: card grid, card detail, filter panel, my cards panel.
// The toast overlays everything.

pub mod card_detail;
pub mod card_grid;
pub mod filter_panel;
pub mod logs_panel;
pub mod my_cards_panel;
pub mod nav_bar;
pub mod scrollbar;
pub mod status_bar;
pub mod toast;

pub use card_grid::{CardGrid, GridView};
pub use filter_panel::{FilterIntent, FilterPanel};
pub use logs_panel::LogsPanel;
pub use toast::Toast;
