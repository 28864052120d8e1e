//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# deckview configuration

# Card API base URL (listings are read from <api_url>/cards)
api_url = "{api_url}"

# Theme: {themes}
theme = "{theme}"

# Listing defaults ('R' in the TUI resets to these)
[catalog]
order_by = "{order_by}"
page_size = {page_size}
types = "{types}"
# Quiet period before a typed filter is applied
debounce_ms = {debounce_ms}
# Prefetch the next page when this close to the bottom (pixels)
scroll_threshold = {scroll_threshold}

# Logging configuration (RUST_LOG env var overrides)
[logging]
# off, error, warn, info, debug, trace
level = "{log_level}"
# JSON lines log file (in addition to the TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_url = escape(&self.api_url),
            theme = escape(&self.theme),
            themes = crate::theme::THEME_NAMES.join(", "),
            order_by = escape(&self.catalog.order_by),
            page_size = self.catalog.page_size,
            types = escape(&self.catalog.types),
            debounce_ms = self.catalog.debounce_ms,
            scroll_threshold = self.catalog.scroll_threshold,
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = escape(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = escape(&self.logging.file_prefix),
        )
    }
}

/// Escape a value for a TOML basic string
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
