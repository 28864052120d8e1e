//! Catalog configuration
//!
//! The default filter set, the free-text debounce window and the scroll
//! prefetch distance handed to the listing controller.

use crate::catalog::controller::{
    default_filters, ControllerOptions, DEFAULT_DEBOUNCE, DEFAULT_ORDER_BY, DEFAULT_PAGE_SIZE,
    DEFAULT_SCROLL_THRESHOLD, DEFAULT_TYPES,
};
use crate::catalog::query::{FilterSet, ORDER_BY, PAGE_SIZE, TYPES};
use serde::Deserialize;
use std::time::Duration;

/// Listing defaults and timing
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// Sort field of the default filter set
    pub order_by: String,
    /// Page size of the default filter set
    pub page_size: u32,
    /// Card category of the default filter set
    pub types: String,
    /// Quiet period before a typed filter is applied (milliseconds)
    pub debounce_ms: u64,
    /// Prefetch distance from the bottom of the list (pixels)
    pub scroll_threshold: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            order_by: DEFAULT_ORDER_BY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            types: DEFAULT_TYPES.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

/// Catalog settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileCatalog {
    pub order_by: Option<String>,
    pub page_size: Option<u32>,
    pub types: Option<String>,
    pub debounce_ms: Option<u64>,
    pub scroll_threshold: Option<u32>,
}

impl CatalogConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileCatalog>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            order_by: file.order_by.unwrap_or(defaults.order_by),
            // Zero would ask the API for empty pages forever
            page_size: file
                .page_size
                .filter(|&size| size > 0)
                .unwrap_or(defaults.page_size),
            types: file.types.unwrap_or(defaults.types),
            debounce_ms: file.debounce_ms.unwrap_or(defaults.debounce_ms),
            scroll_threshold: file.scroll_threshold.unwrap_or(defaults.scroll_threshold),
        }
    }

    /// The listing defaults with the configured values merged over them
    pub fn default_filters(&self) -> FilterSet {
        default_filters().merged(
            &FilterSet::new()
                .with(ORDER_BY, self.order_by.as_str())
                .with(PAGE_SIZE, self.page_size)
                .with(TYPES, self.types.as_str()),
        )
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            defaults: self.default_filters(),
            debounce: Duration::from_millis(self.debounce_ms),
            scroll_threshold: self.scroll_threshold,
        }
    }
}
