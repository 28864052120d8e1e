//! Card catalog core
//!
//! Everything that decides what the listing shows lives here, independent of
//! how it is drawn:
//! - `query`: filter sets and query-string formatting
//! - `client`: the HTTP seam to the card listing API
//! - `model`: card records and listing pages
//! - `selection`: the user's local card selection
//! - `controller`: the state machine tying them together

pub mod client;
pub mod controller;
pub mod model;
pub mod query;
pub mod selection;

pub use client::{CardApi, FetchError, HttpCardApi};
pub use controller::{
    ControllerEvent, ControllerOptions, ListingController, LoadingState, PaginationState,
    ScrollMetrics, ViewEffect,
};
pub use model::{Card, CardId};
pub use query::{FilterSet, FilterValue};
pub use selection::UserCardSelection;

/// Listing endpoint for an API base URL
pub fn cards_endpoint(api_url: &str) -> String {
    format!("{}/cards", api_url.trim_end_matches('/'))
}
