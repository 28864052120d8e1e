//! Listing controller
//!
//! Owns the filter set, the loaded card list, pagination and loading flags,
//! and the user's card selection. Turns filter edits and scroll position into
//! listing requests and merges the responses.
//!
//! # Scheduling
//!
//! All state changes happen synchronously inside `&mut self` methods. When a
//! fetch is needed the loading flag is set first, then the request is spawned
//! onto the tokio runtime. Spawned work never touches controller state: it
//! reports back as a [`ControllerEvent`] on the channel returned by
//! [`ListingController::new`], and the loop that owns the controller feeds it
//! to [`ListingController::handle_event`].
//!
//! ```text
//! key / scroll ─► apply_filter / on_scroll ─► issue() ─► spawn(get_json)
//!                                                             │
//! handle_event ◄──────────── ControllerEvent::Fetched ◄───────┘
//! ```
//!
//! The loading flag is the only mutual-exclusion mechanism for `load_more`.
//! Every request carries an id; only the response to the most recently
//! issued request is applied, older ones are dropped on arrival.

use super::client::{CardApi, FetchError};
use super::model::{Card, CardId, CardPage};
use super::query::{format_query, FilterSet, ORDER_BY, PAGE, PAGE_SIZE, TYPES};
use super::selection::UserCardSelection;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[cfg(test)]
mod tests;

/// Quiet period before a free-text filter edit is applied
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Distance from the bottom edge at which the next page is requested
pub const DEFAULT_SCROLL_THRESHOLD: u32 = 600;

pub const DEFAULT_ORDER_BY: &str = "name";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_TYPES: &str = "creature";

/// The filter set the listing starts from and resets to
pub fn default_filters() -> FilterSet {
    FilterSet::new()
        .with(ORDER_BY, DEFAULT_ORDER_BY)
        .with(PAGE, 1)
        .with(PAGE_SIZE, DEFAULT_PAGE_SIZE)
        .with(TYPES, DEFAULT_TYPES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    #[default]
    Idle,
    /// Fetching a page that will replace the list
    LoadingInitial,
    /// Fetching a page that will be appended
    LoadingMore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaginationState {
    /// `_totalCount` from the latest applied response
    pub total_count: u64,
    /// Whether the latest applied response carried a next-page link
    pub has_more: bool,
    pub loading: LoadingState,
}

/// How a response is merged into the card list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    Replace,
    Append,
}

/// Scroll position reported by the view, all in the threshold's unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub viewport_height: u32,
    pub scroll_offset: u32,
    pub document_height: u32,
}

impl ScrollMetrics {
    /// Bottom edge of the viewport is within `threshold` of the document end
    pub fn near_bottom(&self, threshold: u32) -> bool {
        self.viewport_height.saturating_add(self.scroll_offset)
            >= self.document_height.saturating_sub(threshold)
    }
}

/// Side effects the view should perform, drained after each update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEffect {
    /// The list was replaced; jump back to the first card
    ScrollToTop,
    /// Transient message for the user
    Notify(String),
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub defaults: FilterSet,
    pub debounce: Duration,
    pub scroll_threshold: u32,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            defaults: default_filters(),
            debounce: DEFAULT_DEBOUNCE,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
        }
    }
}

/// Completion messages from work the controller spawned
#[derive(Debug)]
pub enum ControllerEvent {
    Fetched {
        request: u64,
        mode: LoadMode,
        result: Result<Value, FetchError>,
    },
    DebounceElapsed {
        seq: u64,
    },
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    request: u64,
    mode: LoadMode,
}

struct DebounceTimer {
    seq: u64,
    handle: JoinHandle<()>,
}

pub struct ListingController {
    api: Arc<dyn CardApi>,
    endpoint: String,
    options: ControllerOptions,
    events: mpsc::UnboundedSender<ControllerEvent>,

    filters: FilterSet,
    cards: Arc<Vec<Card>>,
    selection: UserCardSelection,
    pagination: PaginationState,

    in_flight: Option<InFlight>,
    next_request: u64,
    debounce: Option<DebounceTimer>,
    debounce_seq: u64,

    initialized: bool,
    /// Set while the first load after `initialize` has not settled
    awaiting_first_settle: bool,
    observing_scroll: bool,
    effects: Vec<ViewEffect>,
}

impl ListingController {
    /// Create a controller for the listing at `endpoint` (the full `/cards` URL)
    ///
    /// The returned receiver must be drained into [`Self::handle_event`].
    pub fn new(
        api: Arc<dyn CardApi>,
        endpoint: impl Into<String>,
        options: ControllerOptions,
    ) -> (Self, mpsc::UnboundedReceiver<ControllerEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let controller = Self {
            api,
            endpoint: endpoint.into(),
            filters: options.defaults.clone(),
            options,
            events,
            cards: Arc::new(Vec::new()),
            selection: UserCardSelection::new(),
            pagination: PaginationState::default(),
            in_flight: None,
            next_request: 0,
            debounce: None,
            debounce_seq: 0,
            initialized: false,
            awaiting_first_settle: false,
            observing_scroll: false,
            effects: Vec::new(),
        };
        (controller, rx)
    }

    // ─── Lifecycle ──────────────────────────────────────────

    /// Start from the default filters and load the first page
    ///
    /// Scroll observation begins once that load settles. Calling this again
    /// before [`Self::dispose`] does nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            tracing::debug!("Listing controller already initialized");
            return;
        }
        self.initialized = true;
        self.awaiting_first_settle = true;
        self.filters = self.options.defaults.clone();
        self.reload();
    }

    /// Stop observing scroll, cancel the debounce timer and drop any
    /// in-flight response
    pub fn dispose(&mut self) {
        self.cancel_debounce();
        self.observing_scroll = false;
        self.awaiting_first_settle = false;
        self.initialized = false;
        if let Some(in_flight) = self.in_flight.take() {
            tracing::debug!(request = in_flight.request, "Dropping in-flight request on dispose");
        }
        self.pagination.loading = LoadingState::Idle;
    }

    // ─── Loading ────────────────────────────────────────────

    /// Request the current filters and replace the card list with the result
    pub fn reload(&mut self) {
        let query = self.filters.clone();
        self.reload_with(&query);
    }

    /// Request an explicit query and replace the card list with the result
    ///
    /// The page cursor that advances on success is still the controller's own.
    pub fn reload_with(&mut self, query: &FilterSet) {
        self.issue(LoadMode::Replace, query);
    }

    /// Request the next page and append it
    ///
    /// Returns false without doing anything while another load is running.
    pub fn load_more(&mut self) -> bool {
        if self.pagination.loading != LoadingState::Idle {
            tracing::trace!("load_more skipped, already loading");
            return false;
        }
        let query = self.filters.clone();
        self.issue(LoadMode::Append, &query);
        true
    }

    fn issue(&mut self, mode: LoadMode, query: &FilterSet) -> u64 {
        let url = format!("{}{}", self.endpoint, format_query(query));

        self.next_request += 1;
        let request = self.next_request;
        if let Some(previous) = self.in_flight.replace(InFlight { request, mode }) {
            tracing::debug!(
                superseded = previous.request,
                request,
                "Newer listing request supersedes one in flight"
            );
        }
        self.pagination.loading = match mode {
            LoadMode::Replace => LoadingState::LoadingInitial,
            LoadMode::Append => LoadingState::LoadingMore,
        };

        tracing::debug!(request, ?mode, %url, "Requesting cards");

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = api.get_json(&url).await;
            // A closed channel means the owner is gone
            let _ = events.send(ControllerEvent::Fetched {
                request,
                mode,
                result,
            });
        });

        request
    }

    // ─── Filters ────────────────────────────────────────────

    /// Merge `partial` into the filters, rewind to page 1 and reload
    ///
    /// With `delayed` the reload waits for a quiet period; a newer delayed
    /// edit restarts the wait, so a burst of edits triggers one reload.
    pub fn apply_filter(&mut self, partial: &FilterSet, delayed: bool) {
        self.filters = self.filters.merged(partial).with_page(1);

        if delayed {
            self.arm_debounce();
        } else {
            self.cancel_debounce();
            self.reload();
        }
    }

    /// Replace the filters with the defaults and reload
    pub fn reset_filters(&mut self) {
        self.cancel_debounce();
        self.filters = self.options.defaults.clone();
        self.reload();
    }

    fn arm_debounce(&mut self) {
        self.cancel_debounce();
        self.debounce_seq += 1;
        let seq = self.debounce_seq;
        let delay = self.options.debounce;
        let events = self.events.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(ControllerEvent::DebounceElapsed { seq });
        });
        self.debounce = Some(DebounceTimer { seq, handle });
    }

    fn cancel_debounce(&mut self) {
        if let Some(timer) = self.debounce.take() {
            timer.handle.abort();
        }
    }

    // ─── Scroll ─────────────────────────────────────────────

    /// React to a scroll position change
    ///
    /// Loads the next page when the viewport nears the bottom. Returns whether
    /// a load was started.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) -> bool {
        if !self.observing_scroll || self.pagination.loading != LoadingState::Idle {
            return false;
        }
        let all_loaded = self.pagination.total_count == self.cards.len() as u64;
        if all_loaded || !self.pagination.has_more {
            return false;
        }
        if !metrics.near_bottom(self.options.scroll_threshold) {
            return false;
        }
        self.load_more()
    }

    // ─── Selection ──────────────────────────────────────────

    /// Add `card` to the user's selection, or remove it with `remove`
    pub fn set_user_card(&mut self, card: Card, remove: bool) {
        self.selection = if remove {
            self.selection.without(&card.id)
        } else {
            self.selection.with(card)
        };
    }

    // ─── Completions ────────────────────────────────────────

    pub fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Fetched {
                request,
                mode,
                result,
            } => self.handle_fetched(request, mode, result),
            ControllerEvent::DebounceElapsed { seq } => match self.debounce.take() {
                Some(timer) if timer.seq == seq => self.reload(),
                other => {
                    tracing::trace!(seq, "Ignoring superseded debounce tick");
                    self.debounce = other;
                }
            },
        }
    }

    fn handle_fetched(&mut self, request: u64, mode: LoadMode, result: Result<Value, FetchError>) {
        match self.in_flight {
            Some(current) if current.request == request => {}
            _ => {
                tracing::debug!(request, "Discarding stale listing response");
                return;
            }
        }
        self.in_flight = None;
        self.pagination.loading = LoadingState::Idle;

        match result.and_then(CardPage::from_value) {
            Ok(page) => self.apply_page(mode, page),
            Err(err) => {
                tracing::warn!(request, error = %err, "An error occurred while loading cards");
                self.effects
                    .push(ViewEffect::Notify(format!("Could not load cards: {}", err)));
            }
        }

        if self.awaiting_first_settle {
            self.awaiting_first_settle = false;
            self.observing_scroll = true;
            tracing::debug!("First load settled, observing scroll");
        }
    }

    fn apply_page(&mut self, mode: LoadMode, page: CardPage) {
        let has_more = page.has_next();
        let received = page.cards.len();

        self.cards = Arc::new(match mode {
            LoadMode::Replace => page.cards,
            LoadMode::Append => self.cards.iter().cloned().chain(page.cards).collect(),
        });
        self.pagination.total_count = page.total_count;
        self.pagination.has_more = has_more;

        // Without a next link the cursor stays put
        if has_more {
            let current = self.filters.page().unwrap_or(1);
            self.filters = self.filters.with_page(current + 1);
        }

        if mode == LoadMode::Replace {
            self.effects.push(ViewEffect::ScrollToTop);
        }

        tracing::info!(
            received,
            loaded = self.cards.len(),
            total = page.total_count,
            has_more,
            "Cards loaded"
        );
    }

    // ─── Read access for the view ───────────────────────────

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shared handle to the current card list value
    #[cfg(test)]
    pub fn cards_snapshot(&self) -> Arc<Vec<Card>> {
        Arc::clone(&self.cards)
    }

    pub fn selection(&self) -> &UserCardSelection {
        &self.selection
    }

    pub fn is_user_card(&self, id: &CardId) -> bool {
        self.selection.contains(id)
    }

    pub fn pagination(&self) -> PaginationState {
        self.pagination
    }

    pub fn loading_state(&self) -> LoadingState {
        self.pagination.loading
    }

    pub fn is_loading(&self) -> bool {
        self.pagination.loading != LoadingState::Idle
    }

    pub fn has_pending_debounce(&self) -> bool {
        self.debounce.is_some()
    }

    #[cfg(test)]
    pub fn is_observing_scroll(&self) -> bool {
        self.observing_scroll
    }

    /// Take the side effects queued since the last call
    pub fn drain_effects(&mut self) -> Vec<ViewEffect> {
        std::mem::take(&mut self.effects)
    }
}

impl Drop for ListingController {
    fn drop(&mut self) {
        self.cancel_debounce();
    }
}
