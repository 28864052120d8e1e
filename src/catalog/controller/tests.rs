//! Listing controller tests
//!
//! The controller runs against a scripted `CardApi` that answers requests
//! in order. Tests drive the event channel by hand so every state change is
//! observable between issuing a request and applying its response.

use super::*;
use crate::catalog::query::NAME;
use futures::future::BoxFuture;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

const ENDPOINT: &str = "https://api.test/v1/cards";

#[derive(Default)]
struct ScriptedApi {
    responses: Mutex<VecDeque<Result<Value, FetchError>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedApi {
    fn push(&self, response: Result<Value, FetchError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl CardApi for ScriptedApi {
    fn get_json<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Value, FetchError>> {
        self.requests.lock().unwrap().push(url.to_string());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Network("no scripted response".to_string())));
        Box::pin(async move { response })
    }
}

struct Harness {
    controller: ListingController,
    rx: mpsc::UnboundedReceiver<ControllerEvent>,
    api: Arc<ScriptedApi>,
}

impl Harness {
    fn new() -> Self {
        let api = Arc::new(ScriptedApi::default());
        let (controller, rx) = ListingController::new(
            api.clone() as Arc<dyn CardApi>,
            ENDPOINT,
            ControllerOptions::default(),
        );
        Self {
            controller,
            rx,
            api,
        }
    }

    /// Receive the next controller event and apply it
    async fn pump(&mut self) {
        let event = self.rx.recv().await.expect("controller event");
        self.controller.handle_event(event);
    }

    /// Initialize and apply the first page
    async fn started(first_page: Result<Value, FetchError>) -> Self {
        let mut harness = Self::new();
        harness.api.push(first_page);
        harness.controller.initialize();
        harness.pump().await;
        harness
    }

    fn names(&self) -> Vec<String> {
        self.controller
            .cards()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }
}

fn page(names: &[&str], total: u64, next: bool) -> Result<Value, FetchError> {
    let cards: Vec<Value> = names
        .iter()
        .map(|name| json!({ "id": format!("id-{}", name), "name": name }))
        .collect();
    let mut body = json!({ "cards": cards, "_totalCount": total });
    if next {
        body["_links"] = json!({ "next": "https://api.test/v1/cards?page=next" });
    }
    Ok(body)
}

fn default_url() -> String {
    format!("{}?orderBy=name&page=1&pageSize=20&types=creature", ENDPOINT)
}

fn near_bottom() -> ScrollMetrics {
    ScrollMetrics {
        viewport_height: 800,
        scroll_offset: 1200,
        document_height: 2400,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Initialization and paging
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_initialize_loads_first_page() {
    let mut h = Harness::new();
    h.api.push(page(&["Aegon", "Tyrion", "Jorah"], 40, true));

    h.controller.initialize();
    assert_eq!(h.controller.loading_state(), LoadingState::LoadingInitial);
    assert!(!h.controller.is_observing_scroll());

    h.pump().await;

    assert_eq!(h.api.requests(), vec![default_url()]);
    assert_eq!(h.names(), ["Aegon", "Tyrion", "Jorah"]);
    assert_eq!(h.controller.filters().page(), Some(2));
    assert_eq!(
        h.controller.pagination(),
        PaginationState {
            total_count: 40,
            has_more: true,
            loading: LoadingState::Idle,
        }
    );
    assert!(h.controller.is_observing_scroll());
    assert_eq!(h.controller.drain_effects(), vec![ViewEffect::ScrollToTop]);
}

#[tokio::test]
async fn test_initialize_twice_issues_one_request() {
    let mut h = Harness::new();
    h.api.push(page(&["Aegon"], 1, false));

    h.controller.initialize();
    h.controller.initialize();
    h.pump().await;

    assert_eq!(h.api.requests().len(), 1);
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test]
async fn test_no_next_link_freezes_page() {
    let h = Harness::started(page(&["Aegon", "Tyrion"], 2, false)).await;

    assert_eq!(h.controller.filters().page(), Some(1));
    assert!(!h.controller.pagination().has_more);
}

#[tokio::test]
async fn test_next_link_advances_page_by_one() {
    let mut h = Harness::started(page(&["Aegon"], 50, true)).await;
    assert_eq!(h.controller.filters().page(), Some(2));

    h.api.push(page(&["Tyrion"], 50, true));
    assert!(h.controller.load_more());
    h.pump().await;

    assert_eq!(h.controller.filters().page(), Some(3));
    assert!(h.api.requests()[1].contains("page=2"));
}

#[tokio::test]
async fn test_reload_replaces_and_load_more_appends() {
    let mut h = Harness::started(page(&["Aegon", "Tyrion"], 10, true)).await;
    h.controller.drain_effects();

    h.api.push(page(&["Jorah", "Arya"], 10, true));
    h.controller.load_more();
    assert_eq!(h.controller.loading_state(), LoadingState::LoadingMore);
    h.pump().await;
    assert_eq!(h.names(), ["Aegon", "Tyrion", "Jorah", "Arya"]);
    // Appending leaves the scroll position alone
    assert!(h.controller.drain_effects().is_empty());

    h.api.push(page(&["Sansa"], 1, false));
    h.controller.reload();
    h.pump().await;
    assert_eq!(h.names(), ["Sansa"]);
    assert_eq!(h.controller.drain_effects(), vec![ViewEffect::ScrollToTop]);
}

#[tokio::test]
async fn test_card_list_is_a_new_value_per_fetch() {
    let mut h = Harness::started(page(&["Aegon"], 5, true)).await;
    let before = h.controller.cards_snapshot();

    h.api.push(page(&["Tyrion"], 5, true));
    h.controller.load_more();
    h.pump().await;

    assert_eq!(before.len(), 1);
    assert_eq!(h.controller.cards().len(), 2);
}

#[tokio::test]
async fn test_load_more_refused_while_loading() {
    let mut h = Harness::started(page(&["Aegon"], 10, true)).await;

    h.api.push(page(&["Tyrion"], 10, true));
    h.controller.reload();
    assert!(!h.controller.load_more());
    h.pump().await;

    assert_eq!(h.api.requests().len(), 2);
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test]
async fn test_not_found_body_empties_listing() {
    let mut h = Harness::started(page(&["Aegon"], 10, true)).await;

    h.api.push(Ok(json!({ "message": "nothing here" })));
    h.controller.apply_filter(&FilterSet::new().with(NAME, "zzz"), false);
    h.pump().await;

    assert!(h.controller.cards().is_empty());
    assert_eq!(h.controller.pagination().total_count, 0);
    assert!(!h.controller.pagination().has_more);
}

// ─────────────────────────────────────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────────────────────────────────────

async fn assert_failure_leaves_state(failure: FetchError) {
    let mut h = Harness::started(page(&["Aegon", "Tyrion"], 30, true)).await;
    h.controller.drain_effects();
    let filters = h.controller.filters().clone();
    let names = h.names();

    h.api.push(Err(failure));
    h.controller.load_more();
    h.pump().await;

    assert_eq!(h.names(), names);
    assert_eq!(h.controller.filters(), &filters);
    assert_eq!(h.controller.pagination().total_count, 30);
    assert!(h.controller.pagination().has_more);
    assert_eq!(h.controller.loading_state(), LoadingState::Idle);

    let effects = h.controller.drain_effects();
    assert_eq!(effects.len(), 1);
    assert!(matches!(&effects[0], ViewEffect::Notify(msg) if msg.starts_with("Could not load cards")));
}

#[tokio::test]
async fn test_network_failure_leaves_state() {
    assert_failure_leaves_state(FetchError::Network("connection reset".to_string())).await;
}

#[tokio::test]
async fn test_http_failure_leaves_state() {
    assert_failure_leaves_state(FetchError::Http {
        status: 500,
        body: "boom".to_string(),
    })
    .await;
}

#[tokio::test]
async fn test_malformed_shape_leaves_state() {
    let mut h = Harness::started(page(&["Aegon"], 30, true)).await;

    h.api.push(Ok(json!({ "cards": 42 })));
    h.controller.reload();
    h.pump().await;

    assert_eq!(h.names(), ["Aegon"]);
    assert_eq!(h.controller.loading_state(), LoadingState::Idle);
}

#[tokio::test]
async fn test_failed_first_load_still_starts_scroll_observation() {
    let h = Harness::started(Err(FetchError::Network("offline".to_string()))).await;

    assert!(h.controller.cards().is_empty());
    assert!(h.controller.is_observing_scroll());
    assert_eq!(h.controller.loading_state(), LoadingState::Idle);
}

// ─────────────────────────────────────────────────────────────────────────────
// Filters and debounce
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_apply_filter_rewinds_page_and_reloads_once() {
    let mut h = Harness::started(page(&["Aegon"], 100, true)).await;
    h.api.push(page(&["Tyrion"], 100, true));
    h.controller.load_more();
    h.pump().await;
    assert_eq!(h.controller.filters().page(), Some(3));

    h.api.push(page(&["Jorah"], 1, false));
    h.controller.apply_filter(&FilterSet::new().with("x", 1), false);

    assert_eq!(h.controller.filters().page(), Some(1));
    assert_eq!(h.controller.loading_state(), LoadingState::LoadingInitial);
    h.pump().await;

    let requests = h.api.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(
        requests[2],
        format!("{}?orderBy=name&page=1&pageSize=20&types=creature&x=1", ENDPOINT)
    );
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_delayed_filters_collapse_into_one_reload() {
    let mut h = Harness::new();
    h.api.push(page(&["Ragnar"], 1, false));

    h.controller
        .apply_filter(&FilterSet::new().with(NAME, "ra"), true);
    h.controller.apply_filter(
        &FilterSet::new().with(NAME, "rag").with(TYPES, "action"),
        true,
    );
    assert!(h.controller.has_pending_debounce());
    assert!(h.api.requests().is_empty());

    // Debounce tick, then the fetch it started
    h.pump().await;
    assert!(!h.controller.has_pending_debounce());
    h.pump().await;

    assert_eq!(
        h.api.requests(),
        vec![format!(
            "{}?orderBy=name&page=1&pageSize=20&types=action&name=rag",
            ENDPOINT
        )]
    );
    assert_eq!(h.names(), ["Ragnar"]);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(h.rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_delayed_filter_waits_for_quiet_period() {
    let mut h = Harness::new();
    h.api.push(page(&["Ragnar"], 1, false));

    h.controller
        .apply_filter(&FilterSet::new().with(NAME, "r"), true);
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(h.rx.try_recv().is_err());

    // A new keystroke restarts the wait
    h.controller
        .apply_filter(&FilterSet::new().with(NAME, "ra"), true);
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(h.rx.try_recv().is_err());
    assert!(h.api.requests().is_empty());

    h.pump().await;
    h.pump().await;
    assert_eq!(h.api.requests().len(), 1);
    assert!(h.api.requests()[0].ends_with("name=ra"));
}

#[tokio::test(start_paused = true)]
async fn test_immediate_filter_cancels_pending_debounce() {
    let mut h = Harness::new();
    h.api.push(page(&["Aegon"], 1, false));

    h.controller
        .apply_filter(&FilterSet::new().with(NAME, "ae"), true);
    h.controller
        .apply_filter(&FilterSet::new().with(TYPES, "support"), false);
    assert!(!h.controller.has_pending_debounce());

    h.pump().await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(h.rx.try_recv().is_err());
    assert_eq!(h.api.requests().len(), 1);
    assert!(h.api.requests()[0].contains("name=ae"));
}

#[tokio::test]
async fn test_reset_filters_restores_defaults() {
    let mut h = Harness::started(page(&["Aegon"], 100, true)).await;
    h.api.push(page(&["Tyrion"], 1, false));
    h.controller
        .apply_filter(&FilterSet::new().with(TYPES, "action").with("mello", "yellow"), false);
    h.pump().await;

    h.api.push(page(&["Jorah"], 1, false));
    h.controller.reset_filters();

    assert_eq!(
        h.controller.filters(),
        &FilterSet::new()
            .with("orderBy", "name")
            .with("page", 1)
            .with("pageSize", 20)
            .with("types", "creature")
    );
    h.pump().await;
    assert_eq!(h.api.requests().last(), Some(&default_url()));
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let mut h = Harness::started(page(&["Aegon"], 10, false)).await;

    h.api.push(page(&["Stale"], 1, false));
    h.api.push(page(&["Fresh"], 1, false));
    h.controller.reload();
    h.controller
        .apply_filter(&FilterSet::new().with(TYPES, "action"), false);

    h.pump().await;
    // The superseded response must not clear the newer request's flag
    assert_eq!(h.names(), ["Aegon"]);
    assert_eq!(h.controller.loading_state(), LoadingState::LoadingInitial);

    h.pump().await;
    assert_eq!(h.names(), ["Fresh"]);
    assert_eq!(h.controller.loading_state(), LoadingState::Idle);
}

#[tokio::test]
async fn test_reload_supersedes_load_more_in_flight() {
    let mut h = Harness::started(page(&["Aegon"], 40, true)).await;
    h.controller.drain_effects();
    assert_eq!(h.controller.filters().page(), Some(2));

    h.api.push(page(&["Appended"], 40, true));
    h.api.push(page(&["Fresh", "Faces"], 2, false));
    assert!(h.controller.load_more());
    h.controller.reload();
    assert_eq!(h.controller.loading_state(), LoadingState::LoadingInitial);

    // The append arrives first and is dropped without touching the cursor
    h.pump().await;
    assert_eq!(h.names(), ["Aegon"]);
    assert_eq!(h.controller.filters().page(), Some(2));
    assert_eq!(h.controller.loading_state(), LoadingState::LoadingInitial);

    h.pump().await;
    assert_eq!(h.names(), ["Fresh", "Faces"]);
    assert_eq!(h.controller.filters().page(), Some(2));
    assert_eq!(
        h.controller.pagination(),
        PaginationState {
            total_count: 2,
            has_more: false,
            loading: LoadingState::Idle,
        }
    );
    assert_eq!(h.controller.drain_effects(), vec![ViewEffect::ScrollToTop]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_scroll_near_bottom_loads_more() {
    let mut h = Harness::started(page(&["Aegon", "Tyrion"], 40, true)).await;

    h.api.push(page(&["Jorah"], 40, true));
    assert!(h.controller.on_scroll(near_bottom()));
    assert_eq!(h.controller.loading_state(), LoadingState::LoadingMore);
    h.pump().await;

    assert_eq!(h.names(), ["Aegon", "Tyrion", "Jorah"]);
}

#[tokio::test]
async fn test_scroll_far_from_bottom_is_ignored() {
    let mut h = Harness::started(page(&["Aegon"], 40, true)).await;

    let far = ScrollMetrics {
        viewport_height: 800,
        scroll_offset: 0,
        document_height: 5000,
    };
    assert!(!h.controller.on_scroll(far));
    assert!(!h.controller.is_loading());
}

#[tokio::test]
async fn test_scroll_ignored_when_everything_is_loaded() {
    let mut h = Harness::started(page(&["Aegon", "Tyrion"], 2, true)).await;

    assert!(!h.controller.on_scroll(near_bottom()));
    assert_eq!(h.api.requests().len(), 1);
}

#[tokio::test]
async fn test_scroll_ignored_while_loading() {
    let mut h = Harness::started(page(&["Aegon"], 40, true)).await;

    h.api.push(page(&["Tyrion"], 40, true));
    h.api.push(page(&["Jorah"], 40, true));
    h.controller.reload();
    assert!(!h.controller.on_scroll(near_bottom()));

    // Only the reload's response arrives
    h.pump().await;
    tokio::task::yield_now().await;
    assert!(h.rx.try_recv().is_err());
    assert_eq!(h.names(), ["Tyrion"]);
    assert_eq!(h.api.requests().len(), 2);
}

#[tokio::test]
async fn test_scroll_ignored_before_first_load_settles() {
    let mut h = Harness::new();
    h.api.push(page(&["Aegon"], 40, true));
    h.controller.initialize();

    assert!(!h.controller.on_scroll(near_bottom()));
}

#[test]
fn test_near_bottom_threshold() {
    let at_edge = ScrollMetrics {
        viewport_height: 400,
        scroll_offset: 1000,
        document_height: 2000,
    };
    assert!(at_edge.near_bottom(600));
    assert!(!at_edge.near_bottom(599));
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection and lifecycle
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_user_card_add_and_remove() {
    let mut h = Harness::new();
    let card = Card::new(7, "Jorah Mormont");

    h.controller.set_user_card(card.clone(), false);
    assert!(h.controller.is_user_card(&CardId::from(7)));

    h.controller.set_user_card(card, true);
    assert!(!h.controller.is_user_card(&CardId::from(7)));
    assert!(h.controller.selection().is_empty());
    assert!(h.api.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_dispose_cancels_timer_and_drops_in_flight() {
    let mut h = Harness::started(page(&["Aegon"], 40, true)).await;

    h.api.push(page(&["Late"], 40, true));
    h.controller.reload();
    h.controller
        .apply_filter(&FilterSet::new().with(NAME, "x"), true);
    h.controller.dispose();

    assert!(!h.controller.is_observing_scroll());
    assert!(!h.controller.is_loading());

    // The fetch that was already running still reports, but is dropped
    h.pump().await;
    assert_eq!(h.names(), ["Aegon"]);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(h.rx.try_recv().is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// End to end
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_listing_walkthrough() {
    let mut h = Harness::started(page(&["Aegon", "Tyrion", "Jorah"], 3, true)).await;

    assert_eq!(h.controller.cards().len(), 3);
    assert_eq!(h.controller.filters().page(), Some(2));
    assert!(h.controller.pagination().has_more);

    h.api.push(page(&["Arya", "Sansa"], 5, false));
    assert!(h.controller.load_more());
    h.pump().await;

    assert_eq!(h.names(), ["Aegon", "Tyrion", "Jorah", "Arya", "Sansa"]);
    assert_eq!(h.controller.filters().page(), Some(2));
    assert!(!h.controller.pagination().has_more);

    assert!(!h.controller.on_scroll(near_bottom()));
    assert!(!h.controller.on_scroll(near_bottom()));
    assert_eq!(h.api.requests().len(), 2);
}
