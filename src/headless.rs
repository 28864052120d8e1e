//! Headless listing
//!
//! Drives the same listing controller the TUI uses, without a terminal:
//! load the first page, then keep calling `load_more` until the requested
//! number of pages is printed or the listing runs out.

use crate::catalog::{
    cards_endpoint, Card, CardApi, ControllerEvent, FilterSet, ListingController, ViewEffect,
};
use crate::config::Config;
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;

/// What to list and how to print it
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Merged over the configured default filters
    pub overrides: FilterSet,
    pub pages: u32,
    pub json: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            overrides: FilterSet::new(),
            pages: 1,
            json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListSummary {
    pub printed: usize,
    pub total_count: u64,
}

/// Print the listing to `out`, one card per line
pub async fn run_list<W: Write>(
    config: &Config,
    api: Arc<dyn CardApi>,
    options: &ListOptions,
    out: &mut W,
) -> Result<ListSummary> {
    let mut controller_options = config.catalog.controller_options();
    controller_options.defaults = controller_options.defaults.merged(&options.overrides);

    let (mut controller, mut rx) =
        ListingController::new(api, cards_endpoint(&config.api_url), controller_options);

    controller.initialize();
    settle(&mut controller, &mut rx).await?;

    let mut printed = print_cards(out, &controller.cards()[..], options.json)?;
    let mut pages = 1;

    while pages < options.pages && controller.pagination().has_more {
        if !controller.load_more() {
            break;
        }
        settle(&mut controller, &mut rx).await?;
        printed += print_cards(out, &controller.cards()[printed..], options.json)?;
        pages += 1;
    }

    controller.dispose();

    let summary = ListSummary {
        printed,
        total_count: controller.pagination().total_count,
    };
    tracing::info!(
        printed = summary.printed,
        total = summary.total_count,
        pages,
        "Listing complete"
    );
    Ok(summary)
}

/// Feed completions back until the current load has finished
///
/// A failed load surfaces as an error here; the controller already logged it.
async fn settle(
    controller: &mut ListingController,
    rx: &mut mpsc::UnboundedReceiver<ControllerEvent>,
) -> Result<()> {
    while controller.is_loading() {
        let event = rx
            .recv()
            .await
            .context("Listing controller stopped unexpectedly")?;
        controller.handle_event(event);
    }

    for effect in controller.drain_effects() {
        if let ViewEffect::Notify(message) = effect {
            bail!(message);
        }
    }
    Ok(())
}

fn print_cards<W: Write>(out: &mut W, cards: &[Card], json: bool) -> Result<usize> {
    for card in cards {
        if json {
            serde_json::to_writer(&mut *out, card)?;
            writeln!(out)?;
        } else {
            writeln!(
                out,
                "{}\t{}\t{}",
                card.id,
                card.name,
                card.set_name().unwrap_or("-")
            )?;
        }
    }
    Ok(cards.len())
}
