// deckview - Card catalog viewer for the terminal
//
// Browses a paginated card listing API with filters, infinite scroll and a
// local "my cards" selection.
//
// Architecture:
// - Catalog: query formatting, the HTTP client, and the listing controller
//   that owns filters, pagination, loading flags and the user's selection
// - TUI (ratatui): renders controller state and turns input into controller calls
// - Headless: drives the same controller and prints cards to stdout
// - Fetches and the filter debounce run as tokio tasks that report back to
//   the controller's owner over an mpsc channel

mod catalog;
mod cli;
mod config;
mod headless;
mod logging;
mod theme;
mod tui;

use anyhow::{Context, Result};
use catalog::{CardApi, HttpCardApi};
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LoggingConfig};
use headless::ListOptions;
use logging::{BufferLayer, LogBuffer};
use std::sync::Arc;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let list_args = match cli.command {
        Some(Commands::Config { show, reset, path }) => {
            return cli::handle_config(show, reset, path)
        }
        Some(Commands::List(args)) => Some(args),
        None => None,
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env()?;
    let use_tui = config.enable_tui && list_args.is_none();

    // Logs go to the in-memory buffer while the TUI owns the screen
    let log_buffer = LogBuffer::new();
    // Keep the guard alive so the file writer flushes on exit
    let _file_guard = init_tracing(&config, use_tui, &log_buffer);

    tracing::debug!(api_url = %config.api_url, "Configuration loaded");

    let api: Arc<dyn CardApi> =
        Arc::new(HttpCardApi::new().context("Failed to create HTTP client")?);

    if use_tui {
        tracing::info!("Starting TUI");
        tui::run_tui(config, api, log_buffer).await?;
    } else {
        let options = list_args
            .map(|args| ListOptions {
                overrides: args.overrides(),
                pages: args.pages,
                json: args.json,
            })
            .unwrap_or_default();

        let mut stdout = std::io::stdout().lock();
        headless::run_list(&config, api, &options, &mut stdout).await?;
    }

    tracing::debug!("Shutdown complete");
    Ok(())
}

/// Initialize tracing with conditional output
///
/// - TUI mode: capture logs to the buffer (prevents garbling the display)
/// - Headless mode: human-readable logs on stderr, stdout stays for cards
/// - File logging: optional JSON lines in rotating files, in addition to the above
///
/// Precedence: RUST_LOG env var > config file > default "info"
fn init_tracing(config: &Config, use_tui: bool, log_buffer: &LogBuffer) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive().into());

    let buffer_layer = use_tui.then(|| BufferLayer::new(log_buffer.clone()));
    let stderr_layer =
        (!use_tui).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let (file_layer, guard) = match file_writer(&config.logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(buffer_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Non-blocking rolling file writer, when file logging is enabled
fn file_writer(logging: &LoggingConfig) -> Option<(NonBlocking, WorkerGuard)> {
    match logging.open_file_appender() {
        Ok(appender) => appender.map(tracing_appender::non_blocking),
        Err(e) => {
            // Tracing is not up yet; fall back to non-file logging
            eprintln!("Warning: file logging disabled: {:#}", e);
            None
        }
    }
}
