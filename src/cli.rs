// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - list: print the card listing without the TUI
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Show config file path

use crate::catalog::query::{parse_query, NAME, ORDER_BY, PAGE_SIZE, TYPES};
use crate::catalog::FilterSet;
use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;

/// deckview - browse a card catalog from the terminal
#[derive(Parser)]
#[command(name = "deckview")]
#[command(version = VERSION)]
#[command(about = "Browse a card catalog from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print cards to stdout instead of opening the TUI
    List(ListArgs),

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Card category (overrides the configured default)
    #[arg(long)]
    pub types: Option<String>,

    /// Sort field
    #[arg(long)]
    pub order_by: Option<String>,

    /// Cards per request
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Only cards whose name matches
    #[arg(long)]
    pub name: Option<String>,

    /// Raw filter query, e.g. "types=action&orderBy=cost" (named flags win)
    #[arg(long)]
    pub query: Option<String>,

    /// Number of pages to load
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Print one JSON object per card
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// Filters given on the command line, to merge over the defaults
    pub fn overrides(&self) -> FilterSet {
        let mut filters = self
            .query
            .as_deref()
            .map(parse_query)
            .unwrap_or_default();
        if let Some(order_by) = &self.order_by {
            filters = filters.with(ORDER_BY, order_by.as_str());
        }
        if let Some(page_size) = self.page_size {
            filters = filters.with(PAGE_SIZE, page_size);
        }
        if let Some(types) = &self.types {
            filters = filters.with(TYPES, types.as_str());
        }
        if let Some(name) = &self.name {
            filters = filters.with(NAME, name.as_str());
        }
        filters
    }
}

/// Run `config` subcommand flags
pub fn handle_config(show: bool, reset: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else {
        // No flag provided, show help
        println!("Usage: deckview config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::from_env()?;

    println!("# Effective configuration (env > file > defaults)");
    println!("# enable_tui = {}", config.enable_tui);
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating directory {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Error writing config {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}
