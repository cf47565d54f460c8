//! `branch` CLI: manage the branch website's content from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # A single event
//! branch events add --title "Darts" --date 2024-03-10 --start 19:00 \
//!     --description "League night"
//!
//! # Every Monday through March, open until closing
//! branch events add --title "Euchre" --date 2024-03-04 --start 13:00 --until-close \
//!     --description "Afternoon euchre" --repeat weekly --until 2024-03-25
//!
//! # What's on today, and which days in April have events
//! branch events on
//! branch events month 2024-04
//!
//! # Other site sections
//! branch menu add --name "Fish & Chips" --price 14.50 --category Entrees
//! branch executives seed
//! branch announcements list --active
//! ```
//!
//! Settings come from `branch.toml` (or `--config PATH`) and `BRANCH__*`
//! environment variables; see [`config::Settings`].

mod cli;
mod commands;
mod config;
mod store;

use anyhow::{Context, Result};
use branch_engine::BatchGuard;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::Cli;
use crate::commands::App;
use crate::config::Settings;
use crate::store::DocumentStore;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;
    init_tracing(&settings.logging.level);

    let store_path = cli.store.unwrap_or(settings.store.path);
    debug!(store = %store_path.display(), "opening document store");
    let store = DocumentStore::open(&store_path)
        .with_context(|| format!("Failed to open store at {}", store_path.display()))?;

    let mut app = App {
        store,
        tz: settings.calendar.tz()?,
        guard: BatchGuard::new(settings.recurrence.confirm_threshold),
    };
    commands::run(&mut app, cli.command)
}

/// Logs go to stderr. `RUST_LOG` takes precedence over `logging.level`.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
