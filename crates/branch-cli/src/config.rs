use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub store: StoreConfig,
    pub calendar: CalendarConfig,
    pub recurrence: RecurrenceConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    pub timezone: String,
}

impl CalendarConfig {
    /// The branch time zone used for "today" and "now".
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid calendar.timezone '{}': {}", self.timezone, e))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecurrenceConfig {
    /// Batches larger than this ask for confirmation.
    pub confirm_threshold: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// Loads settings from defaults, then `branch.toml` (or `path`), then `BRANCH__*`
    /// environment variables. Later sources win.
    ///
    /// ## Errors
    /// Returns an error if an explicit config file is missing or a value fails to deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("branch.toml").required(false),
        };

        Config::builder()
            .set_default("store.path", "branch-data")?
            .set_default("calendar.timezone", "America/Toronto")?
            .set_default(
                "recurrence.confirm_threshold",
                branch_engine::recurrence::DEFAULT_CONFIRM_THRESHOLD as i64,
            )?
            .set_default("logging.level", "warn")?
            .add_source(file)
            .add_source(
                Environment::with_prefix("BRANCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to load configuration")
    }
}
