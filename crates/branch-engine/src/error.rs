//! Error types for branch-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid frequency: {0} (expected weekly, biweekly or monthly)")]
    InvalidFrequency(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// A batch of occurrences that stopped partway through persistence.
///
/// Records listed in `written` stay persisted; nothing is rolled back.
#[derive(Error, Debug)]
#[error("persisted {} of {total} events before failing: {source}", .written.len())]
pub struct PublishError<E: std::error::Error + 'static> {
    pub written: Vec<String>,
    pub total: usize,
    #[source]
    pub source: E,
}
