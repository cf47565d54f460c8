//! Recurring date generation -- expands one event start into its occurrence date-times.
//!
//! The end date is inclusive (end-of-day). Monthly steps roll over the way calendar
//! date normalization does: a day-of-month the next month lacks spills into the
//! month after (Jan 31 + 1 month is Mar 2 in a leap year, Mar 3 otherwise).

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Batches above this many occurrences should be confirmed before persisting.
pub const DEFAULT_CONFIRM_THRESHOLD: usize = 52;

/// How far apart consecutive occurrences are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every 7 days.
    Weekly,
    /// Every 14 days.
    Biweekly,
    /// Same day-of-month, one calendar month later (with rollover).
    Monthly,
}

impl Frequency {
    /// Advance `cursor` by one step. Returns `None` past chrono's representable range.
    pub fn advance(self, cursor: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Frequency::Weekly => cursor.checked_add_days(Days::new(7)),
            Frequency::Biweekly => cursor.checked_add_days(Days::new(14)),
            Frequency::Monthly => add_month_rolling(cursor),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            _ => Err(EngineError::InvalidFrequency(s.to_string())),
        }
    }
}

/// Transient recurrence settings attached to an event at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    /// Last calendar day (inclusive) an occurrence may fall on.
    pub until: NaiveDate,
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, until: NaiveDate) -> Self {
        Self { frequency, until }
    }

    /// Expand the rule from `start`. See [`generate`].
    pub fn expand(&self, start: NaiveDateTime) -> Vec<NaiveDateTime> {
        generate(start, self.until, self.frequency)
    }
}

/// Soft limit on how many occurrences may be created without asking first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchGuard {
    pub confirm_above: usize,
}

impl Default for BatchGuard {
    fn default() -> Self {
        Self {
            confirm_above: DEFAULT_CONFIRM_THRESHOLD,
        }
    }
}

impl BatchGuard {
    pub fn new(confirm_above: usize) -> Self {
        Self { confirm_above }
    }

    pub fn requires_confirmation(&self, count: usize) -> bool {
        count > self.confirm_above
    }
}

/// The last representable instant of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last_milli = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    date.and_time(last_milli)
}

/// Generate every occurrence from `start` through the end of `end`, stepping by `frequency`.
///
/// The time of day of `start` is carried onto every occurrence. The result is
/// strictly increasing and empty when `start` falls after the end of `end`.
/// Length is not capped here; see [`BatchGuard`].
pub fn generate(start: NaiveDateTime, end: NaiveDate, frequency: Frequency) -> Vec<NaiveDateTime> {
    let limit = end_of_day(end);
    let mut occurrences = Vec::new();
    let mut cursor = Some(start);

    while let Some(current) = cursor {
        if current > limit {
            break;
        }
        occurrences.push(current);
        cursor = frequency.advance(current);
    }

    occurrences
}

/// Add one calendar month, spilling a day-of-month the target month lacks into the next one.
fn add_month_rolling(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    let (year, month) = if dt.month() == 12 {
        (dt.year().checked_add(1)?, 1)
    } else {
        (dt.year(), dt.month() + 1)
    };

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first.checked_add_days(Days::new(u64::from(dt.day0())))?;
    Some(date.and_time(dt.time()))
}
