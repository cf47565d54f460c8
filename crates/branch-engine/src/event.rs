//! Event records and the admin draft they are created from.
//!
//! An [`Event`] is stored as the flat document the website reads:
//! `{"title", "date", "startTime", "endTime", "untilClose", "description"}`,
//! with `endTime` set to `"Close"` for events running until closing.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::calendar::Dated;
use crate::error::{EngineError, Result};
use crate::recurrence::{Frequency, RecurrenceRule};

const CLOSE_MARKER: &str = "Close";

/// A single persisted occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "EventDocument", try_from = "EventDocument")]
pub struct Event {
    pub title: String,
    /// Date and start time used for calendar placement and ordering.
    pub occurs_at: NaiveDateTime,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub until_close: bool,
    pub description: String,
}

/// How an event ends, folding `end_time` and `until_close` together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventEnd {
    Unspecified,
    At(NaiveTime),
    UntilClose,
}

impl Event {
    pub fn end(&self) -> EventEnd {
        match (self.until_close, self.end_time) {
            (true, _) => EventEnd::UntilClose,
            (false, Some(time)) => EventEnd::At(time),
            (false, None) => EventEnd::Unspecified,
        }
    }

    /// Display label such as `"6:00 PM - 9:30 PM"` or `"6:00 PM - Close"`.
    pub fn time_range_label(&self) -> String {
        let Some(start) = self.start_time else {
            return twelve_hour(self.occurs_at.time());
        };
        let start = twelve_hour(start);
        match self.end() {
            EventEnd::UntilClose => format!("{} - {}", start, CLOSE_MARKER),
            EventEnd::At(end) => format!("{} - {}", start, twelve_hour(end)),
            EventEnd::Unspecified => start,
        }
    }
}

impl Dated for Event {
    fn occurs_at(&self) -> NaiveDateTime {
        self.occurs_at
    }
}

/// Stable sort by `occurs_at`, the order the calendar loads events in.
pub fn sort_by_date<T: Dated>(events: &mut [T]) {
    events.sort_by_key(T::occurs_at);
}

fn twelve_hour(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Parse a `YYYY-MM-DD` form date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(raw.to_string()))
}

/// Parse an `HH:MM` (or `HH:MM:SS`) wall-clock time.
pub fn parse_wall_clock(raw: &str) -> Result<NaiveTime> {
    let trimmed = raw.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| EngineError::InvalidTime(raw.to_string()))
}

fn optional_wall_clock(raw: &str) -> Result<Option<NaiveTime>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(CLOSE_MARKER) {
        return Ok(None);
    }
    parse_wall_clock(trimmed).map(Some)
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventDocument {
    title: String,
    date: NaiveDateTime,
    #[serde(default)]
    start_time: String,
    #[serde(default)]
    end_time: String,
    #[serde(default)]
    until_close: bool,
    #[serde(default)]
    description: String,
}

impl From<Event> for EventDocument {
    fn from(event: Event) -> Self {
        let end_time = match event.end() {
            EventEnd::UntilClose => CLOSE_MARKER.to_string(),
            EventEnd::At(time) => time.format("%H:%M").to_string(),
            EventEnd::Unspecified => String::new(),
        };
        Self {
            title: event.title,
            date: event.occurs_at,
            start_time: event
                .start_time
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_default(),
            end_time,
            until_close: event.until_close,
            description: event.description,
        }
    }
}

impl TryFrom<EventDocument> for Event {
    type Error = EngineError;

    fn try_from(doc: EventDocument) -> Result<Self> {
        let until_close = doc.until_close || doc.end_time.trim() == CLOSE_MARKER;
        Ok(Self {
            title: doc.title,
            occurs_at: doc.date,
            start_time: optional_wall_clock(&doc.start_time)?,
            end_time: if until_close {
                None
            } else {
                optional_wall_clock(&doc.end_time)?
            },
            until_close,
            description: doc.description,
        })
    }
}

/// Raw admin input for a new event, optionally repeating.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`; blank places the event at midnight with no start time shown.
    pub start_time: String,
    pub end_time: String,
    pub until_close: bool,
    pub description: String,
    /// `weekly`, `biweekly` or `monthly`.
    pub repeat: Option<String>,
    /// Inclusive `YYYY-MM-DD` end of the repetition.
    pub repeat_until: Option<String>,
}

impl EventDraft {
    /// The recurrence rule, if the draft repeats.
    pub fn recurrence(&self) -> Result<Option<RecurrenceRule>> {
        let Some(frequency) = self.repeat.as_deref().filter(|f| !f.trim().is_empty()) else {
            return Ok(None);
        };
        let frequency: Frequency = frequency.parse()?;
        let until = self
            .repeat_until
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(EngineError::MissingField("repeat until"))?;
        Ok(Some(RecurrenceRule::new(frequency, parse_date(until)?)))
    }

    /// Validate the draft and expand it into one event per occurrence.
    ///
    /// Without a recurrence this yields exactly one event. With one, a repeat-until
    /// date before the start yields no events.
    pub fn to_events(&self) -> Result<Vec<Event>> {
        if self.title.trim().is_empty() {
            return Err(EngineError::MissingField("title"));
        }
        if self.description.trim().is_empty() {
            return Err(EngineError::MissingField("description"));
        }

        let date = parse_date(&self.date)?;
        let start_time = optional_wall_clock(&self.start_time)?;
        let end_time = if self.until_close {
            None
        } else {
            optional_wall_clock(&self.end_time)?
        };
        let start = date.and_time(start_time.unwrap_or(NaiveTime::MIN));

        let occurrences = match self.recurrence()? {
            Some(rule) => rule.expand(start),
            None => vec![start],
        };

        Ok(occurrences
            .into_iter()
            .map(|occurs_at| Event {
                title: self.title.trim().to_string(),
                occurs_at,
                start_time,
                end_time,
                until_close: self.until_close,
                description: self.description.trim().to_string(),
            })
            .collect())
    }
}
