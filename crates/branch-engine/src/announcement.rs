//! Time-limited announcements shown on the home page.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::event::{parse_date, parse_wall_clock};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    /// Last moment the announcement is shown.
    pub end_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl Announcement {
    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.end_date < now
    }
}

impl AsRef<Announcement> for Announcement {
    fn as_ref(&self) -> &Announcement {
        self
    }
}

/// Sort by `created_at`, most recent first.
pub fn newest_first<T: AsRef<Announcement>>(announcements: &mut [T]) {
    announcements.sort_by(|a, b| b.as_ref().created_at.cmp(&a.as_ref().created_at));
}

/// Announcements still showing at `now`, newest first.
pub fn active<T: AsRef<Announcement>>(announcements: &[T], now: NaiveDateTime) -> Vec<&T> {
    let mut showing: Vec<&T> = announcements
        .iter()
        .filter(|a| !a.as_ref().is_expired(now))
        .collect();
    newest_first(&mut showing);
    showing
}

/// Raw admin input for an announcement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnouncementDraft {
    pub title: String,
    pub message: String,
    pub link: String,
    /// `YYYY-MM-DD`
    pub end_date: String,
    /// `HH:MM`; blank means 23:59.
    pub end_time: String,
}

impl AnnouncementDraft {
    pub fn into_announcement(self, created_at: NaiveDateTime) -> Result<Announcement> {
        if self.title.trim().is_empty() {
            return Err(EngineError::MissingField("title"));
        }
        if self.message.trim().is_empty() {
            return Err(EngineError::MissingField("message"));
        }
        let date = parse_date(&self.end_date)?;
        let time = if self.end_time.trim().is_empty() {
            NaiveTime::from_hms_opt(23, 59, 0).unwrap_or(NaiveTime::MIN)
        } else {
            parse_wall_clock(&self.end_time)?
        };
        let link = self.link.trim();

        Ok(Announcement {
            title: self.title.trim().to_string(),
            message: self.message.trim().to_string(),
            link: (!link.is_empty()).then(|| link.to_string()),
            end_date: date.and_time(time),
            created_at,
        })
    }
}
