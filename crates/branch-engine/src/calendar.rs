//! Same-day matching for the events calendar.
//!
//! All date-times are wall-clock values in the branch's single time zone, so day
//! equality is a plain comparison of year, month and day.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Anything placed on the calendar by a date-time.
pub trait Dated {
    fn occurs_at(&self) -> NaiveDateTime;
}

impl Dated for NaiveDateTime {
    fn occurs_at(&self) -> NaiveDateTime {
        *self
    }
}

/// True when `a` and `b` fall on the same calendar day, ignoring time of day.
pub fn same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Items dated on `date`, in their original relative order.
pub fn events_on<T: Dated>(date: NaiveDate, events: &[T]) -> Vec<&T> {
    events
        .iter()
        .filter(|event| event.occurs_at().date() == date)
        .collect()
}

/// Whether at least one item falls on `date` (calendar cell highlight).
pub fn has_events<T: Dated>(date: NaiveDate, events: &[T]) -> bool {
    events.iter().any(|event| event.occurs_at().date() == date)
}

/// Distinct days of `year`-`month` carrying at least one item, ascending.
pub fn days_with_events<T: Dated>(year: i32, month: u32, events: &[T]) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = events
        .iter()
        .map(|event| event.occurs_at().date())
        .filter(|day| day.year() == year && day.month() == month)
        .collect();
    days.sort_unstable();
    days.dedup();
    days
}

/// Today's date in the branch time zone.
pub fn today(tz: Tz) -> NaiveDate {
    now(tz).date()
}

/// The current wall-clock date-time in the branch time zone.
pub fn now(tz: Tz) -> NaiveDateTime {
    Utc::now().with_timezone(&tz).naive_local()
}

/// Heading for a selected day, e.g. "March 11th, 2024".
pub fn day_heading(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
