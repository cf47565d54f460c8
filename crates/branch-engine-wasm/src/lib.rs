//! WASM bindings for branch-engine.
//!
//! Exposes recurring date generation and calendar-day matching to the website's
//! JavaScript via `wasm-bindgen`. Complex values cross the boundary as JSON
//! strings; events use the same document shape the site stores.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p branch-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir site/src/wasm/ \
//!   target/wasm32-unknown-unknown/release/branch_engine_wasm.wasm
//! ```

use branch_engine::event::parse_date;
use branch_engine::{EngineError, Event, Frequency};
use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// A stored event plus the label the calendar shows next to it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EventView<'a> {
    #[serde(flatten)]
    event: &'a Event,
    time_range: String,
}

// ---------------------------------------------------------------------------
// Helpers: parsing inputs coming from form fields and Firestore-style JSON
// ---------------------------------------------------------------------------

/// Parse a start as `YYYY-MM-DDTHH:MM[:SS]`, or a bare date meaning midnight.
fn parse_start(s: &str) -> Result<NaiveDateTime, String> {
    let trimmed = s.trim();
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .or_else(|_| parse_date(trimmed).map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| format!("Invalid start '{}': expected YYYY-MM-DDTHH:MM", s))
}

fn parse_events_json(json: &str) -> Result<Vec<Event>, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid events JSON: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn generate_json(start: &str, end: &str, frequency: &str) -> Result<String, String> {
    let start = parse_start(start)?;
    let end = parse_date(end).map_err(|e| e.to_string())?;
    let frequency: Frequency = frequency.parse().map_err(|e: EngineError| e.to_string())?;

    let occurrences: Vec<String> = branch_engine::generate(start, end, frequency)
        .iter()
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .collect();
    to_json(&occurrences)
}

fn events_on_json(date: &str, events_json: &str) -> Result<String, String> {
    let date = parse_date(date).map_err(|e| e.to_string())?;
    let events = parse_events_json(events_json)?;

    let views: Vec<EventView<'_>> = branch_engine::events_on(date, &events)
        .into_iter()
        .map(|event| EventView {
            event,
            time_range: event.time_range_label(),
        })
        .collect();
    to_json(&views)
}

fn days_with_events_json(year: i32, month: u32, events_json: &str) -> Result<String, String> {
    let events = parse_events_json(events_json)?;
    let days: Vec<String> = branch_engine::days_with_events(year, month, &events)
        .iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect();
    to_json(&days)
}

fn time_range_label_json(event_json: &str) -> Result<String, String> {
    let event: Event =
        serde_json::from_str(event_json).map_err(|e| format!("Invalid event JSON: {}", e))?;
    Ok(event.time_range_label())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate occurrence date-times for a repeating event.
///
/// Returns a JSON array of `YYYY-MM-DDTHH:MM:SS` strings.
///
/// # Arguments
/// - `start` -- First occurrence, e.g. "2024-03-04T18:00"
/// - `end` -- Inclusive last day, e.g. "2024-03-25"
/// - `frequency` -- "weekly", "biweekly" or "monthly"
#[wasm_bindgen(js_name = "generateOccurrences")]
pub fn generate_occurrences(start: &str, end: &str, frequency: &str) -> Result<String, JsValue> {
    generate_json(start, end, frequency).map_err(|e| JsValue::from_str(&e))
}

/// Events falling on `date` (YYYY-MM-DD), in input order, each with a `timeRange` label.
///
/// `events_json` must be a JSON array of stored event documents.
#[wasm_bindgen(js_name = "eventsOn")]
pub fn events_on(date: &str, events_json: &str) -> Result<String, JsValue> {
    events_on_json(date, events_json).map_err(|e| JsValue::from_str(&e))
}

/// Days of the given month carrying at least one event, as a JSON array of dates.
#[wasm_bindgen(js_name = "daysWithEvents")]
pub fn days_with_events(year: i32, month: u32, events_json: &str) -> Result<String, JsValue> {
    days_with_events_json(year, month, events_json).map_err(|e| JsValue::from_str(&e))
}

/// Display label for one stored event, e.g. "6:00 PM - Close".
#[wasm_bindgen(js_name = "timeRangeLabel")]
pub fn time_range_label(event_json: &str) -> Result<String, JsValue> {
    time_range_label_json(event_json).map_err(|e| JsValue::from_str(&e))
}
