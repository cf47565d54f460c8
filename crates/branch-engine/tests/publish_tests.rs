//! Tests for committing generated occurrences to a record store.

use branch_engine::{publish, EventDraft, EventSink};
use std::fmt;

#[derive(Debug)]
struct StoreDown;

impl fmt::Display for StoreDown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("store unavailable")
    }
}

impl std::error::Error for StoreDown {}

/// In-memory sink that fails once `fail_after` records have been written.
struct FlakySink {
    stored: Vec<branch_engine::Event>,
    fail_after: Option<usize>,
}

impl EventSink for FlakySink {
    type Error = StoreDown;

    fn create(&mut self, event: &branch_engine::Event) -> Result<String, StoreDown> {
        if self.fail_after == Some(self.stored.len()) {
            return Err(StoreDown);
        }
        self.stored.push(event.clone());
        Ok(format!("evt-{}", self.stored.len()))
    }
}

fn weekly_events(until: &str) -> Vec<branch_engine::Event> {
    EventDraft {
        title: "Euchre".to_string(),
        date: "2024-03-04".to_string(),
        start_time: "13:00".to_string(),
        description: "Afternoon euchre".to_string(),
        repeat: Some("weekly".to_string()),
        repeat_until: Some(until.to_string()),
        ..EventDraft::default()
    }
    .to_events()
    .expect("draft should be valid")
}

#[test]
fn publishes_every_occurrence_in_order() {
    let events = weekly_events("2024-03-25");
    let mut sink = FlakySink {
        stored: Vec::new(),
        fail_after: None,
    };

    let ids = publish(&mut sink, &events).expect("all writes succeed");

    assert_eq!(ids, vec!["evt-1", "evt-2", "evt-3", "evt-4"]);
    assert_eq!(sink.stored, events);
}

#[test]
fn partial_failure_keeps_written_records() {
    let events = weekly_events("2024-03-25");
    let mut sink = FlakySink {
        stored: Vec::new(),
        fail_after: Some(2),
    };

    let err = publish(&mut sink, &events).expect_err("third write fails");

    assert_eq!(err.written, vec!["evt-1", "evt-2"]);
    assert_eq!(err.total, 4);
    assert_eq!(sink.stored.len(), 2, "no rollback of written records");
    assert_eq!(
        err.to_string(),
        "persisted 2 of 4 events before failing: store unavailable"
    );
}

#[test]
fn failure_on_first_write_reports_nothing_written() {
    let events = weekly_events("2024-03-11");
    let mut sink = FlakySink {
        stored: Vec::new(),
        fail_after: Some(0),
    };

    let err = publish(&mut sink, &events).expect_err("first write fails");
    assert!(err.written.is_empty());
    assert_eq!(err.total, 2);
}

#[test]
fn empty_batch_is_a_no_op() {
    let mut sink = FlakySink {
        stored: Vec::new(),
        fail_after: Some(0),
    };
    assert_eq!(publish(&mut sink, &[]).unwrap(), Vec::<String>::new());
}
