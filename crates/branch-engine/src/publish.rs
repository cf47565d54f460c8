//! Committing generated occurrences to a record store, one record per event.

use tracing::{debug, warn};

use crate::error::PublishError;
use crate::event::Event;

/// A store that creates one record per event and returns its identifier.
pub trait EventSink {
    type Error: std::error::Error + 'static;

    fn create(&mut self, event: &Event) -> Result<String, Self::Error>;
}

/// Persist `events` in order, stopping at the first failure.
///
/// Events written before the failure stay written; their identifiers are
/// reported in the returned [`PublishError`].
pub fn publish<S: EventSink>(
    sink: &mut S,
    events: &[Event],
) -> Result<Vec<String>, PublishError<S::Error>> {
    let mut written = Vec::with_capacity(events.len());

    for event in events {
        match sink.create(event) {
            Ok(id) => {
                debug!(id = %id, occurs_at = %event.occurs_at, "event created");
                written.push(id);
            }
            Err(source) => {
                warn!(
                    written = written.len(),
                    total = events.len(),
                    error = %source,
                    "event batch stopped partway"
                );
                return Err(PublishError {
                    written,
                    total: events.len(),
                    source,
                });
            }
        }
    }

    Ok(written)
}
