//! # branch-engine
//!
//! Calendar logic and document models for the branch website and its admin tools.
//!
//! The two pieces with real logic are the recurring date generator, which turns
//! one event plus a repeat rule into independent occurrences, and the same-day
//! matcher the calendar uses to pick a day's events. Everything else is typed
//! document shapes with small pure helpers.
//!
//! ## Modules
//!
//! - [`recurrence`]: start + inclusive end date + frequency → occurrence date-times
//! - [`calendar`]: same-day matching, day headings, calendar cell highlights
//! - [`event`]: stored event documents and the admin draft that expands into them
//! - [`publish`]: committing occurrences to a record store one by one
//! - [`menu`], [`roster`], [`announcement`], [`listing`]: other site sections
//! - [`error`]: Error types

pub mod announcement;
pub mod calendar;
pub mod error;
pub mod event;
pub mod listing;
pub mod menu;
pub mod publish;
pub mod recurrence;
pub mod roster;

pub use calendar::{days_with_events, events_on, has_events, same_day, Dated};
pub use error::{EngineError, PublishError};
pub use event::{Event, EventDraft, EventEnd};
pub use publish::{publish, EventSink};
pub use recurrence::{generate, BatchGuard, Frequency, RecurrenceRule};
