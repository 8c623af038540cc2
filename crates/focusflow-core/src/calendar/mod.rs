//! Calendar events and recurrence resolution.

mod event;
pub mod recurrence;

pub use event::{
    add_event, default_event_color, delete_event, Event, NewEvent, RecurrenceKind, EVENT_COLORS,
};
pub use recurrence::{events_on, events_starting_in_hour, occurs_on, start_day};
