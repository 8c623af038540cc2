//! Calendar events and the event board operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::generate_id;
use crate::error::ValidationError;

/// Repetition rule attached to a calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
}

impl RecurrenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::Daily => "daily",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
        }
    }
}

impl std::str::FromStr for RecurrenceKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(RecurrenceKind::Daily),
            "weekly" => Ok(RecurrenceKind::Weekly),
            "monthly" => Ok(RecurrenceKind::Monthly),
            other => Err(ValidationError::InvalidValue {
                field: "recurrence".into(),
                message: format!("expected daily, weekly or monthly, got '{other}'"),
            }),
        }
    }
}

/// A calendar event as stored under the events key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub color: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub is_recurring: bool,
    /// Unrecognised kinds read as `None`, leaving a one-off event.
    #[serde(
        default,
        deserialize_with = "lenient_recurrence",
        skip_serializing_if = "Option::is_none"
    )]
    pub recurrence_type: Option<RecurrenceKind>,
    pub created_at: DateTime<Utc>,
}

fn lenient_recurrence<'de, D: Deserializer<'de>>(d: D) -> Result<Option<RecurrenceKind>, D::Error> {
    let raw = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => match s.parse() {
            Ok(kind) => Some(kind),
            Err(_) => {
                tracing::warn!(kind = %s, "unrecognised recurrence kind, treating event as one-off");
                None
            }
        },
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            tracing::warn!(kind = %other, "unrecognised recurrence kind, treating event as one-off");
            None
        }
    })
}

impl Event {
    /// The rule that applies when resolving occurrences, if any.
    pub fn recurrence(&self) -> Option<RecurrenceKind> {
        if self.is_recurring {
            self.recurrence_type
        } else {
            None
        }
    }

    /// Length in whole minutes; negative for inverted ranges in stored data.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

/// User input for a new event. Id and creation time are assigned on add.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub color: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub recurrence: Option<RecurrenceKind>,
}

/// Palette offered when creating an event.
pub const EVENT_COLORS: [&str; 10] = [
    "#FFB6C1", "#98FB98", "#87CEEB", "#DDA0DD", "#F0E68C", "#FFA07A", "#20B2AA", "#87CEFA",
    "#DEB887", "#F5DEB3",
];

pub fn default_event_color() -> &'static str {
    EVENT_COLORS[0]
}

/// Validate `input` and append a new event to `events`.
pub fn add_event(
    events: &mut Vec<Event>,
    input: NewEvent,
    now: DateTime<Utc>,
) -> Result<Event, ValidationError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyField { field: "title" });
    }
    if input.end_time < input.start_time {
        return Err(ValidationError::InvalidTimeRange {
            start: input.start_time,
            end: input.end_time,
        });
    }
    let color = match input.color.trim() {
        "" => default_event_color().to_string(),
        c => c.to_string(),
    };

    let event = Event {
        id: generate_id(),
        title: title.to_string(),
        color,
        start_time: input.start_time,
        end_time: input.end_time,
        is_recurring: input.recurrence.is_some(),
        recurrence_type: input.recurrence,
        created_at: now,
    };
    events.push(event.clone());
    Ok(event)
}

/// Remove the event with `id`. Returns whether anything was removed.
pub fn delete_event(events: &mut Vec<Event>, id: &str) -> bool {
    let before = events.len();
    events.retain(|e| e.id != id);
    events.len() != before
}
