//! Memory notes and their spaced-repetition review plan.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::dates::{combine, generate_id};
use crate::error::ValidationError;
use crate::notifications::{Reminder, Trigger};

/// Characters of content shown before the note is expanded.
pub const PREVIEW_CHARS: usize = 80;

/// Days after creation at which a note comes up for review.
pub const REVIEW_INTERVALS_DAYS: [i64; 4] = [1, 3, 7, 30];

/// Prefix shared by every review reminder id.
pub const REVIEW_ID_PREFIX: &str = "memory-review-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl MemoryItem {
    pub fn preview(&self) -> String {
        if self.content.chars().count() > PREVIEW_CHARS {
            let head: String = self.content.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        } else {
            self.content.clone()
        }
    }
}

pub fn add_memory_item(
    items: &mut Vec<MemoryItem>,
    title: &str,
    content: &str,
    now: DateTime<Utc>,
) -> Result<MemoryItem, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyField { field: "title" });
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::EmptyField { field: "content" });
    }

    let item = MemoryItem {
        id: generate_id(),
        title: title.to_string(),
        content: content.to_string(),
        created_at: now,
    };
    items.push(item.clone());
    Ok(item)
}

pub fn delete_memory_item(items: &mut Vec<MemoryItem>, id: &str) -> bool {
    let before = items.len();
    items.retain(|i| i.id != id);
    items.len() != before
}

/// One-shot review reminders for `item` still in the future at `now`.
pub fn review_reminders<Tz: TimeZone>(
    item: &MemoryItem,
    at: NaiveTime,
    now: DateTime<Utc>,
    tz: &Tz,
) -> Vec<Reminder> {
    let created = item.created_at.with_timezone(tz).date_naive();
    REVIEW_INTERVALS_DAYS
        .iter()
        .filter_map(|&days| {
            let due = combine(created + Duration::days(days), at, tz).ok()?;
            (due > now).then(|| Reminder {
                id: format!("{REVIEW_ID_PREFIX}{}-{days}", item.id),
                title: "FocusFlow".into(),
                body: format!("Time to review: {}", item.title),
                trigger: Trigger::Once { at: due },
            })
        })
        .collect()
}
