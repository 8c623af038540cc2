//! Typed whole-collection load/save on top of a [`KvStore`].
//!
//! A collection is a JSON array stored under one key. Loading never fails:
//! a missing key, unreadable store or invalid JSON all yield an empty list,
//! and individual records that do not decode are skipped. Saving writes
//! those skipped records back after the typed ones, so a write never drops
//! data this build cannot read.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::kv::KvStore;
use crate::error::Result;

pub fn load_collection<T: DeserializeOwned>(store: &impl KvStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::error!(key, error = %e, "failed to read collection");
            return Vec::new();
        }
    };

    let values: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored collection is not a JSON array, treating as empty");
            return Vec::new();
        }
    };

    let total = values.len();
    let items: Vec<T> = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "skipping malformed record");
                None
            }
        })
        .collect();

    tracing::debug!(key, loaded = items.len(), total, "collection loaded");
    items
}

/// Replace the stored collection with `items`, keeping stored records that
/// do not decode as `T`.
pub fn save_collection<T>(store: &impl KvStore, key: &str, items: &[T]) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let kept = undecodable_records::<T>(store, key)?;
    let mut values = Vec::with_capacity(items.len() + kept.len());
    for item in items {
        values.push(serde_json::to_value(item)?);
    }
    let preserved = kept.len();
    values.extend(kept);

    let json = serde_json::to_string(&values)?;
    store.set(key, &json)?;
    tracing::debug!(key, saved = items.len(), preserved, "collection saved");
    Ok(())
}

/// Stored records under `key` that do not decode as `T`. A value that is
/// not a JSON array has nothing worth keeping.
fn undecodable_records<T: DeserializeOwned>(
    store: &impl KvStore,
    key: &str,
) -> Result<Vec<serde_json::Value>> {
    let Some(raw) = store.get(key)? else {
        return Ok(Vec::new());
    };
    let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(&raw) else {
        return Ok(Vec::new());
    };
    Ok(values
        .into_iter()
        .filter(|value| serde_json::from_value::<T>(value.clone()).is_err())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::DailyGoalProgress;
    use crate::storage::MemoryStore;

    const KEY: &str = "@focusflow_daily_progress";

    #[test]
    fn missing_key_is_empty() {
        let store = MemoryStore::new();
        assert!(load_collection::<DailyGoalProgress>(&store, KEY).is_empty());
    }

    #[test]
    fn invalid_json_is_empty() {
        let store = MemoryStore::new();
        store.set(KEY, "{not json").unwrap();
        assert!(load_collection::<DailyGoalProgress>(&store, KEY).is_empty());
        store.set(KEY, r#"{"date":"2024-01-01"}"#).unwrap();
        assert!(load_collection::<DailyGoalProgress>(&store, KEY).is_empty());
    }

    #[test]
    fn malformed_records_are_skipped() {
        let store = MemoryStore::new();
        store
            .set(
                KEY,
                r#"[
                    {"date":"2024-01-01","goalId":"g","completed":true},
                    {"date":"not-a-date","goalId":"g","completed":true},
                    {"goalId":"g"}
                ]"#,
            )
            .unwrap();
        let loaded: Vec<DailyGoalProgress> = load_collection(&store, KEY);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].goal_id, "g");
    }

    #[test]
    fn save_replaces_whole_collection() {
        let store = MemoryStore::new();
        let first = vec![DailyGoalProgress {
            date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            goal_id: "a".into(),
            completed: true,
        }];
        save_collection(&store, KEY, &first).unwrap();
        save_collection::<DailyGoalProgress>(&store, KEY, &[]).unwrap();
        assert!(load_collection::<DailyGoalProgress>(&store, KEY).is_empty());
        save_collection(&store, KEY, &first).unwrap();
        assert_eq!(load_collection::<DailyGoalProgress>(&store, KEY), first);
    }

    #[test]
    fn save_keeps_records_it_cannot_read() {
        let store = MemoryStore::new();
        store
            .set(
                KEY,
                r#"[
                    {"date":"2024-01-01","goalId":"g","completed":true},
                    {"date":"someday","goalId":"g","completed":true}
                ]"#,
            )
            .unwrap();

        let mut loaded: Vec<DailyGoalProgress> = load_collection(&store, KEY);
        assert_eq!(loaded.len(), 1);
        loaded.clear();
        save_collection(&store, KEY, &loaded).unwrap();

        let raw = store.get(KEY).unwrap().unwrap();
        let stored: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0]["date"], "someday");
    }
}
