//! Serialization of the task collection.
//!
//! Encoding is strict. Decoding is lenient per record: the stored JSON
//! carries no schema version, so older or hand-edited records are
//! normalized instead of rejected. Only a document that is not a JSON array
//! at all counts as corrupt.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::error::FocuscoreError;

use super::model::{Priority, Status, Task};
use super::timestamp;

/// Serialize the collection as a JSON array.
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if serialization fails.
pub fn encode(tasks: &[Task]) -> Result<String, FocuscoreError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Deserialize a stored collection.
///
/// Unknown fields are ignored and missing optional fields take defaults.
/// Records without an id, a title or a readable deadline are dropped, as
/// are repeated ids after their first occurrence.
///
/// # Errors
///
/// Returns `FocuscoreError::Parse` if `raw` is not a JSON array.
pub fn decode(raw: &str, loaded_at: DateTime<Utc>) -> Result<Vec<Task>, FocuscoreError> {
    let records: Vec<Value> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(records.len());

    for (index, record) in records.into_iter().enumerate() {
        let Some(task) = normalize(record, loaded_at) else {
            log::warn!("dropping unreadable task record at index {index}");
            continue;
        };
        if !seen.insert(task.id.clone()) {
            log::warn!("dropping duplicate task id {}", task.id);
            continue;
        }
        tasks.push(task);
    }

    Ok(tasks)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTask {
    id: Option<Value>,
    title: Option<String>,
    description: Option<String>,
    deadline: Option<String>,
    priority: Option<String>,
    tags: Option<Vec<Value>>,
    status: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

fn normalize(record: Value, loaded_at: DateTime<Utc>) -> Option<Task> {
    let stored: StoredTask = serde_json::from_value(record).ok()?;

    // Early records used numeric ids
    let id = match stored.id? {
        Value::String(s) if !s.is_empty() => s,
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    let title = stored.title?;
    let deadline = timestamp::parse(&stored.deadline?)?;

    let priority = stored
        .priority
        .and_then(|p| p.parse::<Priority>().ok())
        .unwrap_or_default();
    let status = stored
        .status
        .and_then(|s| s.parse::<Status>().ok())
        .unwrap_or_default();
    let tags = stored
        .tags
        .unwrap_or_default()
        .into_iter()
        .filter_map(|tag| match tag {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect();

    let created = stored.created_at.as_deref().and_then(timestamp::parse);
    let updated = stored.updated_at.as_deref().and_then(timestamp::parse);
    let (created_at, updated_at) = match (created, updated) {
        (Some(c), Some(u)) => (c, u.max(c)),
        (Some(c), None) => (c, c),
        (None, Some(u)) => (u, u),
        (None, None) => (loaded_at, loaded_at),
    };

    Some(Task {
        id,
        title,
        description: stored.description.filter(|d| !d.is_empty()),
        deadline,
        priority,
        tags,
        status,
        created_at,
        updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_at() -> DateTime<Utc> {
        timestamp::parse("2026-10-19T12:00:00Z").unwrap()
    }

    #[test]
    fn test_round_trip_preserves_content_and_order() {
        let raw = r#"[
            {"id":"b","title":"Second","deadline":"2026-10-20T10:00:00.000Z","priority":"LOW",
             "tags":["x","y"],"status":"COMPLETED",
             "createdAt":"2026-10-19T09:00:00.000Z","updatedAt":"2026-10-19T09:30:00.000Z"},
            {"id":"a","title":"First","description":"notes","deadline":"2026-10-18T10:00:00.000Z",
             "priority":"HIGH","tags":[],"status":"PENDING",
             "createdAt":"2026-10-18T09:00:00.000Z","updatedAt":"2026-10-18T09:00:00.000Z"}
        ]"#;

        let tasks = decode(raw, loaded_at()).unwrap();
        let again = decode(&encode(&tasks).unwrap(), loaded_at()).unwrap();

        assert_eq!(tasks, again);
        assert_eq!(tasks[0].id, "b");
        assert_eq!(tasks[0].tags, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(tasks[1].description.as_deref(), Some("notes"));
    }

    #[test]
    fn test_not_an_array_is_corrupt() {
        assert!(decode("{not json", loaded_at()).is_err());
        assert!(decode(r#"{"id":"1"}"#, loaded_at()).is_err());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let raw = r#"[{"id":7,"title":"Legacy","deadline":"2026-10-19T17:00:00Z","extra":true}]"#;
        let tasks = decode(raw, loaded_at()).unwrap();

        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.id, "7");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::Pending);
        assert!(task.tags.is_empty());
        assert!(task.description.is_none());
        assert_eq!(task.created_at, loaded_at());
        assert_eq!(task.updated_at, loaded_at());
    }

    #[test]
    fn test_updated_at_never_precedes_created_at() {
        let raw = r#"[{"id":"1","title":"T","deadline":"2026-10-19T17:00:00Z",
            "createdAt":"2026-10-19T10:00:00Z","updatedAt":"2026-10-19T09:00:00Z"}]"#;
        let task = &decode(raw, loaded_at()).unwrap()[0];
        assert_eq!(task.updated_at, task.created_at);
    }

    #[test]
    fn test_unusable_records_are_dropped() {
        let raw = r#"[
            {"title":"no id","deadline":"2026-10-19T17:00:00Z"},
            {"id":"1","deadline":"2026-10-19T17:00:00Z"},
            {"id":"2","title":"bad deadline","deadline":"soon"},
            "not an object",
            {"id":"3","title":"ok","deadline":"2026-10-19T17:00:00Z","priority":"URGENT"},
            {"id":"3","title":"dup","deadline":"2026-10-19T17:00:00Z"}
        ]"#;

        let tasks = decode(raw, loaded_at()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "ok");
        assert_eq!(tasks[0].priority, Priority::Medium);
    }
}
