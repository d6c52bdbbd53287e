use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::Schedulable;
use crate::error::FocuscoreError;

use super::timestamp;

/// A task record as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub deadline: DateTime<Utc>,
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Status,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

impl Schedulable for Task {
    fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }
}

/// Scheduling priority. Lower rank sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// HIGH = 0, MEDIUM = 1, LOW = 2.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = FocuscoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(Self::High),
            "medium" | "med" | "m" => Ok(Self::Medium),
            "low" | "l" => Ok(Self::Low),
            other => Err(FocuscoreError::InvalidInput(format!(
                "unknown priority '{other}' (expected high, medium or low)"
            ))),
        }
    }
}

/// Completion status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    #[default]
    Pending,
    Completed,
}

impl Status {
    /// The opposite status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for Status {
    type Err = FocuscoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" | "done" => Ok(Self::Completed),
            other => Err(FocuscoreError::InvalidInput(format!(
                "unknown status '{other}'"
            ))),
        }
    }
}

/// Input for creating a task.
///
/// The store assigns id, status and timestamps. A missing deadline resolves
/// to the end of the current day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub deadline: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

impl NewTask {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }
}

/// Partial update for an existing task. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub deadline: Option<DateTime<Utc>>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub status: Option<Status>,
}

impl TaskPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(deadline) = self.deadline {
            task.deadline = deadline;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("med".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(" low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_status_toggled() {
        assert_eq!(Status::Pending.toggled(), Status::Completed);
        assert_eq!(Status::Completed.toggled().toggled(), Status::Completed);
    }

    #[test]
    fn test_task_wire_format() {
        let task = Task {
            id: "abc".to_string(),
            title: "Write".to_string(),
            description: None,
            deadline: "2026-10-19T17:00:00Z".parse().unwrap(),
            priority: Priority::High,
            tags: vec!["Docs".to_string()],
            status: Status::Pending,
            created_at: "2026-10-19T08:00:00.250Z".parse().unwrap(),
            updated_at: "2026-10-19T08:00:00.250Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["deadline"], "2026-10-19T17:00:00.000Z");
        assert_eq!(json["createdAt"], "2026-10-19T08:00:00.250Z");
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["status"], "PENDING");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_patch_leaves_unspecified_fields() {
        let mut task = Task {
            id: "1".to_string(),
            title: "Old".to_string(),
            description: Some("keep".to_string()),
            deadline: Utc::now(),
            priority: Priority::Low,
            tags: vec!["a".to_string()],
            status: Status::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        TaskPatch {
            title: Some("New".to_string()),
            priority: Some(Priority::High),
            ..TaskPatch::default()
        }
        .apply(&mut task);

        assert_eq!(task.title, "New");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.description.as_deref(), Some("keep"));
        assert_eq!(task.tags, vec!["a".to_string()]);
    }

    #[test]
    fn test_patch_clears_description() {
        let patch = TaskPatch {
            description: Some(None),
            ..TaskPatch::default()
        };
        assert!(!patch.is_empty());
        assert!(TaskPatch::default().is_empty());
    }
}
