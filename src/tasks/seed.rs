//! Example tasks used when no readable collection is stored.

use chrono::{DateTime, Duration, Local, NaiveTime, Utc};

use crate::core::local_to_utc;

use super::model::{Priority, Status, Task};

/// The fixed seed set: one task due today, one tomorrow, one overdue.
#[must_use]
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let five_pm = NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default();
    let today_five_pm = local_to_utc(now.with_timezone(&Local).date_naive().and_time(five_pm));

    let task = |id: &str, title: &str, description: &str, deadline, priority, tags: &[&str]| Task {
        id: id.to_string(),
        title: title.to_string(),
        description: Some(description.to_string()),
        deadline,
        priority,
        tags: tags.iter().map(ToString::to_string).collect(),
        status: Status::Pending,
        created_at: now,
        updated_at: now,
    };

    vec![
        task(
            "1",
            "Review System Architecture",
            "Analyze the current builder model and identify bottlenecks.",
            today_five_pm,
            Priority::High,
            &["Architecture", "Engineering"],
        ),
        task(
            "2",
            "Update Dependencies",
            "Ensure all packages are on the latest stable versions.",
            now + Duration::days(1),
            Priority::Medium,
            &["Maintenance"],
        ),
        task(
            "3",
            "Draft API Documentation",
            "Document the new endpoints for the mobile team.",
            now - Duration::days(1),
            Priority::High,
            &["Docs"],
        ),
    ]
}
