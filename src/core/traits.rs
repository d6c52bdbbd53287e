//! Shared traits for dated items.

use chrono::{DateTime, Utc};

use super::datetime;

/// Trait for items with a deadline.
///
/// Checks classify against a caller-supplied instant so a whole list can be
/// judged against one moment.
pub trait Schedulable {
    /// The absolute deadline.
    fn deadline(&self) -> DateTime<Utc>;

    /// Check if the deadline is strictly before `now`.
    fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        datetime::is_overdue_at(self.deadline(), now)
    }

    /// Check if the deadline falls on the same local day as `now`.
    fn is_due_today_at(&self, now: DateTime<Utc>) -> bool {
        datetime::is_today_at(self.deadline(), now)
    }
}
