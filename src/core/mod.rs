//! Core abstractions for focuscore.
//!
//! This module provides the date classification rules shared by the task
//! views and the focus controller, plus deadline parsing.

mod datetime;
mod traits;

pub use datetime::{
    end_of_today, is_overdue, is_overdue_at, is_today, is_today_at, local_to_utc, now,
    parse_deadline, parse_natural_date, parse_natural_datetime, DateParseResult, END_OF_DAY,
};
pub use traits::Schedulable;
