//! Date classification and natural-language deadline parsing.
//!
//! Classification always evaluates against "now" at call time. The `_at`
//! variants take an explicit evaluation instant so callers can classify a
//! whole list against one instant.

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound,
    TimeZone, Utc, Weekday,
};

/// Time of day used when a deadline is given without a time.
pub const END_OF_DAY: (u32, u32) = (23, 59);

/// The current instant at the millisecond precision tasks are stored with.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// True iff `deadline` is strictly earlier than now.
#[must_use]
pub fn is_overdue(deadline: DateTime<Utc>) -> bool {
    is_overdue_at(deadline, Utc::now())
}

/// True iff `deadline` is strictly earlier than `now`.
#[must_use]
pub fn is_overdue_at(deadline: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    deadline < now
}

/// True iff `timestamp` falls on today's local calendar date.
#[must_use]
pub fn is_today(timestamp: DateTime<Utc>) -> bool {
    is_today_at(timestamp, Utc::now())
}

/// True iff `timestamp` falls on the same local calendar date as `now`.
#[must_use]
pub fn is_today_at(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    timestamp.with_timezone(&Local).date_naive() == now.with_timezone(&Local).date_naive()
}

/// 23:59:00 local time on the current day.
#[must_use]
pub fn end_of_today() -> DateTime<Utc> {
    let (hour, minute) = END_OF_DAY;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default();
    local_to_utc(NaiveDateTime::new(Local::now().date_naive(), time))
}

/// Interpret a naive wall-clock time in the local timezone.
///
/// Times inside a DST gap fall back to being read as UTC.
#[must_use]
pub fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| Utc.from_utc_datetime(&naive), |dt| dt.with_timezone(&Utc))
}

/// Result of parsing a natural language date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateParseResult {
    /// The parsed date.
    pub date: NaiveDate,
    /// Optional time of day.
    pub time: Option<NaiveTime>,
}

impl DateParseResult {
    /// Create a new result with just a date.
    #[must_use]
    pub const fn date_only(date: NaiveDate) -> Self {
        Self { date, time: None }
    }

    /// Create a new result with date and time.
    #[must_use]
    pub const fn with_time(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: Some(time),
        }
    }

    /// Convert to a local wall-clock datetime, using 23:59 when no time was given.
    #[must_use]
    pub fn to_datetime(&self) -> NaiveDateTime {
        let (hour, minute) = END_OF_DAY;
        let time = self
            .time
            .unwrap_or_else(|| NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default());
        NaiveDateTime::new(self.date, time)
    }

    /// Convert to an absolute deadline.
    #[must_use]
    pub fn to_deadline(&self) -> DateTime<Utc> {
        local_to_utc(self.to_datetime())
    }
}

/// Parse a natural language date expression.
///
/// Supports patterns like:
/// - `today`, `tomorrow`, `yesterday`
/// - `monday`, `tuesday`, etc. (next occurrence)
/// - `next monday`, `next week`
/// - `in 3 days`, `in 2 weeks`
/// - `dec 15`, `december 15`, `12/15`
/// - `2024-12-15` (ISO format)
///
/// A leading `by` is ignored. Returns `None` if the input cannot be parsed.
#[must_use]
pub fn parse_natural_date(input: &str) -> Option<DateParseResult> {
    let input = input.trim().to_lowercase();
    let input = input.strip_prefix("by ").unwrap_or(&input);
    parse_date_internal(input, Local::now().date_naive())
}

/// Parse a natural language datetime expression.
///
/// Supports date patterns plus time patterns like:
/// - `3pm`, `3:00pm`, `15:00`
/// - `morning` (9am), `evening` (6pm), `noon` (12pm)
///
/// Also accepts `2024-12-15T09:30` and `2024-12-15 09:30`.
#[must_use]
pub fn parse_natural_datetime(input: &str) -> Option<DateParseResult> {
    let input = input.trim().to_lowercase();
    let input = input.strip_prefix("by ").unwrap_or(&input);

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(DateParseResult::with_time(dt.date(), dt.time()));
        }
    }

    let (date_part, time) = extract_time(input);
    let mut result = parse_date_internal(&date_part, Local::now().date_naive())?;
    result.time = time;
    Some(result)
}

/// Parse a deadline argument into an absolute instant.
///
/// Accepts RFC 3339 timestamps as well as everything
/// [`parse_natural_datetime`] understands.
#[must_use]
pub fn parse_deadline(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input.trim()) {
        return Some(dt.with_timezone(&Utc).trunc_subsecs(3));
    }
    parse_natural_datetime(input).map(|parsed| parsed.to_deadline())
}

fn parse_date_internal(input: &str, today: NaiveDate) -> Option<DateParseResult> {
    let input = input.trim();

    match input {
        "today" => return Some(DateParseResult::date_only(today)),
        "tomorrow" => return offset_days(today, 1).map(DateParseResult::date_only),
        "yesterday" => return offset_days(today, -1).map(DateParseResult::date_only),
        _ => {},
    }

    if let Some(result) = parse_relative_offset(input, today) {
        return Some(result);
    }

    if let Some(result) = parse_weekday(input, today) {
        return Some(result);
    }

    // "next week" is the coming Monday
    if input == "next week" {
        let days_until_monday = (i64::from(Weekday::Mon.num_days_from_sunday())
            - i64::from(today.weekday().num_days_from_sunday())
            + 7)
            % 7;
        let days = if days_until_monday == 0 {
            7
        } else {
            days_until_monday
        };
        return offset_days(today, days).map(DateParseResult::date_only);
    }

    if let Some(result) = parse_month_day(input, today) {
        return Some(result);
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(DateParseResult::date_only(date));
    }

    parse_us_date(input, today)
}

/// Parse "in X days/weeks/months" patterns.
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<DateParseResult> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() == 3 && parts[0] == "in" {
        let amount: i64 = parts[1].parse().ok()?;
        let unit = parts[2].trim_end_matches('s');

        let days = match unit {
            "day" => amount,
            "week" => amount.checked_mul(7)?,
            "month" => amount.checked_mul(30)?,
            _ => return None,
        };

        return offset_days(today, days).map(DateParseResult::date_only);
    }

    None
}

fn parse_weekday(input: &str, today: NaiveDate) -> Option<DateParseResult> {
    let (is_next, day_str) = input
        .strip_prefix("next ")
        .map_or((false, input), |rest| (true, rest));

    let target_weekday = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    let mut days_until = (i64::from(target_weekday.num_days_from_sunday())
        - i64::from(today.weekday().num_days_from_sunday())
        + 7)
        % 7;

    if days_until == 0 || is_next {
        days_until += 7;
    }

    offset_days(today, days_until).map(DateParseResult::date_only)
}

/// `today` shifted by `days`, or `None` outside the representable range.
fn offset_days(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    today.checked_add_signed(Duration::try_days(days)?)
}

fn parse_month_day(input: &str, today: NaiveDate) -> Option<DateParseResult> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let month = parse_month_name(parts[0])?;
    let day: u32 = parts[1].parse().ok()?;

    // Dates already past this year roll over to next year
    let mut year = today.year();
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    if date < today {
        year += 1;
    }

    NaiveDate::from_ymd_opt(year, month, day).map(DateParseResult::date_only)
}

fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Parse US date format (MM/DD or MM/DD/YYYY).
fn parse_us_date(input: &str, today: NaiveDate) -> Option<DateParseResult> {
    let parts: Vec<&str> = input.split('/').collect();

    match parts.len() {
        2 => {
            let month: u32 = parts[0].parse().ok()?;
            let day: u32 = parts[1].parse().ok()?;

            let mut year = today.year();
            let date = NaiveDate::from_ymd_opt(year, month, day)?;

            if date < today {
                year += 1;
            }

            NaiveDate::from_ymd_opt(year, month, day).map(DateParseResult::date_only)
        },
        3 => {
            let month: u32 = parts[0].parse().ok()?;
            let day: u32 = parts[1].parse().ok()?;
            let year: i32 = parts[2].parse().ok()?;
            let year = if year < 100 { 2000 + year } else { year };

            NaiveDate::from_ymd_opt(year, month, day).map(DateParseResult::date_only)
        },
        _ => None,
    }
}

/// Split a trailing time off the input.
fn extract_time(input: &str) -> (String, Option<NaiveTime>) {
    let input = input.replace(" at ", " ").replace(" @ ", " ");
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(last) = parts.last() else {
        return (input, None);
    };

    if let Some(time) = parse_time(last) {
        let date_part = parts[..parts.len() - 1].join(" ");
        return (date_part, Some(time));
    }

    (input, None)
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    let input = input.to_lowercase();

    match input.as_str() {
        "morning" => return NaiveTime::from_hms_opt(9, 0, 0),
        "noon" | "midday" => return NaiveTime::from_hms_opt(12, 0, 0),
        "afternoon" => return NaiveTime::from_hms_opt(14, 0, 0),
        "evening" => return NaiveTime::from_hms_opt(18, 0, 0),
        "night" => return NaiveTime::from_hms_opt(21, 0, 0),
        _ => {},
    }

    if let Ok(time) = NaiveTime::parse_from_str(&input, "%H:%M") {
        return Some(time);
    }

    let (time_str, is_pm) = if let Some(rest) = input.strip_suffix("pm") {
        (rest, true)
    } else if let Some(rest) = input.strip_suffix("am") {
        (rest, false)
    } else {
        return None;
    };

    let (hour, minute) = match time_str.split_once(':') {
        Some((h, m)) => (h.parse::<u32>().ok()?, m.parse::<u32>().ok()?),
        None => (time_str.parse::<u32>().ok()?, 0),
    };

    let hour = match (is_pm, hour) {
        (true, h) if h < 12 => h + 12,
        (false, 12) => 0,
        (_, h) => h,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}
