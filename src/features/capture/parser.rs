//! Quick-capture parser.
//!
//! Parses strings like "ship release notes tomorrow 5pm #docs !high" into
//! structured task data.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::{parse_natural_datetime, DateParseResult};
use crate::tasks::{NewTask, Priority};

/// Result of parsing a capture line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedTask {
    /// Text left after extracting all markers.
    pub title: String,
    /// Text after `//`.
    pub description: Option<String>,
    /// Explicit priority marker, if any.
    pub priority: Option<Priority>,
    /// Parsed deadline.
    pub deadline: Option<DateParseResult>,
    /// Tags from `#tag` markers.
    pub tags: Vec<String>,
}

impl CapturedTask {
    /// Convert into store input. Missing priority is MEDIUM; a missing
    /// deadline is left for the store to resolve.
    #[must_use]
    pub fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title,
            description: self.description,
            priority: self.priority.unwrap_or_default(),
            deadline: self.deadline.as_ref().map(DateParseResult::to_deadline),
            tags: self.tags,
        }
    }
}

static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#([\w-]+)").unwrap_or_else(|e| panic!("Invalid tag regex: {e}")));

// Notes start at a standalone `//`, so URLs stay in the title
static NOTES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)//\s+(.+)$").unwrap_or_else(|e| panic!("Invalid notes regex: {e}"))
});

// Escaped hashes stay in the title
const ESCAPED_HASH_PLACEHOLDER: &str = "\x00HASH\x00";

/// Parse a capture line.
///
/// # Examples
///
/// ```
/// use focuscore::features::capture::parse_capture;
/// use focuscore::tasks::Priority;
///
/// let task = parse_capture("draft changelog tomorrow #docs !high");
/// assert_eq!(task.title, "draft changelog");
/// assert_eq!(task.tags, vec!["docs"]);
/// assert_eq!(task.priority, Some(Priority::High));
/// assert!(task.deadline.is_some());
/// ```
#[must_use]
pub fn parse_capture(input: &str) -> CapturedTask {
    let mut task = CapturedTask::default();
    let mut remaining = input.trim().replace("\\#", ESCAPED_HASH_PLACEHOLDER);

    if let Some(caps) = NOTES_PATTERN.captures(&remaining) {
        if let Some(notes) = caps.get(1) {
            task.description = Some(notes.as_str().trim().replace(ESCAPED_HASH_PLACEHOLDER, "#"));
        }
        remaining = NOTES_PATTERN.replace(&remaining, "").to_string();
    }

    for caps in TAG_PATTERN.captures_iter(&remaining) {
        if let Some(tag) = caps.get(1) {
            task.tags.push(tag.as_str().to_string());
        }
    }
    remaining = TAG_PATTERN.replace_all(&remaining, "").to_string();

    remaining = extract_priority(&mut task, &remaining);

    remaining = extract_deadline(&mut task, &remaining);
    task.title = clean_title(&remaining).replace(ESCAPED_HASH_PLACEHOLDER, "#");

    task
}

/// Priority for a standalone marker word: `!high`/`!!!`, `!medium`/`!!`,
/// `!low`/`!`.
fn priority_marker(word: &str) -> Option<Priority> {
    match word.to_lowercase().as_str() {
        "!high" | "!!!" => Some(Priority::High),
        "!medium" | "!!" => Some(Priority::Medium),
        "!low" | "!" => Some(Priority::Low),
        _ => None,
    }
}

/// Drop every marker word; the first one sets the priority.
fn extract_priority(task: &mut CapturedTask, text: &str) -> String {
    text.split_whitespace()
        .filter(|word| match priority_marker(word) {
            Some(priority) => {
                task.priority.get_or_insert(priority);
                false
            },
            None => true,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pull the first date expression out of `text`, longest window first.
fn extract_deadline(task: &mut CapturedTask, text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut result_words = Vec::new();
    let mut i = 0;

    while i < words.len() {
        if task.deadline.is_none() {
            let matched = (1..=4).rev().find_map(|len| {
                let window = words.get(i..i + len)?.join(" ");
                parse_natural_datetime(&window).map(|parsed| (len, parsed))
            });
            if let Some((len, parsed)) = matched {
                task.deadline = Some(parsed);
                i += len;
                continue;
            }
        }

        result_words.push(words[i]);
        i += 1;
    }

    result_words.join(" ")
}

fn clean_title(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
