//! Quick capture for task entry.
//!
//! Turns one line of text into a new task:
//! - "pay invoice tomorrow 5pm #finance !high"
//! - "renew passport by dec 15 // bring old photos"
//! - "follow up in 3 days #sales"

mod parser;

pub use parser::{parse_capture, CapturedTask};
