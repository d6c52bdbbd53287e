//! Command-line interface for focuscore.

pub mod args;
pub mod commands;
