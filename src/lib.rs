//! focuscore - a deadline-driven task planner with a single-task focus timer
//!
//! This crate keeps a local task collection in SQLite, derives agenda views
//! from it, and drives a one-task-at-a-time focus session over the result.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod output;
pub mod storage;
pub mod tasks;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::FocuscoreError;
pub use tasks::{TaskProvider, TaskStore};
