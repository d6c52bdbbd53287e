//! Feature implementations for focuscore.
//!
//! - Focus mode: active task selection and the session timer
//! - Quick capture: one-line task entry
pub mod capture;
pub mod focus;
