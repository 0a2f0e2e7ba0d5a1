//! Foundational low-level utilities shared across Rota crates.
//!
//! Provides Unix-time helpers and timestamp formatting used by runtime
//! logging and comment rendering.

pub mod time_utils;

pub use time_utils::{current_unix_timestamp, current_unix_timestamp_ms, format_unix_ms_utc};
