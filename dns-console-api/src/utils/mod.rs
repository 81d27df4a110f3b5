//! Utility modules.

/// Timestamp serde helpers for wire types.
pub mod datetime;

/// Keeps tokens and large bodies out of logs.
pub mod log_sanitizer;
