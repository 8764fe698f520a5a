//! Utility modules.

/// Log sanitization so stored values never land in logs in full.
pub mod log_sanitizer;

/// Percent-encoded, insertion-ordered query strings.
pub mod query;
