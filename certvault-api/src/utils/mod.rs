//! Utility modules.

/// Log sanitization utilities to keep certificates and keys out of logs.
pub mod log_sanitizer;
