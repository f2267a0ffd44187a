//! # Praxis Audit
//!
//! Bounded in-memory log of access decisions. The original application
//! denied silently; this is the structured denial sink that replaces that
//! gap.

mod access_log;

pub use access_log::{AccessEntry, AccessEventType, AccessLog, AccessLogStats};
