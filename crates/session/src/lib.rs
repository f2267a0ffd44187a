//! # Praxis Session
//!
//! Composition root for one authenticated practice session: owns the
//! response cache, the access policy and the audit log, and hands them to
//! callers by reference. Nothing in here is global; construct one
//! `SessionContext` at startup and pass it down.

pub mod context;

pub use context::SessionContext;
