//! AccessLog - bounded record of access decisions

use access::{AccessDecision, AccessRequirements};
use serde::{Deserialize, Serialize};
use shared::Actor;
use std::collections::VecDeque;
use uuid::Uuid;

/// A recorded access decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessEntry {
    pub timestamp: String,
    pub event_type: AccessEventType,
    /// Session the decision was taken in
    pub session_id: Uuid,
    pub actor_id: String,
    pub role: String,
    pub required_permissions: Vec<String>,
    pub required_roles: Vec<String>,
    pub allowed: bool,
    pub reason: Option<String>,
}

/// Types of recorded events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessEventType {
    AccessGranted,
    AccessDenied,
}

/// Bounded in-memory access log.
///
/// Oldest entries are dropped once `max_entries` is reached. State lives
/// for the session only; `export_json` is the hand-off point for anything
/// longer-lived.
#[derive(Debug)]
pub struct AccessLog {
    entries: VecDeque<AccessEntry>,
    max_entries: usize,
}

impl AccessLog {
    /// Create a new AccessLog
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries,
        }
    }

    /// Append an entry, dropping the oldest at capacity
    pub fn log(&mut self, entry: AccessEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Record the outcome of an access check
    pub fn log_decision(
        &mut self,
        session_id: Uuid,
        actor: &Actor,
        requirements: &AccessRequirements,
        decision: &AccessDecision,
    ) {
        self.log(AccessEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type: if decision.allowed {
                AccessEventType::AccessGranted
            } else {
                AccessEventType::AccessDenied
            },
            session_id,
            actor_id: actor.id.clone(),
            role: actor.role.clone(),
            required_permissions: requirements.permissions.clone(),
            required_roles: requirements.roles.clone(),
            allowed: decision.allowed,
            reason: decision.reason.clone(),
        });
    }

    /// Get recent entries, newest first
    pub fn recent(&self, limit: usize) -> Vec<&AccessEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Get recent denials, newest first
    pub fn recent_denials(&self, limit: usize) -> Vec<&AccessEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !e.allowed)
            .take(limit)
            .collect()
    }

    /// Get statistics
    pub fn stats(&self) -> AccessLogStats {
        let total = self.entries.len();
        let denials = self.entries.iter().filter(|e| !e.allowed).count();

        AccessLogStats {
            total_entries: total,
            denial_count: denials,
        }
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.iter().collect::<Vec<_>>()).unwrap_or_default()
    }
}

/// Access log statistics
#[derive(Debug, Clone)]
pub struct AccessLogStats {
    pub total_entries: usize,
    pub denial_count: usize,
}

impl Default for AccessLog {
    fn default() -> Self {
        Self::new(10_000)
    }
}
