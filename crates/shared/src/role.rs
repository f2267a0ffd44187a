//! Role and actor types

use serde::{Deserialize, Serialize};

use crate::permission;

/// A named, static set of permissions.
///
/// Role definitions are data only; evaluation lives in the `access` crate.
/// The builtin clinical matrix is immutable once a session is composed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDefinition {
    /// Unique role name (e.g. 'doctor', 'lab_tech')
    pub name: String,

    /// Human-readable label
    pub display_name: String,

    /// Role description
    #[serde(default)]
    pub description: String,

    /// Permission tokens this role carries
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleDefinition {
    /// Create a new role with minimal configuration
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            description: String::new(),
            permissions: Vec::new(),
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: set permissions
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Check whether this role on its own grants `requested`.
    ///
    /// True iff the permission list contains the token or the
    /// `full_system_access` sentinel.
    pub fn grants(&self, requested: &str) -> bool {
        permission::grants(&self.permissions, requested)
    }
}

/// The authenticated user of a session.
///
/// An actor carries a role name plus an optional list of explicitly
/// attached permissions; the effective permission set is the union.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Stable identifier (account id, email)
    pub id: String,

    /// Role name, matched against the role matrix
    pub role: String,

    /// Extra permissions attached directly to this actor
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Actor {
    /// Create an actor with no extra permissions
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            permissions: Vec::new(),
        }
    }

    /// Builder: attach explicit permissions
    pub fn with_permissions(mut self, permissions: Vec<String>) -> Self {
        self.permissions = permissions;
        self
    }
}
